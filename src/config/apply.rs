use std::path::PathBuf;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveUsize, WardenArgs};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::ConfigFile;

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

/// Applies configuration values to CLI arguments. Values given on the
/// command line always win.
///
/// # Errors
///
/// Returns an error when a config value is invalid or conflicts with
/// another setting.
pub fn apply_config(
    args: &mut WardenArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "dir")
        && let Some(dir) = config.dir.as_ref()
    {
        args.dir = PathBuf::from(dir);
    }

    if !is_cli(matches, "debug")
        && let Some(debug) = config.debug
    {
        args.debug = debug;
    }

    if !is_cli(matches, "max_in_flight")
        && let Some(max_in_flight) = config.max_in_flight
    {
        args.max_in_flight = Some(PositiveUsize::try_from(max_in_flight).map_err(|err| {
            AppError::config(ConfigError::InvalidField {
                field: "max_in_flight",
                source: err,
            })
        })?);
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(connect_timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = Some(connect_timeout.to_duration().map_err(|err| {
            AppError::config(ConfigError::InvalidField {
                field: "connect_timeout",
                source: err,
            })
        })?);
    }

    if !is_cli(matches, "user_agent")
        && let Some(user_agent) = config.user_agent.as_ref()
    {
        args.user_agent.clone_from(user_agent);
    }

    if !is_cli(matches, "no_ua")
        && let Some(no_ua) = config.no_ua
    {
        args.no_ua = no_ua;
    }

    if args.no_ua && is_cli(matches, "user_agent") {
        return Err(AppError::validation(ValidationError::UserAgentConflict));
    }

    Ok(())
}
