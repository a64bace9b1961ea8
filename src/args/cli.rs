use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use super::parsers::{parse_duration_arg, parse_positive_usize};
use super::types::PositiveUsize;

pub const DEFAULT_USER_AGENT: &str = concat!("warden/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Fires every request file in a directory concurrently and checks each response against its regex assertions."
)]
pub struct WardenArgs {
    /// Directory with request files
    #[arg(long, short = 'd', default_value = ".")]
    pub dir: PathBuf,

    /// Enable debugging/verbosity (sets log level to debug unless overridden by WARDEN_LOG/RUST_LOG)
    #[arg(long, short = 'v', alias = "verbose")]
    pub debug: bool,

    /// Path to config file (TOML/JSON). Defaults to ./warden.toml or ./warden.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Maximum number of requests in flight at once (default: all of them)
    #[arg(long = "max-in-flight", value_parser = parse_positive_usize)]
    pub max_in_flight: Option<PositiveUsize>,

    /// Timeout for establishing a new connection (supports ms/s/m/h)
    #[arg(long = "connect-timeout", value_parser = parse_duration_arg)]
    pub connect_timeout: Option<Duration>,

    /// User-Agent header sent with every request
    #[arg(long = "user-agent", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Do not send a User-Agent header unless a request file sets one
    #[arg(long = "no-ua")]
    pub no_ua: bool,
}

impl WardenArgs {
    #[must_use]
    pub fn effective_user_agent(&self) -> Option<&str> {
        if self.no_ua {
            None
        } else {
            Some(self.user_agent.as_str())
        }
    }
}
