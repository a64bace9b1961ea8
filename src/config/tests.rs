use super::{apply_config, load_config_file, types::ConfigFile};
use clap::{CommandFactory, FromArgMatches};
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

use crate::args::{PositiveUsize, WardenArgs};

fn parse_with_matches(cli: &[&str]) -> Result<(WardenArgs, clap::ArgMatches), String> {
    let matches = WardenArgs::command()
        .try_get_matches_from(cli)
        .map_err(|err| format!("parse failed: {}", err))?;
    let args = WardenArgs::from_arg_matches(&matches).map_err(|err| format!("{}", err))?;
    Ok((args, matches))
}

#[test]
fn parse_toml_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("warden.toml");
    let content = r#"
dir = "./probes"
debug = true
max_in_flight = 8
connect_timeout = "750ms"
user_agent = "probe-bot/2"
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.dir.as_deref() != Some("./probes") {
        return Err("Unexpected dir".to_owned());
    }
    if config.max_in_flight != Some(8) || config.debug != Some(true) {
        return Err("Unexpected max_in_flight/debug".to_owned());
    }
    let timeout = config
        .connect_timeout
        .as_ref()
        .ok_or("Expected connect_timeout")?
        .to_duration()
        .map_err(|err| err.to_string())?;
    if timeout != Duration::from_millis(750) {
        return Err(format!("Unexpected timeout {:?}", timeout));
    }
    Ok(())
}

#[test]
fn parse_json_config_with_integer_seconds() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("warden.json");
    std::fs::write(&path, r#"{"connect_timeout": 3, "verbose": true}"#)
        .map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    let timeout = config
        .connect_timeout
        .as_ref()
        .ok_or("Expected connect_timeout")?
        .to_duration()
        .map_err(|err| err.to_string())?;
    if timeout != Duration::from_secs(3) || config.debug != Some(true) {
        return Err("Unexpected JSON config values".to_owned());
    }
    Ok(())
}

#[test]
fn rejects_unknown_extension_and_bad_content() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let yaml = dir.path().join("warden.yaml");
    std::fs::write(&yaml, "dir: x").map_err(|err| format!("write failed: {}", err))?;
    if load_config_file(&yaml).is_ok() {
        return Err("Expected unsupported extension error".to_owned());
    }
    let broken = dir.path().join("warden.toml");
    std::fs::write(&broken, "dir = ").map_err(|err| format!("write failed: {}", err))?;
    if load_config_file(&broken).is_ok() {
        return Err("Expected TOML parse error".to_owned());
    }
    if load_config_file(&dir.path().join("missing.toml")).is_ok() {
        return Err("Expected read error".to_owned());
    }
    Ok(())
}

#[test]
fn config_fills_unset_cli_values() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["warden"])?;
    let config = ConfigFile {
        dir: Some("/srv/probes".to_owned()),
        debug: Some(true),
        max_in_flight: Some(3),
        connect_timeout: None,
        user_agent: Some("cfg-agent".to_owned()),
        no_ua: None,
    };
    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;
    if args.dir != Path::new("/srv/probes") || !args.debug {
        return Err("Config dir/debug not applied".to_owned());
    }
    if args.max_in_flight.map(PositiveUsize::get) != Some(3) {
        return Err("Config max_in_flight not applied".to_owned());
    }
    if args.effective_user_agent() != Some("cfg-agent") {
        return Err("Config user_agent not applied".to_owned());
    }
    Ok(())
}

#[test]
fn cli_values_override_config() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["warden", "--dir", "cli-dir", "--max-in-flight", "1"])?;
    let config = ConfigFile {
        dir: Some("config-dir".to_owned()),
        max_in_flight: Some(9),
        ..ConfigFile::default()
    };
    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;
    if args.dir != Path::new("cli-dir") {
        return Err(format!("Expected CLI dir, got {}", args.dir.display()));
    }
    if args.max_in_flight.map(PositiveUsize::get) != Some(1) {
        return Err("Expected CLI max_in_flight".to_owned());
    }
    Ok(())
}

#[test]
fn invalid_config_values_are_rejected() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["warden"])?;
    let zero = ConfigFile {
        max_in_flight: Some(0),
        ..ConfigFile::default()
    };
    if apply_config(&mut args, &matches, &zero).is_ok() {
        return Err("Expected max_in_flight = 0 to fail".to_owned());
    }

    let (mut args, matches) = parse_with_matches(&["warden", "--user-agent", "x"])?;
    let conflict = ConfigFile {
        no_ua: Some(true),
        ..ConfigFile::default()
    };
    if apply_config(&mut args, &matches, &conflict).is_ok() {
        return Err("Expected --user-agent with no_ua to conflict".to_owned());
    }
    Ok(())
}
