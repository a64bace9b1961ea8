use std::ffi::OsString;
use std::process::ExitCode;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use warden::args::{PositiveUsize, WardenArgs};
use warden::dispatch::{Engine, EngineConfig, ReqwestTransport, TransportConfig};
use warden::error::{AppError, AppResult};
use warden::report::render_results;
use warden::request::Request;
use warden::scan::scan_directory;

const EXIT_FAILURE: u8 = 1;
const EXIT_BAD_DIRECTORY: u8 = 3;
const EXIT_USAGE: u8 = 4;

pub(crate) fn run() -> ExitCode {
    let raw_args: Vec<OsString> = std::env::args_os().collect();
    let (args, matches) = match parse_args(raw_args) {
        Ok(parsed) => parsed,
        Err(err) => {
            // Help and version requests are reported through clap errors too.
            drop(err.print());
            return if err.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run_with(args, &matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn parse_args(raw_args: Vec<OsString>) -> Result<(WardenArgs, ArgMatches), clap::Error> {
    let matches = WardenArgs::command().try_get_matches_from(raw_args)?;
    let args = WardenArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn run_with(mut args: WardenArgs, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = warden::config::load_config(args.config.as_deref())? {
        warden::config::apply_config(&mut args, matches, &config)?;
    }

    crate::logger::init_logging(args.debug);

    let requests = scan_directory(&args.dir)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_probes(&args, requests))
}

async fn run_probes(args: &WardenArgs, requests: Vec<Request>) -> AppResult<()> {
    let transport = ReqwestTransport::new(&TransportConfig {
        connect_timeout: args.connect_timeout,
        user_agent: args.effective_user_agent().map(str::to_owned),
    })?;
    let engine = Engine::new(
        EngineConfig {
            max_in_flight: args.max_in_flight.map(PositiveUsize::as_non_zero),
        },
        transport,
    );

    let mut stream = engine.dispatch(requests);
    let mut stdout = std::io::stdout();
    render_results(&mut stream, &mut stdout).await?;
    Ok(())
}

const fn exit_code_for(err: &AppError) -> u8 {
    match err {
        AppError::Scan(_) => EXIT_BAD_DIRECTORY,
        AppError::Clap { .. } | AppError::Config(_) | AppError::Validation(_) => EXIT_USAGE,
        AppError::Io { .. } | AppError::Reqwest { .. } => EXIT_FAILURE,
    }
}
