use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the process-wide subscriber. Diagnostics go to stderr so stdout
/// only carries result lines.
pub fn init_logging(debug: bool) {
    let filter = std::env::var("WARDEN_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| default_filter(debug),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| default_filter(debug)),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

fn default_filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new("warn,warden=debug")
    } else {
        EnvFilter::new("warn")
    }
}
