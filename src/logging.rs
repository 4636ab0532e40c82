use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global `tracing` subscriber. `RUST_LOG` selects what is
/// shown; without it only `info` and above are printed, or `debug` for this
/// crate when `verbose` is set.
///
/// Calling it twice is harmless: the second subscriber is ignored.
pub fn init(verbose: bool) {
    let default = if verbose { "info,rainjoin=debug" } else { "info" };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
