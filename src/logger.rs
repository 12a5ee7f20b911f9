use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::ArrayError;

/// Maps a `-v` count to a default log level.
pub fn level_from_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Initializes `tracing` with a human readable layer on stderr.
///
/// `RUST_LOG` takes precedence over `level`. Calling this a second time is not
/// an error.
pub fn initialize_logger(level: Option<LevelFilter>) -> Result<(), ArrayError> {
    if tracing::dispatcher::has_been_set() {
        tracing::trace!("Tracing is already initialized, skipping");
        return Ok(());
    }

    let layer = fmt::layer().with_writer(std::io::stderr);

    let filter = match level {
        Some(level) => EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy(),
        None => EnvFilter::from_default_env(),
    };

    let res = tracing_subscriber::util::SubscriberInitExt::try_init(
        tracing_subscriber::registry().with(layer).with(filter),
    );

    // Another thread may have won the race since the check above.
    if let Err(e) = res {
        if !tracing::dispatcher::has_been_set() {
            return Err(ArrayError::Logger(e.to_string()));
        }
    }

    Ok(())
}
