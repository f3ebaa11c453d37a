//! Log output for the command line tool.
//!
//! Logs go to stderr so that they do not mix with prompts and tables on
//! stdout. The level is taken from `RUST_LOG` and defaults to `warn`.
//! Optionally, everything at `debug` and above is also appended to a file.

use std::{fs::OpenOptions, path::Path, sync::Arc};

use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::Error;

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns [Error::Io] if `log_file` is given and cannot be opened for
/// appending.
pub fn setup_logging(log_file: Option<&Path>) -> Result<(), Error> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    let debug_log = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;

            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file))
                    .with_filter(LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_log)
        .with(debug_log)
        .init();

    Ok(())
}
