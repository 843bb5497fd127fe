//! Diagnostic logging.
//!
//! The chat view owns the terminal, so log output never goes to stdout or
//! stderr. With `--log-file` events are appended to that file; otherwise they
//! are discarded. `SPUR_LOG` takes an `EnvFilter` directive string.

use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SPUR_LOG";
const DEFAULT_DIRECTIVES: &str = "spur_chat=info";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber. Calling this twice is an error.
pub fn init(log_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let registry = tracing_subscriber::registry().with(env_filter());

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()?;
        }
        None => {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink))
                .try_init()?;
        }
    }

    Ok(())
}
