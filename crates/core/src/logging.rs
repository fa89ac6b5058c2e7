//! Global tracing subscriber for the binaries.

use crate::paths::mapscope_home;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter directives read before falling back to `RUST_LOG`.
pub const LOG_ENV: &str = "MAPSCOPE_LOG";

pub fn log_dir() -> Option<PathBuf> {
    mapscope_home().map(|home| home.join("logs"))
}

/// Install the subscriber. Events go to a daily file named after `component`
/// under [`log_dir`], and also to stderr when `to_stderr` is set.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes the file writer. `None` means no log directory was usable.
pub fn init_logging(component: &str, to_stderr: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let dir = log_dir().filter(|dir| std::fs::create_dir_all(dir).is_ok());
    let (file_layer, guard) = match dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, component);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };
    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    guard
}
