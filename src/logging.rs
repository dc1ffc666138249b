use std::path::PathBuf;

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Initialise logging. The default level is `info`; `debug` can be enabled
/// via the `debug_logging` key of the settings section, in which case
/// `RUST_LOG` may override the level.
///
/// When `log_file` is given, output is mirrored into that file. Calling this
/// more than once is harmless: only the first subscriber is installed.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    // Without debug logging we force `info` regardless of `RUST_LOG` so a
    // stray variable in the user's environment does not flood the log.
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let file_layer = log_file.and_then(|path| {
        let dir = path.parent()?.to_path_buf();
        let name = path.file_name()?.to_os_string();
        if let Err(e) = std::fs::create_dir_all(&dir) {
            eprintln!("failed to create log directory {}: {e}", dir.display());
            return None;
        }
        let appender = tracing_appender::rolling::never(dir, name);
        Some(fmt::layer().with_ansi(false).with_writer(appender))
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init();
}

/// Log file placed next to the config file.
pub fn log_path_for(config_path: &std::path::Path) -> PathBuf {
    config_path.with_file_name(format!("{}.log", crate::APP_NAME))
}
