//! Logging bridge for tabdeck
//!
//! Routes every `log::info!()` / `log::debug!()` call to a debug log file:
//! `/tmp/tabdeck_debug.log` on Unix/macOS, `%TEMP%\tabdeck_debug.log` on Windows.
//! When `RUST_LOG` is set the same lines are mirrored to stderr.
//!
//! Level precedence: `--log-level` CLI flag, then `RUST_LOG`, then the config
//! `log_level` (applied after the config is loaded via [`apply_config_level`]).

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tabdeck_config::LogLevel;

/// Set when the level came from the CLI or `RUST_LOG` and must not be
/// overridden by the config file.
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

static LOGGER: OnceLock<LogBridge> = OnceLock::new();

/// `log::Log` implementation writing to the debug log file.
struct LogBridge {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

impl LogBridge {
    fn new(mirror_stderr: bool) -> Self {
        let file = match OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
        {
            Ok(mut f) => {
                let _ = writeln!(
                    f,
                    "{}\ntabdeck debug session started at {}\n{}",
                    "=".repeat(80),
                    timestamp(),
                    "=".repeat(80)
                );
                Some(f)
            }
            // Logging must never take the application down
            Err(_) => None,
        };

        Self {
            file: Mutex::new(file),
            mirror_stderr,
        }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "[{}] [{:<5}] [{}] {}",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );

        if let Some(file) = self.file.lock().as_mut() {
            let _ = writeln!(file, "{line}");
        }
        if self.mirror_stderr {
            eprintln!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    {
        PathBuf::from("/tmp/tabdeck_debug.log")
    }
    #[cfg(not(unix))]
    {
        std::env::temp_dir().join("tabdeck_debug.log")
    }
}

fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.6f")
        .to_string()
}

/// Level named by `RUST_LOG`, if it is set to a plain level name.
fn env_level() -> Option<LogLevel> {
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|value| LogLevel::from_name(&value))
}

/// Install the bridge as the global logger.
///
/// `cli_level` wins over `RUST_LOG`; with neither, logging starts at `info`
/// until [`apply_config_level`] runs. Calling this more than once is harmless.
pub fn init_log_bridge(cli_level: Option<LogLevel>) {
    let mirror_stderr = std::env::var_os("RUST_LOG").is_some();
    let pinned = cli_level.or_else(env_level);

    let logger = LOGGER.get_or_init(|| LogBridge::new(mirror_stderr));
    if log::set_logger(logger).is_err() {
        // Already installed (tests, repeated init)
        return;
    }

    let level = pinned.unwrap_or_default();
    LEVEL_PINNED.store(pinned.is_some(), Ordering::Relaxed);
    log::set_max_level(level.to_level_filter());
}

/// Apply the config file's log level unless the CLI or `RUST_LOG` pinned one.
pub fn apply_config_level(level: LogLevel) {
    if LEVEL_PINNED.load(Ordering::Relaxed) {
        return;
    }
    log::set_max_level(level.to_level_filter());
    log::debug!("Log level set from config: {:?}", level);
}
