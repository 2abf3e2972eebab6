//! Logging setup.
//!
//! The engine logs through the `log` facade. In the browser [`init`] routes
//! records to the developer console; native hosts install their own backend
//! and may still call [`init`] to set the level.

use log::{LevelFilter, Record};

/// `"[WARN target] message"`.
pub fn format_record(record: &Record<'_>) -> String {
    format!("[{} {}] {}", record.level(), record.target(), record.args())
}

#[cfg(target_arch = "wasm32")]
struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record);
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line.into()),
            log::Level::Warn => web_sys::console::warn_1(&line.into()),
            _ => web_sys::console::log_1(&line.into()),
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
static LOGGER: ConsoleLogger = ConsoleLogger;

/// Install the panic hook and, in the browser, the console logger.
/// Safe to call more than once.
pub fn init(level: LevelFilter) {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    {
        if log::set_logger(&LOGGER).is_err() {
            return;
        }
    }
    log::set_max_level(level);
}
