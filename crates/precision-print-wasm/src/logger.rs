//! Browser console logger for the `log` facade.

use std::sync::atomic::{AtomicBool, Ordering};

use wasm_bindgen::JsValue;

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = JsValue::from_str(&format_record(record));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&message),
            log::Level::Warn => web_sys::console::warn_1(&message),
            log::Level::Info => web_sys::console::info_1(&message),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;
static INSTALLED: AtomicBool = AtomicBool::new(false);

fn format_record(record: &log::Record) -> String {
    format!(
        "[{}:{}] {}",
        record.target(),
        record.line().unwrap_or(0),
        record.args()
    )
}

/// Install the console logger once. Later calls only adjust the level.
pub(crate) fn install(level: log::LevelFilter) {
    if !INSTALLED.swap(true, Ordering::SeqCst) && log::set_logger(&LOGGER).is_err() {
        // Another logger was installed by the host crate; keep it.
        return;
    }
    log::set_max_level(level);
}

/// Parse a level name from JavaScript. Unknown names fall back to `Warn`.
pub(crate) fn parse_level(name: &str) -> log::LevelFilter {
    match name.trim().to_ascii_lowercase().as_str() {
        "off" => log::LevelFilter::Off,
        "error" => log::LevelFilter::Error,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Warn,
    }
}
