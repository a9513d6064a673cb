//! Console logging
//!
//! On wasm32 messages go to the browser console; native builds (tests,
//! tooling) drop them.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
}

#[cfg(target_arch = "wasm32")]
pub fn write(level: Level, message: &str) {
    let value = wasm_bindgen::JsValue::from_str(message);
    match level {
        Level::Info => web_sys::console::log_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn write(_level: Level, _message: &str) {}

/// Log an informational message: `log_info!("spawned {} bodies", n)`
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::core::utils::log::write($crate::core::utils::log::Level::Info, &format!($($arg)*))
    };
}

/// Log a warning: `log_warn!("image failed to load")`
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::core::utils::log::write($crate::core::utils::log::Level::Warn, &format!($($arg)*))
    };
}
