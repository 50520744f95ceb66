//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logging backend (env_logger natively, browser console on web)
//! - Panic reporting on web
//! - The JavaScript-facing session binding

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Install the logging backend for this platform
///
/// Safe to call more than once; later calls are ignored.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Install the logging backend for this platform
///
/// Safe to call more than once; later calls are ignored.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
