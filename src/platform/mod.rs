//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key/touch to logical actions)
//! - Time (host clock in milliseconds)
//! - Storage (LocalStorage on web)
//! - Logging setup

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod storage;
pub mod time;

pub use input::{Action, InputState};
pub use time::Clock;

/// Install the platform logger (call once at startup)
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Install the platform logger (call once at startup)
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
