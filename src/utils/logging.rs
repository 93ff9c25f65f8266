//! Per-module switchable logging.
//!
//! Pipeline modules that log on every run (collector, emotion analyzer)
//! declare `const ENABLE_LOGS: bool` and log through these macros, so a noisy
//! stage can be silenced without touching `RUST_LOG`:
//!
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//!
//! use crate::{log_debug, log_info};
//!
//! log_info!("Collected {} raw records", count);
//! ```
//!
//! Warnings for recovered failures use `log::warn!` directly and are never
//! silenced by the flag.

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}
