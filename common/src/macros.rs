//! Logging macros shared by every workspace member.
//!
//! Thin wrappers over [`tracing`] so call sites read by intent (`success!`
//! vs. `info!`) while the CLI decides how each level is rendered.

/// Logs a neutral status message at INFO level.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!($($arg)*)
    };
}

/// Logs a positive outcome at INFO level (rendered as `[+]` by the CLI).
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!($($arg)*)
    };
}

/// Logs a recoverable oddity at WARN level.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}

/// Logs a failure at ERROR level.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::tracing::error!($($arg)*)
    };
}

/// Logs developer detail at DEBUG level.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::tracing::debug!($($arg)*)
    };
}
