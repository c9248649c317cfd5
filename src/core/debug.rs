//! Lightweight debug logging gated by MYRIAD_DEBUG=1 (or `--debug-sim`).
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

static FROM_ENV: OnceLock<bool> = OnceLock::new();
static FORCED: AtomicBool = AtomicBool::new(false);

pub fn is_enabled() -> bool {
    FORCED.load(Ordering::Relaxed)
        || *FROM_ENV.get_or_init(|| std::env::var("MYRIAD_DEBUG").ok().as_deref() == Some("1"))
}

/// Turn logging on for the rest of the process regardless of the environment.
pub fn force_enable() {
    FORCED.store(true, Ordering::Relaxed);
}

#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        if $crate::core::debug::is_enabled() {
            eprintln!("{} {}", colored::Colorize::dimmed("[myriad]"), format!($($arg)*));
        }
    }};
}
