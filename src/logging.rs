//! Tracing setup for the bizdash binary
//!
//! The library only emits events; installing a subscriber is the shell's job.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Install the global `fmt` subscriber once
///
/// `RUST_LOG` wins when set. Otherwise `verbosity` picks the crate level:
/// 0 = warn, 1 = info, 2+ = debug.
pub fn init(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        let level = match verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("bizdash={}", level)));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_idempotent() {
        super::init(2);
        super::init(0);
    }
}
