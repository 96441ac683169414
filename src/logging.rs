//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Install a global `fmt` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_directive` is used. Returns
/// `false` if a global subscriber was already installed.
pub fn init_logging(default_directive: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_noop() {
        init_logging("debug");
        assert!(!init_logging("debug"));
    }
}
