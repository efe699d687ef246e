//! Test utility functions for integration tests
//!
//! Provides common utilities for test setup, logging, and assertions.

use tracing_subscriber::{fmt, EnvFilter};

/// Result type for integration tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Initialize logging for tests with optional filter
///
/// Uses RUST_LOG environment variable if set, otherwise defaults to "info"
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Decode a hex string, panicking on malformed fixtures
pub fn decode_hex(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap_or_else(|e| panic!("bad hex fixture {s:?}: {e}"))
}

/// Assert that `actual` equals the hex-encoded `expected` (case-insensitive)
#[track_caller]
pub fn assert_hex_eq(actual: &[u8], expected: &str, what: &str) {
    assert_eq!(
        hex::encode(actual),
        expected.to_lowercase(),
        "{what} mismatch"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex("00ff"), vec![0x00, 0xff]);
    }

    #[test]
    #[should_panic(expected = "bad hex fixture")]
    fn test_decode_hex_panics_on_garbage() {
        decode_hex("zz");
    }

    #[test]
    fn test_assert_hex_eq_ignores_case() {
        assert_hex_eq(&[0xab, 0xcd], "ABCD", "value");
    }

    #[test]
    fn test_init_logging_twice() {
        init_test_logging();
        init_test_logging();
    }
}
