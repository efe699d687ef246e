//! Integration test framework for the Milenage crates
#![allow(missing_docs)]
//!
//! # Components
//!
//! - [`test_fixtures`] - TS 35.207 conformance vectors and subscriber helpers
//! - [`test_utils`] - Logging setup and small assertion helpers
//!
//! # Test Categories
//!
//! 1. **Conformance** - Published test sets and custom constants
//! 2. **Concurrency** - Parallel dispatch and shared subscriber contexts
//! 3. **AKA** - AUTN/AUTS exchange between network and subscriber
//! 4. **Configuration** - YAML subscriber configuration

pub mod test_utils;

pub use test_fixtures::{
    custom_constants_context, TestSubscriber, TestVector, CUSTOM_CONSTANTS_VECTOR, TEST_SETS,
};
pub use test_utils::{assert_hex_eq, decode_hex, init_test_logging, TestResult};
