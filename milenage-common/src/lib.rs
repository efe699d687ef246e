//! Common types and utilities for the Milenage crates
//!
//! This crate provides the shared error type, logging setup and subscriber
//! configuration used by `milenage-crypto` and its callers.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{OpType, SubscriberConfig};
pub use error::Error;
pub use logging::{init_logging, init_logging_with_filter, HexDump, LogLevel};
