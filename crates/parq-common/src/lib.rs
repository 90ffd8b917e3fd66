//! Common types and utilities shared across parq crates.

pub mod error;

pub use error::{Error, Result};

/// Re-export commonly used external types
pub use bytes::Bytes;
