//! Error types for the base type layer
//!
//! Error taxonomy using thiserror

use thiserror::Error;

/// Address parsing errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AddressParseError {
    #[error("Invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),

    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),
}
