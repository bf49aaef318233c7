//! Types library for the custody vault
//!
//! This library provides the core type definitions shared across the vault
//! system: identity values and the errors raised while parsing them.
//!
//! # Modules
//! - `ids`: Identity types (Address, NetworkId)
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::ids::*;
}
