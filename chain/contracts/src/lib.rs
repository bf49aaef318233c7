//! Smart Contract Logic for Authorized Custody
//!
//! This crate implements the value-custody layer: a vault that holds
//! deposited funds and releases them only against single-use withdrawal
//! authorizations signed by a registered authority.
//!
//! # Modules
//! - `errors`: Contract-specific error types
//! - `events`: Contract events emitted by registry and vault operations
//! - `security`: Shared security primitives (reentrancy guard, access control, pause)
//! - `authorization`: Digest binding, recoverable signatures, signer recovery
//! - `registry`: Signing authority custody and single-use digest consumption
//! - `vault`: Deposit ledger, authorized withdrawals, settlement dispatch
//!
//! # Version
//! v0.1.0 — Initial implementation

pub mod errors;
pub mod events;
pub mod security;
pub mod authorization;
pub mod registry;
pub mod vault;

/// Contract ABI version — frozen after release
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";
