//! Contract-specific error types
//!
//! Comprehensive error taxonomy for registry and vault operations.
//! Setup errors signal permanent misuse, authorization errors are terminal
//! for the request they reject, and transfer errors are the one kind where
//! an identical retry may later succeed.

use thiserror::Error;

/// Signature construction errors
///
/// Raised while building a `RecoverableSignature` from raw material, so a
/// structurally broken signature never reaches verification.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignatureError {
    #[error("Invalid signature length: expected 65 bytes, got {0}")]
    InvalidLength(usize),

    #[error("Invalid signature scalar: zero or out of field range")]
    InvalidScalar,

    #[error("Invalid recovery id: {0} (expected 0..=3)")]
    InvalidRecoveryId(u8),

    #[error("Signing operation failed")]
    SigningFailed,

    #[error("Signer recovery failed")]
    RecoveryFailed,
}

/// Registry-specific errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Registry already initialized")]
    AlreadyInitialized,

    #[error("Signing authority must be a non-zero address")]
    InvalidAuthority,

    #[error("Registry not initialized: no signing authority set")]
    NotInitialized,

    #[error("Authorization already consumed: digest {digest}")]
    AlreadyConsumed { digest: String },

    #[error("Invalid signature: recovered signer is not the authority")]
    InvalidSignature,
}

/// Transfer failures reported by the settlement ledger
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransferError {
    #[error("Transfer rejected: {reason}")]
    Rejected { reason: String },
}

/// Vault-specific errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VaultError {
    #[error("Vault already initialized")]
    AlreadyInitialized,

    #[error("Registry has no signing authority: refusing to bind")]
    InvalidRegistry,

    #[error("Vault not initialized: no registry bound")]
    NotInitialized,

    #[error("Vault is paused")]
    Paused,

    #[error("Reentrancy detected")]
    Reentrancy,

    #[error("Unauthorized: caller is not admin")]
    Unauthorized,

    #[error("Recipient must be a non-zero address")]
    InvalidRecipient,

    #[error("Amount must be positive")]
    ZeroAmount,

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: String, available: String },

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,

    #[error("Authorization rejected: {0}")]
    Registry(#[from] RegistryError),

    #[error("External transfer failed: {0}")]
    TransferFailed(#[from] TransferError),
}
