//! Contract events emitted by registry and vault operations
//!
//! Events are immutable records appended to each component's log when an
//! operation commits. A failed operation commits nothing, so the log only
//! ever reflects state changes that actually took hold.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::Address;

use crate::authorization::AuthorizationDigest;

/// Funds credited to the vault's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub depositor: Address,
    pub amount: Decimal,
}

/// Funds released to a recipient against a consumed authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub recipient: Address,
    pub amount: Decimal,
    pub nonce: u64,
}

/// An authorization digest was verified and marked consumed.
///
/// Emitted by the registry before the enclosing withdrawal performs any
/// external transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationConsumed {
    pub digest: AuthorizationDigest,
    pub vault: Address,
    pub recipient: Address,
    pub amount: Decimal,
}

/// The registry's signing authority was registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerSet {
    pub authority: Address,
}

/// The vault bound its authority registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultInitialized {
    pub registry: Address,
}

/// Enum wrapper for all contract events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    Deposit(Deposit),
    Withdrawal(Withdrawal),
    AuthorizationConsumed(AuthorizationConsumed),
    SignerSet(SignerSet),
    VaultInitialized(VaultInitialized),
}
