//! Authority registry — signing authority custody and single-use consumption
//!
//! The registry owns the registered signing authority and the set of
//! authorization digests that have already been spent. Its one
//! state-changing operation, `verify_and_consume`, recomputes the digest
//! for a withdrawal request, recovers the signer from the supplied
//! signature, and marks the digest consumed before reporting success, so
//! the same authorization can never release funds twice.

use std::collections::HashSet;
use types::ids::Address;

use crate::authorization::{AuthorizationDigest, AuthorizationRequest, RecoverableSignature};
use crate::errors::RegistryError;
use crate::events::{AuthorizationConsumed, ContractEvent, SignerSet};

/// Registry of one signing authority and its consumed authorizations.
#[derive(Debug)]
pub struct AuthorityRegistry {
    /// Identity of this registry instance
    id: Address,
    /// Registered signing authority, set exactly once
    authority: Option<Address>,
    /// Digests that have been verified and spent
    consumed: HashSet<AuthorizationDigest>,
    /// Emitted events log (append-only across committed operations)
    events: Vec<ContractEvent>,
}

impl AuthorityRegistry {
    /// Create an uninitialized registry with its own identity.
    pub fn new(registry_id: Address) -> Self {
        Self {
            id: registry_id,
            authority: None,
            consumed: HashSet::new(),
            events: Vec::new(),
        }
    }

    /// Register the signing authority. One-shot: a second call fails
    /// regardless of its argument.
    ///
    /// Emits `SignerSet` on success.
    pub fn initialize(&mut self, signing_identity: Address) -> Result<ContractEvent, RegistryError> {
        if self.authority.is_some() {
            return Err(RegistryError::AlreadyInitialized);
        }
        if signing_identity.is_zero() {
            return Err(RegistryError::InvalidAuthority);
        }

        self.authority = Some(signing_identity);

        let event = ContractEvent::SignerSet(SignerSet {
            authority: signing_identity,
        });
        self.events.push(event.clone());
        Ok(event)
    }

    /// Verify a withdrawal authorization and mark it spent.
    ///
    /// Checks run in a fixed order: replay first, then signer recovery.
    /// Replaying an already-spent tuple therefore reports `AlreadyConsumed`
    /// even when the accompanying signature is garbage. On success the
    /// digest is inserted into the consumed set and the consumption event
    /// appended before the caller sees the result; on any failure no state
    /// changes at all.
    pub fn verify_and_consume(
        &mut self,
        request: &AuthorizationRequest,
        signature: &RecoverableSignature,
    ) -> Result<AuthorizationDigest, RegistryError> {
        let authority = self.authority.ok_or(RegistryError::NotInitialized)?;

        let digest = request.digest();
        if self.consumed.contains(&digest) {
            return Err(RegistryError::AlreadyConsumed {
                digest: digest.to_string(),
            });
        }

        let signer = signature
            .recover_address(&digest.signing_hash())
            .map_err(|_| RegistryError::InvalidSignature)?;
        if signer != authority {
            return Err(RegistryError::InvalidSignature);
        }

        self.consumed.insert(digest);
        self.events
            .push(ContractEvent::AuthorizationConsumed(AuthorizationConsumed {
                digest,
                vault: request.vault,
                recipient: request.recipient,
                amount: request.amount,
            }));
        Ok(digest)
    }

    /// Return a consumed digest to the unspent state.
    ///
    /// Compensation hook for the vault: when the enclosing withdrawal
    /// aborts on transfer failure, the consumption committed in the same
    /// operation is undone, event included. Unknown digests are ignored.
    pub(crate) fn revoke(&mut self, digest: &AuthorizationDigest) {
        if !self.consumed.remove(digest) {
            return;
        }
        let position = self.events.iter().rposition(|event| {
            matches!(event, ContractEvent::AuthorizationConsumed(consumed) if consumed.digest == *digest)
        });
        if let Some(index) = position {
            self.events.remove(index);
        }
    }

    /// Identity of this registry instance.
    pub fn id(&self) -> Address {
        self.id
    }

    /// Whether a signing authority has been registered.
    pub fn is_initialized(&self) -> bool {
        self.authority.is_some()
    }

    /// The registered signing authority, if any.
    pub fn authority(&self) -> Option<Address> {
        self.authority
    }

    /// Whether a digest has been verified and spent.
    pub fn is_consumed(&self, digest: &AuthorizationDigest) -> bool {
        self.consumed.contains(digest)
    }

    /// Number of consumed authorizations.
    pub fn consumed_count(&self) -> usize {
        self.consumed.len()
    }

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }
}
