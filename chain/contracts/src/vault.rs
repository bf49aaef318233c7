//! Vault — deposit custody and authorized single-use withdrawals
//!
//! The vault holds an aggregate balance plus a per-depositor record of
//! cumulative deposits, and releases funds only after its authority
//! registry verifies and consumes a signed withdrawal authorization.
//! State mutation is ordered ahead of the external transfer: the digest
//! is consumed and the aggregate debited before the settlement backend
//! runs, and both are rolled back together if the transfer fails.
//!
//! All state-changing operations check:
//! 1. Pause state
//! 2. Reentrancy guard
//! 3. Input validation and balance
//! 4. Authorization (withdraw only, via the registry)

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;
use types::ids::{Address, NetworkId};

use crate::authorization::{AuthorizationRequest, RecoverableSignature};
use crate::errors::{TransferError, VaultError};
use crate::events::{ContractEvent, Deposit, VaultInitialized, Withdrawal};
use crate::registry::AuthorityRegistry;
use crate::security::{AccessControl, PauseGuard, ReentrancyGuard};

/// External value-transfer capability.
///
/// The one point where control leaves the vault's trust boundary. Injected
/// at construction so the custody logic can run against any settlement
/// backend, including test doubles that fail on demand.
pub trait SettlementLedger: fmt::Debug {
    /// Move `amount` of value to `to`. A failure here aborts the enclosing
    /// withdrawal, which restores all state committed earlier in the call.
    fn transfer(&mut self, to: Address, amount: Decimal) -> Result<(), TransferError>;
}

/// Core vault contract holding deposited value.
///
/// Per-depositor entries record cumulative deposits only; withdrawals
/// draw against the aggregate `total_held` and leave individual entries
/// untouched.
#[derive(Debug)]
pub struct Vault {
    /// Identity of this vault instance, hashed into every authorization
    id: Address,
    /// Execution environment this vault is deployed to
    network: NetworkId,
    /// Cumulative deposits per depositor
    deposits: HashMap<Address, Decimal>,
    /// Aggregate value currently in custody
    total_held: Decimal,
    /// The one registry this vault trusts, bound at initialization
    registry: Option<AuthorityRegistry>,
    /// External transfer backend
    settlement: Box<dyn SettlementLedger>,
    /// Security: reentrancy guard
    reentrancy_guard: ReentrancyGuard,
    /// Security: pause guard
    pause_guard: PauseGuard,
    /// Security: role-based access control
    access_control: AccessControl,
    /// Emitted events log (append-only across committed operations)
    events: Vec<ContractEvent>,
}

impl Vault {
    /// Create an uninitialized vault.
    ///
    /// `operator` becomes the admin governing pause and role changes.
    pub fn new(
        vault_id: Address,
        network: NetworkId,
        operator: Address,
        settlement: Box<dyn SettlementLedger>,
    ) -> Self {
        Self {
            id: vault_id,
            network,
            deposits: HashMap::new(),
            total_held: Decimal::ZERO,
            registry: None,
            settlement,
            reentrancy_guard: ReentrancyGuard::new(),
            pause_guard: PauseGuard::new(),
            access_control: AccessControl::new(operator),
            events: Vec::new(),
        }
    }

    // ───────────────────────── Initialization ─────────────────────────

    /// Bind the authority registry this vault trusts, by move. One-shot;
    /// never reassigned.
    ///
    /// A registry without a signing authority can authorize nothing, so
    /// binding one is refused outright.
    pub fn initialize(&mut self, registry: AuthorityRegistry) -> Result<ContractEvent, VaultError> {
        if self.registry.is_some() {
            return Err(VaultError::AlreadyInitialized);
        }
        if !registry.is_initialized() {
            return Err(VaultError::InvalidRegistry);
        }

        let event = ContractEvent::VaultInitialized(VaultInitialized {
            registry: registry.id(),
        });
        self.events.push(event.clone());
        self.registry = Some(registry);
        Ok(event)
    }

    // ───────────────────────── Deposit ─────────────────────────

    /// Deposit value into the vault for a depositor.
    ///
    /// Unrestricted: no authorization required, and permitted before the
    /// registry is bound. Credits both the depositor's cumulative entry
    /// and the aggregate, or neither if either addition would overflow.
    pub fn deposit(
        &mut self,
        depositor: Address,
        amount: Decimal,
    ) -> Result<ContractEvent, VaultError> {
        self.check_not_paused()?;
        self.check_reentrancy()?;

        if amount <= Decimal::ZERO {
            self.reentrancy_guard.release();
            return Err(VaultError::ZeroAmount);
        }

        // Compute both new balances before committing either
        let entry = self
            .deposits
            .get(&depositor)
            .copied()
            .unwrap_or(Decimal::ZERO);
        let new_entry = match entry.checked_add(amount) {
            Some(value) => value,
            None => {
                self.reentrancy_guard.release();
                return Err(VaultError::Overflow);
            }
        };
        let new_total = match self.total_held.checked_add(amount) {
            Some(value) => value,
            None => {
                self.reentrancy_guard.release();
                return Err(VaultError::Overflow);
            }
        };

        self.deposits.insert(depositor, new_entry);
        self.total_held = new_total;

        let event = ContractEvent::Deposit(Deposit { depositor, amount });
        self.events.push(event.clone());
        self.reentrancy_guard.release();
        Ok(event)
    }

    // ───────────────────────── Withdraw ─────────────────────────

    /// Release value against a signed, single-use authorization.
    ///
    /// The order is fixed: validate inputs and balance, have the registry
    /// verify and consume the digest, debit the aggregate, and only then
    /// run the external transfer. A transfer failure rolls the debit and
    /// the consumption back as one unit, so the identical request can be
    /// retried once the backend recovers. A balance shortfall is detected
    /// before the registry call, leaving the authorization unspent.
    pub fn withdraw(
        &mut self,
        recipient: Address,
        amount: Decimal,
        nonce: u64,
        signature: &RecoverableSignature,
    ) -> Result<ContractEvent, VaultError> {
        if self.registry.is_none() {
            return Err(VaultError::NotInitialized);
        }
        self.check_not_paused()?;
        self.check_reentrancy()?;

        if recipient.is_zero() {
            self.reentrancy_guard.release();
            return Err(VaultError::InvalidRecipient);
        }
        if amount <= Decimal::ZERO {
            self.reentrancy_guard.release();
            return Err(VaultError::ZeroAmount);
        }
        if amount > self.total_held {
            self.reentrancy_guard.release();
            return Err(VaultError::InsufficientBalance {
                requested: amount.to_string(),
                available: self.total_held.to_string(),
            });
        }

        let request = AuthorizationRequest {
            vault: self.id,
            recipient,
            amount,
            nonce,
            network: self.network,
        };
        let registry = match self.registry.as_mut() {
            Some(registry) => registry,
            None => {
                self.reentrancy_guard.release();
                return Err(VaultError::NotInitialized);
            }
        };
        let digest = match registry.verify_and_consume(&request, signature) {
            Ok(digest) => digest,
            Err(err) => {
                self.reentrancy_guard.release();
                return Err(VaultError::Registry(err));
            }
        };

        // Debit the aggregate before any external effect
        let previous_total = self.total_held;
        let new_total = match previous_total.checked_sub(amount) {
            Some(value) => value,
            None => {
                if let Some(registry) = self.registry.as_mut() {
                    registry.revoke(&digest);
                }
                self.reentrancy_guard.release();
                return Err(VaultError::Overflow);
            }
        };
        self.total_held = new_total;

        if let Err(err) = self.settlement.transfer(recipient, amount) {
            // Compensate: restore the aggregate and un-spend the digest
            self.total_held = previous_total;
            if let Some(registry) = self.registry.as_mut() {
                registry.revoke(&digest);
            }
            self.reentrancy_guard.release();
            return Err(VaultError::TransferFailed(err));
        }

        let event = ContractEvent::Withdrawal(Withdrawal {
            recipient,
            amount,
            nonce,
        });
        self.events.push(event.clone());
        self.reentrancy_guard.release();
        Ok(event)
    }

    // ───────────────────────── Pause ─────────────────────────

    /// Pause deposits and withdrawals. Admin-only; reads stay available.
    pub fn pause(&mut self, caller: Address) -> Result<(), VaultError> {
        if !self.access_control.is_admin(caller) {
            return Err(VaultError::Unauthorized);
        }
        self.pause_guard.pause();
        Ok(())
    }

    /// Resume deposits and withdrawals. Admin-only.
    pub fn unpause(&mut self, caller: Address) -> Result<(), VaultError> {
        if !self.access_control.is_admin(caller) {
            return Err(VaultError::Unauthorized);
        }
        self.pause_guard.unpause();
        Ok(())
    }

    /// Check if the vault is paused.
    pub fn is_paused(&self) -> bool {
        self.pause_guard.is_paused()
    }

    // ───────────────────────── Access Control ─────────────────────────

    /// Transfer admin to a new address.
    pub fn set_admin(&mut self, current_admin: Address, new_admin: Address) -> Result<(), VaultError> {
        if !self.access_control.transfer_admin(current_admin, new_admin) {
            return Err(VaultError::Unauthorized);
        }
        Ok(())
    }

    /// Get the current admin.
    pub fn admin(&self) -> Address {
        self.access_control.admin()
    }

    // ───────────────────────── Queries ─────────────────────────

    /// Identity of this vault instance.
    pub fn id(&self) -> Address {
        self.id
    }

    /// Execution environment this vault is deployed to.
    pub fn network(&self) -> NetworkId {
        self.network
    }

    /// Aggregate value currently in custody.
    pub fn total_held(&self) -> Decimal {
        self.total_held
    }

    /// Cumulative deposits recorded for a depositor; zero when unknown.
    ///
    /// Informational only; withdrawals never reduce these entries.
    pub fn deposits_of(&self, depositor: Address) -> Decimal {
        self.deposits
            .get(&depositor)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// The bound authority registry, for consumed-digest queries.
    pub fn registry(&self) -> Option<&AuthorityRegistry> {
        self.registry.as_ref()
    }

    /// Whether a registry has been bound.
    pub fn is_initialized(&self) -> bool {
        self.registry.is_some()
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internal Guards ─────────────────────────

    fn check_not_paused(&self) -> Result<(), VaultError> {
        if self.pause_guard.is_paused() {
            return Err(VaultError::Paused);
        }
        Ok(())
    }

    fn check_reentrancy(&mut self) -> Result<(), VaultError> {
        if !self.reentrancy_guard.acquire() {
            return Err(VaultError::Reentrancy);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authorization::signer_address;
    use crate::errors::RegistryError;
    use k256::ecdsa::SigningKey;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Settlement double sharing its transfer log with the test.
    #[derive(Debug, Clone, Default)]
    struct SharedLedger {
        transfers: Rc<RefCell<Vec<(Address, Decimal)>>>,
    }

    impl SettlementLedger for SharedLedger {
        fn transfer(&mut self, to: Address, amount: Decimal) -> Result<(), TransferError> {
            self.transfers.borrow_mut().push((to, amount));
            Ok(())
        }
    }

    /// Settlement double that refuses every transfer.
    #[derive(Debug)]
    struct RejectingLedger;

    impl SettlementLedger for RejectingLedger {
        fn transfer(&mut self, _to: Address, _amount: Decimal) -> Result<(), TransferError> {
            Err(TransferError::Rejected {
                reason: "settlement backend offline".to_string(),
            })
        }
    }

    fn authority_key() -> SigningKey {
        // Deterministic seed for repeatable signatures
        let seed: [u8; 32] = [
            0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E,
            0x0F, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1A, 0x1B, 0x1C,
            0x1D, 0x1E, 0x1F, 0x20,
        ];
        SigningKey::from_bytes(&seed.into()).expect("valid test seed")
    }

    fn intruder_key() -> SigningKey {
        SigningKey::from_bytes(&[0x42u8; 32].into()).expect("valid test seed")
    }

    const NETWORK: NetworkId = NetworkId::new(1);

    fn vault_id() -> Address {
        Address::new([0x11; 20])
    }

    fn recipient() -> Address {
        Address::new([0x22; 20])
    }

    fn depositor() -> Address {
        Address::new([0x33; 20])
    }

    fn operator() -> Address {
        Address::new([0x44; 20])
    }

    fn initialized_registry() -> AuthorityRegistry {
        let mut registry = AuthorityRegistry::new(Address::new([0x55; 20]));
        registry
            .initialize(signer_address(authority_key().verifying_key()))
            .unwrap();
        registry
    }

    fn vault_with(settlement: Box<dyn SettlementLedger>) -> Vault {
        let mut vault = Vault::new(vault_id(), NETWORK, operator(), settlement);
        vault.initialize(initialized_registry()).unwrap();
        vault
    }

    fn setup_vault() -> Vault {
        vault_with(Box::new(SharedLedger::default()))
    }

    fn authorized_signature(
        vault: &Vault,
        recipient: Address,
        amount: Decimal,
        nonce: u64,
    ) -> RecoverableSignature {
        AuthorizationRequest {
            vault: vault.id(),
            recipient,
            amount,
            nonce,
            network: vault.network(),
        }
        .sign(&authority_key())
        .unwrap()
    }

    // ─── Initialization tests ───

    #[test]
    fn test_initialize_binds_registry() {
        let mut vault = Vault::new(
            vault_id(),
            NETWORK,
            operator(),
            Box::new(SharedLedger::default()),
        );
        assert!(!vault.is_initialized());

        let event = vault.initialize(initialized_registry()).unwrap();
        assert!(matches!(event, ContractEvent::VaultInitialized(_)));
        assert!(vault.is_initialized());
        assert_eq!(vault.registry().unwrap().id(), Address::new([0x55; 20]));
    }

    #[test]
    fn test_initialize_twice_fails() {
        let mut vault = setup_vault();
        let result = vault.initialize(initialized_registry());
        assert_eq!(result, Err(VaultError::AlreadyInitialized));
    }

    #[test]
    fn test_initialize_rejects_unconfigured_registry() {
        let mut vault = Vault::new(
            vault_id(),
            NETWORK,
            operator(),
            Box::new(SharedLedger::default()),
        );
        let unconfigured = AuthorityRegistry::new(Address::new([0x55; 20]));
        let result = vault.initialize(unconfigured);
        assert_eq!(result, Err(VaultError::InvalidRegistry));
        assert!(!vault.is_initialized());
    }

    // ─── Deposit tests ───

    #[test]
    fn test_deposit_credits_entry_and_total() {
        let mut vault = setup_vault();
        let event = vault.deposit(depositor(), Decimal::from(100)).unwrap();
        assert!(matches!(event, ContractEvent::Deposit(_)));
        assert_eq!(vault.deposits_of(depositor()), Decimal::from(100));
        assert_eq!(vault.total_held(), Decimal::from(100));
    }

    #[test]
    fn test_deposit_accumulates() {
        let mut vault = setup_vault();
        vault.deposit(depositor(), Decimal::from(60)).unwrap();
        vault.deposit(depositor(), Decimal::from(40)).unwrap();
        assert_eq!(vault.deposits_of(depositor()), Decimal::from(100));
        assert_eq!(vault.total_held(), Decimal::from(100));
    }

    #[test]
    fn test_deposit_tracks_depositors_separately() {
        let mut vault = setup_vault();
        let other = Address::new([0x66; 20]);
        vault.deposit(depositor(), Decimal::from(10)).unwrap();
        vault.deposit(other, Decimal::from(5)).unwrap();
        assert_eq!(vault.deposits_of(depositor()), Decimal::from(10));
        assert_eq!(vault.deposits_of(other), Decimal::from(5));
        assert_eq!(vault.total_held(), Decimal::from(15));
    }

    #[test]
    fn test_deposit_zero_amount_rejected() {
        let mut vault = setup_vault();
        let result = vault.deposit(depositor(), Decimal::ZERO);
        assert_eq!(result, Err(VaultError::ZeroAmount));
    }

    #[test]
    fn test_deposit_negative_amount_rejected() {
        let mut vault = setup_vault();
        let result = vault.deposit(depositor(), Decimal::from(-1));
        assert_eq!(result, Err(VaultError::ZeroAmount));
    }

    #[test]
    fn test_deposit_allowed_before_initialization() {
        let mut vault = Vault::new(
            vault_id(),
            NETWORK,
            operator(),
            Box::new(SharedLedger::default()),
        );
        vault.deposit(depositor(), Decimal::from(100)).unwrap();
        assert_eq!(vault.total_held(), Decimal::from(100));
    }

    #[test]
    fn test_deposit_overflow_leaves_balances_unchanged() {
        let mut vault = setup_vault();
        vault.deposit(depositor(), Decimal::MAX).unwrap();

        let result = vault.deposit(depositor(), Decimal::ONE);
        assert_eq!(result, Err(VaultError::Overflow));
        assert_eq!(vault.deposits_of(depositor()), Decimal::MAX);
        assert_eq!(vault.total_held(), Decimal::MAX);

        // Guard released on the failure path: another depositor would hit
        // the aggregate overflow, and the error stays Overflow, not Reentrancy
        let other = Address::new([0x66; 20]);
        let result = vault.deposit(other, Decimal::ONE);
        assert_eq!(result, Err(VaultError::Overflow));
        assert_eq!(vault.deposits_of(other), Decimal::ZERO);
    }

    // ─── Withdraw tests ───

    #[test]
    fn test_withdraw_success() {
        let transfers = Rc::new(RefCell::new(Vec::new()));
        let ledger = SharedLedger {
            transfers: Rc::clone(&transfers),
        };
        let mut vault = vault_with(Box::new(ledger));
        vault.deposit(depositor(), Decimal::from(100)).unwrap();

        let amount = Decimal::from(10);
        let signature = authorized_signature(&vault, recipient(), amount, 1);
        let event = vault.withdraw(recipient(), amount, 1, &signature).unwrap();

        match event {
            ContractEvent::Withdrawal(withdrawal) => {
                assert_eq!(withdrawal.recipient, recipient());
                assert_eq!(withdrawal.amount, amount);
                assert_eq!(withdrawal.nonce, 1);
            }
            other => panic!("expected withdrawal event, got {other:?}"),
        }
        assert_eq!(vault.total_held(), Decimal::from(90));
        assert_eq!(*transfers.borrow(), vec![(recipient(), amount)]);

        // The digest is spent
        let request = AuthorizationRequest {
            vault: vault.id(),
            recipient: recipient(),
            amount,
            nonce: 1,
            network: vault.network(),
        };
        assert!(vault.registry().unwrap().is_consumed(&request.digest()));
    }

    #[test]
    fn test_withdraw_requires_initialization() {
        let mut vault = Vault::new(
            vault_id(),
            NETWORK,
            operator(),
            Box::new(SharedLedger::default()),
        );
        vault.deposit(depositor(), Decimal::from(100)).unwrap();

        let signature = authorized_signature(&vault, recipient(), Decimal::from(10), 1);
        let result = vault.withdraw(recipient(), Decimal::from(10), 1, &signature);
        assert_eq!(result, Err(VaultError::NotInitialized));
    }

    #[test]
    fn test_withdraw_not_initialized_reported_before_pause() {
        let mut vault = Vault::new(
            vault_id(),
            NETWORK,
            operator(),
            Box::new(SharedLedger::default()),
        );
        vault.pause(operator()).unwrap();

        let signature = authorized_signature(&vault, recipient(), Decimal::from(10), 1);
        let result = vault.withdraw(recipient(), Decimal::from(10), 1, &signature);
        assert_eq!(result, Err(VaultError::NotInitialized));
    }

    #[test]
    fn test_withdraw_zero_recipient_rejected() {
        let mut vault = setup_vault();
        vault.deposit(depositor(), Decimal::from(100)).unwrap();

        let signature = authorized_signature(&vault, Address::ZERO, Decimal::from(10), 1);
        let result = vault.withdraw(Address::ZERO, Decimal::from(10), 1, &signature);
        assert_eq!(result, Err(VaultError::InvalidRecipient));
    }

    #[test]
    fn test_withdraw_zero_amount_rejected() {
        let mut vault = setup_vault();
        vault.deposit(depositor(), Decimal::from(100)).unwrap();

        let signature = authorized_signature(&vault, recipient(), Decimal::from(10), 1);
        let result = vault.withdraw(recipient(), Decimal::ZERO, 1, &signature);
        assert_eq!(result, Err(VaultError::ZeroAmount));
    }

    #[test]
    fn test_withdraw_insufficient_balance_leaves_authorization_unspent() {
        let mut vault = setup_vault();
        vault.deposit(depositor(), Decimal::from(100)).unwrap();

        let amount = Decimal::from(200);
        let signature = authorized_signature(&vault, recipient(), amount, 3);
        let result = vault.withdraw(recipient(), amount, 3, &signature);
        assert_eq!(
            result,
            Err(VaultError::InsufficientBalance {
                requested: "200".to_string(),
                available: "100".to_string(),
            })
        );

        // The balance check ran before the registry call, so the digest
        // was never consumed
        let request = AuthorizationRequest {
            vault: vault.id(),
            recipient: recipient(),
            amount,
            nonce: 3,
            network: vault.network(),
        };
        assert!(!vault.registry().unwrap().is_consumed(&request.digest()));
        assert_eq!(vault.total_held(), Decimal::from(100));
    }

    #[test]
    fn test_withdraw_wrong_signer_rejected() {
        let mut vault = setup_vault();
        vault.deposit(depositor(), Decimal::from(100)).unwrap();

        let forged = AuthorizationRequest {
            vault: vault.id(),
            recipient: recipient(),
            amount: Decimal::from(10),
            nonce: 2,
            network: vault.network(),
        }
        .sign(&intruder_key())
        .unwrap();

        let result = vault.withdraw(recipient(), Decimal::from(10), 2, &forged);
        assert_eq!(
            result,
            Err(VaultError::Registry(RegistryError::InvalidSignature))
        );
        assert_eq!(vault.total_held(), Decimal::from(100));
    }

    #[test]
    fn test_withdraw_replay_rejected() {
        let mut vault = setup_vault();
        vault.deposit(depositor(), Decimal::from(100)).unwrap();

        let amount = Decimal::from(10);
        let signature = authorized_signature(&vault, recipient(), amount, 1);
        vault.withdraw(recipient(), amount, 1, &signature).unwrap();

        let result = vault.withdraw(recipient(), amount, 1, &signature);
        assert!(matches!(
            result,
            Err(VaultError::Registry(RegistryError::AlreadyConsumed { .. }))
        ));
        // Only the first attempt debited the aggregate
        assert_eq!(vault.total_held(), Decimal::from(90));
    }

    #[test]
    fn test_withdraw_transfer_failure_rolls_back() {
        let mut vault = vault_with(Box::new(RejectingLedger));
        vault.deposit(depositor(), Decimal::from(100)).unwrap();
        let events_before = vault.events().len();

        let amount = Decimal::from(10);
        let signature = authorized_signature(&vault, recipient(), amount, 1);
        let result = vault.withdraw(recipient(), amount, 1, &signature);
        assert!(matches!(result, Err(VaultError::TransferFailed(_))));

        // Aggregate restored, digest unspent, no withdrawal event
        assert_eq!(vault.total_held(), Decimal::from(100));
        let request = AuthorizationRequest {
            vault: vault.id(),
            recipient: recipient(),
            amount,
            nonce: 1,
            network: vault.network(),
        };
        assert!(!vault.registry().unwrap().is_consumed(&request.digest()));
        assert_eq!(vault.events().len(), events_before);

        // Guard released: a subsequent deposit succeeds
        vault.deposit(depositor(), Decimal::from(1)).unwrap();
        assert_eq!(vault.total_held(), Decimal::from(101));
    }

    #[test]
    fn test_withdraw_never_reduces_depositor_entries() {
        let mut vault = setup_vault();
        vault.deposit(depositor(), Decimal::from(100)).unwrap();

        let signature = authorized_signature(&vault, recipient(), Decimal::from(40), 1);
        vault
            .withdraw(recipient(), Decimal::from(40), 1, &signature)
            .unwrap();

        // Cumulative deposit record untouched; only the aggregate moved
        assert_eq!(vault.deposits_of(depositor()), Decimal::from(100));
        assert_eq!(vault.total_held(), Decimal::from(60));
    }

    // ─── Pause tests ───

    #[test]
    fn test_pause_blocks_deposit_and_withdraw() {
        let mut vault = setup_vault();
        vault.deposit(depositor(), Decimal::from(100)).unwrap();
        let signature = authorized_signature(&vault, recipient(), Decimal::from(10), 1);

        vault.pause(operator()).unwrap();
        assert!(vault.is_paused());

        assert_eq!(
            vault.deposit(depositor(), Decimal::from(1)),
            Err(VaultError::Paused)
        );
        assert_eq!(
            vault.withdraw(recipient(), Decimal::from(10), 1, &signature),
            Err(VaultError::Paused)
        );

        // Reads stay available while paused
        assert_eq!(vault.total_held(), Decimal::from(100));
    }

    #[test]
    fn test_unpause_restores_operations() {
        let mut vault = setup_vault();
        vault.pause(operator()).unwrap();
        vault.unpause(operator()).unwrap();
        assert!(!vault.is_paused());
        vault.deposit(depositor(), Decimal::from(1)).unwrap();
    }

    #[test]
    fn test_pause_requires_admin() {
        let mut vault = setup_vault();
        assert_eq!(
            vault.pause(Address::new([0xEE; 20])),
            Err(VaultError::Unauthorized)
        );
        assert_eq!(
            vault.unpause(Address::new([0xEE; 20])),
            Err(VaultError::Unauthorized)
        );
    }

    // ─── Access control tests ───

    #[test]
    fn test_set_admin() {
        let mut vault = setup_vault();
        let new_admin = Address::new([0x77; 20]);
        vault.set_admin(operator(), new_admin).unwrap();
        assert_eq!(vault.admin(), new_admin);

        // The old admin lost its rights
        assert_eq!(vault.pause(operator()), Err(VaultError::Unauthorized));
        vault.pause(new_admin).unwrap();
    }

    #[test]
    fn test_set_admin_unauthorized() {
        let mut vault = setup_vault();
        let result = vault.set_admin(Address::new([0xEE; 20]), Address::new([0xEE; 20]));
        assert_eq!(result, Err(VaultError::Unauthorized));
        assert_eq!(vault.admin(), operator());
    }

    // ─── Events tests ───

    #[test]
    fn test_events_record_committed_operations() {
        let mut vault = setup_vault();
        vault.deposit(depositor(), Decimal::from(100)).unwrap();
        let signature = authorized_signature(&vault, recipient(), Decimal::from(10), 1);
        vault
            .withdraw(recipient(), Decimal::from(10), 1, &signature)
            .unwrap();

        // VaultInitialized, Deposit, Withdrawal
        assert_eq!(vault.events().len(), 3);
        assert!(matches!(vault.events()[0], ContractEvent::VaultInitialized(_)));
        assert!(matches!(vault.events()[1], ContractEvent::Deposit(_)));
        assert!(matches!(vault.events()[2], ContractEvent::Withdrawal(_)));
    }

    #[test]
    fn test_drain_events() {
        let mut vault = setup_vault();
        vault.deposit(depositor(), Decimal::from(1)).unwrap();

        let events = vault.drain_events();
        assert_eq!(events.len(), 2);
        assert!(vault.events().is_empty());
    }
}
