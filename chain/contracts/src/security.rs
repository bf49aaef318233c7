//! Shared security primitives for contract components
//!
//! Provides reusable guards and access control used by the vault's
//! state-changing operations.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use types::ids::Address;

/// Reentrancy guard preventing nested calls into protected functions.
///
/// A contract function acquires the guard before executing state-changing
/// logic and releases it on every exit path. Any nested call attempt fails.
#[derive(Debug, Clone)]
pub struct ReentrancyGuard {
    locked: bool,
}

impl ReentrancyGuard {
    /// Create a new unlocked guard.
    pub fn new() -> Self {
        Self { locked: false }
    }

    /// Acquire the guard. Returns `true` if successfully acquired.
    /// Returns `false` if already locked (reentrancy attempt).
    pub fn acquire(&mut self) -> bool {
        if self.locked {
            return false;
        }
        self.locked = true;
        true
    }

    /// Release the guard.
    pub fn release(&mut self) {
        self.locked = false;
    }

    /// Check if currently locked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

impl Default for ReentrancyGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Access control roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full control: pause, unpause, role management
    Admin,
    /// Operational tasks delegated by the admin
    Operator,
}

/// Role-based access control manager.
///
/// Maps caller addresses to their assigned roles. The Admin role is
/// required for sensitive operations like pause and admin transfer.
#[derive(Debug, Clone)]
pub struct AccessControl {
    roles: HashMap<Address, Role>,
    admin: Address,
}

impl AccessControl {
    /// Create access control with an initial admin.
    pub fn new(admin: Address) -> Self {
        let mut roles = HashMap::new();
        roles.insert(admin, Role::Admin);
        Self { roles, admin }
    }

    /// Check if a caller has the specified role.
    pub fn has_role(&self, caller: Address, role: Role) -> bool {
        self.roles.get(&caller).map_or(false, |r| *r == role)
    }

    /// Check if a caller is admin.
    pub fn is_admin(&self, caller: Address) -> bool {
        self.has_role(caller, Role::Admin)
    }

    /// Assign a role to a caller. Only admin can assign roles.
    pub fn grant_role(&mut self, admin_caller: Address, target: Address, role: Role) -> bool {
        if !self.is_admin(admin_caller) {
            return false;
        }
        self.roles.insert(target, role);
        true
    }

    /// Remove a role from a caller. Only admin can revoke.
    pub fn revoke_role(&mut self, admin_caller: Address, target: Address) -> bool {
        if !self.is_admin(admin_caller) {
            return false;
        }
        // Cannot revoke the primary admin
        if target == self.admin {
            return false;
        }
        self.roles.remove(&target);
        true
    }

    /// Transfer admin to a new address.
    pub fn transfer_admin(&mut self, current_admin: Address, new_admin: Address) -> bool {
        if !self.is_admin(current_admin) {
            return false;
        }
        self.roles.remove(&current_admin);
        self.roles.insert(new_admin, Role::Admin);
        self.admin = new_admin;
        true
    }

    /// Get the current admin address.
    pub fn admin(&self) -> Address {
        self.admin
    }
}

/// Composable pause modifier.
///
/// When paused, protected operations must be rejected.
#[derive(Debug, Clone)]
pub struct PauseGuard {
    paused: bool,
}

impl PauseGuard {
    /// Create a new unpaused guard.
    pub fn new() -> Self {
        Self { paused: false }
    }

    /// Pause operations.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Unpause operations.
    pub fn unpause(&mut self) {
        self.paused = false;
    }

    /// Check if currently paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl Default for PauseGuard {
    fn default() -> Self {
        Self::new()
    }
}
