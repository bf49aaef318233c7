//! Withdrawal authorization binding and recoverable signatures
//!
//! An authorization binds one withdrawal (vault, recipient, amount, nonce,
//! network) into a SHA-256 digest over a fixed-width encoding. The authority
//! signs the domain-separated digest with a recoverable ECDSA (secp256k1)
//! signature; verification recovers the signer address from the signature
//! alone, with no key lookup.

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use types::ids::{Address, NetworkId};

use crate::errors::SignatureError;

/// Domain tag hashed in front of every digest before signing.
///
/// A signature over a bare digest from an unrelated message format can
/// never verify against the wrapped hash.
pub const SIGNING_DOMAIN: &[u8] = b"VAULT_WITHDRAWAL_V1";

/// Wire length of a recoverable signature: r (32) || s (32) || v (1).
pub const SIGNATURE_LEN: usize = 65;

/// Width of the canonical authorization preimage:
/// vault (20) || recipient (20) || amount (16) || nonce (8) || network (8).
pub const PREIMAGE_LEN: usize = 72;

/// SHA-256 digest binding one withdrawal authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorizationDigest([u8; 32]);

impl AuthorizationDigest {
    /// Wrap raw digest bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The hash an authority actually signs:
    /// `SHA-256(SIGNING_DOMAIN || digest)`.
    pub fn signing_hash(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(SIGNING_DOMAIN);
        hasher.update(self.0);
        hasher.finalize().into()
    }
}

impl fmt::Display for AuthorizationDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Parameters of one withdrawal authorization.
///
/// Transient: built for a single verification call, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub vault: Address,
    pub recipient: Address,
    pub amount: Decimal,
    pub nonce: u64,
    pub network: NetworkId,
}

impl AuthorizationRequest {
    /// Canonical fixed-width encoding of the request.
    ///
    /// Field boundaries are unambiguous by construction. The amount is
    /// normalized first so numerically equal values (10 vs 10.00) encode
    /// identically.
    pub fn encode(&self) -> [u8; PREIMAGE_LEN] {
        let mut buf = [0u8; PREIMAGE_LEN];
        buf[0..20].copy_from_slice(self.vault.as_bytes());
        buf[20..40].copy_from_slice(self.recipient.as_bytes());
        buf[40..56].copy_from_slice(&self.amount.normalize().serialize());
        buf[56..64].copy_from_slice(&self.nonce.to_be_bytes());
        buf[64..72].copy_from_slice(&self.network.as_u64().to_be_bytes());
        buf
    }

    /// Digest identifying this authorization.
    pub fn digest(&self) -> AuthorizationDigest {
        let mut hasher = Sha256::new();
        hasher.update(self.encode());
        AuthorizationDigest(hasher.finalize().into())
    }

    /// Sign this request with an authority key.
    ///
    /// Reference signing path for off-system authorities and tests.
    pub fn sign(&self, key: &SigningKey) -> Result<RecoverableSignature, SignatureError> {
        let (signature, recovery_id) = key
            .sign_prehash_recoverable(&self.digest().signing_hash())
            .map_err(|_| SignatureError::SigningFailed)?;
        Ok(RecoverableSignature {
            signature,
            recovery_id,
        })
    }
}

/// ECDSA/secp256k1 signature carrying its recovery discriminant.
///
/// Holds the `r` and `s` scalars plus the recovery id `v`, validated on
/// construction; no raw offset arithmetic at use sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoverableSignature {
    signature: Signature,
    recovery_id: RecoveryId,
}

impl RecoverableSignature {
    /// Build from named parts: big-endian scalars `r`, `s` and recovery id `v`.
    pub fn from_parts(r: [u8; 32], s: [u8; 32], v: u8) -> Result<Self, SignatureError> {
        let signature =
            Signature::from_scalars(r, s).map_err(|_| SignatureError::InvalidScalar)?;
        let recovery_id = RecoveryId::from_byte(v).ok_or(SignatureError::InvalidRecoveryId(v))?;
        Ok(Self {
            signature,
            recovery_id,
        })
    }

    /// Parse the 65-byte wire form `r || s || v`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(SignatureError::InvalidLength(bytes.len()));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[0..32]);
        s.copy_from_slice(&bytes[32..64]);
        Self::from_parts(r, s, bytes[64])
    }

    /// Serialize to the 65-byte wire form `r || s || v`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut buf = [0u8; SIGNATURE_LEN];
        buf[0..64].copy_from_slice(&self.signature.to_bytes());
        buf[64] = self.recovery_id.to_byte();
        buf
    }

    /// Scalar `r`, big-endian.
    pub fn r(&self) -> [u8; 32] {
        let (r, _) = self.signature.split_bytes();
        r.into()
    }

    /// Scalar `s`, big-endian.
    pub fn s(&self) -> [u8; 32] {
        let (_, s) = self.signature.split_bytes();
        s.into()
    }

    /// Recovery discriminant `v`.
    pub fn v(&self) -> u8 {
        self.recovery_id.to_byte()
    }

    /// Recover the signer's address from the hash this signature covers.
    pub fn recover_address(&self, prehash: &[u8; 32]) -> Result<Address, SignatureError> {
        let key = VerifyingKey::recover_from_prehash(prehash, &self.signature, self.recovery_id)
            .map_err(|_| SignatureError::RecoveryFailed)?;
        Ok(signer_address(&key))
    }
}

/// Address of a verifying key: last 20 bytes of the SHA-256 hash of the
/// uncompressed curve point (SEC1 tag byte stripped).
pub fn signer_address(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let mut hasher = Sha256::new();
    hasher.update(&point.as_bytes()[1..]);
    let hash: [u8; 32] = hasher.finalize().into();
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[12..]);
    Address::new(bytes)
}
