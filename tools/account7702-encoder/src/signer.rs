//! secp256k1 signing over 32-byte digests.
//!
//! Nonces are derived per RFC 6979 and `s` is normalized to the lower half of the curve order,
//! so one key and one digest always give the same signature.

use alloy_primitives::{Address, U256};
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, SigningKey, VerifyingKey};

use account7702_types::{RecoveryConvention, Signature};

use crate::error::SigningError;
use crate::typed_data::keccak256;

pub const DIGEST_LEN: usize = 32;

/// Parse a hex private key, with or without `0x`.
pub fn parse_private_key(hex_key: &str) -> Result<SigningKey, SigningError> {
    let trimmed = hex_key.trim();
    let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if trimmed.is_empty() {
        return Err(SigningError::MissingKey);
    }
    let bytes = hex::decode(trimmed).map_err(|e| SigningError::InvalidKey(e.to_string()))?;
    signing_key_from_bytes(&bytes)
}

pub fn signing_key_from_bytes(bytes: &[u8]) -> Result<SigningKey, SigningError> {
    if bytes.len() != 32 {
        return Err(SigningError::InvalidKey(format!(
            "expected 32 bytes, got {}",
            bytes.len()
        )));
    }
    SigningKey::from_slice(bytes).map_err(|e| SigningError::InvalidKey(e.to_string()))
}

/// Sign a 32-byte digest, writing the recovery id per `convention`.
pub fn sign_digest(
    digest: &[u8],
    key: &SigningKey,
    convention: RecoveryConvention,
) -> Result<Signature, SigningError> {
    check_digest(digest)?;
    let (signature, recovery_id) = key.sign_prehash_recoverable(digest)?;
    let (r, s) = signature.split_bytes();

    Ok(Signature {
        r: U256::from_be_slice(r.as_slice()),
        s: U256::from_be_slice(s.as_slice()),
        v: convention.v(recovery_id.is_y_odd()),
    })
}

/// Ethereum address of a key: the last 20 bytes of keccak(uncompressed public key).
pub fn address_of(key: &SigningKey) -> Address {
    public_key_address(key.verifying_key())
}

/// Recover the signing address. Accepts `v` in `{0, 1, 27, 28}`.
pub fn recover_signer(digest: &[u8], signature: &Signature) -> Result<Address, SigningError> {
    check_digest(digest)?;
    let y_odd = signature
        .y_parity()
        .ok_or(SigningError::InvalidRecoveryId(signature.v))?;
    let ecdsa = EcdsaSignature::from_scalars(
        signature.r.to_be_bytes::<32>(),
        signature.s.to_be_bytes::<32>(),
    )?;
    let verifying_key =
        VerifyingKey::recover_from_prehash(digest, &ecdsa, RecoveryId::new(y_odd, false))?;
    Ok(public_key_address(&verifying_key))
}

fn public_key_address(verifying_key: &VerifyingKey) -> Address {
    let point = verifying_key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

fn check_digest(digest: &[u8]) -> Result<(), SigningError> {
    if digest.len() != DIGEST_LEN {
        return Err(SigningError::DigestLength {
            expected: DIGEST_LEN,
            actual: digest.len(),
        });
    }
    Ok(())
}
