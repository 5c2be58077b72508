//! EIP-7702 delegation authorizations.
//!
//! A signed authorization is the list `[chain_id, address, nonce, y_parity, r, s]`, where the
//! signature covers [`authorization_digest`] of the first three fields.

use alloy_primitives::{Address, U256};
use k256::ecdsa::SigningKey;
use tracing::debug;

use account7702_types::{
    AuthorizationTuple, DelegationAuthorization, RecoveryConvention, Signature,
};

use crate::error::{DecodeError, Error, Result};
use crate::hash::authorization_digest;
use crate::rlp::{decode_hex, RlpItem};
use crate::signer::{recover_signer, sign_digest};

const AUTHORIZATION_FIELDS: usize = 6;

/// Sign a delegation of the key's account to `implementation`.
pub fn build_authorization(
    chain_id: U256,
    implementation: Address,
    nonce: u64,
    key: &SigningKey,
) -> Result<DelegationAuthorization> {
    let tuple = AuthorizationTuple::new(chain_id, implementation, nonce);
    sign_authorization(&tuple, key)
}

pub fn sign_authorization(
    tuple: &AuthorizationTuple,
    key: &SigningKey,
) -> Result<DelegationAuthorization> {
    let digest = authorization_digest(tuple.chain_id, tuple.address, tuple.nonce);
    let signature = sign_digest(digest.as_slice(), key, RecoveryConvention::Raw)?;
    debug!(
        chain_id = %tuple.chain_id,
        implementation = %tuple.address,
        nonce = tuple.nonce,
        y_parity = signature.v,
        "signed authorization"
    );
    Ok(tuple.into_signed(signature.v, signature.r, signature.s))
}

/// RLP of a signed authorization.
pub fn encode_authorization(authorization: &DelegationAuthorization) -> Vec<u8> {
    RlpItem::from(authorization).to_vec()
}

/// `0x`-prefixed hex of [`encode_authorization`].
pub fn authorization_to_hex(authorization: &DelegationAuthorization) -> String {
    format!("0x{}", hex::encode(encode_authorization(authorization)))
}

/// Parse a hex authorization, with or without `0x`.
pub fn decode_authorization(input: &str) -> Result<DelegationAuthorization> {
    let bytes = decode_hex(input).map_err(Error::decoding("authorization"))?;
    let item = RlpItem::decode_exact(&bytes).map_err(Error::decoding("authorization"))?;
    authorization_from_rlp(&item).map_err(Error::decoding("authorization"))
}

pub(crate) fn authorization_from_rlp(
    item: &RlpItem,
) -> core::result::Result<DelegationAuthorization, DecodeError> {
    let fields = item.as_list()?;
    if fields.len() != AUTHORIZATION_FIELDS {
        return Err(DecodeError::ItemCount {
            expected: AUTHORIZATION_FIELDS,
            actual: fields.len(),
        });
    }
    let y_parity = fields[3].as_u8()?;
    if y_parity > 1 {
        return Err(DecodeError::Invalid("authorization y parity must be 0 or 1"));
    }
    Ok(DelegationAuthorization {
        chain_id: fields[0].as_u256()?,
        address: fields[1].as_address()?,
        nonce: fields[2].as_u64()?,
        y_parity,
        r: fields[4].as_u256()?,
        s: fields[5].as_u256()?,
    })
}

/// Address that signed the authorization.
pub fn recover_authority(authorization: &DelegationAuthorization) -> Result<Address> {
    let tuple = authorization.tuple();
    let digest = authorization_digest(tuple.chain_id, tuple.address, tuple.nonce);
    let signature = Signature {
        r: authorization.r,
        s: authorization.s,
        v: authorization.y_parity,
    };
    Ok(recover_signer(digest.as_slice(), &signature)?)
}

impl From<&DelegationAuthorization> for RlpItem {
    fn from(authorization: &DelegationAuthorization) -> Self {
        RlpItem::list([
            authorization.chain_id.into(),
            authorization.address.into(),
            authorization.nonce.into(),
            authorization.y_parity.into(),
            authorization.r.into(),
            authorization.s.into(),
        ])
    }
}
