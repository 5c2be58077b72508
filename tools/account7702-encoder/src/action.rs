//! EIP-712 signing of account actions.

use alloy_primitives::B256;
use k256::ecdsa::SigningKey;
use tracing::{debug, trace};

use account7702_types::{
    Action, Eip712Domain, RecoveryConvention, Signature, ACTION_TYPE, SIGNATURE_LEN,
};

use crate::error::{Error, Result};
use crate::hash::{domain_separator, typed_data_digest};
use crate::signer::sign_digest;
use crate::typed_data::{TypedStruct, TypedValue};

impl TypedStruct for Action {
    const TYPE: &'static str = ACTION_TYPE;

    fn values(&self) -> Vec<TypedValue<'_>> {
        vec![
            TypedValue::Address(self.target),
            TypedValue::Bytes(&self.data),
            TypedValue::Uint(self.value),
            TypedValue::Uint(self.nonce),
            TypedValue::Uint(self.expiration),
            TypedValue::Address(self.fee_token),
            TypedValue::Uint(self.fee_value),
            TypedValue::Bool(self.is_basis_points),
        ]
    }
}

/// An action with the proof the account contract checks before executing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedAction {
    pub action: Action,
    pub signature: Signature,
}

impl SignedAction {
    /// `r || s || v`, as passed in `execute(.., bytes[] signatures)`.
    pub fn signature_bytes(&self) -> [u8; SIGNATURE_LEN] {
        self.signature.to_bytes()
    }
}

pub fn action_struct_hash(action: &Action) -> Result<B256> {
    let struct_hash = action.struct_hash()?;
    trace!(
        target_address = %action.target,
        data = %action.data,
        value = %action.value,
        nonce = %action.nonce,
        expiration = %action.expiration,
        fee_token = %action.fee_token,
        fee_value = %action.fee_value,
        is_basis_points = action.is_basis_points,
        %struct_hash,
        "action struct hash"
    );
    Ok(struct_hash)
}

/// Typed-data digest the account contract recovers the signer from.
pub fn action_digest(action: &Action, domain: &Eip712Domain) -> Result<B256> {
    let struct_hash = action_struct_hash(action)?;
    Ok(typed_data_digest(domain_separator(domain), struct_hash))
}

/// Sign `action` for the account named by `domain.verifying_contract`.
///
/// `v` is written as 27/28. Nonce ordering and expiry are checked by the account contract,
/// not here.
pub fn sign_action(
    action: &Action,
    domain: &Eip712Domain,
    key: &SigningKey,
) -> Result<SignedAction> {
    if action.target.is_zero() {
        return Err(Error::malformed("target", "action target is the zero address"));
    }

    let digest = action_digest(action, domain)?;
    let signature = sign_digest(digest.as_slice(), key, RecoveryConvention::Legacy)?;
    debug!(
        account = %domain.verifying_contract,
        target_address = %action.target,
        nonce = %action.nonce,
        %digest,
        "signed action"
    );

    Ok(SignedAction {
        action: action.clone(),
        signature,
    })
}
