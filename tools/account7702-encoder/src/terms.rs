//! EIP-712 signing of executor compensation terms.

use alloy_primitives::{B256, U256};
use k256::ecdsa::SigningKey;
use tracing::debug;

use account7702_types::{
    Eip712Domain, ExecutorTerms, RecoveryConvention, Signature, EXECUTOR_TERMS_TYPE,
    SIGNATURE_LEN,
};

use crate::error::{Error, Result};
use crate::hash::{domain_separator, typed_data_digest};
use crate::signer::sign_digest;
use crate::typed_data::{TypedStruct, TypedValue};

impl TypedStruct for ExecutorTerms {
    const TYPE: &'static str = EXECUTOR_TERMS_TYPE;

    fn values(&self) -> Vec<TypedValue<'_>> {
        vec![
            TypedValue::Array(
                self.reward_tokens
                    .iter()
                    .copied()
                    .map(TypedValue::Address)
                    .collect(),
            ),
            TypedValue::Array(
                self.basis_points
                    .iter()
                    .map(|bps| TypedValue::Uint(U256::from(*bps)))
                    .collect(),
            ),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedExecutorTerms {
    pub terms: ExecutorTerms,
    pub signature: Signature,
}

impl SignedExecutorTerms {
    pub fn signature_bytes(&self) -> [u8; SIGNATURE_LEN] {
        self.signature.to_bytes()
    }
}

/// Typed-data digest of `terms` under `domain`.
pub fn executor_terms_digest(terms: &ExecutorTerms, domain: &Eip712Domain) -> Result<B256> {
    Ok(typed_data_digest(domain_separator(domain), terms.struct_hash()?))
}

/// Sign `terms` with `v` written as 27/28.
///
/// Each reward token needs exactly one basis-points entry.
pub fn sign_executor_terms(
    terms: &ExecutorTerms,
    domain: &Eip712Domain,
    key: &SigningKey,
) -> Result<SignedExecutorTerms> {
    if terms.reward_tokens.len() != terms.basis_points.len() {
        return Err(Error::malformed(
            "basis_points",
            format!(
                "{} reward tokens but {} basis-points entries",
                terms.reward_tokens.len(),
                terms.basis_points.len()
            ),
        ));
    }

    let digest = executor_terms_digest(terms, domain)?;
    let signature = sign_digest(digest.as_slice(), key, RecoveryConvention::Legacy)?;
    debug!(
        account = %domain.verifying_contract,
        reward_tokens = terms.reward_tokens.len(),
        %digest,
        "signed executor terms"
    );

    Ok(SignedExecutorTerms {
        terms: terms.clone(),
        signature,
    })
}
