//! Off-chain encoding and signing for EIP-7702 delegated accounts.
//!
//! Builds the three artifacts a delegating user hands to an executor: the signed delegation
//! authorization, signed account actions, and the set-code transaction that carries the
//! authorization list. Everything is pure and deterministic; chain access is left to the
//! caller through [`AccountStateProvider`].

pub mod abi;
pub mod action;
pub mod authorization;
pub mod envelope;
pub mod error;
pub mod hash;
pub mod rlp;
pub mod signer;
pub mod state;
pub mod terms;
pub mod typed_data;

#[cfg(test)]
mod tests;

pub use account7702_types::{
    AccountStateProvider, Action, AddressEncoding, AuthorizationTuple, DelegationAuthorization,
    Eip712Domain, ExecutorTerms, RecoveryConvention, Signature, StateError,
};
pub use k256::ecdsa::SigningKey;

pub use abi::{execute_calldata, spin_calldata};
pub use action::{action_digest, action_struct_hash, sign_action, SignedAction};
pub use authorization::{
    authorization_to_hex, build_authorization, decode_authorization, encode_authorization,
    recover_authority, sign_authorization,
};
pub use envelope::{AccessListItem, BaseTx, SignedEnvelope, UnsignedEnvelope};
pub use error::{DecodeError, Error, Result, SigningError};
pub use hash::{authorization_digest, domain_separator, typed_data_digest};
pub use rlp::{decode_hex, RlpItem};
pub use signer::{address_of, parse_private_key, recover_signer, sign_digest};
pub use state::{resolve_action_nonce, StaticAccountState};
pub use terms::{executor_terms_digest, sign_executor_terms, SignedExecutorTerms};
pub use typed_data::{keccak256, TypedStruct, TypedValue};
