//! Shared types for EIP-7702 account tooling (signing tools, CLI, tests).
//!
//! Everything here is plain data plus the protocol constants the encoder hashes over. The
//! crate is `no_std` so the same definitions can be reused next to a verifier.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod action;
pub mod authorization;
pub mod domain;
pub mod signature;
pub mod state;
pub mod terms;

pub use action::{Action, ACTION_TYPE};
pub use authorization::{AuthorizationTuple, DelegationAuthorization, AUTHORIZATION_MAGIC};
pub use domain::{
    AddressEncoding, Eip712Domain, ACCOUNT_DOMAIN_NAME, ACCOUNT_DOMAIN_VERSION, EIP712_DOMAIN_TYPE,
};
pub use signature::{RecoveryConvention, Signature, SIGNATURE_LEN};
pub use state::{AccountStateProvider, StateError};
pub use terms::{ExecutorTerms, EXECUTOR_TERMS_DOMAIN_NAME, EXECUTOR_TERMS_TYPE};

/// EIP-2718 type byte of the set-code transaction that carries authorizations.
pub const SET_CODE_TX_TYPE: u8 = 0x04;
