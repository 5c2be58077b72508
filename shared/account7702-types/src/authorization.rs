use alloy_primitives::{Address, U256};

/// Prefix byte of the EIP-7702 authorization signing payload.
pub const AUTHORIZATION_MAGIC: u8 = 0x05;

/// Unsigned `(chain_id, address, nonce)` tuple a delegator signs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AuthorizationTuple {
    pub chain_id: U256,
    /// Implementation the delegating account points its code at.
    pub address: Address,
    /// Transaction nonce of the delegating account.
    pub nonce: u64,
}

/// Signed EIP-7702 authorization, as carried in a set-code transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DelegationAuthorization {
    pub chain_id: U256,
    pub address: Address,
    pub nonce: u64,
    /// Signature y parity, `0` or `1`.
    pub y_parity: u8,
    pub r: U256,
    pub s: U256,
}

impl AuthorizationTuple {
    pub fn new(chain_id: U256, address: Address, nonce: u64) -> Self {
        Self {
            chain_id,
            address,
            nonce,
        }
    }

    /// Attach signature components to the tuple.
    pub fn into_signed(self, y_parity: u8, r: U256, s: U256) -> DelegationAuthorization {
        DelegationAuthorization {
            chain_id: self.chain_id,
            address: self.address,
            nonce: self.nonce,
            y_parity,
            r,
            s,
        }
    }
}

impl DelegationAuthorization {
    /// The unsigned part the signature covers.
    pub fn tuple(&self) -> AuthorizationTuple {
        AuthorizationTuple::new(self.chain_id, self.address, self.nonce)
    }
}
