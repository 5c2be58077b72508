use alloy_primitives::{Address, U256};

/// Errors while reading chain or account state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// Used by static or partially implemented providers.
    NotImplemented,
    /// The last action nonce is `U256::MAX`; no successor exists.
    NonceOverflow,
}

impl core::fmt::Display for StateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StateError::NotImplemented => f.write_str("state query not implemented by provider"),
            StateError::NonceOverflow => f.write_str("action nonce overflow"),
        }
    }
}

/// Chain/account state source, implemented over RPC by callers and statically in tests.
pub trait AccountStateProvider {
    fn chain_id(&self) -> Result<u64, StateError> {
        Err(StateError::NotImplemented)
    }

    /// Transaction nonce of an externally owned account.
    fn transaction_nonce(&self, _address: Address) -> Result<u64, StateError> {
        Err(StateError::NotImplemented)
    }

    /// Last action nonce the account contract recorded as executed.
    fn last_action_nonce(&self, _account: Address) -> Result<U256, StateError> {
        Err(StateError::NotImplemented)
    }

    /// Nonce for the next action: last recorded nonce plus one.
    fn next_action_nonce(&self, account: Address) -> Result<U256, StateError> {
        let last = self.last_action_nonce(account)?;
        last.checked_add(U256::from(1)).ok_or(StateError::NonceOverflow)
    }
}
