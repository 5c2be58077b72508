//! Fixed account state for off-chain use.

use alloy_primitives::{Address, U256};
use tracing::debug;

pub use account7702_types::{AccountStateProvider, StateError};

/// State provider answering from fixed values.
///
/// Lets the CLI and tests resolve nonces without an RPC endpoint. Unset values answer
/// `NotImplemented`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticAccountState {
    pub chain_id: Option<u64>,
    pub transaction_nonce: Option<u64>,
    pub last_action_nonce: Option<U256>,
}

impl StaticAccountState {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id: Some(chain_id),
            ..Default::default()
        }
    }

    pub fn with_transaction_nonce(mut self, nonce: u64) -> Self {
        self.transaction_nonce = Some(nonce);
        self
    }

    pub fn with_last_action_nonce(mut self, nonce: U256) -> Self {
        self.last_action_nonce = Some(nonce);
        self
    }
}

impl AccountStateProvider for StaticAccountState {
    fn chain_id(&self) -> Result<u64, StateError> {
        self.chain_id.ok_or(StateError::NotImplemented)
    }

    fn transaction_nonce(&self, _address: Address) -> Result<u64, StateError> {
        self.transaction_nonce.ok_or(StateError::NotImplemented)
    }

    fn last_action_nonce(&self, _account: Address) -> Result<U256, StateError> {
        self.last_action_nonce.ok_or(StateError::NotImplemented)
    }
}

/// Nonce for the next action: `explicit` if given, otherwise the provider's last nonce plus one.
pub fn resolve_action_nonce<P: AccountStateProvider + ?Sized>(
    explicit: Option<U256>,
    provider: &P,
    account: Address,
) -> Result<U256, StateError> {
    match explicit {
        Some(nonce) => Ok(nonce),
        None => {
            let nonce = provider.next_action_nonce(account)?;
            debug!(%account, %nonce, "resolved next action nonce");
            Ok(nonce)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_nonce_wins() {
        let state = StaticAccountState::new(1).with_last_action_nonce(U256::from(9));
        assert_eq!(
            resolve_action_nonce(Some(U256::from(3)), &state, Address::ZERO),
            Ok(U256::from(3))
        );
    }

    #[test]
    fn test_falls_back_to_last_plus_one() {
        let state = StaticAccountState::new(1).with_last_action_nonce(U256::from(9));
        assert_eq!(
            resolve_action_nonce(None, &state, Address::ZERO),
            Ok(U256::from(10))
        );
    }

    #[test]
    fn test_missing_state_is_reported() {
        let state = StaticAccountState::new(1);
        assert_eq!(
            resolve_action_nonce(None, &state, Address::ZERO),
            Err(StateError::NotImplemented)
        );
        assert_eq!(state.chain_id(), Ok(1));
        assert_eq!(state.transaction_nonce(Address::ZERO), Err(StateError::NotImplemented));
    }
}
