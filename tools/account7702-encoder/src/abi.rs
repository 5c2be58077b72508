//! ABI calldata for the account contract and the demo game contract.

use alloy_primitives::Bytes;
use alloy_sol_types::SolCall;

use account7702_types::Action;

use crate::action::SignedAction;

pub mod bindings {
    alloy_sol_types::sol! {
        struct Action {
            address target;
            bytes data;
            uint256 value;
            uint256 nonce;
            uint256 expiration;
            address feeToken;
            uint256 feeValue;
            bool isBasisPoints;
        }

        /// Entry point of the delegated account.
        function execute(Action[] actions, bytes[] signatures) external payable;

        /// DegenGambit round.
        function spin(bool boost) external payable;
    }
}

impl From<&Action> for bindings::Action {
    fn from(action: &Action) -> Self {
        Self {
            target: action.target,
            data: action.data.clone(),
            value: action.value,
            nonce: action.nonce,
            expiration: action.expiration,
            feeToken: action.fee_token,
            feeValue: action.fee_value,
            isBasisPoints: action.is_basis_points,
        }
    }
}

/// `execute(actions, signatures)` calldata for a batch of signed actions.
pub fn execute_calldata(signed: &[SignedAction]) -> Vec<u8> {
    let call = bindings::executeCall {
        actions: signed.iter().map(|s| bindings::Action::from(&s.action)).collect(),
        signatures: signed
            .iter()
            .map(|s| Bytes::copy_from_slice(&s.signature_bytes()))
            .collect(),
    };
    call.abi_encode()
}

pub fn spin_calldata(boost: bool) -> Vec<u8> {
    bindings::spinCall { boost }.abi_encode()
}
