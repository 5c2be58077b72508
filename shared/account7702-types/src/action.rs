use alloy_primitives::{Address, Bytes, U256};

/// EIP-712 type string of [`Action`]. Member order is the hashing order.
pub const ACTION_TYPE: &str = "Action(address target,bytes data,uint256 value,uint256 nonce,uint256 expiration,address feeToken,uint256 feeValue,bool isBasisPoints)";

/// Instruction for the smart-contract account to execute, plus the executor fee terms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Action {
    /// Contract the account calls.
    pub target: Address,
    /// Calldata forwarded to `target`.
    pub data: Bytes,
    /// Native value sent with the call.
    pub value: U256,
    /// Account-scoped action nonce. Independent of the transaction nonce.
    pub nonce: U256,
    /// Expiry timestamp, `0` for none.
    pub expiration: U256,
    /// Token the executor fee is paid in.
    pub fee_token: Address,
    /// Fee amount, or basis points of `value` when `is_basis_points` is set.
    pub fee_value: U256,
    pub is_basis_points: bool,
}

impl Action {
    /// Action calling `target` with `data` and no value, fee or expiry.
    pub fn call(target: Address, data: impl Into<Bytes>, nonce: U256) -> Self {
        Self {
            target,
            data: data.into(),
            nonce,
            ..Default::default()
        }
    }
}
