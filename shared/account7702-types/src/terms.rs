use alloc::vec::Vec;

use alloy_primitives::Address;

/// EIP-712 type string of [`ExecutorTerms`].
pub const EXECUTOR_TERMS_TYPE: &str = "ExecutorTerms(address[] rewardTokens,uint16[] basisPoints)";

/// Domain name executor terms are signed under.
pub const EXECUTOR_TERMS_DOMAIN_NAME: &str = "DegenCasino";

/// Compensation an executor asks for running actions: `basis_points[i]` of the reward paid
/// in `reward_tokens[i]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ExecutorTerms {
    pub reward_tokens: Vec<Address>,
    pub basis_points: Vec<u16>,
}
