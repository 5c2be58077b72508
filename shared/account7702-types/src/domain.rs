use alloc::string::{String, ToString};

use alloy_primitives::{Address, U256};

/// EIP-712 domain type string.
pub const EIP712_DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Domain name the account contract hashes actions under.
pub const ACCOUNT_DOMAIN_NAME: &str = "AccountSystem7702";
pub const ACCOUNT_DOMAIN_VERSION: &str = "1";

/// How `verifyingContract` is laid out in the domain separator preimage.
///
/// `Padded` is the EIP-712 rule (a left-padded 32-byte word). `Raw` appends the 20 address
/// bytes directly, which is what some verifiers built with `abi.encodePacked` expect. Pick the
/// one the target contract uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AddressEncoding {
    #[default]
    Padded,
    Raw,
}

/// EIP-712 domain parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Eip712Domain {
    pub name: String,
    pub version: String,
    pub chain_id: U256,
    pub verifying_contract: Address,
    pub address_encoding: AddressEncoding,
}

impl Eip712Domain {
    /// Domain of an `AccountSystem7702` account deployed at `account`.
    pub fn account_system(chain_id: U256, account: Address) -> Self {
        Self {
            name: ACCOUNT_DOMAIN_NAME.to_string(),
            version: ACCOUNT_DOMAIN_VERSION.to_string(),
            chain_id,
            verifying_contract: account,
            address_encoding: AddressEncoding::Padded,
        }
    }

    /// Domain executor terms for `account` are signed under.
    pub fn executor_terms(chain_id: U256, account: Address) -> Self {
        Self {
            name: crate::EXECUTOR_TERMS_DOMAIN_NAME.to_string(),
            ..Self::account_system(chain_id, account)
        }
    }

    pub fn with_address_encoding(mut self, address_encoding: AddressEncoding) -> Self {
        self.address_encoding = address_encoding;
        self
    }
}
