//! Digests signed by the two signing domains.
//!
//! Actions are signed under EIP-712 (`0x19 0x01 || domainSeparator || structHash`) while
//! delegation authorizations are signed under EIP-7702 (`0x05 || rlp([chainId, address,
//! nonce])`). The two payloads start with different prefix bytes and must never be mixed.

use alloy_primitives::{Address, B256, U256};
use tracing::trace;

use account7702_types::{AddressEncoding, Eip712Domain, AUTHORIZATION_MAGIC, EIP712_DOMAIN_TYPE};

use crate::rlp::RlpItem;
use crate::typed_data::{keccak256, type_hash, TypedValue};

/// Prefix of an EIP-712 signing payload.
pub const TYPED_DATA_PREFIX: [u8; 2] = [0x19, 0x01];

/// EIP-712 domain separator.
///
/// `verifyingContract` is written per `domain.address_encoding`.
pub fn domain_separator(domain: &Eip712Domain) -> B256 {
    let members = [
        TypedValue::String(&domain.name),
        TypedValue::String(&domain.version),
        TypedValue::Uint(domain.chain_id),
    ];
    let mut domain_buf = Vec::with_capacity(32 * 5);
    domain_buf.extend_from_slice(type_hash(EIP712_DOMAIN_TYPE).as_slice());
    for member in &members {
        domain_buf.extend_from_slice(member.word().as_slice());
    }
    match domain.address_encoding {
        AddressEncoding::Padded => domain_buf.extend_from_slice(
            TypedValue::Address(domain.verifying_contract).word().as_slice(),
        ),
        AddressEncoding::Raw => domain_buf.extend_from_slice(domain.verifying_contract.as_slice()),
    }

    let separator = keccak256(&domain_buf);
    trace!(
        name = %domain.name,
        version = %domain.version,
        chain_id = %domain.chain_id,
        verifying_contract = %domain.verifying_contract,
        address_encoding = ?domain.address_encoding,
        %separator,
        "domain separator"
    );
    separator
}

/// `keccak256(0x19 0x01 || domain_separator || struct_hash)`.
pub fn typed_data_digest(domain_separator: B256, struct_hash: B256) -> B256 {
    let mut final_buf = Vec::with_capacity(2 + 32 + 32);
    final_buf.extend_from_slice(&TYPED_DATA_PREFIX);
    final_buf.extend_from_slice(domain_separator.as_slice());
    final_buf.extend_from_slice(struct_hash.as_slice());
    keccak256(final_buf)
}

/// `keccak256(0x05 || rlp([chain_id, address, nonce]))`.
pub fn authorization_digest(chain_id: U256, address: Address, nonce: u64) -> B256 {
    let tuple = RlpItem::list([chain_id.into(), address.into(), nonce.into()]);
    let mut buf = Vec::with_capacity(1 + tuple.length());
    buf.push(AUTHORIZATION_MAGIC);
    tuple.encode(&mut buf);

    let digest = keccak256(&buf);
    trace!(
        %chain_id,
        %address,
        nonce,
        payload = %hex::encode(&buf),
        %digest,
        "authorization digest"
    );
    digest
}
