//! Recursive length prefix (RLP) encoding.
//!
//! Every value the encoder writes is one of four shapes, so a closed [`RlpItem`] and a single
//! recursive `encode` cover authorization tuples and whole transactions alike. Headers and
//! scalars go through `alloy_rlp`, which also rejects non-canonical headers on decode.

use alloy_primitives::{Address, U256};
use alloy_rlp::{Encodable, Header};

use crate::error::DecodeError;

const ADDRESS_LEN: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RlpItem {
    /// Unsigned integer, written as its minimal big-endian bytes.
    Uint(U256),
    /// 20-byte string.
    Address(Address),
    Bytes(Vec<u8>),
    List(Vec<RlpItem>),
}

impl RlpItem {
    pub fn list(items: impl IntoIterator<Item = RlpItem>) -> Self {
        RlpItem::List(items.into_iter().collect())
    }

    pub fn encode(&self, out: &mut Vec<u8>) {
        match self {
            RlpItem::Uint(value) => Encodable::encode(value, out),
            RlpItem::Address(address) => Encodable::encode(address, out),
            RlpItem::Bytes(bytes) => Encodable::encode(bytes.as_slice(), out),
            RlpItem::List(items) => {
                Header {
                    list: true,
                    payload_length: payload_length(items),
                }
                .encode(out);
                for item in items {
                    item.encode(out);
                }
            }
        }
    }

    /// Encoded length in bytes, header included.
    pub fn length(&self) -> usize {
        match self {
            RlpItem::Uint(value) => Encodable::length(value),
            RlpItem::Address(address) => Encodable::length(address),
            RlpItem::Bytes(bytes) => Encodable::length(bytes.as_slice()),
            RlpItem::List(items) => {
                let payload_length = payload_length(items);
                alloy_rlp::length_of_length(payload_length) + payload_length
            }
        }
    }

    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.length());
        self.encode(&mut out);
        out
    }

    /// Decode one item from the front of `buf`, advancing it.
    ///
    /// Strings come back as [`RlpItem::Bytes`]; use the `as_*` accessors to interpret them.
    pub fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        let header = Header::decode(buf)?;
        let input = *buf;
        let (payload, rest) = input.split_at(header.payload_length);
        *buf = rest;
        if !header.list {
            return Ok(RlpItem::Bytes(payload.to_vec()));
        }

        let mut payload = payload;
        let mut items = Vec::new();
        while !payload.is_empty() {
            items.push(Self::decode(&mut payload)?);
        }
        Ok(RlpItem::List(items))
    }

    /// Decode `bytes` as exactly one item.
    pub fn decode_exact(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut buf = bytes;
        let item = Self::decode(&mut buf)?;
        if !buf.is_empty() {
            return Err(DecodeError::TrailingBytes(buf.len()));
        }
        Ok(item)
    }

    pub fn as_list(&self) -> Result<&[RlpItem], DecodeError> {
        match self {
            RlpItem::List(items) => Ok(items),
            _ => Err(DecodeError::ExpectedList),
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8], DecodeError> {
        match self {
            RlpItem::Bytes(bytes) => Ok(bytes),
            RlpItem::Address(address) => Ok(address.as_slice()),
            RlpItem::Uint(_) => {
                Err(DecodeError::Invalid("expected a byte string, found an integer"))
            }
            RlpItem::List(_) => Err(DecodeError::ExpectedString),
        }
    }

    pub fn as_u256(&self) -> Result<U256, DecodeError> {
        match self {
            RlpItem::Uint(value) => Ok(*value),
            RlpItem::Bytes(bytes) => {
                if bytes.first() == Some(&0) {
                    return Err(alloy_rlp::Error::LeadingZero.into());
                }
                U256::try_from_be_slice(bytes).ok_or(DecodeError::IntegerOverflow { bits: 256 })
            }
            RlpItem::Address(_) => {
                Err(DecodeError::Invalid("expected an integer, found an address"))
            }
            RlpItem::List(_) => Err(DecodeError::ExpectedString),
        }
    }

    pub fn as_u128(&self) -> Result<u128, DecodeError> {
        self.as_u256()?
            .try_into()
            .map_err(|_| DecodeError::IntegerOverflow { bits: 128 })
    }

    pub fn as_u64(&self) -> Result<u64, DecodeError> {
        self.as_u256()?
            .try_into()
            .map_err(|_| DecodeError::IntegerOverflow { bits: 64 })
    }

    pub fn as_u8(&self) -> Result<u8, DecodeError> {
        self.as_u256()?
            .try_into()
            .map_err(|_| DecodeError::IntegerOverflow { bits: 8 })
    }

    pub fn as_address(&self) -> Result<Address, DecodeError> {
        match self {
            RlpItem::Address(address) => Ok(*address),
            RlpItem::Bytes(bytes) if bytes.len() == ADDRESS_LEN => Ok(Address::from_slice(bytes)),
            RlpItem::Bytes(bytes) => Err(DecodeError::Length {
                field: "address",
                expected: ADDRESS_LEN,
                actual: bytes.len(),
            }),
            RlpItem::Uint(_) => Err(DecodeError::Invalid("expected an address, found an integer")),
            RlpItem::List(_) => Err(DecodeError::ExpectedString),
        }
    }
}

fn payload_length(items: &[RlpItem]) -> usize {
    items.iter().map(RlpItem::length).sum()
}

impl From<U256> for RlpItem {
    fn from(value: U256) -> Self {
        RlpItem::Uint(value)
    }
}

impl From<u128> for RlpItem {
    fn from(value: u128) -> Self {
        RlpItem::Uint(U256::from(value))
    }
}

impl From<u64> for RlpItem {
    fn from(value: u64) -> Self {
        RlpItem::Uint(U256::from(value))
    }
}

impl From<u8> for RlpItem {
    fn from(value: u8) -> Self {
        RlpItem::Uint(U256::from(value))
    }
}

impl From<Address> for RlpItem {
    fn from(address: Address) -> Self {
        RlpItem::Address(address)
    }
}

impl From<Vec<u8>> for RlpItem {
    fn from(bytes: Vec<u8>) -> Self {
        RlpItem::Bytes(bytes)
    }
}

impl From<&[u8]> for RlpItem {
    fn from(bytes: &[u8]) -> Self {
        RlpItem::Bytes(bytes.to_vec())
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<RlpItem>) -> Self {
        RlpItem::List(items)
    }
}

/// Decode hex with or without a `0x` prefix.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, DecodeError> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if digits.is_empty() {
        return Err(DecodeError::Empty);
    }
    hex::decode(digits).map_err(|e| DecodeError::InvalidHex(e.to_string()))
}
