//! EIP-712 typed structured data encoding.
//!
//! A struct is encoded as `typeHash || word(member_1) || ... || word(member_n)`, with members
//! in the order the type string declares them. Values are checked against the declared member
//! types before anything is hashed, so a value list that drifts from its type string fails to
//! encode instead of producing a digest no verifier accepts.

use alloy_primitives::{Address, B256, U256};
use sha3::{Digest, Keccak256};

use crate::error::{Error, Result};

pub fn keccak256(bytes: impl AsRef<[u8]>) -> B256 {
    let mut h = Keccak256::new();
    h.update(bytes.as_ref());
    B256::from_slice(h.finalize().as_slice())
}

/// Value of a single struct member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypedValue<'a> {
    Address(Address),
    Uint(U256),
    Bool(bool),
    /// Dynamic `bytes`, encoded as its hash.
    Bytes(&'a [u8]),
    /// `string`, encoded as the hash of its UTF-8 bytes.
    String(&'a str),
    /// `T[]` of atomic members, encoded as the hash of the concatenated member words.
    Array(Vec<TypedValue<'a>>),
}

impl TypedValue<'_> {
    /// The 32-byte word this value contributes to `encodeData`.
    pub fn word(&self) -> B256 {
        match self {
            TypedValue::Address(address) => address.into_word(),
            TypedValue::Uint(value) => B256::from(value.to_be_bytes::<32>()),
            TypedValue::Bool(flag) => B256::with_last_byte(*flag as u8),
            TypedValue::Bytes(bytes) => keccak256(bytes),
            TypedValue::String(text) => keccak256(text.as_bytes()),
            TypedValue::Array(members) => {
                let mut buf = Vec::with_capacity(32 * members.len());
                for member in members {
                    buf.extend_from_slice(member.word().as_slice());
                }
                keccak256(buf)
            }
        }
    }

    fn check(&self, ty: &str) -> core::result::Result<(), String> {
        let ok = match self {
            TypedValue::Address(_) => ty == "address",
            TypedValue::Bool(_) => ty == "bool",
            TypedValue::Bytes(_) => ty == "bytes",
            TypedValue::String(_) => ty == "string",
            TypedValue::Uint(value) => {
                let bits = uint_bits(ty).ok_or_else(|| format!("integer given for `{ty}`"))?;
                if value.bit_len() > bits {
                    return Err(format!("value {value} does not fit `{ty}`"));
                }
                true
            }
            TypedValue::Array(members) => {
                let element = ty
                    .strip_suffix("[]")
                    .ok_or_else(|| format!("array given for `{ty}`"))?;
                for (i, member) in members.iter().enumerate() {
                    if let TypedValue::Array(_) = member {
                        return Err(format!("nested array at index {i} of `{ty}`"));
                    }
                    member.check(element).map_err(|reason| format!("[{i}] {reason}"))?;
                }
                true
            }
        };
        if ok {
            Ok(())
        } else {
            Err(format!("{} given for `{ty}`", self.kind()))
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            TypedValue::Address(_) => "address",
            TypedValue::Uint(_) => "integer",
            TypedValue::Bool(_) => "bool",
            TypedValue::Bytes(_) => "bytes",
            TypedValue::String(_) => "string",
            TypedValue::Array(_) => "array",
        }
    }
}

/// Width of a `uintN` type, `None` for anything else.
fn uint_bits(ty: &str) -> Option<usize> {
    let width = ty.strip_prefix("uint")?;
    if width.is_empty() {
        return Some(256);
    }
    let bits: usize = width.parse().ok()?;
    (bits % 8 == 0 && (8..=256).contains(&bits)).then_some(bits)
}

/// A Rust type with a fixed EIP-712 struct type.
pub trait TypedStruct {
    /// Type string, e.g. `Mail(address from,address to,string contents)`.
    const TYPE: &'static str;

    /// Member values in declaration order.
    fn values(&self) -> Vec<TypedValue<'_>>;

    fn struct_hash(&self) -> Result<B256> {
        hash_struct(Self::TYPE, &self.values())
    }
}

pub fn type_hash(type_string: &str) -> B256 {
    keccak256(type_string.as_bytes())
}

/// Split `Name(type1 name1,type2 name2)` into its name and `(type, name)` members.
pub fn parse_type(type_string: &str) -> Result<(&str, Vec<(&str, &str)>)> {
    let invalid = |reason: &str| Error::Encoding {
        what: "type string",
        reason: format!("{reason} in `{type_string}`"),
    };

    let (name, rest) = type_string
        .split_once('(')
        .ok_or_else(|| invalid("missing `(`"))?;
    let body = rest.strip_suffix(')').ok_or_else(|| invalid("missing `)`"))?;
    if name.is_empty() {
        return Err(invalid("missing struct name"));
    }
    if body.is_empty() {
        return Ok((name, Vec::new()));
    }

    let members = body
        .split(',')
        .map(|member| match member.split_once(' ') {
            Some((ty, field)) if !ty.is_empty() && !field.is_empty() && !field.contains(' ') => {
                Ok((ty, field))
            }
            _ => Err(invalid("malformed member declaration")),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((name, members))
}

/// `encodeData` of a struct: its type hash followed by one word per member.
pub fn encode_data(type_string: &str, values: &[TypedValue<'_>]) -> Result<Vec<u8>> {
    let (name, members) = parse_type(type_string)?;
    if members.len() != values.len() {
        return Err(Error::Encoding {
            what: "typed struct",
            reason: format!(
                "`{name}` declares {} members, got {} values",
                members.len(),
                values.len()
            ),
        });
    }

    let mut buf = Vec::with_capacity(32 * (values.len() + 1));
    buf.extend_from_slice(type_hash(type_string).as_slice());
    for ((ty, field), value) in members.iter().zip(values) {
        value.check(ty).map_err(|reason| Error::Encoding {
            what: "typed struct member",
            reason: format!("`{name}.{field}`: {reason}"),
        })?;
        buf.extend_from_slice(value.word().as_slice());
    }
    Ok(buf)
}

/// `hashStruct`: keccak of [`encode_data`].
pub fn hash_struct(type_string: &str, values: &[TypedValue<'_>]) -> Result<B256> {
    Ok(keccak256(encode_data(type_string, values)?))
}
