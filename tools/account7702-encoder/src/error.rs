//! Error kinds surfaced by the encoder.
//!
//! Nothing here is transient: the same inputs always fail the same way, so callers report and
//! abort instead of retrying.

use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Caller input absent or out of range.
    #[error("malformed input `{field}`: {reason}")]
    MalformedInput { field: &'static str, reason: String },

    /// A value the encoder cannot represent. Unreachable for well-typed inputs.
    #[error("cannot encode {what}: {reason}")]
    Encoding { what: &'static str, reason: String },

    #[error(transparent)]
    Signing(#[from] SigningError),

    /// Caller-supplied hex/RLP is malformed.
    #[error("cannot decode {what}: {source}")]
    Decoding {
        what: &'static str,
        #[source]
        source: DecodeError,
    },
}

impl Error {
    pub(crate) fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn decoding(what: &'static str) -> impl FnOnce(DecodeError) -> Self {
        move |source| Error::Decoding { what, source }
    }
}

#[derive(Debug, Error)]
pub enum SigningError {
    #[error("no private key supplied")]
    MissingKey,

    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("digest must be {expected} bytes, got {actual}")]
    DigestLength { expected: usize, actual: usize },

    /// `v` outside `{0, 1, 27, 28}`.
    #[error("invalid recovery id {0}")]
    InvalidRecoveryId(u8),

    #[error("secp256k1: {0}")]
    Curve(#[from] k256::ecdsa::Error),
}

/// Errors during hex or RLP decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("input is empty")]
    Empty,

    #[error("rlp: {0}")]
    Rlp(#[from] alloy_rlp::Error),

    #[error("{0} trailing bytes")]
    TrailingBytes(usize),

    #[error("expected a list, found a string")]
    ExpectedList,

    #[error("expected a string, found a list")]
    ExpectedString,

    #[error("integer does not fit in {bits} bits")]
    IntegerOverflow { bits: usize },

    #[error("{field}: expected {expected} bytes, got {actual}")]
    Length {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("expected {expected} items, got {actual}")]
    ItemCount { expected: usize, actual: usize },

    #[error("unsupported transaction type {0:#04x}")]
    TxType(u8),

    #[error("{0}")]
    Invalid(&'static str),
}
