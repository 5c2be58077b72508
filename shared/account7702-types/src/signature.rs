use alloy_primitives::U256;

/// Length of a signature in `r || s || v` form.
pub const SIGNATURE_LEN: usize = 65;

/// How the recovery id is written into `v`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RecoveryConvention {
    /// `v` in `{0, 1}` (typed transactions, EIP-7702 authorizations).
    #[default]
    Raw,
    /// `v` in `{27, 28}` (`ecrecover`-style verifiers).
    Legacy,
}

impl RecoveryConvention {
    /// Encode a y parity under this convention.
    pub fn v(self, y_odd: bool) -> u8 {
        let parity = y_odd as u8;
        match self {
            RecoveryConvention::Raw => parity,
            RecoveryConvention::Legacy => parity + 27,
        }
    }
}

/// Recoverable ECDSA signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    pub r: U256,
    pub s: U256,
    pub v: u8,
}

impl Signature {
    /// Y parity regardless of convention, `None` when `v` is not in `{0, 1, 27, 28}`.
    pub fn y_parity(&self) -> Option<bool> {
        match self.v {
            0 | 27 => Some(false),
            1 | 28 => Some(true),
            _ => None,
        }
    }

    /// `r || s || v`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut out = [0u8; SIGNATURE_LEN];
        out[..32].copy_from_slice(&self.r.to_be_bytes::<32>());
        out[32..64].copy_from_slice(&self.s.to_be_bytes::<32>());
        out[64] = self.v;
        out
    }
}
