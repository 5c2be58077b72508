//! EIP-7702 set-code transaction envelope.
//!
//! Wire form: `0x04 || rlp([chain_id, nonce, max_priority_fee, max_fee, gas_limit, to, value,
//! data, access_list, authorization_list, y_parity, r, s])`. Only a single gas price is
//! modelled, so both fee caps carry it and [`SignedEnvelope::decode`] rejects envelopes where
//! they differ.

use alloy_primitives::{Address, Bytes, B256, U256};
use k256::ecdsa::SigningKey;
use tracing::debug;

use account7702_types::{
    AccountStateProvider, DelegationAuthorization, RecoveryConvention, Signature, StateError,
    SET_CODE_TX_TYPE,
};

use crate::authorization::authorization_from_rlp;
use crate::error::{DecodeError, Error, Result};
use crate::rlp::RlpItem;
use crate::signer::{recover_signer, sign_digest};
use crate::typed_data::keccak256;

const PAYLOAD_FIELDS: usize = 10;
const SIGNED_FIELDS: usize = PAYLOAD_FIELDS + 3;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessListItem {
    pub address: Address,
    pub storage_keys: Vec<B256>,
}

/// Fields shared with an ordinary access-list transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BaseTx {
    pub chain_id: u64,
    pub nonce: u64,
    /// Written as both the priority fee cap and the fee cap.
    pub gas_price: u128,
    pub gas_limit: u64,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub access_list: Vec<AccessListItem>,
}

impl BaseTx {
    /// Call to `to` at the chain id and transaction nonce `provider` reports for `sender`.
    /// Gas fields are left at zero.
    pub fn from_state<P: AccountStateProvider + ?Sized>(
        provider: &P,
        sender: Address,
        to: Address,
    ) -> core::result::Result<Self, StateError> {
        Ok(Self {
            chain_id: provider.chain_id()?,
            nonce: provider.transaction_nonce(sender)?,
            to,
            ..Default::default()
        })
    }
}

/// Envelope awaiting the sender's signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsignedEnvelope {
    base: BaseTx,
    authorizations: Vec<DelegationAuthorization>,
}

/// Signed envelope, ready for `eth_sendRawTransaction`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedEnvelope {
    base: BaseTx,
    authorizations: Vec<DelegationAuthorization>,
    signature: Signature,
    encoded: Vec<u8>,
    hash: B256,
}

impl UnsignedEnvelope {
    pub fn new(base: BaseTx, authorizations: Vec<DelegationAuthorization>) -> Result<Self> {
        if authorizations.is_empty() {
            return Err(Error::malformed(
                "authorizations",
                "a set-code transaction needs at least one authorization",
            ));
        }
        Ok(Self {
            base,
            authorizations,
        })
    }

    pub fn base(&self) -> &BaseTx {
        &self.base
    }

    pub fn authorizations(&self) -> &[DelegationAuthorization] {
        &self.authorizations
    }

    /// `keccak256(0x04 || rlp(unsigned fields))`.
    pub fn signing_hash(&self) -> B256 {
        let payload = RlpItem::List(payload_fields(&self.base, &self.authorizations));
        keccak256(typed(&payload))
    }

    /// Sign with the sender's key. Consumes the unsigned envelope.
    pub fn sign(self, key: &SigningKey) -> Result<SignedEnvelope> {
        let signing_hash = self.signing_hash();
        let signature = sign_digest(signing_hash.as_slice(), key, RecoveryConvention::Raw)?;

        let mut fields = payload_fields(&self.base, &self.authorizations);
        fields.extend([
            RlpItem::from(signature.v),
            RlpItem::from(signature.r),
            RlpItem::from(signature.s),
        ]);
        let encoded = typed(&RlpItem::List(fields));
        let hash = keccak256(&encoded);

        debug!(
            chain_id = self.base.chain_id,
            nonce = self.base.nonce,
            to = %self.base.to,
            authorizations = self.authorizations.len(),
            %signing_hash,
            tx_hash = %hash,
            "signed set-code envelope"
        );

        Ok(SignedEnvelope {
            base: self.base,
            authorizations: self.authorizations,
            signature,
            encoded,
            hash,
        })
    }
}

impl SignedEnvelope {
    /// Raw transaction bytes, type byte included.
    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.encoded))
    }

    /// Transaction hash: keccak of [`Self::encoded`].
    pub fn hash(&self) -> B256 {
        self.hash
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn base(&self) -> &BaseTx {
        &self.base
    }

    pub fn authorizations(&self) -> &[DelegationAuthorization] {
        &self.authorizations
    }

    pub fn signing_hash(&self) -> B256 {
        let payload = RlpItem::List(payload_fields(&self.base, &self.authorizations));
        keccak256(typed(&payload))
    }

    /// Address that signed the envelope.
    pub fn recover_sender(&self) -> Result<Address> {
        Ok(recover_signer(self.signing_hash().as_slice(), &self.signature)?)
    }

    /// Parse raw transaction bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        decode_signed(bytes).map_err(Error::decoding("envelope"))
    }
}

fn decode_signed(bytes: &[u8]) -> core::result::Result<SignedEnvelope, DecodeError> {
    let (&tx_type, body) = bytes.split_first().ok_or(DecodeError::Empty)?;
    if tx_type != SET_CODE_TX_TYPE {
        return Err(DecodeError::TxType(tx_type));
    }

    let item = RlpItem::decode_exact(body)?;
    let fields = item.as_list()?;
    if fields.len() != SIGNED_FIELDS {
        return Err(DecodeError::ItemCount {
            expected: SIGNED_FIELDS,
            actual: fields.len(),
        });
    }

    let max_priority_fee = fields[2].as_u128()?;
    let max_fee = fields[3].as_u128()?;
    if max_priority_fee != max_fee {
        return Err(DecodeError::Invalid("fee caps differ"));
    }

    let access_list = fields[8]
        .as_list()?
        .iter()
        .map(access_list_item_from_rlp)
        .collect::<core::result::Result<Vec<_>, _>>()?;
    let authorizations = fields[9]
        .as_list()?
        .iter()
        .map(authorization_from_rlp)
        .collect::<core::result::Result<Vec<_>, _>>()?;
    if authorizations.is_empty() {
        return Err(DecodeError::Invalid("empty authorization list"));
    }

    let v = fields[10].as_u8()?;
    if v > 1 {
        return Err(DecodeError::Invalid("y parity must be 0 or 1"));
    }

    let base = BaseTx {
        chain_id: fields[0].as_u64()?,
        nonce: fields[1].as_u64()?,
        gas_price: max_fee,
        gas_limit: fields[4].as_u64()?,
        to: fields[5].as_address()?,
        value: fields[6].as_u256()?,
        data: Bytes::copy_from_slice(fields[7].as_bytes()?),
        access_list,
    };

    Ok(SignedEnvelope {
        base,
        authorizations,
        signature: Signature {
            r: fields[11].as_u256()?,
            s: fields[12].as_u256()?,
            v,
        },
        encoded: bytes.to_vec(),
        hash: keccak256(bytes),
    })
}

fn access_list_item_from_rlp(
    item: &RlpItem,
) -> core::result::Result<AccessListItem, DecodeError> {
    let pair = item.as_list()?;
    if pair.len() != 2 {
        return Err(DecodeError::ItemCount {
            expected: 2,
            actual: pair.len(),
        });
    }
    let storage_keys = pair[1]
        .as_list()?
        .iter()
        .map(|key| {
            let bytes = key.as_bytes()?;
            if bytes.len() != 32 {
                return Err(DecodeError::Length {
                    field: "storage key",
                    expected: 32,
                    actual: bytes.len(),
                });
            }
            Ok(B256::from_slice(bytes))
        })
        .collect::<core::result::Result<Vec<_>, _>>()?;
    Ok(AccessListItem {
        address: pair[0].as_address()?,
        storage_keys,
    })
}

/// Unsigned fields, in wire order.
fn payload_fields(base: &BaseTx, authorizations: &[DelegationAuthorization]) -> Vec<RlpItem> {
    let access_list = base.access_list.iter().map(|entry| {
        RlpItem::list([
            entry.address.into(),
            RlpItem::list(entry.storage_keys.iter().map(|key| key.as_slice().into())),
        ])
    });

    vec![
        base.chain_id.into(),
        base.nonce.into(),
        base.gas_price.into(),
        base.gas_price.into(),
        base.gas_limit.into(),
        base.to.into(),
        base.value.into(),
        RlpItem::Bytes(base.data.to_vec()),
        RlpItem::list(access_list),
        RlpItem::list(authorizations.iter().map(RlpItem::from)),
    ]
}

fn typed(payload: &RlpItem) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + payload.length());
    out.push(SET_CODE_TX_TYPE);
    payload.encode(&mut out);
    out
}
