use account7702_encoder::{
    action_digest, address_of, authorization_to_hex, build_authorization, decode_authorization,
    execute_calldata, executor_terms_digest, recover_authority, resolve_action_nonce,
    sign_action, sign_executor_terms, spin_calldata, Action, BaseTx, DelegationAuthorization,
    Eip712Domain, ExecutorTerms, SigningKey, StaticAccountState, UnsignedEnvelope,
};
use alloy_primitives::{Bytes, B256, U256};
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::cli::{ActionArgs, AuthorizeArgs, EnvelopeArgs, TermsArgs};

#[derive(Serialize)]
struct AuthorizationOutput {
    authorization: String,
    chain_id: String,
    implementation: String,
    nonce: u64,
    y_parity: u8,
    r: String,
    s: String,
    authority: String,
}

impl AuthorizationOutput {
    fn new(authorization: &DelegationAuthorization) -> Result<Self> {
        let authority =
            recover_authority(authorization).context("failed recovering authorization signer")?;
        Ok(Self {
            authorization: authorization_to_hex(authorization),
            chain_id: authorization.chain_id.to_string(),
            implementation: authorization.address.to_string(),
            nonce: authorization.nonce,
            y_parity: authorization.y_parity,
            r: B256::from(authorization.r.to_be_bytes::<32>()).to_string(),
            s: B256::from(authorization.s.to_be_bytes::<32>()).to_string(),
            authority: authority.to_string(),
        })
    }
}

pub fn authorize(args: &AuthorizeArgs, key: &SigningKey) -> Result<Value> {
    let authorization = build_authorization(args.chain_id, args.implementation, args.nonce, key)
        .context("failed signing authorization")?;
    info!(implementation = %args.implementation, nonce = args.nonce, "authorization signed");
    Ok(serde_json::to_value(AuthorizationOutput::new(&authorization)?)?)
}

pub fn decode(authorization: &str) -> Result<Value> {
    let authorization = decode_authorization(authorization)?;
    Ok(serde_json::to_value(AuthorizationOutput::new(&authorization)?)?)
}

/// Sign a single action calling `args.target` with `calldata`.
pub fn sign(args: &ActionArgs, calldata: Bytes, key: &SigningKey) -> Result<Value> {
    let state = match args.last_action_nonce {
        Some(last) => StaticAccountState::new(args.chain_id).with_last_action_nonce(last),
        None => StaticAccountState::new(args.chain_id),
    };
    let nonce = resolve_action_nonce(args.action_nonce, &state, args.account)
        .map_err(|e| anyhow!("cannot determine action nonce: {e}"))?;

    let action = Action {
        target: args.target,
        data: calldata,
        value: args.value,
        nonce,
        expiration: args.expiration,
        fee_token: args.fee_token,
        fee_value: args.fee_value,
        is_basis_points: args.is_basis_points,
    };
    let domain = Eip712Domain::account_system(U256::from(args.chain_id), args.account)
        .with_address_encoding(args.address_encoding.into());

    let digest = action_digest(&action, &domain)?;
    let signed = sign_action(&action, &domain, key).context("failed signing action")?;
    let calldata = execute_calldata(std::slice::from_ref(&signed));
    info!(account = %args.account, %nonce, "action signed");

    Ok(json!({
        "account": args.account.to_string(),
        "signer": address_of(key).to_string(),
        "action": {
            "target": action.target.to_string(),
            "data": action.data.to_string(),
            "value": action.value.to_string(),
            "nonce": action.nonce.to_string(),
            "expiration": action.expiration.to_string(),
            "fee_token": action.fee_token.to_string(),
            "fee_value": action.fee_value.to_string(),
            "is_basis_points": action.is_basis_points,
        },
        "digest": digest.to_string(),
        "signature": format!("0x{}", hex::encode(signed.signature_bytes())),
        "execute_calldata": format!("0x{}", hex::encode(calldata)),
    }))
}

pub fn spin(args: &ActionArgs, boost: bool, key: &SigningKey) -> Result<Value> {
    sign(args, spin_calldata(boost).into(), key)
}

pub fn terms(args: &TermsArgs, key: &SigningKey) -> Result<Value> {
    let terms = ExecutorTerms {
        reward_tokens: args.reward_tokens.clone(),
        basis_points: args.basis_points.clone(),
    };
    let domain = Eip712Domain::executor_terms(U256::from(args.chain_id), args.account)
        .with_address_encoding(args.address_encoding.into());

    let digest = executor_terms_digest(&terms, &domain)?;
    let signed = sign_executor_terms(&terms, &domain, key).context("failed signing terms")?;
    info!(account = %args.account, %digest, "executor terms signed");

    Ok(json!({
        "account": args.account.to_string(),
        "signer": address_of(key).to_string(),
        "reward_tokens": terms.reward_tokens.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "basis_points": terms.basis_points,
        "digest": digest.to_string(),
        "signature": format!("0x{}", hex::encode(signed.signature_bytes())),
    }))
}

pub fn envelope(args: &EnvelopeArgs, key: &SigningKey) -> Result<Value> {
    let authorizations = args
        .authorizations
        .iter()
        .map(|raw| decode_authorization(raw).with_context(|| format!("bad authorization {raw}")))
        .collect::<Result<Vec<_>>>()?;

    let state = StaticAccountState::new(args.chain_id).with_transaction_nonce(args.nonce);
    let base = BaseTx::from_state(&state, address_of(key), args.to)
        .map_err(|e| anyhow!("cannot determine sender state: {e}"))?;
    let base = BaseTx {
        gas_price: args.gas_price,
        gas_limit: args.gas_limit,
        value: args.value,
        data: args.data.clone(),
        ..base
    };
    let signed = UnsignedEnvelope::new(base, authorizations)?
        .sign(key)
        .context("failed signing envelope")?;
    let sender = signed.recover_sender()?;
    info!(tx_hash = %signed.hash(), %sender, "envelope signed");

    Ok(json!({
        "raw_transaction": signed.to_hex(),
        "hash": signed.hash().to_string(),
        "sender": sender.to_string(),
        "authorizations": signed.authorizations().len(),
    }))
}
