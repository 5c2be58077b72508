use std::path::PathBuf;

use account7702_encoder::decode_hex;
use account7702_types::AddressEncoding;
use alloy_primitives::{Address, Bytes, U256};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

/// Sign EIP-7702 delegations, account actions and set-code transactions.
///
/// Output is JSON on stdout. Set `RUST_LOG=debug` to see what was hashed and signed.
#[derive(Parser, Debug)]
#[command(name = "account7702", author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub key: KeyArgs,

    /// Also write the JSON output to this file.
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone, Default)]
pub struct KeyArgs {
    /// Path to a file containing the signer's private key.
    #[arg(long, env = "PRIV_KEY_PATH", conflicts_with = "private_key", global = true)]
    pub private_key_path: Option<PathBuf>,

    /// Private key (hex string, 0x...).
    #[arg(long, env = "PKEY", conflicts_with = "private_key_path", global = true)]
    pub private_key: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign an authorization delegating the signer's account to an implementation.
    Authorize(AuthorizeArgs),
    /// Sign an action for a delegated account and pack it into `execute` calldata.
    SignAction(SignActionArgs),
    /// Sign an action that calls `spin(bool)` on a DegenGambit contract.
    Spin(SpinArgs),
    /// Sign the executor's compensation terms for a delegated account.
    SignTerms(TermsArgs),
    /// Build and sign a set-code transaction carrying signed authorizations.
    Envelope(EnvelopeArgs),
    /// Decode a hex authorization and recover who signed it.
    DecodeAuthorization {
        /// RLP hex, with or without 0x.
        authorization: String,
    },
}

#[derive(Args, Debug)]
pub struct AuthorizeArgs {
    /// Contract the account will delegate its code to.
    #[arg(long)]
    pub implementation: Address,

    /// `0` authorizes the delegation on every chain.
    #[arg(long)]
    pub chain_id: U256,

    /// Current transaction nonce of the signer's account.
    #[arg(long)]
    pub nonce: u64,
}

#[derive(Args, Debug)]
pub struct ActionArgs {
    /// Delegated account that verifies and executes the action.
    #[arg(long)]
    pub account: Address,

    /// Contract the account calls.
    #[arg(long)]
    pub target: Address,

    #[arg(long)]
    pub chain_id: u64,

    /// Native value forwarded with the call, in wei.
    #[arg(long, default_value = "0")]
    pub value: U256,

    /// Action nonce to sign with.
    #[arg(
        long,
        required_unless_present = "last_action_nonce",
        conflicts_with = "last_action_nonce"
    )]
    pub action_nonce: Option<U256>,

    /// Last action nonce the account recorded; the action is signed with the next one.
    #[arg(long)]
    pub last_action_nonce: Option<U256>,

    /// Expiry timestamp, 0 for none.
    #[arg(long, default_value = "0")]
    pub expiration: U256,

    #[arg(long, default_value = "0x0000000000000000000000000000000000000000")]
    pub fee_token: Address,

    #[arg(long, default_value = "0")]
    pub fee_value: U256,

    /// Treat `--fee-value` as basis points of the call value.
    #[arg(long)]
    pub is_basis_points: bool,

    /// Layout of `verifyingContract` in the domain separator.
    #[arg(long, value_enum, default_value_t = DomainAddress::Padded)]
    pub address_encoding: DomainAddress,
}

#[derive(Args, Debug)]
pub struct SignActionArgs {
    #[command(flatten)]
    pub action: ActionArgs,

    /// Calldata forwarded to the target, as hex.
    #[arg(long, default_value = "0x", value_parser = parse_hex_bytes)]
    pub calldata: Bytes,
}

#[derive(Args, Debug)]
pub struct SpinArgs {
    #[command(flatten)]
    pub action: ActionArgs,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub boost: bool,
}

#[derive(Args, Debug)]
pub struct EnvelopeArgs {
    /// Signed authorization hex. Repeat for several.
    #[arg(long = "authorization", required = true)]
    pub authorizations: Vec<String>,

    #[arg(long)]
    pub chain_id: u64,

    /// Transaction nonce of the sender.
    #[arg(long)]
    pub nonce: u64,

    /// Gas price in wei, used as both fee caps.
    #[arg(long)]
    pub gas_price: u128,

    #[arg(long, default_value_t = 5_000_000)]
    pub gas_limit: u64,

    #[arg(long)]
    pub to: Address,

    #[arg(long, default_value = "0")]
    pub value: U256,

    #[arg(long, default_value = "0x", value_parser = parse_hex_bytes)]
    pub data: Bytes,
}

#[derive(Args, Debug)]
pub struct TermsArgs {
    /// Delegated account the terms are offered to.
    #[arg(long)]
    pub account: Address,

    #[arg(long)]
    pub chain_id: u64,

    /// Token the reward is paid in. Repeat for several, paired with `--basis-points`.
    #[arg(long = "reward-token")]
    pub reward_tokens: Vec<Address>,

    #[arg(long = "basis-points")]
    pub basis_points: Vec<u16>,

    #[arg(long, value_enum, default_value_t = DomainAddress::Padded)]
    pub address_encoding: DomainAddress,
}

/// Hex with or without `0x`; an empty string or a bare `0x` is empty calldata.
fn parse_hex_bytes(input: &str) -> Result<Bytes, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed == "0x" {
        return Ok(Bytes::new());
    }
    decode_hex(trimmed).map(Bytes::from).map_err(|e| e.to_string())
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainAddress {
    Padded,
    Raw,
}

impl From<DomainAddress> for AddressEncoding {
    fn from(value: DomainAddress) -> Self {
        match value {
            DomainAddress::Padded => AddressEncoding::Padded,
            DomainAddress::Raw => AddressEncoding::Raw,
        }
    }
}

/// Parse `args` with `PKEY` and `PRIV_KEY_PATH` ignored, so tests see argv only.
#[cfg(test)]
pub(crate) fn parse_without_env(args: &[&str]) -> Result<Cli, clap::Error> {
    use clap::{CommandFactory, FromArgMatches};

    let command = Cli::command()
        .mut_arg("private_key", |arg| arg.env(None::<&str>))
        .mut_arg("private_key_path", |arg| arg.env(None::<&str>));
    let argv = std::iter::once("account7702").chain(args.iter().copied());
    Cli::from_arg_matches(&command.try_get_matches_from(argv)?)
}
