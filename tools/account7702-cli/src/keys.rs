use std::fs;

use account7702_encoder::{parse_private_key, SigningKey};
use anyhow::{anyhow, Context, Result};

use crate::cli::KeyArgs;

/// Load the signer's key from `--private-key-path` or `--private-key`.
pub fn load_signing_key(args: &KeyArgs) -> Result<SigningKey> {
    let raw = if let Some(ref path) = args.private_key_path {
        fs::read_to_string(path)
            .with_context(|| format!("failed reading private key from {}", path.display()))?
    } else if let Some(ref key) = args.private_key {
        key.clone()
    } else {
        return Err(anyhow!(
            "missing signing key: provide --private-key-path or --private-key \
             (or set PRIV_KEY_PATH/PKEY)"
        ));
    };

    parse_private_key(raw.trim()).context("invalid private key")
}
