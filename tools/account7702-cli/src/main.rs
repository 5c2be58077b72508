use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod keys;

use cli::{Cli, Command};
use keys::load_signing_key;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let output = run(&cli)?;

    let serialised = serde_json::to_string_pretty(&output).context("failed serialising output")?;
    if let Some(ref path) = cli.output {
        write_json_atomic(path, &serialised)?;
    }
    println!("{serialised}");
    Ok(())
}

fn run(cli: &Cli) -> Result<Value> {
    match &cli.command {
        Command::Authorize(args) => commands::authorize(args, &load_signing_key(&cli.key)?),
        Command::SignAction(args) => {
            commands::sign(&args.action, args.calldata.clone(), &load_signing_key(&cli.key)?)
        }
        Command::Spin(args) => {
            commands::spin(&args.action, args.boost, &load_signing_key(&cli.key)?)
        }
        Command::SignTerms(args) => commands::terms(args, &load_signing_key(&cli.key)?),
        Command::Envelope(args) => commands::envelope(args, &load_signing_key(&cli.key)?),
        Command::DecodeAuthorization { authorization } => commands::decode(authorization),
    }
}

fn write_json_atomic(path: &Path, serialised: &str) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    if !parent.as_os_str().is_empty() && !parent.exists() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating directory {}", parent.display()))?;
    }

    let tmp_path = tmp_path_for(path);
    fs::write(&tmp_path, serialised.as_bytes())
        .with_context(|| format!("failed writing temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("failed replacing {}", path.display()))?;
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
