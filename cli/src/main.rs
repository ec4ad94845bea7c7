// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # rooch-tx
//!
//! Entry point for the `rooch-tx` binary. Parses CLI arguments, initializes
//! logging, and runs one offline transaction command. Results go to stdout
//! as JSON; logs go to stderr.
//!
//! - `build`   — unsigned payload bytes and hash
//! - `sign`    — signed wire bytes, ready for `sendRawTransaction`
//! - `decode`  — wire bytes back to a readable summary
//! - `keygen`  — fresh keypair and its derived address
//! - `version` — print build version information

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{json, Value};

use rooch_tx::codec::UintWidth;
use rooch_tx::config::chain_name;
use rooch_tx::crypto::{from_hex_literal, to_hex_literal, Ed25519Keypair, Secp256k1Keypair};
use rooch_tx::transaction::{
    CallFunctionArgs, MoveAction, SignatureScheme, Transaction, TransactionSigner,
};
use rooch_tx::types::{AccountAddress, TypeTag};

use cli::{BuildArgs, CallArgs, Commands, DecodeArgs, KeygenArgs, RoochTxCli, SignArgs};
use logging::LogFormat;

fn main() -> Result<()> {
    let cli = RoochTxCli::parse();
    logging::init_logging(&cli.log_level, LogFormat::from_str_lossy(&cli.log_format));

    let output = match cli.command {
        Commands::Build(args) => build(args)?,
        Commands::Sign(args) => sign(args)?,
        Commands::Decode(args) => decode(args)?,
        Commands::Keygen(args) => keygen(args),
        Commands::Version => {
            print_version();
            return Ok(());
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Turns the shared call flags into a transaction with the action set.
///
/// Sender, chain id, and sequence number are left for the caller so each
/// subcommand decides where the sender comes from.
fn start_transaction(call: &CallArgs) -> Result<Transaction> {
    let type_args = call
        .type_args
        .iter()
        .map(|s| {
            s.parse::<TypeTag>()
                .with_context(|| format!("invalid --type-arg '{s}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    let args = call
        .args
        .iter()
        .map(|s| from_hex_literal(s).with_context(|| format!("invalid --arg hex '{s}'")))
        .collect::<Result<Vec<_>>>()?;

    let mut call_args = CallFunctionArgs::target(call.function.as_str())
        .type_args(type_args)
        .args(args);
    if let Some(max_gas) = call.max_gas {
        call_args = call_args.max_gas(UintWidth::U64.narrow_u64(max_gas).context("--max-gas")?);
    }
    if let Some(info) = &call.info {
        call_args = call_args.info(info.as_str());
    }

    let mut tx = Transaction::new();
    tx.call_function(call_args)
        .with_context(|| format!("invalid --function '{}'", call.function))?;
    Ok(tx)
}

fn fill_metadata(tx: &mut Transaction, call: &CallArgs, sender: AccountAddress) -> Result<()> {
    let chain_id = UintWidth::U64
        .narrow_u64(call.chain_id)
        .context("--chain-id")?;
    let sequence_number = UintWidth::U64
        .narrow_u64(call.sequence_number)
        .context("--sequence-number")?;

    tx.set_sender(sender)?;
    tx.set_chain_id(chain_id)?;
    tx.set_seq_number(sequence_number)?;
    tracing::info!(
        sender = %sender.to_short_hex(),
        chain = %chain_name(chain_id),
        sequence_number,
        "transaction metadata set"
    );
    Ok(())
}

fn parse_address(s: &str) -> Result<AccountAddress> {
    s.parse::<AccountAddress>()
        .with_context(|| format!("invalid sender address '{s}'"))
}

fn build(args: BuildArgs) -> Result<Value> {
    let mut tx = start_transaction(&args.call)?;
    fill_metadata(&mut tx, &args.call, parse_address(&args.sender)?)?;

    let data = tx.encode_data()?;
    let hash = tx.hash_data()?;
    Ok(json!({
        "data_hex": to_hex_literal(&data),
        "hash": to_hex_literal(&hash),
        "info": tx.info(),
    }))
}

fn load_signer(scheme: SignatureScheme, secret_hex: &str) -> Result<Box<dyn TransactionSigner>> {
    let signer: Box<dyn TransactionSigner> = match scheme {
        SignatureScheme::Ed25519 => Box::new(Ed25519Keypair::from_hex(secret_hex)?),
        SignatureScheme::Secp256k1 => Box::new(Secp256k1Keypair::from_hex(secret_hex)?),
    };
    Ok(signer)
}

fn sign(args: SignArgs) -> Result<Value> {
    let signer = load_signer(args.scheme, &args.secret_key).context("--secret-key")?;
    let sender = match &args.sender {
        Some(s) => parse_address(s)?,
        None => signer.address(),
    };

    let mut tx = start_transaction(&args.call)?;
    fill_metadata(&mut tx, &args.call, sender)?;
    tx.sign_with(signer.as_ref())?;
    tx.verify_auth().context("freshly signed transaction failed to verify")?;

    let encoded = tx.into_encoded()?;
    tracing::info!(len = encoded.len(), "transaction signed");
    Ok(json!({
        "tx_hex": encoded.to_hex(),
        "hash": to_hex_literal(encoded.hash()),
        "sender": sender.to_hex_literal(),
    }))
}

fn decode(args: DecodeArgs) -> Result<Value> {
    let bytes = from_hex_literal(args.hex.trim()).context("transaction is not valid hex")?;
    let tx = Transaction::decode(&bytes).context("failed to decode transaction")?;

    let data = tx
        .data()
        .context("decoded transaction has no payload")?;
    let auth = tx.auth().context("decoded transaction has no authenticator")?;
    let signature_valid = tx.verify_auth().is_ok();

    let action = match data.action() {
        MoveAction::Function(call) => json!({
            "kind": "function",
            "function": call.function_id.to_string(),
            "type_args": call.ty_args.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "args": call.args.iter().map(|a| to_hex_literal(a)).collect::<Vec<_>>(),
        }),
        MoveAction::Script(call) => json!({
            "kind": "script",
            "code_len": call.code.len(),
            "type_args": call.ty_args.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "args": call.args.iter().map(|a| to_hex_literal(a)).collect::<Vec<_>>(),
        }),
        MoveAction::ModuleBundle(modules) => json!({
            "kind": "module_bundle",
            "modules": modules.len(),
        }),
    };

    Ok(json!({
        "hash": to_hex_literal(&tx.hash_data()?),
        "action": action,
        "sender": data.sender().map(|a| a.to_hex_literal()),
        "chain_id": data.chain_id(),
        "chain": data.chain_id().map(chain_name),
        "sequence_number": data.sequence_number(),
        "max_gas": data.max_gas(),
        "authenticator": {
            "scheme": auth.scheme().to_string(),
            "public_key": to_hex_literal(auth.public_key()),
            "signature": to_hex_literal(auth.signature()),
            "signer_address": auth.signer_address().to_hex_literal(),
            "valid": signature_valid,
        },
    }))
}

fn keygen(args: KeygenArgs) -> Value {
    let (public_key, secret_key, address) = match args.scheme {
        SignatureScheme::Ed25519 => {
            let kp = Ed25519Keypair::generate();
            (
                kp.public_key_bytes().to_vec(),
                kp.secret_key_bytes(),
                kp.address(),
            )
        }
        SignatureScheme::Secp256k1 => {
            let kp = Secp256k1Keypair::generate();
            (
                kp.public_key_bytes().to_vec(),
                kp.secret_key_bytes(),
                kp.address(),
            )
        }
    };
    json!({
        "scheme": args.scheme.to_string(),
        "public_key": to_hex_literal(&public_key),
        "secret_key": to_hex_literal(&secret_key),
        "address": address.to_hex_literal(),
        "bech32": address.to_bech32(),
    })
}

fn print_version() {
    println!("rooch-tx {}", env!("CARGO_PKG_VERSION"));
    println!("hash:     {}", rooch_tx::config::HASH_FUNCTION);
    println!("schemes:  Ed25519, Secp256k1");
}
