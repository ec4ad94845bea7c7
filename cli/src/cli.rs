//! # CLI Interface
//!
//! Defines the command-line argument structure for `rooch-tx` using
//! `clap` derive. Subcommands: `build`, `sign`, `decode`, `keygen`, and
//! `version`.
//!
//! Numeric inputs are taken as `u128` and narrowed by the caller, so an
//! out-of-range value is reported as the codec's overflow error rather than
//! a generic parse failure.

use clap::{Args, Parser, Subcommand};

use rooch_tx::crypto::SignatureScheme;

/// Build, sign, and inspect Rooch transactions offline.
#[derive(Parser, Debug)]
#[command(
    name = "rooch-tx",
    about = "Offline transaction builder for Rooch",
    version,
    propagate_version = true
)]
pub struct RoochTxCli {
    /// Log format written to stderr: "pretty" or "json".
    #[arg(long, global = true, env = "ROOCH_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Default log filter when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build an unsigned function-call transaction and print its payload and hash.
    Build(BuildArgs),
    /// Build a function-call transaction, sign it with a local key, and print the wire bytes.
    Sign(SignArgs),
    /// Decode an encoded transaction and print it as JSON.
    Decode(DecodeArgs),
    /// Generate a fresh keypair.
    Keygen(KeygenArgs),
    /// Print version information and exit.
    Version,
}

/// Inputs shared by `build` and `sign`.
#[derive(Args, Debug)]
pub struct CallArgs {
    /// Call target, `<address>::<module>::<function>`.
    #[arg(long, short = 'f')]
    pub function: String,

    /// Type argument, e.g. `0x3::gas_coin::RGas`. Repeatable.
    #[arg(long = "type-arg")]
    pub type_args: Vec<String>,

    /// Hex-encoded, already-serialized argument. Repeatable.
    #[arg(long = "arg")]
    pub args: Vec<String>,

    /// Chain id.
    #[arg(long, env = "ROOCH_CHAIN_ID", default_value_t = 4)]
    pub chain_id: u128,

    /// Sender's sequence number.
    #[arg(long, short = 'n', default_value_t = 0)]
    pub sequence_number: u128,

    /// Gas ceiling. Defaults to the library default.
    #[arg(long)]
    pub max_gas: Option<u128>,

    /// Free-form label; not encoded.
    #[arg(long)]
    pub info: Option<String>,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub call: CallArgs,

    /// Sender address (hex, named, or bech32).
    #[arg(long, short = 's', env = "ROOCH_SENDER")]
    pub sender: String,
}

#[derive(Args, Debug)]
pub struct SignArgs {
    #[command(flatten)]
    pub call: CallArgs,

    /// Sender address. Defaults to the address derived from the signing key.
    #[arg(long, short = 's', env = "ROOCH_SENDER")]
    pub sender: Option<String>,

    /// Hex-encoded 32-byte secret key.
    ///
    /// Prefer the environment variable over the flag so the key stays out
    /// of shell history.
    #[arg(long, env = "ROOCH_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Signature scheme: ed25519 or secp256k1.
    #[arg(long, default_value = "ed25519")]
    pub scheme: SignatureScheme,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Hex-encoded transaction, `0x` optional.
    pub hex: String,
}

#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Signature scheme: ed25519 or secp256k1.
    #[arg(long, default_value = "ed25519")]
    pub scheme: SignatureScheme,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        RoochTxCli::command().debug_assert();
    }

    #[test]
    fn parses_build_with_repeated_args() {
        let cli = RoochTxCli::try_parse_from([
            "rooch-tx",
            "build",
            "--function",
            "std::example::run",
            "--arg",
            "0x0102",
            "--arg",
            "ff",
            "--sender",
            "0xABCD",
            "--chain-id",
            "4",
        ])
        .unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.call.args, vec!["0x0102", "ff"]);
                assert_eq!(args.call.chain_id, 4);
                assert_eq!(args.call.sequence_number, 0);
                assert_eq!(args.sender, "0xABCD");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn accepts_values_wider_than_u64() {
        let cli = RoochTxCli::try_parse_from([
            "rooch-tx",
            "build",
            "-f",
            "std::example::run",
            "-s",
            "0x1",
            "-n",
            "18446744073709551616",
        ])
        .unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.call.sequence_number, u64::MAX as u128 + 1)
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn scheme_parses_case_insensitively() {
        let cli = RoochTxCli::try_parse_from(["rooch-tx", "keygen", "--scheme", "Secp256k1"])
            .unwrap();
        match cli.command {
            Commands::Keygen(args) => assert_eq!(args.scheme, SignatureScheme::Secp256k1),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
