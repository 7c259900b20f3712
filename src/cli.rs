//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::Strategy;

/// Top-level CLI parser for `idmint`.
#[derive(Debug, Parser)]
#[command(name = "idmint", version, about = "Mint and inspect surrogate ids")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Mint new ids.
    Generate(GenerateArgs),
    /// Split a time-ordered id into timestamp, node and sequence.
    Decode {
        /// Decimal id to decode.
        id: String,
        /// Print the fields as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show the node id this host resolves to.
    Node {
        /// YAML config file (defaults to `$IDMINT_CONFIG`).
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Arguments for `idmint generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Strategy to use; wins over `--entity`.
    #[arg(long, value_enum)]
    pub strategy: Option<Strategy>,
    /// Entity type whose configured strategy to use.
    #[arg(long)]
    pub entity: Option<String>,
    /// Number of ids to mint.
    #[arg(long, short = 'n', default_value_t = 1)]
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,
    /// Output encoding.
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,
    /// YAML config file (defaults to `$IDMINT_CONFIG`).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// How `generate` prints ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One decimal id per line.
    Plain,
    /// A JSON array of numbers.
    Json,
    /// A JSON array of decimal strings, for 53-bit-limited consumers.
    JsonString,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, OutputFormat};
    use crate::config::Strategy;
    use clap::Parser;

    #[test]
    fn parses_generate_defaults() {
        let cli = Cli::parse_from(["idmint", "generate"]);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate")
        };
        assert_eq!(args.count, 1);
        assert_eq!(args.format, OutputFormat::Plain);
        assert!(args.strategy.is_none());
    }

    #[test]
    fn parses_generate_options() {
        let cli = Cli::parse_from([
            "idmint",
            "generate",
            "--strategy",
            "random",
            "-n",
            "5",
            "--format",
            "json-string",
        ]);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate")
        };
        assert_eq!(args.strategy, Some(Strategy::Random));
        assert_eq!(args.count, 5);
        assert_eq!(args.format, OutputFormat::JsonString);
    }

    #[test]
    fn rejects_zero_count() {
        let result = Cli::try_parse_from(["idmint", "generate", "--count", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_decode_subcommand() {
        let cli = Cli::parse_from(["idmint", "decode", "4214784", "--json"]);
        let Command::Decode { id, json } = cli.command else {
            panic!("expected decode")
        };
        assert_eq!(id, "4214784");
        assert!(json);
    }

    #[test]
    fn parses_node_subcommand() {
        let cli = Cli::parse_from(["idmint", "node"]);
        assert!(matches!(cli.command, Command::Node { config: None }));
    }
}
