//! Coordination-free surrogate id generation.
//!
//! Two strategies mint ids for new records without talking to any other
//! process:
//!
//! - [`engine::TimeOrderedIdGenerator`] packs a millisecond timestamp, a
//!   10-bit node id, and a 12-bit sequence into one 63-bit integer.
//! - [`engine::RandomIdGenerator`] draws 53-bit ids from a CSPRNG.
//!
//! Both implement [`ports::IdGenerator`]; [`strategies::IdStrategies`] picks
//! one per entity type from [`config::IdConfig`]. The `idmint` binary wraps
//! the library for minting and decoding ids from a shell.
//!
//! ```
//! use std::sync::Arc;
//!
//! use idmint::adapters::live::LiveClock;
//! use idmint::engine::TimeOrderedIdGenerator;
//! use idmint::id::{NodeId, SnowflakeParts};
//! use idmint::ports::IdGenerator;
//!
//! let generator = TimeOrderedIdGenerator::new(Arc::new(LiveClock), NodeId::new(7)?)?;
//! let first = generator.generate();
//! let second = generator.generate();
//! assert!(second > first);
//! assert_eq!(SnowflakeParts::decompose(second).node_id.get(), 7);
//! # Ok::<(), idmint::error::IdError>(())
//! ```

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod id;
pub mod ports;
pub mod strategies;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// `--help` and `--version` print to stdout and succeed.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli.command)
}
