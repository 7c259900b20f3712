//! Command dispatch and handlers.

pub mod decode;
pub mod generate;
pub mod node;

use crate::cli::Command;
use crate::context::ServiceContext;
use crate::error::Result;

/// Dispatch a parsed command to its handler and print its output.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let result = dispatch_with_context(command, &ServiceContext::live());
    let output = result.map_err(|e| e.to_string())?;
    print!("{output}");
    Ok(())
}

/// Run a command against the given service context and return its output.
///
/// # Errors
///
/// Returns the handler's error.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<String> {
    match command {
        Command::Generate(args) => generate::run(ctx, args),
        Command::Decode { id, json } => decode::run(id, *json),
        Command::Node { config } => node::run(ctx, config.as_deref()),
    }
}
