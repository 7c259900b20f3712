//! `idmint generate` command.

use serde::Serialize;

use crate::cli::{GenerateArgs, OutputFormat};
use crate::config::IdConfig;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::id::{as_string, GeneratedId};
use crate::strategies::IdStrategies;

#[derive(Serialize)]
#[serde(transparent)]
struct StringId(#[serde(with = "as_string")] GeneratedId);

/// Execute the `generate` command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the generators cannot
/// be built.
pub fn run(ctx: &ServiceContext, args: &GenerateArgs) -> Result<String> {
    let config = IdConfig::from_env(args.config.as_deref())?;
    let strategies = IdStrategies::build(ctx, config)?;

    let generator = match (args.strategy, args.entity.as_deref()) {
        (Some(strategy), _) => strategies.for_strategy(strategy),
        (None, Some(entity)) => strategies.for_entity(entity),
        (None, None) => strategies.default_generator(),
    };

    let ids: Vec<GeneratedId> = (0..args.count).map(|_| generator.generate()).collect();
    render(&ids, args.format)
}

fn render(ids: &[GeneratedId], format: OutputFormat) -> Result<String> {
    let mut out = match format {
        OutputFormat::Plain => ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string(ids)?,
        OutputFormat::JsonString => {
            let strings: Vec<StringId> = ids.iter().copied().map(StringId).collect();
            serde_json::to_string(&strings)?
        }
    };
    out.push('\n');
    Ok(out)
}
