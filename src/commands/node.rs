//! `idmint node` command.

use std::path::Path;
use std::sync::Arc;

use crate::config::IdConfig;
use crate::context::ServiceContext;
use crate::engine::{NodeIdentity, NodeIdentityResolver};
use crate::error::Result;

/// Execute the `node` command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the node id cannot be
/// resolved.
pub fn run(ctx: &ServiceContext, config: Option<&Path>) -> Result<String> {
    let config = IdConfig::from_env(config)?;
    let NodeIdentity { node_id, source } = NodeIdentityResolver::new(Arc::clone(&ctx.host))
        .with_configured(config.node_id)
        .describe()?;
    Ok(format!("node_id: {node_id}\nsource:  {source}\n"))
}
