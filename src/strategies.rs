//! Strategy selection for the persistence layer.
//!
//! The persistence layer asks [`IdStrategies`] for the generator of an entity
//! type and calls `generate` on it once per new record. Both generators are
//! built once and shared, so every entity using the time-ordered strategy in
//! a process draws from the same sequence.

use std::sync::Arc;

use tracing::debug;

use crate::config::{IdConfig, Strategy};
use crate::context::ServiceContext;
use crate::engine::{NodeIdentityResolver, RandomIdGenerator, TimeOrderedIdGenerator};
use crate::error::Result;
use crate::id::NodeId;
use crate::ports::IdGenerator;

/// Configured generators, keyed by strategy and entity type.
pub struct IdStrategies {
    config: IdConfig,
    node_id: NodeId,
    time_ordered: Arc<dyn IdGenerator>,
    random: Arc<dyn IdGenerator>,
}

impl IdStrategies {
    /// Builds both generators from the context's ports.
    ///
    /// # Errors
    ///
    /// Propagates node resolution and clock errors from the time-ordered
    /// generator; nothing is built if either fails.
    pub fn build(ctx: &ServiceContext, config: IdConfig) -> Result<Self> {
        let host = Arc::clone(&ctx.host);
        let configured = config.node_id;
        let resolver = NodeIdentityResolver::new(host).with_configured(configured);
        let clock = Arc::clone(&ctx.clock);
        let time_ordered = TimeOrderedIdGenerator::from_resolver(clock, &resolver)?;
        let node_id = time_ordered.node_id();
        let random = RandomIdGenerator::new(Arc::clone(&ctx.entropy));

        debug!(
            node_id = node_id.get(),
            default_strategy = ?config.default_strategy,
            entities = config.entities.len(),
            "id strategies built"
        );
        Ok(Self {
            config,
            node_id,
            time_ordered: Arc::new(time_ordered),
            random: Arc::new(random),
        })
    }

    /// Generator for a strategy.
    #[must_use]
    pub fn for_strategy(&self, strategy: Strategy) -> Arc<dyn IdGenerator> {
        match strategy {
            Strategy::TimeOrdered => Arc::clone(&self.time_ordered),
            Strategy::Random => Arc::clone(&self.random),
        }
    }

    /// Generator configured for `entity`, or the default strategy's.
    #[must_use]
    pub fn for_entity(&self, entity: &str) -> Arc<dyn IdGenerator> {
        self.for_strategy(self.config.strategy_for(entity))
    }

    /// Generator for the default strategy.
    #[must_use]
    pub fn default_generator(&self) -> Arc<dyn IdGenerator> {
        self.for_strategy(self.config.default_strategy)
    }

    /// Node id embedded in time-ordered ids.
    #[must_use]
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// The configuration these strategies were built from.
    #[must_use]
    pub fn config(&self) -> &IdConfig {
        &self.config
    }
}
