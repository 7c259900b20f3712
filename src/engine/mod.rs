//! The id-generation engine.
//!
//! Two strategies implement [`crate::ports::IdGenerator`]:
//! [`TimeOrderedIdGenerator`] for roughly sortable Snowflake-style ids and
//! [`RandomIdGenerator`] for unpredictable 53-bit ids. The time-ordered
//! strategy embeds a node id derived once by [`NodeIdentityResolver`].

pub mod node;
pub mod random;
pub mod snowflake;

pub use node::{NodeIdentity, NodeIdentityResolver, NodeSource};
pub use random::RandomIdGenerator;
pub use snowflake::TimeOrderedIdGenerator;
