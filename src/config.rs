//! Strategy configuration.
//!
//! A YAML file chooses the strategy per entity type and may pin the node id:
//!
//! ```yaml
//! node_id: 17
//! default_strategy: time-ordered
//! entities:
//!   audit_event: random
//! ```

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{IdError, Result};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "IDMINT_CONFIG";
/// Environment variable pinning the node id, overriding the file.
pub const NODE_ID_ENV: &str = "IDMINT_NODE_ID";

/// Which generator an entity type uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Snowflake-style ids that sort by creation time.
    #[default]
    TimeOrdered,
    /// Unpredictable 53-bit ids.
    Random,
}

/// Parsed configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdConfig {
    /// Explicit node id; when absent the host address decides.
    pub node_id: Option<u16>,
    /// Strategy for entities not listed in `entities`.
    pub default_strategy: Strategy,
    /// Per-entity strategy overrides.
    pub entities: BTreeMap<String, Strategy>,
}

impl IdConfig {
    /// Reads a config file.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::ConfigRead`] or [`IdError::ConfigParse`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| IdError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        // An empty file is a valid, all-defaults config.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|source| IdError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds the effective config for a process.
    ///
    /// The file is `explicit` if given, else the path in `IDMINT_CONFIG`, else
    /// none (defaults). `IDMINT_NODE_ID`, when set, replaces the file's node id.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be loaded or `IDMINT_NODE_ID` is not an integer.
    pub fn from_env(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));
        let mut config = match path {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };
        if let Ok(raw) = env::var(NODE_ID_ENV) {
            config.node_id = Some(parse_node_id(&raw)?);
        }
        Ok(config)
    }

    /// Strategy configured for `entity`, falling back to the default.
    #[must_use]
    pub fn strategy_for(&self, entity: &str) -> Strategy {
        self.entities
            .get(entity)
            .copied()
            .unwrap_or(self.default_strategy)
    }
}

fn parse_node_id(raw: &str) -> Result<u16> {
    raw.trim().parse().map_err(|e| {
        IdError::Configuration(format!("{NODE_ID_ENV}={raw:?} is not a valid node id: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<IdConfig> {
        IdConfig::parse(yaml, Path::new("inline.yaml"))
    }

    #[test]
    fn parses_full_config() {
        let yaml = "node_id: 17\ndefault_strategy: random\nentities:\n  customer: time-ordered\n";
        let config = parse(yaml).unwrap();
        assert_eq!(config.node_id, Some(17));
        assert_eq!(config.default_strategy, Strategy::Random);
        assert_eq!(config.strategy_for("customer"), Strategy::TimeOrdered);
        assert_eq!(config.strategy_for("order"), Strategy::Random);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = parse("entities:\n  audit_event: random\n").unwrap();
        assert_eq!(config.node_id, None);
        assert_eq!(config.default_strategy, Strategy::TimeOrdered);
        assert_eq!(config.strategy_for("audit_event"), Strategy::Random);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(parse("  \n").unwrap(), IdConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse("nodeid: 3\n").unwrap_err();
        assert!(matches!(err, IdError::ConfigParse { .. }));
        assert!(err.to_string().contains("inline.yaml"));
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let err = parse("default_strategy: uuid\n").unwrap_err();
        assert!(matches!(err, IdError::ConfigParse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let path = Path::new("/definitely/not/here/idmint.yaml");
        let err = IdConfig::load(path).unwrap_err();
        assert!(matches!(err, IdError::ConfigRead { .. }));
    }

    #[test]
    fn node_id_env_value_must_be_numeric() {
        assert_eq!(parse_node_id(" 42 ").unwrap(), 42);
        let err = parse_node_id("pod-7").unwrap_err();
        assert!(matches!(err, IdError::Configuration(_)));
    }

    #[test]
    fn strategy_serializes_kebab_case() {
        let yaml = serde_yaml::to_string(&Strategy::TimeOrdered).unwrap();
        assert_eq!(yaml.trim(), "time-ordered");
    }
}
