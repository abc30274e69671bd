//! Source-group document model.
//!
//! Source groups are maintained by external tooling and are **read-only**
//! input here: this core never mutates `source-groups.yaml`. Server and
//! service entries are open mappings (their connection attributes vary per
//! database engine), so they are kept as ordered `IndexMap`s over YAML
//! values rather than closed structs.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// The whole source document, in file order. Document order is semantic:
/// the first group is the default link target for standalone sink groups.
pub type SourceGroups = IndexMap<String, SourceGroup>;

// ── SourcePattern ─────────────────────────────────────────────────────────────

/// How databases map to logical services in a source group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourcePattern {
    /// One database per tenant customer. Tenant-keyed databases do not map
    /// 1:1 to logical services, so these groups never support inheritance.
    DbPerTenant,
    /// One database serves many logical services.
    DbShared,
}

impl SourcePattern {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DbPerTenant => "db-per-tenant",
            Self::DbShared => "db-shared",
        }
    }
}

impl fmt::Display for SourcePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourcePattern {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "db-per-tenant" => Ok(Self::DbPerTenant),
            "db-shared" => Ok(Self::DbShared),
            other => Err(DomainError::InvalidPattern {
                pattern: other.to_string(),
            }),
        }
    }
}

// ── SourceGroup ───────────────────────────────────────────────────────────────

/// One entry in the source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceGroup {
    pub pattern: SourcePattern,
    /// Database engine tag (mssql, postgres, ...). Open string: new engines
    /// appear without a schema change.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// Drives kafka-topology deduction for inheriting sink groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_group_type: Option<SourcePattern>,
    #[serde(default)]
    pub environment_aware: bool,
    #[serde(default)]
    pub servers: IndexMap<String, SourceServer>,
    #[serde(default)]
    pub sources: IndexMap<String, SourceService>,
}

/// Connection attributes for one source server (host/port/user/password/
/// extraction-pattern fields — shape varies by engine).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceServer {
    pub fields: IndexMap<String, Value>,
}

impl SourceServer {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// The server's own engine tag, when set.
    pub fn engine(&self) -> Option<&str> {
        self.get_str("type")
    }
}

/// Per-environment database/schema bindings for one logical service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceService {
    pub bindings: IndexMap<String, Value>,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_round_trips_through_strings() {
        assert_eq!(SourcePattern::DbShared.as_str(), "db-shared");
        assert_eq!(
            "db-per-tenant".parse::<SourcePattern>().unwrap(),
            SourcePattern::DbPerTenant
        );
        assert!("db-sharded".parse::<SourcePattern>().is_err());
    }

    #[test]
    fn source_group_parses_from_yaml() {
        let yaml = r#"
pattern: db-shared
type: mssql
server_group_type: db-shared
environment_aware: true
servers:
  default:
    host: db.internal
    port: 1433
sources:
  chat:
    dev:
      server: default
      database: chat_dev
"#;
        let group: SourceGroup = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(group.pattern, SourcePattern::DbShared);
        assert_eq!(group.engine.as_deref(), Some("mssql"));
        assert!(group.environment_aware);
        assert_eq!(group.servers["default"].get_str("host"), Some("db.internal"));
        assert!(group.sources.contains_key("chat"));
    }

    #[test]
    fn document_preserves_key_order() {
        let yaml = "zeta:\n  pattern: db-shared\nalpha:\n  pattern: db-shared\n";
        let groups: SourceGroups = serde_yaml::from_str(yaml).unwrap();
        let keys: Vec<&String> = groups.keys().collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn missing_optional_fields_default() {
        let group: SourceGroup = serde_yaml::from_str("pattern: db-per-tenant\n").unwrap();
        assert!(!group.environment_aware);
        assert!(group.servers.is_empty());
        assert!(group.server_group_type.is_none());
    }
}
