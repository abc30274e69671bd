//! Sink-group document model.
//!
//! This is the document this core owns (`sink-groups.yaml`). Sink groups are
//! layered configuration: a group either stands alone or inherits servers and
//! topology metadata from a source group, and most attributes are optional in
//! the raw document because they can be deduced at resolution time.
//!
//! # Server variants
//!
//! Every server entry is *either* purely inherited (`source_ref` pointing at
//! a server of the linked source group, plus local overrides) *or* purely
//! standalone (its own connection fields) — never ambiguous. The distinction
//! is made structurally here and validated at the resolver boundary, not
//! trusted implicitly throughout.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// The whole sink document, in file order.
pub type SinkGroups = IndexMap<String, SinkGroup>;

/// Sink groups derived from a source group are named `sink_<source group>`.
pub const SINK_PREFIX: &str = "sink_";

// ── Value enums ───────────────────────────────────────────────────────────────

/// Sink-group pattern vocabulary.
///
/// The field carries two vocabularies in the wild: `inherited`/`standalone`
/// (deduced from server shape) and `db-shared`/`db-per-tenant` (declared on
/// standalone groups, compared against the linked source group's pattern).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SinkPattern {
    Inherited,
    #[default]
    Standalone,
    DbShared,
    DbPerTenant,
}

impl SinkPattern {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inherited => "inherited",
            Self::Standalone => "standalone",
            Self::DbShared => "db-shared",
            Self::DbPerTenant => "db-per-tenant",
        }
    }
}

impl fmt::Display for SinkPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SinkPattern {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inherited" => Ok(Self::Inherited),
            "standalone" => Ok(Self::Standalone),
            "db-shared" => Ok(Self::DbShared),
            "db-per-tenant" => Ok(Self::DbPerTenant),
            other => Err(DomainError::InvalidPattern {
                pattern: other.to_string(),
            }),
        }
    }
}

/// Kafka topic topology for the rendered pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KafkaTopology {
    MultiTenant,
    PerServer,
}

impl KafkaTopology {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MultiTenant => "multi-tenant",
            Self::PerServer => "per-server",
        }
    }
}

impl fmt::Display for KafkaTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SinkServer ────────────────────────────────────────────────────────────────

/// One sink server entry: inherited or standalone, keyed on `source_ref`.
///
/// Untagged: a mapping with a `source_ref` key deserializes as `Inherited`,
/// anything else falls through to `Standalone`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SinkServer {
    Inherited(InheritedServer),
    Standalone(StandaloneServer),
}

impl SinkServer {
    pub fn inherited(source_ref: impl Into<String>) -> Self {
        Self::Inherited(InheritedServer {
            source_ref: source_ref.into(),
            overrides: IndexMap::new(),
        })
    }

    pub fn is_inherited(&self) -> bool {
        matches!(self, Self::Inherited(_))
    }

    pub fn source_ref(&self) -> Option<&str> {
        match self {
            Self::Inherited(s) => Some(&s.source_ref),
            Self::Standalone(_) => None,
        }
    }

    /// Look up a raw field: overrides for inherited servers, connection
    /// fields for standalone ones.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Inherited(s) => s.overrides.get(key),
            Self::Standalone(s) => s.fields.get(key),
        }
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}

/// A server deferring its connection details to the linked source group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InheritedServer {
    /// Bare server name in the linked source group. Never a
    /// `<group>/<server>` composite — the group is always the sink group's
    /// own linked source group.
    pub source_ref: String,
    /// Sink-level overrides, re-applied on top of the resolved server.
    #[serde(flatten)]
    pub overrides: IndexMap<String, Value>,
}

/// A server with its own explicit connection attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StandaloneServer {
    pub fields: IndexMap<String, Value>,
}

// ── Service sources ───────────────────────────────────────────────────────────

/// Per-service sink bindings: a `schemas` list plus one entry per
/// environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceSources {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemas: Vec<String>,
    #[serde(flatten)]
    pub environments: IndexMap<String, EnvBinding>,
}

/// Where one service's data lands in one environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvBinding {
    pub server: String,
    pub database: String,
    #[serde(default)]
    pub table_count: u64,
}

// ── SinkGroup ─────────────────────────────────────────────────────────────────

/// One entry in the sink document.
///
/// Most attributes are optional: absent fields are filled by the deduction
/// engine at resolution time and never overwrite an explicitly-set value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SinkGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<SinkPattern>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kafka_topology: Option<KafkaTopology>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_aware: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    // `servers`/`sources` keys are always written, even when empty: the
    // structural validator requires their presence.
    #[serde(default)]
    pub servers: IndexMap<String, SinkServer>,
    #[serde(default)]
    pub sources: IndexMap<String, ServiceSources>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub database_exclude_patterns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schema_exclude_patterns: Vec<String>,
    /// Bookkeeping from auto-scaffold: the source group's service names at
    /// scaffold time, for documentation. Services are opted in explicitly.
    #[serde(
        rename = "_inherited_services",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub inherited_services: Option<Vec<String>>,
}

impl SinkGroup {
    /// Whether any server defers to a source group. Inherited groups cannot
    /// be removed and take `source_ref` server entries only.
    pub fn is_inherited(&self) -> bool {
        self.servers.values().any(SinkServer::is_inherited)
    }

    /// Services whose bindings still point at `server`, in document order.
    pub fn services_using_server(&self, server: &str) -> Vec<String> {
        self.sources
            .iter()
            .filter(|(_, sources)| sources.environments.values().any(|b| b.server == server))
            .map(|(service, _)| service.clone())
            .collect()
    }
}

/// The conventional sink name derived from a source group name.
pub fn sink_name_for(source_group: &str) -> String {
    format!("{SINK_PREFIX}{source_group}")
}

// ── Scan records ──────────────────────────────────────────────────────────────

/// One discovered database, as supplied by external introspection tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseRecord {
    pub service: String,
    /// Physical database name.
    pub name: String,
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub schemas: Vec<String>,
    #[serde(default)]
    pub table_count: Option<u64>,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
