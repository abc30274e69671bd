//! Resolved (computed) views of sink groups.
//!
//! A resolved sink group is the fully-deduced, fully-dereferenced form of a
//! raw [`SinkGroup`](crate::domain::SinkGroup): every deducible attribute is
//! filled in and every `source_ref` server is replaced by its resolved
//! connection data. These views are ephemeral — never persisted, recomputed
//! on every read that needs full context — and form the only input contract
//! handed to the pipeline template renderer.

use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;

use crate::domain::sink::{KafkaTopology, ServiceSources, SinkPattern};

/// Provenance stamp: the original `source_ref` value of an inherited server.
pub const SOURCE_REF_KEY: &str = "_source_ref";
/// Provenance stamp: where the resolved connection data came from.
pub const RESOLVED_FROM_KEY: &str = "_resolved_from";

/// A sink server with inheritance flattened away.
///
/// For inherited servers the mapping holds the source server's attributes
/// with sink-level overrides re-applied on top, plus the provenance stamps.
/// Standalone servers pass through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedSinkServer {
    pub fields: IndexMap<String, Value>,
}

impl ResolvedSinkServer {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// The original `source_ref`, when this server was inherited.
    pub fn source_ref(&self) -> Option<&str> {
        self.get_str(SOURCE_REF_KEY)
    }
}

/// A sink group with all deducible fields filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSinkGroup {
    #[serde(skip)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_group: Option<String>,
    pub pattern: SinkPattern,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kafka_topology: Option<KafkaTopology>,
    pub environment_aware: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub servers: IndexMap<String, ResolvedSinkServer>,
    pub sources: IndexMap<String, ServiceSources>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub database_exclude_patterns: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schema_exclude_patterns: Vec<String>,
    /// Source group this view was derived from, stamped only for sink names
    /// carrying the `sink_` inheritance convention.
    #[serde(rename = "_inherited_from", skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<String>,
}
