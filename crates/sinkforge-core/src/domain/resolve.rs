//! The reference resolver: from raw sink documents to resolved views.
//!
//! Resolution dereferences `source_ref` servers against the linked source
//! group and fills every deducible attribute, producing the ephemeral
//! [`ResolvedSinkGroup`] view. It validates at the boundary: bad ref
//! formats, unknown groups, and missing servers all fail here with typed
//! errors rather than leaking partially-resolved data.

use indexmap::IndexMap;
use serde_yaml::Value;

use crate::domain::deduce::{
    deduce_engine, deduce_environment_aware, deduce_kafka_topology, deduce_pattern,
    deduce_source_group,
};
use crate::domain::error::DomainError;
use crate::domain::resolved::{ResolvedSinkGroup, ResolvedSinkServer, RESOLVED_FROM_KEY, SOURCE_REF_KEY};
use crate::domain::sink::{SinkGroup, SinkServer, SINK_PREFIX};
use crate::domain::source::{SourceGroups, SourceServer};

/// Resolve a `source_ref` to the named server of the linked source group.
///
/// `reference` must be a bare server name: the linked group is always the
/// sink group's own `source_group`, never encoded inside the ref string, so
/// a `/` fails the format check before any lookup. Returns a full copy of
/// the server's connection attributes (mutation-safe).
pub fn resolve_source_ref(
    reference: &str,
    source_group: &str,
    source_groups: &SourceGroups,
) -> Result<SourceServer, DomainError> {
    if reference.contains('/') {
        return Err(DomainError::InvalidSourceRef {
            reference: reference.to_string(),
            reason: "must be a bare server name, not a '<group>/<server>' path".to_string(),
        });
    }

    let group = source_groups
        .get(source_group)
        .ok_or_else(|| DomainError::UnknownSourceGroup {
            group: source_group.to_string(),
            available: source_groups.keys().cloned().collect(),
        })?;

    group
        .servers
        .get(reference)
        .cloned()
        .ok_or_else(|| DomainError::UnknownSourceServer {
            group: source_group.to_string(),
            server: reference.to_string(),
        })
}

/// Resolve one sink server.
///
/// Inherited servers are dereferenced, then every local override key is
/// overlaid on top (sink wins), and the provenance stamps are attached.
/// Standalone servers pass through as a copy.
pub fn resolve_sink_server(
    server: &SinkServer,
    source_group: Option<&str>,
    source_groups: &SourceGroups,
) -> Result<ResolvedSinkServer, DomainError> {
    match server {
        SinkServer::Standalone(standalone) => Ok(ResolvedSinkServer {
            fields: standalone.fields.clone(),
        }),
        SinkServer::Inherited(inherited) => {
            let linked = source_group.ok_or_else(|| DomainError::MissingSourceGroup {
                reference: inherited.source_ref.clone(),
            })?;
            let mut fields = resolve_source_ref(&inherited.source_ref, linked, source_groups)?.fields;
            for (key, value) in &inherited.overrides {
                fields.insert(key.clone(), value.clone());
            }
            fields.insert(
                SOURCE_REF_KEY.to_string(),
                Value::String(inherited.source_ref.clone()),
            );
            fields.insert(
                RESOLVED_FROM_KEY.to_string(),
                Value::String(inherited.source_ref.clone()),
            );
            Ok(ResolvedSinkServer { fields })
        }
    }
}

/// Compute the fully-deduced, fully-dereferenced view of one sink group.
///
/// Deduction fills only absent fields, so resolution is idempotent: once
/// deduced values are written back to a document they are explicit and
/// re-resolving yields the same result.
pub fn resolve_sink_group(
    name: &str,
    group: &SinkGroup,
    source_groups: &SourceGroups,
) -> Result<ResolvedSinkGroup, DomainError> {
    let source_group = group
        .source_group
        .clone()
        .or_else(|| deduce_source_group(name).map(str::to_string));

    if let Some(linked) = source_group.as_deref() {
        if !source_groups.contains_key(linked) {
            return Err(DomainError::UnknownSourceGroup {
                group: linked.to_string(),
                available: source_groups.keys().cloned().collect(),
            });
        }
    }

    let pattern = group.pattern.unwrap_or_else(|| deduce_pattern(group));
    let engine = group
        .engine
        .clone()
        .or_else(|| deduce_engine(group, source_group.as_deref(), source_groups));
    let kafka_topology = group.kafka_topology.or_else(|| {
        source_group
            .as_deref()
            .and_then(|sg| deduce_kafka_topology(sg, source_groups))
    });
    let environment_aware = group.environment_aware.unwrap_or_else(|| {
        source_group
            .as_deref()
            .is_some_and(|sg| deduce_environment_aware(sg, source_groups))
    });

    let mut servers = IndexMap::with_capacity(group.servers.len());
    for (server_name, server) in &group.servers {
        let resolved = resolve_sink_server(server, source_group.as_deref(), source_groups)?;
        servers.insert(server_name.clone(), resolved);
    }

    let inherited_from = if name.starts_with(SINK_PREFIX) {
        source_group.clone()
    } else {
        None
    };

    Ok(ResolvedSinkGroup {
        name: name.to_string(),
        source_group,
        pattern,
        engine,
        kafka_topology,
        environment_aware,
        description: group.description.clone(),
        servers,
        sources: group.sources.clone(),
        database_exclude_patterns: group.database_exclude_patterns.clone(),
        schema_exclude_patterns: group.schema_exclude_patterns.clone(),
        inherited_from,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
