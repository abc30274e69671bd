//! The deduction engine: inference of unspecified sink-group attributes.
//!
//! Every function here is pure and total — no I/O, no panics, `None`/`false`
//! on missing input. Deductions are applied lazily at resolution time and
//! never overwrite an explicitly-set field; a deduced value written back to
//! the document is treated as explicit from then on, which is what makes
//! resolution idempotent.

use crate::domain::resolve::resolve_source_ref;
use crate::domain::sink::{KafkaTopology, SinkGroup, SinkPattern, SinkServer, SINK_PREFIX};
use crate::domain::source::{SourceGroups, SourcePattern};

/// Derive the linked source group from a conventionally-named sink.
///
/// `sink_asma` → `asma`. Anything without the literal `sink_` prefix yields
/// `None`; no normalization beyond the prefix strip.
pub fn deduce_source_group(sink_name: &str) -> Option<&str> {
    sink_name.strip_prefix(SINK_PREFIX)
}

/// `inherited` when any server defers to a source group, else `standalone`.
pub fn deduce_pattern(group: &SinkGroup) -> SinkPattern {
    if group.is_inherited() {
        SinkPattern::Inherited
    } else {
        SinkPattern::Standalone
    }
}

/// Infer the database engine tag from the group's first server.
///
/// Precedence: the server's own explicit `type` field, then the `type` of
/// the source server its `source_ref` resolves to. A broken `source_ref` is
/// swallowed to `None` here — deliberately lenient; the break still surfaces
/// from reference validation and full resolution.
pub fn deduce_engine(
    group: &SinkGroup,
    linked: Option<&str>,
    source_groups: &SourceGroups,
) -> Option<String> {
    let (_, server) = group.servers.first()?;
    if let Some(engine) = server.get_str("type") {
        return Some(engine.to_string());
    }
    match server {
        SinkServer::Inherited(inherited) => linked
            .and_then(|sg| resolve_source_ref(&inherited.source_ref, sg, source_groups).ok())
            .and_then(|resolved| resolved.engine().map(str::to_string)),
        SinkServer::Standalone(_) => None,
    }
}

/// Map the linked source group's `server_group_type` to a kafka topology.
///
/// `db-per-tenant` → `multi-tenant`, `db-shared` → `per-server`; anything
/// else (unknown group, unset field) is `None`.
pub fn deduce_kafka_topology(
    source_group: &str,
    source_groups: &SourceGroups,
) -> Option<KafkaTopology> {
    match source_groups.get(source_group)?.server_group_type? {
        SourcePattern::DbPerTenant => Some(KafkaTopology::MultiTenant),
        SourcePattern::DbShared => Some(KafkaTopology::PerServer),
    }
}

/// Copy the linked source group's `environment_aware` flag, default `false`.
pub fn deduce_environment_aware(source_group: &str, source_groups: &SourceGroups) -> bool {
    source_groups
        .get(source_group)
        .map(|g| g.environment_aware)
        .unwrap_or(false)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
