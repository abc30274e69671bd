//! Structural edits to the sink-group document.
//!
//! All functions here are pure in-memory transforms over an already-loaded
//! [`SinkGroups`] document; persistence is the application service's job.
//! Every precondition (existence, conflicts, referential integrity) is
//! checked before the document is touched — a failed operation leaves the
//! document exactly as it was.

use indexmap::IndexMap;
use serde_yaml::Value;
use std::fmt;

use crate::domain::error::DomainError;
use crate::domain::sink::{
    sink_name_for, DatabaseRecord, EnvBinding, ServiceSources, SinkGroup, SinkGroups, SinkPattern,
    SinkServer, SINK_PREFIX,
};
use crate::domain::source::{SourceGroup, SourceGroups, SourcePattern};

// ── Auto-scaffold ─────────────────────────────────────────────────────────────

/// What one scaffold pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScaffoldOutcome {
    pub created: Vec<String>,
    pub skipped: Vec<ScaffoldSkip>,
}

/// One source group the scaffold pass left alone. Informational, not an
/// error: a fully-scaffolded project reports every group as skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaffoldSkip {
    pub source_group: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The derived sink name is already present in the document.
    AlreadyExists { sink_name: String },
    /// Inheritance is only defined for db-shared source groups.
    IncompatiblePattern { pattern: SourcePattern },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyExists { sink_name } => {
                write!(f, "sink group '{sink_name}' already exists")
            }
            Self::IncompatiblePattern { pattern } => {
                write!(f, "pattern '{pattern}' does not support inheritance")
            }
        }
    }
}

/// Build the inherited sink group derived from one source group: one
/// `source_ref` entry per source server, no services opted in yet, and the
/// source's service names recorded for documentation.
pub fn inherited_sink_group(source_name: &str, source: &SourceGroup) -> SinkGroup {
    let servers = source
        .servers
        .keys()
        .map(|server| (server.clone(), SinkServer::inherited(server.clone())))
        .collect();

    SinkGroup {
        // Written explicitly even though it is deducible from the sink name,
        // so scaffolded output passes the strict structure check as-is.
        source_group: Some(source_name.to_string()),
        servers,
        inherited_services: Some(source.sources.keys().cloned().collect()),
        ..SinkGroup::default()
    }
}

/// Create an inherited sink group for every eligible source group.
///
/// Eligible means `db-shared` pattern and no sink group under the derived
/// name yet. Ineligible groups are reported as skips. Zero creations is a
/// valid outcome, not an error.
pub fn scaffold_inherited(
    sink_groups: &mut SinkGroups,
    source_groups: &SourceGroups,
) -> ScaffoldOutcome {
    let mut outcome = ScaffoldOutcome::default();

    for (name, source) in source_groups {
        if source.pattern != SourcePattern::DbShared {
            outcome.skipped.push(ScaffoldSkip {
                source_group: name.clone(),
                reason: SkipReason::IncompatiblePattern {
                    pattern: source.pattern,
                },
            });
            continue;
        }

        let sink_name = sink_name_for(name);
        if sink_groups.contains_key(&sink_name) {
            outcome.skipped.push(ScaffoldSkip {
                source_group: name.clone(),
                reason: SkipReason::AlreadyExists {
                    sink_name: sink_name.clone(),
                },
            });
            continue;
        }

        sink_groups.insert(sink_name.clone(), inherited_sink_group(name, source));
        outcome.created.push(sink_name);
    }

    outcome
}

/// Create the inherited sink group for exactly one named source group.
///
/// Returns the derived sink name on success.
pub fn create_inherited(
    sink_groups: &mut SinkGroups,
    source_groups: &SourceGroups,
    source_group: &str,
) -> Result<String, DomainError> {
    let source =
        source_groups
            .get(source_group)
            .ok_or_else(|| DomainError::UnknownSourceGroup {
                group: source_group.to_string(),
                available: source_groups.keys().cloned().collect(),
            })?;

    if source.pattern != SourcePattern::DbShared {
        return Err(DomainError::PatternNotInheritable {
            group: source_group.to_string(),
            pattern: source.pattern,
        });
    }

    let sink_name = sink_name_for(source_group);
    if sink_groups.contains_key(&sink_name) {
        return Err(DomainError::GroupExists {
            name: sink_name.clone(),
        });
    }

    sink_groups.insert(sink_name.clone(), inherited_sink_group(source_group, source));
    Ok(sink_name)
}

// ── Standalone create ─────────────────────────────────────────────────────────

/// Caller-supplied attributes for a standalone sink group.
#[derive(Debug, Clone, Default)]
pub struct StandaloneSpec {
    pub engine: String,
    pub pattern: SinkPattern,
    pub environment_aware: bool,
    pub source_group: Option<String>,
    pub description: Option<String>,
    pub database_exclude_patterns: Vec<String>,
    pub schema_exclude_patterns: Vec<String>,
}

/// What standalone creation linked the group to.
#[derive(Debug, Clone, PartialEq)]
pub struct StandaloneCreated {
    pub source_group: String,
    /// True when no source group was given and the first document key was
    /// chosen — surfaced so the caller can tell the operator.
    pub defaulted: bool,
}

/// Create a standalone sink group with explicit attributes and no servers.
///
/// `db-shared` sink groups must be environment-aware; the rule is enforced
/// structurally at creation, not just at validation time.
pub fn create_standalone(
    sink_groups: &mut SinkGroups,
    source_groups: &SourceGroups,
    name: &str,
    spec: StandaloneSpec,
) -> Result<StandaloneCreated, DomainError> {
    if sink_groups.contains_key(name) {
        return Err(DomainError::GroupExists {
            name: name.to_string(),
        });
    }

    if spec.pattern == SinkPattern::DbShared && !spec.environment_aware {
        return Err(DomainError::EnvironmentAwareRequired {
            name: name.to_string(),
        });
    }

    let (source_group, defaulted) = match spec.source_group {
        Some(group) => {
            if !source_groups.contains_key(&group) {
                return Err(DomainError::UnknownSourceGroup {
                    group,
                    available: source_groups.keys().cloned().collect(),
                });
            }
            (group, false)
        }
        // Document order is semantic: the first source group is the default.
        None => match source_groups.keys().next() {
            Some(first) => (first.clone(), true),
            None => return Err(DomainError::NoSourceGroups),
        },
    };

    sink_groups.insert(
        name.to_string(),
        SinkGroup {
            source_group: Some(source_group.clone()),
            pattern: Some(spec.pattern),
            engine: Some(spec.engine),
            environment_aware: Some(spec.environment_aware),
            description: spec.description,
            database_exclude_patterns: spec.database_exclude_patterns,
            schema_exclude_patterns: spec.schema_exclude_patterns,
            ..SinkGroup::default()
        },
    );

    Ok(StandaloneCreated {
        source_group,
        defaulted,
    })
}

// ── Servers ───────────────────────────────────────────────────────────────────

/// Caller-supplied attributes for a new sink server. Any connection field
/// left `None` falls back to an environment-variable placeholder.
#[derive(Debug, Clone, Default)]
pub struct AddServerSpec {
    pub source_ref: Option<String>,
    pub engine: Option<String>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

/// Deterministic environment-variable placeholder for a connection field:
/// `${<DBTYPE>_SINK_<FIELD>_<SINKGROUP>_<SERVER>}`, upper-cased, `-` → `_`,
/// leading `sink_` stripped from the group portion. Generated configs point
/// at runtime secrets without ever writing literal credentials to disk.
pub fn env_placeholder(engine: Option<&str>, field: &str, group: &str, server: &str) -> String {
    fn norm(s: &str) -> String {
        s.to_ascii_uppercase().replace('-', "_")
    }
    let group = group.strip_prefix(SINK_PREFIX).unwrap_or(group);
    format!(
        "${{{}_SINK_{}_{}_{}}}",
        norm(engine.unwrap_or("db")),
        norm(field),
        norm(group),
        norm(server)
    )
}

/// Add a server to a sink group.
///
/// Inherited groups take `source_ref` entries only (defaulting the ref to
/// the server's own name); raw connection fields are reserved for
/// standalone groups, with placeholder defaults for anything unspecified.
pub fn add_server(
    sink_groups: &mut SinkGroups,
    group_name: &str,
    server_name: &str,
    spec: AddServerSpec,
) -> Result<(), DomainError> {
    let group = sink_groups
        .get_mut(group_name)
        .ok_or_else(|| DomainError::GroupNotFound {
            name: group_name.to_string(),
        })?;

    if group.servers.contains_key(server_name) {
        return Err(DomainError::ServerExists {
            group: group_name.to_string(),
            server: server_name.to_string(),
        });
    }

    let server = if spec.source_ref.is_some() || group.is_inherited() {
        let reference = spec.source_ref.unwrap_or_else(|| server_name.to_string());
        SinkServer::inherited(reference)
    } else {
        let engine = spec.engine.or_else(|| group.engine.clone());
        let mut fields = IndexMap::new();
        if let Some(ref engine) = engine {
            fields.insert("type".to_string(), Value::String(engine.clone()));
        }
        let connection = [
            ("host", spec.host),
            ("port", spec.port),
            ("user", spec.user),
            ("password", spec.password),
        ];
        for (field, explicit) in connection {
            let value = explicit.unwrap_or_else(|| {
                env_placeholder(engine.as_deref(), field, group_name, server_name)
            });
            fields.insert(field.to_string(), Value::String(value));
        }
        SinkServer::Standalone(crate::domain::sink::StandaloneServer { fields })
    };

    group.servers.insert(server_name.to_string(), server);
    Ok(())
}

/// Remove a server, refusing while any service binding still points at it.
///
/// Referential integrity is enforced, not merely warned: dependents must be
/// removed or repointed first.
pub fn remove_server(
    sink_groups: &mut SinkGroups,
    group_name: &str,
    server_name: &str,
) -> Result<(), DomainError> {
    let group = sink_groups
        .get_mut(group_name)
        .ok_or_else(|| DomainError::GroupNotFound {
            name: group_name.to_string(),
        })?;

    if !group.servers.contains_key(server_name) {
        return Err(DomainError::ServerNotFound {
            group: group_name.to_string(),
            server: server_name.to_string(),
        });
    }

    let dependents = group.services_using_server(server_name);
    if !dependents.is_empty() {
        return Err(DomainError::ServerInUse {
            group: group_name.to_string(),
            server: server_name.to_string(),
            services: dependents,
        });
    }

    group.servers.shift_remove(server_name);
    Ok(())
}

// ── Group removal ─────────────────────────────────────────────────────────────

/// Remove a sink group. Blocked entirely for inherited groups to avoid
/// silently discarding an auto-derived mapping; standalone groups may
/// always be removed.
pub fn remove_group(sink_groups: &mut SinkGroups, name: &str) -> Result<(), DomainError> {
    let group = sink_groups
        .get(name)
        .ok_or_else(|| DomainError::GroupNotFound {
            name: name.to_string(),
        })?;

    if group.is_inherited() {
        return Err(DomainError::InheritedGroupRemoval {
            name: name.to_string(),
        });
    }

    sink_groups.shift_remove(name);
    Ok(())
}

// ── Source mapping merge ──────────────────────────────────────────────────────

/// Group one server's scan records by service.
///
/// Normalization: service/environment names are trimmed, records with an
/// empty service are dropped, a missing `table_count` becomes 0, and an
/// empty environment lands in the `"default"` bucket.
pub fn build_sink_sources(
    records: &[DatabaseRecord],
    server: &str,
) -> IndexMap<String, ServiceSources> {
    let mut out: IndexMap<String, ServiceSources> = IndexMap::new();

    for record in records {
        let service = record.service.trim();
        if service.is_empty() {
            continue;
        }
        let environment = match record.environment.trim() {
            "" => "default",
            env => env,
        };

        let entry = out.entry(service.to_string()).or_default();
        for schema in &record.schemas {
            if !entry.schemas.contains(schema) {
                entry.schemas.push(schema.clone());
            }
        }
        entry.environments.insert(
            environment.to_string(),
            EnvBinding {
                server: server.to_string(),
                database: record.name.clone(),
                table_count: record.table_count.unwrap_or(0),
            },
        );
    }

    out
}

/// Merge freshly-scanned sources into a group's existing `sources`, scoped
/// to the one server just scanned.
///
/// For each scanned service: entries belonging to *other* servers are
/// preserved untouched, entries for the scanned server are replaced, and
/// the `schemas` union is taken across old+new in first-seen order.
/// Services absent from the scan are left alone. This scoping makes
/// repeated per-server updates commutative — operators update one
/// environment at a time.
pub fn merge_sink_sources(
    existing: &mut IndexMap<String, ServiceSources>,
    scanned: IndexMap<String, ServiceSources>,
    server: &str,
) {
    for (service, new_sources) in scanned {
        match existing.get_mut(&service) {
            None => {
                existing.insert(service, new_sources);
            }
            Some(current) => {
                current.environments.retain(|_, binding| binding.server != server);
                for (environment, binding) in new_sources.environments {
                    current.environments.insert(environment, binding);
                }
                for schema in new_sources.schemas {
                    if !current.schemas.contains(&schema) {
                        current.schemas.push(schema);
                    }
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn source_groups() -> SourceGroups {
        serde_yaml::from_str(
            r#"
asma:
  pattern: db-shared
  type: mssql
  servers:
    default:
      type: mssql
      host: asma-db.internal
  sources:
    chat:
      dev:
        server: default
        database: chat_dev
tenants:
  pattern: db-per-tenant
  servers:
    shard0: {}
"#,
        )
        .unwrap()
    }

    fn records() -> Vec<DatabaseRecord> {
        serde_yaml::from_str(
            r#"
- service: chat
  name: chat_dev
  environment: dev
  schemas: [public]
  table_count: 10
"#,
        )
        .unwrap()
    }

    // ── scaffold ──────────────────────────────────────────────────────────────

    #[test]
    fn scaffold_creates_inherited_groups_for_db_shared_only() {
        let sources = source_groups();
        let mut sinks = SinkGroups::new();
        let outcome = scaffold_inherited(&mut sinks, &sources);

        assert_eq!(outcome.created, ["sink_asma"]);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].source_group, "tenants");

        let group = &sinks["sink_asma"];
        assert_eq!(group.source_group.as_deref(), Some("asma"));
        assert_eq!(group.servers["default"].source_ref(), Some("default"));
        assert!(group.sources.is_empty());
        assert_eq!(group.inherited_services.as_deref(), Some(&["chat".to_string()][..]));
    }

    #[test]
    fn scaffold_is_a_no_op_when_run_twice() {
        let sources = source_groups();
        let mut sinks = SinkGroups::new();
        scaffold_inherited(&mut sinks, &sources);
        let before = sinks.clone();

        let second = scaffold_inherited(&mut sinks, &sources);
        assert!(second.created.is_empty());
        assert_eq!(second.skipped.len(), 2);
        assert_eq!(sinks, before);
    }

    #[test]
    fn scaffold_with_no_services_records_empty_inheritance() {
        let sources: SourceGroups =
            serde_yaml::from_str("asma:\n  pattern: db-shared\n  servers:\n    default: {}\n")
                .unwrap();
        let mut sinks = SinkGroups::new();
        scaffold_inherited(&mut sinks, &sources);
        assert_eq!(sinks["sink_asma"].inherited_services.as_deref(), Some(&[][..]));
    }

    // ── single inherited create ───────────────────────────────────────────────

    #[test]
    fn create_inherited_rejects_per_tenant_groups() {
        let sources = source_groups();
        let mut sinks = SinkGroups::new();
        let err = create_inherited(&mut sinks, &sources, "tenants").unwrap_err();
        assert!(matches!(err, DomainError::PatternNotInheritable { .. }));
        assert!(sinks.is_empty());
    }

    #[test]
    fn create_inherited_rejects_existing_target() {
        let sources = source_groups();
        let mut sinks = SinkGroups::new();
        assert_eq!(create_inherited(&mut sinks, &sources, "asma").unwrap(), "sink_asma");
        let err = create_inherited(&mut sinks, &sources, "asma").unwrap_err();
        assert!(matches!(err, DomainError::GroupExists { .. }));
    }

    #[test]
    fn create_inherited_rejects_unknown_source() {
        let mut sinks = SinkGroups::new();
        let err = create_inherited(&mut sinks, &source_groups(), "ghost").unwrap_err();
        assert!(matches!(err, DomainError::UnknownSourceGroup { .. }));
    }

    // ── standalone create ─────────────────────────────────────────────────────

    #[test]
    fn standalone_create_defaults_to_first_source_group() {
        let sources = source_groups();
        let mut sinks = SinkGroups::new();
        let created = create_standalone(
            &mut sinks,
            &sources,
            "warehouse",
            StandaloneSpec {
                engine: "mssql".into(),
                pattern: SinkPattern::Standalone,
                ..StandaloneSpec::default()
            },
        )
        .unwrap();

        assert_eq!(created.source_group, "asma");
        assert!(created.defaulted);
        assert!(sinks["warehouse"].servers.is_empty());
    }

    #[test]
    fn db_shared_standalone_requires_environment_aware() {
        let sources = source_groups();
        let mut sinks = SinkGroups::new();
        let err = create_standalone(
            &mut sinks,
            &sources,
            "warehouse",
            StandaloneSpec {
                engine: "mssql".into(),
                pattern: SinkPattern::DbShared,
                environment_aware: false,
                ..StandaloneSpec::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::EnvironmentAwareRequired { .. }));
        assert!(sinks.is_empty());
    }

    #[test]
    fn standalone_create_with_no_source_groups_fails() {
        let mut sinks = SinkGroups::new();
        let err = create_standalone(
            &mut sinks,
            &SourceGroups::new(),
            "warehouse",
            StandaloneSpec::default(),
        )
        .unwrap_err();
        assert_eq!(err, DomainError::NoSourceGroups);
    }

    // ── add/remove server ─────────────────────────────────────────────────────

    #[test]
    fn add_server_to_inherited_group_uses_source_ref() {
        let sources = source_groups();
        let mut sinks = SinkGroups::new();
        scaffold_inherited(&mut sinks, &sources);

        add_server(&mut sinks, "sink_asma", "replica", AddServerSpec::default()).unwrap();
        assert_eq!(sinks["sink_asma"].servers["replica"].source_ref(), Some("replica"));
    }

    #[test]
    fn add_server_to_standalone_group_fills_placeholders() {
        let sources = source_groups();
        let mut sinks = SinkGroups::new();
        create_standalone(
            &mut sinks,
            &sources,
            "warehouse",
            StandaloneSpec {
                engine: "mssql".into(),
                ..StandaloneSpec::default()
            },
        )
        .unwrap();

        add_server(
            &mut sinks,
            "warehouse",
            "primary",
            AddServerSpec {
                host: Some("wh.internal".into()),
                ..AddServerSpec::default()
            },
        )
        .unwrap();

        let server = &sinks["warehouse"].servers["primary"];
        assert_eq!(server.get_str("host"), Some("wh.internal"));
        assert_eq!(server.get_str("type"), Some("mssql"));
        assert_eq!(
            server.get_str("password"),
            Some("${MSSQL_SINK_PASSWORD_WAREHOUSE_PRIMARY}")
        );
    }

    #[test]
    fn placeholder_strips_sink_prefix_and_normalizes() {
        assert_eq!(
            env_placeholder(Some("mssql"), "host", "sink_asma-eu", "non-prod"),
            "${MSSQL_SINK_HOST_ASMA_EU_NON_PROD}"
        );
        assert_eq!(
            env_placeholder(None, "port", "warehouse", "p"),
            "${DB_SINK_PORT_WAREHOUSE_P}"
        );
    }

    #[test]
    fn add_server_rejects_duplicates_and_missing_groups() {
        let sources = source_groups();
        let mut sinks = SinkGroups::new();
        scaffold_inherited(&mut sinks, &sources);

        let err = add_server(&mut sinks, "sink_asma", "default", AddServerSpec::default())
            .unwrap_err();
        assert!(matches!(err, DomainError::ServerExists { .. }));

        let err = add_server(&mut sinks, "ghost", "x", AddServerSpec::default()).unwrap_err();
        assert!(matches!(err, DomainError::GroupNotFound { .. }));
    }

    #[test]
    fn remove_server_blocked_while_referenced() {
        let sources = source_groups();
        let mut sinks = SinkGroups::new();
        scaffold_inherited(&mut sinks, &sources);
        merge_sink_sources(
            &mut sinks.get_mut("sink_asma").unwrap().sources,
            build_sink_sources(&records(), "default"),
            "default",
        );
        let before = sinks.clone();

        let err = remove_server(&mut sinks, "sink_asma", "default").unwrap_err();
        match err {
            DomainError::ServerInUse { services, .. } => assert_eq!(services, ["chat"]),
            other => panic!("unexpected error: {other:?}"),
        }
        // Document untouched on failure.
        assert_eq!(sinks, before);
    }

    #[test]
    fn remove_unreferenced_server_succeeds() {
        let sources = source_groups();
        let mut sinks = SinkGroups::new();
        scaffold_inherited(&mut sinks, &sources);
        add_server(&mut sinks, "sink_asma", "replica", AddServerSpec::default()).unwrap();

        remove_server(&mut sinks, "sink_asma", "replica").unwrap();
        assert!(!sinks["sink_asma"].servers.contains_key("replica"));

        let err = remove_server(&mut sinks, "sink_asma", "replica").unwrap_err();
        assert!(matches!(err, DomainError::ServerNotFound { .. }));
    }

    // ── remove group ──────────────────────────────────────────────────────────

    #[test]
    fn remove_group_blocked_for_inherited() {
        let sources = source_groups();
        let mut sinks = SinkGroups::new();
        scaffold_inherited(&mut sinks, &sources);

        let err = remove_group(&mut sinks, "sink_asma").unwrap_err();
        assert!(matches!(err, DomainError::InheritedGroupRemoval { .. }));
        assert!(sinks.contains_key("sink_asma"));
    }

    #[test]
    fn remove_group_allows_standalone() {
        let sources = source_groups();
        let mut sinks = SinkGroups::new();
        create_standalone(
            &mut sinks,
            &sources,
            "warehouse",
            StandaloneSpec {
                engine: "mssql".into(),
                ..StandaloneSpec::default()
            },
        )
        .unwrap();

        remove_group(&mut sinks, "warehouse").unwrap();
        assert!(sinks.is_empty());
    }

    // ── source building & merge ───────────────────────────────────────────────

    #[test]
    fn build_sources_normalizes_records() {
        let records: Vec<DatabaseRecord> = serde_yaml::from_str(
            r#"
- service: "  chat  "
  name: chat_dev
  environment: " dev "
  schemas: [public, audit, public]
  table_count: 10
- service: ""
  name: orphan
- service: billing
  name: billing_all
  environment: ""
"#,
        )
        .unwrap();

        let sources = build_sink_sources(&records, "nonprod");
        assert_eq!(sources.len(), 2);
        assert_eq!(sources["chat"].schemas, ["public", "audit"]);
        assert_eq!(
            sources["chat"].environments["dev"],
            EnvBinding {
                server: "nonprod".into(),
                database: "chat_dev".into(),
                table_count: 10,
            }
        );
        // Empty environment lands in the default bucket, missing count is 0.
        assert_eq!(sources["billing"].environments["default"].table_count, 0);
    }

    #[test]
    fn merge_replaces_only_the_scanned_server() {
        let mut existing: IndexMap<String, ServiceSources> = serde_yaml::from_str(
            r#"
chat:
  schemas: [public]
  dev:
    server: nonprod
    database: chat_dev_old
    table_count: 3
  prod:
    server: prod
    database: chat_prod
    table_count: 9
"#,
        )
        .unwrap();

        let scanned = build_sink_sources(&records(), "nonprod");
        merge_sink_sources(&mut existing, scanned, "nonprod");

        let chat = &existing["chat"];
        assert_eq!(chat.environments["dev"].database, "chat_dev");
        assert_eq!(chat.environments["dev"].table_count, 10);
        // The other server's entry is preserved untouched.
        assert_eq!(chat.environments["prod"].database, "chat_prod");
    }

    #[test]
    fn per_server_updates_commute() {
        let a: Vec<DatabaseRecord> = serde_yaml::from_str(
            "- {service: chat, name: chat_dev, environment: dev, schemas: [public], table_count: 1}\n",
        )
        .unwrap();
        let b: Vec<DatabaseRecord> = serde_yaml::from_str(
            "- {service: chat, name: chat_prod, environment: prod, schemas: [audit], table_count: 2}\n",
        )
        .unwrap();

        let mut ab = IndexMap::new();
        merge_sink_sources(&mut ab, build_sink_sources(&a, "nonprod"), "nonprod");
        merge_sink_sources(&mut ab, build_sink_sources(&b, "prod"), "prod");

        // Scanning B did not alter A's previously recorded entries.
        assert_eq!(ab["chat"].environments["dev"].server, "nonprod");
        assert_eq!(ab["chat"].environments["prod"].server, "prod");
        assert_eq!(ab["chat"].schemas, ["public", "audit"]);
    }

    #[test]
    fn merge_keeps_schema_union_in_first_seen_order() {
        let mut existing: IndexMap<String, ServiceSources> = serde_yaml::from_str(
            "chat:\n  schemas: [audit]\n  prod: {server: prod, database: d}\n",
        )
        .unwrap();
        merge_sink_sources(&mut existing, build_sink_sources(&records(), "nonprod"), "nonprod");
        assert_eq!(existing["chat"].schemas, ["audit", "public"]);
    }
}
