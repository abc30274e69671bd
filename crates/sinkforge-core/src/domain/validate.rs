//! Cross-document validation of sink groups against source groups.
//!
//! Three passes with distinct severities:
//! - **structure** (errors): each group is well-formed on its own.
//! - **references** (errors): every `source_ref` dereferences cleanly.
//! - **compatibility** (warnings): declared metadata agrees with the linked
//!   source group. Warnings never fail a run; they surface drift.
//!
//! All passes report human-readable findings rather than failing fast, so a
//! single run shows everything wrong with a document.

use tracing::debug;

use crate::domain::deduce::deduce_source_group;
use crate::domain::resolve::resolve_sink_group;
use crate::domain::sink::{SinkGroup, SinkGroups, SinkPattern, SinkServer};
use crate::domain::source::{SourceGroups, SourcePattern};

/// Accumulated findings for one document pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Connection fields, any one of which makes a standalone server addressable.
const ADDRESS_FIELDS: [&str; 3] = ["host", "base_url", "type"];

/// Per-group structural rules: a resolvable `source_group`, addressable
/// standalone servers, and service bindings that point at declared servers.
pub fn validate_structure(name: &str, group: &SinkGroup) -> Vec<String> {
    let mut errors = Vec::new();

    if group.source_group.is_none() && deduce_source_group(name).is_none() {
        errors.push(format!(
            "sink group '{name}': no source_group and the name does not follow the 'sink_<source>' convention"
        ));
    }

    for (server_name, server) in &group.servers {
        if let SinkServer::Standalone(standalone) = server {
            if !ADDRESS_FIELDS.iter().any(|f| standalone.fields.contains_key(*f)) {
                errors.push(format!(
                    "sink group '{name}', server '{server_name}': standalone server needs one of {}",
                    ADDRESS_FIELDS.join(", ")
                ));
            }
        }
    }

    for (service, sources) in &group.sources {
        for (environment, binding) in &sources.environments {
            if !group.servers.contains_key(&binding.server) {
                errors.push(format!(
                    "sink group '{name}', service '{service}', environment '{environment}': references undeclared server '{}'",
                    binding.server
                ));
            }
        }
    }

    errors
}

/// Referential rules: the linked source group exists and every `source_ref`
/// names one of its servers.
pub fn validate_references(
    name: &str,
    group: &SinkGroup,
    source_groups: &SourceGroups,
) -> Vec<String> {
    let mut errors = Vec::new();

    let linked = group
        .source_group
        .as_deref()
        .or_else(|| deduce_source_group(name));

    let source = match linked {
        None => return errors, // structure pass already reported this
        Some(linked) => match source_groups.get(linked) {
            Some(source) => source,
            None => {
                errors.push(format!(
                    "sink group '{name}': source group '{linked}' does not exist"
                ));
                return errors;
            }
        },
    };

    for (server_name, server) in &group.servers {
        let Some(reference) = server.source_ref() else {
            continue;
        };
        if reference.contains('/') {
            errors.push(format!(
                "sink group '{name}', server '{server_name}': source_ref '{reference}' must be a bare server name"
            ));
        } else if !source.servers.contains_key(reference) {
            errors.push(format!(
                "sink group '{name}', server '{server_name}': source_ref '{reference}' not found in source group '{}'",
                linked.unwrap_or_default()
            ));
        }
    }

    errors
}

/// Compatibility drift between declared sink metadata and the linked source.
///
/// Pattern agreement is only checked when the sink declares a database
/// pattern (`db-shared`/`db-per-tenant`); `inherited`/`standalone` describe
/// server shape, not tenancy, and are exempt.
pub fn validate_compatibility(
    name: &str,
    group: &SinkGroup,
    source_groups: &SourceGroups,
) -> Vec<String> {
    let mut warnings = Vec::new();

    let linked = group
        .source_group
        .as_deref()
        .or_else(|| deduce_source_group(name));
    let Some(source) = linked.and_then(|l| source_groups.get(l)) else {
        return warnings;
    };

    if let Some(pattern) = group.pattern {
        let expected = match pattern {
            SinkPattern::DbShared => Some(SourcePattern::DbShared),
            SinkPattern::DbPerTenant => Some(SourcePattern::DbPerTenant),
            SinkPattern::Inherited | SinkPattern::Standalone => None,
        };
        if let Some(expected) = expected {
            if source.pattern != expected {
                warnings.push(format!(
                    "sink group '{name}': pattern '{pattern}' does not match source group '{}' pattern '{}'",
                    linked.unwrap_or_default(),
                    source.pattern
                ));
            }
        }
    }

    if group.inherited_services.is_some() && source.pattern != SourcePattern::DbShared {
        warnings.push(format!(
            "sink group '{name}': carries scaffolded service inheritance but source group '{}' is not db-shared",
            linked.unwrap_or_default()
        ));
    }

    warnings
}

/// Run every pass over every sink group, plus a full resolution dry-run so
/// deduction failures surface as findings instead of aborting the report.
pub fn validate_all(sink_groups: &SinkGroups, source_groups: &SourceGroups) -> ValidationReport {
    let mut report = ValidationReport::default();

    for (name, group) in sink_groups {
        let structure = validate_structure(name, group);
        let references = validate_references(name, group, source_groups);
        let warnings = validate_compatibility(name, group, source_groups);
        debug!(
            group = %name,
            errors = structure.len() + references.len(),
            warnings = warnings.len(),
            "validated sink group"
        );
        report.errors.extend(structure);
        report.errors.extend(references);
        report.warnings.extend(warnings);

        if let Err(err) = resolve_sink_group(name, group, source_groups) {
            let message = format!("sink group '{name}': {err}");
            if !report.errors.contains(&message) {
                report.errors.push(message);
            }
        }
    }

    report
}

// ── Tests ─────────────────────────────────────────────────────────────────────
