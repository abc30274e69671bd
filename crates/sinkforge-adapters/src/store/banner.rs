//! Generated-file banner for the sink document.
//!
//! Every save rewrites the banner from the current state of both documents:
//! a do-not-hand-edit notice plus one summary block per sink group, so a
//! reviewer can read the resolved shape of the file from its header without
//! running the tool. Summaries use the same validation passes as `validate`,
//! so the header and the command never disagree.

use sinkforge_core::domain::{
    deduce::{deduce_engine, deduce_pattern, deduce_source_group},
    validate::{validate_compatibility, validate_structure},
    SinkGroup, SinkGroups, SourceGroups,
};

/// Render the full comment banner, trailing newline included.
pub fn render_banner(sink_groups: &SinkGroups, source_groups: &SourceGroups) -> String {
    let mut out = String::new();
    out.push_str("# Generated by sinkforge. Group summaries below are rewritten on every\n");
    out.push_str("# save; edit the YAML body, not this header.\n");

    for (name, group) in sink_groups {
        out.push_str("#\n");
        out.push_str(&summarize(name, group, source_groups));
    }

    out.push('\n');
    out
}

fn summarize(name: &str, group: &SinkGroup, source_groups: &SourceGroups) -> String {
    // Lenient deduction on purpose: a broken group still gets a summary
    // line, with the breakage reported as a warning beneath it.
    let linked = group
        .source_group
        .as_deref()
        .or_else(|| deduce_source_group(name));
    let engine = group
        .engine
        .clone()
        .or_else(|| deduce_engine(group, linked, source_groups))
        .unwrap_or_else(|| "unknown".to_string());
    let pattern = group.pattern.unwrap_or_else(|| deduce_pattern(group));

    let mut out = format!(
        "# {name}: type={engine}, pattern={pattern}, servers={}, services={}\n",
        group.servers.len(),
        group.sources.len(),
    );

    if !group.sources.is_empty() {
        let services: Vec<&str> = group.sources.keys().map(String::as_str).collect();
        out.push_str(&format!("#   services: {}\n", services.join(", ")));
    }

    let mut findings = validate_structure(name, group);
    findings.extend(validate_compatibility(name, group, source_groups));
    if findings.is_empty() {
        out.push_str("#   no warnings\n");
    } else {
        for finding in findings {
            out.push_str(&format!("#   warning: {finding}\n"));
        }
    }

    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn documents() -> (SinkGroups, SourceGroups) {
        let sources: SourceGroups = serde_yaml::from_str(
            "asma:\n  pattern: db-shared\n  type: mssql\n  servers:\n    default: {type: mssql, host: h}\n",
        )
        .unwrap();
        let sinks: SinkGroups = serde_yaml::from_str(
            "sink_asma:\n  servers:\n    default: {source_ref: default}\n  sources:\n    chat:\n      dev: {server: default, database: chat_dev}\n",
        )
        .unwrap();
        (sinks, sources)
    }

    #[test]
    fn banner_summarizes_each_group() {
        let (sinks, sources) = documents();
        let banner = render_banner(&sinks, &sources);
        assert!(banner.contains("# sink_asma: type=mssql, pattern=inherited, servers=1, services=1"));
        assert!(banner.contains("#   services: chat"));
        assert!(banner.contains("#   no warnings"));
    }

    #[test]
    fn broken_group_still_gets_a_line_plus_warning() {
        let sources = SourceGroups::new();
        let sinks: SinkGroups =
            serde_yaml::from_str("orphan:\n  servers:\n    a: {port: 1}\n").unwrap();
        let banner = render_banner(&sinks, &sources);
        assert!(banner.contains("# orphan: type=unknown, pattern=standalone"));
        assert!(banner.contains("#   warning:"));
    }

    #[test]
    fn every_line_is_a_comment() {
        let (sinks, sources) = documents();
        for line in render_banner(&sinks, &sources).lines() {
            assert!(line.is_empty() || line.starts_with('#'), "bad line: {line}");
        }
    }
}
