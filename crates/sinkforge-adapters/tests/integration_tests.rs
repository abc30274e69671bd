//! End-to-end tests: SinkGroupService over the real YAML store.

use tempfile::TempDir;

use sinkforge_adapters::{YamlConfigStore, SINK_GROUPS_FILE, SOURCE_GROUPS_FILE};
use sinkforge_core::prelude::*;

const SOURCES: &str = r#"
asma:
  pattern: db-shared
  type: mssql
  server_group_type: db-shared
  environment_aware: true
  servers:
    nonprod:
      type: mssql
      host: asma-nonprod.internal
    prod:
      type: mssql
      host: asma-prod.internal
  sources:
    chat:
      dev:
        server: nonprod
        database: chat_dev
tenants:
  pattern: db-per-tenant
  servers:
    shard0:
      host: shard0.internal
"#;

fn project() -> (TempDir, SinkGroupService) {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(SOURCE_GROUPS_FILE), SOURCES).unwrap();
    let service = SinkGroupService::new(Box::new(YamlConfigStore::new(dir.path())));
    (dir, service)
}

#[test]
fn scaffold_writes_an_annotated_sink_file() {
    let (dir, service) = project();

    let outcome = service.scaffold().unwrap();
    assert_eq!(outcome.created, ["sink_asma"]);
    assert_eq!(outcome.skipped.len(), 1);

    let raw = std::fs::read_to_string(dir.path().join(SINK_GROUPS_FILE)).unwrap();
    assert!(raw.starts_with("# Generated by sinkforge."));
    assert!(raw.contains("sink_asma:"));
    assert!(raw.contains("source_ref: nonprod"));
    // Per-tenant source group was skipped, not scaffolded.
    assert!(!raw.contains("sink_tenants"));
}

#[test]
fn scaffold_twice_leaves_the_file_untouched() {
    let (dir, service) = project();
    service.scaffold().unwrap();
    let first = std::fs::read_to_string(dir.path().join(SINK_GROUPS_FILE)).unwrap();

    let outcome = service.scaffold().unwrap();
    assert!(outcome.created.is_empty());
    let second = std::fs::read_to_string(dir.path().join(SINK_GROUPS_FILE)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn scan_merge_is_scoped_to_one_server() {
    let (_dir, service) = project();
    service.scaffold().unwrap();

    let nonprod: Vec<DatabaseRecord> = serde_yaml::from_str(
        "- {service: chat, name: chat_dev, environment: dev, schemas: [public], table_count: 12}\n",
    )
    .unwrap();
    let prod: Vec<DatabaseRecord> = serde_yaml::from_str(
        "- {service: chat, name: chat_prod, environment: prod, schemas: [public], table_count: 12}\n",
    )
    .unwrap();

    service.update_sources("sink_asma", "nonprod", &nonprod).unwrap();
    service.update_sources("sink_asma", "prod", &prod).unwrap();

    // Rescanning nonprod must not disturb prod's bindings.
    service.update_sources("sink_asma", "nonprod", &nonprod).unwrap();

    let group = service.get("sink_asma").unwrap();
    let chat = &group.sources["chat"];
    assert_eq!(chat.environments["dev"].server, "nonprod");
    assert_eq!(chat.environments["prod"].server, "prod");
    assert_eq!(chat.schemas, ["public"]);
}

#[test]
fn resolved_view_flattens_inheritance() {
    let (_dir, service) = project();
    service.scaffold().unwrap();

    let resolved = service.resolve("sink_asma").unwrap();
    assert_eq!(resolved.pattern, SinkPattern::Inherited);
    assert_eq!(resolved.engine.as_deref(), Some("mssql"));
    assert_eq!(resolved.kafka_topology, Some(KafkaTopology::PerServer));
    assert!(resolved.environment_aware);
    assert_eq!(
        resolved.servers["nonprod"].get_str("host"),
        Some("asma-nonprod.internal")
    );
    assert_eq!(resolved.servers["nonprod"].source_ref(), Some("nonprod"));
    assert_eq!(resolved.inherited_from.as_deref(), Some("asma"));
}

#[test]
fn validate_catches_a_hand_broken_document() {
    let (dir, service) = project();
    service.scaffold().unwrap();

    // Simulate a hand edit pointing a server at a ref that no longer exists.
    let path = dir.path().join(SINK_GROUPS_FILE);
    let raw = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, raw.replace("source_ref: prod", "source_ref: retired")).unwrap();

    let report = service.validate().unwrap();
    assert!(!report.is_valid());
    assert!(report.errors.iter().any(|e| e.contains("retired")));
}

#[test]
fn referenced_server_cannot_be_removed() {
    let (_dir, service) = project();
    service.scaffold().unwrap();

    let records: Vec<DatabaseRecord> = serde_yaml::from_str(
        "- {service: chat, name: chat_dev, environment: dev, schemas: [public]}\n",
    )
    .unwrap();
    service.update_sources("sink_asma", "nonprod", &records).unwrap();

    let err = service.remove_server("sink_asma", "nonprod").unwrap_err();
    assert!(matches!(
        err,
        CoreError::Domain(DomainError::ServerInUse { .. })
    ));

    // Unreferenced server removal still works afterwards.
    service.remove_server("sink_asma", "prod").unwrap();
    assert!(!service.get("sink_asma").unwrap().servers.contains_key("prod"));
}

#[test]
fn standalone_lifecycle_create_add_server_remove() {
    let (_dir, service) = project();

    let created = service
        .create_standalone(
            "warehouse",
            StandaloneSpec {
                engine: "postgres".into(),
                pattern: SinkPattern::Standalone,
                source_group: Some("asma".into()),
                ..StandaloneSpec::default()
            },
        )
        .unwrap();
    assert!(!created.defaulted);

    service
        .add_server("warehouse", "primary", AddServerSpec::default())
        .unwrap();
    let group = service.get("warehouse").unwrap();
    assert_eq!(
        group.servers["primary"].get_str("host"),
        Some("${POSTGRES_SINK_HOST_WAREHOUSE_PRIMARY}")
    );

    service.remove_group("warehouse").unwrap();
    assert!(matches!(
        service.get("warehouse").unwrap_err(),
        CoreError::Domain(DomainError::GroupNotFound { .. })
    ));
}

#[test]
fn inherited_group_cannot_be_removed() {
    let (_dir, service) = project();
    service.scaffold().unwrap();

    let err = service.remove_group("sink_asma").unwrap_err();
    assert!(matches!(
        err,
        CoreError::Domain(DomainError::InheritedGroupRemoval { .. })
    ));
}

#[test]
fn missing_source_document_fails_every_operation() {
    let dir = TempDir::new().unwrap();
    let service = SinkGroupService::new(Box::new(YamlConfigStore::new(dir.path())));
    let err = service.scaffold().unwrap_err();
    assert!(matches!(
        err,
        CoreError::Application(ApplicationError::ConfigNotFound { .. })
    ));
}
