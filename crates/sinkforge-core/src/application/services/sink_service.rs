//! Sink-group service: the one orchestrator for every sink-document use case.
//!
//! Each operation follows the same shape: load both documents through the
//! store port, apply a pure domain operation, persist on success. Failed
//! operations never write, so the on-disk document is either the old state
//! or the fully-applied new state.

use tracing::{info, instrument, warn};

use crate::{
    application::ports::ConfigStore,
    domain::{
        mutate::{
            self, AddServerSpec, ScaffoldOutcome, StandaloneCreated, StandaloneSpec,
        },
        resolve::resolve_sink_group,
        validate, DatabaseRecord, ResolvedSinkGroup, SinkGroup, SinkGroups, SinkPattern,
        SourceGroups, ValidationReport,
    },
    error::{CoreError, CoreResult},
};

/// Summary of one sink group for listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkGroupInfo {
    pub name: String,
    pub pattern: SinkPattern,
    pub engine: Option<String>,
    pub servers: usize,
    pub services: usize,
    pub inherited: bool,
}

/// Orchestrates sink-document use cases over an injected store.
pub struct SinkGroupService {
    store: Box<dyn ConfigStore>,
}

impl SinkGroupService {
    pub fn new(store: Box<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// Load both documents, treating a missing sink file as an empty
    /// document. The source document must exist.
    fn load_documents(&self) -> CoreResult<(SinkGroups, SourceGroups)> {
        let source_groups = self.store.load_source_groups()?;
        let sink_groups = if self.store.sink_file_exists() {
            self.store.load_sink_groups()?
        } else {
            SinkGroups::new()
        };
        Ok((sink_groups, source_groups))
    }

    fn save(&self, sink_groups: &SinkGroups, source_groups: &SourceGroups) -> CoreResult<()> {
        self.store.save_sink_groups(sink_groups, source_groups)?;
        Ok(())
    }

    /// Auto-scaffold: create the inherited sink group for every eligible
    /// source group. Persists only when something was created, so a fully
    /// scaffolded project never rewrites the file.
    #[instrument(skip_all)]
    pub fn scaffold(&self) -> CoreResult<ScaffoldOutcome> {
        let (mut sink_groups, source_groups) = self.load_documents()?;
        let outcome = mutate::scaffold_inherited(&mut sink_groups, &source_groups);

        if outcome.created.is_empty() {
            info!(skipped = outcome.skipped.len(), "nothing to scaffold");
        } else {
            info!(created = ?outcome.created, "scaffolded inherited sink groups");
            self.save(&sink_groups, &source_groups)?;
        }
        Ok(outcome)
    }

    /// Create the inherited sink group for one source group. Returns the
    /// derived sink name.
    #[instrument(skip_all, fields(source_group = %source_group))]
    pub fn create_inherited(&self, source_group: &str) -> CoreResult<String> {
        let (mut sink_groups, source_groups) = self.load_documents()?;
        let name = mutate::create_inherited(&mut sink_groups, &source_groups, source_group)
            .map_err(CoreError::Domain)?;
        self.save(&sink_groups, &source_groups)?;
        info!(sink_group = %name, "created inherited sink group");
        Ok(name)
    }

    /// Create a standalone sink group with explicit attributes.
    #[instrument(skip_all, fields(name = %name))]
    pub fn create_standalone(
        &self,
        name: &str,
        spec: StandaloneSpec,
    ) -> CoreResult<StandaloneCreated> {
        let (mut sink_groups, source_groups) = self.load_documents()?;
        let created = mutate::create_standalone(&mut sink_groups, &source_groups, name, spec)
            .map_err(CoreError::Domain)?;
        self.save(&sink_groups, &source_groups)?;
        if created.defaulted {
            warn!(
                source_group = %created.source_group,
                "no source group given; linked to the document's first"
            );
        }
        info!(sink_group = %name, "created standalone sink group");
        Ok(created)
    }

    #[instrument(skip_all, fields(group = %group, server = %server))]
    pub fn add_server(&self, group: &str, server: &str, spec: AddServerSpec) -> CoreResult<()> {
        let (mut sink_groups, source_groups) = self.load_documents()?;
        mutate::add_server(&mut sink_groups, group, server, spec).map_err(CoreError::Domain)?;
        self.save(&sink_groups, &source_groups)?;
        info!("added sink server");
        Ok(())
    }

    #[instrument(skip_all, fields(group = %group, server = %server))]
    pub fn remove_server(&self, group: &str, server: &str) -> CoreResult<()> {
        let (mut sink_groups, source_groups) = self.load_documents()?;
        mutate::remove_server(&mut sink_groups, group, server).map_err(CoreError::Domain)?;
        self.save(&sink_groups, &source_groups)?;
        info!("removed sink server");
        Ok(())
    }

    /// Merge scanned database records into one group's sources, scoped to
    /// the server that was scanned. Returns the number of services the scan
    /// touched.
    #[instrument(skip_all, fields(group = %group, server = %server, records = records.len()))]
    pub fn update_sources(
        &self,
        group: &str,
        server: &str,
        records: &[DatabaseRecord],
    ) -> CoreResult<usize> {
        use crate::domain::DomainError;

        let (mut sink_groups, source_groups) = self.load_documents()?;
        let target = sink_groups
            .get_mut(group)
            .ok_or(DomainError::GroupNotFound {
                name: group.to_string(),
            })
            .map_err(CoreError::Domain)?;
        if !target.servers.contains_key(server) {
            return Err(CoreError::Domain(DomainError::ServerNotFound {
                group: group.to_string(),
                server: server.to_string(),
            }));
        }

        let scanned = mutate::build_sink_sources(records, server);
        let touched = scanned.len();
        mutate::merge_sink_sources(&mut target.sources, scanned, server);

        self.save(&sink_groups, &source_groups)?;
        info!(services = touched, "merged scanned sources");
        Ok(touched)
    }

    #[instrument(skip_all, fields(group = %group))]
    pub fn remove_group(&self, group: &str) -> CoreResult<()> {
        let (mut sink_groups, source_groups) = self.load_documents()?;
        mutate::remove_group(&mut sink_groups, group).map_err(CoreError::Domain)?;
        self.save(&sink_groups, &source_groups)?;
        info!("removed sink group");
        Ok(())
    }

    /// Compute the fully-resolved view of one sink group. Read-only.
    #[instrument(skip_all, fields(group = %group))]
    pub fn resolve(&self, group: &str) -> CoreResult<ResolvedSinkGroup> {
        use crate::domain::DomainError;

        let (sink_groups, source_groups) = self.load_documents()?;
        let raw = sink_groups.get(group).ok_or(DomainError::GroupNotFound {
            name: group.to_string(),
        })?;
        let resolved = resolve_sink_group(group, raw, &source_groups)?;
        Ok(resolved)
    }

    /// Fetch one sink group as written, no deduction applied. Read-only.
    pub fn get(&self, group: &str) -> CoreResult<SinkGroup> {
        use crate::domain::DomainError;

        let (sink_groups, _) = self.load_documents()?;
        sink_groups
            .get(group)
            .cloned()
            .ok_or_else(|| {
                CoreError::Domain(DomainError::GroupNotFound {
                    name: group.to_string(),
                })
            })
    }

    /// Validate the whole sink document against the source document.
    ///
    /// A missing sink file is an empty, valid document. An unparseable sink
    /// file is reported *inside* the report rather than failing the call —
    /// validation exists to describe broken documents.
    #[instrument(skip_all)]
    pub fn validate(&self) -> CoreResult<ValidationReport> {
        let source_groups = self.store.load_source_groups()?;
        if !self.store.sink_file_exists() {
            return Ok(ValidationReport::default());
        }
        let sink_groups = match self.store.load_sink_groups() {
            Ok(groups) => groups,
            Err(err) => {
                return Ok(ValidationReport {
                    errors: vec![err.to_string()],
                    warnings: Vec::new(),
                });
            }
        };
        Ok(validate::validate_all(&sink_groups, &source_groups))
    }

    /// Summaries of every sink group, in document order, with deducible
    /// fields filled in where resolution succeeds.
    #[instrument(skip_all)]
    pub fn list(&self) -> CoreResult<Vec<SinkGroupInfo>> {
        let (sink_groups, source_groups) = self.load_documents()?;

        Ok(sink_groups
            .iter()
            .map(|(name, group)| {
                let resolved = resolve_sink_group(name, group, &source_groups).ok();
                SinkGroupInfo {
                    name: name.clone(),
                    pattern: resolved
                        .as_ref()
                        .map(|r| r.pattern)
                        .or(group.pattern)
                        .unwrap_or_default(),
                    engine: resolved
                        .as_ref()
                        .and_then(|r| r.engine.clone())
                        .or_else(|| group.engine.clone()),
                    servers: group.servers.len(),
                    services: group.sources.len(),
                    inherited: group.is_inherited(),
                }
            })
            .collect())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    /// Minimal in-process store double for service tests. The adapters crate
    /// ships the real implementations.
    #[derive(Clone, Default)]
    struct TestStore {
        inner: Arc<Mutex<TestStoreInner>>,
    }

    #[derive(Default)]
    struct TestStoreInner {
        source_groups: SourceGroups,
        sink_groups: SinkGroups,
        sink_file_present: bool,
        sink_parse_error: bool,
        saves: usize,
    }

    impl TestStore {
        fn with_documents(source_yaml: &str, sink_yaml: Option<&str>) -> Self {
            let store = Self::default();
            {
                let mut inner = store.inner.lock().unwrap();
                inner.source_groups = serde_yaml::from_str(source_yaml).unwrap();
                if let Some(sink_yaml) = sink_yaml {
                    inner.sink_groups = serde_yaml::from_str(sink_yaml).unwrap();
                    inner.sink_file_present = true;
                }
            }
            store
        }

        fn sink_groups(&self) -> SinkGroups {
            self.inner.lock().unwrap().sink_groups.clone()
        }

        fn save_count(&self) -> usize {
            self.inner.lock().unwrap().saves
        }
    }

    impl ConfigStore for TestStore {
        fn load_source_groups(&self) -> Result<SourceGroups, ApplicationError> {
            Ok(self.inner.lock().unwrap().source_groups.clone())
        }

        fn load_sink_groups(&self) -> Result<SinkGroups, ApplicationError> {
            let inner = self.inner.lock().unwrap();
            if inner.sink_parse_error {
                return Err(ApplicationError::ConfigParse {
                    path: PathBuf::from("sink-groups.yaml"),
                    reason: "mapping values are not allowed here".into(),
                });
            }
            Ok(inner.sink_groups.clone())
        }

        fn sink_file_exists(&self) -> bool {
            self.inner.lock().unwrap().sink_file_present
        }

        fn save_sink_groups(
            &self,
            sink_groups: &SinkGroups,
            _source_groups: &SourceGroups,
        ) -> Result<(), ApplicationError> {
            let mut inner = self.inner.lock().unwrap();
            inner.sink_groups = sink_groups.clone();
            inner.sink_file_present = true;
            inner.saves += 1;
            Ok(())
        }
    }

    const SOURCES: &str = r#"
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
"#;

    fn service(store: &TestStore) -> SinkGroupService {
        SinkGroupService::new(Box::new(store.clone()))
    }

    #[test]
    fn scaffold_persists_only_when_something_was_created() {
        let store = TestStore::with_documents(SOURCES, None);
        let svc = service(&store);

        let outcome = svc.scaffold().unwrap();
        assert_eq!(outcome.created, ["sink_asma"]);
        assert_eq!(store.save_count(), 1);

        let outcome = svc.scaffold().unwrap();
        assert!(outcome.created.is_empty());
        assert_eq!(store.save_count(), 1, "no-op scaffold must not rewrite");
    }

    #[test]
    fn failed_mutation_does_not_save() {
        let store = TestStore::with_documents(SOURCES, None);
        let svc = service(&store);
        svc.scaffold().unwrap();
        let saves = store.save_count();

        let err = svc.remove_group("sink_asma").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Domain(crate::domain::DomainError::InheritedGroupRemoval { .. })
        ));
        assert_eq!(store.save_count(), saves);
    }

    #[test]
    fn update_sources_merges_and_reports_touched_services() {
        let store = TestStore::with_documents(SOURCES, None);
        let svc = service(&store);
        svc.scaffold().unwrap();

        let records: Vec<DatabaseRecord> = serde_yaml::from_str(
            "- {service: chat, name: chat_dev, environment: dev, schemas: [public], table_count: 4}\n",
        )
        .unwrap();
        let touched = svc.update_sources("sink_asma", "default", &records).unwrap();
        assert_eq!(touched, 1);

        let saved = store.sink_groups();
        assert_eq!(
            saved["sink_asma"].sources["chat"].environments["dev"].database,
            "chat_dev"
        );
    }

    #[test]
    fn update_sources_requires_known_server() {
        let store = TestStore::with_documents(SOURCES, None);
        let svc = service(&store);
        svc.scaffold().unwrap();

        let err = svc.update_sources("sink_asma", "ghost", &[]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Domain(crate::domain::DomainError::ServerNotFound { .. })
        ));
    }

    #[test]
    fn resolve_fills_deduced_fields() {
        let store = TestStore::with_documents(
            SOURCES,
            Some("sink_asma:\n  servers:\n    default: {source_ref: default}\n"),
        );
        let resolved = service(&store).resolve("sink_asma").unwrap();
        assert_eq!(resolved.engine.as_deref(), Some("mssql"));
        assert_eq!(resolved.servers["default"].get_str("host"), Some("asma-db.internal"));
    }

    #[test]
    fn validate_treats_missing_sink_file_as_empty() {
        let store = TestStore::with_documents(SOURCES, None);
        let report = service(&store).validate().unwrap();
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn validate_reports_parse_failure_inside_the_report() {
        let store = TestStore::with_documents(SOURCES, Some("{}"));
        store.inner.lock().unwrap().sink_parse_error = true;

        let report = service(&store).validate().unwrap();
        assert!(!report.is_valid());
        assert!(report.errors[0].contains("sink-groups.yaml"));
    }

    #[test]
    fn list_summarizes_in_document_order() {
        let store = TestStore::with_documents(
            SOURCES,
            Some(
                r#"
sink_asma:
  servers:
    default: {source_ref: default}
  sources:
    chat:
      dev: {server: default, database: chat_dev}
warehouse:
  source_group: asma
  pattern: standalone
  type: postgres
  servers: {}
"#,
            ),
        );
        let infos = service(&store).list().unwrap();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].name, "sink_asma");
        assert_eq!(infos[0].pattern, SinkPattern::Inherited);
        assert!(infos[0].inherited);
        assert_eq!(infos[0].services, 1);
        assert_eq!(infos[1].engine.as_deref(), Some("postgres"));
        assert!(!infos[1].inherited);
    }
}
