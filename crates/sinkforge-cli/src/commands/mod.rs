//! Command handlers.
//!
//! Each submodule owns one subcommand.  Handlers wire the CLI arguments to
//! the core service and format the result; no document logic lives here.

use std::path::PathBuf;

use sinkforge_adapters::YamlConfigStore;
use sinkforge_core::application::SinkGroupService;

use crate::cli::GlobalArgs;
use crate::config::AppConfig;

pub mod completions;
pub mod create;
pub mod list;
pub mod remove;
pub mod server;
pub mod show;
pub mod sources;
pub mod standalone;
pub mod validate;

/// Build the service over the YAML store for the resolved project directory.
///
/// Precedence: `-C/--project-dir` flag, then the config file's
/// `project.dir`, then the current directory.
pub(crate) fn service(global: &GlobalArgs, config: &AppConfig) -> SinkGroupService {
    let dir = global
        .project_dir
        .clone()
        .or_else(|| config.project.dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    SinkGroupService::new(Box::new(YamlConfigStore::new(dir)))
}
