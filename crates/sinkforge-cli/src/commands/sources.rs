//! Implementation of the `sinkforge sources` subcommands.

use std::path::Path;

use sinkforge_core::domain::DatabaseRecord;

use crate::{
    cli::{GlobalArgs, SourcesCommands, SourcesUpdateArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(
    cmd: SourcesCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        SourcesCommands::Update(args) => update(args, global, config, output),
    }
}

fn update(
    args: SourcesUpdateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let records = load_records(&args.from)?;
    output.info(&format!(
        "Loaded {} database record(s) from {}",
        records.len(),
        args.from.display()
    ))?;

    let service = super::service(&global, &config);
    let touched = service.update_sources(&args.group, &args.server, &records)?;

    output.success(&format!(
        "Updated {touched} service(s) in '{}' for server '{}'",
        args.group, args.server
    ))?;
    Ok(())
}

/// Parse a scan file by extension: `.json` via serde_json, anything else as
/// YAML (JSON is a YAML subset, so mislabeled files still load).
fn load_records(path: &Path) -> CliResult<Vec<DatabaseRecord>> {
    let raw = std::fs::read_to_string(path).map_err(|e| CliError::ScanFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&raw).map_err(|e| CliError::ScanFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    } else {
        serde_yaml::from_str(&raw).map_err(|e| CliError::ScanFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
