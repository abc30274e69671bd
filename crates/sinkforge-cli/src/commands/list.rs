//! Implementation of the `sinkforge list` command.

use crate::{
    cli::{GlobalArgs, ListArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    args: ListArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = super::service(&global, &config);
    let groups = service.list()?;

    match args.format {
        ListFormat::Table => {
            if groups.is_empty() {
                output.print("No sink groups defined; run 'sinkforge create' to scaffold")?;
                return Ok(());
            }
            output.header("Sink groups:")?;
            for info in &groups {
                let kind = if info.inherited { "inherited" } else { "standalone" };
                output.print(&format!(
                    "  {} ({}, type={}, servers={}, services={})",
                    info.name,
                    kind,
                    info.engine.as_deref().unwrap_or("unknown"),
                    info.servers,
                    info.services,
                ))?;
            }
        }
        ListFormat::List => {
            for info in &groups {
                println!("{}", info.name);
            }
        }
        ListFormat::Json => {
            // Serialise to stdout directly (bypasses OutputManager because
            // JSON output must be parseable even in non-TTY pipes).
            let items: Vec<serde_json::Value> = groups
                .iter()
                .map(|info| {
                    serde_json::json!({
                        "name": info.name,
                        "pattern": info.pattern.as_str(),
                        "type": info.engine,
                        "servers": info.servers,
                        "services": info.services,
                        "inherited": info.inherited,
                    })
                })
                .collect();
            let body = serde_json::to_string_pretty(&items).unwrap_or_else(|_| "[]".into());
            println!("{body}");
        }
    }

    Ok(())
}
