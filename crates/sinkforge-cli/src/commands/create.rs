//! Implementation of the `sinkforge create` command.

use crate::{
    cli::{CreateArgs, GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    args: CreateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = super::service(&global, &config);

    match args.source_group {
        Some(source_group) => {
            let sink_name = service.create_inherited(&source_group)?;
            output.success(&format!(
                "Created sink group '{sink_name}' from source group '{source_group}'"
            ))?;
        }
        None => {
            let outcome = service.scaffold()?;

            for name in &outcome.created {
                output.success(&format!("Created sink group '{name}'"))?;
            }
            for skip in &outcome.skipped {
                output.info(&format!("Skipped '{}': {}", skip.source_group, skip.reason))?;
            }
            if outcome.created.is_empty() {
                output.print("Nothing to create; every eligible source group already has a sink group")?;
            }
        }
    }

    Ok(())
}
