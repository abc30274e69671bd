//! Implementation of the `sinkforge remove` command.

use crate::{
    cli::{GlobalArgs, RemoveArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    args: RemoveArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = super::service(&global, &config);
    service.remove_group(&args.group)?;
    output.success(&format!("Removed sink group '{}'", args.group))?;
    Ok(())
}
