//! Implementation of the `sinkforge server` subcommands.

use sinkforge_core::domain::mutate::AddServerSpec;

use crate::{
    cli::{GlobalArgs, ServerCommands},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    cmd: ServerCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = super::service(&global, &config);

    match cmd {
        ServerCommands::Add(args) => {
            let spec = AddServerSpec {
                source_ref: args.source_ref,
                engine: args.engine,
                host: args.host,
                port: args.port,
                user: args.user,
                password: args.password,
            };
            service.add_server(&args.group, &args.server, spec)?;
            output.success(&format!(
                "Added server '{}' to sink group '{}'",
                args.server, args.group
            ))?;
        }
        ServerCommands::Remove(args) => {
            service.remove_server(&args.group, &args.server)?;
            output.success(&format!(
                "Removed server '{}' from sink group '{}'",
                args.server, args.group
            ))?;
        }
    }

    Ok(())
}
