//! Implementation of the `sinkforge standalone` command.

use sinkforge_core::domain::mutate::StandaloneSpec;

use crate::{
    cli::{GlobalArgs, StandaloneArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    args: StandaloneArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = super::service(&global, &config);

    let spec = StandaloneSpec {
        engine: args.engine,
        pattern: args.pattern.into(),
        environment_aware: args.environment_aware,
        source_group: args.source_group,
        description: args.description,
        database_exclude_patterns: args.database_exclude_patterns,
        schema_exclude_patterns: args.schema_exclude_patterns,
    };

    let created = service.create_standalone(&args.name, spec)?;

    output.success(&format!("Created standalone sink group '{}'", args.name))?;
    if created.defaulted {
        output.warning(&format!(
            "No source group given; linked to '{}' (first in source-groups.yaml)",
            created.source_group
        ))?;
    }
    output.print(&format!(
        "Add servers next: sinkforge server add {} <name> --host ...",
        args.name
    ))?;

    Ok(())
}
