//! Implementation of the `sinkforge validate` command.

use crate::{
    cli::{GlobalArgs, ValidateArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(
    args: ValidateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = super::service(&global, &config);
    let report = service.validate()?;

    for error in &report.errors {
        output.error(error)?;
    }
    for warning in &report.warnings {
        output.warning(warning)?;
    }

    let failed = !report.is_valid() || (args.strict && !report.warnings.is_empty());
    if failed {
        return Err(CliError::ValidationFailed {
            errors: report.errors.len(),
            warnings: report.warnings.len(),
        });
    }

    if report.warnings.is_empty() {
        output.success("sink-groups.yaml is valid")?;
    } else {
        output.success(&format!(
            "sink-groups.yaml is valid ({} warning(s))",
            report.warnings.len()
        ))?;
    }
    Ok(())
}
