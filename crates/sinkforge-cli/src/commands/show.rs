//! Implementation of the `sinkforge show` command.

use serde::Serialize;

use crate::{
    cli::{GlobalArgs, OutputFormat, ShowArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(
    args: ShowArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = super::service(&global, &config);

    // Document bodies go straight to stdout, not through the OutputManager:
    // `show` output is meant to be piped.
    if args.resolved {
        let resolved = service.resolve(&args.group)?;
        print_document(&args.group, &resolved, output.format())?;
    } else {
        let group = service.get(&args.group)?;
        print_document(&args.group, &group, output.format())?;
    }

    Ok(())
}

fn print_document<T: Serialize>(name: &str, value: &T, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let body = serde_json::to_string_pretty(value).map_err(to_internal)?;
            println!("{body}");
        }
        _ => {
            let body = serde_yaml::to_string(value).map_err(to_internal)?;
            print!("{name}:\n{}", indent(&body));
        }
    }
    Ok(())
}

fn indent(yaml: &str) -> String {
    yaml.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("  {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}

fn to_internal(err: impl std::error::Error) -> CliError {
    CliError::InvalidInput {
        message: format!("failed to serialize group: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_prefixes_every_nonempty_line() {
        assert_eq!(indent("a: 1\nb:\n  c: 2\n"), "  a: 1\n  b:\n    c: 2\n");
    }
}
