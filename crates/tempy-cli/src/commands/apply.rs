//! Implementation of the `tempy apply` command.

use std::path::PathBuf;

use tracing::debug;

use tempy_adapters::LocalFilesystem;
use tempy_core::application::ApplyService;

use crate::{
    cli::{ApplyArgs, GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    args: ApplyArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let (output_dir, template_args) = extract_output(args.args)?;
    let root = config.template_root(global.tempydir.as_deref());
    debug!(
        template = %args.name,
        root = %root.display(),
        output = %output_dir.display(),
        "applying template"
    );

    let (store, renderer) = super::wiring(root);
    let service = ApplyService::new(store, renderer, Box::new(LocalFilesystem::new()));
    let report = service.apply(&args.name, &template_args, &output_dir, global.verbose > 0)?;

    for path in &report.written {
        output.print(&format!("  {}", path.display()))?;
    }
    output.success(&format!(
        "Applied '{}' ({} file{})",
        args.name,
        report.written.len(),
        if report.written.len() == 1 { "" } else { "s" }
    ))?;

    Ok(())
}

/// Pull `--output DIR` / `-o DIR` / `--output=DIR` out of the trailing token
/// list, leaving everything else for the template's own parser.
///
/// Clap never sees these tokens (the apply arguments are `trailing_var_arg`),
/// so the flag may appear anywhere among the template arguments. Defaults to
/// the current directory.
fn extract_output(args: Vec<String>) -> CliResult<(PathBuf, Vec<String>)> {
    let mut output_dir = PathBuf::from(".");
    let mut rest = Vec::with_capacity(args.len());

    let mut iter = args.into_iter();
    while let Some(token) = iter.next() {
        if token == "--output" || token == "-o" {
            match iter.next() {
                Some(dir) => output_dir = PathBuf::from(dir),
                None => {
                    return Err(crate::error::CliError::InvalidInput {
                        message: format!("'{token}' requires a directory argument"),
                    });
                }
            }
        } else if let Some(dir) = token.strip_prefix("--output=") {
            output_dir = PathBuf::from(dir);
        } else {
            rest.push(token);
        }
    }

    Ok((output_dir, rest))
}
