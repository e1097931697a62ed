//! Implementation of the `tempy list` command.

use tracing::debug;

use tempy_core::application::TemplateService;

use crate::{
    cli::{GlobalArgs, ListArgs},
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
    let root = config.template_root(global.tempydir.as_deref());
    debug!(root = %root.display(), machine = args.machine, "listing templates");

    let (store, _renderer) = super::wiring(root);
    let service = TemplateService::new(store);
    let templates = service.list(global.verbose > 0);

    for info in templates {
        let line = info.format_line(args.machine);
        if args.machine {
            // Machine output must survive quiet mode and pipes untouched.
            println!("{line}");
        } else {
            output.print(&line)?;
        }
    }

    Ok(())
}
