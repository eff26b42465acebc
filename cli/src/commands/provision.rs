//! `ansible-provision provision` — run Galaxy (if configured) and the playbook.

use anyhow::Result;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::provision::{ProvisionRun, RunOptions};
use crate::commands::RunArgs;
use crate::infra::fs::FsInventoryWriter;
use crate::output::TerminalReporter;

/// Run `ansible-provision provision`.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, the inventory cannot be
/// written, or an external command fails.
pub async fn run(app: &AppContext, args: &RunArgs) -> Result<ExitCode> {
    let config = app.config_store.load()?;
    let run = ProvisionRun::new(
        &config,
        RunOptions {
            machine_name: args.machines.machine.clone(),
            color: app.output.use_colors,
        },
        args.machines.host_enumerator(),
        FsInventoryWriter::new(&args.inventory_dir),
    );
    let reporter = TerminalReporter::new(&app.output);
    run.provision(&app.runner, &reporter).await?;
    Ok(ExitCode::SUCCESS)
}
