//! `ansible-provision command` — show the commands a provisioning run would execute.

use anyhow::Result;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::provision::{ProvisionRun, RunOptions};
use crate::commands::RunArgs;
use crate::infra::fs::FsInventoryWriter;
use crate::output::json;

/// Run `ansible-provision command`.
///
/// Writes the inventory (unless a static one is configured) and prints the
/// Galaxy and playbook command lines without running them.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the inventory cannot
/// be written.
pub fn run(app: &AppContext, args: &RunArgs) -> Result<ExitCode> {
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

    let galaxy = run.galaxy_invocation();
    let playbook = run.playbook_invocation()?;

    if app.is_json() {
        println!("{}", json::format_plan(galaxy.as_ref(), &playbook)?);
    } else {
        if let Some(galaxy) = &galaxy {
            println!("{}", galaxy.command_line());
        }
        println!("{}", playbook.command_line());
    }
    Ok(ExitCode::SUCCESS)
}
