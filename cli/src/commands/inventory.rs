//! `ansible-provision inventory` — print the generated inventory.

use anyhow::Result;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::ports::{ConfigStore, HostEnumerator};
use crate::commands::MachineArgs;
use crate::domain::inventory::generate_inventory;
use crate::output::json;

/// Run `ansible-provision inventory`.
///
/// Prints the inventory without writing it anywhere.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded.
pub fn run(app: &AppContext, args: &MachineArgs) -> Result<ExitCode> {
    let config = app.config_store.load()?;
    let machines = args.host_enumerator().machines(&config)?;
    let inventory = generate_inventory(&config.groups, &machines);

    if app.is_json() {
        println!("{}", json::format_inventory(&inventory)?);
    } else {
        print!("{inventory}");
    }
    Ok(ExitCode::SUCCESS)
}
