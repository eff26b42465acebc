//! Command implementations

pub mod command;
pub mod inventory;
pub mod provision;

use std::path::PathBuf;

use clap::Args;

use crate::infra::hosts::StaticHosts;

/// Default directory for the generated inventory.
pub const DEFAULT_INVENTORY_DIR: &str = ".ansible-provision/inventory";

/// Machines taking part in the run.
#[derive(Args)]
pub struct MachineArgs {
    /// Machine being provisioned (default `--limit`)
    #[arg(long, env = "ANSIBLE_PROVISION_MACHINE")]
    pub machine: String,

    /// Peer machine to include in the inventory (repeatable)
    #[arg(long = "host", value_name = "NAME")]
    pub hosts: Vec<String>,
}

impl MachineArgs {
    /// Host enumerator for these machines: `--machine` first, then each `--host`.
    #[must_use]
    pub fn host_enumerator(&self) -> StaticHosts {
        StaticHosts::new(&self.machine, &self.hosts)
    }
}

/// Arguments shared by commands that materialize the inventory.
#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub machines: MachineArgs,

    /// Directory the generated inventory is written to
    #[arg(long, default_value = DEFAULT_INVENTORY_DIR)]
    pub inventory_dir: PathBuf,
}
