//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::ExitStatus;

use anyhow::Result;

use crate::domain::command::Operation;
use crate::domain::config::ProvisionerConfig;
use crate::domain::environment::Environment;

// ── Inventory Ports ───────────────────────────────────────────────────────────

/// Supplies the machines eligible for inventory membership in this run.
pub trait HostEnumerator {
    /// Machine names in inventory order. Must include the current machine.
    fn machines(&self, config: &ProvisionerConfig) -> Result<Vec<String>>;
}

/// Materializes generated inventory text and returns its path.
///
/// The returned path must stay valid for the rest of the provisioning run.
pub trait InventoryWriter {
    fn write_inventory(&self, content: &str) -> Result<PathBuf>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program with inherited stdio and the given environment added on
    /// top of the current process environment. Returns only its exit status.
    async fn run_status(
        &self,
        program: &str,
        args: &[String],
        env: &Environment,
    ) -> Result<ExitStatus>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Announce an external step. `command_line` is only passed when the
    /// run is verbose.
    fn running(&self, operation: Operation, command_line: Option<&str>);
    /// Emit a success message.
    fn success(&self, message: &str);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts locating and loading the provisioner configuration.
pub trait ConfigStore {
    /// Load and validate the configuration.
    fn load(&self) -> Result<ProvisionerConfig>;
    /// Path the configuration is read from.
    fn path(&self) -> PathBuf;
}
