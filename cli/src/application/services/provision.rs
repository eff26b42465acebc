//! Application service — one provisioning run.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.
//!
//! A `ProvisionRun` owns the per-run inventory cache and is not `Sync`, so a
//! single run cannot be shared between concurrently provisioned machines.

use std::cell::OnceCell;
use std::path::PathBuf;
use std::process::ExitStatus;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, HostEnumerator, InventoryWriter, ProgressReporter};
use crate::domain::command::{
    InvocationDescriptor, Operation, galaxy_invocation, playbook_invocation, verbosity_argument,
};
use crate::domain::config::ProvisionerConfig;
use crate::domain::error::ProvisionError;
use crate::domain::inventory::generate_inventory;

/// Per-run options that do not come from the provisioner config.
pub struct RunOptions {
    /// Name of the machine being provisioned; the default `--limit`.
    pub machine_name: String,
    /// Whether the caller's terminal renders color.
    pub color: bool,
}

/// Composes inventory generation and argument assembly for a single run.
pub struct ProvisionRun<'a, H: HostEnumerator, W: InventoryWriter> {
    config: &'a ProvisionerConfig,
    opts: RunOptions,
    hosts: H,
    writer: W,
    inventory_path: OnceCell<PathBuf>,
}

impl<'a, H: HostEnumerator, W: InventoryWriter> ProvisionRun<'a, H, W> {
    pub fn new(config: &'a ProvisionerConfig, opts: RunOptions, hosts: H, writer: W) -> Self {
        Self {
            config,
            opts,
            hosts,
            writer,
            inventory_path: OnceCell::new(),
        }
    }

    /// Renders the inventory for the machines known to this run.
    ///
    /// # Errors
    ///
    /// Returns an error if host enumeration fails.
    pub fn inventory_text(&self) -> Result<String> {
        let machines = self
            .hosts
            .machines(self.config)
            .context("failed to enumerate inventory hosts")?;
        Ok(generate_inventory(&self.config.groups, &machines))
    }

    /// Path passed as `--inventory-file`.
    ///
    /// A configured inventory is used as-is. Otherwise the inventory is
    /// generated and written on the first call only; later calls return the
    /// cached path.
    ///
    /// # Errors
    ///
    /// Returns an error if host enumeration or the inventory write fails.
    pub fn inventory_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.config.inventory_path {
            return Ok(path.clone());
        }
        if let Some(path) = self.inventory_path.get() {
            tracing::debug!(path = %path.display(), "reusing generated inventory");
            return Ok(path.clone());
        }
        let content = self.inventory_text()?;
        let path = self
            .writer
            .write_inventory(&content)
            .context("failed to write generated inventory")?;
        tracing::debug!(path = %path.display(), "generated inventory");
        Ok(self.inventory_path.get_or_init(|| path).clone())
    }

    /// The `ansible-playbook` invocation for this run.
    ///
    /// # Errors
    ///
    /// Returns an error if the inventory path cannot be resolved.
    pub fn playbook_invocation(&self) -> Result<InvocationDescriptor> {
        let inventory = self.inventory_path()?;
        let invocation = playbook_invocation(
            self.config,
            &self.opts.machine_name,
            &inventory,
            self.opts.color,
        );
        tracing::debug!(args = ?invocation.args, "assembled playbook arguments");
        Ok(invocation)
    }

    /// The role-install invocation, when a Galaxy role file is configured.
    #[must_use]
    pub fn galaxy_invocation(&self) -> Option<InvocationDescriptor> {
        galaxy_invocation(self.config, self.opts.color)
    }

    /// Whether the configured verbosity enables a `-v` flag.
    #[must_use]
    pub fn is_verbose(&self) -> bool {
        verbosity_argument(self.config.verbose.as_deref()).is_some()
    }

    /// Tells the operator which step is about to run.
    pub fn report(
        &self,
        reporter: &impl ProgressReporter,
        operation: Operation,
        invocation: &InvocationDescriptor,
    ) {
        let command_line = self.is_verbose().then(|| invocation.command_line());
        reporter.running(operation, command_line.as_deref());
    }

    /// Runs the Galaxy step (if configured) and then the playbook.
    ///
    /// # Errors
    ///
    /// Returns an error if inventory generation fails, a command cannot be
    /// started, or a command exits unsuccessfully.
    pub async fn provision(
        &self,
        runner: &impl CommandRunner,
        reporter: &impl ProgressReporter,
    ) -> Result<()> {
        if let Some(galaxy) = self.galaxy_invocation() {
            self.execute(runner, reporter, Operation::Galaxy, &galaxy)
                .await?;
        }
        let playbook = self.playbook_invocation()?;
        self.execute(runner, reporter, Operation::Playbook, &playbook)
            .await?;
        reporter.success(&format!("{} provisioned", self.opts.machine_name));
        Ok(())
    }

    async fn execute(
        &self,
        runner: &impl CommandRunner,
        reporter: &impl ProgressReporter,
        operation: Operation,
        invocation: &InvocationDescriptor,
    ) -> Result<()> {
        self.report(reporter, operation, invocation);
        tracing::info!(program = %invocation.program, ?operation, "starting external command");
        let status = runner
            .run_status(&invocation.program, &invocation.args, &invocation.env)
            .await
            .with_context(|| format!("failed to run {}", invocation.program))?;
        check_status(&invocation.program, status)
    }
}

fn check_status(program: &str, status: ExitStatus) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    let err = match status.code() {
        Some(code) => ProvisionError::CommandFailed {
            program: program.to_string(),
            code,
        },
        None => ProvisionError::Terminated {
            program: program.to_string(),
        },
    };
    Err(err.into())
}
