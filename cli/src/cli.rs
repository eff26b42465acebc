//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Generate Ansible inventories and run playbooks against managed machines
#[derive(Parser)]
#[command(
    name = "ansible-provision",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Provisioner config file [default: ./provision.yaml]
    #[arg(long, global = true, env = "ANSIBLE_PROVISION_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the generated inventory
    Inventory(commands::MachineArgs),

    /// Print the commands a provisioning run would execute
    Command(commands::RunArgs),

    /// Install Galaxy roles (if configured) and run the playbook
    Provision(commands::RunArgs),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            config,
            json,
            quiet,
            no_color,
            command,
        } = self;
        let app = AppContext::new(AppFlags {
            config,
            no_color,
            quiet,
            json,
        });
        match command {
            Command::Inventory(args) => commands::inventory::run(&app, &args),
            Command::Command(args) => commands::command::run(&app, &args),
            Command::Provision(args) => commands::provision::run(&app, &args).await,
        }
    }
}
