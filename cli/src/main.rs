//! ansible-provision - inventory generation and playbook invocation

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ansible_provision::cli::Cli;
use ansible_provision::domain::ProvisionError;
use ansible_provision::output::json;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries inventory and command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            if json_mode {
                let code = match e.downcast_ref::<ProvisionError>() {
                    Some(ProvisionError::CommandFailed { .. }) => "command_failed",
                    Some(ProvisionError::Terminated { .. }) => "terminated",
                    None => "error",
                };
                match json::format_error(&format!("{e:#}"), code) {
                    Ok(obj) => println!("{obj}"),
                    Err(_) => eprintln!("Error: {e:#}"),
                }
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}
