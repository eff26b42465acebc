//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` spawns the external tool with inherited stdio so its
//! output streams straight to the operator's terminal.

use std::process::ExitStatus;

use anyhow::{Context, Result};

use crate::application::ports::CommandRunner;
use crate::domain::environment::Environment;

/// Production `CommandRunner` backed by `tokio::process`.
///
/// No timeout: playbook runs are bounded by the tool itself, and the child is
/// killed if the future is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioCommandRunner;

impl CommandRunner for TokioCommandRunner {
    async fn run_status(
        &self,
        program: &str,
        args: &[String],
        env: &Environment,
    ) -> Result<ExitStatus> {
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .envs(env)
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        child
            .wait()
            .await
            .with_context(|| format!("waiting for {program}"))
    }
}
