//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors raised while checking a loaded configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No playbook configured. Set 'playbook' in the provisioner config.")]
    MissingPlaybook,
}

// ── Provision errors ──────────────────────────────────────────────────────────

/// Errors raised while running the external provisioning commands.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("{program} failed with exit code {code}")]
    CommandFailed { program: String, code: i32 },

    #[error("{program} was terminated by a signal")]
    Terminated { program: String },
}
