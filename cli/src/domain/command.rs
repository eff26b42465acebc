//! Assembly of the external tool invocations.
//!
//! Flag order is fixed here and does not depend on the order of keys in the
//! configuration. Raw arguments always follow the named flags so the tool's
//! last-flag-wins rule gives them precedence.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::arguments::{ArgumentList, as_array, as_list_argument};
use crate::domain::config::ProvisionerConfig;
use crate::domain::environment::{Environment, ROLES_PATH_VAR, build_environment};

pub const PLAYBOOK_PROGRAM: &str = "ansible-playbook";
pub const GALAXY_PROGRAM: &str = "ansible-galaxy";

/// One or more `v`, optionally preceded by a dash.
#[allow(clippy::expect_used)] // Static pattern, verified by tests
static VERBOSITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(v+)$").expect("valid regex"));

// ── Types ─────────────────────────────────────────────────────────────────────

/// Which external step is being run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Playbook,
    Galaxy,
}

impl Operation {
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Playbook => "Running the Ansible provisioner",
            Self::Galaxy => "Installing Ansible Galaxy roles",
        }
    }
}

/// Program, ordered arguments and environment for one external command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationDescriptor {
    pub program: String,
    pub args: Vec<String>,
    pub env: Environment,
}

impl InvocationDescriptor {
    /// Renders the invocation as a copy-pasteable shell line.
    ///
    /// `--limit` and `--start-at-task` values are double-quoted and
    /// `--extra-vars` values single-quoted; other tokens are emitted as-is.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = String::new();
        for (key, value) in &self.env {
            let _ = write!(line, "{key}={value} ");
        }
        line.push_str(&self.program);
        for arg in &self.args {
            line.push(' ');
            line.push_str(&shell_token(arg));
        }
        line
    }
}

fn shell_token(arg: &str) -> String {
    for flag in ["--limit=", "--start-at-task="] {
        if let Some(value) = arg.strip_prefix(flag) {
            return format!("{flag}\"{value}\"");
        }
    }
    if let Some(value) = arg.strip_prefix("--extra-vars=") {
        return format!("--extra-vars='{}'", value.replace('\'', r"'\''"));
    }
    arg.to_string()
}

// ── Argument rules ────────────────────────────────────────────────────────────

/// Returns the verbosity flag, or `None` when verbosity is off.
///
/// `"vvv"` and `"-vvv"` give `-vvv`; any other non-empty value falls back to `-v`.
#[must_use]
pub fn verbosity_argument(verbose: Option<&str>) -> Option<String> {
    let verbose = verbose.filter(|v| !v.is_empty())?;
    let flag = VERBOSITY_RE
        .captures(verbose)
        .and_then(|c| c.get(1))
        .map_or_else(|| "-v".to_string(), |v| format!("-{}", v.as_str()));
    Some(flag)
}

/// `@file` references pass through; anything else becomes compact JSON.
#[must_use]
pub fn extra_vars_argument(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) if s.starts_with('@') => s.clone(),
        other => other.to_string(),
    }
}

/// Builds the playbook argument vector in its fixed order.
#[must_use]
pub fn playbook_arguments(
    config: &ProvisionerConfig,
    machine_name: &str,
    inventory_path: &Path,
) -> ArgumentList {
    let mut args = ArgumentList::new();

    let limit = config
        .limit
        .as_ref()
        .map_or_else(|| machine_name.to_string(), as_list_argument);
    args.option("limit", Some(limit));
    args.option("inventory-file", Some(inventory_path.display()));
    args.option(
        "extra-vars",
        config.extra_vars.as_ref().map(extra_vars_argument),
    );
    args.flag("sudo", config.sudo);
    args.option("sudo-user", config.sudo_user.as_deref());
    if let Some(flag) = verbosity_argument(config.verbose.as_deref()) {
        args.push(flag);
    }
    args.option(
        "vault-password-file",
        config.vault_password_file.as_deref().map(Path::display),
    );
    args.list_option("tags", config.tags.as_ref());
    args.list_option("skip-tags", config.skip_tags.as_ref());
    args.option("start-at-task", config.start_at_task.as_deref());

    if let Some(raw) = &config.raw_arguments {
        args.extend(as_array(raw));
    }
    args
}

/// Where Galaxy installs roles: the configured path, else `roles/` next to the playbook.
#[must_use]
pub fn galaxy_roles_path(config: &ProvisionerConfig) -> PathBuf {
    config.galaxy_roles_path.clone().unwrap_or_else(|| {
        config
            .playbook
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join("roles")
    })
}

/// Builds the full playbook invocation.
#[must_use]
pub fn playbook_invocation(
    config: &ProvisionerConfig,
    machine_name: &str,
    inventory_path: &Path,
    color: bool,
) -> InvocationDescriptor {
    let mut args = playbook_arguments(config, machine_name, inventory_path);
    args.push(config.playbook.display().to_string());

    let mut env = build_environment(color);
    if config.galaxy_role_file.is_some() {
        env.insert(
            ROLES_PATH_VAR.to_string(),
            galaxy_roles_path(config).display().to_string(),
        );
    }

    InvocationDescriptor {
        program: PLAYBOOK_PROGRAM.to_string(),
        args: args.into_vec(),
        env,
    }
}

/// Builds the role-install invocation, if a Galaxy role file is configured.
#[must_use]
pub fn galaxy_invocation(config: &ProvisionerConfig, color: bool) -> Option<InvocationDescriptor> {
    let role_file = config.galaxy_role_file.as_deref()?;
    let mut args = ArgumentList::new();
    args.push("install");
    args.option("role-file", Some(role_file.display()));
    args.option("roles-path", Some(galaxy_roles_path(config).display()));
    args.flag("force", true);

    Some(InvocationDescriptor {
        program: GALAXY_PROGRAM.to_string(),
        args: args.into_vec(),
        env: build_environment(color),
    })
}

// ── Unit tests ───────────────────────────────────────────────────────────────
