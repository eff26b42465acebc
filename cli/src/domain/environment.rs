//! Environment variables handed to the external tool.

use std::collections::BTreeMap;

/// Disables interpreter output buffering so progress streams line by line.
pub const UNBUFFERED_VAR: &str = "PYTHONUNBUFFERED";
pub const FORCE_COLOR_VAR: &str = "ANSIBLE_FORCE_COLOR";
pub const NO_COLOR_VAR: &str = "ANSIBLE_NOCOLOR";
pub const ROLES_PATH_VAR: &str = "ANSIBLE_ROLES_PATH";

/// Process environment, ordered by variable name.
pub type Environment = BTreeMap<String, String>;

/// Builds the base environment for one invocation.
///
/// Exactly one of [`FORCE_COLOR_VAR`] / [`NO_COLOR_VAR`] is present.
#[must_use]
pub fn build_environment(color: bool) -> Environment {
    let mut env = Environment::new();
    env.insert(UNBUFFERED_VAR.to_string(), "1".to_string());
    let color_var = if color { FORCE_COLOR_VAR } else { NO_COLOR_VAR };
    env.insert(color_var.to_string(), "true".to_string());
    env
}
