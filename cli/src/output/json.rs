//! JSON output helpers for `--json` code paths.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::domain::command::InvocationDescriptor;

#[derive(Serialize)]
struct Plan<'a> {
    galaxy: Option<&'a InvocationDescriptor>,
    playbook: &'a InvocationDescriptor,
}

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format the planned invocations as `{"galaxy": ..., "playbook": ...}`.
///
/// Each invocation is an object with `program`, `args` and `env`; `galaxy`
/// is `null` when no role file is configured.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_plan(
    galaxy: Option<&InvocationDescriptor>,
    playbook: &InvocationDescriptor,
) -> Result<String> {
    serde_json::to_string_pretty(&Plan { galaxy, playbook }).context("JSON serialization failed")
}

/// Format generated inventory text as `{"inventory": "..."}`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_inventory(inventory: &str) -> Result<String> {
    let obj = serde_json::json!({ "inventory": inventory });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
