//! Domain types for the provisioner configuration.
//!
//! Pure data only — no I/O, no async, no filesystem access. Loading lives in
//! `crate::infra::config`.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::error::ConfigError;

// ── Value shapes ─────────────────────────────────────────────────────────────

/// A config value that may be written either as a single string or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for StringOrList {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<Vec<&str>> for StringOrList {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

// ── Config schema ────────────────────────────────────────────────────────────

/// Provisioner settings, already validated by the caller.
///
/// Read-only for the whole provisioning run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProvisionerConfig {
    /// Host pattern passed as `--limit`. Defaults to the current machine.
    pub limit: Option<StringOrList>,
    /// Static inventory to use instead of generating one.
    pub inventory_path: Option<PathBuf>,
    /// Either an `@file` reference or a mapping serialized as JSON.
    pub extra_vars: Option<serde_json::Value>,
    pub sudo: bool,
    pub sudo_user: Option<String>,
    /// Verbosity such as `"v"`, `"vvv"` or `"-vv"`. `true` in YAML means `"v"`.
    #[serde(deserialize_with = "deserialize_verbose")]
    pub verbose: Option<String>,
    pub vault_password_file: Option<PathBuf>,
    pub tags: Option<StringOrList>,
    pub skip_tags: Option<StringOrList>,
    pub start_at_task: Option<String>,
    /// Extra tokens appended after every named flag.
    pub raw_arguments: Option<StringOrList>,
    /// Inventory groups keyed by group spec (`name`, `name:children`, `name:vars`).
    ///
    /// Values that are neither a string nor a list (a `:vars` mapping, a
    /// bare `web:`) load as an empty member list.
    #[serde(deserialize_with = "deserialize_groups")]
    pub groups: IndexMap<String, StringOrList>,
    pub galaxy_role_file: Option<PathBuf>,
    pub galaxy_roles_path: Option<PathBuf>,
    pub playbook: PathBuf,
}

impl ProvisionerConfig {
    /// Checks the few settings the core cannot work without.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingPlaybook`] when no playbook is set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.playbook.as_os_str().is_empty() {
            return Err(ConfigError::MissingPlaybook);
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VerboseSetting {
    Flag(bool),
    Level(String),
}

fn deserialize_verbose<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let setting = Option::<VerboseSetting>::deserialize(deserializer)?;
    Ok(setting.map(|s| match s {
        VerboseSetting::Flag(true) => "v".to_string(),
        VerboseSetting::Flag(false) => String::new(),
        VerboseSetting::Level(level) => level,
    }))
}

fn deserialize_groups<'de, D>(deserializer: D) -> Result<IndexMap<String, StringOrList>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<IndexMap<String, serde_yaml::Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(spec, value)| (spec, group_members(value)))
        .collect())
}

fn group_members(value: serde_yaml::Value) -> StringOrList {
    match value {
        serde_yaml::Value::String(member) => StringOrList::One(member),
        serde_yaml::Value::Sequence(items) => StringOrList::Many(
            items
                .into_iter()
                .filter_map(|item| match item {
                    serde_yaml::Value::String(member) => Some(member),
                    _ => None,
                })
                .collect(),
        ),
        _ => StringOrList::Many(Vec::new()),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
