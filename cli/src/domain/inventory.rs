//! Inventory generation: group resolution and INI-style rendering.
//!
//! Unknown hosts and unknown child groups are dropped silently. A partially
//! specified group map still produces a usable inventory.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;

use crate::domain::arguments::as_array;
use crate::domain::config::StringOrList;

pub const INVENTORY_HEADER: &str = "# Generated by ansible-provision";

const CHILDREN_SUFFIX: &str = ":children";
const VARS_MARKER: &str = ":vars";

// ── Group classification ──────────────────────────────────────────────────────

/// How a key of the `groups` map is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind<'a> {
    /// A host group, rendered under its own name.
    Plain(&'a str),
    /// A group of groups; carries the parent name without `:children`.
    Children(&'a str),
    /// Group variables. Never rendered.
    Vars,
}

#[must_use]
pub fn classify(spec: &str) -> GroupKind<'_> {
    if let Some(parent) = spec.strip_suffix(CHILDREN_SUFFIX) {
        GroupKind::Children(parent)
    } else if spec.contains(VARS_MARKER) {
        GroupKind::Vars
    } else {
        GroupKind::Plain(spec)
    }
}

// ── Sections ──────────────────────────────────────────────────────────────────

/// One `[name]` block of the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSection {
    pub name: String,
    pub members: Vec<String>,
}

impl GroupSection {
    fn new(name: &str, members: impl IntoIterator<Item = String>) -> Self {
        let mut seen = HashSet::new();
        let members = members
            .into_iter()
            .filter(|m| seen.insert(m.clone()))
            .collect();
        Self {
            name: name.to_string(),
            members,
        }
    }
}

impl fmt::Display for GroupSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.name)?;
        for member in &self.members {
            writeln!(f, "{member}")?;
        }
        Ok(())
    }
}

/// Resolves the configured groups against the machines known to this run.
///
/// Plain groups come first, then groups of groups, each in map order. A plain
/// group keeps only members found in `known_machines`; a group of groups keeps
/// only members that are themselves defined (plain or children) groups.
#[must_use]
pub fn resolve_groups(
    groups: &IndexMap<String, StringOrList>,
    known_machines: &[String],
) -> Vec<GroupSection> {
    let known: HashSet<&str> = known_machines.iter().map(String::as_str).collect();
    let mut defined: HashSet<&str> = HashSet::new();
    let mut plain_sections = Vec::new();
    let mut children_specs = Vec::new();

    for (spec, members) in groups {
        match classify(spec) {
            GroupKind::Plain(name) => {
                defined.insert(name);
                let present = as_array(members)
                    .into_iter()
                    .filter(|m| known.contains(m.as_str()));
                plain_sections.push(GroupSection::new(name, present));
            }
            GroupKind::Children(parent) => {
                defined.insert(parent);
                children_specs.push((parent, members));
            }
            GroupKind::Vars => {}
        }
    }

    let children_sections = children_specs.into_iter().map(|(parent, members)| {
        let present = as_array(members)
            .into_iter()
            .filter(|m| defined.contains(m.as_str()));
        GroupSection::new(parent, present)
    });

    plain_sections.into_iter().chain(children_sections).collect()
}

/// Renders sections as text, one blank line before each header.
#[must_use]
pub fn render_groups(sections: &[GroupSection]) -> String {
    sections.iter().map(|s| format!("\n{s}")).collect()
}

/// Renders the full inventory: header, blank line, host lines, group sections.
#[must_use]
pub fn render_inventory(machines: &[String], sections: &[GroupSection]) -> String {
    let mut out = format!("{INVENTORY_HEADER}\n\n");
    let mut seen = HashSet::new();
    for machine in machines {
        if seen.insert(machine.as_str()) {
            out.push_str(machine);
            out.push('\n');
        }
    }
    out.push_str(&render_groups(sections));
    out
}

/// Resolves groups and renders the inventory for `machines` in one step.
#[must_use]
pub fn generate_inventory(
    groups: &IndexMap<String, StringOrList>,
    machines: &[String],
) -> String {
    let sections = resolve_groups(groups, machines);
    render_inventory(machines, &sections)
}
