//! Turns a parsed YAML document into the checklist tree.
//!
//! The document format is forgiving: entries with an unexpected shape are
//! skipped, never reported as errors. Recognised layout:
//!
//! ```yaml
//! sections:
//!   Tools:
//!     sections:
//!       - Editors:
//!           items: [neovim]
//!     items:
//!       - git
//!       - name: docker
//!         enabled: false
//!         commands:
//!           - __MGR__ -S docker
//!           - sudo systemctl enable docker
//! after:
//!   commands:
//!     - echo "Done"
//! ```

use serde_yaml::{Mapping, Value};

use crate::model::{Action, MenuNode};

/// Everything the rest of the program needs from the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checklist {
    pub sections: Vec<MenuNode>,
    pub after: Vec<String>,
    /// Item entries skipped because they had no scalar `name`.
    pub dropped: usize,
}

pub fn build(root: &Value) -> Checklist {
    let mut builder = Builder::default();
    let sections = builder.root_sections(root);
    let after = after_commands(root);
    tracing::debug!(
        sections = sections.len(),
        after = after.len(),
        dropped = builder.dropped,
        "checklist built"
    );
    Checklist {
        sections,
        after,
        dropped: builder.dropped,
    }
}

/// The `after.commands` tail. Anything malformed yields nothing.
pub fn after_commands(root: &Value) -> Vec<String> {
    field(root, "after")
        .and_then(|after| field(after, "commands"))
        .map(string_list)
        .unwrap_or_default()
}

#[derive(Default)]
struct Builder {
    dropped: usize,
}

impl Builder {
    fn root_sections(&mut self, root: &Value) -> Vec<MenuNode> {
        match field(root, "sections") {
            Some(Value::Mapping(map)) => self.section_group(map),
            Some(Value::Sequence(groups)) => self.section_groups(groups),
            _ => Vec::new(),
        }
    }

    fn section_groups(&mut self, groups: &[Value]) -> Vec<MenuNode> {
        let mut nodes = Vec::new();
        for group in groups {
            if let Value::Mapping(map) = untag(group) {
                nodes.extend(self.section_group(map));
            }
        }
        nodes
    }

    /// One mapping of section name to section body.
    fn section_group(&mut self, map: &Mapping) -> Vec<MenuNode> {
        let mut nodes = Vec::with_capacity(map.len());
        for (key, body) in map {
            let Some(label) = scalar(key) else {
                continue;
            };
            nodes.push(self.section(label, body));
        }
        nodes
    }

    fn section(&mut self, label: String, body: &Value) -> MenuNode {
        let mut children = match field(body, "sections") {
            Some(Value::Sequence(groups)) => self.section_groups(groups),
            _ => Vec::new(),
        };

        match field(body, "items") {
            Some(Value::Sequence(entries)) => {
                children.extend(entries.iter().filter_map(|entry| self.item(entry)));
            }
            Some(entry) if scalar(entry).is_some() => {
                children.extend(self.item(entry));
            }
            _ => {}
        }

        MenuNode::section(label, children)
    }

    fn item(&mut self, entry: &Value) -> Option<MenuNode> {
        let entry = untag(entry);
        if let Some(name) = scalar(entry) {
            return Some(MenuNode::package(name));
        }

        let Value::Mapping(_) = entry else {
            tracing::warn!("skipping checklist item that is neither a name nor a mapping");
            self.dropped += 1;
            return None;
        };

        let Some(name) = field(entry, "name").and_then(scalar) else {
            tracing::warn!("skipping checklist item without a `name`");
            self.dropped += 1;
            return None;
        };

        let checked = field(entry, "enabled").and_then(flag).unwrap_or(true);
        let commands = field(entry, "commands").map(string_list).unwrap_or_default();
        let action = if commands.is_empty() {
            Action::Package(name.clone())
        } else {
            Action::Shell(commands)
        };

        Some(MenuNode::checkbox(name, checked, action))
    }
}

/// A scalar becomes one command, a sequence keeps its scalar entries.
fn string_list(value: &Value) -> Vec<String> {
    match untag(value) {
        Value::Sequence(entries) => entries
            .iter()
            .filter_map(|entry| {
                let command = scalar(entry);
                if command.is_none() {
                    tracing::debug!("skipping non-scalar command entry");
                }
                command
            })
            .collect(),
        other => scalar(other).into_iter().collect(),
    }
}

fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

/// Child of a mapping; `null` counts as missing.
fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    untag(value)
        .get(key)
        .map(untag)
        .filter(|child| !child.is_null())
}

/// Text of a scalar. Numbers come back in canonical form (`3.10` is `3.1`);
/// quote a value in the document to keep it verbatim.
fn scalar(value: &Value) -> Option<String> {
    match untag(value) {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn flag(value: &Value) -> Option<bool> {
    match untag(value) {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "on" => Some(true),
            "false" | "no" | "n" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
