use crate::alias::Aliases;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Checkbox,
    Section,
}

/// What happens when a checked item ends up in the script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Install a package through the configured package manager.
    Package(String),
    /// Run literal shell commands, joined with `&&`.
    Shell(Vec<String>),
}

impl Action {
    /// Render this action as a single command line.
    ///
    /// A `Shell` action is joined first and substituted second, so alias tokens
    /// anywhere in the joined string are expanded. The result is one opaque unit.
    pub fn render(&self, aliases: &Aliases) -> String {
        match self {
            Action::Package(name) => aliases.install_command(name),
            Action::Shell(commands) => aliases.substitute(&commands.join(" && ")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    pub label: String,
    pub kind: NodeKind,
    /// Only meaningful for checkboxes.
    pub checked: bool,
    /// Only populated for sections.
    pub children: Vec<MenuNode>,
    /// Always `Some` for checkboxes, always `None` for sections.
    pub action: Option<Action>,
}

impl MenuNode {
    pub fn checkbox(label: impl Into<String>, checked: bool, action: Action) -> Self {
        Self {
            label: label.into(),
            kind: NodeKind::Checkbox,
            checked,
            children: Vec::new(),
            action: Some(action),
        }
    }

    pub fn section(label: impl Into<String>, children: Vec<MenuNode>) -> Self {
        Self {
            label: label.into(),
            kind: NodeKind::Section,
            checked: true,
            children,
            action: None,
        }
    }

    /// Bare package entry, checked by default.
    pub fn package(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::checkbox(name.clone(), true, Action::Package(name))
    }

    pub fn is_section(&self) -> bool {
        self.kind == NodeKind::Section
    }

    pub fn toggle(&mut self) {
        if self.kind == NodeKind::Checkbox {
            self.checked = !self.checked;
        }
    }

    /// Number of checkbox leaves under (or at) this node that are checked.
    pub fn checked_leaves(&self) -> usize {
        match self.kind {
            NodeKind::Checkbox => usize::from(self.checked),
            NodeKind::Section => self.children.iter().map(MenuNode::checked_leaves).sum(),
        }
    }

    /// Number of checkbox leaves under (or at) this node.
    pub fn total_leaves(&self) -> usize {
        match self.kind {
            NodeKind::Checkbox => 1,
            NodeKind::Section => self.children.iter().map(MenuNode::total_leaves).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_action_appends_name_as_operand() {
        let aliases = Aliases::default();
        let rendered = Action::Package("git".into()).render(&aliases);
        assert_eq!(
            rendered,
            "yay --noconfirm --answerdiff=None --answeredit=None -S git"
        );
    }

    #[test]
    fn shell_action_joins_without_trailing_separator() {
        let aliases = Aliases::default();
        let action = Action::Shell(vec!["a".into(), "b".into()]);
        assert_eq!(action.render(&aliases), "a && b");
    }

    #[test]
    fn empty_shell_action_renders_empty() {
        let aliases = Aliases::default();
        assert_eq!(Action::Shell(Vec::new()).render(&aliases), "");
    }

    #[test]
    fn shell_action_expands_both_aliases() {
        let aliases = Aliases::default();
        let action = Action::Shell(vec![
            "__NOTIFY__ 'start'".into(),
            "__MGR__ -S neovim".into(),
        ]);
        assert_eq!(
            action.render(&aliases),
            "notify-send -i dialog-information -t 5000 -u critical 'start' && \
             yay --noconfirm --answerdiff=None --answeredit=None -S neovim"
        );
    }

    #[test]
    fn toggle_ignores_sections() {
        let mut section = MenuNode::section("Dev", vec![MenuNode::package("git")]);
        section.toggle();
        assert!(section.checked);

        let mut item = MenuNode::package("git");
        item.toggle();
        assert!(!item.checked);
    }

    #[test]
    fn leaf_counts_walk_nested_sections() {
        let mut off = MenuNode::package("b");
        off.toggle();
        let tree = MenuNode::section(
            "A",
            vec![
                MenuNode::package("a"),
                MenuNode::section("B", vec![off, MenuNode::package("c")]),
                MenuNode::section("Empty", Vec::new()),
            ],
        );
        assert_eq!(tree.total_leaves(), 3);
        assert_eq!(tree.checked_leaves(), 2);
    }
}
