use crate::alias::Aliases;
use crate::builder::Checklist;
use crate::model::{MenuNode, NodeKind};

/// Rendered actions of every checked item, pre-order, document order.
pub fn collect_actions(nodes: &[MenuNode], aliases: &Aliases, out: &mut Vec<String>) {
    for node in nodes {
        match node.kind {
            NodeKind::Checkbox => {
                if let (true, Some(action)) = (node.checked, &node.action) {
                    out.push(action.render(aliases));
                }
            }
            NodeKind::Section => collect_actions(&node.children, aliases, out),
        }
    }
}

/// The final script body: selected actions followed by the `after` commands.
pub fn collect(checklist: &Checklist, aliases: &Aliases) -> Vec<String> {
    let mut commands = Vec::new();
    collect_actions(&checklist.sections, aliases, &mut commands);
    let selected = commands.len();
    commands.extend(checklist.after.iter().cloned());
    tracing::info!(selected, after = checklist.after.len(), "collected commands");
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::model::Action;
    use crate::navigator::{NavEvent, Navigator};

    const PREFIX: &str = "yay --noconfirm --answerdiff=None --answeredit=None";

    fn checklist(yaml: &str) -> Checklist {
        build(&serde_yaml::from_str(yaml).unwrap())
    }

    #[test]
    fn pre_order_then_after_commands() {
        let list = Checklist {
            sections: vec![MenuNode::section(
                "A",
                vec![
                    MenuNode::package("x"),
                    MenuNode::section("B", vec![MenuNode::package("y")]),
                ],
            )],
            after: vec!["first".into(), "second".into()],
            dropped: 0,
        };
        assert_eq!(
            collect(&list, &Aliases::default()),
            vec![
                format!("{PREFIX} -S x"),
                format!("{PREFIX} -S y"),
                "first".to_string(),
                "second".to_string(),
            ]
        );
    }

    #[test]
    fn unchecking_removes_only_that_item() {
        let mut nodes = vec![
            MenuNode::package("a"),
            MenuNode::package("b"),
            MenuNode::package("c"),
        ];
        nodes[1].toggle();
        let mut out = Vec::new();
        collect_actions(&nodes, &Aliases::default(), &mut out);
        assert_eq!(out, vec![format!("{PREFIX} -S a"), format!("{PREFIX} -S c")]);
    }

    #[test]
    fn disabled_shell_item_contributes_nothing() {
        let nodes = vec![MenuNode::checkbox(
            "x",
            false,
            Action::Shell(vec!["rm -rf /tmp/x".into()]),
        )];
        let mut out = Vec::new();
        collect_actions(&nodes, &Aliases::default(), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn shell_item_is_one_unit() {
        let list = checklist(
            r#"
sections:
  Services:
    items:
      - name: docker
        commands:
          - __MGR__ -S docker
          - sudo systemctl enable --now docker
"#,
        );
        assert_eq!(
            collect(&list, &Aliases::default()),
            vec![format!("{PREFIX} -S docker && sudo systemctl enable --now docker")]
        );
    }

    #[test]
    fn document_defaults_end_to_end() {
        let list = checklist(
            r#"
sections:
  Tools:
    items:
      - name: git
      - name: x
        enabled: false
after:
  commands: ["echo done"]
"#,
        );
        assert_eq!(
            collect(&list, &Aliases::default()),
            vec![format!("{PREFIX} -S git"), "echo done".to_string()]
        );
    }

    #[test]
    fn edits_made_while_navigating_are_collected() {
        let mut list = checklist(
            r#"
sections:
  Tools:
    items: [git, curl]
  Fonts:
    items:
      - name: noto
        enabled: false
after:
  commands: reboot
"#,
        );
        {
            let mut nav = Navigator::new(&mut list.sections);
            for event in [
                NavEvent::Activate, // into Tools
                NavEvent::Activate, // uncheck git
                NavEvent::Back,
                NavEvent::Down,
                NavEvent::Activate, // into Fonts
                NavEvent::Activate, // check noto
                NavEvent::Back,
            ] {
                nav.handle(event);
            }
        }
        assert_eq!(
            collect(&list, &Aliases::default()),
            vec![
                format!("{PREFIX} -S curl"),
                format!("{PREFIX} -S noto"),
                "reboot".to_string(),
            ]
        );
    }

    #[test]
    fn empty_checklist_yields_only_after() {
        let list = checklist("after:\n  commands: [a]\n");
        assert_eq!(collect(&list, &Aliases::default()), vec!["a".to_string()]);
    }
}
