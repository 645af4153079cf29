/// One user-visible shortcut shown in a footer hint line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HelpAction {
    pub(crate) footer_label: &'static str,
    pub(crate) key: &'static str,
}

impl HelpAction {
    pub(crate) const fn new(footer_label: &'static str, key: &'static str) -> Self {
        Self { footer_label, key }
    }
}

/// Returns the shortcuts available while navigating the tree.
///
/// Rename and delete are only offered when a row is selected.
pub(crate) fn explorer_footer_actions(has_selection: bool) -> Vec<HelpAction> {
    let mut actions = vec![
        HelpAction::new("quit", "q"),
        HelpAction::new("nav", "j/k"),
        HelpAction::new("open", "Enter"),
        HelpAction::new("expand/collapse", "l/h"),
        HelpAction::new("new folder", "n"),
        HelpAction::new("new group", "g"),
    ];

    if has_selection {
        actions.push(HelpAction::new("rename", "r"));
        actions.push(HelpAction::new("delete", "d"));
    }

    actions.push(HelpAction::new("scroll source", "Up/Down"));

    actions
}

/// Returns the shortcuts available while a name prompt is open.
pub(crate) fn prompt_footer_actions() -> Vec<HelpAction> {
    vec![
        HelpAction::new("confirm", "Enter"),
        HelpAction::new("cancel", "Esc"),
    ]
}

/// Joins `actions` into a single `key: label | key: label` line.
pub(crate) fn footer_text(actions: &[HelpAction]) -> String {
    let mut help_text = String::new();

    for (index, action) in actions.iter().enumerate() {
        if index > 0 {
            help_text.push_str(" | ");
        }

        help_text.push_str(action.key);
        help_text.push_str(": ");
        help_text.push_str(action.footer_label);
    }

    help_text
}
