use crate::app::actions::RenameRequest;
use crate::domain::entry::Entry;
use crate::domain::input::InputState;
use crate::domain::pairing::NewItemKind;

/// Top-level interaction mode of the explorer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum AppMode {
    /// Tree navigation.
    #[default]
    Explorer,
    /// A name prompt is open over the tree.
    Prompt {
        purpose: PromptPurpose,
        input: InputState,
    },
    /// Waiting for the user to confirm deleting `entry` and its sibling.
    ConfirmDelete {
        entry: Entry,
        sibling: Option<Entry>,
        selected_yes: bool,
    },
}

/// What a submitted prompt name is used for.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PromptPurpose {
    /// Create a folder or group inside `dir`.
    NewItem { dir: Entry, kind: NewItemKind },
    Rename(RenameRequest),
}

impl PromptPurpose {
    /// Returns the overlay title for this prompt.
    pub fn title(&self) -> &'static str {
        match self {
            Self::NewItem {
                kind: NewItemKind::Folder,
                ..
            } => "New Folder",
            Self::NewItem {
                kind: NewItemKind::Group,
                ..
            } => "New Group",
            Self::Rename(_) => "Rename",
        }
    }
}
