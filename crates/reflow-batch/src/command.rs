use std::fmt;

use serde::{Deserialize, Serialize};

use reflow_types::IndexPath;

/// One structural edit addressed to a rendering surface.
///
/// Index conventions:
///
/// | Command | Coordinates |
/// |---|---|
/// | `SectionDelete`, `ItemDelete` | pre-batch |
/// | `SectionInsert`, `ItemInsert` | post-batch |
/// | `SectionMove`, `ItemMove` | `from` pre-batch, `to` post-batch |
/// | `SectionReplace`, `ItemReplace` | post-batch |
///
/// An `ItemMove` carries full paths because the owning section may itself
/// have moved: `from.section` is the section's old index and `to.section`
/// its new index.
///
/// A retained section that changed in place and also had its items edited
/// receives a `SectionReplace` together with item commands in the same
/// batch. Views that refuse to reload a section while editing its rows
/// should treat the section reload as covering those rows (see
/// `RenderSurface::reload_section`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    SectionInsert { index: usize },
    SectionDelete { index: usize },
    SectionMove { from: usize, to: usize },
    SectionReplace { index: usize },
    ItemInsert { at: IndexPath },
    ItemDelete { at: IndexPath },
    ItemMove { from: IndexPath, to: IndexPath },
    ItemReplace { at: IndexPath },
}

/// Ordering group of a command within a batch.
///
/// Section groups are emitted in this order and all precede item commands.
/// Item groups follow the same order, repeated for each surviving section
/// in ascending new section index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandGroup {
    SectionDeletes,
    SectionInserts,
    SectionMoves,
    SectionReplaces,
    ItemDeletes,
    ItemInserts,
    ItemMoves,
    ItemReplaces,
}

impl Command {
    /// The ordering group this command belongs to.
    pub fn group(&self) -> CommandGroup {
        match self {
            Command::SectionDelete { .. } => CommandGroup::SectionDeletes,
            Command::SectionInsert { .. } => CommandGroup::SectionInserts,
            Command::SectionMove { .. } => CommandGroup::SectionMoves,
            Command::SectionReplace { .. } => CommandGroup::SectionReplaces,
            Command::ItemDelete { .. } => CommandGroup::ItemDeletes,
            Command::ItemInsert { .. } => CommandGroup::ItemInserts,
            Command::ItemMove { .. } => CommandGroup::ItemMoves,
            Command::ItemReplace { .. } => CommandGroup::ItemReplaces,
        }
    }

    /// Returns `true` for section-granularity commands.
    pub fn is_section_level(&self) -> bool {
        self.group() <= CommandGroup::SectionReplaces
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SectionInsert { index } => write!(f, "insert section {index}"),
            Command::SectionDelete { index } => write!(f, "delete section {index}"),
            Command::SectionMove { from, to } => write!(f, "move section {from} -> {to}"),
            Command::SectionReplace { index } => write!(f, "reload section {index}"),
            Command::ItemInsert { at } => write!(f, "insert item {at}"),
            Command::ItemDelete { at } => write!(f, "delete item {at}"),
            Command::ItemMove { from, to } => write!(f, "move item {from} -> {to}"),
            Command::ItemReplace { at } => write!(f, "reload item {at}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_are_ordered() {
        assert!(CommandGroup::SectionDeletes < CommandGroup::SectionInserts);
        assert!(CommandGroup::SectionReplaces < CommandGroup::ItemDeletes);
        assert!(CommandGroup::ItemMoves < CommandGroup::ItemReplaces);
    }

    #[test]
    fn section_level_classification() {
        assert!(Command::SectionMove { from: 0, to: 1 }.is_section_level());
        assert!(!Command::ItemReplace {
            at: IndexPath::new(0, 0)
        }
        .is_section_level());
    }

    #[test]
    fn display_format() {
        let cmd = Command::ItemMove {
            from: IndexPath::new(0, 2),
            to: IndexPath::new(1, 0),
        };
        assert_eq!(cmd.to_string(), "move item [0, 2] -> [1, 0]");
        assert_eq!(
            Command::SectionReplace { index: 3 }.to_string(),
            "reload section 3"
        );
    }

    #[test]
    fn serializes_with_command_tag() {
        let json = serde_json::to_string(&Command::SectionDelete { index: 2 }).unwrap();
        assert_eq!(json, r#"{"command":"section_delete","index":2}"#);
    }
}
