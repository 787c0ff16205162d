//! Translate edit scripts into one ordered command list.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::trace;

use reflow_diff::{ItemEditScript, SectionEditScript, SnapshotDiff};
use reflow_types::IndexPath;

use crate::command::Command;

/// An ordered list of commands to submit to a surface as one atomic batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// Commands in submission order.
    pub commands: Vec<Command>,
    /// Item edits dropped because their section did not resolve to a
    /// retained section (already subsumed by a section insert or delete).
    pub dropped: usize,
}

impl Batch {
    /// Returns `true` if there is nothing to submit.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Number of section-level commands.
    pub fn section_commands(&self) -> usize {
        self.commands.iter().filter(|c| c.is_section_level()).count()
    }

    /// Number of item-level commands.
    pub fn item_commands(&self) -> usize {
        self.len() - self.section_commands()
    }
}

/// Translate a [`SnapshotDiff`] into a [`Batch`].
pub fn translate_snapshot_diff(diff: &SnapshotDiff) -> Batch {
    translate(&diff.sections, &diff.items)
}

/// Merge section edits and per-section item edits into surface commands.
///
/// `items` is keyed by the retained section's **new** index. The section's
/// old index is recovered from the section script's retained pairs: item
/// deletes and move sources address the section by its old index, item
/// inserts, move destinations and replaces by its new index. An item script
/// whose key is not a retained section is dropped.
///
/// Item scripts of a replaced section are still emitted, so a batch may
/// hold a `SectionReplace` and item commands for the same section.
pub fn translate(sections: &SectionEditScript, items: &BTreeMap<usize, ItemEditScript>) -> Batch {
    let mut commands = Vec::with_capacity(
        sections.len() + items.values().map(ItemEditScript::len).sum::<usize>(),
    );

    commands.extend(
        sections
            .deletes()
            .map(|index| Command::SectionDelete { index }),
    );
    commands.extend(
        sections
            .inserts()
            .map(|index| Command::SectionInsert { index }),
    );
    commands.extend(
        sections
            .moves()
            .map(|(from, to)| Command::SectionMove { from, to }),
    );
    commands.extend(
        sections
            .replaces()
            .map(|(_, to)| Command::SectionReplace { index: to }),
    );

    let old_section_of: HashMap<usize, usize> = sections
        .retained
        .iter()
        .map(|r| (r.new, r.old))
        .collect();

    let mut dropped = 0;
    for (&new_section, script) in items {
        let Some(&old_section) = old_section_of.get(&new_section) else {
            trace!(
                section = new_section,
                edits = script.len(),
                "dropping item edits for unresolved section"
            );
            dropped += script.len();
            continue;
        };

        commands.extend(script.deletes().map(|item| Command::ItemDelete {
            at: IndexPath::new(old_section, item),
        }));
        commands.extend(script.inserts().map(|item| Command::ItemInsert {
            at: IndexPath::new(new_section, item),
        }));
        commands.extend(script.moves().map(|(from, to)| Command::ItemMove {
            from: IndexPath::new(old_section, from),
            to: IndexPath::new(new_section, to),
        }));
        commands.extend(script.replaces().map(|(_, to)| Command::ItemReplace {
            at: IndexPath::new(new_section, to),
        }));
    }

    Batch { commands, dropped }
}
