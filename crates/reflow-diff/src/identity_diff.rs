//! Identity diff: classify the differences between two ordered sequences.
//!
//! The algorithm is a two-pass symbol-table walk:
//!
//! 1. Index the old sequence by identity.
//! 2. Walk the new sequence. Identities absent from the old index are
//!    inserts; the others are retained and remember their old position.
//! 3. Old identities never visited are deletes.
//! 4. Among retained identities, the longest run whose old positions are
//!    increasing in new order is the common subsequence. Those stay in
//!    place (or become `Replace` when flagged changed); every other retained
//!    identity was genuinely reordered and becomes a `Move`.
//!
//! Positional shifts caused only by surrounding inserts and deletes keep
//! the relative order intact and therefore never produce a `Move`. A
//! retained identity is always reported as a `Move`, never as a delete plus
//! insert. The output depends only on the two input orders.
//!
//! Duplicate identities within one sequence are not defended against: the
//! first old occurrence is matched, and any later new occurrence of an
//! already-matched identity is reported as an insert.

use std::collections::HashMap;

use reflow_types::Model;

use crate::script::{Change, EditScript, Retained};

/// Diff two sequences using the [`Model`] identity and change hook.
pub fn diff_models<M: Model>(old: &[M], new: &[M]) -> EditScript {
    diff_by(
        old,
        new,
        |m| m.model_id().as_str(),
        |before, after| after.is_changed_from(before),
    )
}

/// Diff two sequences with caller-supplied identity and change detection.
///
/// - `key` returns the identity of an element.
/// - `changed(before, after)` is consulted only for retained elements that
///   kept their relative position; `true` yields a `Replace`.
pub fn diff_by<T, K, C>(old: &[T], new: &[T], key: K, changed: C) -> EditScript
where
    K: Fn(&T) -> &str,
    C: Fn(&T, &T) -> bool,
{
    let mut old_positions: HashMap<&str, usize> = HashMap::with_capacity(old.len());
    for (index, element) in old.iter().enumerate() {
        old_positions.entry(key(element)).or_insert(index);
    }

    let mut matched = vec![false; old.len()];
    let mut retained = Vec::new();
    let mut inserts = Vec::new();

    for (new_index, element) in new.iter().enumerate() {
        match old_positions.get(key(element)) {
            Some(&old_index) if !matched[old_index] => {
                matched[old_index] = true;
                retained.push(Retained {
                    old: old_index,
                    new: new_index,
                });
            }
            _ => inserts.push(new_index),
        }
    }

    let mut changes: Vec<Change> = (0..old.len())
        .filter(|&index| !matched[index])
        .map(|index| Change::Delete { index })
        .collect();
    changes.extend(inserts.into_iter().map(|index| Change::Insert { index }));

    let old_order: Vec<usize> = retained.iter().map(|r| r.old).collect();
    let in_place = longest_increasing_subsequence(&old_order);

    let mut replaces = Vec::new();
    for (r, stays) in retained.iter().zip(&in_place) {
        if !stays {
            changes.push(Change::Move {
                from: r.old,
                to: r.new,
            });
        } else if changed(&old[r.old], &new[r.new]) {
            replaces.push(Change::Replace {
                from: r.old,
                to: r.new,
            });
        }
    }
    changes.extend(replaces);

    EditScript { changes, retained }
}

/// Mark the members of one longest strictly increasing subsequence.
///
/// Patience sorting with predecessor links, `O(n log n)`. Ties are resolved
/// by position only, so the result is deterministic.
fn longest_increasing_subsequence(values: &[usize]) -> Vec<bool> {
    let mut tails: Vec<usize> = Vec::new();
    let mut predecessor: Vec<Option<usize>> = vec![None; values.len()];

    for (i, &value) in values.iter().enumerate() {
        let slot = tails.partition_point(|&t| values[t] < value);
        if slot > 0 {
            predecessor[i] = Some(tails[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(i);
        } else {
            tails[slot] = i;
        }
    }

    let mut members = vec![false; values.len()];
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        members[i] = true;
        cursor = predecessor[i];
    }
    members
}
