use indexmap::IndexMap;

use super::{diff_values, tagged_tree, Action, Diff, DiffNode};
use crate::Value;

/// Reconciles two objects over the union of their keys.
///
/// Before-keys come first in discovery order, then after-only keys are
/// appended. The object itself carries [`Action::Unchanged`]; changes live
/// in the per-property diffs.
pub(super) fn diff_objects(
    before: &IndexMap<String, Value>,
    after: &IndexMap<String, Value>,
) -> Diff {
    let mut properties = IndexMap::with_capacity(before.len() + after.len());

    for (key, value) in before {
        let entry = match after.get(key) {
            Some(other) => diff_values(value, other),
            None => tagged_tree(value, Action::Remove),
        };
        properties.insert(key.clone(), entry);
    }

    for (key, value) in after {
        if !before.contains_key(key) {
            properties.insert(key.clone(), tagged_tree(value, Action::Add));
        }
    }

    Diff::entry(Action::Unchanged, DiffNode::Object(properties))
}
