//! Diff tree construction.
//!
//! The module defines the classified diff representation produced by
//! comparing two [`Value`] documents, along with the recursive builder
//! that walks objects, arrays, and primitives. Array reconciliation uses
//! a greedy cursor alignment with lookahead rather than index pairing, so
//! a reordered or lightly edited element is not reported as a full
//! add/remove pair.

mod array;
mod object;
mod path;

pub use path::{Path, PathSegment};

use indexmap::IndexMap;

use crate::Value;

/// Change classification at a single tree position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Identical in both the before and after documents.
    Unchanged,
    /// Present only in the after document.
    Add,
    /// Present only in the before document.
    Remove,
}

/// The content portion of a [`Diff`], independent of its action.
#[derive(Clone, Debug, PartialEq)]
pub enum DiffNode {
    /// A leaf value: string, number, boolean, or null.
    Primitive(Value),
    /// An ordered sequence of per-position diffs.
    Array(Vec<Diff>),
    /// An insertion-ordered mapping of per-property diffs.
    Object(IndexMap<String, Diff>),
}

/// A classified comparison result between two values.
///
/// ```
/// # use stackdiff_core::{diff_values, Value};
/// let before = Value::from_json_str("{\"a\":1}").unwrap();
/// let after = Value::from_json_str("{\"a\":1}").unwrap();
/// assert!(!diff_values(&before, &after).has_changes());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Diff {
    /// A subtree that is unchanged, added, or removed as a unit.
    Entry {
        /// Change classification for this position.
        action: Action,
        /// Classified content at this position.
        node: DiffNode,
    },
    /// A value whose type or content changed; both sides are retained.
    Replace {
        /// Content as it appears in the before document.
        before: DiffNode,
        /// Content as it appears in the after document.
        after: DiffNode,
    },
}

impl Diff {
    /// Wraps a node with its change classification.
    #[must_use]
    pub fn entry(action: Action, node: DiffNode) -> Self {
        Self::Entry { action, node }
    }

    /// Builds a replacement carrying both representations.
    #[must_use]
    pub fn replace(before: DiffNode, after: DiffNode) -> Self {
        Self::Replace { before, after }
    }

    /// Recursively determines whether this subtree contains any change.
    ///
    /// Containers typically carry [`Action::Unchanged`] at their own level;
    /// changes live in their children.
    ///
    /// ```
    /// # use stackdiff_core::{diff_values, Value};
    /// let before = Value::from_json_str("{\"a\":1}").unwrap();
    /// let after = Value::from_json_str("{\"a\":2}").unwrap();
    /// assert!(diff_values(&before, &after).has_changes());
    /// ```
    #[must_use]
    pub fn has_changes(&self) -> bool {
        match self {
            Self::Replace { .. } => true,
            Self::Entry { action, node } => {
                if *action != Action::Unchanged {
                    return true;
                }
                match node {
                    DiffNode::Primitive(_) => false,
                    DiffNode::Array(items) => items.iter().any(Diff::has_changes),
                    DiffNode::Object(properties) => properties.values().any(Diff::has_changes),
                }
            }
        }
    }
}

/// Computes the structural diff between two values.
///
/// ```
/// # use stackdiff_core::{diff_values, Diff, Value};
/// let before = Value::from_json_str("\"web\"").unwrap();
/// let after = Value::from_json_str("[1,2]").unwrap();
/// assert!(matches!(diff_values(&before, &after), Diff::Replace { .. }));
/// ```
#[must_use]
pub fn diff_values(before: &Value, after: &Value) -> Diff {
    match (before.is_absent(), after.is_absent()) {
        (true, true) => Diff::entry(Action::Unchanged, DiffNode::Primitive(Value::Null)),
        (true, false) => tagged_tree(after, Action::Add),
        (false, true) => tagged_tree(before, Action::Remove),
        (false, false) => diff_present(before, after),
    }
}

fn diff_present(before: &Value, after: &Value) -> Diff {
    if before.kind() != after.kind() {
        return replace_pair(before, after);
    }
    match (before, after) {
        (Value::Array(lhs), Value::Array(rhs)) => array::diff_arrays(lhs, rhs),
        (Value::Object(lhs), Value::Object(rhs)) => object::diff_objects(lhs, rhs),
        _ => {
            if before == after {
                Diff::entry(Action::Unchanged, DiffNode::Primitive(after.clone()))
            } else {
                replace_pair(before, after)
            }
        }
    }
}

/// Builds a diff whose every node carries `action`.
///
/// Used for subtrees present on only one side: an entirely new subtree is
/// uniformly marked added, not just its root.
pub(crate) fn tagged_tree(value: &Value, action: Action) -> Diff {
    Diff::entry(action, content_tree(value, action))
}

pub(crate) fn replace_pair(before: &Value, after: &Value) -> Diff {
    Diff::replace(content_tree(before, Action::Remove), content_tree(after, Action::Add))
}

fn content_tree(value: &Value, action: Action) -> DiffNode {
    match value {
        Value::Array(items) => {
            DiffNode::Array(items.iter().map(|item| tagged_tree(item, action)).collect())
        }
        Value::Object(map) => DiffNode::Object(
            map.iter().map(|(key, child)| (key.clone(), tagged_tree(child, action))).collect(),
        ),
        primitive => DiffNode::Primitive(primitive.clone()),
    }
}
