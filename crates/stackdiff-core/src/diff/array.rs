use super::{diff_values, replace_pair, tagged_tree, Action, Diff, DiffNode};
use crate::Value;

/// Reconciles two arrays with a greedy cursor alignment.
///
/// Two cursors walk the before and after sequences. At each step the pair
/// under the cursors is either matched (equal, or similar enough to diff
/// in place), or one side is consumed as an addition or removal when its
/// counterpart reappears further ahead. No backtracking happens once a
/// choice is made; pathological inputs can produce a visually suboptimal
/// (though information-complete) diff.
pub(super) fn diff_arrays(before: &[Value], after: &[Value]) -> Diff {
    let mut items = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < before.len() || j < after.len() {
        match (before.get(i), after.get(j)) {
            (Some(b), Some(a)) => {
                if elements_match(b, a) {
                    items.push(diff_matched(b, a));
                    i += 1;
                    j += 1;
                } else if matches_ahead(b, after, j + 1) {
                    items.push(tagged_tree(a, Action::Add));
                    j += 1;
                } else if matches_ahead(a, before, i + 1) {
                    items.push(tagged_tree(b, Action::Remove));
                    i += 1;
                } else {
                    items.push(replace_pair(b, a));
                    i += 1;
                    j += 1;
                }
            }
            (None, Some(a)) => {
                items.push(tagged_tree(a, Action::Add));
                j += 1;
            }
            (Some(b), None) => {
                items.push(tagged_tree(b, Action::Remove));
                i += 1;
            }
            (None, None) => break,
        }
    }

    Diff::entry(Action::Unchanged, DiffNode::Array(items))
}

fn diff_matched(before: &Value, after: &Value) -> Diff {
    if before == after {
        tagged_tree(after, Action::Unchanged)
    } else if before.kind() == after.kind() {
        diff_values(before, after)
    } else {
        // The matching rule only pairs same-kind elements today; kept for totality.
        replace_pair(before, after)
    }
}

/// Decides whether two elements at possibly different positions represent
/// the same logical element across the before and after arrays.
///
/// Deep-equal values always match. Objects match when at least half of the
/// union of their keys is shared; arrays match when at least half of the
/// index-aligned element pairs match recursively. Primitives and values of
/// different kinds never match unless equal.
fn elements_match(before: &Value, after: &Value) -> bool {
    if before == after {
        return true;
    }
    match (before, after) {
        (Value::Object(lhs), Value::Object(rhs)) => {
            let shared = lhs.keys().filter(|key| rhs.contains_key(key.as_str())).count();
            let union = lhs.len() + rhs.len() - shared;
            union == 0 || shared * 2 >= union
        }
        (Value::Array(lhs), Value::Array(rhs)) => {
            let aligned =
                lhs.iter().zip(rhs.iter()).filter(|(b, a)| elements_match(b, a)).count();
            aligned * 2 >= lhs.len().max(rhs.len())
        }
        _ => false,
    }
}

fn matches_ahead(value: &Value, pool: &[Value], from: usize) -> bool {
    pool.iter().skip(from).any(|candidate| elements_match(value, candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Value {
        Value::from_json_str(input).unwrap()
    }

    fn items_of(diff: Diff) -> Vec<Diff> {
        let Diff::Entry { action: Action::Unchanged, node: DiffNode::Array(items) } = diff else {
            panic!("expected array diff");
        };
        items
    }

    fn action_of(diff: &Diff) -> Option<Action> {
        match diff {
            Diff::Entry { action, .. } => Some(*action),
            Diff::Replace { .. } => None,
        }
    }

    #[test]
    fn reorder_is_not_a_rewrite() {
        let before = parse("[\"alice\",\"bob\",\"charlie\",\"david\"]");
        let after = parse("[\"charlie\",\"alice\",\"bob\",\"david\"]");
        let items = items_of(before.diff(&after));
        let actions: Vec<_> = items.iter().map(action_of).collect();
        assert_eq!(
            actions,
            [
                Some(Action::Add),
                Some(Action::Unchanged),
                Some(Action::Unchanged),
                Some(Action::Unchanged),
                Some(Action::Remove),
                Some(Action::Unchanged),
            ]
        );
    }

    #[test]
    fn kind_changes_become_independent_blocks() {
        let before = parse("[\"string\",42,{\"obj\":\"value\"}]");
        let after = parse("[{\"converted\":\"object\"},[1,2,3],\"string\"]");
        let items = items_of(before.diff(&after));
        let actions: Vec<_> = items.iter().map(action_of).collect();
        assert_eq!(
            actions,
            [
                Some(Action::Add),
                Some(Action::Add),
                Some(Action::Unchanged),
                Some(Action::Remove),
                Some(Action::Remove),
            ]
        );
    }

    #[test]
    fn similar_objects_diff_in_place() {
        let before = parse("[{\"Key\":\"env\",\"Value\":\"dev\"}]");
        let after = parse("[{\"Key\":\"env\",\"Value\":\"prod\"}]");
        let items = items_of(before.diff(&after));
        assert_eq!(items.len(), 1);
        let Diff::Entry { node: DiffNode::Object(properties), .. } = &items[0] else {
            panic!("expected in-place object diff");
        };
        assert!(matches!(properties["Key"], Diff::Entry { action: Action::Unchanged, .. }));
        assert!(matches!(properties["Value"], Diff::Replace { .. }));
    }

    #[test]
    fn dissimilar_objects_replace() {
        let before = parse("[{\"x\":1,\"y\":2}]");
        let after = parse("[{\"a\":3,\"b\":4}]");
        let items = items_of(before.diff(&after));
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Diff::Replace { .. }));
    }

    #[test]
    fn half_shared_keys_is_enough_to_match() {
        // union of keys {a, b, c}; two of three shared.
        let before = parse("{\"a\":1,\"b\":2}");
        let after = parse("{\"a\":9,\"b\":2,\"c\":3}");
        assert!(elements_match(&before, &after));

        // one of four shared.
        let lean_before = parse("{\"a\":1,\"b\":2}");
        let lean_after = parse("{\"a\":1,\"c\":3,\"d\":4}");
        assert!(!elements_match(&lean_before, &lean_after));
    }

    #[test]
    fn empty_objects_match_each_other() {
        assert!(elements_match(&parse("{}"), &parse("{}")));
    }

    #[test]
    fn array_similarity_counts_aligned_pairs() {
        assert!(elements_match(&parse("[1,2,3,4]"), &parse("[1,2,9,9]")));
        assert!(!elements_match(&parse("[1,2,3,4]"), &parse("[9,9,9,1]")));
        assert!(elements_match(&parse("[]"), &parse("[]")));
        assert!(!elements_match(&parse("[]"), &parse("[1]")));
    }

    #[test]
    fn growth_at_the_tail_is_pure_addition() {
        let before = parse("[1,2]");
        let after = parse("[1,2,3]");
        let items = items_of(before.diff(&after));
        let actions: Vec<_> = items.iter().map(action_of).collect();
        assert_eq!(
            actions,
            [Some(Action::Unchanged), Some(Action::Unchanged), Some(Action::Add)]
        );
    }

    #[test]
    fn unmatched_pair_replaces_in_step() {
        let before = parse("[1]");
        let after = parse("[2]");
        let items = items_of(before.diff(&after));
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Diff::Replace { .. }));
    }
}
