use proptest::prelude::*;
use stackdiff_core::{
    diff_lines, diff_values, object_diff, ChangeNotes, Color, Diff, DiffNode, Number,
    RenderOptions, Value,
};

fn parse(input: &str) -> Value {
    Value::from_json_str(input).unwrap()
}

fn plain(before: &str, after: &str) -> Vec<String> {
    object_diff(&parse(before), &parse(after), &RenderOptions::new(), &ChangeNotes::new())
}

fn with_unchanged(before: &str, after: &str) -> Vec<String> {
    object_diff(
        &parse(before),
        &parse(after),
        &RenderOptions::new().with_unchanged(true),
        &ChangeNotes::new(),
    )
}

#[test]
fn primitive_change_renders_both_sides() {
    assert_eq!(plain("\"before\"", "\"after\""), ["- \"before\"", "+ \"after\""]);
}

#[test]
fn object_key_update_renders_remove_then_add() {
    assert_eq!(
        plain("{\"hello\":\"world\"}", "{\"hello\":\"moon\"}"),
        ["- hello: \"world\"", "+ hello: \"moon\""]
    );
}

#[test]
fn identical_documents_render_nothing() {
    let lines = plain(
        "{\"Type\":\"AWS::S3::Bucket\",\"Properties\":{\"Tags\":[{\"Key\":\"env\"}]}}",
        "{\"Type\":\"AWS::S3::Bucket\",\"Properties\":{\"Tags\":[{\"Key\":\"env\"}]}}",
    );
    assert!(lines.is_empty());
}

#[test]
fn empty_to_nonempty_object_is_a_single_addition() {
    assert_eq!(plain("{}", "{\"hello\":\"world\"}"), ["+ hello: \"world\""]);
}

#[test]
fn array_reorder_keeps_unchanged_members() {
    let lines = with_unchanged(
        "[\"alice\",\"bob\",\"charlie\",\"david\"]",
        "[\"charlie\",\"alice\",\"bob\",\"david\"]",
    );
    assert_eq!(
        lines,
        [
            "+ - \"charlie\"",
            "  - \"alice\"",
            "  - \"bob\"",
            "- - \"charlie\"",
            "  - \"david\"",
        ]
    );
}

#[test]
fn array_kind_transitions_render_independent_blocks() {
    let lines = with_unchanged(
        "[\"string\",42,{\"obj\":\"value\"}]",
        "[{\"converted\":\"object\"},[1,2,3],\"string\"]",
    );
    assert_eq!(
        lines,
        [
            "+ - converted: \"object\"",
            "+ - - 1",
            "+   - 2",
            "+   - 3",
            "  - \"string\"",
            "- - 42",
            "- - obj: \"value\"",
        ]
    );
}

#[test]
fn nested_arrays_share_the_leading_marker() {
    let lines = with_unchanged("[[1,2]]", "[[1,2],[3]]");
    assert_eq!(lines, ["  - - 1", "    - 2", "+ - - 3"]);
}

#[test]
fn same_shape_replacement_emits_one_marker() {
    let lines = plain("[{\"x\":1}]", "[{\"y\":9}]");
    assert_eq!(lines, ["- - x: 1", "+   y: 9"]);
}

#[test]
fn shape_transition_keeps_both_markers() {
    let lines = plain("[\"a\"]", "[[1]]");
    assert_eq!(lines, ["- - \"a\"", "+ - - 1"]);
}

#[test]
fn empty_containers_render_as_literals() {
    let lines = with_unchanged("{\"a\":[],\"b\":{}}", "{\"a\":[],\"b\":{}}");
    assert_eq!(lines, ["  a: []", "  b: {}"]);

    let lines = plain("{\"a\":[]}", "{\"a\":{}}");
    assert_eq!(lines, ["- a: []", "+ a: {}"]);
}

#[test]
fn null_uses_its_json_literal() {
    assert_eq!(plain("{\"a\":null}", "{\"a\":1}"), ["- a: null", "+ a: 1"]);
}

#[test]
fn unchanged_containers_print_headers_only_on_the_path_to_changes() {
    let before = "{\"Type\":\"AWS::S3::Bucket\",\"Properties\":{\"BucketName\":\"assets\",\
                  \"Tags\":[{\"Key\":\"env\",\"Value\":\"dev\"}],\
                  \"VersioningConfiguration\":{\"Status\":\"Suspended\"}}}";
    let after = "{\"Type\":\"AWS::S3::Bucket\",\"Properties\":{\"BucketName\":\"assets-v2\",\
                 \"Tags\":[{\"Key\":\"env\",\"Value\":\"prod\"},{\"Key\":\"team\",\"Value\":\"core\"}],\
                 \"VersioningConfiguration\":{\"Status\":\"Enabled\"}}}";
    let notes = ChangeNotes::new().with_note("Properties/BucketName", "WARNING: Causes Replacement!");
    let lines = object_diff(&parse(before), &parse(after), &RenderOptions::new(), &notes);
    assert_eq!(
        lines,
        [
            "  Properties:",
            "-   BucketName: \"assets\" # WARNING: Causes Replacement!",
            "+   BucketName: \"assets-v2\" # WARNING: Causes Replacement!",
            "    Tags:",
            "-     - Value: \"dev\"",
            "+       Value: \"prod\"",
            "+     - Key: \"team\"",
            "+       Value: \"core\"",
            "    VersioningConfiguration:",
            "-     Status: \"Suspended\"",
            "+     Status: \"Enabled\"",
        ]
    );
}

#[test]
fn notes_attach_to_array_positions() {
    let notes = ChangeNotes::new().with_note("Tags/1", "added by policy");
    let lines = object_diff(
        &parse("{\"Tags\":[\"a\"]}"),
        &parse("{\"Tags\":[\"a\",\"b\"]}"),
        &RenderOptions::new(),
        &notes,
    );
    assert_eq!(lines, ["  Tags:", "+   - \"b\" # added by policy"]);
}

#[test]
fn color_wraps_whole_lines() {
    let lines = object_diff(
        &parse("{\"hello\":\"world\"}"),
        &parse("{\"hello\":\"moon\"}"),
        &RenderOptions::new().with_color(true),
        &ChangeNotes::new(),
    );
    assert_eq!(
        lines,
        [
            "\u{1b}[31m- hello: \"world\"\u{1b}[0m",
            "\u{1b}[32m+ hello: \"moon\"\u{1b}[0m",
        ]
    );
}

#[test]
fn unchanged_lines_color_white() {
    let lines = object_diff(
        &parse("{\"a\":1,\"b\":2}"),
        &parse("{\"a\":1,\"b\":3}"),
        &RenderOptions::new().with_color(true).with_unchanged(true),
        &ChangeNotes::new(),
    );
    assert_eq!(lines[0], "\u{1b}[37m  a: 1\u{1b}[0m");
}

#[test]
fn overrides_force_uniform_presentation() {
    let lines = object_diff(
        &parse("{\"a\":1}"),
        &parse("{\"a\":2,\"b\":3}"),
        &RenderOptions::new()
            .with_color(true)
            .with_color_override(Color::White)
            .with_icon_override('~'),
        &ChangeNotes::new(),
    );
    assert_eq!(
        lines,
        [
            "\u{1b}[37m~ a: 1\u{1b}[0m",
            "\u{1b}[37m~ a: 2\u{1b}[0m",
            "\u{1b}[37m~ b: 3\u{1b}[0m",
        ]
    );
}

fn arb_document() -> impl Strategy<Value = Value> {
    use proptest::{collection::btree_map, collection::vec, string::string_regex};

    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-100i64..100).prop_map(|n| Value::Number(Number::new(n as f64).unwrap())),
        string_regex("[a-zA-Z0-9]{0,6}").unwrap().prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 10, 3, move |inner| {
        prop_oneof![
            vec(inner.clone(), 0..4).prop_map(Value::Array),
            btree_map(string_regex("[a-zA-Z0-9]{1,6}").unwrap(), inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

/// Number of value lines (everything but `key:` headers) a full render of
/// this diff should produce: one per leaf or empty container, counting both
/// sides of a replacement.
fn expected_value_lines(diff: &Diff) -> usize {
    fn node_lines(node: &DiffNode) -> usize {
        match node {
            DiffNode::Primitive(_) => 1,
            DiffNode::Array(items) if items.is_empty() => 1,
            DiffNode::Object(properties) if properties.is_empty() => 1,
            DiffNode::Array(items) => items.iter().map(expected_value_lines).sum(),
            DiffNode::Object(properties) => properties.values().map(expected_value_lines).sum(),
        }
    }
    match diff {
        Diff::Replace { before, after } => node_lines(before) + node_lines(after),
        Diff::Entry { node, .. } => node_lines(node),
    }
}

proptest! {
    #[test]
    fn unpruned_rendering_preserves_leaf_count(
        before in arb_document(),
        after in arb_document(),
    ) {
        let diff = diff_values(&before, &after);
        let lines = diff_lines(
            &diff,
            &RenderOptions::new().with_unchanged(true),
            &ChangeNotes::new(),
        );
        let value_lines = lines.iter().filter(|line| !line.ends_with(':')).count();
        prop_assert_eq!(value_lines, expected_value_lines(&diff));
    }

    #[test]
    fn unchanged_documents_prune_to_nothing(document in arb_document()) {
        let diff = diff_values(&document, &document.clone());
        let lines = diff_lines(&diff, &RenderOptions::new(), &ChangeNotes::new());
        prop_assert!(lines.is_empty());
    }
}
