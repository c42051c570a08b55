//! Linearizes a [`Diff`] tree into indented, annotated text lines.
//!
//! The renderer is a pure recursive descent with three pieces of threaded
//! state: the current indent width, the current unconsumed array-prefix
//! string, and the current path. An array marker (`- `) is applied to the
//! first line produced beneath an array element and then cleared, with the
//! indent permanently widened by the marker's length so sibling columns
//! stay aligned.

use crate::diff::{diff_values, Action, Diff, DiffNode, Path, PathSegment};
use crate::{ChangeNotes, Color, RenderOptions, Value};

const COLOR_RESET: &str = "\u{1b}[0m";

/// Builds the diff of two values and renders it in one call.
///
/// Lines come back ready to print (joined by newline) or to feed to a test
/// assertion.
///
/// ```
/// # use stackdiff_core::{object_diff, ChangeNotes, RenderOptions, Value};
/// let before = Value::from_json_str("{\"hello\":\"world\"}").unwrap();
/// let after = Value::from_json_str("{\"hello\":\"moon\"}").unwrap();
/// let lines = object_diff(&before, &after, &RenderOptions::new(), &ChangeNotes::new());
/// assert_eq!(lines, ["- hello: \"world\"", "+ hello: \"moon\""]);
/// ```
#[must_use]
pub fn object_diff(
    before: &Value,
    after: &Value,
    options: &RenderOptions,
    notes: &ChangeNotes,
) -> Vec<String> {
    diff_lines(&diff_values(before, after), options, notes)
}

/// Renders a diff tree into formatted lines.
///
/// With `show_unchanged` disabled, subtrees without changes produce zero
/// lines; an all-unchanged diff renders as nothing at all.
#[must_use]
pub fn diff_lines(diff: &Diff, options: &RenderOptions, notes: &ChangeNotes) -> Vec<String> {
    let ctx = Context { options, notes };
    render_diff(diff, None, &Path::new(), 0, "", &ctx)
}

struct Context<'a> {
    options: &'a RenderOptions,
    notes: &'a ChangeNotes,
}

fn render_diff(
    diff: &Diff,
    key: Option<&str>,
    path: &Path,
    indent: usize,
    prefix: &str,
    ctx: &Context<'_>,
) -> Vec<String> {
    if !ctx.options.show_unchanged() && !diff.has_changes() {
        return Vec::new();
    }
    match diff {
        Diff::Entry { action, node } => render_node(node, *action, key, path, indent, prefix, ctx),
        Diff::Replace { before, after } => {
            let mut lines = render_node(before, Action::Remove, key, path, indent, prefix, ctx);
            // Inside an array element, a replacement that keeps its shape is
            // one logical element shown twice: the marker goes on the remove
            // side only and the add side aligns under it. A shape transition
            // keeps independent markers on both sides.
            let (after_indent, after_prefix) = if !prefix.is_empty() && same_shape(before, after) {
                (indent + prefix.len(), "")
            } else {
                (indent, prefix)
            };
            lines.extend(render_node(after, Action::Add, key, path, after_indent, after_prefix, ctx));
            lines
        }
    }
}

fn same_shape(before: &DiffNode, after: &DiffNode) -> bool {
    matches!(
        (before, after),
        (DiffNode::Primitive(_), DiffNode::Primitive(_))
            | (DiffNode::Array(_), DiffNode::Array(_))
            | (DiffNode::Object(_), DiffNode::Object(_))
    )
}

fn render_node(
    node: &DiffNode,
    action: Action,
    key: Option<&str>,
    path: &Path,
    indent: usize,
    prefix: &str,
    ctx: &Context<'_>,
) -> Vec<String> {
    match node {
        DiffNode::Primitive(value) => {
            vec![format_line(&leaf_body(key, &value.to_literal()), action, path, indent, prefix, ctx)]
        }
        DiffNode::Object(properties) if properties.is_empty() => {
            vec![format_line(&leaf_body(key, "{}"), action, path, indent, prefix, ctx)]
        }
        DiffNode::Array(items) if items.is_empty() => {
            vec![format_line(&leaf_body(key, "[]"), action, path, indent, prefix, ctx)]
        }
        DiffNode::Object(properties) => {
            let mut lines = Vec::new();
            let mut indent = indent;
            let mut prefix = prefix;
            if let Some(key) = key {
                lines.push(format_line(&format!("{key}:"), action, path, indent, prefix, ctx));
                indent += prefix.len() + 2;
                prefix = "";
            }
            for (child_key, child) in properties {
                let child_path = path.clone().with_segment(PathSegment::key(child_key.as_str()));
                let rendered =
                    render_diff(child, Some(child_key.as_str()), &child_path, indent, prefix, ctx);
                if !rendered.is_empty() && !prefix.is_empty() {
                    indent += prefix.len();
                    prefix = "";
                }
                lines.extend(rendered);
            }
            lines
        }
        DiffNode::Array(items) => {
            let mut lines = Vec::new();
            let mut indent = indent;
            let mut prefix = prefix;
            if let Some(key) = key {
                lines.push(format_line(&format!("{key}:"), action, path, indent, prefix, ctx));
                indent += prefix.len() + 2;
                prefix = "";
            }
            for (index, item) in items.iter().enumerate() {
                let child_path = path.clone().with_segment(PathSegment::index(index));
                let marker = format!("{prefix}- ");
                let rendered = render_diff(item, None, &child_path, indent, &marker, ctx);
                if !rendered.is_empty() && !prefix.is_empty() {
                    indent += prefix.len();
                    prefix = "";
                }
                lines.extend(rendered);
            }
            lines
        }
    }
}

fn leaf_body(key: Option<&str>, literal: &str) -> String {
    match key {
        Some(key) => format!("{key}: {literal}"),
        None => literal.to_string(),
    }
}

fn format_line(
    body: &str,
    action: Action,
    path: &Path,
    indent: usize,
    prefix: &str,
    ctx: &Context<'_>,
) -> String {
    let icon = ctx.options.icon_override().unwrap_or_else(|| action_icon(action));
    let note = ctx
        .notes
        .get(&path.to_string())
        .map(|note| format!(" # {note}"))
        .unwrap_or_default();
    let text = format!("{icon} {:indent$}{prefix}{body}{note}", "");
    if ctx.options.show_color() {
        let color = ctx.options.color_override().unwrap_or_else(|| action_color(action));
        format!("{}{text}{COLOR_RESET}", color.code())
    } else {
        text
    }
}

fn action_icon(action: Action) -> char {
    match action {
        Action::Add => '+',
        Action::Remove => '-',
        Action::Unchanged => ' ',
    }
}

fn action_color(action: Action) -> Color {
    match action {
        Action::Add => Color::Green,
        Action::Remove => Color::Red,
        Action::Unchanged => Color::White,
    }
}
