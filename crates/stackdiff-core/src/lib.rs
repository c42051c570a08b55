//! Core diff engine for `stackdiff`.
//!
//! `stackdiff-core` compares two snapshots of a resource definition —
//! arbitrarily nested JSON-like documents — and renders the result as a
//! human-readable, YAML-like sequence of lines. The comparison produces a
//! classified [`Diff`] tree; the renderer linearizes that tree with
//! per-line icons, optional ANSI color, and path-keyed annotation notes.
//!
//! ```
//! use stackdiff_core::{object_diff, ChangeNotes, RenderOptions, Value};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let before = Value::from_json_str("{\"Status\":\"Suspended\"}")?;
//!     let after = Value::from_json_str("{\"Status\":\"Enabled\"}")?;
//!
//!     let lines = object_diff(&before, &after, &RenderOptions::new(), &ChangeNotes::new());
//!     assert_eq!(lines, ["- Status: \"Suspended\"", "+ Status: \"Enabled\""]);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod diff;
mod error;
mod notes;
mod number;
mod options;
mod render;
mod value;

pub use diff::{diff_values, Action, Diff, DiffNode, Path, PathSegment};
pub use error::CanonicalizeError;
pub use notes::ChangeNotes;
pub use number::Number;
pub use options::{Color, RenderOptions};
pub use render::{diff_lines, object_diff};
pub use value::{Kind, Value};

/// Returns the semantic version of the `stackdiff-core` crate.
///
/// ```
/// assert!(!stackdiff_core::version().is_empty());
/// ```
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
