//! Fuzzing harnesses for the stackdiff engine.
//!
//! The helpers in this crate are intentionally lightweight so they can be
//! reused both from `cargo fuzz` targets and from future property-based
//! smoke tests. Each public function accepts raw bytes and exercises a
//! different part of the canonicalization, diff, and render pipelines
//! while swallowing any recoverable errors.
//!
//! # Examples
//!
//! Run the canonicalization harness on a JSON snippet:
//!
//! ```
//! stackdiff_fuzz::fuzz_canonicalization(b"{\"a\":1}");
//! ```
//!
//! Invoke the diff harness on deterministic input:
//!
//! ```
//! stackdiff_fuzz::fuzz_diff(&[1, 2, 3, 4]);
//! ```
//!
//! Exercise the render harness with arbitrary bytes:
//!
//! ```
//! stackdiff_fuzz::fuzz_render(b"example");
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use arbitrary::Unstructured;
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};
use stackdiff_core::{diff_lines, ChangeNotes, RenderOptions, Value};

const MAX_DEPTH: usize = 4;
const MAX_ARRAY_LEN: u8 = 6;
const MAX_OBJECT_LEN: u8 = 6;
const MAX_STRING_LEN: u8 = 12;

/// Feeds arbitrary bytes through the JSON and YAML canonicalization routines.
///
/// The function ignores decoding failures so that fuzzers can keep exploring.
///
/// ```
/// stackdiff_fuzz::fuzz_canonicalization(b"{\"key\":\"value\"}");
/// ```
pub fn fuzz_canonicalization(data: &[u8]) {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = Value::from_json_str(text);
        let _ = Value::from_yaml_str(text);
    }
}

/// Drives the structural diff implementation with randomly generated values.
///
/// ```
/// stackdiff_fuzz::fuzz_diff(b"seed");
/// ```
pub fn fuzz_diff(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let Some(before) = random_value(&mut unstructured) else {
        return;
    };
    let Some(after) = random_value(&mut unstructured) else {
        return;
    };
    let diff = before.diff(&after);
    let _ = diff.has_changes();
}

/// Renders diffs of randomly generated value pairs with every option mix.
///
/// ```
/// stackdiff_fuzz::fuzz_render(b"render fuzz");
/// ```
pub fn fuzz_render(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let Some(before) = random_value(&mut unstructured) else {
        return;
    };
    let Some(after) = random_value(&mut unstructured) else {
        return;
    };
    let diff = before.diff(&after);
    let notes = ChangeNotes::new().with_note("0", "fuzzed note");
    for show_unchanged in [false, true] {
        for show_color in [false, true] {
            let options =
                RenderOptions::new().with_color(show_color).with_unchanged(show_unchanged);
            let _ = diff_lines(&diff, &options, &notes);
        }
    }
}

fn random_value(unstructured: &mut Unstructured<'_>) -> Option<Value> {
    let value = json_value_from_unstructured(unstructured, 0).ok()?;
    Value::from_json_value(value).ok()
}

fn json_value_from_unstructured(
    unstructured: &mut Unstructured<'_>,
    depth: usize,
) -> Result<JsonValue, arbitrary::Error> {
    if depth >= MAX_DEPTH {
        return json_leaf(unstructured);
    }

    let choice = unstructured.int_in_range::<u8>(0..=5)?;
    match choice {
        0 => Ok(JsonValue::Null),
        1 => Ok(JsonValue::Bool(unstructured.arbitrary()?)),
        2 => Ok(JsonValue::Number(random_number(unstructured)?)),
        3 => Ok(JsonValue::String(random_string(unstructured)?)),
        4 => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_ARRAY_LEN)?);
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(json_value_from_unstructured(unstructured, depth + 1)?);
            }
            Ok(JsonValue::Array(items))
        }
        _ => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_OBJECT_LEN)?);
            let mut object = JsonMap::new();
            for _ in 0..len {
                let key = random_string(unstructured)?;
                let value = json_value_from_unstructured(unstructured, depth + 1)?;
                object.insert(key, value);
            }
            Ok(JsonValue::Object(object))
        }
    }
}

fn json_leaf(unstructured: &mut Unstructured<'_>) -> Result<JsonValue, arbitrary::Error> {
    let choice = unstructured.int_in_range::<u8>(0..=3)?;
    match choice {
        0 => Ok(JsonValue::Null),
        1 => Ok(JsonValue::Bool(unstructured.arbitrary()?)),
        2 => Ok(JsonValue::Number(random_number(unstructured)?)),
        _ => Ok(JsonValue::String(random_string(unstructured)?)),
    }
}

fn random_number(unstructured: &mut Unstructured<'_>) -> Result<JsonNumber, arbitrary::Error> {
    let raw: f64 = unstructured.arbitrary()?;
    let finite = if raw.is_finite() { raw } else { 0.0 };
    Ok(JsonNumber::from_f64(finite).unwrap_or_else(|| JsonNumber::from(0)))
}

fn random_string(unstructured: &mut Unstructured<'_>) -> Result<String, arbitrary::Error> {
    let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_STRING_LEN)?);
    let mut result = String::with_capacity(len);
    for _ in 0..len {
        let byte = unstructured.int_in_range::<u8>(b'a'..=b'z')?;
        result.push(char::from(byte));
    }
    Ok(result)
}
