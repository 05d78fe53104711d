//! # CmdRS Argument Normalization (`common::args`)
//!
//! File: cli/src/common/args/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/cmdrs
//!
//! **DISCLAIMER:** This repository is in the early phases of being rewritten
//! and is not suitable for production development yet.
//!

//! ## Overview
//!
//! This module normalizes heterogeneous argument fragments into the flat,
//! ordered `Vec<String>` that the process dispatcher hands to the OS. Callers
//! assemble commands from mixed material — literal strings, numbers, paths,
//! optional flags that may or may not be present, and nested groups built by
//! helper functions — and this module flattens all of it into one argument
//! vector while dropping the "blocked" sentinel values (`ArgValue::None` and,
//! by default, the empty string).
//!
//! ## Architecture
//!
//! The module is built around a closed set of fragment shapes rather than any
//! runtime type inspection:
//!
//! - **`ArgValue`**: An enum covering every fragment shape a command may be
//!   assembled from: `Str`, `Int`, `Float`, `Path`, nested `List`, and the
//!   droppable `None` sentinel. `From` conversions are provided for the common
//!   Rust types (`&str`, `String`, integers, floats, paths, `Option<T>`,
//!   `Vec<T>`) so call sites stay terse.
//! - **`flatten`** / **`flatten_with`**: Recursive normalization of a fragment
//!   sequence into a `Vec<String>`, preserving relative order, descending into
//!   nested lists, and filtering blocked values. `flatten` applies the default
//!   block list (empty string); `flatten_with` accepts a caller-supplied one.
//! - **`all_present`**: Flattens with no block list, then returns `None` if
//!   *any* element is blocked. Used for optional argument groups where a
//!   missing value should suppress the whole group (e.g. `["--size", width]`
//!   must not degrade to a bare `["--size"]`).
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::args::{self, ArgValue};
//!
//! // ["ffmpeg", "-i", "in.mp4", "-b:v", "6000", "out.mp4"]
//! let argv = args::flatten(vec![
//!     "ffmpeg".into(),
//!     ArgValue::List(vec!["-i".into(), "in.mp4".into()]),
//!     ArgValue::from(Some("-b:v")),
//!     6000.into(),
//!     ArgValue::None, // dropped
//!     "out.mp4".into(),
//! ]);
//!
//! // None: the group is incomplete, so no fragments are produced at all.
//! let group = args::all_present(vec!["--size".into(), ArgValue::None]);
//! assert!(group.is_none());
//! ```
//!
use std::path::{Path, PathBuf};

/// A single argument fragment accepted by the invocation builder.
///
/// The shapes are a closed set: anything a command is assembled from must be
/// converted into one of these variants up front. Nested `List` values are
/// unpacked recursively during flattening; `None` is always dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// A literal string fragment.
    Str(String),
    /// An integer fragment, stringified during flattening.
    Int(i64),
    /// A floating-point fragment, stringified during flattening.
    Float(f64),
    /// A filesystem path, stringified lossily during flattening.
    Path(PathBuf),
    /// A nested group of fragments, unpacked in place.
    List(Vec<ArgValue>),
    /// A droppable sentinel (an absent optional value).
    None,
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Str(value)
    }
}

impl From<&String> for ArgValue {
    fn from(value: &String) -> Self {
        ArgValue::Str(value.clone())
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        ArgValue::Int(value as i64)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Int(value)
    }
}

impl From<u32> for ArgValue {
    fn from(value: u32) -> Self {
        ArgValue::Int(value as i64)
    }
}

impl From<usize> for ArgValue {
    fn from(value: usize) -> Self {
        ArgValue::Int(value as i64)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Float(value)
    }
}

impl From<&Path> for ArgValue {
    fn from(value: &Path) -> Self {
        ArgValue::Path(value.to_path_buf())
    }
}

impl From<PathBuf> for ArgValue {
    fn from(value: PathBuf) -> Self {
        ArgValue::Path(value)
    }
}

impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => ArgValue::None,
        }
    }
}

impl<T: Into<ArgValue>> From<Vec<T>> for ArgValue {
    fn from(value: Vec<T>) -> Self {
        ArgValue::List(value.into_iter().map(Into::into).collect())
    }
}

/// Flattens argument fragments into an ordered string vector using the
/// default block list (the empty string).
///
/// `ArgValue::None` fragments are always dropped; nested lists are unpacked
/// recursively; remaining fragments are stringified in order.
///
/// # Arguments
///
/// * `fragments` - The fragment sequence to normalize.
///
/// # Returns
///
/// * `Vec<String>` - The flat argument vector, relative order preserved.
pub fn flatten(fragments: impl IntoIterator<Item = ArgValue>) -> Vec<String> {
    flatten_with(fragments, &[String::new()])
}

/// Flattens argument fragments into an ordered string vector, dropping any
/// stringified value contained in `blocked`.
///
/// `ArgValue::None` is dropped unconditionally, independent of the block
/// list. Flattening an already-flat sequence of unblocked strings yields the
/// same sequence unchanged.
///
/// # Arguments
///
/// * `fragments` - The fragment sequence to normalize.
/// * `blocked` - Sentinel string values to remove from the output.
///
/// # Returns
///
/// * `Vec<String>` - The flat argument vector, relative order preserved.
pub fn flatten_with(
    fragments: impl IntoIterator<Item = ArgValue>,
    blocked: &[String],
) -> Vec<String> {
    let mut out = Vec::new();
    for fragment in fragments {
        flatten_into(fragment, blocked, &mut out);
    }
    out
}

/// Recursive worker for `flatten_with`: appends one fragment (and anything
/// nested inside it) to `out`.
fn flatten_into(fragment: ArgValue, blocked: &[String], out: &mut Vec<String>) {
    let value = match fragment {
        ArgValue::None => return,
        ArgValue::List(items) => {
            for item in items {
                flatten_into(item, blocked, out);
            }
            return;
        }
        ArgValue::Str(s) => s,
        ArgValue::Int(i) => i.to_string(),
        ArgValue::Float(f) => f.to_string(),
        ArgValue::Path(p) => p.to_string_lossy().into_owned(),
    };
    if !blocked.contains(&value) {
        out.push(value);
    }
}

/// Returns the flattened fragments only when none of them is blocked.
///
/// Unlike `flatten`, blocked values are not silently removed: the presence of
/// any `ArgValue::None` or empty-string fragment suppresses the entire group.
/// This keeps optional `["--flag", value]` pairs from emitting a dangling
/// flag when the value is absent.
///
/// # Arguments
///
/// * `fragments` - The fragment sequence to validate and normalize.
///
/// # Returns
///
/// * `Option<Vec<String>>` - The flat vector, or `None` if any fragment was
///   blocked.
pub fn all_present(fragments: impl IntoIterator<Item = ArgValue>) -> Option<Vec<String>> {
    let mut out = Vec::new();
    for fragment in fragments {
        if !collect_all(fragment, &mut out) {
            return None;
        }
    }
    Some(out)
}

/// Recursive worker for `all_present`. Returns `false` the moment a blocked
/// fragment is seen.
fn collect_all(fragment: ArgValue, out: &mut Vec<String>) -> bool {
    let value = match fragment {
        ArgValue::None => return false,
        ArgValue::List(items) => {
            for item in items {
                if !collect_all(item, out) {
                    return false;
                }
            }
            return true;
        }
        ArgValue::Str(s) => s,
        ArgValue::Int(i) => i.to_string(),
        ArgValue::Float(f) => f.to_string(),
        ArgValue::Path(p) => p.to_string_lossy().into_owned(),
    };
    if value.is_empty() {
        return false;
    }
    out.push(value);
    true
}

// --- Unit Tests ---
// Tests for the argument normalization utilities.
#[cfg(test)]
mod tests {
    use super::*;

    /// Flattening an already-flat sequence of strings yields the same
    /// sequence unchanged.
    #[test]
    fn test_flatten_is_idempotent_on_flat_input() {
        let input: Vec<ArgValue> = vec!["git".into(), "status".into(), "--short".into()];
        let flat = flatten(input);
        assert_eq!(flat, vec!["git", "status", "--short"]);
        // Run the result back through: identical output.
        let again = flatten(flat.iter().map(ArgValue::from).collect::<Vec<_>>());
        assert_eq!(again, vec!["git", "status", "--short"]);
    }

    /// Nested lists are unpacked in place, preserving relative order.
    #[test]
    fn test_flatten_unpacks_nested_lists() {
        let input = vec![
            ArgValue::List(vec!["binary".into(), "-m".into()]),
            "arg1".into(),
            ArgValue::List(vec![
                "arg2".into(),
                ArgValue::List(vec!["arg3".into(), "arg4".into()]),
            ]),
            3.into(),
        ];
        assert_eq!(
            flatten(input),
            vec!["binary", "-m", "arg1", "arg2", "arg3", "arg4", "3"]
        );
    }

    /// `None` and empty-string fragments are removed; surviving elements keep
    /// their relative order.
    #[test]
    fn test_flatten_drops_blocked_values() {
        let input = vec![
            "a".into(),
            ArgValue::None,
            "".into(),
            "b".into(),
            ArgValue::List(vec![ArgValue::None, "c".into(), "".into()]),
            "d".into(),
        ];
        assert_eq!(flatten(input), vec!["a", "b", "c", "d"]);
    }

    /// Numbers, floats, and paths stringify predictably.
    #[test]
    fn test_flatten_stringifies_scalars() {
        let input = vec![
            ArgValue::from("-b:v"),
            ArgValue::from(6000),
            ArgValue::from(0.5),
            ArgValue::from(PathBuf::from("/tmp/out.mp4")),
        ];
        assert_eq!(flatten(input), vec!["-b:v", "6000", "0.5", "/tmp/out.mp4"]);
    }

    /// A caller-supplied block list removes custom sentinels as well.
    #[test]
    fn test_flatten_with_custom_block_list() {
        let blocked = vec![String::new(), "SKIP".to_string()];
        let input = vec!["keep".into(), "SKIP".into(), "".into(), "also".into()];
        assert_eq!(flatten_with(input, &blocked), vec!["keep", "also"]);
    }

    /// `Option` conversions map `Some` to the inner fragment and `None` to
    /// the droppable sentinel.
    #[test]
    fn test_option_conversion() {
        let present: ArgValue = Some("--flag").into();
        let absent: ArgValue = Option::<&str>::None.into();
        assert_eq!(present, ArgValue::Str("--flag".to_string()));
        assert_eq!(absent, ArgValue::None);
    }

    /// `all_present` returns the full group when every fragment is usable.
    #[test]
    fn test_all_present_complete_group() {
        let group = all_present(vec!["--size".into(), 1920.into(), 1080.into()]);
        assert_eq!(
            group,
            Some(vec![
                "--size".to_string(),
                "1920".to_string(),
                "1080".to_string()
            ])
        );
    }

    /// `all_present` suppresses the whole group when any fragment is blocked.
    #[test]
    fn test_all_present_incomplete_group() {
        assert_eq!(all_present(vec!["--size".into(), ArgValue::None]), None);
        assert_eq!(all_present(vec!["--arg".into(), "".into()]), None);
    }
}
