// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Lenient JSON decoding for response bodies.
//!
//! Twitter is not always consistent about the JSON types it hands back for a given field. Rather
//! than failing a whole call because one field came back as a string instead of a number, the
//! decoder here drops the offending field, records what happened, and tries again. The fields
//! that did line up are still populated.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::Result;

/// A field that was skipped while decoding a response, because its JSON type didn't match the
/// type it was being decoded into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMismatch {
    /// The location of the field in the response, like `user.id` or `ids[2]`. Empty when the
    /// whole document had to be discarded.
    pub path: String,
    /// The decoder's description of the mismatch.
    pub message: String,
}

impl fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// The result of a lenient decode: the value itself, plus every field that had to be skipped to
/// produce it.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    /// The decoded value. Skipped fields hold their `Default` value.
    pub value: T,
    /// The fields that were skipped, in the order they were found.
    pub mismatches: Vec<FieldMismatch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

type Path = Vec<Segment>;

fn path_string(path: &[Segment]) -> String {
    let mut ret = String::new();
    for seg in path {
        match seg {
            Segment::Key(key) => {
                if !ret.is_empty() {
                    ret.push('.');
                }
                ret.push_str(key);
            }
            Segment::Index(idx) => {
                ret.push('[');
                ret.push_str(&idx.to_string());
                ret.push(']');
            }
        }
    }
    ret
}

/// Decodes `body` into `T`, skipping any fields whose JSON type doesn't match.
///
/// A body that isn't well-formed JSON is an `Error::Decode`. Anything else produces a value: if
/// even the top level of the document has the wrong shape, the result is `T::default()` with a
/// single mismatch recorded against the root.
pub fn decode_lenient<T>(body: &[u8]) -> Result<Decoded<T>>
where
    T: DeserializeOwned + Default,
{
    let mut tree: Value = serde_json::from_slice(body)?;
    let mut mismatches = Vec::new();

    loop {
        let attempt: std::result::Result<T, _> = serde_path_to_error::deserialize(&tree);
        let err = match attempt {
            Ok(value) => return Ok(Decoded { value, mismatches }),
            Err(err) => err,
        };

        let path = error_path(err.path());
        let mismatch = FieldMismatch {
            path: path_string(&path),
            message: err.inner().to_string(),
        };
        warn!(path = %mismatch.path, message = %mismatch.message, "skipping mismatched field");
        mismatches.push(mismatch);

        if path.is_empty() || !prune(&mut tree, &path) {
            return Ok(Decoded {
                value: T::default(),
                mismatches,
            });
        }
    }
}

/// Converts the path the deserializer was at when it failed into a path into the JSON tree.
///
/// An externally tagged enum sits in the tree as an object keyed by its variant. A segment the
/// deserializer couldn't name ends the path there, so the closest known ancestor is pruned.
fn error_path(path: &serde_path_to_error::Path) -> Path {
    let mut ret = Path::new();
    for seg in path.iter() {
        match seg {
            serde_path_to_error::Segment::Seq { index } => ret.push(Segment::Index(*index)),
            serde_path_to_error::Segment::Map { key } => ret.push(Segment::Key(key.clone())),
            serde_path_to_error::Segment::Enum { variant } => {
                ret.push(Segment::Key(variant.clone()))
            }
            _ => break,
        }
    }
    ret
}

/// Removes the node at `path` from `tree`. Returns whether anything was removed.
fn prune(tree: &mut Value, path: &[Segment]) -> bool {
    let (last, parents) = match path.split_last() {
        Some(split) => split,
        None => return false,
    };

    let mut node = tree;
    for seg in parents {
        let next = match (seg, node) {
            (Segment::Key(key), Value::Object(map)) => map.get_mut(key),
            (Segment::Index(idx), Value::Array(items)) => items.get_mut(*idx),
            _ => None,
        };
        node = match next {
            Some(next) => next,
            None => return false,
        };
    }

    match (last, node) {
        (Segment::Key(key), Value::Object(map)) => map.remove(key).is_some(),
        (Segment::Index(idx), Value::Array(items)) if *idx < items.len() => {
            items.remove(*idx);
            true
        }
        _ => false,
    }
}
