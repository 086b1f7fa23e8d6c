//! Lookups and copy-on-write updates over `serde_json::Value` documents.
//!
//! Every update takes the document by reference and hands back a derived
//! value. The input is never touched.

use log::trace;
use serde_json::Value;

use crate::{
    error::{ActionError, ActionResult},
    paths::{format_path, PathChunk},
};

/// Fetches the value at `path`, failing on the first chunk that does not resolve.
pub fn fetch<'a>(root: &'a Value, path: &[PathChunk]) -> ActionResult<&'a Value> {
    let mut current = root;

    for (depth, chunk) in path.iter().enumerate() {
        let here = &path[..=depth];
        current = match (current, chunk) {
            (Value::Array(arr), PathChunk::Index(index)) => {
                arr.get(*index).ok_or_else(|| out_of_bounds(*index, arr.len(), here))?
            }
            (Value::Array(_), PathChunk::Key(key)) => {
                return Err(missing_key(key, here));
            }
            (Value::Object(map), chunk) => {
                let key = chunk.to_string();
                map.get(&key).ok_or_else(|| missing_key(&key, here))?
            }
            _ => {
                trace!("Hit a scalar: {:?}, {:?}", current, here);
                return Err(ActionError::NotAContainer {
                    path: format_path(here),
                });
            }
        };
    }

    Ok(current)
}

fn fetch_mut<'a>(root: &'a mut Value, path: &[PathChunk]) -> ActionResult<&'a mut Value> {
    if path.is_empty() {
        return Ok(root);
    }

    let last = path.len() - 1;
    let parent = fetch_mut(root, &path[..last])?;
    let chunk = &path[last];

    match (parent, chunk) {
        (Value::Array(arr), PathChunk::Index(index)) => {
            let len = arr.len();
            arr.get_mut(*index)
                .ok_or_else(|| out_of_bounds(*index, len, path))
        }
        (Value::Array(_), PathChunk::Key(key)) => Err(missing_key(key, path)),
        (Value::Object(map), chunk) => {
            let key = chunk.to_string();
            match map.get_mut(&key) {
                Some(inner) => Ok(inner),
                None => Err(missing_key(&key, path)),
            }
        }
        _ => Err(ActionError::NotAContainer {
            path: format_path(path),
        }),
    }
}

/// Derives a new document where the value at `path` has been run through `f`.
pub fn update_in(
    root: &Value,
    path: &[PathChunk],
    f: impl FnOnce(&mut Value) -> ActionResult<()>,
) -> ActionResult<Value> {
    let mut derived = root.clone();
    f(fetch_mut(&mut derived, path)?)?;
    Ok(derived)
}

/// Replaces the value at `path`. Object fields that do not exist yet are added.
pub fn set_in(root: &Value, path: &[PathChunk], value: Value) -> ActionResult<Value> {
    let Some((chunk, parent)) = path.split_last() else {
        return Ok(value);
    };

    update_in(root, parent, |container| match (container, chunk) {
        (Value::Array(arr), PathChunk::Index(index)) => {
            let len = arr.len();
            let slot = arr
                .get_mut(*index)
                .ok_or_else(|| out_of_bounds(*index, len, path))?;
            *slot = value;
            Ok(())
        }
        (Value::Object(map), chunk) => {
            map.insert(chunk.to_string(), value);
            Ok(())
        }
        (Value::Array(_), PathChunk::Key(key)) => Err(missing_key(key, path)),
        _ => Err(ActionError::NotAContainer {
            path: format_path(parent),
        }),
    })
}

/// Appends `value` to the sequence at `path`.
pub fn push_in(root: &Value, path: &[PathChunk], value: Value) -> ActionResult<Value> {
    update_in(root, path, |target| {
        let Value::Array(arr) = target else {
            return Err(ActionError::UnsupportedTarget {
                mutation: "append to".to_owned(),
                path: format_path(path),
            });
        };

        arr.push(value);
        Ok(())
    })
}

/// Removes the item at `path` from its parent sequence or mapping.
pub fn remove_in(root: &Value, path: &[PathChunk]) -> ActionResult<Value> {
    let Some((chunk, parent)) = path.split_last() else {
        return Err(ActionError::EmptyPath);
    };

    update_in(root, parent, |container| match (container, chunk) {
        (Value::Array(arr), PathChunk::Index(index)) => {
            if *index >= arr.len() {
                return Err(out_of_bounds(*index, arr.len(), path));
            }
            arr.remove(*index);
            Ok(())
        }
        (Value::Object(map), chunk) => {
            let key = chunk.to_string();
            match map.remove(&key) {
                Some(_) => Ok(()),
                None => Err(missing_key(&key, path)),
            }
        }
        (Value::Array(_), PathChunk::Key(key)) => Err(missing_key(key, path)),
        _ => Err(ActionError::NotAContainer {
            path: format_path(parent),
        }),
    })
}

/// Exchanges two children of the container at `parent`.
pub fn swap_in(
    root: &Value,
    parent: &[PathChunk],
    first: &PathChunk,
    second: &PathChunk,
) -> ActionResult<Value> {
    // Both children have to exist before anything moves
    let mut first_path = parent.to_vec();
    first_path.push(first.clone());
    let mut second_path = parent.to_vec();
    second_path.push(second.clone());
    let first_value = fetch(root, &first_path)?.clone();
    let second_value = fetch(root, &second_path)?.clone();

    let swapped = set_in(root, &first_path, second_value)?;
    set_in(&swapped, &second_path, first_value)
}

fn out_of_bounds(index: usize, len: usize, path: &[PathChunk]) -> ActionError {
    ActionError::IndexOutOfBounds {
        index,
        len,
        path: format_path(path),
    }
}

fn missing_key(key: &str, path: &[PathChunk]) -> ActionError {
    ActionError::MissingKey {
        key: key.to_owned(),
        path: format_path(path),
    }
}
