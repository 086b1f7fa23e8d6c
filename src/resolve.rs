use log::debug;
use serde_json::Value;

use crate::{
    document::fetch,
    error::{ActionError, ActionResult},
    paths::{format_path, parse_path, PathChunk},
};

/// What owns the resolved location inside its root-level field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    /// The path names a root-level array and nothing below it
    Collection,
    /// An item of a root-level array
    Record { index: usize },
    /// A root-level object, which acts as its own record
    Singleton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationClass {
    RootCollection,
    RootRecord,
    Nested,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub key: String,
    pub owner: Owner,
    pub id: Option<Value>,
    /// Everything below the owning record
    pub sub_path: Vec<PathChunk>,
}

impl Location {
    pub fn class(&self) -> LocationClass {
        match (self.owner, self.sub_path.is_empty()) {
            (Owner::Collection, _) => LocationClass::RootCollection,
            (Owner::Singleton, true) => LocationClass::RootCollection,
            (Owner::Record { .. }, true) => LocationClass::RootRecord,
            (_, false) => LocationClass::Nested,
        }
    }

    pub fn owner_path(&self) -> Vec<PathChunk> {
        let mut path = vec![PathChunk::Key(self.key.clone())];
        if let Owner::Record { index } = self.owner {
            path.push(PathChunk::Index(index));
        }
        path
    }

    pub fn record<'a>(&self, root: &'a Value) -> ActionResult<&'a Value> {
        fetch(root, &self.owner_path())
    }

    pub fn relation_path(&self) -> String {
        format_path(&self.sub_path)
    }

    /// The full path this location was resolved from, normalized.
    pub fn path(&self) -> String {
        let mut path = self.owner_path();
        path.extend(self.sub_path.iter().cloned());
        format_path(&path)
    }
}

/// Splits `path` into the root-level key, the owning record and the rest.
///
/// Only the chunks up to the owning record are checked against `root`.
/// The sub path is checked by whichever action reads or rewrites it.
pub fn resolve(root: &Value, path: &str, id_field: &str) -> ActionResult<Location> {
    let chunks = parse_path(path)?;
    let key = chunks[0].to_string();
    let collection = fetch(root, &chunks[..1])?;

    let location = match collection {
        Value::Array(_) if chunks.len() == 1 => Location {
            key,
            owner: Owner::Collection,
            id: None,
            sub_path: vec![],
        },
        Value::Array(_) => {
            let record = fetch(root, &chunks[..2])?;
            let PathChunk::Index(index) = &chunks[1] else {
                return Err(ActionError::MissingKey {
                    key: chunks[1].to_string(),
                    path: format_path(&chunks[..2]),
                });
            };
            let index = *index;

            Location {
                key,
                owner: Owner::Record { index },
                id: record.get(id_field).cloned(),
                sub_path: chunks[2..].to_vec(),
            }
        }
        Value::Object(_) => Location {
            key,
            owner: Owner::Singleton,
            id: Some(Value::String(String::new())),
            sub_path: chunks[1..].to_vec(),
        },
        _ => {
            return Err(ActionError::NotAContainer {
                path: format_path(&chunks[..1]),
            });
        }
    };

    debug!("Resolved `{}` to {:?}", path, location);
    Ok(location)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn root() -> Value {
        json!({
            "user": {"name": "name", "info": {"phone": [{"type": "H"}]}},
            "posts": [{"id": "id1", "users": [{}]}, {"id": "id2", "users": []}],
            "drafts": [{"title": "no id"}],
            "count": 3
        })
    }

    #[test]
    fn bare_collection() {
        let location = resolve(&root(), "posts", "id").unwrap();

        assert_eq!(Owner::Collection, location.owner);
        assert_eq!(None, location.id);
        assert_eq!(LocationClass::RootCollection, location.class());
    }

    #[test]
    fn array_record_carries_its_id() {
        let location = resolve(&root(), "posts/1", "id").unwrap();

        assert_eq!(Owner::Record { index: 1 }, location.owner);
        assert_eq!(Some(json!("id2")), location.id);
        assert_eq!(LocationClass::RootRecord, location.class());
    }

    #[test]
    fn nested_in_array_record() {
        let location = resolve(&root(), "posts/0/users/0", "id").unwrap();

        assert_eq!(Some(json!("id1")), location.id);
        assert_eq!("users/0", location.relation_path());
        assert_eq!("posts/0/users/0", location.path());
        assert_eq!(LocationClass::Nested, location.class());
        assert_eq!(
            &json!({"id": "id1", "users": [{}]}),
            location.record(&root()).unwrap()
        );
    }

    #[test]
    fn nested_in_singleton() {
        let location = resolve(&root(), "user/info/phone", "id").unwrap();

        assert_eq!(Owner::Singleton, location.owner);
        assert_eq!(Some(json!("")), location.id);
        assert_eq!("info/phone", location.relation_path());
        assert_eq!(LocationClass::Nested, location.class());
    }

    #[test]
    fn custom_id_field() {
        let location = resolve(&root(), "drafts/0", "title").unwrap();
        assert_eq!(Some(json!("no id")), location.id);

        let location = resolve(&root(), "drafts/0", "id").unwrap();
        assert_eq!(None, location.id);
    }

    #[test]
    fn numeric_ids_kept_as_numbers() {
        let root = json!({"tags": [{"id": 7, "label": "seven"}]});
        let location = resolve(&root, "tags/0/label", "id").unwrap();
        assert_eq!(Some(json!(7)), location.id);
    }

    #[test]
    fn unresolvable_owners_fail() {
        assert!(matches!(
            resolve(&root(), "comments/0", "id"),
            Err(ActionError::MissingKey { .. })
        ));
        assert!(matches!(
            resolve(&root(), "posts/9/users", "id"),
            Err(ActionError::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            resolve(&root(), "posts/first", "id"),
            Err(ActionError::MissingKey { .. })
        ));
        assert!(matches!(
            resolve(&root(), "count/0", "id"),
            Err(ActionError::NotAContainer { .. })
        ));
    }
}
