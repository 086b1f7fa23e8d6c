use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ActionError, ActionResult};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mutation {
    Create,
    Update,
    Delete,
    Swap,
    Connect,
    Disconnect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationKind {
    #[serde(rename = "toOne")]
    ToOne,
    #[serde(rename = "toMany")]
    ToMany,
}

/// Marks the targeted field as a reference into another collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<RelationKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Target {
    Single(String),
    Pair {
        #[serde(rename = "firstId")]
        first: String,
        #[serde(rename = "secondId")]
        second: String,
    },
}

/// A mutation request as produced by the editing UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(rename = "id")]
    pub target: Target,
    #[serde(rename = "updateType")]
    pub mutation: Mutation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<Relation>,
    #[serde(rename = "rootValue")]
    pub root: Value,
}

impl Request {
    pub fn new(path: impl Into<String>, mutation: Mutation, root: Value) -> Self {
        Request {
            target: Target::Single(path.into()),
            mutation,
            value: None,
            relation: None,
            root,
        }
    }

    pub fn swap(first: impl Into<String>, second: impl Into<String>, root: Value) -> Self {
        Request {
            target: Target::Pair {
                first: first.into(),
                second: second.into(),
            },
            mutation: Mutation::Swap,
            value: None,
            relation: None,
            root,
        }
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_relation(mut self, relation: Relation) -> Self {
        self.relation = Some(relation);
        self
    }

    /// Checks that the target shape and value fit the mutation.
    pub fn operation(&self) -> ActionResult<Operation<'_>> {
        let value = self.value.as_ref();
        let required = || {
            value.ok_or_else(|| {
                ActionError::InvalidRequest(format!("{} needs a value", self.mutation))
            })
        };

        Ok(match (&self.target, self.mutation) {
            (Target::Pair { first, second }, Mutation::Swap) => Operation::Swap {
                first: first.as_str(),
                second: second.as_str(),
            },
            (Target::Single(_), Mutation::Swap) => {
                return Err(ActionError::InvalidRequest(
                    "swap needs both firstId and secondId".to_owned(),
                ));
            }
            (Target::Pair { .. }, mutation) => {
                return Err(ActionError::InvalidRequest(format!(
                    "{} takes a single path",
                    mutation
                )));
            }
            (Target::Single(path), Mutation::Create) => Operation::Create {
                path: path.as_str(),
                value: required()?,
            },
            (Target::Single(path), Mutation::Update) => Operation::Update {
                path: path.as_str(),
                value: required()?,
            },
            (Target::Single(path), Mutation::Delete) => Operation::Delete {
                path: path.as_str(),
                value,
            },
            (Target::Single(path), Mutation::Connect) => Operation::Connect {
                path: path.as_str(),
                value: required()?,
            },
            (Target::Single(path), Mutation::Disconnect) => Operation::Disconnect {
                path: path.as_str(),
                value: required()?,
            },
        })
    }
}

/// A request narrowed down to what each mutation actually carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation<'a> {
    Create { path: &'a str, value: &'a Value },
    Update { path: &'a str, value: &'a Value },
    Delete { path: &'a str, value: Option<&'a Value> },
    Swap { first: &'a str, second: &'a str },
    Connect { path: &'a str, value: &'a Value },
    Disconnect { path: &'a str, value: &'a Value },
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn mutation_names_match_the_wire() {
        for mutation in Mutation::iter() {
            assert_eq!(json!(mutation.to_string()), serde_json::to_value(mutation).unwrap());
        }
        assert_eq!("disconnect", Mutation::Disconnect.to_string());
    }

    #[test]
    fn parses_ui_shaped_requests() {
        let request: Request = serde_json::from_value(json!({
            "id": "posts/0/users",
            "updateType": "create",
            "value": {"name": ""},
            "relation": {"to": "users", "type": "toMany"},
            "rootValue": {"posts": []}
        }))
        .unwrap();

        assert_eq!(Target::Single("posts/0/users".to_owned()), request.target);
        assert_eq!(Mutation::Create, request.mutation);
        assert_eq!(
            Some(Relation {
                to: Some("users".to_owned()),
                kind: Some(RelationKind::ToMany),
            }),
            request.relation
        );
    }

    #[test]
    fn parses_swap_pairs_and_bare_relations() {
        let request: Request = serde_json::from_value(json!({
            "id": {"firstId": "posts/0", "secondId": "posts/1"},
            "updateType": "swap",
            "relation": {},
            "rootValue": {}
        }))
        .unwrap();

        assert_eq!(
            Operation::Swap {
                first: "posts/0",
                second: "posts/1"
            },
            request.operation().unwrap()
        );
        assert_eq!(Some(Relation::default()), request.relation);
    }

    #[test]
    fn mismatched_targets_rejected() {
        let single_swap = Request::new("posts/0", Mutation::Swap, json!({}));
        assert!(matches!(
            single_swap.operation(),
            Err(ActionError::InvalidRequest(_))
        ));

        let mut pair_delete = Request::swap("posts/0", "posts/1", json!({}));
        pair_delete.mutation = Mutation::Delete;
        assert!(matches!(
            pair_delete.operation(),
            Err(ActionError::InvalidRequest(_))
        ));
    }

    #[test]
    fn values_required_where_used() {
        for mutation in [
            Mutation::Create,
            Mutation::Update,
            Mutation::Connect,
            Mutation::Disconnect,
        ] {
            let request = Request::new("posts", mutation, json!({}));
            assert!(matches!(
                request.operation(),
                Err(ActionError::InvalidRequest(_))
            ));
        }

        let delete = Request::new("posts/0", Mutation::Delete, json!({}));
        assert_eq!(
            Operation::Delete {
                path: "posts/0",
                value: None
            },
            delete.operation().unwrap()
        );
    }
}
