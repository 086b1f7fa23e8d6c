use log::debug;
use serde_json::Value;

use crate::{
    action::{Action, DeletePayload, EmptyPayload, RecordPayload, RelationPayload},
    document::{fetch, push_in, remove_in, set_in, swap_in},
    error::{ActionError, ActionResult},
    request::{Mutation, Operation, Relation, Request},
    resolve::{resolve, Location, LocationClass, Owner},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionConfig {
    /// Field of an owning record that holds its identifier
    pub id_field: String,
}

impl Default for ActionConfig {
    fn default() -> Self {
        ActionConfig {
            id_field: "id".to_owned(),
        }
    }
}

impl ActionConfig {
    pub fn new(id_field: impl Into<String>) -> Self {
        ActionConfig {
            id_field: id_field.into(),
        }
    }
}

/// Turns a request into the action the store should apply.
///
/// The document in the request is only read. Values in the returned action
/// are derived copies of the owning record.
pub fn generate_action(request: &Request) -> ActionResult<Action> {
    generate_action_with(request, &ActionConfig::default())
}

pub fn generate_action_with(request: &Request, config: &ActionConfig) -> ActionResult<Action> {
    let root = &request.root;
    let relation = request.relation.as_ref();
    let id_field = config.id_field.as_str();
    if let Some(relation) = relation {
        debug!("Relation field to {:?} ({:?})", relation.to, relation.kind);
    }

    let action = match request.operation()? {
        Operation::Create { path, value } => {
            create(resolve(root, path, id_field)?, root, value, relation)?
        }
        Operation::Update { path, value } => update(resolve(root, path, id_field)?, root, value)?,
        Operation::Delete { path, value } => {
            delete(resolve(root, path, id_field)?, root, value, relation)?
        }
        Operation::Swap { first, second } => swap(
            resolve(root, first, id_field)?,
            resolve(root, second, id_field)?,
            root,
        )?,
        Operation::Connect { path, value } => {
            let location = resolve(root, path, id_field)?;
            let payload = relation_payload(location, root, Mutation::Connect, value)?;
            Action::Connect(payload)
        }
        Operation::Disconnect { path, value } => {
            let location = resolve(root, path, id_field)?;
            let payload = relation_payload(location, root, Mutation::Disconnect, value)?;
            Action::Disconnect(payload)
        }
    };

    debug!("{} resolved into {}", request.mutation, action.kind());
    Ok(action)
}

fn create(
    location: Location,
    root: &Value,
    value: &Value,
    relation: Option<&Relation>,
) -> ActionResult<Action> {
    match (location.class(), location.owner) {
        (LocationClass::RootCollection, Owner::Collection) => {
            Ok(Action::CreateArray(RecordPayload {
                key: location.key,
                id: None,
                value: value.clone(),
            }))
        }
        (LocationClass::Nested, _) if relation.is_some() => Ok(Action::CreateAndConnect(
            relation_payload(location, root, Mutation::Create, value)?,
        )),
        (LocationClass::Nested, _) => {
            let record = push_in(location.record(root)?, &location.sub_path, value.clone())?;
            record_update(location, record)
        }
        _ => Err(unsupported(Mutation::Create, &location)),
    }
}

fn update(location: Location, root: &Value, value: &Value) -> ActionResult<Action> {
    if location.owner == Owner::Collection {
        return Err(unsupported(Mutation::Update, &location));
    }

    // An empty sub path swaps out the whole record
    let record = set_in(location.record(root)?, &location.sub_path, value.clone())?;
    record_update(location, record)
}

fn delete(
    location: Location,
    root: &Value,
    value: Option<&Value>,
    relation: Option<&Relation>,
) -> ActionResult<Action> {
    match location.class() {
        LocationClass::RootRecord => Ok(Action::DeleteArray(DeletePayload {
            key: location.key,
            id: location.id,
        })),
        LocationClass::Nested if relation.is_some() => {
            let value = value.ok_or_else(|| {
                ActionError::InvalidRequest(
                    "deleting a relation item needs the related value".to_owned(),
                )
            })?;
            Ok(Action::DisconnectAndDelete(relation_payload(
                location,
                root,
                Mutation::Delete,
                value,
            )?))
        }
        LocationClass::Nested => {
            let record = remove_in(location.record(root)?, &location.sub_path)?;
            record_update(location, record)
        }
        LocationClass::RootCollection => Err(unsupported(Mutation::Delete, &location)),
    }
}

fn swap(first: Location, second: Location, root: &Value) -> ActionResult<Action> {
    if first.class() == LocationClass::RootRecord && second.class() == LocationClass::RootRecord {
        // Root records keep their order
        return Ok(Action::Noop(EmptyPayload {}));
    }

    let mismatched = || ActionError::MismatchedSwap {
        first: first.path(),
        second: second.path(),
    };

    if first.key != second.key || first.owner != second.owner {
        return Err(mismatched());
    }

    let (Some((first_chunk, parent)), Some((second_chunk, second_parent))) =
        (first.sub_path.split_last(), second.sub_path.split_last())
    else {
        return Err(mismatched());
    };

    if parent != second_parent {
        return Err(mismatched());
    }

    let record = swap_in(first.record(root)?, parent, first_chunk, second_chunk)?;
    record_update(first, record)
}

fn relation_payload(
    location: Location,
    root: &Value,
    mutation: Mutation,
    value: &Value,
) -> ActionResult<RelationPayload> {
    if location.class() != LocationClass::Nested {
        return Err(unsupported(mutation, &location));
    }

    // The relation field has to exist even though the record is not rewritten
    fetch(location.record(root)?, &location.sub_path)?;

    Ok(RelationPayload {
        path: location.relation_path(),
        key: location.key,
        id: location.id,
        value: value.clone(),
    })
}

fn record_update(location: Location, value: Value) -> ActionResult<Action> {
    let payload = RecordPayload {
        key: location.key,
        id: location.id,
        value,
    };

    match location.owner {
        Owner::Record { .. } => Ok(Action::UpdateArray(payload)),
        Owner::Singleton => Ok(Action::UpdateObject(payload)),
        Owner::Collection => Err(ActionError::UnsupportedTarget {
            mutation: "update".to_owned(),
            path: payload.key,
        }),
    }
}

fn unsupported(mutation: Mutation, location: &Location) -> ActionError {
    ActionError::UnsupportedTarget {
        mutation: mutation.to_string(),
        path: location.path(),
    }
}
