use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumIter, EnumString};

/// Wire names match the `type` tag serde writes for [`Action`].
#[derive(Debug, Clone, Copy, EnumIter, Display, EnumString, PartialEq, Eq, Hash)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    UpdateArray,
    UpdateObject,
    CreateArray,
    CreateAndConnect,
    DeleteArray,
    DisconnectAndDelete,
    Connect,
    Disconnect,
    Noop,
}

/// Full replacement value for a record or a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPayload {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletePayload {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

/// Points at a relation field of a record, the record itself is left as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationPayload {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub path: String,
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyPayload {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    UpdateArray(RecordPayload),
    UpdateObject(RecordPayload),
    CreateArray(RecordPayload),
    CreateAndConnect(RelationPayload),
    DeleteArray(DeletePayload),
    DisconnectAndDelete(RelationPayload),
    Connect(RelationPayload),
    Disconnect(RelationPayload),
    Noop(EmptyPayload),
}

impl Action {
    pub fn kind(&self) -> ActionType {
        match self {
            Action::UpdateArray(_) => ActionType::UpdateArray,
            Action::UpdateObject(_) => ActionType::UpdateObject,
            Action::CreateArray(_) => ActionType::CreateArray,
            Action::CreateAndConnect(_) => ActionType::CreateAndConnect,
            Action::DeleteArray(_) => ActionType::DeleteArray,
            Action::DisconnectAndDelete(_) => ActionType::DisconnectAndDelete,
            Action::Connect(_) => ActionType::Connect,
            Action::Disconnect(_) => ActionType::Disconnect,
            Action::Noop(_) => ActionType::Noop,
        }
    }

    /// Collection the action applies to, `None` for `NOOP`.
    pub fn key(&self) -> Option<&str> {
        match self {
            Action::UpdateArray(payload)
            | Action::UpdateObject(payload)
            | Action::CreateArray(payload) => Some(payload.key.as_str()),
            Action::CreateAndConnect(payload)
            | Action::DisconnectAndDelete(payload)
            | Action::Connect(payload)
            | Action::Disconnect(payload) => Some(payload.key.as_str()),
            Action::DeleteArray(payload) => Some(payload.key.as_str()),
            Action::Noop(_) => None,
        }
    }
}
