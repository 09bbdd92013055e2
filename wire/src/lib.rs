//! Wire message model and JSON decoding for the fleet console stream.
//!
//! This crate owns the inbound representation consumed by `scene`: every
//! message is a JSON object carrying a `Type` discriminator. Known types
//! decode into typed payloads; anything else is preserved as
//! [`Message::Other`] so newer servers never break older consoles.

pub mod events;
pub mod multipart;
pub mod state;

use serde_json::{Map, Value};

pub use events::{
    FlexMatchEvent, FlexMatchEventDetail, FlexMatchEventType, PlacedPlayerSession,
    PlacementEventType, QueuePlacementEvent, QueuePlacementEventDetail, Ticket, TicketPlayer,
};
pub use multipart::{MultipartPart, Reassembler};
pub use state::{
    Alias, FleetData, GameSession, GameSessionQueue, Instance, MatchmakingConfiguration, State,
};

/// `Type` of a full snapshot push.
pub const GET_STATE: &str = "GetState";
/// `Type` of a FlexMatch lifecycle event.
pub const FLEXMATCH_EVENT: &str = "FlexMatchEvent";
/// `Type` of a queue placement event.
pub const QUEUE_PLACEMENT_EVENT: &str = "QueuePlacementEvent";
/// `Type` of a fragment of a larger message.
pub const MULTIPART_MESSAGE: &str = "MultipartMessage";

/// Error returned by decoding and reassembly.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The text is not JSON, or a known message type has the wrong shape.
    #[error("invalid message JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The message has no string `Type` field.
    #[error("message has no `Type` discriminator")]
    MissingType,
    /// A multipart fragment is inconsistent with its own header or with
    /// fragments already buffered under the same id.
    #[error("invalid part {part_number}/{total_parts} for message {message_id}")]
    InvalidPart { message_id: String, part_number: u32, total_parts: u32 },
    /// All fragments arrived but the concatenated payload is not JSON.
    #[error("reassembled message {message_id} is not valid JSON: {source}")]
    Reassembly {
        message_id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Full snapshot message body.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetState {
    /// The authoritative server state.
    #[serde(default)]
    pub state: State,
}

/// A decoded inbound message.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    GetState(GetState),
    FlexMatchEvent(FlexMatchEvent),
    QueuePlacementEvent(QueuePlacementEvent),
    MultipartMessage(MultipartPart),
    /// A message whose `Type` this console does not model.
    Other { kind: String, body: Value },
}

impl Message {
    /// The `Type` discriminator this message was decoded from.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::GetState(_) => GET_STATE,
            Self::FlexMatchEvent(_) => FLEXMATCH_EVENT,
            Self::QueuePlacementEvent(_) => QUEUE_PLACEMENT_EVENT,
            Self::MultipartMessage(_) => MULTIPART_MESSAGE,
            Self::Other { kind, .. } => kind,
        }
    }
}

/// Decode a raw text frame into a message.
///
/// # Errors
///
/// Returns [`WireError::Json`] for malformed JSON or a known type with a bad
/// shape, and [`WireError::MissingType`] when the discriminator is absent.
pub fn decode_message(text: &str) -> Result<Message, WireError> {
    let value: Value = serde_json::from_str(text)?;
    decode_value(value)
}

/// Decode an already-parsed JSON value into a message.
///
/// # Errors
///
/// Same as [`decode_message`], minus text parsing.
pub fn decode_value(value: Value) -> Result<Message, WireError> {
    let kind = value
        .get("Type")
        .and_then(Value::as_str)
        .ok_or(WireError::MissingType)?
        .to_owned();

    let message = match kind.as_str() {
        GET_STATE => Message::GetState(serde_json::from_value(value)?),
        FLEXMATCH_EVENT => Message::FlexMatchEvent(serde_json::from_value(value)?),
        QUEUE_PLACEMENT_EVENT => Message::QueuePlacementEvent(serde_json::from_value(value)?),
        MULTIPART_MESSAGE => Message::MultipartMessage(serde_json::from_value(value)?),
        _ => Message::Other { kind, body: value },
    };
    Ok(message)
}

/// Build an outbound request with only a `Type` field.
#[must_use]
pub fn request(kind: &str) -> Value {
    request_with(kind, Map::new())
}

/// Build an outbound request with command-specific fields.
///
/// A `Type` key inside `fields` is overwritten by `kind`.
#[must_use]
pub fn request_with(kind: &str, mut fields: Map<String, Value>) -> Value {
    fields.insert("Type".to_owned(), Value::String(kind.to_owned()));
    Value::Object(fields)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
