//! Push event payloads: FlexMatch lifecycle and queue placement.
//!
//! Event details use the camelCase field names of the back end's event
//! notifications; the envelopes use PascalCase like every other message.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use serde::{Deserialize, Serialize};

/// FlexMatch event envelope. `resources[0]` names the matchmaking configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FlexMatchEvent {
    #[serde(rename = "FlexMatchEventDetail")]
    pub detail: FlexMatchEventDetail,
    #[serde(default)]
    pub resources: Vec<String>,
}

impl FlexMatchEvent {
    /// The matchmaking configuration identifier, if the server sent one.
    #[must_use]
    pub fn configuration(&self) -> Option<&str> {
        self.resources.first().map(String::as_str)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlexMatchEventType {
    MatchmakingSearching,
    PotentialMatchCreated,
    AcceptMatch,
    AcceptMatchCompleted,
    MatchmakingSucceeded,
    MatchmakingTimedOut,
    MatchmakingCancelled,
    MatchmakingFailed,
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlexMatchEventDetail {
    #[serde(rename = "type")]
    pub event_type: FlexMatchEventType,
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub match_id: Option<String>,
    #[serde(default)]
    pub game_session_info: Option<GameSessionInfo>,
    #[serde(default)]
    pub acceptance_required: Option<bool>,
}

impl FlexMatchEventDetail {
    /// Player ids taking part in the event, without duplicates, in event order.
    ///
    /// Prefers `gameSessionInfo.players` and falls back to the ticket rosters.
    #[must_use]
    pub fn participants(&self) -> Vec<&str> {
        let from_session = self
            .game_session_info
            .as_ref()
            .map(|info| info.players.iter().map(|p| p.player_id.as_str()).collect::<Vec<_>>())
            .unwrap_or_default();
        let ids = if from_session.is_empty() {
            self.tickets
                .iter()
                .flat_map(|t| t.players.iter().map(|p| p.player_id.as_str()))
                .collect()
        } else {
            from_session
        };

        let mut out: Vec<&str> = Vec::with_capacity(ids.len());
        for id in ids {
            if !out.contains(&id) {
                out.push(id);
            }
        }
        out
    }
}

/// A matchmaking request grouping one or more players.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub ticket_id: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub players: Vec<TicketPlayer>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPlayer {
    pub player_id: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub player_session_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSessionInfo {
    #[serde(default)]
    pub players: Vec<TicketPlayer>,
    #[serde(default)]
    pub ip_address: Option<String>,
}

/// Queue placement envelope. `resources[0]` names the queue.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueuePlacementEvent {
    #[serde(rename = "QueuePlacementEventDetail")]
    pub detail: QueuePlacementEventDetail,
    #[serde(default)]
    pub resources: Vec<String>,
}

impl QueuePlacementEvent {
    /// The queue identifier, if the server sent one.
    #[must_use]
    pub fn queue(&self) -> Option<&str> {
        self.resources.first().map(String::as_str)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementEventType {
    PlacementFulfilled,
    PlacementCancelled,
    PlacementTimedOut,
    PlacementFailed,
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuePlacementEventDetail {
    pub placement_id: String,
    #[serde(rename = "type")]
    pub event_type: PlacementEventType,
    #[serde(default)]
    pub game_session_arn: Option<String>,
    #[serde(default)]
    pub game_session_region: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub dns_name: Option<String>,
    /// `None` when placement did not produce player sessions (any failure).
    #[serde(default)]
    pub placed_player_sessions: Option<Vec<PlacedPlayerSession>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedPlayerSession {
    pub player_id: String,
    #[serde(default)]
    pub player_session_id: Option<String>,
}
