//! Snapshot record types.
//!
//! Field names follow the back end's PascalCase JSON. Everything except the
//! record identifiers is optional or defaulted; the server omits fields it has
//! not fetched yet and the console must still reconcile the rest.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use serde::{Deserialize, Serialize};

/// Status value that removes a record from the scene even while listed.
pub const TERMINATED: &str = "TERMINATED";

/// Full authoritative server state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct State {
    pub fleets: Vec<FleetData>,
    pub matchmaking_configurations: Vec<MatchmakingConfiguration>,
    pub game_session_queues: Vec<GameSessionQueue>,
    pub aliases: Vec<Alias>,
}

impl State {
    /// Resolve a queue destination ARN to the fleet id it routes to.
    ///
    /// Fleet ARNs resolve directly. Alias ARNs resolve through the alias's
    /// routing strategy; terminal aliases (no fleet) resolve to `None`.
    #[must_use]
    pub fn resolve_fleet_id(&self, destination_arn: &str) -> Option<String> {
        if let Some(fleet) = self
            .fleets
            .iter()
            .find(|f| f.fleet_arn.as_deref() == Some(destination_arn) || f.fleet_id == destination_arn)
        {
            return Some(fleet.fleet_id.clone());
        }

        if let Some((_, suffix)) = destination_arn.split_once(":fleet/") {
            return Some(suffix.to_owned());
        }

        let alias_id = destination_arn
            .split_once(":alias/")
            .map_or(destination_arn, |(_, suffix)| suffix);
        self.aliases
            .iter()
            .find(|a| a.alias_arn.as_deref() == Some(destination_arn) || a.alias_id == alias_id)
            .and_then(|a| a.routing_strategy.as_ref())
            .and_then(|r| r.fleet_id.clone())
    }
}

/// One fleet bundled with its capacity, utilization, instances and sessions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FleetData {
    pub fleet_id: String,
    #[serde(default)]
    pub fleet_arn: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub instance_type: Option<String>,
    #[serde(default)]
    pub fleet_capacity: Option<FleetCapacity>,
    #[serde(default)]
    pub fleet_utilization: Option<FleetUtilization>,
    #[serde(default)]
    pub instances: Vec<Instance>,
    #[serde(default)]
    pub game_sessions: Vec<GameSession>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FleetCapacity {
    pub instance_type: Option<String>,
    pub instance_counts: InstanceCounts,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InstanceCounts {
    pub desired: u32,
    pub minimum: u32,
    pub maximum: u32,
    pub pending: u32,
    pub active: u32,
    pub idle: u32,
    pub terminating: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FleetUtilization {
    pub active_server_process_count: u32,
    pub active_game_session_count: u32,
    pub current_player_session_count: u32,
    pub maximum_player_session_count: u32,
}

/// A compute instance inside a fleet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Instance {
    pub instance_id: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub dns_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "Type")]
    pub instance_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// A game session hosted on a fleet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameSession {
    pub game_session_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub current_player_session_count: u32,
    #[serde(default)]
    pub maximum_player_session_count: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MatchmakingConfiguration {
    pub name: String,
    #[serde(default)]
    pub configuration_arn: Option<String>,
    #[serde(default)]
    pub game_session_queue_arns: Vec<String>,
    #[serde(default)]
    pub rule_set_name: Option<String>,
    #[serde(default)]
    pub request_timeout_seconds: Option<u32>,
    #[serde(default)]
    pub acceptance_required: bool,
    #[serde(default)]
    pub flex_match_mode: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameSessionQueue {
    pub name: String,
    #[serde(default)]
    pub game_session_queue_arn: Option<String>,
    #[serde(default)]
    pub timeout_in_seconds: Option<u32>,
    #[serde(default)]
    pub destinations: Vec<QueueDestination>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueueDestination {
    pub destination_arn: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Alias {
    pub alias_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub alias_arn: Option<String>,
    #[serde(default)]
    pub routing_strategy: Option<RoutingStrategy>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RoutingStrategy {
    #[serde(rename = "Type")]
    pub strategy_type: Option<String>,
    pub fleet_id: Option<String>,
    pub message: Option<String>,
}
