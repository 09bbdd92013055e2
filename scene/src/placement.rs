//! Queue placement events.
//!
//! A match is keyed by placement id. A fulfilled placement walks the match
//! to its queue and then into the hosting instance, where it disappears and
//! its players are handed off. Any placement without player sessions is a
//! failure: the match breaks up and its players go back to matchmaking.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use wire::{PlacedPlayerSession, PlacementEventType, QueuePlacementEvent, QueuePlacementEventDetail};

use crate::consts::OFFSCREEN_FALLBACK;
use crate::matches::MatchState;
use crate::motion::{Animatable, Arrival, ContainerRef, Destination};
use crate::reconcile::HasBounds;
use crate::render::NodeId;
use crate::state::SceneState;

pub fn handle(scene: &mut SceneState, event: &QueuePlacementEvent) {
    let detail = &event.detail;
    match &detail.placed_player_sessions {
        None => failed(scene, detail),
        Some(sessions) if detail.event_type == PlacementEventType::PlacementFulfilled => {
            fulfilled(scene, event.queue(), detail, sessions);
        }
        Some(_) => tracing::trace!(event = ?detail.event_type, "placement event ignored"),
    }
}

fn failed(scene: &mut SceneState, detail: &QueuePlacementEventDetail) {
    let match_id = detail.placement_id.as_str();
    let Some(origin) = scene.matches.get(match_id).map(|m| m.origin_config.clone()) else {
        tracing::debug!(%match_id, event = ?detail.event_type, "placement failed for unknown match");
        return;
    };
    let members = scene.break_up_match(match_id);
    tracing::info!(%match_id, event = ?detail.event_type, players = members.len(), "placement failed");

    let origin = origin.filter(|config| scene.configs.get_by_name_or_arn(config).is_some());
    for player_id in &members {
        match &origin {
            Some(config) => {
                scene.add_destination(
                    &NodeId::Player(player_id.clone()),
                    Destination::container(ContainerRef::Config(config.clone())),
                );
            }
            None => {
                scene.reset_player(player_id);
            }
        }
    }
}

fn fulfilled(
    scene: &mut SceneState,
    queue: Option<&str>,
    detail: &QueuePlacementEventDetail,
    sessions: &[PlacedPlayerSession],
) {
    let Some(ident) = queue else {
        tracing::debug!("placement event without a queue");
        return;
    };
    let Some((queue_name, queue_center)) =
        scene.queues.get_by_name_or_arn(ident).map(|q| (q.name().to_owned(), q.bounds().center()))
    else {
        tracing::debug!(queue = %ident, "placement for unknown queue");
        return;
    };

    let match_id = detail.placement_id.as_str();
    if !scene.matches.contains(match_id) {
        scene.create_match(match_id, queue_center, sessions.len(), None);
        for session in sessions {
            scene.ensure_player(&session.player_id);
            scene.halt(&NodeId::Player(session.player_id.clone()));
            scene.join_match(&session.player_id, match_id);
        }
    }

    let Some(m) = scene.matches.get_mut(match_id) else {
        return;
    };
    if m.motion().is_animating() || m.motion().queued() > 0 {
        tracing::debug!(%match_id, "match already on its way");
        return;
    }
    m.state = MatchState::Placing;

    let host = detail
        .ip_address
        .as_deref()
        .and_then(|ip| scene.fleets.find_instance_by_ip(ip))
        .map(|i| i.record.instance_id.clone());
    let last = match host {
        Some(instance_id) => Destination::container(ContainerRef::Instance(instance_id)),
        None => {
            tracing::debug!(%match_id, ip = ?detail.ip_address, "no hosting instance; leaving off screen");
            Destination::point(OFFSCREEN_FALLBACK)
        }
    };

    let node = NodeId::Match(match_id.to_owned());
    scene.add_destination(&node, Destination::container(ContainerRef::Queue(queue_name)));
    scene.add_destination(&node, last.disappearing().on_arrive(Arrival::HandOff));
    tracing::info!(%match_id, "placement fulfilled");
}

