//! FlexMatch lifecycle events.
//!
//! Events for configurations the scene has not seen yet are ignored; they
//! can race ahead of the snapshot that introduces the configuration.
//! Cancellation-type events only reset players whose active ticket is the
//! event's ticket, so a late event for a superseded search is harmless.

#[cfg(test)]
#[path = "flexmatch_test.rs"]
mod flexmatch_test;

use wire::{FlexMatchEvent, FlexMatchEventDetail, FlexMatchEventType};

use crate::motion::{Arrival, ContainerRef, Destination};
use crate::player::PlayerState;
use crate::render::NodeId;
use crate::state::SceneState;

pub fn handle(scene: &mut SceneState, event: &FlexMatchEvent) {
    let Some(ident) = event.configuration() else {
        tracing::debug!("flexmatch event without a configuration");
        return;
    };
    let Some(config) = scene.configs.get_by_name_or_arn(ident).map(|c| c.name().to_owned()) else {
        tracing::debug!(configuration = %ident, "flexmatch event for unknown configuration");
        return;
    };

    let detail = &event.detail;
    match detail.event_type {
        FlexMatchEventType::MatchmakingSearching => searching(scene, &config, detail),
        FlexMatchEventType::PotentialMatchCreated => potential_match(scene, &config, detail),
        FlexMatchEventType::MatchmakingTimedOut
        | FlexMatchEventType::MatchmakingCancelled
        | FlexMatchEventType::MatchmakingFailed => abandon(scene, detail),
        other => tracing::trace!(event = ?other, "flexmatch event ignored"),
    }
}

fn searching(scene: &mut SceneState, config: &str, detail: &FlexMatchEventDetail) {
    for ticket in &detail.tickets {
        for entry in &ticket.players {
            let player_id = entry.player_id.as_str();
            scene.ensure_player(player_id);
            let Some(player) = scene.players.get_mut(player_id) else {
                continue;
            };
            player.active_ticket = Some(ticket.ticket_id.clone());
            if player.is_committed() {
                continue;
            }
            if let Some(match_id) = player.match_id.clone() {
                scene.break_up_match(&match_id);
            }
            scene.add_destination(
                &NodeId::Player(player_id.to_owned()),
                Destination::container(ContainerRef::Config(config.to_owned())),
            );
            if let Some(player) = scene.players.get_mut(player_id) {
                player.state = PlayerState::WaitingForMatch;
            }
        }
    }
}

fn potential_match(scene: &mut SceneState, config: &str, detail: &FlexMatchEventDetail) {
    let Some(match_id) = detail.match_id.as_deref() else {
        tracing::debug!("potential match without a match id");
        return;
    };
    let participants = detail.participants();
    if !scene.matches.contains(match_id) {
        let at = scene.config_center(config).unwrap_or_default();
        scene.create_match(match_id, at, participants.len(), Some(config.to_owned()));
    }

    for player_id in participants {
        scene.ensure_player(player_id);
        if scene.players.get(player_id).is_none_or(|p| p.state == PlayerState::InMatch) {
            continue;
        }
        let walk = Destination::container(ContainerRef::Match(match_id.to_owned()))
            .on_arrive(Arrival::JoinMatch { match_id: match_id.to_owned() });
        scene.add_destination(&NodeId::Player(player_id.to_owned()), walk);
        if let Some(player) = scene.players.get_mut(player_id) {
            player.state = PlayerState::WalkingToMatch;
        }
    }
}

fn abandon(scene: &mut SceneState, detail: &FlexMatchEventDetail) {
    for ticket in &detail.tickets {
        for entry in &ticket.players {
            let player_id = entry.player_id.as_str();
            let current = scene
                .players
                .get(player_id)
                .map(|p| p.active_ticket.as_deref() == Some(ticket.ticket_id.as_str()));
            match current {
                Some(true) => {
                    scene.reset_player(player_id);
                }
                Some(false) => {
                    tracing::debug!(%player_id, ticket = %ticket.ticket_id, "stale ticket ignored");
                }
                None => {}
            }
        }
    }
}
