#![allow(clippy::float_cmp)]

use super::*;
use crate::geom::Point;
use crate::player::PlayerState;
use crate::render::DrawCommand;
use crate::support::{HOST_IP, flexmatch, placement, placement_json, scene, settle};

fn match_tweens(scene: &SceneState, match_id: &str) -> Vec<Point> {
    let node = NodeId::Match(match_id.to_owned());
    scene
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Tween { node: n, to, .. } if *n == node => Some(*to),
            _ => None,
        })
        .collect()
}

/// Search and form match `id` from configuration `cfg`, then let everyone arrive.
fn formed_match(scene: &mut SceneState, id: &str, players: &[&str]) {
    crate::flexmatch::handle(scene, &flexmatch("MatchmakingSearching", "t1", players, None));
    crate::flexmatch::handle(scene, &flexmatch("PotentialMatchCreated", "t1", players, Some(id)));
    settle(scene);
}

#[test]
fn fulfilled_walks_match_into_hosting_instance() {
    let mut s = scene();
    handle(&mut s, &placement("PlacementFulfilled", "pl1", Some(&["a", "b"]), Some(HOST_IP)));

    let m = s.matches.get("pl1").unwrap();
    assert_eq!(m.state, MatchState::Placing);
    assert_eq!(m.expected, 2);
    assert_eq!(m.members(), ["a".to_owned(), "b".to_owned()]);
    assert!(m.motion().is_animating());
    assert_eq!(s.players.get("a").unwrap().state, PlayerState::InMatch);

    settle(&mut s);
    assert!(s.matches.is_empty());
    assert!(s.players.is_empty());
    assert_eq!(match_tweens(&s, "pl1").last(), Some(&Point::new(256.0, 722.0)));
    assert!(s.commands.contains(&DrawCommand::FadeOut { node: NodeId::Match("pl1".to_owned()), duration_ms: 400 }));
}

#[test]
fn unknown_host_falls_back_off_screen() {
    let mut s = scene();
    handle(&mut s, &placement("PlacementFulfilled", "pl1", Some(&["a"]), Some("192.0.2.9")));
    settle(&mut s);

    assert_eq!(match_tweens(&s, "pl1").last(), Some(&OFFSCREEN_FALLBACK));
    assert!(s.matches.is_empty());
}

#[test]
fn fulfilled_reuses_a_formed_match() {
    let mut s = scene();
    formed_match(&mut s, "pl1", &["a", "b"]);
    assert_eq!(s.matches.get("pl1").unwrap().state, MatchState::Full);

    handle(&mut s, &placement("PlacementFulfilled", "pl1", Some(&["a", "b"]), Some(HOST_IP)));
    let m = s.matches.get("pl1").unwrap();
    assert_eq!(m.state, MatchState::Placing);
    assert_eq!(m.origin_config.as_deref(), Some("cfg"));

    // A repeated notification does not queue the trip twice.
    let queued = m.motion().queued();
    handle(&mut s, &placement("PlacementFulfilled", "pl1", Some(&["a", "b"]), Some(HOST_IP)));
    assert_eq!(s.matches.get("pl1").unwrap().motion().queued(), queued);

    settle(&mut s);
    assert!(s.matches.is_empty());
    assert!(s.players.is_empty());
}

#[test]
fn failure_sends_players_back_to_their_configuration() {
    let mut s = scene();
    formed_match(&mut s, "pl1", &["a", "b"]);

    handle(&mut s, &placement("PlacementTimedOut", "pl1", None, None));
    assert!(!s.matches.contains("pl1"));
    for id in ["a", "b"] {
        let player = s.players.get(id).unwrap();
        assert_eq!(player.state, PlayerState::WaitingForMatch);
        assert!(player.match_id.is_none());
    }

    settle(&mut s);
    let a = s.players.get("a").unwrap().motion().position();
    assert_eq!(a, Point::new(360.0, 140.0));
}

#[test]
fn failure_without_origin_resets_players() {
    let mut s = scene();
    handle(&mut s, &placement("PlacementFulfilled", "pl1", Some(&["a"]), Some(HOST_IP)));
    s.advance(50);

    handle(&mut s, &placement("PlacementFailed", "pl1", None, None));
    assert!(s.matches.is_empty());
    assert_eq!(s.players.get("a").unwrap().state, PlayerState::Reset);

    settle(&mut s);
    let a = s.players.get("a").unwrap();
    assert_eq!(a.motion().position(), a.motion().initial());
}

#[test]
fn failure_for_unknown_match_is_ignored() {
    let mut s = scene();
    handle(&mut s, &placement("PlacementCancelled", "nope", None, None));
    assert!(s.commands.is_empty());
}

#[test]
fn unknown_queue_is_ignored() {
    let mut s = scene();
    let mut json = placement_json("PlacementFulfilled", "pl1", Some(&["a"]), Some(HOST_IP));
    json["Resources"] = serde_json::json!(["arn:aws:gamelift:us-west-2:123:gamesessionqueue/elsewhere"]);
    let event: QueuePlacementEvent = serde_json::from_value(json).unwrap();

    handle(&mut s, &event);
    assert!(s.matches.is_empty());
    assert!(s.players.is_empty());
    assert!(s.commands.is_empty());
}

#[test]
fn lazy_match_halts_players_still_walking() {
    let mut s = scene();
    crate::flexmatch::handle(&mut s, &flexmatch("MatchmakingSearching", "t1", &["a"], None));
    s.advance(10);
    assert!(s.players.get("a").unwrap().motion().is_animating());
    s.commands.clear();

    handle(&mut s, &placement("PlacementFulfilled", "pl1", Some(&["a"]), Some(HOST_IP)));
    let a = s.players.get("a").unwrap();
    assert_eq!(a.state, PlayerState::InMatch);
    assert_eq!(a.match_id.as_deref(), Some("pl1"));
    assert!(!a.motion().is_animating());
    assert_eq!(a.motion().queued(), 0);
    assert!(s.commands.contains(&DrawCommand::StopTweens { node: NodeId::Player("a".to_owned()) }));

    settle(&mut s);
    assert!(s.players.is_empty());
    assert!(s.matches.is_empty());
}
