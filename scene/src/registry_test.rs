use super::*;
use crate::geom::Point;
use crate::motion::{Destination, Timing};
use crate::render::NodeId;

fn player(id: &str) -> Player {
    Player::new(id, Point::new(0.0, 0.0))
}

#[test]
fn add_spawns_and_get_finds() {
    let mut players = Players::new();
    let mut commands = Vec::new();
    players.add(player("p1"), &mut commands).unwrap();

    assert!(players.contains("p1"));
    assert_eq!(players.len(), 1);
    assert_eq!(players.get("p1").map(|p| p.id.as_str()), Some("p1"));
    assert_eq!(
        commands,
        vec![DrawCommand::Spawn { node: NodeId::Player("p1".to_owned()), at: Point::new(0.0, 0.0), parent: None }]
    );
}

#[test]
fn get_never_creates() {
    let players = Players::new();
    assert!(players.get("ghost").is_none());
    assert!(players.is_empty());
}

#[test]
fn duplicate_add_is_rejected() {
    let mut players = Players::new();
    let mut commands = Vec::new();
    players.add(player("p1"), &mut commands).unwrap();
    let err = players.add(player("p1"), &mut commands).unwrap_err();
    assert!(matches!(err, SceneError::DuplicateEntity { kind: "player", ref id } if id == "p1"));
    assert_eq!(commands.len(), 1);
}

#[test]
fn remove_cancels_motion_before_destroy() {
    let mut players = Players::new();
    let mut commands = Vec::new();
    players.add(player("p1"), &mut commands).unwrap();

    let timing = Timing { move_speed: 3.0, fade_ms: 400 };
    let p = players.get_mut("p1").unwrap();
    p.motion_mut().begin(Destination::point(Point::new(90.0, 0.0)), Point::new(90.0, 0.0), 0, timing);
    p.motion_mut().enqueue(Destination::point(Point::new(5.0, 5.0)));
    let generation = p.motion().generation();

    commands.clear();
    let removed = players.remove("p1", 180, &mut commands).unwrap();
    assert!(!removed.motion().is_animating());
    assert_eq!(removed.motion().queued(), 0);
    assert!(removed.motion().generation() > generation);
    assert_eq!(
        commands,
        vec![
            DrawCommand::StopTweens { node: NodeId::Player("p1".to_owned()) },
            DrawCommand::Destroy { node: NodeId::Player("p1".to_owned()) },
        ]
    );
    assert!(!players.contains("p1"));
}

#[test]
fn remove_unknown_is_none() {
    let mut matches = Matches::new();
    let mut commands = Vec::new();
    assert!(matches.remove("nope", 0, &mut commands).is_none());
    assert!(commands.is_empty());
}

#[test]
fn get_all_is_ordered_by_id() {
    let mut players = Players::new();
    let mut commands = Vec::new();
    for id in ["c", "a", "b"] {
        players.add(player(id), &mut commands).unwrap();
    }
    let ids: Vec<&str> = players.get_all().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
}

#[test]
fn readded_id_starts_above_retired_generation() {
    let mut players = Players::new();
    let mut commands = Vec::new();
    players.add(player("p1"), &mut commands).unwrap();
    let timing = Timing { move_speed: 3.0, fade_ms: 400 };
    let p = players.get_mut("p1").unwrap();
    p.motion_mut().begin(Destination::point(Point::new(90.0, 0.0)), Point::new(90.0, 0.0), 0, timing);
    let issued = p.motion().generation();

    let removed = players.remove("p1", 10, &mut commands).unwrap();
    players.add(player("p1"), &mut commands).unwrap();
    let fresh = players.get("p1").unwrap().motion().generation();
    assert!(fresh > issued);
    assert!(fresh >= removed.motion().generation());
}
