use wire::state::{Alias, FleetData, QueueDestination, RoutingStrategy};

use super::*;

const QUEUE_ARN: &str = "arn:aws:gamelift:us-west-2:123:gamesessionqueue/arena-queue";

fn queue(name: &str, destinations: &[&str]) -> GameSessionQueue {
    GameSessionQueue {
        name: name.to_owned(),
        game_session_queue_arn: Some(format!("arn:aws:gamelift:us-west-2:123:gamesessionqueue/{name}")),
        destinations: destinations
            .iter()
            .map(|arn| QueueDestination { destination_arn: (*arn).to_owned() })
            .collect(),
        ..GameSessionQueue::default()
    }
}

fn region() -> Rect {
    Rect::new(200.0, 320.0, 1000.0, 140.0)
}

#[test]
fn resolves_destinations_through_aliases() {
    let state = State {
        fleets: vec![FleetData {
            fleet_id: "fleet-1".to_owned(),
            fleet_arn: Some("arn:aws:gamelift:us-west-2:123:fleet/fleet-1".to_owned()),
            ..FleetData::default()
        }],
        game_session_queues: vec![queue(
            "arena-queue",
            &["arn:aws:gamelift:us-west-2:123:fleet/fleet-1", "arn:aws:gamelift:us-west-2:123:alias/alias-1"],
        )],
        aliases: vec![Alias {
            alias_id: "alias-1".to_owned(),
            routing_strategy: Some(RoutingStrategy { fleet_id: Some("fleet-2".to_owned()), ..RoutingStrategy::default() }),
            ..Alias::default()
        }],
        ..State::default()
    };

    let mut queues = GameSessionQueues::new();
    let mut commands = Vec::new();
    let report = queues.update(&state, region(), &mut commands);

    assert_eq!(report.added, vec!["arena-queue".to_owned()]);
    let q = queues.get("arena-queue").unwrap();
    assert_eq!(q.fleet_ids, vec!["fleet-1".to_owned(), "fleet-2".to_owned()]);
}

#[test]
fn lookup_by_name_arn_or_suffix() {
    let state = State { game_session_queues: vec![queue("arena-queue", &[])], ..State::default() };
    let mut queues = GameSessionQueues::new();
    queues.update(&state, region(), &mut Vec::new());

    assert!(queues.get_by_name_or_arn("arena-queue").is_some());
    assert!(queues.get_by_name_or_arn(QUEUE_ARN).is_some());
    assert!(queues.get_by_name_or_arn("arn:aws:gamelift:eu-west-1:9:gamesessionqueue/arena-queue").is_some());
    assert!(queues.get_by_name_or_arn("other").is_none());
}

#[test]
fn queue_missing_from_snapshot_is_removed() {
    let mut queues = GameSessionQueues::new();
    let mut commands = Vec::new();
    queues.update(&State { game_session_queues: vec![queue("a", &[]), queue("b", &[])], ..State::default() }, region(), &mut commands);
    assert_eq!(queues.len(), 2);

    commands.clear();
    let report = queues.update(&State { game_session_queues: vec![queue("b", &[])], ..State::default() }, region(), &mut commands);
    assert_eq!(report.removed, vec!["a".to_owned()]);
    assert!(commands.contains(&DrawCommand::Destroy { node: NodeId::Queue("a".to_owned()) }));
    // the survivor is re-laid out as a lone queue
    assert!(commands.iter().any(|c| matches!(c, DrawCommand::Resize { node: NodeId::Queue(n), .. } if n == "b")));
}
