use serde_json::json;

use super::*;

#[test]
fn clip_follows_displacement_sign() {
    assert_eq!(Clip::horizontal(-3.0), Some(Clip::WalkLeft));
    assert_eq!(Clip::horizontal(3.0), Some(Clip::WalkRight));
    assert_eq!(Clip::horizontal(0.0), None);
    assert_eq!(Clip::vertical(-1.0), Some(Clip::WalkUp));
    assert_eq!(Clip::vertical(1.0), Some(Clip::WalkDown));
    assert_eq!(Clip::vertical(0.0), None);
}

#[test]
fn draw_command_serializes_with_op_tag() {
    let cmd = DrawCommand::Tween {
        node: NodeId::Player("p1".to_owned()),
        to: Point::new(1.0, 2.0),
        duration_ms: 40,
    };
    let value = serde_json::to_value(&cmd).expect("serialize");
    assert_eq!(
        value,
        json!({
            "op": "tween",
            "node": { "kind": "player", "id": "p1" },
            "to": { "x": 1.0, "y": 2.0 },
            "duration_ms": 40
        })
    );
}

#[test]
fn reparent_to_root_serializes_null_parent() {
    let cmd = DrawCommand::Reparent {
        node: NodeId::Player("p1".to_owned()),
        parent: None,
        at: Point::default(),
    };
    let value = serde_json::to_value(&cmd).expect("serialize");
    assert_eq!(value["op"], "reparent");
    assert!(value["parent"].is_null());
}

#[test]
fn node_accessor_covers_unit_like_variants() {
    let node = NodeId::GameSession("gs".to_owned());
    assert_eq!(DrawCommand::Destroy { node: node.clone() }.node(), &node);
    assert_eq!(DrawCommand::StopTweens { node: node.clone() }.node(), &node);
}
