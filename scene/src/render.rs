//! Draw commands issued to the rendering back end.
//!
//! The scene never draws. Every visible change is expressed as a
//! [`DrawCommand`] appended to the scene's command buffer; the host drains the
//! buffer once per frame and forwards it to whatever sprite/tween engine it
//! uses. Commands serialize to JSON tagged by `op` for hosts across a
//! WASM/JS boundary.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::geom::{Point, Rect};

/// Identity of a scene node, shared by the core and the rendering back end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum NodeId {
    Player(String),
    Match(String),
    Fleet(String),
    Instance(String),
    GameSession(String),
    Queue(String),
    Config(String),
}

/// Directional animation clip played while moving along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Clip {
    WalkLeft,
    WalkRight,
    WalkUp,
    WalkDown,
}

impl Clip {
    /// Clip for a horizontal displacement; `None` when not moving.
    #[must_use]
    pub fn horizontal(dx: f64) -> Option<Self> {
        if dx < 0.0 {
            Some(Self::WalkLeft)
        } else if dx > 0.0 {
            Some(Self::WalkRight)
        } else {
            None
        }
    }

    /// Clip for a vertical displacement; `None` when not moving.
    #[must_use]
    pub fn vertical(dy: f64) -> Option<Self> {
        if dy < 0.0 {
            Some(Self::WalkUp)
        } else if dy > 0.0 {
            Some(Self::WalkDown)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Spawn { node: NodeId, at: Point, parent: Option<NodeId> },
    Resize { node: NodeId, bounds: Rect },
    Label { node: NodeId, text: String },
    Tween { node: NodeId, to: Point, duration_ms: u64 },
    PlayClip { node: NodeId, clip: Clip },
    FadeOut { node: NodeId, duration_ms: u64 },
    /// Move a node under `parent` (or the scene root) at `at`, relative to the new parent.
    Reparent { node: NodeId, parent: Option<NodeId>, at: Point },
    /// Kill every running tween on the node.
    StopTweens { node: NodeId },
    Destroy { node: NodeId },
}

impl DrawCommand {
    /// The node this command targets.
    #[must_use]
    pub fn node(&self) -> &NodeId {
        match self {
            Self::Spawn { node, .. }
            | Self::Resize { node, .. }
            | Self::Label { node, .. }
            | Self::Tween { node, .. }
            | Self::PlayClip { node, .. }
            | Self::FadeOut { node, .. }
            | Self::Reparent { node, .. }
            | Self::StopTweens { node }
            | Self::Destroy { node } => node,
        }
    }
}
