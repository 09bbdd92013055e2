use serde::Serialize;

use crate::geom::Point;
use crate::motion::{Animatable, Motion};
use crate::render::NodeId;

/// Lifecycle of a player sprite. `Reset` is reachable from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayerState {
    Created,
    WaitingForMatch,
    WalkingToMatch,
    InMatch,
    Reset,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub id: String,
    pub state: PlayerState,
    /// Latest matchmaking ticket; events for any other ticket are stale.
    pub active_ticket: Option<String>,
    /// Match this player is a member of.
    pub match_id: Option<String>,
    motion: Motion,
}

impl Player {
    #[must_use]
    pub fn new(id: impl Into<String>, at: Point) -> Self {
        Self { id: id.into(), state: PlayerState::Created, active_ticket: None, match_id: None, motion: Motion::new(at) }
    }

    /// Whether a matchmaking search should leave this player alone.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self.state, PlayerState::WalkingToMatch | PlayerState::InMatch)
    }
}

impl Animatable for Player {
    const KIND: &'static str = "player";

    fn id(&self) -> &str {
        &self.id
    }

    fn node(&self) -> NodeId {
        NodeId::Player(self.id.clone())
    }

    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }
}
