//! Match entity: a group of players moving as one grid.

#[cfg(test)]
#[path = "matches_test.rs"]
mod matches_test;

use serde::Serialize;

use crate::consts::PLAYER_CELL;
use crate::geom::Point;
use crate::layout::grid_offsets;
use crate::motion::{Animatable, Motion};
use crate::render::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchState {
    /// Fewer members than expected; the destination queue is held.
    Forming,
    Full,
    /// Travelling to its queue and hosting instance.
    Placing,
}

#[derive(Debug, Clone)]
pub struct Match {
    pub id: String,
    pub state: MatchState,
    /// Member count at which the match starts moving.
    pub expected: usize,
    /// Matchmaking configuration the match was formed in.
    pub origin_config: Option<String>,
    members: Vec<String>,
    motion: Motion,
}

impl Match {
    #[must_use]
    pub fn new(id: impl Into<String>, at: Point, expected: usize, origin_config: Option<String>) -> Self {
        Self {
            id: id.into(),
            state: MatchState::Forming,
            expected,
            origin_config,
            members: Vec::new(),
            motion: Motion::new(at),
        }
    }

    /// Member player ids in join order.
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    #[must_use]
    pub fn is_member(&self, player_id: &str) -> bool {
        self.members.iter().any(|m| m == player_id)
    }

    /// Add a member. Returns false if already a member.
    pub fn add_member(&mut self, player_id: &str) -> bool {
        if self.is_member(player_id) {
            return false;
        }
        self.members.push(player_id.to_owned());
        true
    }

    /// Remove a member. Returns false if not a member.
    pub fn remove_member(&mut self, player_id: &str) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m != player_id);
        self.members.len() != before
    }

    /// Take every member out of the match.
    pub fn take_members(&mut self) -> Vec<String> {
        std::mem::take(&mut self.members)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.members.len() >= self.expected
    }

    /// Member offsets from the match position, one per member in join order.
    #[must_use]
    pub fn member_offsets(&self) -> Vec<Point> {
        grid_offsets(self.members.len(), PLAYER_CELL)
    }
}

impl Animatable for Match {
    const KIND: &'static str = "match";

    fn id(&self) -> &str {
        &self.id
    }

    fn node(&self) -> NodeId {
        NodeId::Match(self.id.clone())
    }

    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }
}
