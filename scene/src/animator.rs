//! Destination sequencing on top of [`SceneState`].
//!
//! Each entity plays one destination at a time. Beginning a destination
//! resolves its target, then every leg emits draw commands and schedules a
//! `Wake::Leg` on the clock at the leg's end. `advance` pops due wakes in
//! `(due, sequence)` order; a wake for a removed entity, or one scheduled
//! under an older generation, is dropped without effect.
//!
//! Matches hold their queue until full. The player whose `JoinMatch` arrival
//! fills a match releases it, whichever order the players arrive in.

#[cfg(test)]
#[path = "animator_test.rs"]
mod animator_test;

use crate::clock::{TimerId, Wake};
use crate::geom::Point;
use crate::layout::jitter_within;
use crate::matches::{Match, MatchState};
use crate::motion::{Animatable, Arrival, ContainerRef, Destination, Leg, LegStart, Motion, Step, Target};
use crate::player::PlayerState;
use crate::reconcile::HasBounds;
use crate::render::{DrawCommand, NodeId};
use crate::state::SceneState;

impl SceneState {
    fn motion_mut(&mut self, node: &NodeId) -> Option<&mut Motion> {
        match node {
            NodeId::Player(id) => self.players.get_mut(id).map(Animatable::motion_mut),
            NodeId::Match(id) => self.matches.get_mut(id).map(Animatable::motion_mut),
            _ => None,
        }
    }

    /// Queue a destination for a player or match; an idle entity starts it
    /// at once. Returns false for an unknown entity.
    pub fn add_destination(&mut self, node: &NodeId, destination: Destination) -> bool {
        let Some(motion) = self.motion_mut(node) else {
            tracing::debug!(?node, "destination for unknown entity");
            return false;
        };
        motion.enqueue(destination);
        self.start_next(node);
        true
    }

    fn may_start(&self, node: &NodeId) -> bool {
        match node {
            NodeId::Match(id) => self.matches.get(id).is_some_and(Match::is_full),
            _ => true,
        }
    }

    /// Begin the head of the queue if the entity is idle and allowed to move.
    pub(crate) fn start_next(&mut self, node: &NodeId) {
        while self.may_start(node) {
            let Some(motion) = self.motion_mut(node) else {
                return;
            };
            if motion.is_animating() {
                return;
            }
            let Some(destination) = motion.take_next() else {
                return;
            };
            match self.resolve(&destination.target) {
                Some(to) => {
                    self.begin(node, destination, to);
                    return;
                }
                None => tracing::debug!(?node, target = ?destination.target, "skipping destination to missing target"),
            }
        }
    }

    fn resolve(&mut self, target: &Target) -> Option<Point> {
        let container = match target {
            Target::Point(at) => return Some(*at),
            Target::Container(container) => container,
        };
        let bounds = match container {
            ContainerRef::Config(ident) => self.configs.get_by_name_or_arn(ident).map(HasBounds::bounds),
            ContainerRef::Queue(ident) => self.queues.get_by_name_or_arn(ident).map(HasBounds::bounds),
            ContainerRef::Instance(id) => self.fleets.instance(id).map(HasBounds::bounds),
            ContainerRef::Match(id) => {
                let now = self.clock.now_ms();
                return self.matches.get(id).map(|m| m.motion().position_at(now));
            }
        }?;
        Some(jitter_within(bounds, self.config.jitter, &mut self.rng))
    }

    fn begin(&mut self, node: &NodeId, destination: Destination, to: Point) {
        let timing = self.timing();
        let now = self.clock.now_ms();
        let Some(motion) = self.motion_mut(node) else {
            return;
        };
        let start = motion.begin(destination, to, now, timing);
        let generation = motion.generation();
        self.issue_leg(node, generation, start);
    }

    fn issue_leg(&mut self, node: &NodeId, generation: u64, start: LegStart) {
        match start.leg {
            Leg::Delay => {}
            Leg::Horizontal | Leg::Vertical => {
                if let Some(clip) = start.clip {
                    self.commands.push(DrawCommand::PlayClip { node: node.clone(), clip });
                    self.commands.push(DrawCommand::Tween {
                        node: node.clone(),
                        to: start.to,
                        duration_ms: start.duration_ms,
                    });
                }
            }
            Leg::FadeOut => {
                self.commands.push(DrawCommand::FadeOut { node: node.clone(), duration_ms: start.duration_ms });
            }
        }
        let due = self.clock.now_ms() + start.duration_ms;
        self.clock.schedule(due, Wake::Leg { node: node.clone(), generation });
    }

    fn on_leg_complete(&mut self, node: &NodeId, generation: u64) {
        let timing = self.timing();
        let now = self.clock.now_ms();
        let Some(motion) = self.motion_mut(node) else {
            tracing::trace!(?node, "wake for removed entity");
            return;
        };
        if motion.generation() != generation {
            tracing::trace!(?node, generation, "stale wake");
            return;
        }
        let Some(step) = motion.finish_leg(now, timing) else {
            return;
        };
        if let NodeId::Match(match_id) = node {
            self.sync_members(match_id);
        }

        match step {
            Step::Leg(start) => self.issue_leg(node, generation, start),
            Step::Arrived(arrival) => {
                if let Some(arrival) = arrival {
                    self.apply_arrival(node, arrival);
                }
                self.start_next(node);
            }
        }
    }

    fn apply_arrival(&mut self, node: &NodeId, arrival: Arrival) {
        match (arrival, node) {
            (Arrival::JoinMatch { match_id }, NodeId::Player(player_id)) => self.join_match(player_id, &match_id),
            (Arrival::HandOff, NodeId::Match(match_id)) => self.hand_off(match_id),
            (arrival, node) => tracing::debug!(?arrival, ?node, "arrival does not apply to entity"),
        }
    }

    /// Cancel whatever the entity is doing and move it straight to `to`.
    /// Queued destinations resume after it arrives.
    pub fn move_to_coordinates(&mut self, node: &NodeId, to: Point) -> bool {
        let now = self.clock.now_ms();
        let Some(motion) = self.motion_mut(node) else {
            return false;
        };
        if motion.cancel(now) {
            self.commands.push(DrawCommand::StopTweens { node: node.clone() });
        }
        self.begin(node, Destination::point(to), to);
        true
    }

    /// Stop the in-flight destination where it is and drop the queue.
    pub(crate) fn halt(&mut self, node: &NodeId) {
        let now = self.clock.now_ms();
        let Some(motion) = self.motion_mut(node) else {
            return;
        };
        motion.clear_queue();
        if motion.cancel(now) {
            self.commands.push(DrawCommand::StopTweens { node: node.clone() });
        }
    }

    // =============================================================
    // Match membership
    // =============================================================

    /// Add a player to a match. Filling the match releases its queue.
    pub fn join_match(&mut self, player_id: &str, match_id: &str) {
        if !self.matches.contains(match_id) {
            let previous = self.players.get(player_id).and_then(|p| p.match_id.clone());
            if let Some(previous) = previous {
                self.leave_match(player_id, &previous);
            }
            if let Some(player) = self.players.get_mut(player_id) {
                player.state = PlayerState::WaitingForMatch;
                player.match_id = None;
            }
            tracing::debug!(%player_id, %match_id, "match gone before player arrived");
            return;
        }
        let previous = self.players.get(player_id).and_then(|p| p.match_id.clone());
        if let Some(previous) = previous.filter(|p| p != match_id) {
            self.leave_match(player_id, &previous);
        }

        let Some(m) = self.matches.get_mut(match_id) else {
            return;
        };
        let was_full = m.is_full();
        m.add_member(player_id);
        let filled = !was_full && m.is_full();
        if filled && m.state == MatchState::Forming {
            m.state = MatchState::Full;
        }
        let (members, expected) = (m.members().len(), m.expected);

        if let Some(player) = self.players.get_mut(player_id) {
            player.state = PlayerState::InMatch;
            player.match_id = Some(match_id.to_owned());
        }
        self.relayout_match(match_id);
        tracing::debug!(%player_id, %match_id, members, expected, "player joined match");

        if filled {
            tracing::info!(%match_id, members, "match full");
            self.start_next(&NodeId::Match(match_id.to_owned()));
        }
    }

    fn leave_match(&mut self, player_id: &str, match_id: &str) {
        let emptied = match self.matches.get_mut(match_id) {
            Some(m) => {
                m.remove_member(player_id);
                Some(m.members().is_empty())
            }
            None => None,
        };
        self.unparent_player(player_id);
        match emptied {
            Some(true) => {
                let now = self.clock.now_ms();
                self.matches.remove(match_id, now, &mut self.commands);
            }
            Some(false) => self.relayout_match(match_id),
            None => {}
        }
    }

    fn unparent_player(&mut self, player_id: &str) {
        let Some(player) = self.players.get_mut(player_id) else {
            return;
        };
        player.match_id = None;
        player.state = PlayerState::WaitingForMatch;
        let at = player.motion().position();
        self.commands.push(DrawCommand::Reparent { node: player.node(), parent: None, at });
    }

    /// Re-grid members under the match node and sync their positions.
    fn relayout_match(&mut self, match_id: &str) {
        let Some(m) = self.matches.get(match_id) else {
            return;
        };
        let parent = m.node();
        for (member, offset) in m.members().iter().zip(m.member_offsets()) {
            self.commands.push(DrawCommand::Reparent {
                node: NodeId::Player(member.clone()),
                parent: Some(parent.clone()),
                at: offset,
            });
        }
        self.sync_members(match_id);
    }

    fn sync_members(&mut self, match_id: &str) {
        let Some(m) = self.matches.get(match_id) else {
            return;
        };
        let center = m.motion().position();
        let placed: Vec<(String, Point)> = m
            .members()
            .iter()
            .zip(m.member_offsets())
            .map(|(id, offset)| (id.clone(), center.offset(offset)))
            .collect();
        for (id, at) in placed {
            if let Some(player) = self.players.get_mut(&id) {
                player.motion_mut().set_position(at);
            }
        }
    }

    /// Unparent every member and destroy the match. Members are left
    /// `WaitingForMatch`; returns their ids in join order.
    pub fn break_up_match(&mut self, match_id: &str) -> Vec<String> {
        let members = match self.matches.get_mut(match_id) {
            Some(m) => m.take_members(),
            None => return Vec::new(),
        };
        for id in &members {
            self.unparent_player(id);
        }
        let now = self.clock.now_ms();
        self.matches.remove(match_id, now, &mut self.commands);
        tracing::info!(%match_id, members = members.len(), "match broken up");
        members
    }

    /// Final arrival of a placed match: remove its players, then the match.
    fn hand_off(&mut self, match_id: &str) {
        let members = match self.matches.get_mut(match_id) {
            Some(m) => m.take_members(),
            None => return,
        };
        let now = self.clock.now_ms();
        for id in &members {
            self.players.remove(id, now, &mut self.commands);
        }
        self.matches.remove(match_id, now, &mut self.commands);
        tracing::info!(%match_id, players = members.len(), "match handed off");
    }

    /// Detach a player from its match, drop its queue and walk it home.
    pub fn reset_player(&mut self, player_id: &str) -> bool {
        let Some(match_id) = self.players.get(player_id).map(|p| p.match_id.clone()) else {
            return false;
        };
        if let Some(match_id) = match_id {
            self.leave_match(player_id, &match_id);
        }
        let Some(player) = self.players.get_mut(player_id) else {
            return false;
        };
        player.motion_mut().clear_queue();
        player.state = PlayerState::Reset;
        let home = player.motion().initial();
        tracing::debug!(%player_id, "player reset");
        self.move_to_coordinates(&NodeId::Player(player_id.to_owned()), home)
    }

    // =============================================================
    // Time
    // =============================================================

    /// Run the clock forward by `dt_ms`, firing due leg completions and
    /// timers in order. Returns the number of wakes processed.
    pub fn advance(&mut self, dt_ms: u64) -> usize {
        let until = self.clock.now_ms().saturating_add(dt_ms);
        let mut fired = 0;
        while let Some((due, wake)) = self.clock.pop_due(until) {
            self.clock.set_now(due);
            fired += 1;
            match wake {
                Wake::Leg { node, generation } => self.on_leg_complete(&node, generation),
                Wake::Timer { id } => self.fire_timer(id),
            }
        }
        self.clock.set_now(until);

        let evicted = self.reassembler.evict_expired(until);
        if !evicted.is_empty() {
            tracing::debug!(count = evicted.len(), "multipart buffers evicted");
        }
        fired
    }

    fn fire_timer(&mut self, id: TimerId) {
        if let Some(request) = self.clock.fire_timer(id) {
            tracing::trace!(%request, "poll");
            self.outbound.push(wire::request(&request));
        }
    }
}
