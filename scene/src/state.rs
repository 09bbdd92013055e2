//! The scene's single owner of mutable state.
//!
//! Every handler receives `&mut SceneState`; nothing in the scene is global.
//! Movement sequencing lives in `animator`, snapshot reconciliation here.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use serde_json::Value;
use wire::{Reassembler, State};

use crate::clock::Clock;
use crate::config::SceneConfig;
use crate::fleet::Fleets;
use crate::geom::{Point, Rect};
use crate::layout::jitter_within;
use crate::matches::{Match, MatchState};
use crate::mm_config::MatchmakingConfigs;
use crate::motion::{Animatable, Timing};
use crate::player::{Player, PlayerState};
use crate::queue::GameSessionQueues;
use crate::reconcile::{HasBounds, ReconcileReport};
use crate::registry::{Matches, Players};
use crate::render::DrawCommand;

/// Scene bands, derived from the scene size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Regions {
    /// Column on the left where new players appear.
    pub spawn: Rect,
    pub configs: Rect,
    pub queues: Rect,
    pub fleets: Rect,
}

impl Regions {
    #[must_use]
    pub fn for_size(width: f64, height: f64) -> Self {
        let band_width = (width - 220.0).max(0.0);
        Self {
            spawn: Rect::new(20.0, 80.0, 140.0, (height - 160.0).max(0.0)),
            configs: Rect::new(200.0, 40.0, band_width, 200.0),
            queues: Rect::new(200.0, 320.0, band_width, 140.0),
            fleets: Rect::new(200.0, 540.0, band_width, (height - 560.0).max(0.0)),
        }
    }
}

pub struct SceneState {
    pub(crate) config: SceneConfig,
    pub(crate) regions: Regions,
    pub(crate) players: Players,
    pub(crate) matches: Matches,
    pub(crate) fleets: Fleets,
    pub(crate) queues: GameSessionQueues,
    pub(crate) configs: MatchmakingConfigs,
    pub(crate) clock: Clock,
    pub(crate) reassembler: Reassembler,
    pub(crate) snapshot: Option<State>,
    pub(crate) rng: StdRng,
    pub(crate) commands: Vec<DrawCommand>,
    pub(crate) outbound: Vec<Value>,
}

impl SceneState {
    #[must_use]
    pub fn new(config: SceneConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            regions: Regions::for_size(config.width, config.height),
            players: Players::new(),
            matches: Matches::new(),
            fleets: Fleets::new(),
            queues: GameSessionQueues::new(),
            configs: MatchmakingConfigs::new(),
            clock: Clock::new(),
            reassembler: Reassembler::new(config.multipart_ttl_ms),
            snapshot: None,
            rng,
            commands: Vec::new(),
            outbound: Vec::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    #[must_use]
    pub fn regions(&self) -> &Regions {
        &self.regions
    }

    #[must_use]
    pub fn players(&self) -> &Players {
        &self.players
    }

    #[must_use]
    pub fn matches(&self) -> &Matches {
        &self.matches
    }

    #[must_use]
    pub fn fleets(&self) -> &Fleets {
        &self.fleets
    }

    #[must_use]
    pub fn queues(&self) -> &GameSessionQueues {
        &self.queues
    }

    #[must_use]
    pub fn configs(&self) -> &MatchmakingConfigs {
        &self.configs
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// The most recent snapshot, kept for alias resolution.
    #[must_use]
    pub fn snapshot(&self) -> Option<&State> {
        self.snapshot.as_ref()
    }

    /// Draw commands issued since the last drain.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub(crate) fn timing(&self) -> Timing {
        Timing { move_speed: self.config.move_speed, fade_ms: self.config.fade_ms }
    }

    /// Reconcile every container collection against a full snapshot.
    pub fn apply_snapshot(&mut self, state: State) -> ReconcileReport {
        let mut report =
            self.configs
                .update(&state.matchmaking_configurations, self.regions.configs, &mut self.commands);
        report.merge(self.queues.update(&state, self.regions.queues, &mut self.commands));
        report.merge(self.fleets.update(&state.fleets, self.regions.fleets, &mut self.commands));
        tracing::debug!(
            added = report.added.len(),
            removed = report.removed.len(),
            updated = report.updated,
            "snapshot reconciled"
        );
        self.snapshot = Some(state);
        report
    }

    /// Register a player in the spawn column unless it already exists.
    pub fn ensure_player(&mut self, player_id: &str) {
        if self.players.contains(player_id) {
            return;
        }
        let at = jitter_within(self.regions.spawn, 1.0, &mut self.rng);
        if let Err(error) = self.players.add(Player::new(player_id, at), &mut self.commands) {
            tracing::warn!(%player_id, %error, "failed to add player");
        }
    }

    /// Register a forming match. Returns false if the id is taken.
    pub fn create_match(&mut self, match_id: &str, at: Point, expected: usize, origin_config: Option<String>) -> bool {
        match self.matches.add(Match::new(match_id, at, expected, origin_config), &mut self.commands) {
            Ok(()) => {
                tracing::debug!(%match_id, expected, "match created");
                true
            }
            Err(error) => {
                tracing::debug!(%match_id, %error, "match not created");
                false
            }
        }
    }

    /// Center of a matchmaking configuration's box, by name or ARN.
    #[must_use]
    pub fn config_center(&self, ident: &str) -> Option<Point> {
        self.configs.get_by_name_or_arn(ident).map(|c| c.bounds().center())
    }

    /// No entity has a destination in flight.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !self.players.get_all().any(|p| p.motion().is_animating())
            && !self.matches.get_all().any(|m| m.motion().is_animating())
    }

    /// Serializable view of the scene.
    #[must_use]
    pub fn summary(&self) -> SceneSummary {
        let now = self.clock.now_ms();
        SceneSummary {
            now_ms: now,
            players: self
                .players
                .get_all()
                .map(|p| PlayerSummary {
                    id: p.id.clone(),
                    state: p.state,
                    position: p.motion().position_at(now),
                    match_id: p.match_id.clone(),
                    active_ticket: p.active_ticket.clone(),
                    queued: p.motion().queued(),
                    animating: p.motion().is_animating(),
                })
                .collect(),
            matches: self
                .matches
                .get_all()
                .map(|m| MatchSummary {
                    id: m.id.clone(),
                    state: m.state,
                    position: m.motion().position_at(now),
                    members: m.members().to_vec(),
                    expected: m.expected,
                    queued: m.motion().queued(),
                })
                .collect(),
            fleets: self
                .fleets
                .iter()
                .map(|f| FleetSummary {
                    id: f.id().to_owned(),
                    status: f.record.status.clone(),
                    instances: f.instances().map(|i| i.record.instance_id.clone()).collect(),
                    game_sessions: f.sessions().map(|s| s.record.game_session_id.clone()).collect(),
                })
                .collect(),
            queues: self.queues.iter().map(|q| q.name().to_owned()).collect(),
            configs: self.configs.iter().map(|c| c.name().to_owned()).collect(),
            pending_multipart: self.reassembler.pending_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSummary {
    pub now_ms: u64,
    pub players: Vec<PlayerSummary>,
    pub matches: Vec<MatchSummary>,
    pub fleets: Vec<FleetSummary>,
    pub queues: Vec<String>,
    pub configs: Vec<String>,
    pub pending_multipart: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub id: String,
    pub state: PlayerState,
    pub position: Point,
    pub match_id: Option<String>,
    pub active_ticket: Option<String>,
    pub queued: usize,
    pub animating: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub id: String,
    pub state: MatchState,
    pub position: Point,
    pub members: Vec<String>,
    pub expected: usize,
    pub queued: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetSummary {
    pub id: String,
    pub status: Option<String>,
    pub instances: Vec<String>,
    pub game_sessions: Vec<String>,
}
