//! Scene core for the fleet and matchmaking console.
//!
//! This crate keeps an animated 2D scene in step with a game-hosting back
//! end. It reconciles full state snapshots against the rendered containers
//! (fleets, instances, game sessions, queues, matchmaking configurations),
//! reacts to matchmaking and queue placement events by walking players and
//! matches between those containers, and reassembles fragmented messages.
//! It never draws: visible changes come out as [`render::DrawCommand`]s that
//! the host forwards to its sprite and tween engine.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | [`Scene`]: message ingestion, clock ticks, command drains |
//! | [`state`] | [`SceneState`], the single owner of scene data |
//! | [`bus`] | Synchronous publish/subscribe with per-subscriber isolation |
//! | [`animator`] | Destination sequencing, match membership, hand-off |
//! | [`motion`] | Destination queue and leg state machine |
//! | [`clock`] | Simulated time and the wake heap |
//! | [`registry`] | Player and match registries |
//! | [`player`] / [`matches`] | Animated entities |
//! | [`reconcile`] | Snapshot diffing shared by every container |
//! | [`fleet`] / [`queue`] / [`mm_config`] | Container collections |
//! | [`flexmatch`] / [`placement`] | Domain event handlers |
//! | [`layout`] / [`geom`] | Row and grid layout, points and rectangles |
//! | [`render`] | Draw commands and node ids |
//! | [`config`] / [`consts`] | Tuning from the environment, shared constants |

pub mod animator;
pub mod bus;
pub mod clock;
pub mod config;
pub mod consts;
pub mod controller;
pub mod error;
pub mod flexmatch;
pub mod fleet;
pub mod geom;
pub mod layout;
pub mod matches;
pub mod mm_config;
pub mod motion;
pub mod placement;
pub mod player;
pub mod queue;
pub mod reconcile;
pub mod registry;
pub mod render;
pub mod state;

pub use config::SceneConfig;
pub use controller::{PollHandle, Scene};
pub use error::SceneError;
pub use render::{DrawCommand, NodeId};
pub use state::{SceneState, SceneSummary};

#[cfg(test)]
#[path = "support_test.rs"]
mod support;
