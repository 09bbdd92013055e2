//! Shared numeric constants for the scene crate.

use crate::geom::Point;

// ── Motion ──────────────────────────────────────────────────────

/// Default move speed; larger is faster.
pub const DEFAULT_MOVE_SPEED: f64 = 3.0;

/// Milliseconds per unit of axis distance at speed 1.
pub const MS_PER_DISTANCE_UNIT: f64 = 12.0;

/// Duration of the fade played by destinations that disappear on arrival.
pub const DEFAULT_FADE_MS: u64 = 400;

/// Share of a container's size used for random arrival jitter.
pub const DEFAULT_JITTER: f64 = 0.35;

/// Where a placed match goes when no hosting instance matches its IP.
pub const OFFSCREEN_FALLBACK: Point = Point { x: -200.0, y: -200.0 };

// ── Layout ──────────────────────────────────────────────────────

pub const DEFAULT_SCENE_WIDTH: f64 = 1600.0;
pub const DEFAULT_SCENE_HEIGHT: f64 = 900.0;

/// Gap subtracted from each container slot in a row.
pub const CONTAINER_PADDING: f64 = 20.0;

/// Width of a container when it is the only one in its row.
pub const SINGLE_CONTAINER_WIDTH: f64 = 320.0;

pub const INSTANCE_PADDING: f64 = 8.0;
pub const SINGLE_INSTANCE_WIDTH: f64 = 96.0;

pub const GAME_SESSION_PADDING: f64 = 4.0;
pub const SINGLE_GAME_SESSION_WIDTH: f64 = 40.0;

/// Height reserved for a container's title label.
pub const HEADER_HEIGHT: f64 = 24.0;

/// Grid pitch of players inside a match.
pub const PLAYER_CELL: f64 = 14.0;

// ── Network ─────────────────────────────────────────────────────

/// How long an incomplete multipart message is kept.
pub const DEFAULT_MULTIPART_TTL_MS: u64 = 30_000;
