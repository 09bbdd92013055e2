//! Destination queue and the per-entity leg state machine.
//!
//! Every animated entity owns a [`Motion`]: a FIFO of pending
//! [`Destination`]s and at most one in-flight destination. An in-flight
//! destination is played as a fixed sequence of legs:
//!
//! ```text
//! Delay (if delay_ms > 0) → Horizontal → Vertical → FadeOut (if disappearing) → Arrived
//! ```
//!
//! `Motion` only tracks positions and leg order. It never touches the clock
//! or the draw buffer; the animator turns each [`LegStart`] into draw
//! commands and a scheduled wake, and calls [`Motion::finish_leg`] when the
//! wake fires. Wakes carry the generation they were scheduled under, and
//! [`Motion::cancel`] bumps the generation so that every outstanding wake for
//! the cancelled destination is ignored.

#[cfg(test)]
#[path = "motion_test.rs"]
mod motion_test;

use std::collections::VecDeque;

use crate::consts::{DEFAULT_MOVE_SPEED, MS_PER_DISTANCE_UNIT};
use crate::geom::Point;
use crate::render::{Clip, NodeId};

/// A scene entity whose center a destination can target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerRef {
    Config(String),
    Queue(String),
    Instance(String),
    Match(String),
}

/// Where a destination goes. Containers are resolved when the destination
/// begins, not when it is queued.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Point(Point),
    Container(ContainerRef),
}

/// Action applied by the scene when a destination arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arrival {
    /// Add the arriving player to the match.
    JoinMatch { match_id: String },
    /// Tear down the arriving match and remove its players.
    HandOff,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    pub target: Target,
    pub delay_ms: u64,
    pub disappear_after: bool,
    pub on_arrive: Option<Arrival>,
}

impl Destination {
    #[must_use]
    pub fn to(target: Target) -> Self {
        Self { target, delay_ms: 0, disappear_after: false, on_arrive: None }
    }

    #[must_use]
    pub fn point(at: Point) -> Self {
        Self::to(Target::Point(at))
    }

    #[must_use]
    pub fn container(container: ContainerRef) -> Self {
        Self::to(Target::Container(container))
    }

    #[must_use]
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Fade the entity out after it arrives.
    #[must_use]
    pub fn disappearing(mut self) -> Self {
        self.disappear_after = true;
        self
    }

    #[must_use]
    pub fn on_arrive(mut self, arrival: Arrival) -> Self {
        self.on_arrive = Some(arrival);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    Delay,
    Horizontal,
    Vertical,
    FadeOut,
}

/// Instructions for the leg that just started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegStart {
    pub leg: Leg,
    /// Position at the end of the leg.
    pub to: Point,
    pub duration_ms: u64,
    /// Directional clip; `None` when the leg does not move.
    pub clip: Option<Clip>,
}

/// Result of finishing a leg.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Leg(LegStart),
    Arrived(Option<Arrival>),
}

/// Speed settings shared by every entity in a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub move_speed: f64,
    pub fade_ms: u64,
}

/// Duration of a move along one axis.
///
/// `floor(|distance| * 12 / speed)`; a non-positive speed uses the default.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn axis_duration_ms(distance: f64, move_speed: f64) -> u64 {
    let speed = if move_speed > 0.0 { move_speed } else { DEFAULT_MOVE_SPEED };
    (distance.abs() * MS_PER_DISTANCE_UNIT / speed).floor() as u64
}

#[derive(Debug, Clone)]
struct InFlight {
    leg: Leg,
    resolved: Point,
    disappear_after: bool,
    on_arrive: Option<Arrival>,
    from: Point,
    to: Point,
    started_ms: u64,
    duration_ms: u64,
}

#[derive(Debug, Clone)]
pub struct Motion {
    position: Point,
    initial: Point,
    queue: VecDeque<Destination>,
    in_flight: Option<InFlight>,
    generation: u64,
    visible: bool,
}

impl Motion {
    /// An idle motion resting at `at`, which is also its initial position.
    #[must_use]
    pub fn new(at: Point) -> Self {
        Self { position: at, initial: at, queue: VecDeque::new(), in_flight: None, generation: 0, visible: true }
    }

    /// Position at the start of the current leg, or the resting position.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Interpolated position at `now_ms`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn position_at(&self, now_ms: u64) -> Point {
        match &self.in_flight {
            Some(f) if f.duration_ms > 0 => {
                let t = now_ms.saturating_sub(f.started_ms) as f64 / f.duration_ms as f64;
                f.from.lerp(f.to, t)
            }
            _ => self.position,
        }
    }

    /// Position the entity was created at; `reset` returns here.
    #[must_use]
    pub fn initial(&self) -> Point {
        self.initial
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The leg currently playing, if any.
    #[must_use]
    pub fn current_leg(&self) -> Option<Leg> {
        self.in_flight.as_ref().map(|f| f.leg)
    }

    /// Number of destinations waiting behind the in-flight one.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn enqueue(&mut self, destination: Destination) {
        self.queue.push_back(destination);
    }

    pub fn take_next(&mut self) -> Option<Destination> {
        self.queue.pop_front()
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    /// Raise the generation to at least `floor`, so wakes issued below it
    /// never match this motion.
    pub fn rebase(&mut self, floor: u64) {
        self.generation = self.generation.max(floor);
    }

    /// Teleport without animating. Cancels nothing.
    pub fn set_position(&mut self, at: Point) {
        self.position = at;
    }

    /// Stop the in-flight destination where it is and invalidate its wakes.
    ///
    /// Returns whether a destination was in flight. The queue is untouched.
    pub fn cancel(&mut self, now_ms: u64) -> bool {
        let was_animating = self.in_flight.is_some();
        if was_animating {
            self.position = self.position_at(now_ms);
            self.in_flight = None;
        }
        self.generation += 1;
        was_animating
    }

    /// Start playing `destination`, already resolved to `resolved`.
    ///
    /// Any in-flight destination must have been cancelled or finished first;
    /// a leftover one is replaced.
    pub fn begin(&mut self, destination: Destination, resolved: Point, now_ms: u64, timing: Timing) -> LegStart {
        self.visible = true;
        let first = if destination.delay_ms > 0 { Leg::Delay } else { Leg::Horizontal };
        self.in_flight = Some(InFlight {
            leg: first,
            resolved,
            disappear_after: destination.disappear_after,
            on_arrive: destination.on_arrive,
            from: self.position,
            to: self.position,
            started_ms: now_ms,
            duration_ms: destination.delay_ms,
        });
        self.start_leg(first, now_ms, timing)
    }

    /// Complete the current leg at `now_ms` and move to the next one.
    ///
    /// Returns `None` when nothing is in flight.
    pub fn finish_leg(&mut self, now_ms: u64, timing: Timing) -> Option<Step> {
        let (leg, to, disappear_after) = self.in_flight.as_ref().map(|f| (f.leg, f.to, f.disappear_after))?;
        self.position = to;
        let next = match leg {
            Leg::Delay => Some(Leg::Horizontal),
            Leg::Horizontal => Some(Leg::Vertical),
            Leg::Vertical if disappear_after => Some(Leg::FadeOut),
            Leg::Vertical | Leg::FadeOut => None,
        };

        match next {
            Some(next) => Some(Step::Leg(self.start_leg(next, now_ms, timing))),
            None => {
                if leg == Leg::FadeOut {
                    self.visible = false;
                }
                let arrival = self.in_flight.take().and_then(|f| f.on_arrive);
                Some(Step::Arrived(arrival))
            }
        }
    }

    fn start_leg(&mut self, leg: Leg, now_ms: u64, timing: Timing) -> LegStart {
        let from = self.position;
        let Some(flight) = self.in_flight.as_mut() else {
            return LegStart { leg, to: from, duration_ms: 0, clip: None };
        };
        let (to, duration_ms, clip) = match leg {
            Leg::Delay => (from, flight.duration_ms, None),
            Leg::Horizontal => {
                let dx = flight.resolved.x - from.x;
                (Point::new(flight.resolved.x, from.y), axis_duration_ms(dx, timing.move_speed), Clip::horizontal(dx))
            }
            Leg::Vertical => {
                let dy = flight.resolved.y - from.y;
                (Point::new(from.x, flight.resolved.y), axis_duration_ms(dy, timing.move_speed), Clip::vertical(dy))
            }
            Leg::FadeOut => (from, timing.fade_ms, None),
        };
        flight.leg = leg;
        flight.from = from;
        flight.to = to;
        flight.started_ms = now_ms;
        flight.duration_ms = duration_ms;
        LegStart { leg, to, duration_ms, clip }
    }
}

/// An entity driven by a [`Motion`].
pub trait Animatable {
    /// Entity kind used in logs and duplicate-id errors.
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn node(&self) -> NodeId;
    fn motion(&self) -> &Motion;
    fn motion_mut(&mut self) -> &mut Motion;
}
