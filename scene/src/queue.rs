//! Game session queue containers.

#[cfg(test)]
#[path = "queue_test.rs"]
mod queue_test;

use std::collections::BTreeMap;

use wire::state::{GameSessionQueue, State};

use crate::consts::{CONTAINER_PADDING, SINGLE_CONTAINER_WIDTH};
use crate::geom::{Point, Rect};
use crate::layout::row;
use crate::reconcile::{HasBounds, ReconcileReport, Reconciled, identifies, reconcile};
use crate::render::{DrawCommand, NodeId};

#[derive(Debug, Clone, PartialEq)]
pub struct QueueBox {
    pub record: GameSessionQueue,
    /// Fleets the queue's destinations route to, resolved through aliases.
    pub fleet_ids: Vec<String>,
    bounds: Rect,
    label: String,
}

impl QueueBox {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.record.name
    }

    #[must_use]
    pub fn is_named(&self, ident: &str) -> bool {
        identifies(&self.record.name, self.record.game_session_queue_arn.as_deref(), ident)
    }
}

impl HasBounds for QueueBox {
    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Reconciled for QueueBox {
    type Record = GameSessionQueue;

    fn create(record: &GameSessionQueue, anchor: Point) -> Self {
        Self { record: record.clone(), fleet_ids: Vec::new(), bounds: Rect::around(anchor, 0.0), label: String::new() }
    }

    fn node(&self) -> NodeId {
        NodeId::Queue(self.record.name.clone())
    }

    fn apply(&mut self, record: &GameSessionQueue, commands: &mut Vec<DrawCommand>) {
        self.record = record.clone();
        if self.label != record.name {
            self.label.clone_from(&record.name);
            commands.push(DrawCommand::Label { node: self.node(), text: record.name.clone() });
        }
    }

    fn set_bounds(&mut self, bounds: Rect, commands: &mut Vec<DrawCommand>) {
        if self.bounds != bounds {
            self.bounds = bounds;
            commands.push(DrawCommand::Resize { node: self.node(), bounds });
        }
    }
}

/// Every game session queue in the current snapshot, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct GameSessionQueues {
    queues: BTreeMap<String, QueueBox>,
}

impl GameSessionQueues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile queues against `state`, resolve their destination fleets, and
    /// lay them out across `region`.
    pub fn update(&mut self, state: &State, region: Rect, commands: &mut Vec<DrawCommand>) -> ReconcileReport {
        let report = reconcile(&mut self.queues, &state.game_session_queues, region.center(), None, commands);

        let slots = row(region, self.queues.len(), CONTAINER_PADDING, SINGLE_CONTAINER_WIDTH);
        for (queue, slot) in self.queues.values_mut().zip(slots) {
            queue.fleet_ids = queue
                .record
                .destinations
                .iter()
                .filter_map(|d| state.resolve_fleet_id(&d.destination_arn))
                .collect();
            queue.set_bounds(slot, commands);
        }
        report
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&QueueBox> {
        self.queues.get(name)
    }

    /// A queue by name, ARN, or ARN suffix.
    #[must_use]
    pub fn get_by_name_or_arn(&self, ident: &str) -> Option<&QueueBox> {
        self.queues.get(ident).or_else(|| self.queues.values().find(|q| q.is_named(ident)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueueBox> {
        self.queues.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }
}
