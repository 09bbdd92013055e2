//! Fleet containers with their instances and game sessions.
//!
//! Each fleet occupies one slot of the fleets band. Its instances are laid
//! out in a row under the fleet's title; a game session is drawn inside the
//! instance whose IP address it shares, and sessions without a matching
//! instance go to a strip along the bottom of the fleet.

#[cfg(test)]
#[path = "fleet_test.rs"]
mod fleet_test;

use std::collections::BTreeMap;

use wire::state::{FleetData, GameSession, Instance};

use crate::consts::{
    CONTAINER_PADDING, GAME_SESSION_PADDING, HEADER_HEIGHT, INSTANCE_PADDING, SINGLE_CONTAINER_WIDTH,
    SINGLE_GAME_SESSION_WIDTH, SINGLE_INSTANCE_WIDTH,
};
use crate::geom::{Point, Rect};
use crate::layout::row;
use crate::reconcile::{HasBounds, ReconcileReport, Reconciled, reconcile};
use crate::render::{DrawCommand, NodeId};

/// Share of a fleet's inner height given to instances when orphan sessions exist.
const INSTANCE_SHARE: f64 = 0.7;

fn resize(node: NodeId, current: &mut Rect, bounds: Rect, commands: &mut Vec<DrawCommand>) {
    if *current != bounds {
        *current = bounds;
        commands.push(DrawCommand::Resize { node, bounds });
    }
}

fn relabel(node: NodeId, old: &str, new: String, commands: &mut Vec<DrawCommand>) -> String {
    if old != new {
        commands.push(DrawCommand::Label { node, text: new.clone() });
    }
    new
}

// =============================================================
// Instance
// =============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct InstanceBox {
    pub record: Instance,
    bounds: Rect,
    label: String,
}

impl HasBounds for InstanceBox {
    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Reconciled for InstanceBox {
    type Record = Instance;

    fn create(record: &Instance, anchor: Point) -> Self {
        Self { record: record.clone(), bounds: Rect::around(anchor, 0.0), label: String::new() }
    }

    fn node(&self) -> NodeId {
        NodeId::Instance(self.record.instance_id.clone())
    }

    fn apply(&mut self, record: &Instance, commands: &mut Vec<DrawCommand>) {
        self.record = record.clone();
        let text = match &record.status {
            Some(status) => format!("{} [{status}]", record.instance_id),
            None => record.instance_id.clone(),
        };
        self.label = relabel(self.node(), &self.label, text, commands);
    }

    fn set_bounds(&mut self, bounds: Rect, commands: &mut Vec<DrawCommand>) {
        let node = self.node();
        resize(node, &mut self.bounds, bounds, commands);
    }
}

// =============================================================
// Game session
// =============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SessionBox {
    pub record: GameSession,
    bounds: Rect,
    label: String,
}

impl HasBounds for SessionBox {
    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Reconciled for SessionBox {
    type Record = GameSession;

    fn create(record: &GameSession, anchor: Point) -> Self {
        Self { record: record.clone(), bounds: Rect::around(anchor, 0.0), label: String::new() }
    }

    fn node(&self) -> NodeId {
        NodeId::GameSession(self.record.game_session_id.clone())
    }

    fn apply(&mut self, record: &GameSession, commands: &mut Vec<DrawCommand>) {
        self.record = record.clone();
        let text = format!("{}/{}", record.current_player_session_count, record.maximum_player_session_count);
        self.label = relabel(self.node(), &self.label, text, commands);
    }

    fn set_bounds(&mut self, bounds: Rect, commands: &mut Vec<DrawCommand>) {
        let node = self.node();
        resize(node, &mut self.bounds, bounds, commands);
    }
}

// =============================================================
// Fleet
// =============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Fleet {
    pub record: FleetData,
    bounds: Rect,
    label: String,
    instances: BTreeMap<String, InstanceBox>,
    sessions: BTreeMap<String, SessionBox>,
}

impl Fleet {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.record.fleet_id
    }

    pub fn instances(&self) -> impl Iterator<Item = &InstanceBox> {
        self.instances.values()
    }

    pub fn sessions(&self) -> impl Iterator<Item = &SessionBox> {
        self.sessions.values()
    }

    #[must_use]
    pub fn instance(&self, instance_id: &str) -> Option<&InstanceBox> {
        self.instances.get(instance_id)
    }

    #[must_use]
    pub fn session(&self, session_id: &str) -> Option<&SessionBox> {
        self.sessions.get(session_id)
    }

    /// The instance whose IP address is `ip`.
    #[must_use]
    pub fn instance_by_ip(&self, ip: &str) -> Option<&InstanceBox> {
        self.instances.values().find(|i| i.record.ip_address.as_deref() == Some(ip))
    }

    /// Reconcile instances and game sessions against the fleet's record, then
    /// lay them out inside the fleet.
    pub fn update_children(&mut self, commands: &mut Vec<DrawCommand>) -> ReconcileReport {
        let parent = self.node();
        let anchor = self.bounds.center();
        let mut report = reconcile(&mut self.instances, &self.record.instances, anchor, Some(&parent), commands);
        report.merge(reconcile(&mut self.sessions, &self.record.game_sessions, anchor, Some(&parent), commands));
        self.layout_children(commands);
        report
    }

    fn layout_children(&mut self, commands: &mut Vec<DrawCommand>) {
        let inner = self.bounds.inset(HEADER_HEIGHT, INSTANCE_PADDING);

        let mut hosted: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut orphans: Vec<String> = Vec::new();
        for (id, session) in &self.sessions {
            let host = session.record.ip_address.as_deref().and_then(|ip| self.instance_by_ip(ip));
            match host {
                Some(instance) => hosted.entry(instance.record.instance_id.clone()).or_default().push(id.clone()),
                None => orphans.push(id.clone()),
            }
        }

        let (instance_region, orphan_region) = if orphans.is_empty() {
            (inner, None)
        } else {
            let top = inner.height * INSTANCE_SHARE;
            (
                Rect::new(inner.x, inner.y, inner.width, top),
                Some(Rect::new(inner.x, inner.y + top, inner.width, inner.height - top)),
            )
        };

        let slots = row(instance_region, self.instances.len(), INSTANCE_PADDING, SINGLE_INSTANCE_WIDTH);
        for (instance, slot) in self.instances.values_mut().zip(slots) {
            instance.set_bounds(slot, commands);
        }

        for (instance_id, session_ids) in &hosted {
            let Some(area) = self.instances.get(instance_id).map(|i| i.bounds.inset(HEADER_HEIGHT / 2.0, GAME_SESSION_PADDING))
            else {
                continue;
            };
            self.place_sessions(area, session_ids, commands);
        }
        if let Some(area) = orphan_region {
            self.place_sessions(area, &orphans, commands);
        }
    }

    fn place_sessions(&mut self, area: Rect, session_ids: &[String], commands: &mut Vec<DrawCommand>) {
        let slots = row(area, session_ids.len(), GAME_SESSION_PADDING, SINGLE_GAME_SESSION_WIDTH);
        for (id, slot) in session_ids.iter().zip(slots) {
            if let Some(session) = self.sessions.get_mut(id) {
                session.set_bounds(slot, commands);
            }
        }
    }
}

impl HasBounds for Fleet {
    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Reconciled for Fleet {
    type Record = FleetData;

    fn create(record: &FleetData, anchor: Point) -> Self {
        Self {
            record: record.clone(),
            bounds: Rect::around(anchor, 0.0),
            label: String::new(),
            instances: BTreeMap::new(),
            sessions: BTreeMap::new(),
        }
    }

    fn node(&self) -> NodeId {
        NodeId::Fleet(self.record.fleet_id.clone())
    }

    fn apply(&mut self, record: &FleetData, commands: &mut Vec<DrawCommand>) {
        self.record = record.clone();
        let name = record.name.as_deref().unwrap_or(&record.fleet_id);
        let mut text = name.to_owned();
        if let Some(status) = &record.status {
            text.push_str(&format!(" [{status}]"));
        }
        if let Some(capacity) = &record.fleet_capacity {
            let counts = capacity.instance_counts;
            text.push_str(&format!(" {}/{}", counts.active, counts.desired));
        }
        self.label = relabel(self.node(), &self.label, text, commands);
    }

    fn set_bounds(&mut self, bounds: Rect, commands: &mut Vec<DrawCommand>) {
        let node = self.node();
        resize(node, &mut self.bounds, bounds, commands);
    }

    fn destroy(self, commands: &mut Vec<DrawCommand>) {
        let node = self.node();
        for session in self.sessions.into_values() {
            session.destroy(commands);
        }
        for instance in self.instances.into_values() {
            instance.destroy(commands);
        }
        commands.push(DrawCommand::Destroy { node });
    }
}

// =============================================================
// Fleets
// =============================================================

/// Every fleet in the current snapshot, keyed by fleet id.
#[derive(Debug, Clone, Default)]
pub struct Fleets {
    fleets: BTreeMap<String, Fleet>,
}

impl Fleets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile fleets and their children, laying fleets out across `region`.
    pub fn update(&mut self, records: &[FleetData], region: Rect, commands: &mut Vec<DrawCommand>) -> ReconcileReport {
        let mut report = reconcile(&mut self.fleets, records, region.center(), None, commands);

        let slots = row(region, self.fleets.len(), CONTAINER_PADDING, SINGLE_CONTAINER_WIDTH);
        for (fleet, slot) in self.fleets.values_mut().zip(slots) {
            fleet.set_bounds(slot, commands);
            report.merge(fleet.update_children(commands));
        }
        report
    }

    #[must_use]
    pub fn get(&self, fleet_id: &str) -> Option<&Fleet> {
        self.fleets.get(fleet_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fleet> {
        self.fleets.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fleets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fleets.is_empty()
    }

    /// An instance by id, in any fleet.
    #[must_use]
    pub fn instance(&self, instance_id: &str) -> Option<&InstanceBox> {
        self.fleets.values().find_map(|f| f.instance(instance_id))
    }

    /// The instance with IP address `ip`, in any fleet.
    #[must_use]
    pub fn find_instance_by_ip(&self, ip: &str) -> Option<&InstanceBox> {
        self.fleets.values().find_map(|f| f.instance_by_ip(ip))
    }

    /// Total instances across all fleets.
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.fleets.values().map(|f| f.instances.len()).sum()
    }

    /// Total game sessions across all fleets.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.fleets.values().map(|f| f.sessions.len()).sum()
    }
}
