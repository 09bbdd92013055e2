//! Snapshot reconciliation shared by every container collection.
//!
//! [`reconcile`] diffs one tracked child map against the authoritative record
//! list of a snapshot:
//!
//! 1. tracked children that are absent, or whose record is terminated, are
//!    destroyed (termination wins over presence);
//! 2. present, live, untracked records get a new child at the parent's anchor;
//! 3. every tracked child's record is overwritten with the incoming one.
//!
//! Layout is left to the caller, since each collection lays out differently.
//! Terminated records are never created, which keeps the pass idempotent.

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod reconcile_test;

use std::collections::{BTreeMap, BTreeSet};

use wire::state::{FleetData, GameSession, GameSessionQueue, Instance, MatchmakingConfiguration, TERMINATED};

use crate::geom::{Point, Rect};
use crate::render::{DrawCommand, NodeId};

/// A server record with a stable key and an optional lifecycle status.
pub trait Record {
    fn key(&self) -> &str;

    fn status(&self) -> Option<&str> {
        None
    }

    fn is_terminated(&self) -> bool {
        self.status() == Some(TERMINATED)
    }
}

impl Record for FleetData {
    fn key(&self) -> &str {
        &self.fleet_id
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

impl Record for Instance {
    fn key(&self) -> &str {
        &self.instance_id
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

impl Record for GameSession {
    fn key(&self) -> &str {
        &self.game_session_id
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

impl Record for MatchmakingConfiguration {
    fn key(&self) -> &str {
        &self.name
    }
}

impl Record for GameSessionQueue {
    fn key(&self) -> &str {
        &self.name
    }
}

/// A scene node occupying a rectangle.
pub trait HasBounds {
    fn bounds(&self) -> Rect;
}

/// A container child kept in sync with a server record.
pub trait Reconciled: HasBounds + Sized {
    type Record: Record;

    /// A new child for `record`, placed at `anchor` until the next layout.
    fn create(record: &Self::Record, anchor: Point) -> Self;

    fn node(&self) -> NodeId;

    /// Overwrite the child's record.
    fn apply(&mut self, record: &Self::Record, commands: &mut Vec<DrawCommand>);

    /// Move the child; emits a resize only when the bounds change.
    fn set_bounds(&mut self, bounds: Rect, commands: &mut Vec<DrawCommand>);

    fn destroy(self, commands: &mut Vec<DrawCommand>) {
        commands.push(DrawCommand::Destroy { node: self.node() });
    }
}

/// What one reconciliation pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub updated: usize,
}

impl ReconcileReport {
    pub fn merge(&mut self, other: ReconcileReport) {
        self.added.extend(other.added);
        self.removed.extend(other.removed);
        self.updated += other.updated;
    }

    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Reconcile `children` against `records`. Later duplicates of a key win.
pub fn reconcile<C: Reconciled>(
    children: &mut BTreeMap<String, C>,
    records: &[C::Record],
    anchor: Point,
    parent: Option<&NodeId>,
    commands: &mut Vec<DrawCommand>,
) -> ReconcileReport {
    let mut latest: BTreeMap<&str, &C::Record> = BTreeMap::new();
    for record in records {
        latest.insert(record.key(), record);
    }
    let live: BTreeSet<&str> = latest
        .iter()
        .filter(|(_, record)| !record.is_terminated())
        .map(|(key, _)| *key)
        .collect();

    let mut report = ReconcileReport::default();

    let stale: Vec<String> = children.keys().filter(|k| !live.contains(k.as_str())).cloned().collect();
    for key in stale {
        if let Some(child) = children.remove(&key) {
            child.destroy(commands);
            report.removed.push(key);
        }
    }

    for key in &live {
        let Some(record) = latest.get(key) else {
            continue;
        };
        if let Some(child) = children.get_mut(*key) {
            child.apply(record, commands);
            report.updated += 1;
        } else {
            let mut child = C::create(record, anchor);
            commands.push(DrawCommand::Spawn { node: child.node(), at: anchor, parent: parent.cloned() });
            child.apply(record, commands);
            children.insert((*key).to_owned(), child);
            report.added.push((*key).to_owned());
        }
    }

    report
}

/// Whether `ident` names a record by its name, its ARN, or the ARN's
/// trailing `/name` segment.
#[must_use]
pub fn identifies(name: &str, arn: Option<&str>, ident: &str) -> bool {
    ident == name || arn == Some(ident) || ident.rsplit_once('/').is_some_and(|(_, tail)| tail == name)
}
