//! Matchmaking configuration containers.

#[cfg(test)]
#[path = "mm_config_test.rs"]
mod mm_config_test;

use std::collections::BTreeMap;

use wire::state::MatchmakingConfiguration;

use crate::consts::{CONTAINER_PADDING, SINGLE_CONTAINER_WIDTH};
use crate::geom::{Point, Rect};
use crate::layout::row;
use crate::reconcile::{HasBounds, ReconcileReport, Reconciled, identifies, reconcile};
use crate::render::{DrawCommand, NodeId};

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigBox {
    pub record: MatchmakingConfiguration,
    bounds: Rect,
    label: String,
}

impl ConfigBox {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.record.name
    }

    #[must_use]
    pub fn is_named(&self, ident: &str) -> bool {
        identifies(&self.record.name, self.record.configuration_arn.as_deref(), ident)
    }
}

impl HasBounds for ConfigBox {
    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Reconciled for ConfigBox {
    type Record = MatchmakingConfiguration;

    fn create(record: &MatchmakingConfiguration, anchor: Point) -> Self {
        Self { record: record.clone(), bounds: Rect::around(anchor, 0.0), label: String::new() }
    }

    fn node(&self) -> NodeId {
        NodeId::Config(self.record.name.clone())
    }

    fn apply(&mut self, record: &MatchmakingConfiguration, commands: &mut Vec<DrawCommand>) {
        self.record = record.clone();
        let text = match &record.flex_match_mode {
            Some(mode) => format!("{} ({mode})", record.name),
            None => record.name.clone(),
        };
        if self.label != text {
            commands.push(DrawCommand::Label { node: self.node(), text: text.clone() });
            self.label = text;
        }
    }

    fn set_bounds(&mut self, bounds: Rect, commands: &mut Vec<DrawCommand>) {
        if self.bounds != bounds {
            self.bounds = bounds;
            commands.push(DrawCommand::Resize { node: self.node(), bounds });
        }
    }
}

/// Every matchmaking configuration in the current snapshot, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MatchmakingConfigs {
    configs: BTreeMap<String, ConfigBox>,
}

impl MatchmakingConfigs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(
        &mut self,
        records: &[MatchmakingConfiguration],
        region: Rect,
        commands: &mut Vec<DrawCommand>,
    ) -> ReconcileReport {
        let report = reconcile(&mut self.configs, records, region.center(), None, commands);
        let slots = row(region, self.configs.len(), CONTAINER_PADDING, SINGLE_CONTAINER_WIDTH);
        for (config, slot) in self.configs.values_mut().zip(slots) {
            config.set_bounds(slot, commands);
        }
        report
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ConfigBox> {
        self.configs.get(name)
    }

    /// A configuration by name, ARN, or ARN suffix.
    #[must_use]
    pub fn get_by_name_or_arn(&self, ident: &str) -> Option<&ConfigBox> {
        self.configs.get(ident).or_else(|| self.configs.values().find(|c| c.is_named(ident)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigBox> {
        self.configs.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}
