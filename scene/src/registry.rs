//! Id-keyed registries of animated entities.
//!
//! Lookups never create. Removal cancels the entity's motion before the
//! entry is dropped, so any wake already scheduled for it is stale by the
//! time the scheduler sees it. The registry remembers the highest generation
//! it has retired and starts every new entity above it, so an id reused after
//! removal never inherits the old entity's wakes.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::BTreeMap;

use crate::error::SceneError;
use crate::matches::Match;
use crate::motion::Animatable;
use crate::player::Player;
use crate::render::DrawCommand;

pub type Players = Registry<Player>;
pub type Matches = Registry<Match>;

#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: BTreeMap<String, T>,
    retired_generation: u64,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self { entries: BTreeMap::new(), retired_generation: 0 }
    }
}

impl<T: Animatable> Registry<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity and spawn its node.
    ///
    /// # Errors
    ///
    /// [`SceneError::DuplicateEntity`] if the id is taken; the registry is
    /// unchanged.
    pub fn add(&mut self, mut entity: T, commands: &mut Vec<DrawCommand>) -> Result<(), SceneError> {
        if self.entries.contains_key(entity.id()) {
            return Err(SceneError::DuplicateEntity { kind: T::KIND, id: entity.id().to_owned() });
        }
        entity.motion_mut().rebase(self.retired_generation);
        commands.push(DrawCommand::Spawn { node: entity.node(), at: entity.motion().position(), parent: None });
        self.entries.insert(entity.id().to_owned(), entity);
        Ok(())
    }

    /// Cancel, destroy and drop an entity.
    pub fn remove(&mut self, id: &str, now_ms: u64, commands: &mut Vec<DrawCommand>) -> Option<T> {
        let mut entity = self.entries.remove(id)?;
        entity.motion_mut().cancel(now_ms);
        entity.motion_mut().clear_queue();
        self.retired_generation = self.retired_generation.max(entity.motion().generation());
        let node = entity.node();
        commands.push(DrawCommand::StopTweens { node: node.clone() });
        commands.push(DrawCommand::Destroy { node });
        tracing::debug!(kind = T::KIND, %id, "entity removed");
        Some(entity)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.entries.get_mut(id)
    }

    /// Every entity, ordered by id.
    pub fn get_all(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
