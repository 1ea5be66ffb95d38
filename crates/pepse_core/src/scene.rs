//! Scene sink: the only way the generator touches the outside world.
//!
//! The window manager adds every entity it generates and later removes the
//! ones that leave the window. `SceneRegistry` is an in-memory sink ordered
//! by id, which keeps iteration (and therefore eviction) deterministic.

use glam::Vec2;
use std::collections::BTreeMap;

use crate::entity::{Entity, EntityId, EntityTag, Layer};

pub trait SceneSink {
    fn add(&mut self, entity: Entity, layer: Layer);

    fn remove(&mut self, id: EntityId) -> Option<Entity>;

    fn entities(&self) -> Box<dyn Iterator<Item = &Entity> + '_>;
}

#[derive(Debug, Default)]
pub struct SceneRegistry {
    entries: BTreeMap<EntityId, (Entity, Layer)>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entries.get(&id).map(|(entity, _)| entity)
    }

    pub fn layer_of(&self, id: EntityId) -> Option<Layer> {
        self.entries.get(&id).map(|(_, layer)| *layer)
    }

    pub fn count_tag(&self, tag: EntityTag) -> usize {
        self.entries.values().filter(|(e, _)| e.tag == tag).count()
    }

    pub fn with_tag(&self, tag: EntityTag) -> impl Iterator<Item = &Entity> + '_ {
        self.entries
            .values()
            .map(|(entity, _)| entity)
            .filter(move |entity| entity.tag == tag)
    }

    /// Count every eaten fruit's respawn timer down by `dt` seconds.
    /// Returns how many fruits grew back.
    pub fn advance_fruit(&mut self, dt: f32) -> usize {
        let mut respawned = 0;
        for (entity, _) in self.entries.values_mut() {
            if let Some(fruit) = entity.fruit.as_mut() {
                if fruit.advance(dt) {
                    respawned += 1;
                }
            }
        }
        respawned
    }

    /// Eat the first uneaten fruit overlapping `point`.
    pub fn eat_fruit_at(&mut self, point: Vec2, respawn_after: f32) -> Option<EntityId> {
        for (id, (entity, _)) in self.entries.iter_mut() {
            if !entity.contains(point) {
                continue;
            }
            if let Some(fruit) = entity.fruit.as_mut() {
                if fruit.try_consume(respawn_after) {
                    return Some(*id);
                }
            }
        }
        None
    }
}

impl SceneSink for SceneRegistry {
    fn add(&mut self, entity: Entity, layer: Layer) {
        if let Some((previous, _)) = self.entries.insert(entity.id, (entity, layer)) {
            log::warn!("Entity {:?} ({}) replaced on add", previous.id, previous.tag);
        }
    }

    fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.entries.remove(&id).map(|(entity, _)| entity)
    }

    fn entities(&self) -> Box<dyn Iterator<Item = &Entity> + '_> {
        Box::new(self.entries.values().map(|(entity, _)| entity))
    }
}
