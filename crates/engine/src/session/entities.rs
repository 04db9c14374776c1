//! Entity-id bridge.
//!
//! Maps between the server-assigned origin-protocol ids and the
//! bridge-assigned target-protocol ids for one session. Target ids are
//! unique and strictly increasing for the session's lifetime.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use causeway_domain::{Entity, OriginEntityId, TargetEntityId};

/// Bidirectional entity-id mapping owned by one session.
pub struct EntityRegistry {
    next_id: AtomicU64,
    by_origin: DashMap<OriginEntityId, Entity>,
    by_target: DashMap<TargetEntityId, OriginEntityId>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            by_origin: DashMap::new(),
            by_target: DashMap::new(),
        }
    }

    /// Allocate the next target-protocol id. Monotonic and safe under
    /// concurrent callers; the first allocated id is 1.
    pub fn next_id(&self) -> TargetEntityId {
        TargetEntityId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Store both mapping directions for a spawned entity.
    pub fn register(&self, entity: Entity) {
        self.by_target.insert(entity.target_id, entity.origin_id);
        self.by_origin.insert(entity.origin_id, entity);
    }

    /// Look up an entity by its origin-protocol id.
    pub fn lookup_by_origin(&self, id: OriginEntityId) -> Option<Entity> {
        self.by_origin.get(&id).map(|e| e.clone())
    }

    /// Look up an entity by its target-protocol id.
    pub fn lookup_by_target(&self, id: TargetEntityId) -> Option<Entity> {
        let origin_id = *self.by_target.get(&id)?;
        self.lookup_by_origin(origin_id)
    }

    /// Mutate an entity in place; returns false when the id is unmapped.
    pub fn update_by_origin(
        &self,
        id: OriginEntityId,
        update: impl FnOnce(&mut Entity),
    ) -> bool {
        match self.by_origin.get_mut(&id) {
            Some(mut entity) => {
                update(&mut entity);
                true
            }
            None => false,
        }
    }

    /// Remove an entity, clearing both mapping directions.
    pub fn remove_by_origin(&self, id: OriginEntityId) -> Option<Entity> {
        let (_, entity) = self.by_origin.remove(&id)?;
        self.by_target.remove(&entity.target_id);
        Some(entity)
    }

    pub fn len(&self) -> usize {
        self.by_origin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_origin.is_empty()
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
