//! Per-connection session state.
//!
//! One session bridges a single client device to a single backend
//! server: it owns both outbound links, the entity-id bridge, the
//! modal-window registry, the tracked remote players, and a handle on
//! the process-wide texture service.

mod entities;
mod windows;

pub use entities::EntityRegistry;
pub use windows::WindowCache;

use std::sync::{Arc, RwLock};

use dashmap::DashMap;

use causeway_domain::{PlayerEntity, PlayerId};

use crate::link::{OriginLink, TargetLink};
use crate::textures::TextureService;

/// State for one bridged client connection.
pub struct Session {
    /// Entity-id bridge between the two protocols.
    pub entities: EntityRegistry,
    /// Modal-window registry.
    pub windows: WindowCache,
    /// Upstream sink (target protocol, toward the client).
    pub upstream: TargetLink,
    /// Downstream sink (origin protocol, toward the server).
    pub downstream: OriginLink,
    /// Shared texture service, injected at session construction.
    pub textures: Arc<TextureService>,
    /// Remote players visible to this session, keyed by profile id.
    pub players: DashMap<PlayerId, PlayerEntity>,
    /// The connected player's own entity, once known.
    player: RwLock<Option<PlayerEntity>>,
}

impl Session {
    pub fn new(
        upstream: TargetLink,
        downstream: OriginLink,
        textures: Arc<TextureService>,
    ) -> Arc<Self> {
        Arc::new(Self {
            entities: EntityRegistry::new(),
            windows: WindowCache::new(upstream.clone()),
            upstream,
            downstream,
            textures,
            players: DashMap::new(),
            player: RwLock::new(None),
        })
    }

    /// Install the session player's entity.
    pub fn set_player(&self, player: PlayerEntity) {
        let mut slot = self
            .player
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(player);
    }

    /// Snapshot of the session player, if known.
    pub fn player(&self) -> Option<PlayerEntity> {
        self.player
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Mutate the session player in place; returns `None` when no
    /// player is installed yet.
    pub fn with_player_mut<R>(&self, update: impl FnOnce(&mut PlayerEntity) -> R) -> Option<R> {
        let mut slot = self
            .player
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        slot.as_mut().map(update)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use causeway_domain::{
        CreatureKind, Entity, OriginEntityId, PlayerProfile, Vector3f,
    };

    #[test]
    fn player_starts_absent() {
        let session = testing::session();
        assert!(session.player().is_none());
        assert!(session.with_player_mut(|_| ()).is_none());
    }

    #[test]
    fn set_and_mutate_player() {
        let session = testing::session();
        let entity = Entity::new(
            OriginEntityId::new(1),
            session.entities.next_id(),
            CreatureKind::Player,
            Vector3f::ZERO,
            Vector3f::ZERO,
            Vector3f::ZERO,
        );
        session.set_player(PlayerEntity::new(
            entity,
            PlayerProfile::new(PlayerId::new(), "steve"),
        ));

        session.with_player_mut(|player| {
            player.entity.position = Vector3f::new(1.0, 2.0, 3.0);
        });
        let snapshot = session.player().expect("player installed");
        assert_eq!(snapshot.entity.position, Vector3f::new(1.0, 2.0, 3.0));
    }
}
