//! Player-list add translation.

use std::sync::Arc;

use causeway_domain::{CreatureKind, Entity, PlayerEntity, Vector3f};
use causeway_protocol::OriginEvent;

use crate::session::Session;
use crate::textures::spawn_resolve_and_apply;

/// Register a newly visible player and kick off its texture
/// resolution. The player-list refresh upstream happens from the apply
/// task once textures are in hand.
pub fn translate(event: &OriginEvent, session: &Arc<Session>) {
    let OriginEvent::PlayerListAdd {
        entity_id,
        profile,
        position,
    } = event
    else {
        return;
    };

    let target_id = session.entities.next_id();
    let entity = Entity::new(
        *entity_id,
        target_id,
        CreatureKind::Player,
        *position,
        Vector3f::ZERO,
        Vector3f::ZERO,
    );
    session.entities.register(entity.clone());

    let player = PlayerEntity::new(entity, profile.clone());
    session.players.insert(profile.id, player.clone());

    spawn_resolve_and_apply(session, player, None);
}
