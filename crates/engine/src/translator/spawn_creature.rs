//! Creature spawn translation.

use std::sync::Arc;

use causeway_domain::{CreatureKind, Entity};
use causeway_protocol::{OriginCreatureCode, OriginEvent, TargetCommand};

use crate::session::Session;

/// Map an origin-protocol creature code onto the target vocabulary.
/// Codes outside the table have no target counterpart.
fn creature_kind(code: OriginCreatureCode) -> Option<CreatureKind> {
    let kind = match code.0 {
        50 => CreatureKind::Creeper,
        51 => CreatureKind::Skeleton,
        52 => CreatureKind::Spider,
        54 => CreatureKind::Zombie,
        90 => CreatureKind::Pig,
        91 => CreatureKind::Sheep,
        92 => CreatureKind::Cow,
        93 => CreatureKind::Chicken,
        95 => CreatureKind::Wolf,
        120 => CreatureKind::Villager,
        _ => return None,
    };
    Some(kind)
}

/// Register the creature under a fresh target id and spawn it upstream.
/// Unmapped creature codes are logged and dropped.
pub fn translate(event: &OriginEvent, session: &Arc<Session>) {
    let OriginEvent::SpawnCreature {
        entity_id,
        code,
        position,
        motion,
        rotation,
    } = event
    else {
        return;
    };

    let Some(kind) = creature_kind(*code) else {
        tracing::warn!(code = code.0, entity = %entity_id, "Unmapped creature code, dropping spawn");
        return;
    };

    let target_id = session.entities.next_id();
    let entity = Entity::new(*entity_id, target_id, kind, *position, *motion, *rotation);
    session.entities.register(entity);

    session.upstream.send(TargetCommand::SpawnCreature {
        entity_id: target_id,
        creature_type: kind.target_type_id(),
        position: *position,
        motion: *motion,
        rotation: *rotation,
    });
}
