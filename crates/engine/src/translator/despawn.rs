//! Entity destroy translation.

use std::sync::Arc;

use causeway_domain::CreatureKind;
use causeway_protocol::{OriginEvent, TargetCommand};

use crate::session::Session;

/// Remove each destroyed entity from the session mappings and the
/// client. Ids the session never tracked are ignored.
pub fn translate(event: &OriginEvent, session: &Arc<Session>) {
    let OriginEvent::DestroyEntities { entity_ids } = event else {
        return;
    };

    for origin_id in entity_ids {
        let Some(entity) = session.entities.remove_by_origin(*origin_id) else {
            continue;
        };

        if entity.kind == CreatureKind::Player {
            session
                .players
                .retain(|_, player| player.entity.origin_id != *origin_id);
        }

        session.upstream.send(TargetCommand::RemoveEntity {
            entity_id: entity.target_id,
        });
    }
}
