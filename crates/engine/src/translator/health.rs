//! Health, hunger and saturation translation.

use std::sync::Arc;

use causeway_domain::{normalize_max_health, AttributeKind, Vector3f, DEFAULT_MAX_HEALTH};
use causeway_protocol::{AttributeSnapshot, OriginCommand, OriginEvent, TargetCommand};

use crate::session::Session;

/// Translate a health/food update into the display-health command plus
/// an attribute sync. Health at or below zero additionally triggers the
/// respawn handshake on both links.
pub fn translate(event: &OriginEvent, session: &Arc<Session>) {
    let OriginEvent::HealthUpdate {
        health,
        food,
        saturation,
    } = event
    else {
        return;
    };

    let Some(snapshot) = session.player() else {
        tracing::debug!("Health update before the session player spawned, dropping");
        return;
    };

    // The client shows whole hearts; fractional health rounds up.
    session.upstream.send(TargetCommand::SetHealth {
        health: health.ceil() as i32,
    });

    let max_health = snapshot
        .entity
        .attribute_value(AttributeKind::MaxHealth)
        .unwrap_or(DEFAULT_MAX_HEALTH);
    let max_health = normalize_max_health(max_health);

    let entity_id = snapshot.entity.target_id;
    let attributes = session.with_player_mut(|player| {
        player
            .entity
            .set_attribute(AttributeKind::Health.attribute_with_max(*health, max_health));
        player
            .entity
            .set_attribute(AttributeKind::Hunger.attribute(*food as f32));
        player
            .entity
            .set_attribute(AttributeKind::Saturation.attribute(*saturation));

        let mut snapshots: Vec<AttributeSnapshot> = player
            .entity
            .attributes
            .values()
            .map(AttributeSnapshot::from)
            .collect();
        // Stable order on the wire regardless of map iteration.
        snapshots.sort_by(|a, b| a.id.cmp(&b.id));
        snapshots
    });

    if let Some(attributes) = attributes {
        session.upstream.send(TargetCommand::UpdateAttributes {
            entity_id,
            attributes,
        });
    }

    if *health <= 0.0 {
        session.upstream.send(TargetCommand::Respawn {
            position: Vector3f::ZERO,
        });
        session.downstream.send(OriginCommand::RespawnRequest);
    }
}
