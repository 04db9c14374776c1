//! Skin apply orchestrator.
//!
//! Resolves a player's textures through the shared service and, when
//! the result is newer than what the client last saw, refreshes that
//! player's list entry upstream with a remove-then-add pair. Nothing
//! here fails: resolution degrades to defaults and a refresh that
//! cannot be delivered yet is simply skipped.

use std::sync::Arc;

use causeway_domain::{PlayerEntity, SkinAndCape, TextureDescriptor};
use causeway_protocol::{
    custom_geometry_name, PlayerListAction, PlayerListEntry, TargetCommand, GEOMETRY_HUMANOID,
};

use crate::session::Session;

/// Invoked with the resolved pair once the apply attempt finishes,
/// whether or not a refresh was sent.
pub type ApplyCallback = Box<dyn FnOnce(SkinAndCape) + Send + 'static>;

/// Fire-and-forget variant of [`resolve_and_apply`].
pub fn spawn_resolve_and_apply(
    session: &Arc<Session>,
    player: PlayerEntity,
    on_complete: Option<ApplyCallback>,
) {
    let session = Arc::clone(session);
    tokio::spawn(async move {
        resolve_and_apply(&session, player, on_complete).await;
    });
}

/// Resolve the player's textures and refresh their player-list entry if
/// anything changed.
pub async fn resolve_and_apply(
    session: &Arc<Session>,
    player: PlayerEntity,
    on_complete: Option<ApplyCallback>,
) {
    let player_id = player.profile.id;
    let descriptor = TextureDescriptor::from_profile(&player.profile);

    let mut pair = session
        .textures
        .resolve_skin_and_cape(player_id, &descriptor)
        .await;

    pair.cape = session
        .textures
        .resolve_unofficial_cape(pair.cape, player_id, &player.profile.name)
        .await;

    if pair.skin.fetched_at > player.last_texture_apply {
        let applied_at = pair.skin.fetched_at;
        if let Some(mut tracked) = session.players.get_mut(&player_id) {
            tracked.last_texture_apply = applied_at;
        }
        session.with_player_mut(|own| {
            if own.profile.id == player_id {
                own.last_texture_apply = applied_at;
            }
        });

        if session.upstream.is_initialized() {
            let entry = player_list_entry(&player, &descriptor, &pair);
            session.upstream.send(TargetCommand::PlayerList {
                action: PlayerListAction::Remove,
                entries: vec![entry.clone()],
            });
            session.upstream.send(TargetCommand::PlayerList {
                action: PlayerListAction::Add,
                entries: vec![entry],
            });
        } else {
            tracing::debug!(%player_id, "Upstream not initialized, skipping player-list refresh");
        }
    } else {
        tracing::trace!(%player_id, "Skin unchanged since last apply, skipping refresh");
    }

    if let Some(callback) = on_complete {
        callback(pair);
    }
}

fn player_list_entry(
    player: &PlayerEntity,
    descriptor: &TextureDescriptor,
    pair: &SkinAndCape,
) -> PlayerListEntry {
    let geometry_name = if pair.skin.url.is_empty() {
        GEOMETRY_HUMANOID.to_string()
    } else {
        custom_geometry_name(descriptor.slim)
    };

    let skin_id = if pair.skin.url.is_empty() {
        player.profile.id.to_string()
    } else {
        pair.skin.url.clone()
    };

    PlayerListEntry {
        player_id: player.profile.id,
        username: player.profile.name.clone(),
        entity_id: player.entity.target_id,
        skin_id,
        skin_data: pair.skin.data.clone(),
        cape_data: pair.cape.data.clone(),
        geometry_name,
        geometry_data: String::new(),
    }
}
