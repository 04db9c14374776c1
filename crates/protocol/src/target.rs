//! Target-protocol records (client device side).
//!
//! Outbound commands the bridge emits on a session's upstream link.
//! Like the origin side, these are typed records; the wire encoding is
//! a collaborator's concern.

use serde::{Deserialize, Serialize};

use causeway_domain::{Attribute, FormId, PlayerId, TargetEntityId, Vector3f};

use crate::origin::BlockPosition;

/// Geometry identifier for the default (classic) player model.
pub const GEOMETRY_HUMANOID: &str = "geometry.humanoid";

/// Geometry identifier prefix for custom skins; the slim variant gets a
/// `Slim` suffix.
pub const GEOMETRY_HUMANOID_CUSTOM: &str = "geometry.humanoid.custom";

/// Geometry name for a custom skin, honoring the slim-model flag.
pub fn custom_geometry_name(slim: bool) -> String {
    if slim {
        format!("{GEOMETRY_HUMANOID_CUSTOM}Slim")
    } else {
        GEOMETRY_HUMANOID_CUSTOM.to_string()
    }
}

/// One attribute as the target protocol's attribute-sync encodes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSnapshot {
    pub id: String,
    pub value: f32,
    pub min: f32,
    pub max: f32,
}

impl From<&Attribute> for AttributeSnapshot {
    fn from(attribute: &Attribute) -> Self {
        Self {
            id: attribute.kind.wire_id().to_string(),
            value: attribute.value,
            min: attribute.min,
            max: attribute.max,
        }
    }
}

/// One entry of a player-list command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerListEntry {
    pub player_id: PlayerId,
    pub username: String,
    pub entity_id: TargetEntityId,
    pub skin_id: String,
    /// Row-major RGBA skin pixels.
    pub skin_data: Vec<u8>,
    /// Row-major RGBA cape pixels; empty when the player has no cape.
    pub cape_data: Vec<u8>,
    pub geometry_name: String,
    pub geometry_data: String,
}

/// Whether a player-list command adds or removes its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerListAction {
    Add,
    Remove,
}

/// Commands sent to the client device on the upstream link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TargetCommand {
    /// Verbatim block-entity payload update (latency sensitive).
    BlockEntityData {
        position: BlockPosition,
        payload: serde_json::Value,
    },
    /// Integer health display update.
    SetHealth { health: i32 },
    /// Sync a batch of entity attributes.
    UpdateAttributes {
        entity_id: TargetEntityId,
        attributes: Vec<AttributeSnapshot>,
    },
    /// Force the client respawn screen/position.
    Respawn { position: Vector3f },
    /// Spawn a creature entity under a bridge-assigned id.
    SpawnCreature {
        entity_id: TargetEntityId,
        creature_type: u32,
        position: Vector3f,
        motion: Vector3f,
        rotation: Vector3f,
    },
    /// Remove a previously spawned entity.
    RemoveEntity { entity_id: TargetEntityId },
    /// Show a modal form.
    ModalFormRequest { form_id: FormId, form_data: String },
    /// Add or remove player-list entries.
    PlayerList {
        action: PlayerListAction,
        entries: Vec<PlayerListEntry>,
    },
}
