//! Origin-protocol records (backend game server side).
//!
//! Each inbound event is an opaque typed record with named fields; the
//! wire encoding and framing are a collaborator's responsibility. The
//! engine dispatches on [`OriginEventKind`], the event's runtime tag.

use serde::{Deserialize, Serialize};

use causeway_domain::{OriginEntityId, PlayerProfile, Vector3f};

/// Integer block position as the origin protocol encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPosition {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Creature type codes as assigned by the origin protocol.
///
/// Codes outside the fixed translation table are dropped by the
/// translation layer, never forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OriginCreatureCode(pub i32);

/// Events arriving from the backend server on a session's downstream
/// link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OriginEvent {
    /// A block entity (sign, chest, ...) changed its structured payload.
    BlockEntityUpdate {
        position: BlockPosition,
        /// Structured payload copied verbatim to the target protocol.
        payload: serde_json::Value,
    },
    /// The session player's health/food state changed.
    HealthUpdate {
        health: f32,
        food: i32,
        saturation: f32,
    },
    /// A creature spawned.
    SpawnCreature {
        entity_id: OriginEntityId,
        code: OriginCreatureCode,
        position: Vector3f,
        motion: Vector3f,
        rotation: Vector3f,
    },
    /// A player became known to this session (player list add).
    PlayerListAdd {
        entity_id: OriginEntityId,
        profile: PlayerProfile,
        position: Vector3f,
    },
    /// Entities left the world.
    DestroyEntities { entity_ids: Vec<OriginEntityId> },
}

impl OriginEvent {
    /// The dispatch tag for this event.
    pub fn kind(&self) -> OriginEventKind {
        match self {
            Self::BlockEntityUpdate { .. } => OriginEventKind::BlockEntityUpdate,
            Self::HealthUpdate { .. } => OriginEventKind::HealthUpdate,
            Self::SpawnCreature { .. } => OriginEventKind::SpawnCreature,
            Self::PlayerListAdd { .. } => OriginEventKind::PlayerListAdd,
            Self::DestroyEntities { .. } => OriginEventKind::DestroyEntities,
        }
    }
}

/// Runtime tags for [`OriginEvent`], used as translator registry keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginEventKind {
    BlockEntityUpdate,
    HealthUpdate,
    SpawnCreature,
    PlayerListAdd,
    DestroyEntities,
}

/// Commands sent back to the backend server on the downstream link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OriginCommand {
    /// Ask the server to respawn the session player.
    RespawnRequest,
}
