//! Entities tracked by a bridge session.
//!
//! An [`Entity`] pairs the server-assigned origin-protocol id with the
//! bridge-assigned target-protocol id and carries the positional and
//! attribute state the translation layer mutates packet by packet.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, AttributeKind};
use crate::ids::{OriginEntityId, TargetEntityId};
use crate::profile::PlayerProfile;

/// Position, motion or rotation vector as both protocols encode it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3f {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
}

/// Creature vocabulary of the target protocol.
///
/// Origin-protocol creature codes are mapped onto these via a fixed
/// lookup in the translation layer; anything unmapped is dropped there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatureKind {
    Player,
    Zombie,
    Skeleton,
    Spider,
    Creeper,
    Cow,
    Pig,
    Sheep,
    Chicken,
    Wolf,
    Villager,
}

impl CreatureKind {
    /// Numeric id used by the target protocol's spawn commands.
    pub fn target_type_id(self) -> u32 {
        match self {
            Self::Player => 63,
            Self::Zombie => 32,
            Self::Skeleton => 34,
            Self::Spider => 35,
            Self::Creeper => 33,
            Self::Cow => 11,
            Self::Pig => 12,
            Self::Sheep => 13,
            Self::Chicken => 10,
            Self::Wolf => 14,
            Self::Villager => 15,
        }
    }
}

/// One tracked entity, owned by the session that spawned it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub origin_id: OriginEntityId,
    pub target_id: TargetEntityId,
    pub kind: CreatureKind,
    pub position: Vector3f,
    pub motion: Vector3f,
    pub rotation: Vector3f,
    pub attributes: HashMap<AttributeKind, Attribute>,
}

impl Entity {
    pub fn new(
        origin_id: OriginEntityId,
        target_id: TargetEntityId,
        kind: CreatureKind,
        position: Vector3f,
        motion: Vector3f,
        rotation: Vector3f,
    ) -> Self {
        Self {
            origin_id,
            target_id,
            kind,
            position,
            motion,
            rotation,
            attributes: HashMap::new(),
        }
    }

    /// Replace one attribute, keyed by kind.
    pub fn set_attribute(&mut self, attribute: Attribute) {
        self.attributes.insert(attribute.kind, attribute);
    }

    /// Current value of an attribute, if tracked.
    pub fn attribute_value(&self, kind: AttributeKind) -> Option<f32> {
        self.attributes.get(&kind).map(|a| a.value)
    }
}

/// A player entity: a tracked entity plus the identity record its
/// textures are resolved from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerEntity {
    pub entity: Entity,
    pub profile: PlayerProfile,
    /// Fetch timestamp of the last texture applied to the player list.
    /// Compared against `Skin::fetched_at` to avoid redundant refreshes.
    pub last_texture_apply: DateTime<Utc>,
}

impl PlayerEntity {
    pub fn new(entity: Entity, profile: PlayerProfile) -> Self {
        Self {
            entity,
            profile,
            last_texture_apply: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}
