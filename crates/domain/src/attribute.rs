//! Player/entity attributes in the target protocol's encoding.
//!
//! Attribute values are derived deterministically from origin-protocol
//! packet fields; the target protocol additionally requires min/max
//! bounds on each synced attribute.

use serde::{Deserialize, Serialize};

/// Default maximum health assumed when an entity has no explicit
/// max-health attribute yet.
pub const DEFAULT_MAX_HEALTH: f32 = 20.0;

/// The attribute kinds the bridge tracks and syncs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Health,
    Hunger,
    Saturation,
    MaxHealth,
}

impl AttributeKind {
    /// Identifier used in the target protocol's attribute-sync command.
    pub fn wire_id(self) -> &'static str {
        match self {
            Self::Health => "player.health",
            Self::Hunger => "player.hunger",
            Self::Saturation => "player.saturation",
            Self::MaxHealth => "player.max_health",
        }
    }

    /// Default bounds the target protocol expects for this kind.
    fn default_bounds(self) -> (f32, f32) {
        match self {
            Self::Health => (0.0, DEFAULT_MAX_HEALTH),
            Self::Hunger => (0.0, 20.0),
            Self::Saturation => (0.0, 20.0),
            Self::MaxHealth => (0.0, 1024.0),
        }
    }

    /// Build an attribute of this kind with default bounds.
    pub fn attribute(self, value: f32) -> Attribute {
        let (min, max) = self.default_bounds();
        Attribute {
            kind: self,
            value,
            min,
            max,
        }
    }

    /// Build an attribute with an explicit maximum (health uses the
    /// entity's normalized max-health as its upper bound).
    pub fn attribute_with_max(self, value: f32, max: f32) -> Attribute {
        let (min, _) = self.default_bounds();
        Attribute {
            kind: self,
            value,
            min,
            max,
        }
    }
}

/// A single attribute value with the bounds the target protocol requires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub kind: AttributeKind,
    pub value: f32,
    pub min: f32,
    pub max: f32,
}

/// The target protocol requires an even maximum health; odd values are
/// rounded up by one. Preserved verbatim from observed behavior.
pub fn normalize_max_health(max_health: f32) -> f32 {
    if (max_health % 2.0) == 1.0 {
        max_health + 1.0
    } else {
        max_health
    }
}
