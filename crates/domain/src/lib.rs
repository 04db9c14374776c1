//! Causeway Domain - Core bridge types.
//!
//! Pure data types shared by the protocol and engine crates: identity
//! spaces, tracked entities and their attributes, modal form windows,
//! player profiles and resolved textures. No I/O, no business logic
//! beyond the invariants the types themselves carry.

pub mod attribute;
pub mod entity;
pub mod error;
pub mod ids;
pub mod profile;
pub mod texture;
pub mod window;

pub use attribute::{normalize_max_health, Attribute, AttributeKind, DEFAULT_MAX_HEALTH};
pub use entity::{CreatureKind, Entity, PlayerEntity, Vector3f};
pub use error::DomainError;
pub use ids::{FormId, OriginEntityId, PlayerId, TargetEntityId};
pub use profile::{PlayerProfile, ProfileProperty, TextureDescriptor};
pub use texture::{
    default_skin_data, Cape, Skin, SkinAndCape, CAPE_HEIGHT, CAPE_WIDTH, SKIN_HEIGHT, SKIN_WIDTH,
};
pub use window::FormWindow;
