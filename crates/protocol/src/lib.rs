//! Causeway Protocol - Typed records for the two wire protocols.
//!
//! This crate contains the opaque typed records the engine translates
//! between: inbound origin-protocol events, outbound origin-protocol
//! commands, and outbound target-protocol commands.
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - serde, serde_json, uuid, chrono and
//!    the domain vocabulary only
//! 2. **No business logic** - pure data types and serialization
//! 3. **No wire encoding** - binary framing/encoding for either
//!    protocol is a collaborator's responsibility

pub mod origin;
pub mod target;

pub use origin::{
    BlockPosition, OriginCommand, OriginCreatureCode, OriginEvent, OriginEventKind,
};
pub use target::{
    custom_geometry_name, AttributeSnapshot, PlayerListAction, PlayerListEntry, TargetCommand,
    GEOMETRY_HUMANOID, GEOMETRY_HUMANOID_CUSTOM,
};
