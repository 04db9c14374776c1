//! Skin and cape texture values.
//!
//! Textures are decoded raw RGBA pixel planes (row-major, 4 bytes per
//! pixel). Every resolution path that cannot produce a real result
//! substitutes the well-known default instance instead of failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::PlayerId;

/// Skin texture dimensions in the target protocol.
pub const SKIN_WIDTH: u32 = 64;
pub const SKIN_HEIGHT: u32 = 64;

/// Capes are normalized onto a fixed 64x32 canvas before extraction.
pub const CAPE_WIDTH: u32 = 64;
pub const CAPE_HEIGHT: u32 = 32;

/// Pixels of the default skin substituted when resolution fails.
///
/// The original ships a bundled texture; here a flat 64x64 RGBA plane
/// is generated instead. Shape and layout are identical.
pub fn default_skin_data() -> Vec<u8> {
    let mut data = Vec::with_capacity((SKIN_WIDTH * SKIN_HEIGHT * 4) as usize);
    for _ in 0..(SKIN_WIDTH * SKIN_HEIGHT) {
        data.extend_from_slice(&[0x7f, 0x66, 0x4c, 0xff]);
    }
    data
}

/// A resolved skin texture for one player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skin {
    pub owner: PlayerId,
    pub url: String,
    /// Row-major RGBA pixels.
    pub data: Vec<u8>,
    pub fetched_at: DateTime<Utc>,
    /// Set when a completed fetch replaced a different cached texture.
    pub updated: bool,
}

impl Skin {
    /// The default skin for an owner; substituted whenever resolution
    /// cannot produce a real result.
    pub fn empty(owner: PlayerId) -> Self {
        Self {
            owner,
            url: String::new(),
            data: default_skin_data(),
            fetched_at: DateTime::<Utc>::UNIX_EPOCH,
            updated: false,
        }
    }
}

/// A resolved cape texture, keyed by its source URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cape {
    pub url: String,
    /// Row-major RGBA pixels; empty when the fetch failed.
    pub data: Vec<u8>,
    pub fetched_at: DateTime<Utc>,
    pub failed: bool,
}

impl Cape {
    /// The default (failed) cape substituted when resolution cannot
    /// produce a real result.
    pub fn empty() -> Self {
        Self {
            url: String::new(),
            data: Vec::new(),
            fetched_at: DateTime::<Utc>::UNIX_EPOCH,
            failed: true,
        }
    }
}

/// The unit returned by composite skin+cape resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkinAndCape {
    pub skin: Skin,
    pub cape: Cape,
}
