//! Player identity records and the texture descriptor embedded in them.
//!
//! The origin protocol attaches a base64-encoded JSON property to each
//! player profile describing skin/cape texture URLs and the model
//! variant. Malformed or missing data degrades to an all-empty
//! descriptor; decoding never fails loudly.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::PlayerId;

/// Name of the profile property carrying texture data.
const TEXTURES_PROPERTY: &str = "textures";

/// A named, signed property on a player profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileProperty {
    pub name: String,
    pub value: String,
    pub signature: Option<String>,
}

/// A player profile as carried by the origin protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub name: String,
    pub properties: Vec<ProfileProperty>,
}

impl PlayerProfile {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, property: ProfileProperty) -> Self {
        self.properties.push(property);
        self
    }

    pub fn property(&self, name: &str) -> Option<&ProfileProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Texture URLs and model variant parsed out of a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureDescriptor {
    pub skin_url: String,
    pub cape_url: Option<String>,
    /// Whether the slim ("alex") model geometry applies.
    pub slim: bool,
}

impl TextureDescriptor {
    /// Parse the embedded texture property of a profile.
    ///
    /// Any decode failure (missing property, bad base64, malformed
    /// JSON) yields the all-empty descriptor and a debug log, never an
    /// error.
    pub fn from_profile(profile: &PlayerProfile) -> Self {
        match Self::try_from_profile(profile) {
            Ok(descriptor) => descriptor,
            Err(error) => {
                tracing::debug!(
                    player = %profile.name,
                    %error,
                    "Invalid texture data on profile, using empty descriptor"
                );
                Self::default()
            }
        }
    }

    /// Fallible parse of the embedded texture property.
    pub fn try_from_profile(profile: &PlayerProfile) -> Result<Self, DomainError> {
        let property = profile
            .property(TEXTURES_PROPERTY)
            .ok_or_else(|| DomainError::not_found("ProfileProperty", TEXTURES_PROPERTY))?;

        let raw = BASE64
            .decode(&property.value)
            .map_err(|e| DomainError::decode(format!("bad base64: {e}")))?;

        let payload: TexturesPayload = serde_json::from_slice(&raw)
            .map_err(|e| DomainError::decode(format!("bad JSON: {e}")))?;

        let skin = payload
            .textures
            .skin
            .ok_or_else(|| DomainError::decode("no skin texture in payload"))?;

        Ok(Self {
            // The slim variant is signalled by the presence of metadata
            // on the skin texture, not by its contents.
            slim: skin.metadata.is_some(),
            skin_url: skin.url,
            cape_url: payload.textures.cape.map(|c| c.url),
        })
    }
}

#[derive(Debug, Deserialize)]
struct TexturesPayload {
    textures: TextureEntries,
}

#[derive(Debug, Deserialize)]
struct TextureEntries {
    #[serde(rename = "SKIN")]
    skin: Option<TextureEntry>,
    #[serde(rename = "CAPE")]
    cape: Option<TextureEntry>,
}

#[derive(Debug, Deserialize)]
struct TextureEntry {
    url: String,
    metadata: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with_textures(json: &str) -> PlayerProfile {
        PlayerProfile::new(PlayerId::new(), "steve").with_property(ProfileProperty {
            name: TEXTURES_PROPERTY.to_string(),
            value: BASE64.encode(json),
            signature: None,
        })
    }

    #[test]
    fn parses_skin_cape_and_slim_flag() {
        let profile = profile_with_textures(
            r#"{"textures":{"SKIN":{"url":"https://example.com/skin.png","metadata":{"model":"slim"}},"CAPE":{"url":"https://example.com/cape.png"}}}"#,
        );
        let descriptor = TextureDescriptor::from_profile(&profile);
        assert_eq!(descriptor.skin_url, "https://example.com/skin.png");
        assert_eq!(
            descriptor.cape_url.as_deref(),
            Some("https://example.com/cape.png")
        );
        assert!(descriptor.slim);
    }

    #[test]
    fn classic_model_without_metadata() {
        let profile = profile_with_textures(
            r#"{"textures":{"SKIN":{"url":"https://example.com/skin.png"}}}"#,
        );
        let descriptor = TextureDescriptor::from_profile(&profile);
        assert!(!descriptor.slim);
        assert_eq!(descriptor.cape_url, None);
    }

    #[test]
    fn malformed_property_degrades_to_empty() {
        let profile = PlayerProfile::new(PlayerId::new(), "steve").with_property(ProfileProperty {
            name: TEXTURES_PROPERTY.to_string(),
            value: "definitely not base64!!!".to_string(),
            signature: None,
        });
        assert_eq!(
            TextureDescriptor::from_profile(&profile),
            TextureDescriptor::default()
        );
    }

    #[test]
    fn missing_property_degrades_to_empty() {
        let profile = PlayerProfile::new(PlayerId::new(), "steve");
        assert_eq!(
            TextureDescriptor::from_profile(&profile),
            TextureDescriptor::default()
        );
    }
}
