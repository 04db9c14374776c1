//! Causeway Engine - Sessions, translator dispatch, and the texture
//! pipeline.
//!
//! The engine bridges one origin-protocol connection to one
//! target-protocol connection per session. Inbound origin events are
//! routed through a flat translator table onto the session's outbound
//! links; player textures are resolved through a shared, TTL-cached
//! service with bounded fetch concurrency.

pub mod app;
pub mod clock;
pub mod config;
pub mod link;
pub mod session;
pub mod textures;
pub mod translator;

pub use app::{App, SessionChannels};
pub use config::BridgeConfig;
pub use link::{OriginLink, Outbound, TargetLink};
pub use session::Session;
pub use textures::TextureService;
pub use translator::TranslatorRegistry;
