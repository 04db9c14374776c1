//! Texture pipeline: fetch, cache, and apply.

pub mod apply;
pub mod fetch;
pub mod providers;
pub mod resolution;
pub mod service;

pub use apply::{resolve_and_apply, spawn_resolve_and_apply, ApplyCallback};
pub use fetch::{FetchError, FetchKind, HttpTextureFetcher, TextureFetcher};
pub use resolution::Resolution;
pub use service::TextureService;
