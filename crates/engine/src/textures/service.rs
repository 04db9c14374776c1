//! Texture cache service.
//!
//! Central point for skin and cape resolution. Results are cached with
//! a TTL, concurrent requests for the same URL share one in-flight
//! fetch, and every failure path degrades to the default texture
//! instead of surfacing an error. Fetch concurrency is bounded by a
//! semaphore sized from the configuration.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::Semaphore;

use causeway_domain::{default_skin_data, Cape, PlayerId, Skin, SkinAndCape, TextureDescriptor};

use crate::clock::Clock;
use crate::config::BridgeConfig;
use crate::textures::fetch::{FetchKind, TextureFetcher};
use crate::textures::providers::CAPE_PROVIDERS;
use crate::textures::resolution::{Resolution, ResolutionSender};

/// Cached entries are refetched after this long.
const CACHE_TTL_MINUTES: i64 = 8;

/// Capes hosted here never change for a given URL, so a successful
/// fetch is cached without expiry.
const OFFICIAL_CAPE_PREFIX: &str = "https://textures.minecraft.net";

/// Upper bound on a composite skin+cape wait before defaults are
/// substituted.
const COMPOSITE_TIMEOUT: Duration = Duration::from_secs(5);

/// Per-provider bound while walking the unofficial cape list.
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(4);

/// Shared skin and cape resolution for every session.
///
/// Skins are keyed by their owner, capes by their source URL; each key
/// has at most one fetch in flight at a time.
pub struct TextureService {
    fetcher: Arc<dyn TextureFetcher>,
    clock: Arc<dyn Clock>,
    config: BridgeConfig,
    pool: Arc<Semaphore>,
    skins: DashMap<PlayerId, Skin>,
    capes: DashMap<String, Cape>,
    inflight_skins: DashMap<PlayerId, Resolution<Skin>>,
    inflight_capes: DashMap<String, Resolution<Cape>>,
}

impl TextureService {
    pub fn new(
        fetcher: Arc<dyn TextureFetcher>,
        clock: Arc<dyn Clock>,
        config: BridgeConfig,
    ) -> Arc<Self> {
        let pool = Arc::new(Semaphore::new(config.fetch_pool_size()));
        Arc::new(Self {
            fetcher,
            clock,
            config,
            pool,
            skins: DashMap::new(),
            capes: DashMap::new(),
            inflight_skins: DashMap::new(),
            inflight_capes: DashMap::new(),
        })
    }

    // ========================================================================
    // Skin resolution
    // ========================================================================

    /// Resolve a skin for its owner. Returns a ready resolution on a
    /// cache hit, joins the in-flight fetch if one exists, and
    /// otherwise spawns a new fetch task. Awaiting the handle gives
    /// the blocking flavor; holding it gives the deferred one.
    pub fn resolve_skin(self: &Arc<Self>, owner: PlayerId, url: &str) -> Resolution<Skin> {
        if url.is_empty() {
            return Resolution::ready(Skin::empty(owner));
        }

        if let Some(cached) = self.cached_skin(owner, url) {
            return Resolution::ready(cached);
        }

        match self.inflight_skins.entry(owner) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(slot) => {
                let (sender, resolution) = Resolution::pending();
                slot.insert(resolution.clone());
                let service = Arc::clone(self);
                let url = url.to_owned();
                tokio::spawn(async move {
                    service.run_skin_fetch(owner, url, sender).await;
                });
                resolution
            }
        }
    }

    async fn run_skin_fetch(
        self: Arc<Self>,
        owner: PlayerId,
        url: String,
        sender: ResolutionSender<Skin>,
    ) {
        let _permit = self.pool.acquire().await.ok();

        let mut skin = match self.fetcher.fetch_image(&url, FetchKind::Skin).await {
            Ok(data) => Skin {
                owner,
                url: url.clone(),
                data,
                fetched_at: self.clock.now(),
                updated: false,
            },
            Err(error) => {
                tracing::debug!(%error, url, "Skin fetch failed, substituting the default texture");
                Skin {
                    owner,
                    url: url.clone(),
                    data: default_skin_data(),
                    fetched_at: self.clock.now(),
                    updated: false,
                }
            }
        };

        // Commit before clearing the in-flight entry so late arrivals
        // observe either the pending resolution or the cache.
        let previous = self.skins.insert(owner, skin.clone());
        skin.updated = matches!(previous, Some(ref p) if p.url != skin.url);
        self.inflight_skins.remove(&owner);
        sender.complete(skin);
    }

    fn cached_skin(&self, owner: PlayerId, url: &str) -> Option<Skin> {
        let cached = self.skins.get(&owner).map(|entry| entry.clone())?;
        if cached.url != url {
            // The owner changed textures; refetch under the new URL.
            return None;
        }
        if !self.is_fresh(cached.fetched_at) {
            // Stale; the refetch commit will overwrite it.
            return None;
        }
        Some(cached)
    }

    // ========================================================================
    // Cape resolution
    // ========================================================================

    /// Resolve a cape by URL with the same caching and in-flight
    /// sharing as skins. Failed fetches are cached as failed capes
    /// until the TTL elapses.
    pub fn resolve_cape(self: &Arc<Self>, url: &str) -> Resolution<Cape> {
        if url.is_empty() {
            return Resolution::ready(Cape::empty());
        }

        if let Some(cached) = self.cached_cape(url) {
            return Resolution::ready(cached);
        }

        match self.inflight_capes.entry(url.to_owned()) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(slot) => {
                let (sender, resolution) = Resolution::pending();
                slot.insert(resolution.clone());
                let service = Arc::clone(self);
                let url = url.to_owned();
                tokio::spawn(async move {
                    service.run_cape_fetch(url, sender).await;
                });
                resolution
            }
        }
    }

    async fn run_cape_fetch(self: Arc<Self>, url: String, sender: ResolutionSender<Cape>) {
        let _permit = self.pool.acquire().await.ok();

        let cape = match self.fetcher.fetch_image(&url, FetchKind::Cape).await {
            Ok(data) => Cape {
                url: url.clone(),
                data,
                fetched_at: self.clock.now(),
                failed: false,
            },
            Err(error) => {
                tracing::debug!(%error, url, "Cape fetch failed");
                Cape {
                    url: url.clone(),
                    data: Vec::new(),
                    fetched_at: self.clock.now(),
                    failed: true,
                }
            }
        };

        self.capes.insert(url.clone(), cape.clone());
        self.inflight_capes.remove(&url);
        sender.complete(cape);
    }

    fn cached_cape(&self, url: &str) -> Option<Cape> {
        let cached = self.capes.get(url).map(|entry| entry.clone())?;
        if url.starts_with(OFFICIAL_CAPE_PREFIX) && !cached.failed {
            return Some(cached);
        }
        if self.is_fresh(cached.fetched_at) {
            return Some(cached);
        }
        None
    }

    /// When the official cape failed and third-party providers are
    /// enabled, walk the providers in priority order and take the
    /// first success. In every other case the official result comes
    /// back unchanged.
    pub async fn resolve_unofficial_cape(
        self: &Arc<Self>,
        official: Cape,
        player_id: PlayerId,
        username: &str,
    ) -> Cape {
        if !official.failed || !self.config.allow_third_party_capes {
            return official;
        }

        for provider in CAPE_PROVIDERS {
            let url = provider.url_for(&player_id, username);
            let cape = self
                .resolve_cape(&url)
                .wait_or(Cape::empty(), PROVIDER_TIMEOUT)
                .await;
            if !cape.failed {
                tracing::debug!(provider = provider.name, %player_id, "Unofficial cape found");
                return cape;
            }
        }
        official
    }

    // ========================================================================
    // Composite
    // ========================================================================

    /// Resolve both textures for a player, bounded in time. Never
    /// fails: whatever cannot be resolved in time becomes the default.
    pub async fn resolve_skin_and_cape(
        self: &Arc<Self>,
        owner: PlayerId,
        descriptor: &TextureDescriptor,
    ) -> SkinAndCape {
        let skin = self
            .resolve_skin(owner, &descriptor.skin_url)
            .wait_or(Skin::empty(owner), COMPOSITE_TIMEOUT)
            .await;

        let cape = match &descriptor.cape_url {
            Some(url) => {
                self.resolve_cape(url)
                    .wait_or(Cape::empty(), COMPOSITE_TIMEOUT)
                    .await
            }
            None => Cape::empty(),
        };

        SkinAndCape { skin, cape }
    }

    fn is_fresh(&self, fetched_at: DateTime<Utc>) -> bool {
        self.clock.now() - fetched_at < ChronoDuration::minutes(CACHE_TTL_MINUTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ManualClock, SystemClock};
    use crate::textures::fetch::{FetchError, MockTextureFetcher};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedFetcher {
        calls: Mutex<Vec<String>>,
        failing: Vec<String>,
        gate: Option<Arc<Semaphore>>,
    }

    impl ScriptedFetcher {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                failing: Vec::new(),
                gate: None,
            })
        }

        fn failing_on(urls: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                failing: urls.iter().map(|u| (*u).to_owned()).collect(),
                gate: None,
            })
        }

        fn gated(gate: Arc<Semaphore>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                failing: Vec::new(),
                gate: Some(gate),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl TextureFetcher for ScriptedFetcher {
        async fn fetch_image(&self, url: &str, _kind: FetchKind) -> Result<Vec<u8>, FetchError> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(url.to_owned());
            }
            if let Some(gate) = &self.gate {
                let _permit = gate.acquire().await;
            }
            if self.failing.iter().any(|f| f == url) {
                return Err(FetchError::Status(404));
            }
            Ok(vec![9, 9, 9, 255])
        }
    }

    fn service_with(
        fetcher: Arc<dyn TextureFetcher>,
        clock: Arc<dyn Clock>,
        config: BridgeConfig,
    ) -> Arc<TextureService> {
        TextureService::new(fetcher, clock, config)
    }

    #[tokio::test]
    async fn concurrent_cape_requests_share_one_fetch() {
        let gate = Arc::new(Semaphore::new(0));
        let fetcher = ScriptedFetcher::gated(Arc::clone(&gate));
        let service = service_with(
            fetcher.clone(),
            Arc::new(SystemClock::new()),
            BridgeConfig::default(),
        );

        let first = service.resolve_cape("https://example.invalid/cape.png");
        let second = service.resolve_cape("https://example.invalid/cape.png");
        gate.add_permits(1);

        let a = first.wait().await.expect("fetch task completes");
        let b = second.wait().await.expect("fetch task completes");
        assert!(!a.failed);
        assert_eq!(a.data, b.data);
        assert_eq!(fetcher.calls().len(), 1);
    }

    #[tokio::test]
    async fn unofficial_cape_stops_at_first_success() {
        let optifine = "http://s.optifine.net/capes/Steve.png";
        let fetcher = ScriptedFetcher::failing_on(&[optifine]);
        let config = BridgeConfig {
            allow_third_party_capes: true,
            ..BridgeConfig::default()
        };
        let service = service_with(fetcher.clone(), Arc::new(SystemClock::new()), config);

        let cape = service
            .resolve_unofficial_cape(Cape::empty(), PlayerId::new(), "Steve")
            .await;

        assert!(!cape.failed);
        let calls = fetcher.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], optifine);
        assert!(calls[1].contains("capes.labymod.net"));
    }

    #[tokio::test]
    async fn unofficial_capes_disabled_by_default() {
        let fetcher = ScriptedFetcher::ok();
        let service = service_with(
            fetcher.clone(),
            Arc::new(SystemClock::new()),
            BridgeConfig::default(),
        );

        let cape = service
            .resolve_unofficial_cape(Cape::empty(), PlayerId::new(), "Steve")
            .await;

        assert!(cape.failed);
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn successful_official_cape_skips_providers() {
        let fetcher = ScriptedFetcher::ok();
        let config = BridgeConfig {
            allow_third_party_capes: true,
            ..BridgeConfig::default()
        };
        let service = service_with(fetcher.clone(), Arc::new(SystemClock::new()), config);

        let official = Cape {
            url: format!("{OFFICIAL_CAPE_PREFIX}/cape/abc"),
            data: vec![1, 2, 3, 255],
            fetched_at: Utc::now(),
            failed: false,
        };
        let cape = service
            .resolve_unofficial_cape(official.clone(), PlayerId::new(), "Steve")
            .await;

        assert_eq!(cape.url, official.url);
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn skin_and_cape_completes_with_defaults_on_failure() {
        let mut mock = MockTextureFetcher::new();
        mock.expect_fetch_image()
            .returning(|_, _| Err(FetchError::Status(500)));
        let service = service_with(
            Arc::new(mock),
            Arc::new(SystemClock::new()),
            BridgeConfig::default(),
        );

        let owner = PlayerId::new();
        let descriptor = TextureDescriptor {
            skin_url: "https://example.invalid/skin.png".to_owned(),
            cape_url: Some("https://example.invalid/cape.png".to_owned()),
            slim: false,
        };
        let pair = service.resolve_skin_and_cape(owner, &descriptor).await;

        assert_eq!(pair.skin.data, default_skin_data());
        assert!(pair.cape.failed);
    }

    #[tokio::test]
    async fn expired_skin_is_refetched() {
        let clock = ManualClock::new(Utc::now());
        let fetcher = ScriptedFetcher::ok();
        let service = service_with(fetcher.clone(), clock.clone(), BridgeConfig::default());
        let owner = PlayerId::new();
        let url = "https://example.invalid/skin.png";

        let _ = service.resolve_skin(owner, url).wait().await;
        let _ = service.resolve_skin(owner, url).wait().await;
        assert_eq!(fetcher.calls().len(), 1);

        clock.advance(ChronoDuration::minutes(9));
        let _ = service.resolve_skin(owner, url).wait().await;
        assert_eq!(fetcher.calls().len(), 2);
    }

    #[tokio::test]
    async fn official_cape_survives_ttl_expiry() {
        let clock = ManualClock::new(Utc::now());
        let fetcher = ScriptedFetcher::ok();
        let service = service_with(fetcher.clone(), clock.clone(), BridgeConfig::default());
        let url = format!("{OFFICIAL_CAPE_PREFIX}/cape/abc123");

        let _ = service.resolve_cape(&url).wait().await;
        clock.advance(ChronoDuration::minutes(60));
        let cape = service
            .resolve_cape(&url)
            .wait()
            .await
            .expect("cached cape resolves");

        assert!(!cape.failed);
        assert_eq!(fetcher.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_waiter_gets_default_while_fetch_commits() {
        let gate = Arc::new(Semaphore::new(0));
        let fetcher = ScriptedFetcher::gated(Arc::clone(&gate));
        let service = service_with(
            fetcher.clone(),
            Arc::new(SystemClock::new()),
            BridgeConfig::default(),
        );
        let owner = PlayerId::new();
        let url = "https://example.invalid/slow-skin.png";

        let pending = service.resolve_skin(owner, url);
        let timed_out = pending
            .clone()
            .wait_or(Skin::empty(owner), Duration::from_secs(5))
            .await;
        assert!(timed_out.url.is_empty());

        // The fetch was never cancelled; releasing it commits the real
        // result to every remaining handle and the cache.
        gate.add_permits(1);
        let committed = pending.wait().await.expect("fetch task completes");
        assert_eq!(committed.url, url);
        assert_eq!(committed.data, vec![9, 9, 9, 255]);
    }

    #[tokio::test]
    async fn skin_url_change_marks_update() {
        let fetcher = ScriptedFetcher::ok();
        let service = service_with(
            fetcher.clone(),
            Arc::new(SystemClock::new()),
            BridgeConfig::default(),
        );
        let owner = PlayerId::new();

        let first = service
            .resolve_skin(owner, "https://example.invalid/a.png")
            .wait()
            .await
            .expect("fetch task completes");
        assert!(!first.updated);

        let second = service
            .resolve_skin(owner, "https://example.invalid/b.png")
            .wait()
            .await
            .expect("fetch task completes");
        assert!(second.updated);

        let third = service
            .resolve_skin(owner, "https://example.invalid/b.png")
            .wait()
            .await
            .expect("cached skin resolves");
        assert!(!third.updated);
    }
}
