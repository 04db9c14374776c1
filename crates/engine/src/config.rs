//! Bridge configuration.
//!
//! Settings are environment-driven and loaded once at startup; the
//! resulting struct is passed by reference into the components that
//! need it.

use std::time::Duration;

/// Worker pool size without third-party cape providers enabled.
const FETCH_POOL_SIZE: usize = 14;

/// Worker pool size with third-party cape providers enabled (extra
/// headroom for the provider fan-out).
const FETCH_POOL_SIZE_THIRD_PARTY: usize = 21;

/// Operational settings for the bridge process.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Whether third-party cape providers may be queried when the
    /// official cape fails to resolve.
    pub allow_third_party_capes: bool,
    /// Per-request timeout applied to outbound texture fetches.
    pub fetch_timeout: Duration,
}

impl BridgeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let allow_third_party_capes = std::env::var("CAUSEWAY_THIRD_PARTY_CAPES")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let fetch_timeout = std::env::var("CAUSEWAY_FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(10));

        Self {
            allow_third_party_capes,
            fetch_timeout,
        }
    }

    /// Bound on concurrent outbound fetches; larger when third-party
    /// capes are enabled.
    pub fn fetch_pool_size(&self) -> usize {
        if self.allow_third_party_capes {
            FETCH_POOL_SIZE_THIRD_PARTY
        } else {
            FETCH_POOL_SIZE
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            allow_third_party_capes: false,
            fetch_timeout: Duration::from_secs(10),
        }
    }
}
