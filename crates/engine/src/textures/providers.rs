//! Unofficial cape providers.
//!
//! A fixed priority list of third-party cape hosts. Each provider keys
//! its URLs differently, so the lookup identity varies per entry.

use causeway_domain::PlayerId;

/// How a provider keys its cape URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapeUrlKind {
    Username,
    UuidDashed,
    UuidUndashed,
}

/// One third-party cape host.
#[derive(Debug, Clone, Copy)]
pub struct CapeProvider {
    pub name: &'static str,
    template: &'static str,
    kind: CapeUrlKind,
}

impl CapeProvider {
    /// Build the lookup URL for the given player.
    pub fn url_for(&self, player_id: &PlayerId, username: &str) -> String {
        let key = match self.kind {
            CapeUrlKind::Username => username.to_owned(),
            CapeUrlKind::UuidDashed => player_id.dashed(),
            CapeUrlKind::UuidUndashed => player_id.undashed(),
        };
        self.template.replace("{}", &key)
    }
}

/// Providers in query order. The first success wins.
pub const CAPE_PROVIDERS: &[CapeProvider] = &[
    CapeProvider {
        name: "optifine",
        template: "http://s.optifine.net/capes/{}.png",
        kind: CapeUrlKind::Username,
    },
    CapeProvider {
        name: "labymod",
        template: "http://capes.labymod.net/capes/{}.png",
        kind: CapeUrlKind::UuidDashed,
    },
    CapeProvider {
        name: "fivezig",
        template: "http://textures.5zig.net/2/{}",
        kind: CapeUrlKind::UuidUndashed,
    },
    CapeProvider {
        name: "minecraftcapes",
        template: "https://www.minecraftcapes.co.uk/getCape/{}",
        kind: CapeUrlKind::UuidUndashed,
    },
];
