//! Application state and composition.
//!
//! The [`App`] wires the process-wide pieces once: configuration, the
//! texture service with its HTTP fetcher, and the translation table.
//! Sessions are opened from it and share those pieces by handle.

use std::sync::Arc;

use tokio::sync::mpsc;

use causeway_protocol::{OriginCommand, OriginEvent};

use crate::clock::{Clock, SystemClock};
use crate::config::BridgeConfig;
use crate::link::{OriginLink, Outbound, TargetLink};
use crate::session::Session;
use crate::textures::{HttpTextureFetcher, TextureService};
use crate::translator::TranslatorRegistry;

/// Process-wide state shared by every session.
pub struct App {
    pub config: BridgeConfig,
    pub textures: Arc<TextureService>,
    translators: TranslatorRegistry,
}

/// A freshly opened session plus the channel ends its transports
/// consume and feed.
pub struct SessionChannels {
    pub session: Arc<Session>,
    /// Receiver of commands bound for the client device.
    pub upstream_rx: mpsc::UnboundedReceiver<Outbound>,
    /// Receiver of commands bound for the backend server.
    pub downstream_rx: mpsc::UnboundedReceiver<OriginCommand>,
}

impl App {
    pub fn new(config: BridgeConfig) -> Self {
        let fetcher = Arc::new(HttpTextureFetcher::new(config.fetch_timeout));
        Self::with_parts(config, fetcher, Arc::new(SystemClock::new()))
    }

    /// Composition with explicit collaborators.
    pub fn with_parts(
        config: BridgeConfig,
        fetcher: Arc<dyn crate::textures::TextureFetcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let textures = TextureService::new(fetcher, clock, config.clone());
        Self {
            config,
            textures,
            translators: TranslatorRegistry::with_defaults(),
        }
    }

    /// Open a session sharing this app's texture service.
    pub fn open_session(&self) -> SessionChannels {
        let (upstream, upstream_rx) = TargetLink::channel();
        let (downstream, downstream_rx) = OriginLink::channel();
        let session = Session::new(upstream, downstream, Arc::clone(&self.textures));
        SessionChannels {
            session,
            upstream_rx,
            downstream_rx,
        }
    }

    /// Drive one session: dispatch inbound events in arrival order
    /// until the event stream closes.
    pub async fn run_session(
        &self,
        session: Arc<Session>,
        mut events: mpsc::UnboundedReceiver<OriginEvent>,
    ) {
        while let Some(event) = events.recv().await {
            self.translators.dispatch(&event, &session);
        }
        tracing::info!("Session event stream closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use causeway_domain::{
        CreatureKind, Entity, OriginEntityId, PlayerEntity, PlayerId, PlayerProfile, Vector3f,
    };
    use causeway_protocol::{BlockPosition, TargetCommand};

    use crate::textures::fetch::MockTextureFetcher;

    fn test_app() -> App {
        App::with_parts(
            BridgeConfig::default(),
            Arc::new(MockTextureFetcher::new()),
            Arc::new(SystemClock::new()),
        )
    }

    #[tokio::test]
    async fn events_dispatch_in_arrival_order() {
        let app = test_app();
        let SessionChannels {
            session,
            mut upstream_rx,
            ..
        } = app.open_session();

        let entity = Entity::new(
            OriginEntityId::new(1),
            session.entities.next_id(),
            CreatureKind::Player,
            Vector3f::ZERO,
            Vector3f::ZERO,
            Vector3f::ZERO,
        );
        session.set_player(PlayerEntity::new(
            entity,
            PlayerProfile::new(PlayerId::new(), "steve"),
        ));

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        events_tx
            .send(OriginEvent::BlockEntityUpdate {
                position: BlockPosition::new(0, 64, 0),
                payload: serde_json::json!({"id": "sign"}),
            })
            .expect("channel open");
        events_tx
            .send(OriginEvent::HealthUpdate {
                health: 17.0,
                food: 20,
                saturation: 5.0,
            })
            .expect("channel open");
        drop(events_tx);

        app.run_session(Arc::clone(&session), events_rx).await;

        let first = upstream_rx.try_recv().expect("block entity forwarded");
        assert!(matches!(
            first.command(),
            TargetCommand::BlockEntityData { .. }
        ));
        let second = upstream_rx.try_recv().expect("health forwarded");
        assert_eq!(second.command(), &TargetCommand::SetHealth { health: 17 });
    }

    #[tokio::test]
    async fn sessions_share_one_texture_service() {
        let app = test_app();
        let a = app.open_session();
        let b = app.open_session();
        assert!(Arc::ptr_eq(&a.session.textures, &b.session.textures));
    }
}
