//! Inbound event translation.
//!
//! A flat dispatch table from origin-event kind to handler function.
//! Handlers are plain functions over the event and its session; an
//! event with no registered handler is dropped with a debug log rather
//! than treated as an error.

mod block_entity;
mod despawn;
mod health;
mod player_list;
mod spawn_creature;

use std::collections::HashMap;
use std::sync::Arc;

use causeway_protocol::{OriginEvent, OriginEventKind};

use crate::session::Session;

/// One translator: inspects the event and emits commands on the
/// session's links.
pub type Handler = fn(&OriginEvent, &Arc<Session>);

/// Dispatch table keyed by event kind.
pub struct TranslatorRegistry {
    handlers: HashMap<OriginEventKind, Handler>,
}

impl TranslatorRegistry {
    /// An empty registry; see [`TranslatorRegistry::with_defaults`] for
    /// the full table.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// The full translation table.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(OriginEventKind::BlockEntityUpdate, block_entity::translate);
        registry.register(OriginEventKind::HealthUpdate, health::translate);
        registry.register(OriginEventKind::SpawnCreature, spawn_creature::translate);
        registry.register(OriginEventKind::PlayerListAdd, player_list::translate);
        registry.register(OriginEventKind::DestroyEntities, despawn::translate);
        registry
    }

    /// Replace the handler for one event kind.
    pub fn register(&mut self, kind: OriginEventKind, handler: Handler) {
        self.handlers.insert(kind, handler);
    }

    /// Route an event to its handler; unhandled kinds are dropped.
    pub fn dispatch(&self, event: &OriginEvent, session: &Arc<Session>) {
        match self.handlers.get(&event.kind()) {
            Some(handler) => handler(event, session),
            None => {
                tracing::debug!(kind = ?event.kind(), "No translator registered, dropping event");
            }
        }
    }
}

impl Default for TranslatorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::session::testing;

    #[test]
    fn defaults_cover_every_event_kind() {
        let registry = TranslatorRegistry::with_defaults();
        for kind in [
            OriginEventKind::BlockEntityUpdate,
            OriginEventKind::HealthUpdate,
            OriginEventKind::SpawnCreature,
            OriginEventKind::PlayerListAdd,
            OriginEventKind::DestroyEntities,
        ] {
            assert!(registry.handlers.contains_key(&kind), "missing {kind:?}");
        }
    }

    #[test]
    fn unregistered_kind_is_dropped() {
        let registry = TranslatorRegistry::new();
        let session = testing::session();
        // Must not panic or emit anything.
        registry.dispatch(
            &OriginEvent::HealthUpdate {
                health: 20.0,
                food: 20,
                saturation: 5.0,
            },
            &session,
        );
    }

    #[test]
    fn register_replaces_existing_handler() {
        fn noop(_: &OriginEvent, _: &Arc<Session>) {}

        let mut registry = TranslatorRegistry::with_defaults();
        registry.register(OriginEventKind::HealthUpdate, noop);
        assert_eq!(registry.handlers.len(), 5);
    }
}
