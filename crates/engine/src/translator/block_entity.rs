//! Block-entity payload pass-through.

use std::sync::Arc;

use causeway_protocol::{OriginEvent, TargetCommand};

use crate::session::Session;

/// Copy the structured payload verbatim upstream. Sent immediately:
/// block-entity data races visible chunk updates on the client.
pub fn translate(event: &OriginEvent, session: &Arc<Session>) {
    let OriginEvent::BlockEntityUpdate { position, payload } = event else {
        return;
    };

    session.upstream.send_immediately(TargetCommand::BlockEntityData {
        position: *position,
        payload: payload.clone(),
    });
}
