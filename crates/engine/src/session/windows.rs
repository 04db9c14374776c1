//! Modal-window registry.
//!
//! Tracks the forms shown to a session's client by integer id so a
//! later response can be correlated. Ids are allocated as "current
//! registry size + 1" unless supplied explicitly. Entries are never
//! proactively removed here; if a removal path is ever added the
//! allocator can recycle a live id (documented, not fixed).

use std::collections::HashMap;
use std::sync::Mutex;

use causeway_domain::{FormId, FormWindow};
use causeway_protocol::TargetCommand;

use crate::link::TargetLink;

/// Per-session registry of modal form windows.
pub struct WindowCache {
    upstream: TargetLink,
    windows: Mutex<HashMap<FormId, FormWindow>>,
}

impl WindowCache {
    pub fn new(upstream: TargetLink) -> Self {
        Self {
            upstream,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Register a window under the next allocated id.
    pub fn add_window(&self, window: FormWindow) -> FormId {
        let mut windows = self.lock();
        let id = FormId::new(windows.len() as i32 + 1);
        windows.insert(id, window);
        id
    }

    /// Register a window under an explicit id.
    pub fn add_window_with_id(&self, window: FormWindow, id: FormId) {
        self.lock().insert(id, window);
    }

    /// Send a window to the client and register it under the next
    /// allocated id.
    pub fn show_window(&self, window: FormWindow) -> FormId {
        let mut windows = self.lock();
        let id = FormId::new(windows.len() as i32 + 1);
        self.send_form(id, &window);
        windows.insert(id, window);
        id
    }

    /// Send a window to the client and register it under an explicit id.
    pub fn show_window_with_id(&self, window: FormWindow, id: FormId) {
        self.send_form(id, &window);
        self.lock().insert(id, window);
    }

    /// Re-send a previously registered window. Unknown ids are a
    /// silent no-op.
    pub fn show_registered(&self, id: FormId) {
        let windows = self.lock();
        if let Some(window) = windows.get(&id) {
            self.send_form(id, window);
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn send_form(&self, id: FormId, window: &FormWindow) {
        self.upstream.send(TargetCommand::ModalFormRequest {
            form_id: id,
            form_data: window.encode(),
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<FormId, FormWindow>> {
        self.windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::Outbound;

    fn cache() -> (WindowCache, tokio::sync::mpsc::UnboundedReceiver<Outbound>) {
        let (upstream, rx) = TargetLink::channel();
        (WindowCache::new(upstream), rx)
    }

    fn window(text: &str) -> FormWindow {
        FormWindow::modal("Title", text, "Yes", "No")
    }

    #[test]
    fn show_window_allocates_sequential_ids() {
        let (cache, mut rx) = cache();

        let first = cache.show_window(window("one"));
        let second = cache.show_window(window("two"));
        assert_eq!(first, FormId::new(1));
        assert_eq!(second, FormId::new(2));

        for expected in [FormId::new(1), FormId::new(2)] {
            match rx.try_recv().expect("form command sent").command() {
                TargetCommand::ModalFormRequest { form_id, .. } => {
                    assert_eq!(*form_id, expected);
                }
                other => panic!("unexpected command {other:?}"),
            }
        }
    }

    #[test]
    fn show_registered_unknown_id_is_silent_noop() {
        let (cache, mut rx) = cache();
        cache.show_window(window("one"));
        let _ = rx.try_recv();

        cache.show_registered(FormId::new(99));
        assert!(rx.try_recv().is_err(), "no command should have been sent");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn show_registered_resends_payload() {
        let (cache, mut rx) = cache();
        let id = cache.show_window(window("one"));
        let first = rx.try_recv().expect("initial send");

        cache.show_registered(id);
        let second = rx.try_recv().expect("re-send");
        assert_eq!(first.command(), second.command());
    }

    #[test]
    fn add_window_registers_without_sending() {
        let (cache, mut rx) = cache();
        let id = cache.add_window(window("one"));
        assert_eq!(id, FormId::new(1));
        assert!(rx.try_recv().is_err());
    }
}
