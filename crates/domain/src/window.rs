//! Modal form windows.
//!
//! A window is an opaque payload that serializes to the target
//! protocol's form-data encoding, tracked per session by an integer id
//! so a later client response can be correlated with it.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// A modal form request payload.
///
/// The payload is opaque to the registry; helpers below build the two
/// common shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormWindow {
    payload: serde_json::Value,
}

impl FormWindow {
    pub fn new(payload: serde_json::Value) -> Self {
        Self { payload }
    }

    /// A two-button modal dialog.
    pub fn modal(
        title: impl Into<String>,
        content: impl Into<String>,
        confirm: impl Into<String>,
        cancel: impl Into<String>,
    ) -> Self {
        Self::new(json!({
            "type": "modal",
            "title": title.into(),
            "content": content.into(),
            "button1": confirm.into(),
            "button2": cancel.into(),
        }))
    }

    /// A simple form with a list of labelled buttons.
    pub fn simple(
        title: impl Into<String>,
        content: impl Into<String>,
        buttons: Vec<String>,
    ) -> Self {
        let buttons: Vec<serde_json::Value> =
            buttons.into_iter().map(|text| json!({ "text": text })).collect();
        Self::new(json!({
            "type": "form",
            "title": title.into(),
            "content": content.into(),
            "buttons": buttons,
        }))
    }

    /// The target protocol's form-data encoding of this window.
    pub fn encode(&self) -> String {
        self.payload.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modal_encodes_to_form_data() {
        let window = FormWindow::modal("Title", "Body", "Yes", "No");
        let encoded = window.encode();
        assert!(encoded.contains("\"type\":\"modal\""));
        assert!(encoded.contains("\"button1\":\"Yes\""));
    }

    #[test]
    fn encode_is_stable_for_equal_windows() {
        let a = FormWindow::simple("T", "C", vec!["one".into()]);
        let b = FormWindow::simple("T", "C", vec!["one".into()]);
        assert_eq!(a.encode(), b.encode());
    }
}
