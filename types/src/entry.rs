//! The `Entry` value object - one conversational turn.
//!
//! Entries are immutable after construction: builder-style constructors,
//! private fields, accessor methods. Structured content is stored in its
//! serialized text form so the persisted shape (and the token cost) always
//! covers exactly what would be sent over the wire.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Role;

/// Content accepted when building an [`Entry`].
///
/// Plain text is stored as-is; structured values are serialized to their JSON
/// text form. [`Entry::content_value`] reverses the transformation on read.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Structured(Value),
}

impl Content {
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Content::Text(text) => text,
            Content::Structured(value) => value.to_string(),
        }
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<Value> for Content {
    fn from(value: Value) -> Self {
        Content::Structured(value)
    }
}

/// One conversational turn: role, optional content, and an open bag of
/// extension attributes.
///
/// Serializes as a single flat JSON object - `{"role": ..., "content": ...,
/// <extensions...>}` - which is the chat-message shape model endpoints
/// expect. Unknown fields on input collect into the extension bag, so new
/// roles and fields survive a round-trip without schema changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    content: Option<String>,
    #[serde(flatten)]
    extensions: Map<String, Value>,
}

impl Entry {
    /// An entry with no content, e.g. an assistant turn that only carries
    /// tool calls in its extensions.
    #[must_use]
    pub fn new(role: impl Into<Role>) -> Self {
        Self {
            role: role.into(),
            content: None,
            extensions: Map::new(),
        }
    }

    #[must_use]
    pub fn text(role: impl Into<Role>, content: impl Into<String>) -> Self {
        Self::new(role).with_content(content.into())
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<Content>) -> Self {
        self.content = Some(content.into().into_text());
        self
    }

    #[must_use]
    pub fn with_extension(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extensions.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn role(&self) -> &Role {
        &self.role
    }

    /// The stored (serialized) content text, if any.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// The content re-parsed to structured form where possible.
    ///
    /// Text that is not valid JSON comes back as a plain string value; this
    /// fallback is silent, not an error.
    #[must_use]
    pub fn content_value(&self) -> Option<Value> {
        self.content
            .as_ref()
            .map(|text| serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.clone())))
    }

    #[must_use]
    pub fn extensions(&self) -> &Map<String, Value> {
        &self.extensions
    }

    #[must_use]
    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{Content, Entry};
    use crate::Role;

    #[test]
    fn text_entry_has_plain_content() {
        let entry = Entry::text("user", "Hello.");
        assert_eq!(entry.role(), &Role::User);
        assert_eq!(entry.content(), Some("Hello."));
        assert!(entry.extensions().is_empty());
    }

    #[test]
    fn structured_content_is_stored_serialized() {
        let entry = Entry::new("tool").with_content(json!({"ok": true, "lines": [1, 2]}));
        let stored = entry.content().expect("content present");
        assert!(stored.starts_with('{'));
        assert_eq!(entry.content_value(), Some(json!({"ok": true, "lines": [1, 2]})));
    }

    #[test]
    fn content_value_falls_back_to_raw_text() {
        let entry = Entry::text("assistant", "not { json");
        assert_eq!(
            entry.content_value(),
            Some(Value::String("not { json".to_string()))
        );
    }

    #[test]
    fn content_value_none_when_absent() {
        let entry = Entry::new("assistant");
        assert_eq!(entry.content_value(), None);
    }

    #[test]
    fn serializes_as_flat_chat_message() {
        let entry = Entry::text("user", "hi");
        let value = serde_json::to_value(&entry).expect("serialize entry");
        assert_eq!(value, json!({"role": "user", "content": "hi"}));
    }

    #[test]
    fn content_key_omitted_when_absent() {
        let entry = Entry::new("assistant").with_extension("tool_calls", json!([{"id": "call_1"}]));
        let value = serde_json::to_value(&entry).expect("serialize entry");
        assert_eq!(
            value,
            json!({"role": "assistant", "tool_calls": [{"id": "call_1"}]})
        );
    }

    #[test]
    fn unknown_fields_deserialize_into_extensions() {
        let entry: Entry =
            serde_json::from_str(r#"{"role": "tool", "content": "42", "tool_call_id": "call_9"}"#)
                .expect("deserialize entry");
        assert_eq!(entry.role(), &Role::Tool);
        assert_eq!(entry.extension("tool_call_id"), Some(&json!("call_9")));
    }

    #[test]
    fn entry_round_trips_through_json() {
        let entry = Entry::text("assistant", "done")
            .with_extension("tool_call_id", json!("call_3"))
            .with_extension("annotations", json!([]));

        let json = serde_json::to_string(&entry).expect("serialize entry");
        let back: Entry = serde_json::from_str(&json).expect("deserialize entry");
        assert_eq!(back, entry);
    }

    #[test]
    fn extensions_keep_insertion_order() {
        let entry = Entry::new("assistant")
            .with_extension("zeta", json!(1))
            .with_extension("alpha", json!(2));
        let keys: Vec<&String> = entry.extensions().keys().collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn content_conversions() {
        assert_eq!(Content::from("x").into_text(), "x");
        assert_eq!(Content::from(json!([1, 2])).into_text(), "[1,2]");
    }
}
