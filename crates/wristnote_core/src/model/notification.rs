//! Notification record model.
//!
//! # Responsibility
//! - Hold the fields the presentation layer reads (`title`, `src`, `body`).
//! - Carry every other caller-supplied field through untouched.
//!
//! # Invariants
//! - `title` defaults to `"Untitled"`, `src` and `body` default to `""`.
//! - Reserved keys (`t`, `id`, `title`, `src`, `body`) never appear in `extras`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-assigned notification key.
pub type NotificationId = i64;

/// Title used when the companion omits one.
pub const DEFAULT_TITLE: &str = "Untitled";
/// Source tag selecting the incoming-call layout and ringing.
pub const CALL_SOURCE: &str = "call";

const RESERVED_KEYS: &[&str] = &["t", "id", "title", "src", "body"];

/// Pending notification as delivered by the companion device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecordWire")]
pub struct NotificationRecord {
    id: NotificationId,
    title: String,
    src: String,
    body: String,
    /// Opaque extra fields (phone number, sender, ...). Flattened on the wire.
    #[serde(flatten)]
    extras: Map<String, Value>,
}

/// Deserialization shape; reserved keys are dropped from `extras` on the
/// way into [`NotificationRecord`].
#[derive(Deserialize)]
struct RecordWire {
    id: NotificationId,
    #[serde(default = "default_title")]
    title: String,
    #[serde(default)]
    src: String,
    #[serde(default)]
    body: String,
    #[serde(flatten)]
    extras: Map<String, Value>,
}

impl From<RecordWire> for NotificationRecord {
    fn from(wire: RecordWire) -> Self {
        let RecordWire {
            id,
            title,
            src,
            body,
            mut extras,
        } = wire;
        extras.retain(|key, _| !is_reserved(key));
        Self {
            id,
            title,
            src,
            body,
            extras,
        }
    }
}

/// Field-level decoding failure for [`NotificationRecord::from_fields`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFieldError {
    NotAString { field: &'static str },
}

impl Display for RecordFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAString { field } => write!(f, "field `{field}` must be a string"),
        }
    }
}

impl Error for RecordFieldError {}

impl NotificationRecord {
    /// Creates a record with all display fields at their defaults.
    pub fn new(id: NotificationId) -> Self {
        Self {
            id,
            title: default_title(),
            src: String::new(),
            body: String::new(),
            extras: Map::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_src(mut self, src: impl Into<String>) -> Self {
        self.src = src.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Attaches one opaque field. Reserved keys are ignored.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if !is_reserved(&key) {
            self.extras.insert(key, value);
        }
        self
    }

    /// Builds a record from the remaining fields of a decoded command.
    ///
    /// `title`, `src` and `body` must be strings when present; everything
    /// else that is not a reserved key is kept in `extras`.
    ///
    /// # Errors
    /// - Returns `NotAString` when a display field has a non-string value.
    pub fn from_fields(
        id: NotificationId,
        mut fields: Map<String, Value>,
    ) -> Result<Self, RecordFieldError> {
        let mut record = Self::new(id);
        if let Some(title) = take_string(&mut fields, "title")? {
            record.title = title;
        }
        if let Some(src) = take_string(&mut fields, "src")? {
            record.src = src;
        }
        if let Some(body) = take_string(&mut fields, "body")? {
            record.body = body;
        }
        fields.retain(|key, _| !is_reserved(key));
        record.extras = fields;
        Ok(record)
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn extras(&self) -> &Map<String, Value> {
        &self.extras
    }

    /// Returns one opaque field supplied by the caller.
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extras.get(key)
    }

    /// Whether this record should ring and use the call layout.
    pub fn is_call(&self) -> bool {
        self.src == CALL_SOURCE
    }
}

fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn take_string(
    fields: &mut Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, RecordFieldError> {
    match fields.remove(field) {
        None => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(_) => Err(RecordFieldError::NotAString { field }),
    }
}
