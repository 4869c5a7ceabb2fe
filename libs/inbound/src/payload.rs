//! Inbound WhatsApp message objects, as handed over by the webhook dispatcher.
//!
//! Fields the normalizer requires are optional here so that an incomplete
//! message surfaces as a [`NormalizeError`](crate::NormalizeError) naming the
//! missing path instead of a serde failure. Anything not modelled explicitly
//! lands in `extra`, so a payload serializes back without losing fields.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::NormalizeError;

/// Kind of inbound payload, as classified by the dispatcher.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PayloadKind {
    Text,
    Interactive,
    Location,
    Image,
}

impl PayloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadKind::Text => "text",
            PayloadKind::Interactive => "interactive",
            PayloadKind::Location => "location",
            PayloadKind::Image => "image",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain text message.
///
/// ```
/// use gsm_inbound::TextPayload;
///
/// let payload: TextPayload = serde_json::from_value(serde_json::json!({
///     "from": "15551234567",
///     "text": {"body": "Hi"}
/// }))
/// .unwrap();
/// assert_eq!(payload.text.and_then(|t| t.body).as_deref(), Some("Hi"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TextPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextBody>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TextBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Reply to an interactive prompt. Only button replies are normalized.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InteractiveButtonReplyPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactive: Option<Interactive>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Interactive {
    /// Interactive sub-type (`button_reply`, `list_reply`, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_reply: Option<ButtonReply>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ButtonReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Shared location pin.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LocationPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Geo coordinates, passed through to the canonical record untouched.
/// Coordinates stay JSON numbers so `1` does not come back as `1.0`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub latitude: Number,
    pub longitude: Number,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Location {
    pub fn new(latitude: impl Into<Number>, longitude: impl Into<Number>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
            name: None,
            address: None,
            url: None,
            extra: BTreeMap::new(),
        }
    }

    /// Coordinates as `(latitude, longitude)` degrees.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude.as_f64()?, self.longitude.as_f64()?))
    }
}

/// Image message; `id` references the media object for later download.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImagePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One inbound message, already classified by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundPayload {
    Text(TextPayload),
    Interactive(InteractiveButtonReplyPayload),
    Location(LocationPayload),
    Image(ImagePayload),
}

impl InboundPayload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            InboundPayload::Text(_) => PayloadKind::Text,
            InboundPayload::Interactive(_) => PayloadKind::Interactive,
            InboundPayload::Location(_) => PayloadKind::Location,
            InboundPayload::Image(_) => PayloadKind::Image,
        }
    }

    /// Decodes a message object of the given kind.
    pub fn from_json(kind: PayloadKind, value: &Value) -> Result<Self, NormalizeError> {
        let decode = |source| NormalizeError::Decode { kind, source };
        Ok(match kind {
            PayloadKind::Text => {
                InboundPayload::Text(TextPayload::deserialize(value).map_err(decode)?)
            }
            PayloadKind::Interactive => InboundPayload::Interactive(
                InteractiveButtonReplyPayload::deserialize(value).map_err(decode)?,
            ),
            PayloadKind::Location => {
                InboundPayload::Location(LocationPayload::deserialize(value).map_err(decode)?)
            }
            PayloadKind::Image => {
                InboundPayload::Image(ImagePayload::deserialize(value).map_err(decode)?)
            }
        })
    }

    /// Decodes raw JSON bytes of the given kind.
    pub fn from_slice(kind: PayloadKind, bytes: &[u8]) -> Result<Self, NormalizeError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|source| NormalizeError::Decode { kind, source })?;
        Self::from_json(kind, &value)
    }
}
