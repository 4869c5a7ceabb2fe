use thiserror::Error;

use crate::payload::PayloadKind;

/// Failure to turn an inbound payload into a canonical message.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// A field the mapping reads is absent. `field` is the dotted path
    /// inside the payload, e.g. `interactive.button_reply.id`.
    #[error("malformed {kind} payload: missing `{field}`")]
    MalformedPayload {
        kind: PayloadKind,
        field: &'static str,
    },
    /// Interactive reply of a sub-type other than `button_reply`.
    #[error("unsupported interactive reply type `{found}`, expected `button_reply`")]
    UnsupportedInteractive { found: String },
    #[error("failed to decode {kind} payload")]
    Decode {
        kind: PayloadKind,
        #[source]
        source: serde_json::Error,
    },
}

impl NormalizeError {
    /// Stable machine-readable code, suitable for DLQ entries.
    pub fn code(&self) -> &'static str {
        match self {
            NormalizeError::MalformedPayload { .. } => "E_MALFORMED_PAYLOAD",
            NormalizeError::UnsupportedInteractive { .. } => "E_UNSUPPORTED_INTERACTIVE",
            NormalizeError::Decode { .. } => "E_DECODE",
        }
    }

    /// Payload path of the missing field, when the error is about one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            NormalizeError::MalformedPayload { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_message_names_kind_and_path() {
        let err = NormalizeError::MalformedPayload {
            kind: PayloadKind::Text,
            field: "text.body",
        };
        assert_eq!(err.to_string(), "malformed text payload: missing `text.body`");
        assert_eq!(err.code(), "E_MALFORMED_PAYLOAD");
        assert_eq!(err.field(), Some("text.body"));
    }

    #[test]
    fn unsupported_interactive_has_no_field() {
        let err = NormalizeError::UnsupportedInteractive {
            found: "list_reply".into(),
        };
        assert_eq!(err.code(), "E_UNSUPPORTED_INTERACTIVE");
        assert_eq!(err.field(), None);
        assert!(err.to_string().contains("list_reply"));
    }
}
