//! Mapping from classified WhatsApp payloads to canonical messages.
//!
//! Each operation validates the fields it reads, then draws exactly one id
//! from the injected [`MessageIdSource`]. A payload that fails validation
//! does not consume an id.

use std::sync::Arc;

use tracing::{instrument, trace};

use crate::config::NormalizerConfig;
use crate::error::NormalizeError;
use crate::ids::MessageIdSource;
use crate::message::{
    ImageMessage, InboundMessage, LocationMessage, MessageType, QuestionMessage, TextMessage,
};
use crate::payload::{
    ImagePayload, InboundPayload, InteractiveButtonReplyPayload, LocationPayload, PayloadKind,
    TextPayload,
};

const BUTTON_REPLY: &str = "button_reply";

/// Stateless converter from inbound payloads to canonical messages.
///
/// ```
/// use gsm_inbound::{MessageType, PayloadNormalizer, SequentialMessageIds, TextPayload};
///
/// let normalizer = PayloadNormalizer::new(SequentialMessageIds::new("msg"));
/// let payload: TextPayload = serde_json::from_value(serde_json::json!({
///     "from": "15551234567",
///     "text": {"body": "Hi"}
/// }))
/// .unwrap();
///
/// let message = normalizer.parse_text_message(payload).unwrap();
/// assert_eq!(message.message_type, MessageType::Text);
/// assert_eq!(message.text, "Hi");
/// assert_eq!(message.id.as_str(), "msg-1");
/// ```
#[derive(Debug)]
pub struct PayloadNormalizer<I = Box<dyn MessageIdSource>> {
    ids: I,
}

impl PayloadNormalizer<Box<dyn MessageIdSource>> {
    /// Builds a normalizer with the id source selected by `cfg`.
    pub fn from_config(cfg: &NormalizerConfig) -> Self {
        Self::new(cfg.id_source())
    }
}

impl<I> PayloadNormalizer<I>
where
    I: MessageIdSource,
{
    pub fn new(ids: I) -> Self {
        Self { ids }
    }

    /// Converts whichever payload kind the dispatcher classified.
    pub fn normalize(&self, payload: InboundPayload) -> Result<InboundMessage, NormalizeError> {
        match payload {
            InboundPayload::Text(p) => self.parse_text_message(p).map(Into::into),
            InboundPayload::Interactive(p) => {
                self.parse_interactive_button_message(p).map(Into::into)
            }
            InboundPayload::Location(p) => self.parse_location_message(p).map(Into::into),
            InboundPayload::Image(p) => self.parse_image_message(p).map(Into::into),
        }
    }

    #[instrument(name = "inbound.parse_text", level = "trace", skip_all)]
    pub fn parse_text_message(
        &self,
        payload: impl Into<Arc<TextPayload>>,
    ) -> Result<TextMessage, NormalizeError> {
        let payload = payload.into();
        let kind = PayloadKind::Text;
        let from = sender(payload.from.as_deref(), kind)?;
        let text = payload
            .text
            .as_ref()
            .ok_or_else(|| missing(kind, "text"))?
            .body
            .clone()
            .ok_or_else(|| missing(kind, "text.body"))?;

        let message = TextMessage {
            id: self.ids.next_id(),
            message_type: MessageType::Text,
            end_user_phone_number: from,
            text,
            payload,
        };
        trace!(id = %message.id, from = %message.end_user_phone_number, "normalized text message");
        Ok(message)
    }

    #[instrument(name = "inbound.parse_interactive_button", level = "trace", skip_all)]
    pub fn parse_interactive_button_message(
        &self,
        payload: impl Into<Arc<InteractiveButtonReplyPayload>>,
    ) -> Result<QuestionMessage, NormalizeError> {
        let payload = payload.into();
        let kind = PayloadKind::Interactive;
        let from = sender(payload.from.as_deref(), kind)?;
        let interactive = payload
            .interactive
            .as_ref()
            .ok_or_else(|| missing(kind, "interactive"))?;
        if let Some(found) = interactive.kind.as_deref() {
            if found != BUTTON_REPLY {
                return Err(NormalizeError::UnsupportedInteractive {
                    found: found.to_string(),
                });
            }
        }
        let reply = interactive
            .button_reply
            .as_ref()
            .ok_or_else(|| missing(kind, "interactive.button_reply"))?;
        let option_id = reply
            .id
            .clone()
            .ok_or_else(|| missing(kind, "interactive.button_reply.id"))?;
        let option_text = reply
            .title
            .clone()
            .ok_or_else(|| missing(kind, "interactive.button_reply.title"))?;

        let message = QuestionMessage {
            id: self.ids.next_id(),
            message_type: MessageType::Question,
            end_user_phone_number: from,
            option_id,
            option_text,
            payload,
        };
        trace!(
            id = %message.id,
            from = %message.end_user_phone_number,
            option_id = %message.option_id,
            "normalized button reply"
        );
        Ok(message)
    }

    #[instrument(name = "inbound.parse_location", level = "trace", skip_all)]
    pub fn parse_location_message(
        &self,
        payload: impl Into<Arc<LocationPayload>>,
    ) -> Result<LocationMessage, NormalizeError> {
        let payload = payload.into();
        let kind = PayloadKind::Location;
        let from = sender(payload.from.as_deref(), kind)?;
        let location = payload
            .location
            .clone()
            .ok_or_else(|| missing(kind, "location"))?;

        let message = LocationMessage {
            id: self.ids.next_id(),
            message_type: MessageType::Location,
            end_user_phone_number: from,
            location,
            payload,
        };
        trace!(id = %message.id, from = %message.end_user_phone_number, "normalized location message");
        Ok(message)
    }

    #[instrument(name = "inbound.parse_image", level = "trace", skip_all)]
    pub fn parse_image_message(
        &self,
        payload: impl Into<Arc<ImagePayload>>,
    ) -> Result<ImageMessage, NormalizeError> {
        let payload = payload.into();
        let kind = PayloadKind::Image;
        let from = sender(payload.from.as_deref(), kind)?;
        let image_id = payload.id.clone().ok_or_else(|| missing(kind, "id"))?;

        let message = ImageMessage {
            id: self.ids.next_id(),
            message_type: MessageType::Image,
            end_user_phone_number: from,
            image_id,
            payload,
        };
        trace!(
            id = %message.id,
            from = %message.end_user_phone_number,
            image_id = %message.image_id,
            "normalized image message"
        );
        Ok(message)
    }
}

fn sender(from: Option<&str>, kind: PayloadKind) -> Result<String, NormalizeError> {
    from.map(str::to_string).ok_or_else(|| missing(kind, "from"))
}

fn missing(kind: PayloadKind, field: &'static str) -> NormalizeError {
    NormalizeError::MalformedPayload { kind, field }
}
