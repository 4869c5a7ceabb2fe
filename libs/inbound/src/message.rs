//! Canonical messages consumed by the conversation engine.
//!
//! Every record keeps an `Arc` to the payload it was built from, so consumers
//! can reach fields the canonical shape does not surface.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ids::MessageId;
use crate::payload::{
    ImagePayload, InteractiveButtonReplyPayload, Location, LocationPayload, TextPayload,
};

/// Discriminator the engine switches on.
///
/// ```
/// use gsm_inbound::MessageType;
///
/// assert_eq!(MessageType::Question.as_str(), "QUESTION");
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    Text,
    Question,
    Location,
    Image,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "TEXT",
            MessageType::Question => "QUESTION",
            MessageType::Location => "LOCATION",
            MessageType::Image => "IMAGE",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextMessage {
    pub id: MessageId,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub end_user_phone_number: String,
    pub text: String,
    pub payload: Arc<TextPayload>,
}

/// Option picked from an interactive prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionMessage {
    pub id: MessageId,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub end_user_phone_number: String,
    pub option_id: String,
    pub option_text: String,
    pub payload: Arc<InteractiveButtonReplyPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocationMessage {
    pub id: MessageId,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub end_user_phone_number: String,
    pub location: Location,
    pub payload: Arc<LocationPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageMessage {
    pub id: MessageId,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub end_user_phone_number: String,
    pub image_id: String,
    pub payload: Arc<ImagePayload>,
}

/// Any canonical message. Serializes as the inner record, which carries its
/// own `type` field.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum InboundMessage {
    Text(TextMessage),
    Question(QuestionMessage),
    Location(LocationMessage),
    Image(ImageMessage),
}

impl InboundMessage {
    pub fn id(&self) -> &MessageId {
        match self {
            InboundMessage::Text(m) => &m.id,
            InboundMessage::Question(m) => &m.id,
            InboundMessage::Location(m) => &m.id,
            InboundMessage::Image(m) => &m.id,
        }
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            InboundMessage::Text(m) => m.message_type,
            InboundMessage::Question(m) => m.message_type,
            InboundMessage::Location(m) => m.message_type,
            InboundMessage::Image(m) => m.message_type,
        }
    }

    pub fn end_user_phone_number(&self) -> &str {
        match self {
            InboundMessage::Text(m) => &m.end_user_phone_number,
            InboundMessage::Question(m) => &m.end_user_phone_number,
            InboundMessage::Location(m) => &m.end_user_phone_number,
            InboundMessage::Image(m) => &m.end_user_phone_number,
        }
    }
}

impl From<TextMessage> for InboundMessage {
    fn from(value: TextMessage) -> Self {
        InboundMessage::Text(value)
    }
}

impl From<QuestionMessage> for InboundMessage {
    fn from(value: QuestionMessage) -> Self {
        InboundMessage::Question(value)
    }
}

impl From<LocationMessage> for InboundMessage {
    fn from(value: LocationMessage) -> Self {
        InboundMessage::Location(value)
    }
}

impl From<ImageMessage> for InboundMessage {
    fn from(value: ImageMessage) -> Self {
        InboundMessage::Image(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_type_wire_names() {
        for ty in [
            MessageType::Text,
            MessageType::Question,
            MessageType::Location,
            MessageType::Image,
        ] {
            assert_eq!(serde_json::to_value(ty).unwrap(), json!(ty.as_str()));
        }
    }

    #[test]
    fn text_message_uses_camel_case_fields() {
        let payload = Arc::new(TextPayload {
            from: Some("1555".into()),
            ..Default::default()
        });
        let message = TextMessage {
            id: MessageId::new("m-1"),
            message_type: MessageType::Text,
            end_user_phone_number: "1555".into(),
            text: "Hi".into(),
            payload,
        };
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["type"], "TEXT");
        assert_eq!(value["endUserPhoneNumber"], "1555");
        assert_eq!(value["payload"], json!({"from": "1555"}));
    }

    #[test]
    fn inbound_message_serializes_untagged() {
        let message = InboundMessage::from(ImageMessage {
            id: MessageId::new("m-2"),
            message_type: MessageType::Image,
            end_user_phone_number: "1555".into(),
            image_id: "media_42".into(),
            payload: Arc::new(ImagePayload::default()),
        });
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["imageId"], "media_42");
        assert_eq!(value["type"], "IMAGE");
        assert_eq!(message.message_type(), MessageType::Image);
        assert_eq!(message.id().as_str(), "m-2");
    }
}
