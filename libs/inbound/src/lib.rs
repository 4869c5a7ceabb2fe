//! Inbound WhatsApp message normalization.
//!
//! The webhook dispatcher classifies each message object by kind and hands it
//! to one of the [`PayloadNormalizer`] operations, which returns the canonical
//! record the conversation engine consumes. Message ids come from an injected
//! [`MessageIdSource`] so tests can pin them.
pub mod config;
pub mod error;
pub mod ids;
pub mod message;
pub mod normalizer;
pub mod payload;

pub use config::{IdMode, NormalizerConfig};
pub use error::NormalizeError;
pub use ids::{MessageId, MessageIdSource, SequentialMessageIds, UuidMessageIds};
pub use message::{
    ImageMessage, InboundMessage, LocationMessage, MessageType, QuestionMessage, TextMessage,
};
pub use normalizer::PayloadNormalizer;
pub use payload::{
    ButtonReply, ImagePayload, InboundPayload, Interactive, InteractiveButtonReplyPayload,
    Location, LocationPayload, PayloadKind, TextBody, TextPayload,
};
