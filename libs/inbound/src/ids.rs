//! Message id sources injected into the normalizer.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier attached to every canonical message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for MessageId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Hands out a fresh id per call. Implementations own their uniqueness
/// guarantees; callers only rely on consecutive ids being distinct.
pub trait MessageIdSource: Send + Sync {
    fn next_id(&self) -> MessageId;
}

impl<T: MessageIdSource + ?Sized> MessageIdSource for &T {
    fn next_id(&self) -> MessageId {
        (**self).next_id()
    }
}

impl<T: MessageIdSource + ?Sized> MessageIdSource for Arc<T> {
    fn next_id(&self) -> MessageId {
        (**self).next_id()
    }
}

impl<T: MessageIdSource + ?Sized> MessageIdSource for Box<T> {
    fn next_id(&self) -> MessageId {
        (**self).next_id()
    }
}

/// Random v4 UUIDs, optionally namespaced as `{prefix}:{uuid}`.
///
/// ```
/// use gsm_inbound::{MessageIdSource, UuidMessageIds};
///
/// let ids = UuidMessageIds::with_prefix("wa");
/// assert!(ids.next_id().as_str().starts_with("wa:"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct UuidMessageIds {
    prefix: Option<String>,
}

impl UuidMessageIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

impl MessageIdSource for UuidMessageIds {
    fn next_id(&self) -> MessageId {
        let uuid = Uuid::new_v4();
        match &self.prefix {
            Some(prefix) => MessageId(format!("{prefix}:{uuid}")),
            None => MessageId(uuid.to_string()),
        }
    }
}

/// Deterministic `{prefix}-{n}` ids starting at 1; meant for tests and fixtures.
#[derive(Debug)]
pub struct SequentialMessageIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialMessageIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl MessageIdSource for SequentialMessageIds {
    fn next_id(&self) -> MessageId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        if self.prefix.is_empty() {
            MessageId(n.to_string())
        } else {
            MessageId(format!("{}-{n}", self.prefix))
        }
    }
}
