use std::env;

use crate::ids::{MessageIdSource, SequentialMessageIds, UuidMessageIds};

/// How message ids are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdMode {
    #[default]
    Uuid,
    Sequential,
}

/// Normalizer settings, usually read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizerConfig {
    pub id_prefix: Option<String>,
    pub id_mode: IdMode,
}

impl NormalizerConfig {
    /// Reads `INBOUND_MSG_ID_PREFIX` and `INBOUND_MSG_ID_MODE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let id_prefix = lookup("INBOUND_MSG_ID_PREFIX")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let id_mode = lookup("INBOUND_MSG_ID_MODE")
            .map(|v| match v.to_lowercase().as_str() {
                "seq" | "sequential" => IdMode::Sequential,
                _ => IdMode::Uuid,
            })
            .unwrap_or_default();
        Self { id_prefix, id_mode }
    }

    pub fn id_source(&self) -> Box<dyn MessageIdSource> {
        match (self.id_mode, &self.id_prefix) {
            (IdMode::Uuid, Some(prefix)) => Box::new(UuidMessageIds::with_prefix(prefix.clone())),
            (IdMode::Uuid, None) => Box::new(UuidMessageIds::new()),
            (IdMode::Sequential, prefix) => Box::new(SequentialMessageIds::new(
                prefix.clone().unwrap_or_default(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_bare_uuids() {
        let cfg = NormalizerConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg, NormalizerConfig::default());
        assert!(!cfg.id_source().next_id().as_str().contains(':'));
    }

    #[test]
    fn blank_prefix_is_ignored() {
        let cfg = NormalizerConfig::from_lookup(lookup(&[("INBOUND_MSG_ID_PREFIX", "  ")]));
        assert_eq!(cfg.id_prefix, None);
    }

    #[test]
    fn sequential_mode_with_prefix() {
        let cfg = NormalizerConfig::from_lookup(lookup(&[
            ("INBOUND_MSG_ID_PREFIX", "wa"),
            ("INBOUND_MSG_ID_MODE", "Sequential"),
        ]));
        assert_eq!(cfg.id_mode, IdMode::Sequential);
        let ids = cfg.id_source();
        assert_eq!(ids.next_id().as_str(), "wa-1");
        assert_eq!(ids.next_id().as_str(), "wa-2");
    }

    #[test]
    fn uuid_mode_with_prefix() {
        let cfg = NormalizerConfig::from_lookup(lookup(&[("INBOUND_MSG_ID_PREFIX", "wa")]));
        assert!(cfg.id_source().next_id().as_str().starts_with("wa:"));
    }
}
