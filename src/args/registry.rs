//! Switch registry — single source of truth for all command-line switches.

use std::collections::btree_map::{self, BTreeMap};
use std::sync::OnceLock;

use crate::config::ConfigKey;

/// A single switch definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchDef {
    /// Switch token as typed on the command line (e.g., "-i").
    pub token: &'static str,
    /// Configuration key the following value is bound to.
    pub key: ConfigKey,
    /// Placeholder shown in help text.
    pub value_name: &'static str,
    /// Human-readable description (for help text).
    pub description: &'static str,
}

impl SwitchDef {
    /// Short letter of the switch (`'i'` for "-i").
    pub fn short(&self) -> Option<char> {
        let mut chars = self.token.strip_prefix('-')?.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

static SWITCH_REGISTRY: &[SwitchDef] = &[
    SwitchDef {
        token: "-i",
        key: ConfigKey::InputFilepath,
        value_name: "PATH",
        description: "Path of the file to rebuild",
    },
    SwitchDef {
        token: "-o",
        key: ConfigKey::OutputFilepath,
        value_name: "PATH",
        description: "Path the rebuilt file is written to",
    },
    SwitchDef {
        token: "-f",
        key: ConfigKey::FileId,
        value_name: "ID",
        description: "Identifier of the file being processed",
    },
];

/// The complete switch registry, in help order.
pub fn switch_registry() -> &'static [SwitchDef] {
    SWITCH_REGISTRY
}

/// Immutable association from switch token to configuration key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchMap {
    entries: BTreeMap<&'static str, ConfigKey>,
}

static SWITCH_MAP: OnceLock<SwitchMap> = OnceLock::new();

/// Process-wide switch mapping, built on first access.
pub fn get_mapping() -> &'static SwitchMap {
    SWITCH_MAP.get_or_init(|| SwitchMap::from_registry(switch_registry()))
}

impl SwitchMap {
    fn from_registry(defs: &[SwitchDef]) -> Self {
        let entries: BTreeMap<_, _> = defs.iter().map(|def| (def.token, def.key)).collect();
        debug_assert_eq!(entries.len(), defs.len(), "duplicate switch token");
        debug_assert!(
            ConfigKey::ALL
                .iter()
                .all(|key| entries.values().filter(|k| *k == key).count() == 1),
            "every configuration key needs exactly one switch"
        );
        Self { entries }
    }

    /// Configuration key for `token`, or `None` for switches outside the map.
    pub fn get(&self, token: &str) -> Option<ConfigKey> {
        self.entries.get(token).copied()
    }

    /// Switch token bound to `key`.
    pub fn switch_for(&self, key: ConfigKey) -> &'static str {
        // from_registry asserts every key has exactly one token.
        self.entries
            .iter()
            .find_map(|(token, k)| (*k == key).then_some(*token))
            .unwrap_or_default()
    }

    /// Resolve either a switch token ("-i") or a long key flag
    /// ("--InputFilepath") to its configuration key.
    pub fn resolve_flag(&self, flag: &str) -> Option<ConfigKey> {
        match flag.strip_prefix("--") {
            Some(name) => ConfigKey::from_name(name),
            None => self.get(flag),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by switch token.
    pub fn iter(&self) -> btree_map::Iter<'_, &'static str, ConfigKey> {
        self.entries.iter()
    }

    /// Plain string view: switch token → key name.
    pub fn to_string_map(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(token, key)| (token.to_string(), key.as_str().to_string()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a SwitchMap {
    type Item = (&'a &'static str, &'a ConfigKey);
    type IntoIter = btree_map::Iter<'a, &'static str, ConfigKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
