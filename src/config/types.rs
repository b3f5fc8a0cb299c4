use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Semantic configuration key a switch binds its value to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigKey {
    /// Path of the file handed over for rebuilding.
    InputFilepath,
    /// Path the rebuilt file is written to.
    OutputFilepath,
    /// Identifier of the file, used to correlate logs and reports.
    FileId,
}

impl ConfigKey {
    /// Every key, in registry order.
    pub const ALL: [ConfigKey; 3] = [
        ConfigKey::InputFilepath,
        ConfigKey::OutputFilepath,
        ConfigKey::FileId,
    ];

    /// Key name as seen by configuration consumers.
    pub const fn as_str(self) -> &'static str {
        match self {
            ConfigKey::InputFilepath => "InputFilepath",
            ConfigKey::OutputFilepath => "OutputFilepath",
            ConfigKey::FileId => "FileId",
        }
    }

    /// Look a key up by its exact name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration produced by binding the command line.
///
/// A field is `None` when its switch was not supplied. Values are kept as
/// given: paths are not checked for existence and ids are not validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResolvedConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_filepath: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_filepath: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
}

impl ResolvedConfig {
    /// Build from `(key, value)` pairs. Later pairs override earlier ones.
    pub fn from_pairs<I, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (ConfigKey, V)>,
        V: Into<String>,
    {
        let mut config = Self::default();
        for (key, value) in pairs {
            config.set(key, value.into());
        }
        config
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: ConfigKey, value: String) {
        match key {
            ConfigKey::InputFilepath => self.input_filepath = Some(PathBuf::from(value)),
            ConfigKey::OutputFilepath => self.output_filepath = Some(PathBuf::from(value)),
            ConfigKey::FileId => self.file_id = Some(value),
        }
    }

    /// Value bound to `key`, rendered as a string.
    pub fn get(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::InputFilepath => path_string(self.input_filepath.as_deref()),
            ConfigKey::OutputFilepath => path_string(self.output_filepath.as_deref()),
            ConfigKey::FileId => self.file_id.clone(),
        }
    }

    /// Keys whose switch was not supplied.
    pub fn missing_keys(&self) -> Vec<ConfigKey> {
        ConfigKey::ALL
            .into_iter()
            .filter(|key| self.get(*key).is_none())
            .collect()
    }
}

fn path_string(path: Option<&Path>) -> Option<String> {
    path.map(|p| p.to_string_lossy().into_owned())
}
