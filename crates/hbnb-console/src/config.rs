use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use hbnb_store::DEFAULT_SNAPSHOT;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "hbnb.toml";

/// What to do when the snapshot exists but cannot be parsed at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorruptSnapshotPolicy {
    /// Refuse to start.
    #[default]
    Abort,
    /// Move the bad snapshot aside and start with an empty index.
    StartEmpty,
}

/// Console configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Location of the JSON snapshot.
    pub snapshot_path: PathBuf,
    /// Prompt written before each command.
    pub prompt: String,
    pub on_corrupt_snapshot: CorruptSnapshotPolicy,
    pub clean: CleanConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT),
            prompt: "(hbnb) ".into(),
            on_corrupt_snapshot: CorruptSnapshotPolicy::default(),
            clean: CleanConfig::default(),
        }
    }
}

/// Settings for pruning deployment archives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    /// Local directory holding archive artifacts.
    pub versions_dir: PathBuf,
    /// Release directory on each remote host.
    pub releases_dir: String,
    /// Only remote entries containing this marker are considered archives.
    pub archive_marker: String,
    /// Remote hosts, as accepted by `ssh`.
    pub hosts: Vec<String>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            versions_dir: PathBuf::from("versions"),
            releases_dir: "/data/web_static/releases".into(),
            archive_marker: "web_static_".into(),
            hosts: Vec::new(),
        }
    }
}

impl ConsoleConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load a config file that must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(config = %path.display(), "loaded config");
        Self::from_toml_str(&text, path)
    }

    /// Load `explicit` if given, else `hbnb.toml` in the working directory if
    /// present, else the defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let path = Path::new(DEFAULT_CONFIG_FILE);
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text, path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
