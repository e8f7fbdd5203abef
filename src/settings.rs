//! Operator preferences remembered between sessions.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::data::bubble::DEFAULT_HIGHLIGHT_BORDER;
use crate::error::{ExperimentError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Participant id used for the previous run; the next run suggests id + 1.
    pub last_participant_id: u32,
    pub log_path: PathBuf,
    pub highlight_border: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_participant_id: 0,
            log_path: PathBuf::from("pointingExperimentLog.csv"),
            highlight_border: DEFAULT_HIGHLIGHT_BORDER,
        }
    }
}

impl Settings {
    pub fn default_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").map_err(|_| ExperimentError::NoHomeDir)?;
        Ok(PathBuf::from(home).join(".bubble-pointing").join("settings.yaml"))
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_yaml(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Save to `~/.bubble-pointing/settings.yaml`.
    pub fn save_to_default_path(&self) -> Result<()> {
        let path = Self::default_path()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut f = fs::File::create(&path)?;
        f.write_all(self.to_yaml()?.as_bytes())?;
        Ok(())
    }

    /// Load from `~/.bubble-pointing/settings.yaml`, falling back to defaults
    /// when the file is missing or unreadable.
    pub fn load_or_default() -> Self {
        let path = match Self::default_path() {
            Ok(p) => p,
            Err(e) => {
                log::warn!("Using default settings: {e}");
                return Self::default();
            }
        };
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(&path)
            .map_err(ExperimentError::from)
            .and_then(|s| Self::from_yaml(&s))
        {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Ignoring settings file {:?}: {e}", path);
                Self::default()
            }
        }
    }
}
