//! Game settings and preferences
//!
//! Read from a JSON file next to the binary. Every field has a default, so a
//! partial file (or none at all) is fine.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sim::TuningTable;

/// Settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Gestures ===
    /// Minimum time between two arm-raise events
    pub arm_cooldown_ms: u64,
    /// Minimum time between two reported finger counts
    pub finger_cooldown_ms: u64,

    // === Camera ===
    /// Device index passed to the capture backend
    pub camera_index: u32,
    /// Flip the frame horizontally before pose estimation
    pub mirror_camera: bool,
    /// Show the annotated camera window
    pub debug_window: bool,

    // === Simulation ===
    /// Fixed RNG seed. A fresh seed is drawn from the clock when absent.
    pub seed: Option<u64>,
    /// Difficulty balance table
    pub tuning: TuningTable,

    // === Landmark models ===
    pub models: ModelSettings,
}

/// Landmark model files and thresholds, used by the `models` feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Single-stage BlazePose landmark model, 39x5 landmark output
    pub pose_model: PathBuf,
    pub pose_input_size: u32,
    /// Minimum pose-presence score
    pub pose_threshold: f32,
    /// Hand landmark model, 21x3 landmark output
    pub hand_model: PathBuf,
    pub hand_input_size: u32,
    /// Minimum hand-presence score
    pub hand_threshold: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            pose_model: PathBuf::from("models/pose_landmark_full.onnx"),
            pose_input_size: 256,
            pose_threshold: 0.5,
            hand_model: PathBuf::from("models/hand_landmark.onnx"),
            hand_input_size: 224,
            hand_threshold: 0.5,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arm_cooldown_ms: 400,
            finger_cooldown_ms: 1000,

            camera_index: 0,
            mirror_camera: true,
            debug_window: true,

            seed: None,
            tuning: TuningTable::default(),

            models: ModelSettings::default(),
        }
    }
}

impl Settings {
    /// File looked up in the working directory when no path is given
    pub const DEFAULT_FILE: &'static str = "gesture-flap.json";

    pub fn arm_cooldown(&self) -> Duration {
        Duration::from_millis(self.arm_cooldown_ms)
    }

    pub fn finger_cooldown(&self) -> Duration {
        Duration::from_millis(self.finger_cooldown_ms)
    }

    /// Parse settings from JSON text
    pub fn from_json(json: &str, origin: &Path) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| Error::SettingsParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load settings from an explicit file. A missing file is an error here.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| Error::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json, path)?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, else from [`Self::DEFAULT_FILE`] if it
    /// exists, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let default_path = PathBuf::from(Self::DEFAULT_FILE);
        if default_path.exists() {
            Self::load(&default_path)
        } else {
            log::info!("using default settings");
            Ok(Self::default())
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| Error::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("settings saved to {}", path.display());
        Ok(())
    }
}
