//! Crate-wide error type
//!
//! Only setup failures surface as errors. Per-tick input problems (a dropped
//! camera frame, no pose in view) are absorbed by the detector.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open window: {0}")]
    Window(String),

    #[error("failed to open camera {index}: {reason}")]
    CameraOpen { index: u32, reason: String },

    #[error("failed to load landmark model {path}: {reason}")]
    Model { path: PathBuf, reason: String },

    #[error("landmark model {path} failed: {reason}")]
    Inference { path: PathBuf, reason: String },

    #[error("failed to read settings from {path}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings in {path}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode settings")]
    SettingsEncode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
