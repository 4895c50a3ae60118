//! ONNX Runtime landmark estimators (feature `models`)
//!
//! Each estimator wraps one single-stage landmark model run over the
//! letterboxed frame. Output 0 carries the landmarks, output 1 the presence
//! score.

use std::path::{Path, PathBuf};

use ndarray::Array4;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Tensor;

use super::frame::Frame;
use super::landmarks::{HandEstimator, HandLandmarks, PoseEstimator, PoseLandmarks};
use super::model_input::{Letterbox, decode_hand, decode_pose, letterbox_rgb};
use crate::error::{Error, Result};
use crate::settings::ModelSettings;

struct LandmarkModel {
    session: Session,
    input_size: u32,
    path: PathBuf,
}

/// Raw model outputs for one frame
struct Inference {
    coords: Vec<f32>,
    presence: f32,
    letterbox: Letterbox,
}

impl LandmarkModel {
    fn load(path: &Path, input_size: u32) -> Result<Self> {
        let model_err = |err: ort::Error| Error::Model {
            path: path.to_path_buf(),
            reason: err.to_string(),
        };
        let session = Session::builder()
            .map_err(model_err)?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(model_err)?
            .with_intra_threads(2)
            .map_err(model_err)?
            .commit_from_file(path)
            .map_err(model_err)?;

        log::info!("loaded landmark model {} ({input_size}px)", path.display());
        Ok(Self {
            session,
            input_size,
            path: path.to_path_buf(),
        })
    }

    fn infer(&mut self, frame: &Frame) -> Result<Inference> {
        let inference_err = |reason: String| Error::Inference {
            path: self.path.clone(),
            reason,
        };
        let (data, letterbox) = letterbox_rgb(frame, self.input_size);
        let n = self.input_size as usize;
        let input = Array4::<f32>::from_shape_vec((1, n, n, 3), data)
            .map_err(|err| inference_err(err.to_string()))?;
        let tensor = Tensor::from_array(input).map_err(|err| inference_err(err.to_string()))?;

        let outputs = self
            .session
            .run(ort::inputs![tensor])
            .map_err(|err| inference_err(err.to_string()))?;
        if outputs.len() < 2 {
            return Err(inference_err(format!("expected 2 outputs, got {}", outputs.len())));
        }

        let coords = outputs[0]
            .try_extract_array::<f32>()
            .map_err(|err| inference_err(err.to_string()))?
            .iter()
            .copied()
            .collect();
        let presence = outputs[1]
            .try_extract_array::<f32>()
            .ok()
            .and_then(|arr| arr.iter().next().copied())
            .unwrap_or(0.0);

        Ok(Inference {
            coords,
            presence,
            letterbox,
        })
    }
}

/// Body pose landmark model (33-point BlazePose topology)
pub struct OnnxPoseEstimator {
    model: LandmarkModel,
    threshold: f32,
}

impl OnnxPoseEstimator {
    pub fn load(settings: &ModelSettings) -> Result<Self> {
        Ok(Self {
            model: LandmarkModel::load(&settings.pose_model, settings.pose_input_size)?,
            threshold: settings.pose_threshold,
        })
    }
}

impl PoseEstimator for OnnxPoseEstimator {
    fn estimate(&mut self, frame: &Frame) -> Option<PoseLandmarks> {
        match self.model.infer(frame) {
            Ok(out) => decode_pose(&out.coords, out.presence, self.threshold, &out.letterbox),
            Err(err) => {
                log::warn!("pose estimation failed: {err}");
                None
            }
        }
    }
}

/// 21-point hand landmark model
pub struct OnnxHandEstimator {
    model: LandmarkModel,
    threshold: f32,
}

impl OnnxHandEstimator {
    pub fn load(settings: &ModelSettings) -> Result<Self> {
        Ok(Self {
            model: LandmarkModel::load(&settings.hand_model, settings.hand_input_size)?,
            threshold: settings.hand_threshold,
        })
    }
}

impl HandEstimator for OnnxHandEstimator {
    fn estimate(&mut self, frame: &Frame) -> Option<HandLandmarks> {
        match self.model.infer(frame) {
            Ok(out) => decode_hand(&out.coords, out.presence, self.threshold, &out.letterbox),
            Err(err) => {
                log::warn!("hand estimation failed: {err}");
                None
            }
        }
    }
}
