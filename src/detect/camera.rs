//! Webcam capture through nokhwa (feature `camera`)

use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{CameraIndex, RequestedFormat, RequestedFormatType},
};

use super::frame::{Frame, FrameSource};
use crate::error::{Error, Result};

/// Blocking webcam reader, one frame per call
pub struct WebCamera {
    camera: Camera,
    index: u32,
}

impl WebCamera {
    /// Open the camera and start streaming. Fails fast so the caller can
    /// report a missing device before the window opens.
    pub fn open(index: u32) -> Result<Self> {
        let requested = [
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate),
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::None),
        ];

        let mut last_err = String::from("no format accepted");
        for format in requested {
            match Camera::new(CameraIndex::Index(index), format) {
                Ok(mut camera) => match camera.open_stream() {
                    Ok(()) => {
                        log::info!(
                            "camera {index} open: {}",
                            camera.info().human_name()
                        );
                        return Ok(Self { camera, index });
                    }
                    Err(err) => last_err = err.to_string(),
                },
                Err(err) => last_err = err.to_string(),
            }
        }

        Err(Error::CameraOpen {
            index,
            reason: last_err,
        })
    }
}

impl FrameSource for WebCamera {
    fn capture(&mut self) -> Option<Frame> {
        let buffer = match self.camera.frame() {
            Ok(buffer) => buffer,
            Err(err) => {
                log::warn!("camera {} frame read failed: {err}", self.index);
                return None;
            }
        };

        match buffer.decode_image::<RgbFormat>() {
            Ok(image) => {
                let (width, height) = (image.width(), image.height());
                Some(Frame::new(image.into_raw(), width, height))
            }
            Err(err) => {
                log::warn!("failed to decode camera frame: {err}");
                None
            }
        }
    }

    fn release(&mut self) {
        if let Err(err) = self.camera.stop_stream() {
            log::warn!("failed to stop camera {}: {err}", self.index);
        } else {
            log::info!("camera {} released", self.index);
        }
    }
}
