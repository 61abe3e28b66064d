//! YuNet face detector wrapper.
//!
//! YuNet is a lightweight CNN face detector exposed through OpenCV's
//! `FaceDetectorYN` API. Each detection carries five landmark keypoints
//! (eyes, nose tip, mouth corners) that the expression heuristics read.
//!
//! The detector is optional twice over: the `opencv` cargo feature may be
//! off, and the ONNX model file may be absent at runtime. Either way the
//! classifier runs in disabled mode instead of failing the pipeline.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{info, warn};

#[cfg(feature = "opencv")]
use crate::error::MediaError;
use crate::error::MediaResult;

/// Process-wide availability flag, resolved once.
static FACE_DETECTION_AVAILABLE: OnceLock<bool> = OnceLock::new();

/// A 2D point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// YuNet's five landmark keypoints for one face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceKeypoints {
    pub right_eye: Point,
    pub left_eye: Point,
    pub nose: Point,
    pub mouth_right: Point,
    pub mouth_left: Point,
}

/// One detected face.
#[derive(Debug, Clone)]
pub struct FaceDetection {
    /// Left edge x-coordinate
    pub x: f64,
    /// Top edge y-coordinate
    pub y: f64,
    /// Box width
    pub width: f64,
    /// Box height
    pub height: f64,
    /// Detection confidence in [0, 1]
    pub confidence: f64,
    /// Landmark keypoints; absent when the detector did not report them
    pub keypoints: Option<FaceKeypoints>,
}

/// Locate a YuNet model file.
///
/// `VFIT_YUNET_MODEL` overrides the search; otherwise the standard
/// deployment locations are tried in order.
pub fn find_model_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("VFIT_YUNET_MODEL") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let candidates = [
        "/app/models/face_detection_yunet_2023mar.onnx",
        "/app/models/face_detection_yunet_2023mar_int8.onnx",
        "models/face_detection_yunet_2023mar.onnx",
    ];

    candidates
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

/// Check whether face detection can run in this process.
///
/// Resolved once; an initialization failure permanently disables the
/// component for the process lifetime (fail-open to degraded mode).
pub fn is_face_detection_available() -> bool {
    *FACE_DETECTION_AVAILABLE.get_or_init(|| {
        if !cfg!(feature = "opencv") {
            warn!("Face detection disabled: built without the opencv feature");
            return false;
        }
        match find_model_path() {
            Some(path) => {
                info!(model = %path.display(), "YuNet face detection model found");
                true
            }
            None => {
                warn!("YuNet model not found - emotion classification disabled");
                warn!("Set VFIT_YUNET_MODEL or place the model under /app/models/");
                false
            }
        }
    })
}

/// Detect faces in the image at `path`.
#[cfg(feature = "opencv")]
pub fn detect_faces(path: &Path, model_path: &Path) -> MediaResult<Vec<FaceDetection>> {
    use opencv::core::{Mat, Size};
    use opencv::imgcodecs;
    use opencv::objdetect::FaceDetectorYN;
    use opencv::prelude::*;

    let image = imgcodecs::imread(
        path.to_str().unwrap_or_default(),
        imgcodecs::IMREAD_COLOR,
    )
    .map_err(|e| MediaError::detection_failed(format!("Failed to read image: {e}")))?;

    if image.empty() {
        return Err(MediaError::detection_failed(format!(
            "Empty image: {}",
            path.display()
        )));
    }

    let size = image.size().map_err(|e| {
        MediaError::detection_failed(format!("Failed to read image size: {e}"))
    })?;

    let mut detector = FaceDetectorYN::create(
        model_path.to_str().unwrap_or_default(),
        "",
        Size::new(size.width, size.height),
        0.6, // score threshold
        0.3, // NMS threshold
        5000,
        0,
        0,
    )
    .map_err(|e| MediaError::detection_failed(format!("Failed to create YuNet: {e}")))?;

    let mut faces = Mat::default();
    detector
        .detect(&image, &mut faces)
        .map_err(|e| MediaError::detection_failed(format!("YuNet detect failed: {e}")))?;

    let mut out = Vec::new();
    for row in 0..faces.rows() {
        let at = |col: i32| -> MediaResult<f64> {
            faces
                .at_2d::<f32>(row, col)
                .map(|v| *v as f64)
                .map_err(|e| MediaError::detection_failed(format!("Bad detection row: {e}")))
        };

        // Row layout: x, y, w, h, then five (x, y) keypoints, then score
        out.push(FaceDetection {
            x: at(0)?,
            y: at(1)?,
            width: at(2)?,
            height: at(3)?,
            keypoints: Some(FaceKeypoints {
                right_eye: Point::new(at(4)?, at(5)?),
                left_eye: Point::new(at(6)?, at(7)?),
                nose: Point::new(at(8)?, at(9)?),
                mouth_right: Point::new(at(10)?, at(11)?),
                mouth_left: Point::new(at(12)?, at(13)?),
            }),
            confidence: at(14)?,
        });
    }

    Ok(out)
}

/// Non-opencv stub; unreachable while `is_face_detection_available`
/// returns false for builds without the feature.
#[cfg(not(feature = "opencv"))]
pub fn detect_faces(_path: &Path, _model_path: &Path) -> MediaResult<Vec<FaceDetection>> {
    Ok(Vec::new())
}
