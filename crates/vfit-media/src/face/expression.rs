//! Emotion distributions from face keypoint geometry.
//!
//! A real classifier would run a trained model; this derives a coarse
//! distribution from YuNet's five keypoints instead. The proxies:
//! mouth-corner spread for smiling, nose-to-mouth drop for an open jaw,
//! a tight low mouth for sadness, narrowed eye spacing for anger. All
//! features are normalized by the face box so scale cancels out.

use vfit_models::EmotionDistribution;

use super::detector::FaceDetection;

/// Mouth spread (relative to face width) above which a smile is assumed.
const SMILE_SPREAD: f64 = 0.45;
/// Nose-to-mouth drop (relative to face height) treated as an open jaw.
const JAW_DROP: f64 = 0.30;
/// Spread below this together with a shallow drop reads as a tight mouth.
const TIGHT_SPREAD: f64 = 0.30;
const SHALLOW_DROP: f64 = 0.18;
/// Eye spacing (relative to face width) below which eyes read narrowed.
const NARROW_EYES: f64 = 0.32;
/// Wide eyes plus a deep jaw drop reads as fear.
const WIDE_EYES: f64 = 0.42;
const DEEP_DROP: f64 = 0.38;

/// Derive an emotion distribution for one detected face.
///
/// Without keypoints there is nothing to measure: all mass on neutral.
pub fn distribution_for_face(face: &FaceDetection) -> EmotionDistribution {
    let Some(kp) = &face.keypoints else {
        return EmotionDistribution::neutral_only();
    };
    if face.width <= 0.0 || face.height <= 0.0 {
        return EmotionDistribution::neutral_only();
    }

    let mut scores = EmotionDistribution::zero();
    scores.neutral = 0.3;

    let mouth_spread = (kp.mouth_right.x - kp.mouth_left.x).abs() / face.width;
    let mouth_y = (kp.mouth_right.y + kp.mouth_left.y) / 2.0;
    let mouth_drop = (mouth_y - kp.nose.y) / face.height;
    let eye_span = (kp.left_eye.x - kp.right_eye.x).abs() / face.width;

    if mouth_spread > SMILE_SPREAD {
        scores.happy += 0.4;
    }
    if mouth_drop > JAW_DROP {
        scores.surprised += 0.4;
    }
    if mouth_spread < TIGHT_SPREAD && mouth_drop < SHALLOW_DROP {
        scores.sad += 0.2;
    }
    if eye_span < NARROW_EYES {
        scores.angry += 0.2;
    }
    if eye_span > WIDE_EYES && mouth_drop > DEEP_DROP {
        scores.fearful += 0.2;
    }

    scores.normalized()
}

/// Average the per-face distributions of one frame into a single
/// normalized distribution.
pub fn average_distribution(distributions: &[EmotionDistribution]) -> EmotionDistribution {
    if distributions.is_empty() {
        return EmotionDistribution::neutral_only();
    }

    let mut sum = EmotionDistribution::zero();
    for dist in distributions {
        for emotion in vfit_models::Emotion::ALL {
            *sum.get_mut(emotion) += dist.get(emotion);
        }
    }
    sum.normalized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::detector::{FaceKeypoints, Point};
    use vfit_models::Emotion;

    fn face_with(kp: FaceKeypoints) -> FaceDetection {
        FaceDetection {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            confidence: 0.9,
            keypoints: Some(kp),
        }
    }

    fn base_keypoints() -> FaceKeypoints {
        FaceKeypoints {
            right_eye: Point::new(30.0, 40.0),
            left_eye: Point::new(66.0, 40.0),
            nose: Point::new(48.0, 55.0),
            mouth_right: Point::new(35.0, 75.0),
            mouth_left: Point::new(61.0, 75.0),
        }
    }

    #[test]
    fn no_keypoints_is_neutral() {
        let face = FaceDetection {
            keypoints: None,
            ..face_with(base_keypoints())
        };
        let dist = distribution_for_face(&face);
        assert_eq!(dist, EmotionDistribution::neutral_only());
    }

    #[test]
    fn wide_mouth_reads_happy() {
        let mut kp = base_keypoints();
        kp.mouth_right = Point::new(20.0, 70.0);
        kp.mouth_left = Point::new(80.0, 70.0);
        let dist = distribution_for_face(&face_with(kp));
        assert_eq!(dist.dominant(), Emotion::Happy);
        assert!((dist.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn jaw_drop_reads_surprised() {
        let mut kp = base_keypoints();
        kp.mouth_right = Point::new(40.0, 90.0);
        kp.mouth_left = Point::new(56.0, 90.0);
        let dist = distribution_for_face(&face_with(kp));
        assert_eq!(dist.dominant(), Emotion::Surprised);
    }

    #[test]
    fn relaxed_face_stays_neutral() {
        let dist = distribution_for_face(&face_with(base_keypoints()));
        assert_eq!(dist.dominant(), Emotion::Neutral);
    }

    #[test]
    fn average_of_none_is_neutral() {
        assert_eq!(
            average_distribution(&[]),
            EmotionDistribution::neutral_only()
        );
    }

    #[test]
    fn average_is_normalized() {
        let a = distribution_for_face(&face_with(base_keypoints()));
        let mut kp = base_keypoints();
        kp.mouth_right = Point::new(20.0, 70.0);
        kp.mouth_left = Point::new(80.0, 70.0);
        let b = distribution_for_face(&face_with(kp));

        let avg = average_distribution(&[a, b]);
        assert!((avg.sum() - 1.0).abs() < 1e-9);
    }
}
