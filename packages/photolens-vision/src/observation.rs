use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

fn in_unit(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

/// Rectangle in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Clips the rectangle to the unit square. `None` when no part of it lies
    /// inside the image or a coordinate is not finite.
    pub fn clipped(&self) -> Option<Self> {
        let coords = [self.x, self.y, self.width, self.height];
        if !coords.iter().all(|v| v.is_finite()) {
            return None;
        }
        let (right, top) = (self.x + self.width, self.y + self.height);
        if self.x >= 0.0 && self.y >= 0.0 && right <= 1.0 && top <= 1.0 && self.width > 0.0 && self.height > 0.0 {
            return Some(*self);
        }
        let (x0, y0) = (self.x.clamp(0.0, 1.0), self.y.clamp(0.0, 1.0));
        let (x1, y1) = (right.clamp(0.0, 1.0), top.clamp(0.0, 1.0));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self::new(x0, y0, x1 - x0, y1 - y0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub fn is_normalized(&self) -> bool {
        in_unit(self.x) && in_unit(self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextCandidate {
    pub string: String,
    pub confidence: f32,
}

/// One recognized line of text with its candidate transcriptions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextObservation {
    pub candidates: Vec<TextCandidate>,
}

impl TextObservation {
    /// Highest-confidence candidate. Ties keep the earlier candidate.
    pub fn top_candidate(&self) -> Option<&TextCandidate> {
        self.candidates.iter().fold(None, |best, candidate| match best {
            Some(b) if b.confidence >= candidate.confidence => Some(b),
            _ => Some(candidate),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LandmarkRegion {
    FaceContour,
    LeftEye,
    RightEye,
    LeftEyebrow,
    RightEyebrow,
    Nose,
    NoseCrest,
    MedianLine,
    OuterLips,
    InnerLips,
    LeftPupil,
    RightPupil,
}

/// Landmark groups of a face. Points are normalized to the face bounding box,
/// as Vision reports them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceLandmarks {
    pub regions: BTreeMap<LandmarkRegion, Vec<NormalizedPoint>>,
}

impl FaceLandmarks {
    pub fn region(&self, region: LandmarkRegion) -> Option<&[NormalizedPoint]> {
        self.regions.get(&region).map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceObservation {
    pub bounding_box: NormalizedRect,
    #[serde(default)]
    pub confidence: Option<f32>,
    #[serde(default)]
    pub landmarks: Option<FaceLandmarks>,
}

impl FaceObservation {
    /// Brings the face into range: the box is clipped to the image, landmark
    /// points outside `[0, 1]` are dropped along with regions left empty.
    /// `None` when the box has no part inside the image.
    pub fn clipped(mut self) -> Option<Self> {
        self.bounding_box = self.bounding_box.clipped()?;
        if let Some(landmarks) = &mut self.landmarks {
            for points in landmarks.regions.values_mut() {
                points.retain(NormalizedPoint::is_normalized);
            }
            landmarks.regions.retain(|_, points| !points.is_empty());
        }
        Some(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HandJoint {
    #[serde(rename = "wrist")]
    Wrist,
    #[serde(rename = "thumbCMC")]
    ThumbCmc,
    #[serde(rename = "thumbMP")]
    ThumbMp,
    #[serde(rename = "thumbIP")]
    ThumbIp,
    #[serde(rename = "thumbTip")]
    ThumbTip,
    #[serde(rename = "indexMCP")]
    IndexMcp,
    #[serde(rename = "indexPIP")]
    IndexPip,
    #[serde(rename = "indexDIP")]
    IndexDip,
    #[serde(rename = "indexTip")]
    IndexTip,
    #[serde(rename = "middleMCP")]
    MiddleMcp,
    #[serde(rename = "middlePIP")]
    MiddlePip,
    #[serde(rename = "middleDIP")]
    MiddleDip,
    #[serde(rename = "middleTip")]
    MiddleTip,
    #[serde(rename = "ringMCP")]
    RingMcp,
    #[serde(rename = "ringPIP")]
    RingPip,
    #[serde(rename = "ringDIP")]
    RingDip,
    #[serde(rename = "ringTip")]
    RingTip,
    #[serde(rename = "littleMCP")]
    LittleMcp,
    #[serde(rename = "littlePIP")]
    LittlePip,
    #[serde(rename = "littleDIP")]
    LittleDip,
    #[serde(rename = "littleTip")]
    LittleTip,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecognizedPoint {
    pub x: f64,
    pub y: f64,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HandPoseObservation {
    pub joints: BTreeMap<HandJoint, RecognizedPoint>,
}

impl HandPoseObservation {
    pub fn joint(&self, joint: HandJoint) -> Option<&RecognizedPoint> {
        self.joints.get(&joint)
    }

    /// Drops joints whose location lies outside `[0, 1]`.
    pub fn clipped(mut self) -> Self {
        self.joints.retain(|_, p| in_unit(p.x) && in_unit(p.y));
        self
    }
}
