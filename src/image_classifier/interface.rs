use image::DynamicImage;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    /// Fraction in `[0, 1]`.
    pub confidence: f32,
}

impl Classification {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Why a classify call produced no ranked labels.
///
/// The display text is what ends up in the capture log in place of a
/// prediction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The model artifact failed to load. Permanent for the classifier.
    #[error("Failed to load model: {0}")]
    ModelUnavailable(String),

    /// Inference ran but produced no candidate labels.
    #[error("No predictions found")]
    NoResult,

    /// Input conversion or inference failed for this call only.
    #[error("Error making prediction: {0}")]
    ProcessingError(String),
}

pub trait ImageClassifier: Send + Sync {
    /// Ranked by descending confidence.
    fn classify(&self, image: &DynamicImage) -> Result<Vec<Classification>, ClassifyError>;
}

/// Sorts by descending confidence and clamps every confidence into `[0, 1]`.
/// Entries with a NaN confidence are dropped.
pub fn rank(mut classifications: Vec<Classification>) -> Vec<Classification> {
    classifications.retain(|c| !c.confidence.is_nan());
    for classification in classifications.iter_mut() {
        classification.confidence = classification.confidence.clamp(0.0, 1.0);
    }
    classifications.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    classifications
}
