use crate::image_classifier::interface::{Classification, ClassifyError};

/// `"<label> (<percent with 2 decimals>% confidence)"`.
pub fn format_prediction(label: &str, confidence: f32) -> String {
    let confidence = if confidence.is_nan() { 0.0 } else { confidence };
    let percent = (f64::from(confidence) * 100.0).clamp(0.0, 100.0);
    format!("{} ({:.2}% confidence)", label, percent)
}

/// Text recorded for a classify outcome: the formatted top result, or the
/// failure's description.
pub fn describe_outcome(outcome: &Result<Vec<Classification>, ClassifyError>) -> String {
    match outcome {
        Ok(classifications) => match classifications.first() {
            Some(top) => format_prediction(&top.label, top.confidence),
            None => ClassifyError::NoResult.to_string(),
        },
        Err(error) => error.to_string(),
    }
}
