use chrono::{DateTime, FixedOffset, Utc};
use image::DynamicImage;
use uuid::Uuid;

/// One completed scan. Immutable once built; only the capture pipeline
/// constructs records.
#[derive(Debug, Clone)]
pub struct CaptureRecord {
    id: Uuid,
    image: DynamicImage,
    captured_at: DateTime<Utc>,
    prediction: String,
}

impl CaptureRecord {
    pub(crate) fn new(image: DynamicImage, prediction: String) -> Self {
        Self::with_timestamp(image, prediction, Utc::now())
    }

    pub(crate) fn with_timestamp(
        image: DynamicImage,
        prediction: String,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            image,
            captured_at,
            prediction,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn prediction(&self) -> &str {
        &self.prediction
    }
}

/// Medium date with short time, e.g. `Jun 19, 2024 at 3:05 PM`.
pub fn format_captured_at(captured_at: DateTime<Utc>, timezone: FixedOffset) -> String {
    captured_at
        .with_timezone(&timezone)
        .format("%b %-d, %Y at %-I:%M %p")
        .to_string()
}
