use crate::config::{ClassifierMode, Config};
use crate::image_classifier::impl_fake::ImageClassifierFake;
use crate::image_classifier::impl_tract_onnx::ImageClassifierTractOnnx;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use std::sync::Arc;

/// Builds the classifier named by `config.classifier_mode`. An ONNX model
/// that fails to load is replaced by the random fake so the app stays usable.
pub fn image_classifier_for(
    config: &Config,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Arc<dyn ImageClassifier + Send + Sync> {
    match config.classifier_mode {
        ClassifierMode::Fake => Arc::new(ImageClassifierFake::new(logger)),
        ClassifierMode::Onnx => {
            let onnx = ImageClassifierTractOnnx::new(config.model.clone(), logger.clone());
            if onnx.is_available() {
                return Arc::new(onnx);
            }

            let _ = logger.with_namespace("image_classifier").warn(&format!(
                "Model {} unavailable, falling back to fake classifier",
                config.model.onnx_model_path
            ));
            Arc::new(ImageClassifierFake::new(logger))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_memory::LoggerMemory;
    use image::DynamicImage;

    #[test]
    fn test_missing_model_falls_back_to_fake() {
        let logger = LoggerMemory::new();
        let mut config = Config::default();
        config.model.onnx_model_path = "./does/not/exist.onnx".to_string();

        let classifier = image_classifier_for(&config, Arc::new(logger.clone()));

        assert!(logger.contains("falling back to fake classifier"));
        let results = classifier.classify(&DynamicImage::new_rgb8(8, 8)).unwrap();
        assert!(!results.is_empty());
    }

    #[test]
    fn test_fake_mode_skips_model() {
        let logger = LoggerMemory::new();
        let mut config = Config::default();
        config.classifier_mode = ClassifierMode::Fake;

        let classifier = image_classifier_for(&config, Arc::new(logger.clone()));

        assert!(!logger.contains("Failed to load model"));
        assert!(classifier.classify(&DynamicImage::new_rgb8(8, 8)).is_ok());
    }
}
