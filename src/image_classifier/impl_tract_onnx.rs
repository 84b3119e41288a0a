use crate::image_classifier::interface::{rank, Classification, ClassifyError, ImageClassifier};
use crate::image_classifier::models::model_config::{ModelConfig, OutputActivation};
use crate::image_classifier::tract::image::{resize_image_to_tensor, ChannelStats};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::sync::Arc;
use tract_onnx::prelude::*;

type OnnxPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>;

pub struct ImageClassifierTractOnnx {
    /// A load failure is kept so every classify call can report it.
    model: Result<OnnxPlan, String>,
    config: ModelConfig,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierTractOnnx {
    pub fn new(config: ModelConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        let logger = logger.with_namespace("image_classifier").with_namespace("onnx");

        let model = load_model(&config).map_err(|e| e.to_string());

        match &model {
            Ok(_) => {
                let _ = logger.info(&format!("Loaded model {}", config.onnx_model_path));
            }
            Err(reason) => {
                let _ = logger.error(&format!(
                    "Failed to load model {}: {}",
                    config.onnx_model_path, reason
                ));
            }
        }

        Self {
            model,
            config,
            logger,
        }
    }

    pub fn is_available(&self) -> bool {
        self.model.is_ok()
    }

    fn run(&self, model: &OnnxPlan, image: &DynamicImage) -> Result<Vec<f32>, ClassifyError> {
        let (height, width) = self.config.input_shape;
        let stats = ChannelStats {
            mean: self.config.mean,
            std: self.config.std,
        };

        let input = resize_image_to_tensor(image, width, height, stats)
            .map_err(|e| ClassifyError::ProcessingError(e.to_string()))?;

        let outputs = model
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| ClassifyError::ProcessingError(e.to_string()))?;

        let output = match outputs.first() {
            Some(output) => output,
            None => return Ok(vec![]),
        };

        let scores = output
            .to_array_view::<f32>()
            .map_err(|e| ClassifyError::ProcessingError(e.to_string()))?;

        Ok(scores.iter().copied().collect())
    }
}

fn load_model(config: &ModelConfig) -> TractResult<OnnxPlan> {
    let (height, width) = config.input_shape;

    tract_onnx::onnx()
        .model_for_path(&config.onnx_model_path)?
        .with_input_fact(
            0,
            f32::fact([1, 3, height as usize, width as usize]).into(),
        )?
        .into_optimized()?
        .into_runnable()
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(&self, image: &DynamicImage) -> Result<Vec<Classification>, ClassifyError> {
        let model = self
            .model
            .as_ref()
            .map_err(|reason| ClassifyError::ModelUnavailable(reason.clone()))?;

        let scores = self.run(model, image)?;

        let classifications = classify_scores(
            &self.config.labels,
            self.config.output_activation,
            &scores,
        )?;

        if let Some(top) = classifications.first() {
            let _ = self
                .logger
                .info(&format!("Top result {} ({:.4})", top.label, top.confidence));
        }

        Ok(classifications)
    }
}

/// Turns raw model output into ranked classifications. NaN output is a
/// processing error; no output at all is `NoResult`.
pub fn classify_scores(
    labels: &[String],
    activation: OutputActivation,
    scores: &[f32],
) -> Result<Vec<Classification>, ClassifyError> {
    if scores.iter().any(|score| score.is_nan()) {
        return Err(ClassifyError::ProcessingError(
            "model output contains NaN".to_string(),
        ));
    }

    let scores = match activation {
        OutputActivation::Softmax => softmax(scores),
        OutputActivation::Probabilities => scores.to_vec(),
    };

    let classifications = label_scores(labels, &scores);

    if classifications.is_empty() {
        return Err(ClassifyError::NoResult);
    }

    Ok(classifications)
}

/// Infinite logits share all of the probability mass.
pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let infinite = scores.iter().filter(|s| **s == f32::INFINITY).count();
    if infinite > 0 {
        let share = 1.0 / infinite as f32;
        return scores
            .iter()
            .map(|s| if *s == f32::INFINITY { share } else { 0.0 })
            .collect();
    }

    let max = scores
        .iter()
        .copied()
        .filter(|s| s.is_finite())
        .fold(f32::NEG_INFINITY, f32::max);

    if !max.is_finite() {
        return scores.to_vec();
    }

    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();

    exps.iter().map(|e| e / sum).collect()
}

/// Pairs each score with its label; scores past the label list are named by
/// their class index.
pub fn label_scores(labels: &[String], scores: &[f32]) -> Vec<Classification> {
    let classifications = scores
        .iter()
        .enumerate()
        .map(|(index, score)| {
            let label = labels
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("class {}", index));
            Classification::new(label, *score)
        })
        .collect();

    rank(classifications)
}
