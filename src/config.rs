use crate::disease_db;
use crate::image_classifier::models::model_config::{ModelConfig, OutputActivation};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CameraConfig {
    pub frame_interval: Duration,
    /// Sensor resolution as (width, height). The sensor is landscape.
    pub frame_size: (u32, u32),
    /// Replay a still image instead of generating synthetic frames.
    pub image_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// egui window with the Scan, Log and Database tabs.
    Window,
    /// Status box on stdout. Enter captures, `q` quits.
    Console,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierMode {
    /// ONNX model at `model.onnx_model_path`. Falls back to the fake when the
    /// model cannot be loaded.
    Onnx,
    /// Random disease labels, no model needed.
    Fake,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub logger_timezone: chrono::FixedOffset,
    pub display_timezone: chrono::FixedOffset,
    pub display_mode: DisplayMode,
    pub classifier_mode: ClassifierMode,
    pub camera: CameraConfig,
    pub model: ModelConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logger_timezone: mountain_standard_time(),
            display_timezone: mountain_standard_time(),
            display_mode: DisplayMode::Window,
            classifier_mode: ClassifierMode::Onnx,
            camera: CameraConfig {
                frame_interval: Duration::from_millis(100),
                frame_size: (640, 480),
                image_path: None,
            },
            model: ModelConfig {
                onnx_model_path: "./models/skin_classifier.onnx".to_string(),
                input_shape: (224, 224),
                labels: disease_db::all()
                    .iter()
                    .map(|disease| disease.name.to_string())
                    .collect(),
                mean: [0.485, 0.456, 0.406],
                std: [0.229, 0.224, 0.225],
                output_activation: OutputActivation::Softmax,
            },
        }
    }
}

fn mountain_standard_time() -> chrono::FixedOffset {
    chrono::FixedOffset::west_opt(7 * 3600).unwrap()
}
