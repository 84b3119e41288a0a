#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputActivation {
    /// The model emits raw logits; apply softmax before ranking.
    Softmax,
    /// The model already emits probabilities.
    Probabilities,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: String,
    /// (height, width)
    pub input_shape: (u32, u32),
    /// Class labels in model output order.
    pub labels: Vec<String>,
    pub mean: [f32; 3],
    pub std: [f32; 3],
    pub output_activation: OutputActivation,
}
