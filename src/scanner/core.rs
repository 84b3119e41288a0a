use crate::device_camera::interface::{DeviceCameraEvent, Frame};
use crate::device_display::interface::PREDICTION_PLACEHOLDER;
use crate::image_classifier::interface::{Classification, ClassifyError};
use crate::prediction_formatter::describe_outcome;
use image::DynamicImage;
use std::fmt;
use std::sync::Arc;

pub const NO_FRAME_MESSAGE: &str = "No camera frame available yet";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaptureId(pub u64);

impl fmt::Display for CaptureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStage {
    Normalizing,
    Classifying,
}

/// A capture request in flight. Idle captures are not tracked; a completed
/// capture is removed once its record is appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    pub id: CaptureId,
    pub stage: CaptureStage,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum CameraState {
    #[default]
    Disconnected,
    Connected,
    Streaming,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Model {
    pub camera: CameraState,
    pub latest_frame: Option<Frame>,
    pub frames_received: u64,
    /// In trigger order. Concurrent captures are neither merged nor queued.
    pub captures: Vec<Capture>,
    pub next_capture_id: u64,
    pub prediction_text: String,
}

impl Model {
    pub fn stage_of(&self, id: CaptureId) -> Option<CaptureStage> {
        self.captures
            .iter()
            .find(|capture| capture.id == id)
            .map(|capture| capture.stage)
    }

    pub fn is_idle(&self) -> bool {
        self.captures.is_empty()
    }
}

#[derive(Debug)]
pub enum Msg {
    CameraEvent(DeviceCameraEvent),
    CameraStartDone(Result<(), Box<dyn std::error::Error + Send + Sync>>),
    CaptureRequested,
    NormalizeDone {
        capture_id: CaptureId,
        image: Arc<DynamicImage>,
    },
    ClassifyDone {
        capture_id: CaptureId,
        image: Arc<DynamicImage>,
        outcome: Result<Vec<Classification>, ClassifyError>,
    },
    Stop,
}

impl Msg {
    /// Debug text without pixel data.
    pub fn to_display_string(&self) -> String {
        match self {
            Msg::CameraEvent(DeviceCameraEvent::Frame(frame)) => format!(
                "CameraEvent(Frame({}x{}))",
                frame.image().width(),
                frame.image().height()
            ),
            Msg::CameraEvent(event) => format!("CameraEvent({:?})", event),
            Msg::CameraStartDone(result) => format!("CameraStartDone({:?})", result),
            Msg::CaptureRequested => "CaptureRequested".to_string(),
            Msg::NormalizeDone { capture_id, image } => format!(
                "NormalizeDone {{ capture_id: {}, image: {}x{} }}",
                capture_id,
                image.width(),
                image.height()
            ),
            Msg::ClassifyDone {
                capture_id,
                outcome,
                ..
            } => format!(
                "ClassifyDone {{ capture_id: {}, outcome: {:?} }}",
                capture_id, outcome
            ),
            Msg::Stop => "Stop".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SubscribeCamera,
    StartCamera,
    NormalizeFrame {
        capture_id: CaptureId,
        frame: Frame,
    },
    ClassifyImage {
        capture_id: CaptureId,
        image: Arc<DynamicImage>,
    },
    AppendRecord {
        capture_id: CaptureId,
        image: Arc<DynamicImage>,
        prediction: String,
    },
}

impl Effect {
    /// Debug text without pixel data.
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::SubscribeCamera => "SubscribeCamera".to_string(),
            Effect::StartCamera => "StartCamera".to_string(),
            Effect::NormalizeFrame { capture_id, .. } => {
                format!("NormalizeFrame {{ capture_id: {} }}", capture_id)
            }
            Effect::ClassifyImage { capture_id, .. } => {
                format!("ClassifyImage {{ capture_id: {} }}", capture_id)
            }
            Effect::AppendRecord {
                capture_id,
                prediction,
                ..
            } => format!(
                "AppendRecord {{ capture_id: {}, prediction: {:?} }}",
                capture_id, prediction
            ),
        }
    }

    /// Effects the runtime loop runs itself instead of on a worker thread.
    pub fn runs_inline(&self) -> bool {
        matches!(self, Effect::AppendRecord { .. })
    }
}

pub fn init() -> (Model, Vec<Effect>) {
    (
        Model {
            camera: CameraState::Disconnected,
            latest_frame: None,
            frames_received: 0,
            captures: vec![],
            next_capture_id: 1,
            prediction_text: PREDICTION_PLACEHOLDER.to_string(),
        },
        vec![Effect::SubscribeCamera],
    )
}

pub fn transition(model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    let mut model = model;

    match msg {
        Msg::CameraEvent(DeviceCameraEvent::Connected) => {
            model.camera = CameraState::Connected;
            (model, vec![Effect::StartCamera])
        }
        Msg::CameraEvent(DeviceCameraEvent::Disconnected) => {
            model.camera = CameraState::Disconnected;
            model.latest_frame = None;
            (model, vec![])
        }
        Msg::CameraEvent(DeviceCameraEvent::Frame(frame)) => {
            model.camera = CameraState::Streaming;
            model.latest_frame = Some(frame);
            model.frames_received += 1;
            (model, vec![])
        }
        Msg::CameraStartDone(Ok(())) => {
            if model.camera == CameraState::Connected {
                model.camera = CameraState::Streaming;
            }
            (model, vec![])
        }
        Msg::CameraStartDone(Err(e)) => {
            model.camera = CameraState::Failed(e.to_string());
            (model, vec![])
        }

        // Idle -> Normalizing
        Msg::CaptureRequested => match model.latest_frame.clone() {
            Some(frame) => {
                let capture_id = CaptureId(model.next_capture_id);
                model.next_capture_id += 1;
                model.captures.push(Capture {
                    id: capture_id,
                    stage: CaptureStage::Normalizing,
                });
                (model, vec![Effect::NormalizeFrame { capture_id, frame }])
            }
            None => {
                model.prediction_text = NO_FRAME_MESSAGE.to_string();
                (model, vec![])
            }
        },

        // Normalizing -> Classifying
        Msg::NormalizeDone { capture_id, image } => {
            if model.stage_of(capture_id) != Some(CaptureStage::Normalizing) {
                return (model, vec![]);
            }

            for capture in model.captures.iter_mut() {
                if capture.id == capture_id {
                    capture.stage = CaptureStage::Classifying;
                }
            }

            (model, vec![Effect::ClassifyImage { capture_id, image }])
        }

        // Classifying -> Completed -> Idle
        Msg::ClassifyDone {
            capture_id,
            image,
            outcome,
        } => {
            if model.stage_of(capture_id) != Some(CaptureStage::Classifying) {
                return (model, vec![]);
            }

            model.captures.retain(|capture| capture.id != capture_id);
            let prediction = describe_outcome(&outcome);
            model.prediction_text = prediction.clone();

            (
                model,
                vec![Effect::AppendRecord {
                    capture_id,
                    image,
                    prediction,
                }],
            )
        }

        Msg::Stop => (model, vec![]),
    }
}
