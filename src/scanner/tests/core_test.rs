use crate::device_camera::interface::{DeviceCameraEvent, Frame};
use crate::device_display::interface::{CameraStatus, PREDICTION_PLACEHOLDER};
use crate::image_classifier::interface::{Classification, ClassifyError};
use crate::scanner::core::{
    init, transition, CameraState, Capture, CaptureId, CaptureStage, Effect, Model, Msg,
    NO_FRAME_MESSAGE,
};
use crate::scanner::render::screen;
use image::DynamicImage;
use std::sync::Arc;

fn frame(width: u32, height: u32) -> Frame {
    Frame::new(DynamicImage::new_rgb8(width, height))
}

fn streaming_model() -> Model {
    let (model, _) = init();
    let (model, _) = transition(model, Msg::CameraEvent(DeviceCameraEvent::Connected));
    let (model, _) = transition(model, Msg::CameraStartDone(Ok(())));
    let (model, _) = transition(
        model,
        Msg::CameraEvent(DeviceCameraEvent::Frame(frame(4, 3))),
    );
    model
}

fn melanoma() -> Result<Vec<Classification>, ClassifyError> {
    Ok(vec![
        Classification::new("Melanoma", 0.92),
        Classification::new("Acne", 0.05),
    ])
}

#[test]
fn test_init() {
    let (model, effects) = init();

    assert_eq!(model.camera, CameraState::Disconnected);
    assert_eq!(model.prediction_text, PREDICTION_PLACEHOLDER);
    assert_eq!(model.next_capture_id, 1);
    assert!(model.is_idle());
    assert_eq!(effects, vec![Effect::SubscribeCamera]);
}

#[test]
fn test_camera_connection_flow() {
    let (model, _) = init();

    // Camera connects
    let (model, effects) = transition(model, Msg::CameraEvent(DeviceCameraEvent::Connected));
    assert_eq!(model.camera, CameraState::Connected);
    assert_eq!(effects, vec![Effect::StartCamera]);

    // Camera starts
    let (model, effects) = transition(model, Msg::CameraStartDone(Ok(())));
    assert_eq!(model.camera, CameraState::Streaming);
    assert!(effects.is_empty());
}

#[test]
fn test_camera_start_failure() {
    let (model, _) = init();
    let (model, _) = transition(model, Msg::CameraEvent(DeviceCameraEvent::Connected));

    let (model, effects) = transition(
        model,
        Msg::CameraStartDone(Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::Other,
            "permission denied",
        )))),
    );

    assert_eq!(
        model.camera,
        CameraState::Failed("permission denied".to_string())
    );
    assert!(effects.is_empty());
    assert_eq!(
        screen(&model, 0).camera_status,
        CameraStatus::Unavailable("permission denied".to_string())
    );
}

#[test]
fn test_frames_replace_latest_frame() {
    let model = streaming_model();

    let (model, effects) = transition(
        model,
        Msg::CameraEvent(DeviceCameraEvent::Frame(frame(8, 6))),
    );

    assert!(effects.is_empty());
    assert_eq!(model.frames_received, 2);
    assert_eq!(model.latest_frame.unwrap().image().width(), 8);
}

#[test]
fn test_disconnect_clears_latest_frame() {
    let model = streaming_model();

    let (model, _) = transition(model, Msg::CameraEvent(DeviceCameraEvent::Disconnected));

    assert_eq!(model.camera, CameraState::Disconnected);
    assert!(model.latest_frame.is_none());
}

#[test]
fn test_capture_without_frame() {
    let (model, _) = init();

    let (model, effects) = transition(model, Msg::CaptureRequested);

    assert!(effects.is_empty());
    assert!(model.is_idle());
    assert_eq!(model.next_capture_id, 1);
    assert_eq!(model.prediction_text, NO_FRAME_MESSAGE);
}

#[test]
fn test_capture_flow() {
    let model = streaming_model();
    let latest = model.latest_frame.clone().unwrap();
    let id = CaptureId(1);

    // Idle -> Normalizing
    let (model, effects) = transition(model, Msg::CaptureRequested);
    assert_eq!(
        model.captures,
        vec![Capture {
            id,
            stage: CaptureStage::Normalizing
        }]
    );
    assert_eq!(
        effects,
        vec![Effect::NormalizeFrame {
            capture_id: id,
            frame: latest
        }]
    );

    // Normalizing -> Classifying
    let image = Arc::new(DynamicImage::new_rgb8(2, 2));
    let (model, effects) = transition(
        model,
        Msg::NormalizeDone {
            capture_id: id,
            image: image.clone(),
        },
    );
    assert_eq!(model.stage_of(id), Some(CaptureStage::Classifying));
    assert_eq!(
        effects,
        vec![Effect::ClassifyImage {
            capture_id: id,
            image: image.clone()
        }]
    );

    // Classifying -> Idle
    let (model, effects) = transition(
        model,
        Msg::ClassifyDone {
            capture_id: id,
            image: image.clone(),
            outcome: melanoma(),
        },
    );
    assert!(model.is_idle());
    assert_eq!(model.prediction_text, "Melanoma (92.00% confidence)");
    assert_eq!(
        effects,
        vec![Effect::AppendRecord {
            capture_id: id,
            image,
            prediction: "Melanoma (92.00% confidence)".to_string(),
        }]
    );
}

#[test]
fn test_failed_outcome_is_recorded_as_text() {
    let model = streaming_model();
    let id = CaptureId(1);
    let image = Arc::new(DynamicImage::new_rgb8(2, 2));

    let (model, _) = transition(model, Msg::CaptureRequested);
    let (model, _) = transition(
        model,
        Msg::NormalizeDone {
            capture_id: id,
            image: image.clone(),
        },
    );
    let (model, effects) = transition(
        model,
        Msg::ClassifyDone {
            capture_id: id,
            image: image.clone(),
            outcome: Err(ClassifyError::ModelUnavailable("missing.onnx".to_string())),
        },
    );

    assert_eq!(model.prediction_text, "Failed to load model: missing.onnx");
    match &effects[..] {
        [Effect::AppendRecord { prediction, .. }] => {
            assert_eq!(prediction, "Failed to load model: missing.onnx")
        }
        _ => panic!("Unexpected effects"),
    }
}

#[test]
fn test_empty_outcome_is_no_result() {
    let model = streaming_model();
    let id = CaptureId(1);
    let image = Arc::new(DynamicImage::new_rgb8(2, 2));

    let (model, _) = transition(model, Msg::CaptureRequested);
    let (model, _) = transition(
        model,
        Msg::NormalizeDone {
            capture_id: id,
            image: image.clone(),
        },
    );
    let (model, _) = transition(
        model,
        Msg::ClassifyDone {
            capture_id: id,
            image,
            outcome: Ok(vec![]),
        },
    );

    assert_eq!(model.prediction_text, "No predictions found");
}

#[test]
fn test_stale_completions_are_ignored() {
    let model = streaming_model();
    let image = Arc::new(DynamicImage::new_rgb8(2, 2));

    // Unknown capture
    let (model, effects) = transition(
        model,
        Msg::NormalizeDone {
            capture_id: CaptureId(9),
            image: image.clone(),
        },
    );
    assert!(effects.is_empty());
    assert!(model.is_idle());

    // Classification for a capture that is still normalizing
    let (model, _) = transition(model, Msg::CaptureRequested);
    let (model, effects) = transition(
        model,
        Msg::ClassifyDone {
            capture_id: CaptureId(1),
            image,
            outcome: melanoma(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(model.stage_of(CaptureId(1)), Some(CaptureStage::Normalizing));
    assert_eq!(model.prediction_text, PREDICTION_PLACEHOLDER);
}

#[test]
fn test_concurrent_captures_complete_independently() {
    let model = streaming_model();
    let image = Arc::new(DynamicImage::new_rgb8(2, 2));

    let (model, _) = transition(model, Msg::CaptureRequested);
    let (model, _) = transition(model, Msg::CaptureRequested);
    assert_eq!(model.captures.len(), 2);
    assert_eq!(model.next_capture_id, 3);

    let mut model = model;
    for id in [CaptureId(1), CaptureId(2)] {
        let (next, _) = transition(
            model,
            Msg::NormalizeDone {
                capture_id: id,
                image: image.clone(),
            },
        );
        model = next;
    }

    // Second capture finishes first
    let (model, effects) = transition(
        model,
        Msg::ClassifyDone {
            capture_id: CaptureId(2),
            image: image.clone(),
            outcome: Ok(vec![Classification::new("Acne", 0.5)]),
        },
    );
    assert!(matches!(
        &effects[..],
        [Effect::AppendRecord { capture_id: CaptureId(2), .. }]
    ));
    assert_eq!(model.stage_of(CaptureId(1)), Some(CaptureStage::Classifying));
    assert_eq!(screen(&model, 1).pending_captures, 1);

    let (model, effects) = transition(
        model,
        Msg::ClassifyDone {
            capture_id: CaptureId(1),
            image,
            outcome: melanoma(),
        },
    );
    assert!(matches!(
        &effects[..],
        [Effect::AppendRecord { capture_id: CaptureId(1), .. }]
    ));
    assert!(model.is_idle());
    assert_eq!(model.prediction_text, "Melanoma (92.00% confidence)");
}
