use super::main::Scanner;
use crate::capture_record::CaptureRecord;
use crate::image_classifier::interface::ClassifyError;
use crate::image_normalizer;
use crate::scanner::core::{Effect, Msg};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

impl Scanner {
    pub fn execute_effect(&self, effect: Effect) {
        match effect {
            Effect::SubscribeCamera => {
                let events = self.device_camera.events();
                for event in events.iter() {
                    if self.event_sender.send(Msg::CameraEvent(event)).is_err() {
                        break;
                    }
                }
                let _ = self.logger.info("Camera event stream ended");
            }
            Effect::StartCamera => {
                let started = self.device_camera.start();
                self.send(Msg::CameraStartDone(started));
            }
            Effect::NormalizeFrame { capture_id, frame } => {
                let image = image_normalizer::normalize(frame.image().clone());
                self.send(Msg::NormalizeDone {
                    capture_id,
                    image: Arc::new(image),
                });
            }
            Effect::ClassifyImage { capture_id, image } => {
                let classifier = Arc::clone(&self.image_classifier);
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| classifier.classify(&image)))
                    .unwrap_or_else(|payload| {
                        Err(ClassifyError::ProcessingError(panic_message(payload.as_ref())))
                    });
                self.send(Msg::ClassifyDone {
                    capture_id,
                    image,
                    outcome,
                });
            }
            Effect::AppendRecord {
                capture_id,
                image,
                prediction,
            } => {
                let image = Arc::try_unwrap(image).unwrap_or_else(|shared| (*shared).clone());
                let record = CaptureRecord::new(image, prediction);
                let _ = self.logger.info(&format!(
                    "Capture {} logged as {} ({})",
                    capture_id,
                    record.id(),
                    record.prediction()
                ));
                self.log_store.append(record);
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("classifier panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("classifier panicked: {}", message)
    } else {
        "classifier panicked".to_string()
    }
}
