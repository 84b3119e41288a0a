use super::main::Scanner;
use crate::device_display::interface::{CameraStatus, ScanScreen};
use crate::scanner::core::{CameraState, Model};
use std::sync::PoisonError;

pub fn screen(model: &Model, log_len: usize) -> ScanScreen {
    let camera_status = match &model.camera {
        CameraState::Disconnected | CameraState::Connected => CameraStatus::Connecting,
        CameraState::Streaming => CameraStatus::Streaming,
        CameraState::Failed(reason) => CameraStatus::Unavailable(reason.clone()),
    };

    ScanScreen {
        camera_status,
        preview: model.latest_frame.clone(),
        frame_number: model.frames_received,
        prediction_text: model.prediction_text.clone(),
        pending_captures: model.captures.len(),
        log_len,
    }
}

impl Scanner {
    pub(crate) fn render(&self, model: &Model) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let screen = screen(model, self.log_store.len());

        let mut device_display = self
            .device_display
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        device_display.show(&screen)
    }
}
