use crate::device_camera::interface::Frame;
use std::error::Error;

pub const PREDICTION_PLACEHOLDER: &str = "Prediction will appear here";

pub const CAMERA_REQUIRED_MESSAGE: &str =
    "Camera access is required to scan your skin. Please allow camera access in the settings.";

#[derive(Debug, Clone, PartialEq)]
pub enum CameraStatus {
    Connecting,
    Streaming,
    Unavailable(String),
}

/// Everything a display needs to draw the scan screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanScreen {
    pub camera_status: CameraStatus,
    /// Latest raw frame for the live preview.
    pub preview: Option<Frame>,
    /// Increments with every frame; lets displays skip re-uploading a preview.
    pub frame_number: u64,
    pub prediction_text: String,
    pub pending_captures: usize,
    pub log_len: usize,
}

impl ScanScreen {
    pub fn status_line(&self) -> String {
        let camera = match &self.camera_status {
            CameraStatus::Connecting => "Camera connecting...".to_string(),
            CameraStatus::Streaming => "Camera ready".to_string(),
            CameraStatus::Unavailable(reason) => format!("Camera unavailable: {}", reason),
        };

        match self.pending_captures {
            0 => format!("{} | {} logged", camera, self.log_len),
            n => format!("{} | analyzing {} | {} logged", camera, n, self.log_len),
        }
    }
}

pub trait DeviceDisplay: Send + Sync {
    fn show(&mut self, screen: &ScanScreen) -> Result<(), Box<dyn Error + Send + Sync>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> ScanScreen {
        ScanScreen {
            camera_status: CameraStatus::Streaming,
            preview: None,
            frame_number: 3,
            prediction_text: PREDICTION_PLACEHOLDER.to_string(),
            pending_captures: 0,
            log_len: 2,
        }
    }

    #[test]
    fn test_status_line_idle() {
        assert_eq!(screen().status_line(), "Camera ready | 2 logged");
    }

    #[test]
    fn test_status_line_analyzing() {
        let mut screen = screen();
        screen.pending_captures = 2;
        screen.camera_status = CameraStatus::Unavailable("denied".to_string());

        assert_eq!(
            screen.status_line(),
            "Camera unavailable: denied | analyzing 2 | 2 logged"
        );
    }
}
