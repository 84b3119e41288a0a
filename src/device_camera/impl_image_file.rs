use crate::device_camera::interface::{
    spawn_frame_stream, DeviceCamera, DeviceCameraEvent, StreamFlags,
};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::time::Duration;

/// Replays a still image from disk as a live stream. The file is read on
/// `start`, so a missing or unreadable file surfaces as a start failure.
pub struct DeviceCameraImageFile {
    path: PathBuf,
    frame_interval: Duration,
    image: Arc<Mutex<Option<DynamicImage>>>,
    flags: Arc<StreamFlags>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceCameraImageFile {
    pub fn new(
        path: PathBuf,
        frame_interval: Duration,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            path,
            frame_interval,
            image: Arc::new(Mutex::new(None)),
            flags: Arc::new(StreamFlags::default()),
            logger: logger.with_namespace("camera").with_namespace("image_file"),
        }
    }
}

impl DeviceCamera for DeviceCameraImageFile {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger
            .info(&format!("Opening {}", self.path.display()))?;

        let image = image::open(&self.path)?;
        *self.image.lock().unwrap_or_else(PoisonError::into_inner) = Some(image);
        self.flags.streaming.store(true, Ordering::SeqCst);

        self.logger.info("Camera started")?;
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Stopping camera...")?;
        self.flags.streaming.store(false, Ordering::SeqCst);
        self.flags.stopped.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn events(&self) -> mpsc::Receiver<DeviceCameraEvent> {
        let image = Arc::clone(&self.image);
        spawn_frame_stream(Arc::clone(&self.flags), self.frame_interval, move || {
            image.lock().unwrap_or_else(PoisonError::into_inner).clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_memory::LoggerMemory;

    #[test]
    fn test_missing_file_fails_to_start() {
        let camera = DeviceCameraImageFile::new(
            PathBuf::from("./does/not/exist.png"),
            Duration::from_millis(5),
            Arc::new(LoggerMemory::new()),
        );

        assert!(camera.start().is_err());
    }

    #[test]
    fn test_replays_file_contents() {
        let path = std::env::temp_dir().join(format!("skin-scan-{}.png", uuid::Uuid::new_v4()));
        DynamicImage::new_rgb8(12, 8).save(&path).unwrap();

        let camera = DeviceCameraImageFile::new(
            path.clone(),
            Duration::from_millis(5),
            Arc::new(LoggerMemory::new()),
        );
        let events = camera.events();
        camera.start().unwrap();

        assert_eq!(events.recv().unwrap(), DeviceCameraEvent::Connected);
        match events.recv_timeout(Duration::from_secs(2)).unwrap() {
            DeviceCameraEvent::Frame(frame) => {
                assert_eq!((frame.image().width(), frame.image().height()), (12, 8));
            }
            event => panic!("Unexpected event: {:?}", event),
        }

        camera.stop().unwrap();
        let _ = std::fs::remove_file(&path);
    }
}
