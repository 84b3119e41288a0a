use image::DynamicImage;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

/// One camera sample. Cloning shares the pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame(pub Arc<DynamicImage>);

impl Frame {
    pub fn new(image: DynamicImage) -> Self {
        Self(Arc::new(image))
    }

    pub fn image(&self) -> &DynamicImage {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCameraEvent {
    Connected,
    Disconnected,
    Frame(Frame),
}

/// A continuously streaming camera. Frames are delivered on the camera's own
/// thread through the receiver returned by `events`.
pub trait DeviceCamera: Send + Sync {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn events(&self) -> mpsc::Receiver<DeviceCameraEvent>;
}

#[derive(Debug, Default)]
pub(crate) struct StreamFlags {
    pub streaming: AtomicBool,
    pub stopped: AtomicBool,
}

/// Sends `Connected`, then one frame per `interval` while streaming. The
/// stream ends with `Disconnected` once stopped, or silently when
/// `next_frame` runs dry.
pub(crate) fn spawn_frame_stream<F>(
    flags: Arc<StreamFlags>,
    interval: Duration,
    mut next_frame: F,
) -> mpsc::Receiver<DeviceCameraEvent>
where
    F: FnMut() -> Option<DynamicImage> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        if tx.send(DeviceCameraEvent::Connected).is_err() {
            return;
        }

        loop {
            if flags.stopped.load(Ordering::SeqCst) {
                let _ = tx.send(DeviceCameraEvent::Disconnected);
                break;
            }

            if flags.streaming.load(Ordering::SeqCst) {
                let image = match next_frame() {
                    Some(image) => image,
                    None => break,
                };
                if tx.send(DeviceCameraEvent::Frame(Frame::new(image))).is_err() {
                    break;
                }
            }

            std::thread::sleep(interval);
        }
    });

    rx
}
