use crate::config::CameraConfig;
use crate::device_camera::interface::{
    spawn_frame_stream, DeviceCamera, DeviceCameraEvent, StreamFlags,
};
use crate::library::logger::interface::Logger;
use image::{DynamicImage, Rgb, RgbImage};
use rand::Rng;
use std::collections::VecDeque;
use std::sync::atomic::Ordering;
use std::sync::{mpsc, Arc, Mutex, PoisonError};

enum Source {
    /// Synthetic skin patches with a randomly placed lesion.
    Synthetic { width: u32, height: u32 },
    /// Each frame is delivered once, then the stream ends.
    Scripted(Arc<Mutex<VecDeque<DynamicImage>>>),
}

pub struct DeviceCameraFake {
    config: CameraConfig,
    source: Source,
    flags: Arc<StreamFlags>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceCameraFake {
    pub fn new(config: CameraConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        let (width, height) = config.frame_size;
        Self::with_source(config, Source::Synthetic { width, height }, logger)
    }

    pub fn with_frames(
        config: CameraConfig,
        frames: Vec<DynamicImage>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        let frames = Arc::new(Mutex::new(frames.into_iter().collect()));
        Self::with_source(config, Source::Scripted(frames), logger)
    }

    fn with_source(
        config: CameraConfig,
        source: Source,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            config,
            source,
            flags: Arc::new(StreamFlags::default()),
            logger: logger.with_namespace("camera").with_namespace("fake"),
        }
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Starting camera...")?;
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
        let flags = Arc::clone(&self.flags);
        let interval = self.config.frame_interval;

        match &self.source {
            Source::Synthetic { width, height } => {
                let (width, height) = (*width, *height);
                spawn_frame_stream(flags, interval, move || {
                    Some(synthetic_skin_frame(width, height))
                })
            }
            Source::Scripted(frames) => {
                let frames = Arc::clone(frames);
                spawn_frame_stream(flags, interval, move || {
                    frames
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .pop_front()
                })
            }
        }
    }
}

fn synthetic_skin_frame(width: u32, height: u32) -> DynamicImage {
    let mut rng = rand::rng();

    let skin = Rgb([
        rng.random_range(190..=235u8),
        rng.random_range(140..=185u8),
        rng.random_range(120..=160u8),
    ]);
    let lesion = Rgb([
        rng.random_range(50..=120u8),
        rng.random_range(25..=70u8),
        rng.random_range(20..=60u8),
    ]);

    let short_side = width.min(height).max(1);
    let radius = rng.random_range(short_side / 16..=short_side / 6 + 1) as i64;
    let center_x = rng.random_range(0..width.max(1)) as i64;
    let center_y = rng.random_range(0..height.max(1)) as i64;

    let image = RgbImage::from_fn(width, height, |x, y| {
        let dx = x as i64 - center_x;
        let dy = y as i64 - center_y;
        if dx * dx + dy * dy <= radius * radius {
            lesion
        } else {
            skin
        }
    });

    DynamicImage::ImageRgb8(image)
}
