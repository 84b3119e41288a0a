use crate::config::Config;
use crate::device_camera::{impl_fake::DeviceCameraFake, interface::DeviceCamera};
use crate::device_display::impl_fake::DeviceDisplayFake;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::impl_memory::LoggerMemory;
use crate::log_store::LogStoreHandle;
use crate::scanner::main::Scanner;
use image::{DynamicImage, Rgb, RgbImage};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

pub const MARKER: Rgb<u8> = Rgb([255, 0, 0]);

pub struct Fixture {
    pub config: Config,
    pub logger: LoggerMemory,
    pub device_display: DeviceDisplayFake,
    pub log_store: LogStoreHandle,
}

impl Fixture {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.camera.frame_interval = Duration::from_millis(5);
        config.camera.frame_size = (40, 30);

        Self {
            config,
            logger: LoggerMemory::new(),
            device_display: DeviceDisplayFake::new(),
            log_store: LogStoreHandle::new(),
        }
    }

    /// Camera that delivers `frames` once each and then goes quiet.
    pub fn camera_with_frames(&self, frames: Vec<DynamicImage>) -> Arc<DeviceCameraFake> {
        Arc::new(DeviceCameraFake::with_frames(
            self.config.camera.clone(),
            frames,
            Arc::new(self.logger.clone()),
        ))
    }

    pub fn scanner(
        &self,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    ) -> Scanner {
        Scanner::new(
            self.config.clone(),
            Arc::new(self.logger.clone()),
            device_camera,
            Arc::new(Mutex::new(self.device_display.clone())),
            image_classifier,
            self.log_store.clone(),
        )
    }

    /// Plain skin-toned frame with a single marker pixel at the bottom-left.
    pub fn frame(width: u32, height: u32) -> DynamicImage {
        let image = RgbImage::from_fn(width, height, |x, y| {
            if x == 0 && y == height - 1 {
                MARKER
            } else {
                Rgb([224, 172, 150])
            }
        });
        DynamicImage::ImageRgb8(image)
    }
}

pub fn start(
    scanner: &Scanner,
) -> JoinHandle<Result<(), Box<dyn std::error::Error + Send + Sync>>> {
    let scanner = scanner.clone();
    std::thread::spawn(move || scanner.run())
}

pub fn stop(
    scanner: &Scanner,
    runtime: JoinHandle<Result<(), Box<dyn std::error::Error + Send + Sync>>>,
) {
    scanner.stop();
    runtime.join().unwrap().unwrap();
}

/// Polls `condition` until it holds or `timeout` passes.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    condition()
}
