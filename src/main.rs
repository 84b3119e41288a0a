use skin_scan::config::{Config, DisplayMode};
use skin_scan::device_camera::impl_fake::DeviceCameraFake;
use skin_scan::device_camera::impl_image_file::DeviceCameraImageFile;
use skin_scan::device_camera::interface::DeviceCamera;
use skin_scan::device_display::impl_console::DeviceDisplayConsole;
use skin_scan::device_display::impl_gui::DeviceDisplayGui;
use skin_scan::image_classifier::select::image_classifier_for;
use skin_scan::library::logger::impl_console::LoggerConsole;
use skin_scan::library::logger::interface::Logger;
use skin_scan::log_store::LogStoreHandle;
use skin_scan::scanner::main::Scanner;
use std::error::Error;
use std::io::BufRead;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

type RunResult = Result<(), Box<dyn Error + Send + Sync>>;

fn main() -> RunResult {
    let config = Config::default();

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));

    let device_camera: Arc<dyn DeviceCamera + Send + Sync> = match &config.camera.image_path {
        Some(path) => Arc::new(DeviceCameraImageFile::new(
            path.clone(),
            config.camera.frame_interval,
            logger.clone(),
        )),
        None => Arc::new(DeviceCameraFake::new(config.camera.clone(), logger.clone())),
    };

    let image_classifier = image_classifier_for(&config, logger.clone());

    let log_store = LogStoreHandle::new();

    match config.display_mode {
        DisplayMode::Window => {
            let device_display = Arc::new(Mutex::new(DeviceDisplayGui::new()));
            let scanner = Scanner::new(
                config.clone(),
                logger.clone(),
                device_camera,
                device_display.clone(),
                image_classifier,
                log_store.clone(),
            );
            let window = device_display
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .window(log_store, scanner.sender(), config.display_timezone);

            let runtime = spawn_runtime(&scanner);
            let closed = window.run();
            scanner.stop();
            join_runtime(runtime)?;
            closed
        }
        DisplayMode::Console => {
            let device_display = Arc::new(Mutex::new(DeviceDisplayConsole::new()));
            let scanner = Scanner::new(
                config.clone(),
                logger.clone(),
                device_camera,
                device_display,
                image_classifier,
                log_store,
            );

            let runtime = spawn_runtime(&scanner);
            logger.info("Press Enter to take a photo, q to quit")?;
            for line in std::io::stdin().lock().lines() {
                if line?.trim() == "q" {
                    break;
                }
                scanner.capture_now();
            }
            scanner.stop();
            join_runtime(runtime)
        }
    }
}

fn spawn_runtime(scanner: &Scanner) -> JoinHandle<RunResult> {
    let scanner = scanner.clone();
    std::thread::spawn(move || scanner.run())
}

fn join_runtime(runtime: JoinHandle<RunResult>) -> RunResult {
    match runtime.join() {
        Ok(result) => result,
        Err(_) => Err("runtime thread panicked".into()),
    }
}
