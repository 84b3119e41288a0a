use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use crate::log_store::LogStoreHandle;
use crate::scanner::core::{init, transition, Effect, Model, Msg};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};

/// Runtime for the capture pipeline. `run` owns the interactive loop: it is
/// the only place the model changes and the only writer of the log store.
#[derive(Clone)]
pub struct Scanner {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    pub image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    pub log_store: LogStoreHandle,
    pub model: Arc<Mutex<Model>>,
    pub(crate) event_sender: Sender<Msg>,
    event_receiver: Arc<Mutex<Receiver<Msg>>>,
}

impl Scanner {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        log_store: LogStoreHandle,
    ) -> Self {
        let (event_sender, event_receiver) = channel();
        let (initial_model, _) = init();

        Self {
            config,
            logger: logger.with_namespace("scanner"),
            device_camera,
            device_display,
            image_classifier,
            log_store,
            model: Arc::new(Mutex::new(initial_model)),
            event_sender,
            event_receiver: Arc::new(Mutex::new(event_receiver)),
        }
    }

    /// Handle for collaborators that post messages, e.g. a "capture now"
    /// button.
    pub fn sender(&self) -> Sender<Msg> {
        self.event_sender.clone()
    }

    pub fn send(&self, msg: Msg) {
        if self.event_sender.send(msg).is_err() {
            let _ = self.logger.warn("Runtime loop is gone; message dropped");
        }
    }

    pub fn capture_now(&self) {
        self.send(Msg::CaptureRequested);
    }

    pub fn stop(&self) {
        self.send(Msg::Stop);
    }

    /// Copy of the model as of the last processed message.
    pub fn snapshot(&self) -> Model {
        self.model
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (mut current_model, effects) = init();

        self.publish(&current_model);
        self.execute_effects(effects);

        loop {
            let msg = {
                let receiver = self
                    .event_receiver
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                receiver.recv()?
            };

            if let Msg::Stop = msg {
                let _ = self.logger.info("Stopping");
                if !current_model.is_idle() {
                    let _ = self.logger.warn(&format!(
                        "Dropping {} pending capture(s)",
                        current_model.captures.len()
                    ));
                }
                if let Err(e) = self.device_camera.stop() {
                    let _ = self.logger.warn(&format!("Camera did not stop cleanly: {}", e));
                }
                return Ok(());
            }

            if !matches!(msg, Msg::CameraEvent(_)) {
                let _ = self
                    .logger
                    .info(&format!("msg: {}", msg.to_display_string()));
            }

            let (new_model, effects) = transition(current_model, msg);
            current_model = new_model;

            let (inline, spawned): (Vec<Effect>, Vec<Effect>) =
                effects.into_iter().partition(Effect::runs_inline);

            for effect in inline {
                self.execute_effect(effect);
            }

            self.publish(&current_model);
            self.execute_effects(spawned);
        }
    }

    fn publish(&self, model: &Model) {
        *self.model.lock().unwrap_or_else(PoisonError::into_inner) = model.clone();

        if let Err(e) = self.render(model) {
            let _ = self.logger.warn(&format!("Render failed: {}", e));
        }
    }

    fn execute_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let _ = self
                .logger
                .info(&format!("effect: {}", effect.to_display_string()));
            let self_clone = self.clone();
            std::thread::spawn(move || self_clone.execute_effect(effect));
        }
    }
}
