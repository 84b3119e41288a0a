use crate::disease_db;
use crate::image_classifier::interface::{rank, Classification, ClassifyError, ImageClassifier};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use rand::distr::{Distribution, Uniform};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

enum Behavior {
    Random,
    Scripted(Result<Vec<Classification>, ClassifyError>),
    Panic,
}

pub struct ImageClassifierFake {
    behavior: Behavior,
    delay: Duration,
    calls: AtomicUsize,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierFake {
    /// Random disease label with a random confidence on every call.
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::with_behavior(Behavior::Random, logger)
    }

    /// Returns the same outcome on every call.
    pub fn scripted(
        outcome: Result<Vec<Classification>, ClassifyError>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self::with_behavior(Behavior::Scripted(outcome), logger)
    }

    /// Panics inside `classify`, for exercising the runtime's recovery.
    pub fn panicking(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::with_behavior(Behavior::Panic, logger)
    }

    fn with_behavior(behavior: Behavior, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            behavior,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
        }
    }

    /// Simulated inference latency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn random_classifications(&self) -> Result<Vec<Classification>, ClassifyError> {
        let diseases = disease_db::all();
        let mut rng = rand::rng();

        let index_dist = Uniform::new(0, diseases.len())
            .map_err(|e| ClassifyError::ProcessingError(e.to_string()))?;
        let confidence_dist = Uniform::new(0.0f32, 1.0)
            .map_err(|e| ClassifyError::ProcessingError(e.to_string()))?;

        let top = Classification::new(
            diseases[index_dist.sample(&mut rng)].name,
            confidence_dist.sample(&mut rng),
        );
        let runner_up = Classification::new(
            diseases[index_dist.sample(&mut rng)].name,
            (1.0 - top.confidence) * confidence_dist.sample(&mut rng),
        );

        Ok(rank(vec![top, runner_up]))
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(&self, image: &DynamicImage) -> Result<Vec<Classification>, ClassifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.logger.info(&format!(
            "Classifying {}x{} image...",
            image.width(),
            image.height()
        ));

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        match &self.behavior {
            Behavior::Random => self.random_classifications(),
            Behavior::Scripted(outcome) => outcome.clone(),
            Behavior::Panic => panic!("fake classifier panicked"),
        }
    }
}
