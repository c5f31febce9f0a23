use crate::captured_image::CapturedImage;
use crate::image_classifier::interface::{ImageClassifier, PredictError, PredictionResult};
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution, Uniform};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const CLASS_NAMES: [&str; 10] = [
    "Tomato_Bacterial_spot",
    "Tomato_Early_blight",
    "Tomato_Late_blight",
    "Tomato_Leaf_Mold",
    "Tomato_Septoria_leaf_spot",
    "Tomato_Spider_mites_Two_spotted_spider_mite",
    "Tomato__Target_Spot",
    "Tomato_Tomato_YellowLeaf_Curl_Virus",
    "Tomato__Tomato_mosaic_virus",
    "Tomato_healthy",
];

#[derive(Debug, Clone)]
pub enum FakeOutcome {
    Random,
    #[cfg(test)]
    Succeed(PredictionResult),
    #[cfg(test)]
    Fail(String),
}

pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    outcome: FakeOutcome,
    delay: Duration,
    calls: AtomicUsize,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("classifier").with_namespace("fake"),
            outcome: FakeOutcome::Random,
            delay: Duration::from_millis(500),
            calls: AtomicUsize::new(0),
        }
    }

    #[cfg(test)]
    pub fn with_outcome(mut self, outcome: FakeOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    #[cfg(test)]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[cfg(test)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn random_prediction(&self) -> Result<PredictionResult, PredictError> {
        let mut rng = rand::rng();

        let index_dist = Uniform::new(0, CLASS_NAMES.len())
            .map_err(|e| PredictError::Malformed(e.to_string()))?;
        let confidence_dist =
            Uniform::new_inclusive(0.5, 1.0).map_err(|e| PredictError::Malformed(e.to_string()))?;

        Ok(PredictionResult {
            predicted_class: CLASS_NAMES[index_dist.sample(&mut rng)].to_string(),
            confidence: confidence_dist.sample(&mut rng),
        })
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn predict(&self, image: &CapturedImage) -> Result<PredictionResult, PredictError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self
            .logger
            .info(&format!("Classifying {}...", image.describe()));

        std::thread::sleep(self.delay);

        match &self.outcome {
            FakeOutcome::Random => self.random_prediction(),
            #[cfg(test)]
            FakeOutcome::Succeed(result) => Ok(result.clone()),
            #[cfg(test)]
            FakeOutcome::Fail(message) => Err(PredictError::Malformed(message.clone())),
        }
    }

    fn ping(&self) -> Result<String, PredictError> {
        Ok("fake classifier ready".to_string())
    }
}
