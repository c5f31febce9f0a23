use crate::captured_image::CapturedImage;
use crate::config::Config;
use crate::image_classifier::interface::{ImageClassifier, PredictError, PredictionResult};
use crate::library::logger::interface::Logger;
use reqwest::blocking::{multipart, Client};
use reqwest::{StatusCode, Url};
use std::sync::Arc;

pub struct ImageClassifierHttp {
    client: Client,
    predict_url: Url,
    ping_url: Url,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierHttp {
    pub fn new(
        config: &Config,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let predict_url = Url::parse(&config.predict_url)
            .map_err(|e| format!("invalid predict url {:?}: {}", config.predict_url, e))?;
        let ping_url = predict_url.join("/ping")?;

        // reqwest's blocking client defaults to 30s; None keeps requests unbounded.
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            predict_url,
            ping_url,
            logger: logger.with_namespace("classifier").with_namespace("http"),
        })
    }
}

impl ImageClassifier for ImageClassifierHttp {
    fn predict(&self, image: &CapturedImage) -> Result<PredictionResult, PredictError> {
        let _ = self.logger.info(&format!(
            "POST {} with {}",
            self.predict_url,
            image.describe()
        ));

        let part = multipart::Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.predict_url.clone())
            .multipart(form)
            .send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(PredictError::Status(status));
        }

        let body = response.bytes()?;
        parse_prediction(&body)
    }

    fn ping(&self) -> Result<String, PredictError> {
        let response = self.client.get(self.ping_url.clone()).send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(PredictError::Status(status));
        }

        Ok(response.text()?)
    }
}

pub fn parse_prediction(body: &[u8]) -> Result<PredictionResult, PredictError> {
    let result: PredictionResult =
        serde_json::from_slice(body).map_err(|e| PredictError::Malformed(e.to_string()))?;

    if !(0.0..=1.0).contains(&result.confidence) {
        return Err(PredictError::Malformed(format!(
            "confidence {} outside [0, 1]",
            result.confidence
        )));
    }

    Ok(result)
}
