use crate::config::Config;
use crate::image_classifier::impl_http::ImageClassifierHttp;
use crate::library::logger::impl_fake::LoggerFake;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;

/// A prediction service running on an ephemeral port for one test.
pub struct Fixture {
    pub base_url: String,
    pub logger: LoggerFake,
    // Dropping the runtime stops the server.
    _runtime: tokio::runtime::Runtime,
}

impl Fixture {
    pub fn new(router: Router) -> Self {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let listener = runtime
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .unwrap();
        let addr = listener.local_addr().unwrap();

        runtime.spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            logger: LoggerFake::new(),
            _runtime: runtime,
        }
    }

    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url)
    }

    pub fn classifier(&self, request_timeout: Option<Duration>) -> ImageClassifierHttp {
        let config = Config {
            predict_url: self.predict_url(),
            request_timeout,
            ..Config::default()
        };
        ImageClassifierHttp::new(&config, Arc::new(self.logger.clone())).unwrap()
    }
}
