use gloo_net::http::Request;

use crate::domain::errors::AppError;
use crate::domain::logging::LogComponent;
use crate::domain::market_data::PriceHistoryRepository;
use crate::{log_debug, log_info};

/// Price history served as a static JSON file next to the page
#[derive(Debug, Clone)]
pub struct HttpPriceHistory {
    url: String,
}

impl HttpPriceHistory {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PriceHistoryRepository for HttpPriceHistory {
    async fn fetch_document(&self) -> Result<String, AppError> {
        log_info!(
            LogComponent::Infrastructure("HttpPriceHistory"),
            "📈 Fetching price history from: {}",
            self.url
        );

        let response = Request::get(&self.url)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("request to {} failed: {e}", self.url)))?;

        if !response.ok() {
            return Err(AppError::Network(format!(
                "{} answered HTTP {} {}",
                self.url,
                response.status(),
                response.status_text()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Network(format!("reading body of {} failed: {e}", self.url)))?;

        log_debug!(LogComponent::Infrastructure("HttpPriceHistory"), "received {} bytes", body.len());
        Ok(body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
