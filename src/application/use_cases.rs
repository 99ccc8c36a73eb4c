use crate::domain::{
    chart::{Chart, ChartLayout},
    errors::LoadResult,
    logging::{LogComponent, LogLevel, get_logger},
    market_data::{DataValidationService, PriceHistoryRepository, PriceSeries},
};
use crate::{log_error, log_info, log_warn};

/// Use Case: fetch the price history once and validate it into a series
pub struct LoadPriceHistoryUseCase<R: PriceHistoryRepository> {
    repository: R,
    validation_service: DataValidationService,
}

impl<R: PriceHistoryRepository> LoadPriceHistoryUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository, validation_service: DataValidationService::new() }
    }

    /// Fetch and validate. Any failure is terminal; nothing is retried.
    pub async fn execute(&self) -> LoadResult<PriceSeries> {
        let source = self.repository.describe();
        log_info!(LogComponent::Application("LoadPriceHistory"), "📡 Loading price history from {}", source);

        let body = self.repository.fetch_document().await.inspect_err(|e| {
            log_error!(LogComponent::Application("LoadPriceHistory"), "❌ Fetch from {} failed: {}", source, e);
        })?;

        let series = self.validation_service.parse_document(&body).inspect_err(|e| {
            log_error!(LogComponent::Application("LoadPriceHistory"), "❌ Rejected price history: {}", e);
        })?;

        if series.is_empty() {
            log_warn!(
                LogComponent::Application("LoadPriceHistory"),
                "⚠️ Price history is empty; only axes will be drawn"
            );
        } else {
            get_logger().log_with_metadata(
                LogLevel::Info,
                LogComponent::Application("LoadPriceHistory"),
                &format!("✅ Loaded {} points", series.len()),
                &format!("source={}", source),
            );
        }
        Ok(series)
    }

    /// Load and open a chart session on the given layout.
    pub async fn open_chart(&self, layout: ChartLayout) -> LoadResult<Chart> {
        let series = self.execute().await?;
        Ok(Chart::new(series, layout))
    }
}
