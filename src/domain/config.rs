use serde::Deserialize;

use crate::domain::chart::{ChartTheme, Margins, ScaleExtent};
use crate::domain::errors::ValidationError;
use crate::domain::logging::LogLevel;

/// Default location of the price history, relative to the page.
pub const DEFAULT_DATA_URL: &str = "../data/market_snapshot_history.json";

/// Chart configuration. Every field is optional in the JSON form and falls
/// back to [`ChartConfig::default`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub data_url: String,
    pub margins: Margins,
    pub padding: f64,
    pub scale_extent: ScaleExtent,
    /// Share of the per-point slot taken by a candle body.
    pub candle_body_ratio: f64,
    pub price_decimals: usize,
    pub caption: String,
    pub log_level: LogLevel,
    pub theme: ChartTheme,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            margins: Margins::default(),
            padding: 10.0,
            scale_extent: ScaleExtent::default(),
            candle_body_ratio: 0.7,
            price_decimals: 3,
            caption: "Indicators: MA(10), BB(20)".to_string(),
            log_level: LogLevel::Info,
            theme: ChartTheme::default(),
        }
    }
}

impl ChartConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ValidationError> {
        let config: ChartConfig = serde_json::from_str(raw)
            .map_err(|e| ValidationError::InvalidConfig(e.to_string()))?;
        config.validated()
    }

    /// Reject values the chart cannot be drawn with.
    pub fn validated(self) -> Result<Self, ValidationError> {
        let ScaleExtent { min, max } = self.scale_extent;
        if !(min >= 1.0 && min <= max && max.is_finite()) {
            return Err(ValidationError::InvalidConfig(format!(
                "scale extent [{}, {}] must satisfy 1 <= min <= max",
                min, max
            )));
        }
        if !(self.candle_body_ratio > 0.0 && self.candle_body_ratio <= 1.0) {
            return Err(ValidationError::InvalidConfig(format!(
                "candle body ratio {} is outside (0, 1]",
                self.candle_body_ratio
            )));
        }
        let m = &self.margins;
        if [m.top, m.right, m.bottom, m.left, self.padding].iter().any(|v| !(*v >= 0.0)) {
            return Err(ValidationError::InvalidConfig(
                "margins and padding must be non-negative".to_string(),
            ));
        }
        Ok(self)
    }
}
