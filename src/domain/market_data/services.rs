use serde_json::{Map, Value};

use crate::domain::errors::ValidationError;
use crate::domain::logging::LogComponent;
use crate::log_warn;
use crate::domain::market_data::{
    IndicatorValues, Ohlc, Price, PricePoint, PriceSeries, Timestamp,
};
use crate::time_utils::parse_timestamp;

/// Numeric fields every record must carry, in the order they are checked.
pub const NUMERIC_FIELDS: [&str; 7] = ["open", "high", "low", "close", "ma10", "bb_upper", "bb_lower"];

/// Domain service turning raw price history documents into a validated series.
///
/// Any defect rejects the whole document: nothing partially parsed ever
/// reaches rendering.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataValidationService;

impl DataValidationService {
    pub fn new() -> Self {
        Self
    }

    /// Parse a JSON document (an array of records) into a series.
    pub fn parse_document(&self, body: &str) -> Result<PriceSeries, ValidationError> {
        let document: Value = serde_json::from_str(body)
            .map_err(|e| ValidationError::MalformedJson(e.to_string()))?;
        self.parse_value(&document)
    }

    /// Validate an already decoded JSON value.
    pub fn parse_value(&self, document: &Value) -> Result<PriceSeries, ValidationError> {
        let records = document.as_array().ok_or(ValidationError::NotAnArray)?;

        let points = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let record = record.as_object().ok_or(ValidationError::NotAnObject { index })?;
                self.parse_record(index, record)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let inconsistent = points.iter().filter(|p| !p.ohlc.is_consistent()).count();
        if inconsistent > 0 {
            log_warn!(
                LogComponent::Domain("DataValidation"),
                "{} of {} records have high/low outside the body",
                inconsistent,
                points.len()
            );
        }

        Ok(PriceSeries::new(points))
    }

    fn parse_record(
        &self,
        index: usize,
        record: &Map<String, Value>,
    ) -> Result<PricePoint, ValidationError> {
        let timestamp = Self::timestamp_field(index, record)?;
        let number = |field: &'static str| Self::numeric_field(index, record, field).map(Price::from);

        let ohlc = Ohlc::new(number("open")?, number("high")?, number("low")?, number("close")?);
        let indicators =
            IndicatorValues::new(number("ma10")?, number("bb_upper")?, number("bb_lower")?);

        Ok(PricePoint::new(timestamp, ohlc, indicators))
    }

    fn timestamp_field(
        index: usize,
        record: &Map<String, Value>,
    ) -> Result<Timestamp, ValidationError> {
        let raw = match record.get("timestamp") {
            None | Some(Value::Null) => {
                return Err(ValidationError::MissingField { index, field: "timestamp" });
            }
            Some(raw) => raw,
        };
        let parsed = match raw {
            Value::String(text) => parse_timestamp(text).map(|t| t.value()),
            // Epoch milliseconds, as a Date constructor would take them
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64)),
            _ => None,
        }
        .and_then(Timestamp::checked_from_millis);
        parsed.ok_or_else(|| ValidationError::InvalidTimestamp { index, raw: raw.to_string() })
    }

    fn numeric_field(
        index: usize,
        record: &Map<String, Value>,
        field: &'static str,
    ) -> Result<f64, ValidationError> {
        let raw = match record.get(field) {
            None | Some(Value::Null) => return Err(ValidationError::MissingField { index, field }),
            Some(raw) => raw,
        };
        let parsed = match raw {
            Value::Number(n) => n.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed
            .filter(|v| v.is_finite())
            .ok_or_else(|| ValidationError::InvalidNumber { index, field, raw: raw.to_string() })
    }
}
