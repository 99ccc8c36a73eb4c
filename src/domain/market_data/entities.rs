pub use super::value_objects::{Direction, IndicatorValues, Ohlc, Price, Timestamp};
use std::sync::Arc;

/// Domain entity - one sample of the price history with its indicators
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub timestamp: Timestamp,
    pub ohlc: Ohlc,
    pub indicators: IndicatorValues,
}

impl PricePoint {
    pub fn new(timestamp: Timestamp, ohlc: Ohlc, indicators: IndicatorValues) -> Self {
        Self { timestamp, ohlc, indicators }
    }

    pub fn direction(&self) -> Direction {
        self.ohlc.direction()
    }

    pub fn close(&self) -> f64 {
        self.ohlc.close.value()
    }
}

/// Domain entity - the full loaded history, read-only after load.
///
/// Points are kept in input order, which is assumed to be ascending by
/// timestamp; nothing here re-sorts them.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    points: Arc<Vec<PricePoint>>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points: Arc::new(points) }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The point carrying the latest timestamp; on ties the later one wins.
    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.iter().max_by_key(|p| p.timestamp)
    }

    /// `[min, max]` timestamp across every point.
    pub fn time_extent(&self) -> Option<(Timestamp, Timestamp)> {
        let first = self.points.first()?.timestamp;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| {
            (lo.min(p.timestamp), hi.max(p.timestamp))
        }))
    }

    /// `[min(bb_lower), max(bb_upper)]` across every point.
    pub fn band_extent(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.indicators.bb_lower.value()), hi.max(p.indicators.bb_upper.value()))
        }))
    }

    /// Points with `start <= timestamp <= end`, in series order.
    pub fn visible(&self, start: f64, end: f64) -> Vec<&PricePoint> {
        self.points
            .iter()
            .filter(|p| {
                let t = p.timestamp.as_f64();
                t >= start && t <= end
            })
            .collect()
    }
}

impl From<Vec<PricePoint>> for PriceSeries {
    fn from(points: Vec<PricePoint>) -> Self {
        Self::new(points)
    }
}
