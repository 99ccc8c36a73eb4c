use chrono::DateTime;
use derive_more::{Constructor, Display, From, Into};
use std::cmp::Ordering;

/// Value Object - Price level
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Constructor, Display)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Value Object - Instant in milliseconds since the Unix epoch.
///
/// Timestamps written without an offset are stored as if they were UTC, so
/// formatting them back in UTC reproduces the original wall-clock text.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    From,
    Into,
    Display,
)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Largest distance from the epoch a browser `Date` can hold (100M days).
    pub const MAX_MILLIS: i64 = 8_640_000_000_000_000;

    pub fn from_millis(value: i64) -> Self {
        Self(value)
    }

    /// `None` for instants outside the `Date` range or chrono's calendar.
    pub fn checked_from_millis(value: i64) -> Option<Self> {
        ((-Self::MAX_MILLIS..=Self::MAX_MILLIS).contains(&value)
            && DateTime::from_timestamp_millis(value).is_some())
            .then_some(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }
}

/// Value Object - Open/high/low/close of one interval
#[derive(Debug, Clone, Copy, PartialEq, Constructor)]
pub struct Ohlc {
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl Ohlc {
    /// `high` covers the body and `low` sits under it. Input is not required
    /// to satisfy this; rendering copes either way.
    pub fn is_consistent(&self) -> bool {
        self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
    }

    pub fn direction(&self) -> Direction {
        Direction::of(self.open, self.close)
    }
}

/// Value Object - Indicator values supplied with each point
#[derive(Debug, Clone, Copy, PartialEq, Constructor)]
pub struct IndicatorValues {
    pub ma10: Price,
    pub bb_upper: Price,
    pub bb_lower: Price,
}

/// Candle colouring class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Direction {
    #[display(fmt = "up")]
    Up,
    #[display(fmt = "down")]
    Down,
}

impl Direction {
    /// A flat candle (close == open) counts as up.
    pub fn of(open: Price, close: Price) -> Self {
        if close.value() >= open.value() { Direction::Up } else { Direction::Down }
    }
}
