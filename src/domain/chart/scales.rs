//! Affine scales between data space and pixels, the zoom transform that
//! rescales them, and axis tick generation.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

use super::value_objects::Point;

/// Ticks requested from each axis; the generators land near this count.
pub const DEFAULT_TICK_COUNT: usize = 10;

/// Linear map from a numeric domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

fn normalize(value: f64, (a, b): (f64, f64)) -> f64 {
    let span = b - a;
    if span != 0.0 { (value - a) / span } else { 0.5 }
}

fn interpolate(t: f64, (a, b): (f64, f64)) -> f64 {
    a * (1.0 - t) + b * t
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Data value to pixel. A collapsed domain maps to the middle of the range.
    pub fn apply(&self, value: f64) -> f64 {
        interpolate(normalize(value, self.domain), self.range)
    }

    /// Pixel to data value.
    pub fn invert(&self, pixel: f64) -> f64 {
        interpolate(normalize(pixel, self.range), self.domain)
    }

    pub fn with_domain(&self, domain: (f64, f64)) -> Self {
        Self { domain, ..*self }
    }

    /// Domain seen through a zoom transform along the x axis.
    pub fn rescale_x(&self, transform: &ZoomTransform) -> Self {
        let (r0, r1) = self.range;
        self.with_domain((self.invert(transform.invert_x(r0)), self.invert(transform.invert_x(r1))))
    }

    /// Domain seen through a zoom transform along the y axis.
    pub fn rescale_y(&self, transform: &ZoomTransform) -> Self {
        let (r0, r1) = self.range;
        self.with_domain((self.invert(transform.invert_y(r0)), self.invert(transform.invert_y(r1))))
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        linear_ticks(self.domain.0, self.domain.1, count)
    }

    /// Labels for [`LinearScale::ticks`], with the precision the step needs
    /// and thousands grouping.
    pub fn tick_labels(&self, count: usize) -> Vec<(f64, String)> {
        let decimals = tick_decimals(self.domain.0, self.domain.1, count);
        self.ticks(count).into_iter().map(|v| (v, format_grouped(v, decimals))).collect()
    }
}

/// Linear scale over epoch milliseconds with calendar-aware ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { inner: LinearScale::new(domain, range) }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.inner.domain()
    }

    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }

    pub fn apply(&self, millis: f64) -> f64 {
        self.inner.apply(millis)
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        self.inner.invert(pixel)
    }

    pub fn with_domain(&self, domain: (f64, f64)) -> Self {
        Self { inner: self.inner.with_domain(domain) }
    }

    pub fn rescale_x(&self, transform: &ZoomTransform) -> Self {
        Self { inner: self.inner.rescale_x(transform) }
    }

    pub fn ticks(&self, count: usize) -> Vec<i64> {
        let (d0, d1) = self.domain();
        let (start, stop) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
        time_ticks(start, stop, count)
    }
}

/// 2-D zoom transform: `p' = p·k + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: ZoomTransform = ZoomTransform { k: 1.0, x: 0.0, y: 0.0 };

    pub fn new(k: f64, x: f64, y: f64) -> Self {
        Self { k, x, y }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.k + self.x, p.y * self.k + self.y)
    }

    pub fn invert(&self, p: Point) -> Point {
        Point::new(self.invert_x(p.x), self.invert_y(p.y))
    }

    pub fn invert_x(&self, x: f64) -> f64 {
        (x - self.x) / self.k
    }

    pub fn invert_y(&self, y: f64) -> f64 {
        (y - self.y) / self.k
    }

    /// Same translation, new scale factor.
    pub fn scaled(&self, k: f64) -> Self {
        if k == self.k { *self } else { Self { k, ..*self } }
    }

    /// Translate so that the data-space point `p1` lands on screen point `p0`.
    pub fn anchored(&self, p0: Point, p1: Point) -> Self {
        let x = p0.x - p1.x * self.k;
        let y = p0.y - p1.y * self.k;
        if x == self.x && y == self.y { *self } else { Self { x, y, ..*self } }
    }

    /// The transform undoing this one.
    pub fn inverse(&self) -> Self {
        Self { k: 1.0 / self.k, x: -self.x / self.k, y: -self.y / self.k }
    }
}

enum TickSpec {
    /// Ticks at `i * inc`.
    Multiply { i1: f64, i2: f64, inc: f64 },
    /// Ticks at `i / inc`, used for sub-unit steps to avoid drift.
    Divide { i1: f64, i2: f64, inc: f64 },
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(TickSpec, i32, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !(step.is_finite() && step > 0.0) {
        return None;
    }
    let power = step.log10().floor() as i32;
    let error = step / 10f64.powi(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    let spec = if power < 0 {
        let inc = 10f64.powi(-power) / factor;
        let mut i1 = (start * inc).round();
        let mut i2 = (stop * inc).round();
        if i1 / inc < start {
            i1 += 1.0;
        }
        if i2 / inc > stop {
            i2 -= 1.0;
        }
        TickSpec::Divide { i1, i2, inc }
    } else {
        let inc = 10f64.powi(power) * factor;
        let mut i1 = (start / inc).round();
        let mut i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
        TickSpec::Multiply { i1, i2, inc }
    };

    let (i1, i2) = match spec {
        TickSpec::Multiply { i1, i2, .. } | TickSpec::Divide { i1, i2, .. } => (i1, i2),
    };
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((spec, power, factor))
}

/// Round tick values (1, 2 or 5 times a power of ten) inside `[start, stop]`.
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reversed = stop < start;
    let (lo, hi) = if reversed { (stop, start) } else { (start, stop) };

    let Some((spec, _, _)) = tick_spec(lo, hi, count as f64) else {
        return Vec::new();
    };
    let mut ticks: Vec<f64> = match spec {
        TickSpec::Multiply { i1, i2, inc } if i2 >= i1 => {
            (0..=(i2 - i1) as i64).map(|i| (i1 + i as f64) * inc).collect()
        }
        TickSpec::Divide { i1, i2, inc } if i2 >= i1 => {
            (0..=(i2 - i1) as i64).map(|i| (i1 + i as f64) / inc).collect()
        }
        _ => Vec::new(),
    };
    if reversed {
        ticks.reverse();
    }
    ticks
}

/// Distance between consecutive ticks of [`linear_ticks`].
pub fn tick_step(start: f64, stop: f64, count: usize) -> Option<f64> {
    let (lo, hi) = if stop < start { (stop, start) } else { (start, stop) };
    let (_, power, factor) = tick_spec(lo, hi, count as f64)?;
    Some(factor * 10f64.powi(power))
}

/// Fraction digits needed to tell adjacent ticks apart.
pub fn tick_decimals(start: f64, stop: f64, count: usize) -> usize {
    let (lo, hi) = if stop < start { (stop, start) } else { (start, stop) };
    match tick_spec(lo, hi, count as f64) {
        Some((_, power, factor)) => {
            let exponent = if factor >= 10.0 { power + 1 } else { power };
            (-exponent).max(0) as usize
        }
        None => 0,
    }
}

/// Fixed-point rendering with `,` thousands groups and a typographic minus.
pub fn format_grouped(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero { format!("\u{2212}{}", grouped) } else { grouped }
}

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;
const MONTH_MS: i64 = 30 * DAY_MS;
const YEAR_MS: i64 = 365 * DAY_MS;
const MAX_TICK_CANDIDATES: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

const TICK_INTERVALS: [(TimeUnit, i64, i64); 18] = [
    (TimeUnit::Second, 1, SECOND_MS),
    (TimeUnit::Second, 5, 5 * SECOND_MS),
    (TimeUnit::Second, 15, 15 * SECOND_MS),
    (TimeUnit::Second, 30, 30 * SECOND_MS),
    (TimeUnit::Minute, 1, MINUTE_MS),
    (TimeUnit::Minute, 5, 5 * MINUTE_MS),
    (TimeUnit::Minute, 15, 15 * MINUTE_MS),
    (TimeUnit::Minute, 30, 30 * MINUTE_MS),
    (TimeUnit::Hour, 1, HOUR_MS),
    (TimeUnit::Hour, 3, 3 * HOUR_MS),
    (TimeUnit::Hour, 6, 6 * HOUR_MS),
    (TimeUnit::Hour, 12, 12 * HOUR_MS),
    (TimeUnit::Day, 1, DAY_MS),
    (TimeUnit::Day, 2, 2 * DAY_MS),
    (TimeUnit::Week, 1, WEEK_MS),
    (TimeUnit::Month, 1, MONTH_MS),
    (TimeUnit::Month, 3, 3 * MONTH_MS),
    (TimeUnit::Year, 1, YEAR_MS),
];

fn naive(millis: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
}

fn millis_of(dt: NaiveDateTime) -> i64 {
    dt.and_utc().timestamp_millis()
}

impl TimeUnit {
    fn floor(self, millis: i64) -> Option<i64> {
        match self {
            TimeUnit::Second => millis.checked_sub(millis.rem_euclid(SECOND_MS)),
            TimeUnit::Minute => millis.checked_sub(millis.rem_euclid(MINUTE_MS)),
            TimeUnit::Hour => millis.checked_sub(millis.rem_euclid(HOUR_MS)),
            TimeUnit::Day => millis.checked_sub(millis.rem_euclid(DAY_MS)),
            TimeUnit::Week => {
                let day = naive(millis.checked_sub(millis.rem_euclid(DAY_MS))?)?;
                let back = day.weekday().num_days_from_sunday() as i64;
                day.checked_sub_signed(Duration::days(back)).map(millis_of)
            }
            TimeUnit::Month => {
                let dt = naive(millis)?;
                NaiveDate::from_ymd_opt(dt.year(), dt.month(), 1)?
                    .and_hms_opt(0, 0, 0)
                    .map(millis_of)
            }
            TimeUnit::Year => {
                let dt = naive(millis)?;
                NaiveDate::from_ymd_opt(dt.year(), 1, 1)?.and_hms_opt(0, 0, 0).map(millis_of)
            }
        }
    }

    fn next(self, millis: i64) -> Option<i64> {
        match self {
            TimeUnit::Second => millis.checked_add(SECOND_MS),
            TimeUnit::Minute => millis.checked_add(MINUTE_MS),
            TimeUnit::Hour => millis.checked_add(HOUR_MS),
            TimeUnit::Day => millis.checked_add(DAY_MS),
            TimeUnit::Week => millis.checked_add(WEEK_MS),
            TimeUnit::Month => {
                let dt = naive(millis)?;
                let (year, month) =
                    if dt.month() == 12 { (dt.year() + 1, 1) } else { (dt.year(), dt.month() + 1) };
                NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0).map(millis_of)
            }
            TimeUnit::Year => {
                let dt = naive(millis)?;
                NaiveDate::from_ymd_opt(dt.year() + 1, 1, 1)?.and_hms_opt(0, 0, 0).map(millis_of)
            }
        }
    }

    /// Calendar field that `every(step)` filters on.
    fn field(self, millis: i64) -> Option<i64> {
        let dt = naive(millis)?;
        Some(match self {
            TimeUnit::Second => dt.second() as i64,
            TimeUnit::Minute => dt.minute() as i64,
            TimeUnit::Hour => dt.hour() as i64,
            TimeUnit::Day => dt.day() as i64 - 1,
            TimeUnit::Week => 0,
            TimeUnit::Month => dt.month0() as i64,
            TimeUnit::Year => dt.year() as i64,
        })
    }
}

fn calendar_ticks(unit: TimeUnit, step: i64, start: i64, stop: i64) -> Vec<i64> {
    let mut ticks = Vec::new();
    let Some(mut cursor) = unit.floor(start) else {
        return ticks;
    };
    if cursor < start {
        match unit.next(cursor) {
            Some(next) => cursor = next,
            None => return ticks,
        }
    }
    for _ in 0..MAX_TICK_CANDIDATES {
        if cursor > stop {
            break;
        }
        if unit.field(cursor).is_some_and(|f| f.rem_euclid(step.max(1)) == 0) {
            ticks.push(cursor);
        }
        match unit.next(cursor) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    ticks
}

/// Tick instants for a time axis: picks the calendar interval closest to
/// `span / count`, from one second up to years.
pub fn time_ticks(start: f64, stop: f64, count: usize) -> Vec<i64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    let target = (stop - start).abs() / count as f64;
    let lo = start.ceil() as i64;
    let hi = stop.floor() as i64;

    let index = TICK_INTERVALS.partition_point(|&(_, _, duration)| (duration as f64) <= target);
    if index == 0 {
        let step = tick_step(start, stop, count).unwrap_or(1.0).max(1.0);
        return linear_ticks(start, stop, count)
            .into_iter()
            .map(|v| v as i64)
            .filter(|v| (*v as f64 / step).fract() == 0.0 && *v >= lo && *v <= hi)
            .collect();
    }
    if index == TICK_INTERVALS.len() {
        let years = tick_step(start / YEAR_MS as f64, stop / YEAR_MS as f64, count).unwrap_or(1.0);
        return calendar_ticks(TimeUnit::Year, years.floor().max(1.0) as i64, lo, hi);
    }
    let (below, above) = (TICK_INTERVALS[index - 1], TICK_INTERVALS[index]);
    let (unit, step, _) =
        if target / (below.2 as f64) < (above.2 as f64) / target { below } else { above };
    calendar_ticks(unit, step, lo, hi)
}
