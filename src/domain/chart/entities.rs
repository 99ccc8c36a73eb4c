use super::scales::{LinearScale, TimeScale, ZoomTransform};
use super::value_objects::{ChartLayout, Viewport};
use crate::domain::market_data::{PricePoint, PriceSeries};

/// Time domain used when the series is empty: one minute from the epoch.
pub const EMPTY_TIME_DOMAIN: (f64, f64) = (0.0, 60_000.0);
/// Value domain used when the series is empty.
pub const EMPTY_VALUE_DOMAIN: (f64, f64) = (0.0, 1.0);

/// Domain entity - a chart session over one loaded series.
///
/// Full scales are fixed at construction from the global extent and the
/// content box; zooming never modifies them, it derives new ones.
#[derive(Debug, Clone)]
pub struct Chart {
    series: PriceSeries,
    layout: ChartLayout,
    full_time: TimeScale,
    full_value: LinearScale,
}

impl Chart {
    pub fn new(series: PriceSeries, layout: ChartLayout) -> Self {
        let time_domain = series
            .time_extent()
            .map(|(lo, hi)| (lo.as_f64(), hi.as_f64()))
            .unwrap_or(EMPTY_TIME_DOMAIN);
        let value_domain = series.band_extent().unwrap_or(EMPTY_VALUE_DOMAIN);
        let full_time = TimeScale::new(time_domain, (0.0, layout.width));
        let full_value = LinearScale::new(value_domain, (layout.height, 0.0));
        Self { series, layout, full_time, full_value }
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn full_time_scale(&self) -> &TimeScale {
        &self.full_time
    }

    pub fn full_value_scale(&self) -> &LinearScale {
        &self.full_value
    }

    pub fn has_data(&self) -> bool {
        !self.series.is_empty()
    }

    /// The unzoomed window.
    pub fn initial_viewport(&self) -> Viewport {
        Viewport::new(self.full_time.domain(), self.full_value.domain())
    }

    /// Both full scales seen through the same transform.
    pub fn viewport_for(&self, transform: &ZoomTransform) -> Viewport {
        Viewport::new(
            self.full_time.rescale_x(transform).domain(),
            self.full_value.rescale_y(transform).domain(),
        )
    }

    /// Scales mapping the given window onto the content box.
    pub fn scales_for(&self, viewport: &Viewport) -> (TimeScale, LinearScale) {
        (
            self.full_time.with_domain(viewport.time_domain),
            self.full_value.with_domain(viewport.value_domain),
        )
    }

    pub fn visible_points(&self, viewport: &Viewport) -> Vec<&PricePoint> {
        let (t0, t1) = viewport.time_domain;
        self.series.visible(t0.min(t1), t0.max(t1))
    }

    /// Close of the globally latest point; independent of any viewport.
    pub fn latest_close(&self) -> Option<f64> {
        self.series.latest().map(PricePoint::close)
    }
}
