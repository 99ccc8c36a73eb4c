use crate::application::interaction::{OverlayState, PRICE_BOX, TIME_BOX, Tooltip};
use crate::domain::{
    chart::{
        Chart, ChartLayout, ChartTheme, Curve, DEFAULT_TICK_COUNT, LayerKind, LinearScale, Point,
        Scene, Shape, ShapeClass, Size, Stroke, TextAnchor, TextBaseline, TimeScale, Viewport,
    },
    config::ChartConfig,
    logging::LogComponent,
    market_data::{Direction, PricePoint},
};
use crate::time_utils::format_time_tick;
use crate::{log_debug, log_trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Visible candles above which geometry is computed in parallel.
pub const PARALLEL_THRESHOLD: usize = 100;
/// Outer tick length of both axes.
pub const TICK_SIZE: f64 = 6.0;
const TICK_LABEL_GAP: f64 = 9.0;
const AXIS_FONT_PX: f64 = 10.0;
const TOOLTIP_FONT_PX: f64 = 11.0;
const CAPTION_FONT_PX: f64 = 12.0;
const MESSAGE_FONT_PX: f64 = 14.0;
/// Baseline of the indicator caption inside the content box.
const CAPTION_POSITION: Point = Point { x: 0.0, y: 60.0 };

/// Candle body width for `visible` candles sharing `content_width`.
/// `None` when nothing is visible.
pub fn candle_width(content_width: f64, visible: usize, body_ratio: f64) -> Option<f64> {
    (visible > 0).then(|| content_width / visible as f64 * body_ratio)
}

/// Pixel geometry of one candle, precomputed before emitting shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleGeometry {
    pub x: f64,
    pub high_y: f64,
    pub low_y: f64,
    pub body_top: f64,
    pub body_height: f64,
    pub direction: Direction,
}

impl CandleGeometry {
    /// Safe for any OHLC values: wick and body are computed independently,
    /// so high/low outside the body only changes how the candle looks.
    pub fn compute(point: &PricePoint, time: &TimeScale, value: &LinearScale) -> Self {
        let ohlc = &point.ohlc;
        let open_y = value.apply(ohlc.open.value());
        let close_y = value.apply(ohlc.close.value());
        Self {
            x: time.apply(point.timestamp.as_f64()),
            high_y: value.apply(ohlc.high.value()),
            low_y: value.apply(ohlc.low.value()),
            body_top: value.apply(ohlc.open.value().max(ohlc.close.value())),
            body_height: (open_y - close_y).abs(),
            direction: point.direction(),
        }
    }
}

/// Renderer: builds the backend-neutral scene for one frame
#[derive(Debug, Clone)]
pub struct ChartRenderingService {
    theme: ChartTheme,
    body_ratio: f64,
    price_decimals: usize,
    caption: String,
}

impl Default for ChartRenderingService {
    fn default() -> Self {
        Self::new(&ChartConfig::default())
    }
}

impl ChartRenderingService {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            theme: config.theme.clone(),
            body_ratio: config.candle_body_ratio,
            price_decimals: config.price_decimals,
            caption: config.caption.clone(),
        }
    }

    pub fn theme(&self) -> &ChartTheme {
        &self.theme
    }

    /// Rebuild the whole frame for `viewport`. Nothing carries over from the
    /// previous frame.
    pub fn build_scene(&self, chart: &Chart, viewport: &Viewport, overlay: &OverlayState) -> Scene {
        let layout = chart.layout();
        let (time, value) = chart.scales_for(viewport);
        let mut scene = Scene::new(layout.surface_size(), layout.origin(), self.theme.background);

        self.push_grid(&mut scene, layout, &time, &value);

        let visible = chart.visible_points(viewport);
        log_trace!(
            LogComponent::Application("ChartRendering"),
            "frame: {} of {} points visible",
            visible.len(),
            chart.series().len()
        );
        self.push_candles(&mut scene, layout, &visible, &time, &value);
        self.push_indicators(&mut scene, &visible, &time, &value);

        self.push_time_axis(&mut scene, layout, &time);
        self.push_value_axis(&mut scene, layout, &value);

        if let Some(close) = chart.latest_close() {
            self.push_price_marker(&mut scene, layout, value.apply(close), close);
        }
        scene.push(LayerKind::Annotations, self.caption_shape());

        self.push_overlay(&mut scene, layout, overlay);
        scene
    }

    /// Frame shown instead of the chart when loading failed.
    pub fn build_message_scene(&self, layout: &ChartLayout, message: &str) -> Scene {
        log_debug!(LogComponent::Application("ChartRendering"), "message frame: {}", message);
        let mut scene = Scene::new(layout.surface_size(), layout.origin(), self.theme.background);
        scene.push(
            LayerKind::Annotations,
            Shape::Text {
                class: ShapeClass::Message,
                at: Point::new(layout.width / 2.0, layout.height / 2.0),
                content: message.to_string(),
                color: self.theme.axis,
                font_px: MESSAGE_FONT_PX,
                anchor: TextAnchor::Middle,
                baseline: TextBaseline::Middle,
            },
        );
        scene
    }

    fn push_grid(&self, scene: &mut Scene, layout: &ChartLayout, time: &TimeScale, value: &LinearScale) {
        let stroke = Stroke::solid(self.theme.grid, 1.0);
        for tick in value.ticks(DEFAULT_TICK_COUNT) {
            let y = value.apply(tick);
            scene.push(
                LayerKind::Grid,
                Shape::Line {
                    class: ShapeClass::Gridline,
                    from: Point::new(0.0, y),
                    to: Point::new(layout.width, y),
                    stroke,
                },
            );
        }
        for tick in time.ticks(DEFAULT_TICK_COUNT) {
            let x = time.apply(tick as f64);
            scene.push(
                LayerKind::Grid,
                Shape::Line {
                    class: ShapeClass::Gridline,
                    from: Point::new(x, 0.0),
                    to: Point::new(x, layout.height),
                    stroke,
                },
            );
        }
    }

    fn candle_geometry(
        &self,
        visible: &[&PricePoint],
        time: &TimeScale,
        value: &LinearScale,
    ) -> Vec<CandleGeometry> {
        #[cfg(feature = "parallel")]
        if visible.len() >= PARALLEL_THRESHOLD {
            log_debug!(
                LogComponent::Application("ChartRendering"),
                "🔥 computing {} candles on {} threads",
                visible.len(),
                rayon::current_num_threads()
            );
            return visible.par_iter().map(|p| CandleGeometry::compute(p, time, value)).collect();
        }
        visible.iter().map(|p| CandleGeometry::compute(p, time, value)).collect()
    }

    fn push_candles(
        &self,
        scene: &mut Scene,
        layout: &ChartLayout,
        visible: &[&PricePoint],
        time: &TimeScale,
        value: &LinearScale,
    ) {
        let Some(width) = candle_width(layout.width, visible.len(), self.body_ratio) else {
            return;
        };
        let geometry = self.candle_geometry(visible, time, value);

        let layer = scene.layer_mut(LayerKind::Data);
        for candle in &geometry {
            let color = match candle.direction {
                Direction::Up => self.theme.up,
                Direction::Down => self.theme.down,
            };
            layer.push(Shape::Line {
                class: ShapeClass::CandleWick(candle.direction),
                from: Point::new(candle.x, candle.high_y),
                to: Point::new(candle.x, candle.low_y),
                stroke: Stroke::solid(color, 1.0),
            });
        }
        for candle in &geometry {
            let color = match candle.direction {
                Direction::Up => self.theme.up,
                Direction::Down => self.theme.down,
            };
            layer.push(Shape::Rect {
                class: ShapeClass::CandleBody(candle.direction),
                origin: Point::new(candle.x - width / 2.0, candle.body_top),
                size: Size::new(width, candle.body_height),
                fill: Some(color),
                stroke: None,
            });
        }
    }

    fn push_indicators(
        &self,
        scene: &mut Scene,
        visible: &[&PricePoint],
        time: &TimeScale,
        value: &LinearScale,
    ) {
        if visible.is_empty() {
            return;
        }
        let line = |pick: fn(&PricePoint) -> f64| -> Vec<Point> {
            visible
                .iter()
                .map(|p| Point::new(time.apply(p.timestamp.as_f64()), value.apply(pick(p))))
                .collect()
        };

        let series = [
            (
                ShapeClass::MaLine,
                line(|p| p.indicators.ma10.value()),
                Curve::CatmullRom { alpha: 0.5 },
                Stroke::solid(self.theme.ma_line, 1.5),
            ),
            (
                ShapeClass::BbUpper,
                line(|p| p.indicators.bb_upper.value()),
                Curve::Linear,
                Stroke::solid(self.theme.bb_line, 1.0),
            ),
            (
                ShapeClass::BbLower,
                line(|p| p.indicators.bb_lower.value()),
                Curve::Linear,
                Stroke::solid(self.theme.bb_line, 1.0),
            ),
        ];
        for (class, points, curve, stroke) in series {
            scene.push(LayerKind::Data, Shape::Path { class, points, curve, stroke });
        }
    }

    fn axis_label(&self, at: Point, content: String, anchor: TextAnchor, baseline: TextBaseline) -> Shape {
        Shape::Text {
            class: ShapeClass::AxisLabel,
            at,
            content,
            color: self.theme.axis,
            font_px: AXIS_FONT_PX,
            anchor,
            baseline,
        }
    }

    fn push_time_axis(&self, scene: &mut Scene, layout: &ChartLayout, time: &TimeScale) {
        let stroke = Stroke::solid(self.theme.axis, 1.0);
        let y = layout.height;
        scene.push(
            LayerKind::Axes,
            Shape::Path {
                class: ShapeClass::AxisDomain,
                points: vec![
                    Point::new(0.0, y + TICK_SIZE),
                    Point::new(0.0, y),
                    Point::new(layout.width, y),
                    Point::new(layout.width, y + TICK_SIZE),
                ],
                curve: Curve::Linear,
                stroke,
            },
        );
        for tick in time.ticks(DEFAULT_TICK_COUNT) {
            let x = time.apply(tick as f64);
            scene.push(
                LayerKind::Axes,
                Shape::Line {
                    class: ShapeClass::AxisTick,
                    from: Point::new(x, y),
                    to: Point::new(x, y + TICK_SIZE),
                    stroke,
                },
            );
            let label = self.axis_label(
                Point::new(x, y + TICK_LABEL_GAP),
                format_time_tick(tick),
                TextAnchor::Middle,
                TextBaseline::Hanging,
            );
            scene.push(LayerKind::Axes, label);
        }
    }

    fn push_value_axis(&self, scene: &mut Scene, layout: &ChartLayout, value: &LinearScale) {
        let stroke = Stroke::solid(self.theme.axis, 1.0);
        let x = layout.width;
        scene.push(
            LayerKind::Axes,
            Shape::Path {
                class: ShapeClass::AxisDomain,
                points: vec![
                    Point::new(x + TICK_SIZE, layout.height),
                    Point::new(x, layout.height),
                    Point::new(x, 0.0),
                    Point::new(x + TICK_SIZE, 0.0),
                ],
                curve: Curve::Linear,
                stroke,
            },
        );
        for (tick, text) in value.tick_labels(DEFAULT_TICK_COUNT) {
            let y = value.apply(tick);
            scene.push(
                LayerKind::Axes,
                Shape::Line {
                    class: ShapeClass::AxisTick,
                    from: Point::new(x, y),
                    to: Point::new(x + TICK_SIZE, y),
                    stroke,
                },
            );
            let label = self.axis_label(
                Point::new(x + TICK_LABEL_GAP, y),
                text,
                TextAnchor::Start,
                TextBaseline::Middle,
            );
            scene.push(LayerKind::Axes, label);
        }
    }

    /// Reference line and boxed label at the latest close, pinned to the
    /// right edge whatever the viewport shows.
    fn push_price_marker(&self, scene: &mut Scene, layout: &ChartLayout, y: f64, close: f64) {
        let color = self.theme.price_marker;
        scene.push(
            LayerKind::Annotations,
            Shape::Line {
                class: ShapeClass::CurrentPriceLine,
                from: Point::new(0.0, y),
                to: Point::new(layout.width, y),
                stroke: Stroke::dashed(color, 1.0, 4.0, 4.0),
            },
        );
        scene.push(
            LayerKind::Annotations,
            Shape::Rect {
                class: ShapeClass::CurrentPriceBox,
                origin: Point::new(layout.width, y - PRICE_BOX.height / 2.0),
                size: PRICE_BOX,
                fill: Some(color),
                stroke: None,
            },
        );
        scene.push(
            LayerKind::Annotations,
            Shape::Text {
                class: ShapeClass::CurrentPriceText,
                at: Point::new(layout.width + PRICE_BOX.width / 2.0, y),
                content: format!("{:.*}", self.price_decimals, close),
                color: self.theme.background,
                font_px: TOOLTIP_FONT_PX,
                anchor: TextAnchor::Middle,
                baseline: TextBaseline::Middle,
            },
        );
    }

    fn caption_shape(&self) -> Shape {
        Shape::Text {
            class: ShapeClass::Caption,
            at: CAPTION_POSITION,
            content: self.caption.clone(),
            color: self.theme.caption,
            font_px: CAPTION_FONT_PX,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
        }
    }

    fn push_tooltip(&self, scene: &mut Scene, tooltip: &Tooltip, size: Size) {
        if !tooltip.visible {
            return;
        }
        scene.push(
            LayerKind::Overlay,
            Shape::Rect {
                class: ShapeClass::TooltipBox,
                origin: tooltip.origin,
                size,
                fill: Some(self.theme.tooltip_fill),
                stroke: None,
            },
        );
        if !tooltip.text.is_empty() {
            scene.push(
                LayerKind::Overlay,
                Shape::Text {
                    class: ShapeClass::TooltipText,
                    at: Point::new(tooltip.origin.x + size.width / 2.0, tooltip.origin.y + size.height / 2.0),
                    content: tooltip.text.clone(),
                    color: self.theme.tooltip_text,
                    font_px: TOOLTIP_FONT_PX,
                    anchor: TextAnchor::Middle,
                    baseline: TextBaseline::Middle,
                },
            );
        }
    }

    fn push_overlay(&self, scene: &mut Scene, layout: &ChartLayout, overlay: &OverlayState) {
        if let (true, Some(at)) = (overlay.crosshair_visible, overlay.pointer) {
            let stroke = Stroke::dashed(self.theme.crosshair, 1.0, 3.0, 3.0);
            scene.push(
                LayerKind::Overlay,
                Shape::Line {
                    class: ShapeClass::Crosshair,
                    from: Point::new(at.x, 0.0),
                    to: Point::new(at.x, layout.height),
                    stroke,
                },
            );
            scene.push(
                LayerKind::Overlay,
                Shape::Line {
                    class: ShapeClass::Crosshair,
                    from: Point::new(0.0, at.y),
                    to: Point::new(layout.width, at.y),
                    stroke,
                },
            );
        }
        self.push_tooltip(scene, &overlay.price_tooltip, PRICE_BOX);
        self.push_tooltip(scene, &overlay.time_tooltip, TIME_BOX);
    }
}
