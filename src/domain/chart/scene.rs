//! Backend-neutral description of one frame.
//!
//! A [`Scene`] is rebuilt from scratch on every redraw and handed to a
//! rendering backend (canvas, SVG). Coordinates inside layers are relative
//! to the content box; [`Scene::origin`] places the content box on the
//! surface.

use strum::{AsRefStr, EnumIter, IntoEnumIterator};

use super::value_objects::{Color, Point, Size};
use crate::domain::market_data::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_svg(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }

    pub fn as_canvas(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "center",
            TextAnchor::End => "end",
        }
    }
}

/// Vertical text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Alphabetic,
    Middle,
    Hanging,
}

impl TextBaseline {
    pub fn as_canvas(&self) -> &'static str {
        match self {
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Middle => "middle",
            TextBaseline::Hanging => "hanging",
        }
    }

    /// `dy` offset an SVG `<text>` needs for the same placement.
    pub fn svg_dy(&self) -> &'static str {
        match self {
            TextBaseline::Alphabetic => "0",
            TextBaseline::Middle => "0.32em",
            TextBaseline::Hanging => "0.71em",
        }
    }
}

/// How a backend connects the points of a [`Shape::Path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    /// Straight segments.
    Linear,
    /// Catmull-Rom spline; alpha 0.5 is the centripetal variant.
    CatmullRom { alpha: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub dash: Option<(f64, f64)>,
}

impl Stroke {
    pub fn solid(color: Color, width: f64) -> Self {
        Self { color, width, dash: None }
    }

    pub fn dashed(color: Color, width: f64, on: f64, off: f64) -> Self {
        Self { color, width, dash: Some((on, off)) }
    }
}

/// What a shape depicts; backends may style by it, tests select by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeClass {
    CandleWick(Direction),
    CandleBody(Direction),
    MaLine,
    BbUpper,
    BbLower,
    CurrentPriceLine,
    CurrentPriceBox,
    CurrentPriceText,
    Gridline,
    AxisDomain,
    AxisTick,
    AxisLabel,
    Crosshair,
    TooltipBox,
    TooltipText,
    Caption,
    Message,
}

impl ShapeClass {
    /// CSS class names used by the SVG backend.
    pub fn css(&self) -> &'static str {
        match self {
            ShapeClass::CandleWick(Direction::Up) => "candle stem up",
            ShapeClass::CandleWick(Direction::Down) => "candle stem down",
            ShapeClass::CandleBody(Direction::Up) => "candle body up",
            ShapeClass::CandleBody(Direction::Down) => "candle body down",
            ShapeClass::MaLine => "ma-line",
            ShapeClass::BbUpper => "bb-upper",
            ShapeClass::BbLower => "bb-lower",
            ShapeClass::CurrentPriceLine => "current-price-line",
            ShapeClass::CurrentPriceBox => "current-price-box",
            ShapeClass::CurrentPriceText => "current-price-text",
            ShapeClass::Gridline => "gridline",
            ShapeClass::AxisDomain => "domain",
            ShapeClass::AxisTick => "tick",
            ShapeClass::AxisLabel => "tick-label",
            ShapeClass::Crosshair => "crosshair-line",
            ShapeClass::TooltipBox => "tooltip-box",
            ShapeClass::TooltipText => "tooltip-text",
            ShapeClass::Caption => "caption",
            ShapeClass::Message => "message",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line {
        class: ShapeClass,
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Rect {
        class: ShapeClass,
        origin: Point,
        size: Size,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Path {
        class: ShapeClass,
        points: Vec<Point>,
        curve: Curve,
        stroke: Stroke,
    },
    Text {
        class: ShapeClass,
        at: Point,
        content: String,
        color: Color,
        font_px: f64,
        anchor: TextAnchor,
        baseline: TextBaseline,
    },
}

impl Shape {
    pub fn class(&self) -> ShapeClass {
        match self {
            Shape::Line { class, .. }
            | Shape::Rect { class, .. }
            | Shape::Path { class, .. }
            | Shape::Text { class, .. } => *class,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Shape::Text { content, .. } => Some(content),
            _ => None,
        }
    }
}

/// Paint order, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum LayerKind {
    Grid,
    Data,
    Axes,
    Annotations,
    Overlay,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderLayer {
    pub kind: LayerKind,
    pub shapes: Vec<Shape>,
}

impl RenderLayer {
    pub fn new(kind: LayerKind) -> Self {
        Self { kind, shapes: Vec::new() }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }
}

/// Everything one frame draws.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub size: Size,
    pub origin: Point,
    pub background: Color,
    layers: Vec<RenderLayer>,
}

impl Scene {
    /// Empty scene with one layer per [`LayerKind`], in paint order.
    pub fn new(size: Size, origin: Point, background: Color) -> Self {
        Self {
            size,
            origin,
            background,
            layers: LayerKind::iter().map(RenderLayer::new).collect(),
        }
    }

    pub fn layers(&self) -> &[RenderLayer] {
        &self.layers
    }

    pub fn layer(&self, kind: LayerKind) -> &RenderLayer {
        // every kind is created in `new` and kinds are never removed
        &self.layers[kind as usize]
    }

    pub fn layer_mut(&mut self, kind: LayerKind) -> &mut RenderLayer {
        &mut self.layers[kind as usize]
    }

    pub fn push(&mut self, kind: LayerKind, shape: Shape) {
        self.layer_mut(kind).push(shape);
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.layers.iter().flat_map(|layer| layer.shapes.iter())
    }

    pub fn shapes_of(&self, class: ShapeClass) -> impl Iterator<Item = &Shape> {
        self.shapes().filter(move |shape| shape.class() == class)
    }

    pub fn count(&self, class: ShapeClass) -> usize {
        self.shapes_of(class).count()
    }
}
