use derive_more::Constructor;
use serde::Deserialize;

/// Value Object - Position in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Constructor)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Value Object - Extent in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Constructor)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Value Object - Space reserved around the plot for axes
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self { top: 20.0, right: 60.0, bottom: 30.0, left: 60.0 }
    }
}

/// Value Object - Allowed zoom factors relative to the full domain
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScaleExtent {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleExtent {
    fn default() -> Self {
        Self { min: 1.0, max: 40.0 }
    }
}

impl ScaleExtent {
    pub fn clamp(&self, k: f64) -> f64 {
        k.clamp(self.min, self.max)
    }
}

/// Value Object - Surface geometry, computed once at load.
///
/// `width`/`height` describe the content box the scales map onto; the
/// surface adds margins and padding around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub margins: Margins,
    pub padding: f64,
    pub width: f64,
    pub height: f64,
}

impl ChartLayout {
    /// Fit the content box into a surface of the given size.
    pub fn from_surface(surface: Size, margins: Margins, padding: f64) -> Self {
        let width = surface.width - margins.left - margins.right - padding * 2.0;
        let height = surface.height - margins.top - margins.bottom - padding * 2.0;
        Self { margins, padding, width: width.max(0.0), height: height.max(0.0) }
    }

    pub fn with_content(width: f64, height: f64, margins: Margins, padding: f64) -> Self {
        Self { margins, padding, width, height }
    }

    pub fn surface_size(&self) -> Size {
        Size::new(
            self.width + self.margins.left + self.margins.right + self.padding * 2.0,
            self.height + self.margins.top + self.margins.bottom + self.padding * 2.0,
        )
    }

    /// Top-left corner of the content box in surface coordinates.
    pub fn origin(&self) -> Point {
        Point::new(self.margins.left + self.padding, self.margins.top + self.padding)
    }

    pub fn to_content(&self, surface_point: Point) -> Point {
        let origin = self.origin();
        Point::new(surface_point.x - origin.x, surface_point.y - origin.y)
    }

    pub fn contains(&self, content_point: Point) -> bool {
        (0.0..=self.width).contains(&content_point.x) && (0.0..=self.height).contains(&content_point.y)
    }
}

/// Value Object - Visible window into the data.
///
/// Produced by gesture handling and never mutated in place; each gesture
/// returns a fresh value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Milliseconds since the epoch; fractional after zooming.
    pub time_domain: (f64, f64),
    pub value_domain: (f64, f64),
}

impl Viewport {
    pub fn new(time_domain: (f64, f64), value_domain: (f64, f64)) -> Self {
        Self { time_domain, value_domain }
    }

    pub fn time_span(&self) -> f64 {
        self.time_domain.1 - self.time_domain.0
    }

    pub fn value_span(&self) -> f64 {
        self.value_domain.1 - self.value_domain.0
    }
}

/// Value Object - Color
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn to_hex(&self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self { a: alpha, ..*self }
    }

    /// CSS color string accepted by both canvas and SVG.
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:06x}", self.to_hex())
        } else {
            let hex = self.to_hex();
            format!(
                "rgba({},{},{},{})",
                (hex >> 16) & 0xFF,
                (hex >> 8) & 0xFF,
                hex & 0xFF,
                self.a
            )
        }
    }

    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
}

impl TryFrom<String> for Color {
    type Error = String;

    /// Parses `#rgb` or `#rrggbb`.
    fn try_from(value: String) -> Result<Self, Self::Error> {
        let digits = value.trim().trim_start_matches('#');
        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => digits.to_string(),
            _ => return Err(format!("unsupported color `{}`", value)),
        };
        u32::from_str_radix(&expanded, 16)
            .map(Color::from_hex)
            .map_err(|_| format!("unsupported color `{}`", value))
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

/// Value Object - Palette used by every rendering backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartTheme {
    pub background: Color,
    pub up: Color,
    pub down: Color,
    pub ma_line: Color,
    pub bb_line: Color,
    pub grid: Color,
    pub axis: Color,
    pub crosshair: Color,
    pub tooltip_fill: Color,
    pub tooltip_text: Color,
    pub price_marker: Color,
    pub caption: Color,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: Color::from_hex(0x1a1a1a),
            up: Color::from_hex(0x26a69a),
            down: Color::from_hex(0xef5350),
            ma_line: Color::from_hex(0xf39c12),
            bb_line: Color::from_hex(0x5dade2),
            grid: Color::from_hex(0xaaaaaa).with_alpha(0.1),
            axis: Color::from_hex(0xaaaaaa),
            crosshair: Color::from_hex(0x999999),
            tooltip_fill: Color::from_hex(0x333333),
            tooltip_text: Color::WHITE,
            price_marker: Color::from_hex(0xf39c12),
            caption: Color::from_hex(0x888888),
        }
    }
}
