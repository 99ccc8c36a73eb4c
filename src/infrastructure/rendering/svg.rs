//! SVG document output, used for chart snapshots.

use std::fmt::Write;

use super::{PathCommand, SceneBackend, TextStyle};
use crate::domain::{
    chart::{Color, LayerKind, Point, Scene, ShapeClass, Size, Stroke},
    errors::{AppError, RenderingResult},
};

/// Compact number rendering: at most three decimals, no trailing zeros.
fn num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let fixed = format!("{:.3}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn write_error(e: std::fmt::Error) -> AppError {
    AppError::Rendering(format!("svg write failed: {e}"))
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(" stroke=\"{}\" stroke-width=\"{}\"", stroke.color.to_css(), num(stroke.width));
    if let Some((on, off)) = stroke.dash {
        attrs.push_str(&format!(" stroke-dasharray=\"{},{}\"", num(on), num(off)));
    }
    attrs
}

/// Backend accumulating an SVG document in memory
#[derive(Debug, Default)]
pub struct SvgRenderer {
    out: String,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint `scene` and return the finished document.
    pub fn render(scene: &Scene) -> RenderingResult<String> {
        let mut renderer = Self::new();
        super::paint_scene(&mut renderer, scene)?;
        Ok(renderer.finish())
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) -> RenderingResult<()> {
        self.out
            .write_fmt(args)
            .and_then(|_| self.out.write_char('\n'))
            .map_err(write_error)
    }
}

impl SceneBackend for SvgRenderer {
    fn begin_frame(&mut self, size: Size, origin: Point, background: Color) -> RenderingResult<()> {
        self.out.clear();
        let (w, h) = (num(size.width), num(size.height));
        self.line(format_args!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\">"
        ))?;
        self.line(format_args!("<rect width=\"{w}\" height=\"{h}\" fill=\"{}\"/>", background.to_css()))?;
        self.line(format_args!("<g transform=\"translate({},{})\">", num(origin.x), num(origin.y)))
    }

    fn begin_layer(&mut self, kind: LayerKind) -> RenderingResult<()> {
        self.line(format_args!("<g class=\"{}\">", kind.as_ref()))
    }

    fn end_layer(&mut self, _kind: LayerKind) -> RenderingResult<()> {
        self.line(format_args!("</g>"))
    }

    fn draw_line(&mut self, class: ShapeClass, from: Point, to: Point, stroke: &Stroke) -> RenderingResult<()> {
        self.line(format_args!(
            "<line class=\"{}\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{}/>",
            class.css(),
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            stroke_attrs(stroke)
        ))
    }

    fn draw_rect(
        &mut self,
        class: ShapeClass,
        origin: Point,
        size: Size,
        fill: Option<Color>,
        stroke: Option<&Stroke>,
    ) -> RenderingResult<()> {
        let fill = fill.map(|c| c.to_css()).unwrap_or_else(|| "none".to_string());
        self.line(format_args!(
            "<rect class=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"{}/>",
            class.css(),
            num(origin.x),
            num(origin.y),
            num(size.width),
            num(size.height),
            fill,
            stroke.map(stroke_attrs).unwrap_or_default()
        ))
    }

    fn draw_path(&mut self, class: ShapeClass, commands: &[PathCommand], stroke: &Stroke) -> RenderingResult<()> {
        let mut d = String::new();
        for command in commands {
            match command {
                PathCommand::MoveTo(p) => write!(d, "M{},{}", num(p.x), num(p.y)),
                PathCommand::LineTo(p) => write!(d, "L{},{}", num(p.x), num(p.y)),
                PathCommand::CubicTo { c1, c2, to } => write!(
                    d,
                    "C{},{},{},{},{},{}",
                    num(c1.x),
                    num(c1.y),
                    num(c2.x),
                    num(c2.y),
                    num(to.x),
                    num(to.y)
                ),
            }
            .map_err(write_error)?;
        }
        self.line(format_args!(
            "<path class=\"{}\" d=\"{}\" fill=\"none\"{}/>",
            class.css(),
            d,
            stroke_attrs(stroke)
        ))
    }

    fn draw_text(&mut self, class: ShapeClass, at: Point, content: &str, style: &TextStyle) -> RenderingResult<()> {
        self.line(format_args!(
            "<text class=\"{}\" x=\"{}\" y=\"{}\" dy=\"{}\" text-anchor=\"{}\" fill=\"{}\" font-size=\"{}\">{}</text>",
            class.css(),
            num(at.x),
            num(at.y),
            style.baseline.svg_dy(),
            style.anchor.as_svg(),
            style.color.to_css(),
            num(style.font_px),
            escape(content)
        ))
    }

    fn end_frame(&mut self) -> RenderingResult<()> {
        self.line(format_args!("</g>"))?;
        self.line(format_args!("</svg>"))
    }
}
