//! Painting a [`Scene`] onto a concrete surface.

pub mod canvas_renderer;
pub mod geometry;
pub mod svg;

pub use canvas_renderer::CanvasRenderer;
pub use geometry::{PathCommand, path_commands};
pub use svg::SvgRenderer;

use crate::domain::{
    chart::{Color, LayerKind, Point, Scene, Shape, ShapeClass, Size, Stroke, TextAnchor, TextBaseline},
    errors::RenderingResult,
};

/// Text draw request handed to a backend
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub color: Color,
    pub font_px: f64,
    pub anchor: TextAnchor,
    pub baseline: TextBaseline,
}

/// Drawing primitives a surface must provide. Coordinates are relative to
/// the content-box origin passed to `begin_frame`.
pub trait SceneBackend {
    fn begin_frame(&mut self, size: Size, origin: Point, background: Color) -> RenderingResult<()>;
    fn begin_layer(&mut self, _kind: LayerKind) -> RenderingResult<()> {
        Ok(())
    }
    fn end_layer(&mut self, _kind: LayerKind) -> RenderingResult<()> {
        Ok(())
    }
    fn draw_line(&mut self, class: ShapeClass, from: Point, to: Point, stroke: &Stroke) -> RenderingResult<()>;
    fn draw_rect(
        &mut self,
        class: ShapeClass,
        origin: Point,
        size: Size,
        fill: Option<Color>,
        stroke: Option<&Stroke>,
    ) -> RenderingResult<()>;
    fn draw_path(&mut self, class: ShapeClass, commands: &[PathCommand], stroke: &Stroke) -> RenderingResult<()>;
    fn draw_text(&mut self, class: ShapeClass, at: Point, content: &str, style: &TextStyle) -> RenderingResult<()>;
    fn end_frame(&mut self) -> RenderingResult<()>;
}

/// Paint every layer of `scene`, back to front.
pub fn paint_scene<B: SceneBackend + ?Sized>(backend: &mut B, scene: &Scene) -> RenderingResult<()> {
    backend.begin_frame(scene.size, scene.origin, scene.background)?;
    for layer in scene.layers() {
        backend.begin_layer(layer.kind)?;
        for shape in &layer.shapes {
            match shape {
                Shape::Line { class, from, to, stroke } => backend.draw_line(*class, *from, *to, stroke)?,
                Shape::Rect { class, origin, size, fill, stroke } => {
                    backend.draw_rect(*class, *origin, *size, *fill, stroke.as_ref())?
                }
                Shape::Path { class, points, curve, stroke } => {
                    let commands = path_commands(points, *curve);
                    if !commands.is_empty() {
                        backend.draw_path(*class, &commands, stroke)?;
                    }
                }
                Shape::Text { class, at, content, color, font_px, anchor, baseline } => {
                    let style = TextStyle { color: *color, font_px: *font_px, anchor: *anchor, baseline: *baseline };
                    backend.draw_text(*class, *at, content, &style)?
                }
            }
        }
        backend.end_layer(layer.kind)?;
    }
    backend.end_frame()
}
