use js_sys::Array;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{PathCommand, SceneBackend, TextStyle};
use crate::domain::{
    chart::{Color, Point, Scene, ShapeClass, Size, Stroke},
    errors::{AppError, RenderingResult},
    logging::LogComponent,
};
use crate::log_trace;

fn js_error(context: &str, error: JsValue) -> AppError {
    AppError::Rendering(format!("{}: {:?}", context, error))
}

/// Canvas 2D backend for the interactive chart - Infrastructure implementation
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Wrap a canvas element, acquiring its 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> RenderingResult<Self> {
        let context = canvas
            .get_context("2d")
            .map_err(|e| js_error("Failed to get 2D context", e))?
            .ok_or_else(|| AppError::Rendering("2D context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AppError::Rendering("Failed to cast to 2D context".to_string()))?;
        Ok(Self { canvas, context })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Paint a full frame, timing it in debug builds.
    pub fn render(&mut self, scene: &Scene) -> RenderingResult<()> {
        #[cfg(debug_assertions)]
        let started = js_sys::Date::now();
        super::paint_scene(self, scene)?;
        log_trace!(
            LogComponent::Infrastructure("CanvasRenderer"),
            "frame painted in {:.1}ms",
            js_sys::Date::now() - started
        );
        Ok(())
    }

    fn apply_stroke(&self, stroke: &Stroke) -> RenderingResult<()> {
        self.context.set_stroke_style_str(&stroke.color.to_css());
        self.context.set_line_width(stroke.width);
        let dash = match stroke.dash {
            Some((on, off)) => Array::of2(&JsValue::from_f64(on), &JsValue::from_f64(off)),
            None => Array::new(),
        };
        self.context.set_line_dash(&dash).map_err(|e| js_error("set_line_dash", e))
    }
}

impl SceneBackend for CanvasRenderer {
    fn begin_frame(&mut self, size: Size, origin: Point, background: Color) -> RenderingResult<()> {
        let (width, height) = (size.width.max(0.0).round() as u32, size.height.max(0.0).round() as u32);
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
        let ctx = &self.context;
        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).map_err(|e| js_error("set_transform", e))?;
        ctx.clear_rect(0.0, 0.0, size.width, size.height);
        ctx.set_fill_style_str(&background.to_css());
        ctx.fill_rect(0.0, 0.0, size.width, size.height);
        ctx.translate(origin.x, origin.y).map_err(|e| js_error("translate", e))
    }

    fn draw_line(&mut self, _class: ShapeClass, from: Point, to: Point, stroke: &Stroke) -> RenderingResult<()> {
        self.apply_stroke(stroke)?;
        let ctx = &self.context;
        ctx.begin_path();
        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
        ctx.stroke();
        Ok(())
    }

    fn draw_rect(
        &mut self,
        _class: ShapeClass,
        origin: Point,
        size: Size,
        fill: Option<Color>,
        stroke: Option<&Stroke>,
    ) -> RenderingResult<()> {
        if let Some(color) = fill {
            self.context.set_fill_style_str(&color.to_css());
            self.context.fill_rect(origin.x, origin.y, size.width, size.height);
        }
        if let Some(stroke) = stroke {
            self.apply_stroke(stroke)?;
            self.context.stroke_rect(origin.x, origin.y, size.width, size.height);
        }
        Ok(())
    }

    fn draw_path(&mut self, _class: ShapeClass, commands: &[PathCommand], stroke: &Stroke) -> RenderingResult<()> {
        self.apply_stroke(stroke)?;
        let ctx = &self.context;
        ctx.begin_path();
        for command in commands {
            match *command {
                PathCommand::MoveTo(p) => ctx.move_to(p.x, p.y),
                PathCommand::LineTo(p) => ctx.line_to(p.x, p.y),
                PathCommand::CubicTo { c1, c2, to } => {
                    ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, to.x, to.y)
                }
            }
        }
        ctx.stroke();
        Ok(())
    }

    fn draw_text(&mut self, _class: ShapeClass, at: Point, content: &str, style: &TextStyle) -> RenderingResult<()> {
        let ctx = &self.context;
        ctx.set_fill_style_str(&style.color.to_css());
        ctx.set_font(&format!("{}px sans-serif", style.font_px));
        ctx.set_text_align(style.anchor.as_canvas());
        ctx.set_text_baseline(style.baseline.as_canvas());
        ctx.fill_text(content, at.x, at.y).map_err(|e| js_error("fill_text", e))
    }

    fn end_frame(&mut self) -> RenderingResult<()> {
        self.context
            .set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
            .map_err(|e| js_error("set_transform", e))
    }
}
