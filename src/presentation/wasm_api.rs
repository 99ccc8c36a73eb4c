//! JavaScript entry points. Minimal logic: a bridge to the application layer.

use gloo::utils::format::JsValueSerdeExt;
use leptos::*;
use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::application::{ChartRenderingService, OverlayState};
use crate::domain::{
    chart::{Chart, ChartLayout, Size},
    config::ChartConfig,
    errors::{AppError, ValidationError},
    logging::{LogComponent, init_logger},
    market_data::DataValidationService,
};
use crate::infrastructure::{ConsoleLogger, rendering::SvgRenderer};
use crate::log_info;

fn to_js(error: AppError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Read a configuration object; `undefined`/`null` mean defaults.
pub fn config_from_js(value: &JsValue) -> Result<ChartConfig, AppError> {
    if value.is_undefined() || value.is_null() {
        return Ok(ChartConfig::default());
    }
    let config: ChartConfig =
        value.into_serde().map_err(|e| ValidationError::InvalidConfig(e.to_string()))?;
    Ok(config.validated()?)
}

/// Render the unzoomed chart for a JSON document as an SVG string.
pub fn svg_snapshot(body: &str, surface: Size, config: &ChartConfig) -> Result<String, AppError> {
    let series = DataValidationService::new().parse_document(body)?;
    let layout = ChartLayout::from_surface(surface, config.margins, config.padding);
    let chart = Chart::new(series, layout);
    let scene = ChartRenderingService::new(config).build_scene(
        &chart,
        &chart.initial_viewport(),
        &OverlayState::default(),
    );
    SvgRenderer::render(&scene)
}

/// Mount the interactive chart into `<body>`.
#[wasm_bindgen(js_name = startChart)]
pub fn start_chart(config: JsValue) -> Result<(), JsValue> {
    let config = config_from_js(&config).map_err(to_js)?;
    init_logger(Box::new(ConsoleLogger::new(config.log_level)));
    log_info!(LogComponent::Presentation("WasmApi"), "🚀 Mounting chart for {}", config.data_url);
    mount_to_body(move || view! { <App config=config.clone() /> });
    Ok(())
}

/// Chart snapshot export: the initial view of `json` as an SVG document.
#[wasm_bindgen(js_name = renderSvgSnapshot)]
pub fn render_svg_snapshot(json: &str, width: f64, height: f64, config: JsValue) -> Result<String, JsValue> {
    let config = config_from_js(&config).map_err(to_js)?;
    svg_snapshot(json, Size::new(width, height), &config).map_err(to_js)
}
