use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, get_logger};

pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod time_utils;

/// Initialize panic reporting and the log clock when the module loads.
///
/// The console logger itself is installed by `startChart`, once the
/// configured level is known.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();
    domain::logging::init_time_provider(Box::new(infrastructure::BrowserTimeProvider::new()));

    get_logger().debug(LogComponent::Presentation("Initialize"), "🚀 price history chart module loaded");
}
