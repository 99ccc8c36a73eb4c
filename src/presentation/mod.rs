//! Presentation layer: the `#[wasm_bindgen]` surface.

pub mod wasm_api;

pub use wasm_api::*;
