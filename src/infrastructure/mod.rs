//! Infrastructure layer: browser-facing adapters for the domain traits.

pub mod http;
pub mod rendering;
pub mod services;

pub use http::HttpPriceHistory;
pub use services::{BrowserTimeProvider, ConsoleLogger};
