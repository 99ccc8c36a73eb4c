//! Domain layer: price history, chart geometry and the ambient services
//! (logging, errors, configuration) shared by every other layer.

pub mod chart;
pub mod config;
pub mod errors;
pub mod logging;
pub mod market_data;
