//! Application layer: use cases that tie the domain to a surface.

pub mod chart_service;
pub mod interaction;
pub mod use_cases;

pub use chart_service::*;
pub use interaction::*;
pub use use_cases::*;
