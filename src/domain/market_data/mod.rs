//! Market data aggregate: price points, the loaded series and its validation.

pub mod entities;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use repositories::*;
pub use services::DataValidationService;
pub use value_objects::*;
