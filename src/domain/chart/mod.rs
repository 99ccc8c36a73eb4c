//! Chart aggregate: layout, scales, zoom transform and the frame description.

pub mod entities;
pub mod scales;
pub mod scene;
pub mod value_objects;

pub use entities::*;
pub use scales::{LinearScale, TimeScale, ZoomTransform, DEFAULT_TICK_COUNT};
pub use scene::*;
pub use value_objects::*;
