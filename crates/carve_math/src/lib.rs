// Re-export glam for convenience
pub use glam::*;

// Carve math types
mod onb;
mod ray;
mod transform;

pub use onb::create_onb_from_z;
pub use ray::{Ray, DEFAULT_TMIN};
pub use transform::Transform;
