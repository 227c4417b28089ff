use cgmath::Point3;

use crate::config::LightConfig;

/// A point light placed freely in world space and dragged with a
/// [`Mover`](crate::gfx::gizmos::Mover).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Point3<f32>,
    /// Handle color, RGB in 0..1
    pub color: [f32; 3],
}

impl Light {
    pub fn new(position: Point3<f32>, color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

impl From<&LightConfig> for Light {
    fn from(config: &LightConfig) -> Self {
        Self::new(config.position, config.color)
    }
}
