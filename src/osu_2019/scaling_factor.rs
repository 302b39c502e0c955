const OBJECT_RADIUS: f64 = 64.0;
const STACK_OFFSET_SCALE: f32 = -6.4;

/// Object size derived from the circle size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScalingFactor {
    pub scale: f32,
    pub radius: f64,
}

impl ScalingFactor {
    pub fn new(cs: f64) -> Self {
        let scale = (1.0 - 0.7 * (cs - 5.0) / 5.0) / 2.0;
        let radius = OBJECT_RADIUS * scale;

        Self {
            scale: scale as f32,
            radius,
        }
    }

    /// Offset on both axes for an object of the given stack height.
    pub fn stack_offset(&self, stack_height: i32) -> f32 {
        stack_height as f32 * self.scale * STACK_OFFSET_SCALE
    }
}
