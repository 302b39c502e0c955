use rosu_map::{section::hit_objects::Curve, util::Pos};

/// The curve of a slider, evaluated relative to the slider head.
pub trait SliderPath {
    /// Offset from the slider head at `progress` along the path.
    ///
    /// `progress` is in `[0, 1]` where `0` is the head and `1` is the end of
    /// the first span.
    fn position_at(&self, progress: f64) -> Pos;
}

impl SliderPath for Curve {
    fn position_at(&self, progress: f64) -> Pos {
        Curve::position_at(self, progress)
    }
}

impl<F: Fn(f64) -> Pos> SliderPath for F {
    fn position_at(&self, progress: f64) -> Pos {
        self(progress)
    }
}
