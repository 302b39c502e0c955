use rosu_map::util::Pos;

use super::slider::{LazySlider, OsuSlider};

/// A hit object prepared for difficulty calculation.
///
/// After conversion, `pos` already includes the stack offset.
#[derive(Debug)]
pub struct OsuObject {
    pub start_time: f64,
    pub pos: Pos,
    pub radius: f64,
    pub stack_height: i32,
    pub kind: OsuObjectKind,
}

#[derive(Debug)]
pub enum OsuObjectKind {
    Circle,
    Slider(OsuSlider),
    Spinner { duration: f64 },
}

impl OsuObject {
    pub const fn circle(pos: Pos, start_time: f64, radius: f64) -> Self {
        Self {
            start_time,
            pos,
            radius,
            stack_height: 0,
            kind: OsuObjectKind::Circle,
        }
    }

    pub fn slider(pos: Pos, start_time: f64, radius: f64, slider: OsuSlider) -> Self {
        Self {
            start_time,
            pos,
            radius,
            stack_height: 0,
            kind: OsuObjectKind::Slider(slider),
        }
    }

    pub const fn spinner(pos: Pos, start_time: f64, duration: f64, radius: f64) -> Self {
        Self {
            start_time,
            pos,
            radius,
            stack_height: 0,
            kind: OsuObjectKind::Spinner { duration },
        }
    }

    pub fn end_time(&self) -> f64 {
        match self.kind {
            OsuObjectKind::Circle => self.start_time,
            OsuObjectKind::Slider(ref slider) => self.start_time + slider.duration(),
            OsuObjectKind::Spinner { duration } => self.start_time + duration,
        }
    }

    /// Position at the end of the object, disregarding cursor movement.
    pub fn end_pos(&self) -> Pos {
        match self.kind {
            OsuObjectKind::Slider(ref slider) => self.pos + slider.end_offset(),
            OsuObjectKind::Circle | OsuObjectKind::Spinner { .. } => self.pos,
        }
    }

    pub(crate) fn path_end_offset(&self) -> Pos {
        match self.kind {
            OsuObjectKind::Slider(ref slider) => slider.path_end_offset(),
            OsuObjectKind::Circle | OsuObjectKind::Spinner { .. } => Pos::new(0.0, 0.0),
        }
    }

    /// Simulate the lazy cursor if this is a slider.
    pub fn lazy_slider(&self) -> Option<&LazySlider> {
        match self.kind {
            OsuObjectKind::Slider(ref slider) => {
                Some(slider.lazy(self.start_time, self.pos, self.radius))
            }
            OsuObjectKind::Circle | OsuObjectKind::Spinner { .. } => None,
        }
    }

    /// Where the cursor ends up after this object.
    ///
    /// Simulates the slider cursor if necessary.
    pub fn lazy_end_pos(&self) -> Pos {
        self.lazy_slider().map_or(self.pos, |lazy| lazy.end_pos)
    }

    /// Same as [`OsuObject::lazy_end_pos`] but only uses a previously
    /// simulated slider cursor, falling back to the object position.
    pub fn cached_end_pos(&self) -> Pos {
        match self.kind {
            OsuObjectKind::Slider(ref slider) => {
                slider.cached().map_or(self.pos, |lazy| lazy.end_pos)
            }
            OsuObjectKind::Circle | OsuObjectKind::Spinner { .. } => self.pos,
        }
    }

    pub(crate) fn apply_stack_offset(&mut self, stack_offset: f32) {
        self.pos = self.pos + Pos::new(stack_offset, stack_offset);
    }

    pub const fn is_circle(&self) -> bool {
        matches!(self.kind, OsuObjectKind::Circle)
    }

    pub const fn is_slider(&self) -> bool {
        matches!(self.kind, OsuObjectKind::Slider(_))
    }

    pub const fn is_spinner(&self) -> bool {
        matches!(self.kind, OsuObjectKind::Spinner { .. })
    }
}
