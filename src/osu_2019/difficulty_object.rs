use rosu_map::util::Pos;

use super::osu_object::OsuObject;

const NORMALIZED_RADIUS: f32 = 52.0;
const MIN_DELTA_TIME: f64 = 25.0;

/// Aim features of a hit object w.r.t. its predecessors.
#[derive(Clone, Debug, PartialEq)]
pub struct OsuDifficultyObject {
    /// Index of the underlying [`OsuObject`].
    pub idx: usize,
    /// Start time adjusted by the clock rate.
    pub start_time: f64,
    /// Milliseconds since the previous object's start time.
    pub delta_time: f64,
    /// Same as `delta_time` but at least 25ms to account for simultaneous
    /// objects.
    pub strain_time: f64,
    /// Normalized distance from the previous object's cursor end position to
    /// this object.
    pub jump_dist: f64,
    /// Normalized distance the cursor travelled while following the previous
    /// object if it's a slider.
    pub travel_dist: f64,
    /// Angle between the last two cursor movements in radians, within
    /// `[0, π]`.
    pub angle: Option<f64>,
}

impl OsuDifficultyObject {
    pub fn new(
        idx: usize,
        base: &OsuObject,
        last: Option<&OsuObject>,
        last_last: Option<&OsuObject>,
        clock_rate: f64,
    ) -> Self {
        let delta_time = last.map_or(0.0, |last| (base.start_time - last.start_time) / clock_rate);

        let mut this = Self {
            idx,
            start_time: base.start_time / clock_rate,
            delta_time,
            // Capped to 25ms to prevent difficulty calculation breaking from
            // simultaneous objects
            strain_time: delta_time.max(MIN_DELTA_TIME),
            jump_dist: 0.0,
            travel_dist: 0.0,
            angle: None,
        };

        if let Some(last) = last {
            this.set_distances(base, last, last_last);
        }

        this
    }

    fn set_distances(&mut self, base: &OsuObject, last: &OsuObject, last_last: Option<&OsuObject>) {
        // Neither angle nor distance are meaningful when a spinner is involved
        if base.is_spinner() || last.is_spinner() {
            return;
        }

        let scaling_factor = scaling_factor(base.radius);

        if let Some(lazy) = last.lazy_slider() {
            self.travel_dist = f64::from(lazy.travel_dist * scaling_factor);
        }

        let last_cursor_pos = last.lazy_end_pos();

        self.jump_dist = f64::from(
            (scale(base.pos, scaling_factor) - scale(last_cursor_pos, scaling_factor)).length(),
        );

        if let Some(last_last) = last_last.filter(|h| !h.is_spinner()) {
            let last_last_cursor_pos = last_last.cached_end_pos();

            let v1 = last_last_cursor_pos - last.pos;
            let v2 = base.pos - last_cursor_pos;

            let dot = v1.x * v2.x + v1.y * v2.y;
            let det = v1.x * v2.y - v1.y * v2.x;

            self.angle = Some(f64::from(det).atan2(f64::from(dot)).abs());
        }
    }
}

/// Factor to scale distances by so that every circle size is treated as if
/// its radius was [`NORMALIZED_RADIUS`].
pub(crate) fn scaling_factor(radius: f64) -> f32 {
    let radius = radius as f32;
    let mut scaling_factor = NORMALIZED_RADIUS / radius;

    if radius < 30.0 {
        let small_circle_bonus = (30.0 - radius).min(5.0) / 50.0;
        scaling_factor *= 1.0 + small_circle_bonus;
    }

    scaling_factor
}

fn scale(pos: Pos, factor: f32) -> Pos {
    Pos::new(pos.x * factor, pos.y * factor)
}
