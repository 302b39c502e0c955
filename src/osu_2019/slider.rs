use std::{
    cell::OnceCell,
    fmt::{Debug, Formatter, Result as FmtResult},
};

use rosu_map::util::Pos;

use super::path::SliderPath;

const LEGACY_LAST_TICK_OFFSET: f64 = 36.0;

/// Sliders longer than this don't generate ticks past it.
const MAX_TICK_LEN: f64 = 100_000.0;

/// Ticks past this count within a single span are dropped.
const MAX_TICKS_PER_SPAN: usize = 1 << 16;

/// Factor between the object radius and the approximated follow circle.
const FOLLOW_CIRCLE_SCALE: f64 = 3.0;

/// Cursor state after lazily following a slider.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LazySlider {
    /// Where the cursor ends up.
    pub end_pos: Pos,
    /// Distance the cursor had to move to stay within the follow circle.
    pub travel_dist: f32,
}

pub struct OsuSlider {
    pub(crate) span_count: usize,
    pub(crate) span_duration: f64,
    pub(crate) nested_times: Vec<f64>,
    path: Box<dyn SliderPath>,
    lazy: OnceCell<LazySlider>,
}

impl OsuSlider {
    /// Create a new slider.
    ///
    /// `nested_times` must be sorted and start with the head's time.
    pub fn new(
        span_count: usize,
        span_duration: f64,
        nested_times: Vec<f64>,
        path: impl SliderPath + 'static,
    ) -> Self {
        Self {
            span_count: span_count.max(1),
            span_duration,
            nested_times,
            path: Box::new(path),
            lazy: OnceCell::new(),
        }
    }

    pub const fn span_count(&self) -> usize {
        self.span_count
    }

    pub const fn span_duration(&self) -> f64 {
        self.span_duration
    }

    pub fn duration(&self) -> f64 {
        self.span_count as f64 * self.span_duration
    }

    /// Times of the head, ticks, repeats, and tail.
    pub fn nested_times(&self) -> &[f64] {
        &self.nested_times
    }

    /// Offset from the head to where the last span ends.
    pub fn end_offset(&self) -> Pos {
        let progress = if self.span_count % 2 == 0 { 0.0 } else { 1.0 };

        self.path.position_at(progress)
    }

    /// Offset from the head to the end of the path, regardless of repeats.
    pub(crate) fn path_end_offset(&self) -> Pos {
        self.path.position_at(1.0)
    }

    /// The lazy cursor state, computed on first access.
    ///
    /// `pos` is the stacked head position and `radius` the object radius.
    pub fn lazy(&self, start_time: f64, pos: Pos, radius: f64) -> &LazySlider {
        self.lazy
            .get_or_init(|| self.simulate(start_time, pos, radius))
    }

    /// The lazy cursor state if it was computed already.
    pub fn cached(&self) -> Option<&LazySlider> {
        self.lazy.get()
    }

    fn simulate(&self, start_time: f64, pos: Pos, radius: f64) -> LazySlider {
        if self.span_duration == 0.0 {
            tracing::warn!(start_time, "Slider without span duration, following its head only");
        }

        let follow_circle_radius = (radius * FOLLOW_CIRCLE_SCALE) as f32;

        let mut end_pos = pos;
        let mut travel_dist = 0.0;

        // Skip the head circle
        for &time in self.nested_times.iter().skip(1) {
            let progress = self.span_progress(start_time, time);
            let diff = pos + self.path.position_at(progress) - end_pos;
            let dist = diff.length();

            if dist > follow_circle_radius {
                // The cursor would be outside the follow circle, move it
                let excess = dist - follow_circle_radius;
                let direction = Pos::new(diff.x / dist, diff.y / dist);

                end_pos = end_pos + Pos::new(direction.x * excess, direction.y * excess);
                travel_dist += excess;
            }
        }

        tracing::trace!(start_time, travel_dist, "Simulated lazy slider cursor");

        LazySlider {
            end_pos,
            travel_dist,
        }
    }

    /// Progress along the path at `time`, bouncing back and forth for repeats.
    fn span_progress(&self, start_time: f64, time: f64) -> f64 {
        let progress = (time - start_time) / self.span_duration;

        if !progress.is_finite() {
            return 0.0;
        }

        let progress = if progress.rem_euclid(2.0) >= 1.0 {
            1.0 - progress.rem_euclid(1.0)
        } else {
            progress.rem_euclid(1.0)
        };

        progress.clamp(0.0, 1.0)
    }
}

impl Debug for OsuSlider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let Self {
            span_count,
            span_duration,
            nested_times,
            path: _,
            lazy,
        } = self;

        f.debug_struct("OsuSlider")
            .field("span_count", span_count)
            .field("span_duration", span_duration)
            .field("nested_times", nested_times)
            .field("lazy", &lazy.get())
            .finish_non_exhaustive()
    }
}

/// Timing parameters of a slider that determine its nested objects.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SliderTiming {
    pub start_time: f64,
    pub span_count: usize,
    /// Length of a single span in osu!pixels.
    pub len: f64,
    /// osu!pixels per millisecond.
    pub velocity: f64,
    /// Distance between ticks in osu!pixels.
    pub tick_dist: f64,
}

impl SliderTiming {
    pub fn span_duration(&self) -> f64 {
        if self.velocity > 0.0 && self.velocity.is_finite() {
            self.len / self.velocity
        } else {
            0.0
        }
    }

    /// Times of head, ticks, repeats, and the legacy last tick, sorted.
    pub fn nested_times(&self) -> Vec<f64> {
        let span_count = self.span_count.max(1);
        let span_duration = self.span_duration();
        let len = self.len.min(MAX_TICK_LEN);
        let min_dist_from_end = self.velocity * 10.0;

        // Path progress of the ticks within a single span
        let mut tick_progress = Vec::new();

        if self.tick_dist > 0.0 && self.tick_dist.is_finite() && len > 0.0 {
            let mut dist = self.tick_dist;

            while dist <= len && dist < len - min_dist_from_end {
                if tick_progress.len() == MAX_TICKS_PER_SPAN {
                    tracing::warn!(tick_dist = self.tick_dist, len, "Too many slider ticks");

                    break;
                }

                tick_progress.push(dist / len);
                dist += self.tick_dist;
            }
        }

        let mut times = Vec::with_capacity(span_count * (tick_progress.len() + 1) + 1);
        times.push(self.start_time);

        for span_idx in 0..span_count {
            let span_start = self.start_time + span_idx as f64 * span_duration;
            let reversed = span_idx % 2 == 1;

            let ticks = tick_progress.iter().map(|&progress| {
                let time_progress = if reversed { 1.0 - progress } else { progress };

                span_start + time_progress * span_duration
            });

            if reversed {
                times.extend(ticks.rev());
            } else {
                times.extend(ticks);
            }

            if span_idx + 1 < span_count {
                times.push(span_start + span_duration);
            }
        }

        let duration = span_count as f64 * span_duration;
        let legacy_last_tick = (self.start_time + duration - LEGACY_LAST_TICK_OFFSET)
            .max(self.start_time + duration / 2.0);

        times.push(legacy_last_tick);
        times.sort_by(f64::total_cmp);

        times
    }
}
