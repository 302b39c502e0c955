use rosu_pp::model::control_point::{DifficultyPoint, TimingPoint};

/// The timing point that is active at `time`, falling back to the first one.
pub fn timing_point_at(points: &[TimingPoint], time: f64) -> Option<&TimingPoint> {
    let i = points
        .binary_search_by(|probe| probe.time.total_cmp(&time))
        .unwrap_or_else(|i| i.saturating_sub(1));

    points.get(i)
}

/// The difficulty point that is active at `time`, if any.
pub fn difficulty_point_at(points: &[DifficultyPoint], time: f64) -> Option<&DifficultyPoint> {
    points
        .binary_search_by(|probe| probe.time.total_cmp(&time))
        .map_or_else(|i| i.checked_sub(1), Some)
        .map(|i| &points[i])
}

/// Beat length and slider velocity multiplier at `time`.
pub fn slider_timing_at(
    timing_points: &[TimingPoint],
    difficulty_points: &[DifficultyPoint],
    time: f64,
) -> (f64, f64) {
    let beat_len = timing_point_at(timing_points, time)
        .map_or(TimingPoint::DEFAULT_BEAT_LEN, |point| point.beat_len);

    let slider_velocity = difficulty_point_at(difficulty_points, time)
        .map_or(DifficultyPoint::DEFAULT_SLIDER_VELOCITY, |point| {
            point.slider_velocity
        });

    (beat_len, slider_velocity)
}
