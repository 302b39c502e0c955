use rosu_map::{
    section::hit_objects::{Curve, PathControlPoint},
    util::Pos,
};
use rosu_pp::{
    model::{
        hit_object::{HitObject, HitObjectKind, HoldNote, Slider, Spinner},
        mode::GameMode,
    },
    Beatmap, GameMods,
};

use crate::{
    error::{FeatureError, FeatureResult},
    util::{
        control_points::slider_timing_at,
        mods::{Mods, Reflection},
    },
};

use super::{
    osu_object::OsuObject,
    scaling_factor::ScalingFactor,
    slider::{OsuSlider, SliderTiming},
    stacking::{apply_stacking, apply_stacking_old},
};

const PLAYFIELD_BASE_SIZE: Pos = Pos::new(512.0, 384.0);
const BASE_SCORING_DIST: f64 = 100.0;

/// Convert the map's hit objects into [`OsuObject`]s with stacked positions.
///
/// Stacking is processed on the full map, only the first `take` objects are
/// returned.
pub(crate) fn convert_objects(
    map: &Beatmap,
    mods: &GameMods,
    clock_rate: f64,
    take: usize,
) -> FeatureResult<Vec<OsuObject>> {
    if map.mode != GameMode::Osu {
        return Err(FeatureError::UnsupportedMode(map.mode));
    }

    let map_attrs = map
        .attributes()
        .mods(mods.clone())
        .clock_rate(clock_rate)
        .build();

    let scaling_factor = ScalingFactor::new(map_attrs.cs);
    let time_preempt = map_attrs.hit_windows.ar * clock_rate;
    let reflection = mods.reflection();

    let mut objects: Vec<_> = map
        .hit_objects
        .iter()
        .map(|h| convert_object(h, map, &scaling_factor, reflection))
        .collect();

    if map.version >= 6 {
        apply_stacking(&mut objects, time_preempt, map.stack_leniency);
    } else {
        apply_stacking_old(&mut objects, time_preempt, map.stack_leniency);
    }

    for h in objects.iter_mut() {
        h.apply_stack_offset(scaling_factor.stack_offset(h.stack_height));
    }

    objects.truncate(take);

    tracing::debug!(
        n_objects = objects.len(),
        cs = map_attrs.cs,
        time_preempt,
        ?reflection,
        "Converted hit objects"
    );

    Ok(objects)
}

fn convert_object(
    h: &HitObject,
    map: &Beatmap,
    scaling_factor: &ScalingFactor,
    reflection: Reflection,
) -> OsuObject {
    let pos = reflect_playfield(h.pos, reflection);
    let radius = scaling_factor.radius;

    match h.kind {
        HitObjectKind::Circle | HitObjectKind::Hold(HoldNote { .. }) => {
            OsuObject::circle(pos, h.start_time, radius)
        }
        HitObjectKind::Slider(ref slider) => {
            let slider = convert_slider(h.start_time, slider, map, reflection);

            OsuObject::slider(pos, h.start_time, radius, slider)
        }
        HitObjectKind::Spinner(Spinner { duration }) => {
            OsuObject::spinner(pos, h.start_time, duration, radius)
        }
    }
}

fn convert_slider(
    start_time: f64,
    slider: &Slider,
    map: &Beatmap,
    reflection: Reflection,
) -> OsuSlider {
    let (beat_len, slider_velocity) =
        slider_timing_at(&map.timing_points, &map.difficulty_points, start_time);

    let scoring_dist = BASE_SCORING_DIST * map.slider_multiplier * slider_velocity;
    let velocity = scoring_dist / beat_len;

    let mut tick_dist = scoring_dist / map.slider_tick_rate;

    if map.version < 8 {
        tick_dist /= slider_velocity;
    }

    let control_points: Vec<_> = slider
        .control_points
        .iter()
        .map(|point| reflect_control_point(point, reflection))
        .collect();

    let curve = Curve::new(GameMode::Osu, &control_points, slider.expected_dist);

    let timing = SliderTiming {
        start_time,
        span_count: slider.repeats + 1,
        len: curve.dist(),
        velocity,
        tick_dist,
    };

    OsuSlider::new(
        timing.span_count,
        timing.span_duration(),
        timing.nested_times(),
        curve,
    )
}

fn reflect_playfield(pos: Pos, reflection: Reflection) -> Pos {
    let x = if reflection.flips_x() {
        PLAYFIELD_BASE_SIZE.x - pos.x
    } else {
        pos.x
    };

    let y = if reflection.flips_y() {
        PLAYFIELD_BASE_SIZE.y - pos.y
    } else {
        pos.y
    };

    Pos::new(x, y)
}

// Control points are relative to the slider head
fn reflect_control_point(point: &PathControlPoint, reflection: Reflection) -> PathControlPoint {
    let mut point = point.clone();

    if reflection.flips_x() {
        point.pos.x = -point.pos.x;
    }

    if reflection.flips_y() {
        point.pos.y = -point.pos.y;
    }

    point
}
