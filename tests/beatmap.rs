use std::f64::consts::FRAC_PI_2;

use approx::assert_relative_eq;
use rosu_aim_features::{
    osu_2019::{OsuAimAttributes, OsuAimFeatures},
    FeatureError,
};
use rosu_pp::Beatmap;

const MAP: &str = "osu file format v14

[General]
StackLeniency: 0.7
Mode: 0

[Difficulty]
HPDrainRate:5
CircleSize:4
OverallDifficulty:8
ApproachRate:9
SliderMultiplier:1.4
SliderTickRate:1

[TimingPoints]
0,500,4,2,0,100,1,0

[HitObjects]
256,192,1000,1,0,0:0:0:0:
356,192,1500,1,0,0:0:0:0:
356,292,2000,2,0,L|356:92,1,200
356,50,3500,1,0,0:0:0:0:
256,192,3800,12,0,4500,0:0:0:0:
256,192,5000,1,0,0:0:0:0:
";

// CS 4
const RADIUS: f64 = 36.48;

fn map(content: &str) -> Beatmap {
    Beatmap::from_bytes(content.as_bytes()).unwrap()
}

fn calculate(features: OsuAimFeatures) -> OsuAimAttributes {
    features.calculate(&map(MAP)).unwrap()
}

#[test]
fn object_counts() {
    let attrs = calculate(OsuAimFeatures::new());

    assert_eq!(attrs.n_circles, 4);
    assert_eq!(attrs.n_sliders, 1);
    assert_eq!(attrs.n_spinners, 1);
    assert_eq!(attrs.difficulty_objects.len(), 5);
    assert_relative_eq!(attrs.clock_rate, 1.0);
}

#[test]
fn circle_jumps() {
    let attrs = calculate(OsuAimFeatures::new());
    let scaling_factor = 52.0 / RADIUS;

    let second = &attrs.difficulty_objects[0];
    assert_relative_eq!(second.strain_time, 500.0);
    assert_relative_eq!(second.jump_dist, 100.0 * scaling_factor, max_relative = 1e-4);
    assert_eq!(second.travel_dist, 0.0);
    assert_eq!(second.angle, None);

    let slider_head = &attrs.difficulty_objects[1];
    assert_relative_eq!(slider_head.jump_dist, 100.0 * scaling_factor, max_relative = 1e-4);
    assert_relative_eq!(slider_head.angle.unwrap(), FRAC_PI_2, epsilon = 1e-5);
}

#[test]
fn lazy_slider_travel() {
    let attrs = calculate(OsuAimFeatures::new());
    let scaling_factor = 52.0 / RADIUS;

    // One tick and the legacy last tick on a straight upwards slider
    let span_duration = 200.0 / 0.28;
    let legacy_last_tick_progress = (span_duration - 36.0) / span_duration;
    let travel = 200.0 * legacy_last_tick_progress - 3.0 * RADIUS;

    let after_slider = &attrs.difficulty_objects[2];

    assert_relative_eq!(after_slider.travel_dist, travel * scaling_factor, max_relative = 1e-3);
    assert_relative_eq!(
        after_slider.jump_dist,
        (292.0 - travel - 50.0) * scaling_factor,
        max_relative = 1e-3
    );
    assert_relative_eq!(after_slider.angle.unwrap(), 0.0, epsilon = 1e-5);
}

#[test]
fn spinners_have_no_geometry() {
    let attrs = calculate(OsuAimFeatures::new());

    for h in &attrs.difficulty_objects[3..] {
        assert_eq!(h.jump_dist, 0.0);
        assert_eq!(h.travel_dist, 0.0);
        assert_eq!(h.angle, None);
    }
}

#[test]
fn hardrock_keeps_distances_but_shrinks_circles() {
    let attrs = calculate(OsuAimFeatures::new().mods(16_u32));

    // CS 4 * 1.3
    let radius = 64.0 * (1.0 - 0.7 * (5.2 - 5.0) / 5.0) / 2.0;
    let second = &attrs.difficulty_objects[0];

    assert_relative_eq!(second.jump_dist, 100.0 * 52.0 / radius, max_relative = 1e-3);
    assert_relative_eq!(
        attrs.difficulty_objects[1].angle.unwrap(),
        FRAC_PI_2,
        epsilon = 1e-5
    );

    // Head at y=92, the reflected path runs down towards the circle at y=334
    let scaling_factor = 52.0 / radius;
    let span_duration = 200.0 / 0.28;
    let legacy_last_tick_progress = (span_duration - 36.0) / span_duration;
    let travel = 200.0 * legacy_last_tick_progress - 3.0 * radius;

    let after_slider = &attrs.difficulty_objects[2];

    assert_relative_eq!(after_slider.travel_dist, travel * scaling_factor, max_relative = 1e-3);
    assert_relative_eq!(
        after_slider.jump_dist,
        (334.0 - 92.0 - travel) * scaling_factor,
        max_relative = 1e-3
    );
    assert_relative_eq!(after_slider.angle.unwrap(), 0.0, epsilon = 1e-5);
}

#[test]
fn doubletime_clock_rate() {
    let attrs = calculate(OsuAimFeatures::new().mods(64_u32));

    assert_relative_eq!(attrs.clock_rate, 1.5);
    assert_relative_eq!(attrs.difficulty_objects[0].delta_time, 500.0 / 1.5, epsilon = 1e-9);
    assert_relative_eq!(attrs.difficulty_objects[0].start_time, 1500.0 / 1.5, epsilon = 1e-9);
}

#[test]
fn passed_objects() {
    let attrs = calculate(OsuAimFeatures::new().passed_objects(3));

    assert_eq!(attrs.difficulty_objects.len(), 2);
    assert_eq!(attrs.n_circles, 2);
    assert_eq!(attrs.n_sliders, 1);
}

#[test]
fn rejects_other_modes() {
    let taiko = MAP.replace("Mode: 0", "Mode: 1");
    let err = OsuAimFeatures::new().calculate(&map(&taiko)).unwrap_err();

    assert!(matches!(err, FeatureError::UnsupportedMode(_)));
}
