use std::{
    cmp,
    fmt::{Debug, Formatter, Result as FmtResult},
    num::NonZeroU32,
};

use rosu_pp::{Beatmap, GameMods};

use crate::{error::FeatureResult, util::mods::Mods};

use self::convert::convert_objects;

pub use self::{
    difficulty_object::OsuDifficultyObject,
    osu_object::{OsuObject, OsuObjectKind},
    path::SliderPath,
    scaling_factor::ScalingFactor,
    slider::{LazySlider, OsuSlider, SliderTiming},
};

mod convert;
mod difficulty_object;
mod osu_object;
mod path;
mod scaling_factor;
mod slider;
mod stacking;

/// Aim feature calculator on osu!standard maps.
///
/// # Example
///
/// ```no_run
/// use rosu_aim_features::osu_2019::OsuAimFeatures;
/// use rosu_pp::Beatmap;
///
/// let map = Beatmap::from_path("./resources/2118524.osu").unwrap();
///
/// let attrs = OsuAimFeatures::new()
///     .mods(8_u32 + 64) // HDDT
///     .calculate(&map)
///     .unwrap();
///
/// for h in attrs.difficulty_objects.iter() {
///     println!("{}: {} {:?}", h.start_time, h.jump_dist, h.angle);
/// }
/// ```
#[derive(Clone)]
#[must_use]
pub struct OsuAimFeatures {
    mods: GameMods,
    passed_objects: Option<u32>,
    /// Clock rate will be clamped internally between 0.01 and 100.0.
    ///
    /// Since its minimum value is 0.01, its bits are never zero.
    clock_rate: Option<NonZeroU32>,
}

/// The features of all hit objects of a map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OsuAimAttributes {
    /// Features of every hit object except the first.
    pub difficulty_objects: Vec<OsuDifficultyObject>,
    /// The clock rate that was used.
    pub clock_rate: f64,
    pub n_circles: u32,
    pub n_sliders: u32,
    pub n_spinners: u32,
}

impl OsuAimFeatures {
    /// Create a new feature calculator.
    pub fn new() -> Self {
        Self {
            mods: GameMods::from(0_u32),
            passed_objects: None,
            clock_rate: None,
        }
    }

    /// Specify mods.
    ///
    /// Relevant are clock rate mods (`DT`, `HT`), as well as `HR` and mirror
    /// for reflections. See <https://github.com/ppy/osu-api/wiki#mods>
    pub fn mods(self, mods: impl Into<GameMods>) -> Self {
        Self {
            mods: mods.into(),
            ..self
        }
    }

    /// Amount of passed objects for partial plays, e.g. a fail.
    pub const fn passed_objects(mut self, passed_objects: u32) -> Self {
        self.passed_objects = Some(passed_objects);

        self
    }

    /// Adjust the clock rate used in the calculation.
    ///
    /// If none is specified, it will take the clock rate based on the mods
    /// i.e. 1.5 for DT, 0.75 for HT and 1.0 otherwise.
    ///
    /// | Minimum | Maximum |
    /// | :-----: | :-----: |
    /// | 0.01    | 100     |
    pub fn clock_rate(self, clock_rate: f64) -> Self {
        let clock_rate = (clock_rate as f32).clamp(0.01, 100.0).to_bits();

        // SAFETY: The minimum value is 0.01 so its bits can never be fully
        // zero.
        let non_zero = unsafe { NonZeroU32::new_unchecked(clock_rate) };

        Self {
            clock_rate: Some(non_zero),
            ..self
        }
    }

    /// Convert the map and compute the features of all its hit objects.
    pub fn calculate(&self, map: &Beatmap) -> FeatureResult<OsuAimAttributes> {
        let clock_rate = self.get_clock_rate();
        let objects = convert_objects(map, &self.mods, clock_rate, self.get_passed_objects())?;

        let mut attrs = OsuAimAttributes {
            difficulty_objects: create_difficulty_objects(&objects, clock_rate),
            clock_rate,
            ..Default::default()
        };

        for h in objects.iter() {
            match h.kind {
                OsuObjectKind::Circle => attrs.n_circles += 1,
                OsuObjectKind::Slider(_) => attrs.n_sliders += 1,
                OsuObjectKind::Spinner { .. } => attrs.n_spinners += 1,
            }
        }

        Ok(attrs)
    }

    /// Compute the features of already converted hit objects.
    ///
    /// Mods are only considered for their clock rate.
    pub fn calculate_objects(&self, objects: &[OsuObject]) -> Vec<OsuDifficultyObject> {
        let take = cmp::min(objects.len(), self.get_passed_objects());

        create_difficulty_objects(&objects[..take], self.get_clock_rate())
    }

    pub(crate) fn get_clock_rate(&self) -> f64 {
        let clock_rate = self
            .clock_rate
            .map_or(self.mods.clock_rate() as f32, non_zero_u32_to_f32);

        f64::from(clock_rate)
    }

    pub(crate) fn get_passed_objects(&self) -> usize {
        self.passed_objects.map_or(usize::MAX, |n| n as usize)
    }
}

fn non_zero_u32_to_f32(n: NonZeroU32) -> f32 {
    f32::from_bits(n.get())
}

impl Debug for OsuAimFeatures {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let Self {
            mods,
            passed_objects,
            clock_rate,
        } = self;

        f.debug_struct("OsuAimFeatures")
            .field("mods", mods)
            .field("passed_objects", passed_objects)
            .field("clock_rate", &clock_rate.map(non_zero_u32_to_f32))
            .finish()
    }
}

impl Default for OsuAimFeatures {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a [`OsuDifficultyObject`] for every object but the first, each
/// looking back on its two predecessors.
pub fn create_difficulty_objects(
    osu_objects: &[OsuObject],
    clock_rate: f64,
) -> Vec<OsuDifficultyObject> {
    let mut osu_objects_iter = osu_objects.iter().enumerate();

    let Some((_, mut last)) = osu_objects_iter.next() else {
        return Vec::new();
    };

    let mut last_last = None;

    let diff_objects: Vec<_> = osu_objects_iter
        .map(|(idx, h)| {
            let diff_object = OsuDifficultyObject::new(idx, h, Some(last), last_last, clock_rate);

            last_last = Some(last);
            last = h;

            diff_object
        })
        .collect();

    tracing::debug!(
        n_objects = osu_objects.len(),
        n_difficulty_objects = diff_objects.len(),
        clock_rate,
        "Created difficulty objects"
    );

    diff_objects
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rosu_map::util::Pos;

    use super::*;

    fn circles() -> Vec<OsuObject> {
        (0..5)
            .map(|i| OsuObject::circle(Pos::new(i as f32 * 50.0, 0.0), i as f64 * 300.0, 52.0))
            .collect()
    }

    #[test]
    fn one_object_per_predecessor() {
        let objects = circles();
        let diff_objects = OsuAimFeatures::new().calculate_objects(&objects);

        assert_eq!(diff_objects.len(), 4);

        for (i, h) in diff_objects.iter().enumerate() {
            assert_eq!(h.idx, i + 1);
            assert_relative_eq!(h.strain_time, 300.0);
            assert_relative_eq!(h.jump_dist, 50.0, epsilon = 1e-4);
        }

        assert_eq!(diff_objects[0].angle, None);
        assert!(diff_objects[1..].iter().all(|h| h.angle.is_some()));
    }

    #[test]
    fn passed_objects_truncates() {
        let objects = circles();
        let diff_objects = OsuAimFeatures::new()
            .passed_objects(3)
            .calculate_objects(&objects);

        assert_eq!(diff_objects.len(), 2);
    }

    #[test]
    fn no_objects() {
        assert!(create_difficulty_objects(&[], 1.0).is_empty());
        assert!(create_difficulty_objects(&circles()[..1], 1.0).is_empty());
    }

    #[test]
    fn clock_rate_from_mods() {
        assert_relative_eq!(OsuAimFeatures::new().get_clock_rate(), 1.0);
        assert_relative_eq!(OsuAimFeatures::new().mods(64_u32).get_clock_rate(), 1.5);
        assert_relative_eq!(
            OsuAimFeatures::new().mods(64_u32).clock_rate(1.2).get_clock_rate(),
            1.2,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            OsuAimFeatures::new().clock_rate(0.0).get_clock_rate(),
            0.01,
            epsilon = 1e-6
        );
    }

    #[test]
    fn dt_halves_strain_time() {
        let objects = circles();
        let diff_objects = OsuAimFeatures::new().mods(64_u32).calculate_objects(&objects);

        assert_relative_eq!(diff_objects[0].strain_time, 200.0, epsilon = 1e-9);
    }
}
