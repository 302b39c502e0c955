//! Per-object aim features for osu!standard difficulty calculation.
//!
//! For every hit object, [`osu_2019::OsuDifficultyObject`] holds the time
//! since its predecessor, the normalized jump and slider travel distances,
//! and the angle between the last two cursor movements.

pub mod osu_2019;

mod error;
mod util;

pub use self::error::{FeatureError, FeatureResult};
