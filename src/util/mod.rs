pub mod control_points;
pub mod mods;
