use rosu_pp::model::mode::GameMode;

/// Errors that can occur while preparing a beatmap for feature extraction.
#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    /// Only osu!standard maps carry the geometry that aim features are
    /// computed from.
    #[error("unsupported game mode {0:?}, expected osu!standard")]
    UnsupportedMode(GameMode),
}

pub type FeatureResult<T> = Result<T, FeatureError>;
