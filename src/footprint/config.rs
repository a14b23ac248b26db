// src/footprint/config.rs
//! Data-driven footprint settings + `.footprints.ron` loader.

use bevy::asset::{io::Reader, AssetLoader, LoadContext};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ---------- Settings (data form) ----------

#[derive(Asset, TypePath, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootprintSettings {
    /// Master switch; when false no evaluation happens.
    pub enabled: bool,

    /// Min XZ distance from the last footprint before a new one is placed.
    pub min_distance: f32,

    /// World height every footprint is placed at.
    pub ground_height: f32,

    /// Only evaluate every Nth frame.
    pub evaluation_interval: u32,

    /// Alternate left/right markers (use with asymmetric prefabs).
    pub alternate_handedness: bool,

    /// Maximum number of footprints before the oldest are erased.
    pub max_history: usize,
}

impl Default for FootprintSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            min_distance: 1.0,
            ground_height: 0.001,
            evaluation_interval: 1,
            alternate_handedness: true,
            max_history: 128,
        }
    }
}

impl FootprintSettings {
    /// Rejects settings the placer can't run with. Nothing is clamped.
    pub fn validate(&self) -> Result<(), FootprintConfigError> {
        // `!(x > 0)` also catches NaN
        if !(self.min_distance > 0.0) {
            return Err(FootprintConfigError::MinDistance(self.min_distance));
        }
        if self.evaluation_interval < 1 {
            return Err(FootprintConfigError::EvaluationInterval);
        }
        if self.max_history < 1 {
            return Err(FootprintConfigError::MaxHistory);
        }
        Ok(())
    }

    /// Parse + validate a RON document.
    pub fn from_ron_str(src: &str) -> Result<Self, FootprintSettingsLoadError> {
        let settings: Self =
            ron::from_str(src).map_err(|e| FootprintSettingsLoadError::Ron(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}

// ---------- Asset plumbing ----------

#[derive(Default)]
pub struct FootprintSettingsLoader;

impl AssetLoader for FootprintSettingsLoader {
    type Asset = FootprintSettings;
    type Settings = ();
    type Error = FootprintSettingsLoadError;

    fn extensions(&self) -> &[&str] {
        &["footprints.ron"]
    }

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        let settings: FootprintSettings = ron::de::from_bytes(&bytes)
            .map_err(|e| FootprintSettingsLoadError::Ron(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}

// ---------- Errors ----------

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FootprintConfigError {
    #[error("min_distance must be > 0 (got {0})")]
    MinDistance(f32),
    #[error("evaluation_interval must be >= 1")]
    EvaluationInterval,
    #[error("max_history must be >= 1")]
    MaxHistory,
}

#[derive(thiserror::Error, Debug)]
pub enum FootprintSettingsLoadError {
    #[error("I/O while reading footprint settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(String),
    #[error("invalid footprint settings: {0}")]
    Invalid(#[from] FootprintConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(FootprintSettings::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_non_positive_min_distance() {
        for bad in [0.0, -1.0, f32::NAN] {
            let s = FootprintSettings { min_distance: bad, ..default() };
            assert!(matches!(s.validate(), Err(FootprintConfigError::MinDistance(_))));
        }
    }

    #[test]
    fn rejects_zero_interval_and_history() {
        let s = FootprintSettings { evaluation_interval: 0, ..default() };
        assert_eq!(s.validate(), Err(FootprintConfigError::EvaluationInterval));

        let s = FootprintSettings { max_history: 0, ..default() };
        assert_eq!(s.validate(), Err(FootprintConfigError::MaxHistory));
    }

    #[test]
    fn ron_fills_missing_fields_with_defaults() {
        let s = FootprintSettings::from_ron_str("(min_distance: 0.5, max_history: 16)").unwrap();
        assert_eq!(s.min_distance, 0.5);
        assert_eq!(s.max_history, 16);
        assert_eq!(s.ground_height, 0.001);
        assert!(s.alternate_handedness);
    }

    #[test]
    fn ron_validation_errors_surface() {
        let err = FootprintSettings::from_ron_str("(evaluation_interval: 0)").unwrap_err();
        assert!(matches!(
            err,
            FootprintSettingsLoadError::Invalid(FootprintConfigError::EvaluationInterval)
        ));

        let err = FootprintSettings::from_ron_str("(min_distance: \"far\")").unwrap_err();
        assert!(matches!(err, FootprintSettingsLoadError::Ron(_)));
    }
}
