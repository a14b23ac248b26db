// src/footprint/mod.rs

pub mod components;
pub mod config;
pub mod core;
mod plugin;
mod systems;

pub use components::{
    ClearFootprints, FootprintEmitter, FootprintMarker, FootprintPlaced, FootprintPrefab,
    FootprintPrefabs, SetFootprintVisibility,
};
pub use config::{FootprintConfigError, FootprintSettings, FootprintSettingsLoadError};
pub use self::core::{FootprintPlacer, FootprintPose, FootprintRecord, Handedness, MarkerRenderer};
pub use plugin::{FootprintPlugin, FootprintSet, FootprintSettingsAssetPlugin};
pub use systems::CommandMarkers;
