// src/footprint/components.rs
use bevy::prelude::*;

use super::config::{FootprintConfigError, FootprintSettings};
use super::core::{FootprintPlacer, FootprintPose, Handedness};

/// Leaves a footprint trail behind the entity it sits on.
/// Position comes from the entity's `GlobalTransform`.
#[derive(Component)]
pub struct FootprintEmitter {
    pub placer: FootprintPlacer<Entity>,
    /// Optional settings asset; the placer is reconfigured when it (re)loads.
    pub settings: Option<Handle<FootprintSettings>>,
}

impl FootprintEmitter {
    pub fn new(settings: FootprintSettings) -> Result<Self, FootprintConfigError> {
        Ok(Self {
            placer: FootprintPlacer::new(settings)?,
            settings: None,
        })
    }

    pub fn with_settings_asset(mut self, handle: Handle<FootprintSettings>) -> Self {
        self.settings = Some(handle);
        self
    }
}

/// Marker on every spawned footprint.
#[derive(Component, Debug, Clone, Copy)]
pub struct FootprintMarker {
    /// Emitter that owns (and will despawn) this marker.
    pub owner: Entity,
    pub handedness: Handedness,
}

/// Mesh + material used for one marker variant.
#[derive(Clone)]
pub struct FootprintPrefab {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Left/right visuals. Without this resource markers spawn without a mesh.
#[derive(Resource, Clone)]
pub struct FootprintPrefabs {
    pub left: FootprintPrefab,
    /// Only used when alternation is on.
    pub right: FootprintPrefab,
}

impl FootprintPrefabs {
    pub fn for_side(&self, side: Handedness) -> &FootprintPrefab {
        match side {
            Handedness::Right => &self.right,
            Handedness::Left | Handedness::Single => &self.left,
        }
    }
}

// ---------- Events ----------

/// Written after every placement (footstep audio, dust, ...).
#[derive(Event, Debug, Clone, Copy)]
pub struct FootprintPlaced {
    pub emitter: Entity,
    pub marker: Entity,
    pub pose: FootprintPose,
}

/// Despawn all footprints of one emitter (`Some`) or of every emitter (`None`).
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ClearFootprints {
    pub emitter: Option<Entity>,
}

/// Show/hide all footprints of one emitter (`Some`) or of every emitter (`None`).
#[derive(Event, Debug, Clone, Copy)]
pub struct SetFootprintVisibility {
    pub emitter: Option<Entity>,
    pub visible: bool,
}
