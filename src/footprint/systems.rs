// src/footprint/systems.rs

use std::collections::HashSet;

use bevy::diagnostic::FrameCount;
use bevy::prelude::*;

use super::components::{
    ClearFootprints, FootprintEmitter, FootprintMarker, FootprintPlaced, FootprintPrefabs,
    SetFootprintVisibility,
};
use super::config::FootprintSettings;
use super::core::{FootprintPose, MarkerRenderer};

/// `MarkerRenderer` backed by `Commands`: markers are plain entities.
pub struct CommandMarkers<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    prefabs: Option<&'a FootprintPrefabs>,
    owner: Entity,
}

impl<'a, 'w, 's> CommandMarkers<'a, 'w, 's> {
    pub fn new(
        commands: &'a mut Commands<'w, 's>,
        prefabs: Option<&'a FootprintPrefabs>,
        owner: Entity,
    ) -> Self {
        Self { commands, prefabs, owner }
    }

    fn visibility(visible: bool) -> Visibility {
        if visible { Visibility::Inherited } else { Visibility::Hidden }
    }
}

impl MarkerRenderer for CommandMarkers<'_, '_, '_> {
    type Handle = Entity;

    fn spawn(&mut self, pose: &FootprintPose) -> Entity {
        let transform = pose.transform();
        // spawned after transform propagation, so seed the global transform too
        let mut marker = self.commands.spawn((
            Name::new("Footprint"),
            FootprintMarker { owner: self.owner, handedness: pose.handedness },
            transform,
            GlobalTransform::from(transform),
            Self::visibility(true),
        ));
        if let Some(prefab) = self.prefabs.map(|p| p.for_side(pose.handedness)) {
            marker.insert((
                Mesh3d(prefab.mesh.clone()),
                MeshMaterial3d(prefab.material.clone()),
            ));
        }
        marker.id()
    }

    fn destroy(&mut self, handle: Entity) {
        // the marker may already be gone (despawned by gameplay code)
        self.commands.entity(handle).try_despawn();
    }

    fn set_visible(&mut self, handle: &Entity, visible: bool) {
        self.commands.entity(*handle).try_insert(Self::visibility(visible));
    }
}

/// Per-frame placement decision for every emitter.
pub fn evaluate_footprints(
    mut commands: Commands,
    frames: Res<FrameCount>,
    prefabs: Option<Res<FootprintPrefabs>>,
    mut emitters: Query<(Entity, &GlobalTransform, &mut FootprintEmitter)>,
    mut placed: EventWriter<FootprintPlaced>,
) {
    let tick = u64::from(frames.0);
    for (entity, gt, mut emitter) in &mut emitters {
        let mut markers = CommandMarkers::new(&mut commands, prefabs.as_deref(), entity);
        let Some(pose) = emitter.placer.evaluate(gt.translation(), tick, &mut markers) else {
            continue;
        };
        let Some(marker) = emitter.placer.latest().map(|r| r.handle) else {
            continue;
        };
        debug!(
            "Footprints: {:?} placed {:?} at ({:.2}, {:.2})",
            entity, pose.handedness, pose.position.x, pose.position.z
        );
        placed.write(FootprintPlaced { emitter: entity, marker, pose });
    }
}

pub fn handle_clear_requests(
    mut commands: Commands,
    mut requests: EventReader<ClearFootprints>,
    mut emitters: Query<(Entity, &mut FootprintEmitter)>,
) {
    for req in requests.read() {
        for (entity, mut emitter) in &mut emitters {
            if req.emitter.is_some_and(|target| target != entity) {
                continue;
            }
            let cleared = emitter.placer.len();
            let mut markers = CommandMarkers::new(&mut commands, None, entity);
            emitter.placer.clear(&mut markers);
            info!("Footprints: cleared {} markers from {:?}", cleared, entity);
        }
    }
}

pub fn handle_visibility_requests(
    mut commands: Commands,
    mut requests: EventReader<SetFootprintVisibility>,
    emitters: Query<(Entity, &FootprintEmitter)>,
) {
    for req in requests.read() {
        for (entity, emitter) in &emitters {
            if req.emitter.is_some_and(|target| target != entity) {
                continue;
            }
            let mut markers = CommandMarkers::new(&mut commands, None, entity);
            emitter.placer.set_visibility(req.visible, &mut markers);
        }
    }
}

/// Emitter removed or despawned -> its markers go too.
pub fn despawn_orphaned_markers(
    mut commands: Commands,
    mut removed: RemovedComponents<FootprintEmitter>,
    markers: Query<(Entity, &FootprintMarker)>,
) {
    let gone: Vec<Entity> = removed.read().collect();
    if gone.is_empty() {
        return;
    }
    for (entity, marker) in &markers {
        if gone.contains(&marker.owner) {
            commands.entity(entity).try_despawn();
        }
    }
}

/// Applies settings assets to emitters: on load, on change on disk, and to
/// emitters spawned after their asset was already loaded.
pub fn apply_settings_assets(
    mut commands: Commands,
    mut events: EventReader<AssetEvent<FootprintSettings>>,
    assets: Res<Assets<FootprintSettings>>,
    mut emitters: Query<(Entity, &mut FootprintEmitter)>,
) {
    let updated: HashSet<AssetId<FootprintSettings>> = events
        .read()
        .filter_map(|ev| match ev {
            AssetEvent::Added { id }
            | AssetEvent::LoadedWithDependencies { id }
            | AssetEvent::Modified { id } => Some(*id),
            _ => None,
        })
        .collect();

    for (entity, mut emitter) in &mut emitters {
        let Some(id) = emitter.settings.as_ref().map(|h| h.id()) else { continue };
        if !emitter.is_added() && !updated.contains(&id) {
            continue;
        }
        // not loaded yet; its load event comes later
        let Some(settings) = assets.get(id) else { continue };

        let mut markers = CommandMarkers::new(&mut commands, None, entity);
        match emitter.placer.reconfigure(settings.clone(), &mut markers) {
            Ok(()) => info!("Footprints: applied settings {:?} to {:?}", id, entity),
            Err(e) => warn!("Footprints: rejected settings for {:?}: {}", entity, e),
        }
    }
}
