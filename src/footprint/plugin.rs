//! Footprint plugin wiring (glue).
//! - Placement/request events
//! - Per-frame placement + request handling + orphan cleanup
//! - Settings asset/loader (only when an `AssetServer` is present)

use bevy::diagnostic::FrameCount;
use bevy::prelude::*;
use bevy::transform::TransformSystem;

use super::components::{ClearFootprints, FootprintPlaced, SetFootprintVisibility};
use super::config::{FootprintSettings, FootprintSettingsLoader};
use super::systems::{
    apply_settings_assets, despawn_orphaned_markers, evaluate_footprints, handle_clear_requests,
    handle_visibility_requests,
};

/// Runs in `PostUpdate` after transform propagation, so emitters see this
/// frame's `GlobalTransform`. Footstep reactions go `.after(FootprintSet::Place)`.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum FootprintSet {
    Requests, // clear / visibility
    Place,    // evaluate emitters
    Cleanup,  // orphaned markers
}

pub struct FootprintSettingsAssetPlugin;

impl Plugin for FootprintSettingsAssetPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<FootprintSettings>()
            .register_asset_loader(FootprintSettingsLoader)
            .add_systems(PostUpdate, apply_settings_assets.before(FootprintSet::Requests));
    }
}

pub struct FootprintPlugin;

impl Plugin for FootprintPlugin {
    fn build(&self, app: &mut App) {
        // headless apps (tests, servers) run without the asset server
        if app.world().contains_resource::<AssetServer>() {
            app.add_plugins(FootprintSettingsAssetPlugin);
        }

        app.init_resource::<FrameCount>()
            .add_event::<FootprintPlaced>()
            .add_event::<ClearFootprints>()
            .add_event::<SetFootprintVisibility>()
            .configure_sets(
                PostUpdate,
                (FootprintSet::Requests, FootprintSet::Place, FootprintSet::Cleanup)
                    .chain()
                    .after(TransformSystem::TransformPropagate),
            )
            .add_systems(
                PostUpdate,
                (handle_clear_requests, handle_visibility_requests)
                    .chain()
                    .in_set(FootprintSet::Requests),
            )
            .add_systems(PostUpdate, evaluate_footprints.in_set(FootprintSet::Place))
            .add_systems(PostUpdate, despawn_orphaned_markers.in_set(FootprintSet::Cleanup));
    }
}
