use bevy::prelude::*;

use footfall::actions::ActionState;
use footfall::avatar::AvatarKeys;
use footfall::input::{camera_controller, footprint_hotkeys, input_mapping_system};
use footfall::{setup, AvatarPlugin, FootprintPlugin, UnitPlugin};

fn main() {
    App::new()
        // core engine plugins
        .add_plugins(DefaultPlugins)
        // domain plugins (after DefaultPlugins: footprints pick up the asset server)
        .add_plugins(FootprintPlugin) // trails + settings hot reload
        .add_plugins(AvatarPlugin)    // rescale / collider follow / anim triggers
        .add_plugins(UnitPlugin)      // spawns & moves the walker
        // S is taken by movement
        .insert_resource(AvatarKeys { rescale: KeyCode::KeyH })
        .init_resource::<ActionState>()
        // camera, light, ground, footprint visuals
        .add_systems(Startup, setup::setup)
        // input + camera each frame
        .add_systems(
            Update,
            (
                input_mapping_system,
                footprint_hotkeys.after(input_mapping_system),
                camera_controller,
            ),
        )
        .run();
}
