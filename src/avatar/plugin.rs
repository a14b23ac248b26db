use bevy::input::ButtonInput;
use bevy::prelude::*;

use crate::avatar::components::{AvatarKeys, RescaleAvatar};
use crate::avatar::systems::{collider_follow, parameter_on_key, rescale_avatars, rescale_on_key};

pub struct AvatarPlugin;

impl Plugin for AvatarPlugin {
    fn build(&self, app: &mut App) {
        app
            // InputPlugin normally owns this; headless apps still need it
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<AvatarKeys>()
            .add_event::<RescaleAvatar>()
            .add_systems(
                Update,
                (
                    rescale_on_key,
                    rescale_avatars.after(rescale_on_key),
                    parameter_on_key,
                    collider_follow,
                ),
            );
    }
}
