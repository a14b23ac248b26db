use bevy::prelude::*;

use crate::footprint::FootprintSet;
use crate::unit::systems::{click_to_move, log_footsteps, move_walkers, spawn_walker};

pub struct UnitPlugin;

impl Plugin for UnitPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_walker)
            .add_systems(Update, (click_to_move, move_walkers.after(click_to_move)))
            // footprints are placed in PostUpdate, once transforms are propagated
            .add_systems(PostUpdate, log_footsteps.after(FootprintSet::Place));
    }
}
