use bevy::prelude::*;

#[derive(Component)]
pub struct Walker {
    /// Ground speed in m/s.
    pub speed: f32,
    /// Height of the origin above the ground plane.
    pub grounded_offset: f32,
}

/// Click target; cleared once reached or when steering by keys.
#[derive(Component, Default)]
pub struct MoveTo(pub Option<Vec3>);
