use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::input::{keyboard::KeyCode, ButtonInput};
use bevy::prelude::*;

use crate::actions::{ActionState, PlayerAction};
use crate::footprint::{ClearFootprints, SetFootprintVisibility};
use crate::setup::MainCamera;
use crate::unit::Walker;

pub const ROTATE_SPEED: f32 = 0.2;
pub const MAX_CAMERA_DT: f32 = 0.05; // never use a dt larger than 50ms

#[derive(Component)]
pub struct CameraOrbit {
    pub focus: Vec3,
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraOrbit {
    /// Ground-plane forward of the camera, matching `offset()`.
    pub fn forward_xz(&self) -> Vec2 {
        Vec2::new(-self.yaw.cos(), -self.yaw.sin())
    }

    pub fn offset(&self) -> Vec3 {
        let xz_radius = self.radius * self.pitch.cos();
        Vec3::new(
            xz_radius * self.yaw.cos(),
            self.radius * self.pitch.sin(),
            xz_radius * self.yaw.sin(),
        )
    }
}

pub fn input_mapping_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut action_state: ResMut<ActionState>,
) {
    action_state.set(PlayerAction::MoveForward, keys.pressed(KeyCode::KeyW));
    action_state.set(PlayerAction::MoveBackward, keys.pressed(KeyCode::KeyS));
    action_state.set(PlayerAction::MoveLeft, keys.pressed(KeyCode::KeyA));
    action_state.set(PlayerAction::MoveRight, keys.pressed(KeyCode::KeyD));
    action_state.set(PlayerAction::ToggleFootprints, keys.just_pressed(KeyCode::KeyF));
    action_state.set(PlayerAction::ClearFootprints, keys.just_pressed(KeyCode::KeyC));
}

/// F toggles trail visibility, C wipes all trails.
pub fn footprint_hotkeys(
    action_state: Res<ActionState>,
    mut hidden: Local<bool>,
    mut visibility: EventWriter<SetFootprintVisibility>,
    mut clear: EventWriter<ClearFootprints>,
) {
    if action_state.pressed(PlayerAction::ToggleFootprints) {
        *hidden = !*hidden;
        visibility.write(SetFootprintVisibility { emitter: None, visible: !*hidden });
        info!("Footprints {}", if *hidden { "hidden" } else { "shown" });
    }
    if action_state.pressed(PlayerAction::ClearFootprints) {
        clear.write(ClearFootprints { emitter: None });
    }
}

/// Orbit camera that keeps the walker in focus.
pub fn camera_controller(
    time: Res<Time>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut motion_evr: EventReader<MouseMotion>,
    mut scroll_evr: EventReader<MouseWheel>,
    walkers: Query<&Transform, (With<Walker>, Without<MainCamera>)>,
    mut query: Query<(&mut Transform, &mut CameraOrbit), With<MainCamera>>,
) {
    // 0) Clamp delta
    let dt = time.delta_secs().min(MAX_CAMERA_DT);

    let Ok((mut tf, mut orbit)) = query.single_mut() else { return; };

    // 1) Follow the walker
    if let Ok(walker) = walkers.single() {
        orbit.focus = walker.translation;
    }

    // 2) Zoom
    for ev in scroll_evr.read() {
        let amount = match ev.unit {
            MouseScrollUnit::Line => ev.y * 1.0,
            MouseScrollUnit::Pixel => ev.y * 0.02,
        };
        orbit.radius = (orbit.radius - amount).clamp(2.0, 60.0);
    }

    // 3) Orbit
    if mouse_buttons.pressed(MouseButton::Middle) {
        for ev in motion_evr.read() {
            orbit.yaw += ev.delta.x * ROTATE_SPEED * dt;
            orbit.pitch += ev.delta.y * ROTATE_SPEED * dt;
        }
    }

    orbit.pitch = orbit.pitch.clamp(0.05, std::f32::consts::FRAC_PI_2 - 0.01);

    // 4) Position camera
    tf.translation = orbit.focus + orbit.offset();
    tf.look_at(orbit.focus, Vec3::Y);
}
