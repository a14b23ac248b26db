// src/unit/systems.rs

use bevy::input::mouse::MouseButton;
use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, Window};

use crate::actions::ActionState;
use crate::avatar::{HeightScaler, ScaleTop};
use crate::footprint::{FootprintEmitter, FootprintPlaced, FootprintSettings};
use crate::input::CameraOrbit;
use crate::setup::MainCamera;
use crate::unit::components::{MoveTo, Walker};

pub const WALKER_SETTINGS_PATH: &str = "footprints/walker.footprints.ron";

/// Spawns the pill-shaped walker with a footprint trail.
pub fn spawn_walker(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    assets: Res<AssetServer>,
) {
    let half_h = 0.9;

    let mut emitter = match FootprintEmitter::new(FootprintSettings::default()) {
        Ok(e) => e.with_settings_asset(assets.load(WALKER_SETTINGS_PATH)),
        Err(e) => {
            error!("Walker: default footprint settings rejected: {}", e);
            return;
        }
    };
    emitter.placer.subscribe(|pose| {
        trace!("Walker: footstep {:?} facing {:?}", pose.handedness, pose.facing);
    });

    let walker = commands
        .spawn((
            Name::new("Walker"),
            Mesh3d(meshes.add(Capsule3d::new(0.3, 1.2))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb_u8(124, 144, 255),
                ..default()
            })),
            Transform::from_xyz(0.0, half_h, 0.0),
            Walker { speed: 4.0, grounded_offset: half_h },
            MoveTo::default(),
            emitter,
        ))
        .id();

    // height targets for the rescale hotkey
    let head = commands.spawn((Name::new("Head"), Transform::from_xyz(0.0, 0.8, 0.0))).id();
    let feet = commands.spawn((Name::new("Feet"), Transform::from_xyz(0.0, -half_h, 0.0))).id();
    commands.entity(walker).add_children(&[head, feet]).insert(
        HeightScaler::new(ScaleTop::Entity(head), feet).with_multiplier(1.0 / 1.7),
    );
}

/// Moves walkers by WASD (camera-relative) or toward their click target.
pub fn move_walkers(
    time: Res<Time>,
    action_state: Res<ActionState>,
    cameras: Query<&CameraOrbit, With<MainCamera>>,
    mut query: Query<(&Walker, &mut Transform, &mut MoveTo)>,
) {
    let dt = time.delta_secs();
    let axis = action_state.move_axis();
    let forward = cameras.single().map(|o| o.forward_xz()).unwrap_or(Vec2::NEG_Y);
    let right = Vec2::new(-forward.y, forward.x);

    for (walker, mut tf, mut move_to) in &mut query {
        let current = Vec2::new(tf.translation.x, tf.translation.z);

        let next = if axis != Vec2::ZERO {
            move_to.0 = None;
            current + (forward * axis.y + right * axis.x) * walker.speed * dt
        } else if let Some(target) = move_to.0 {
            let goal = Vec2::new(target.x, target.z);
            let full = walker.speed * dt;
            if current.distance(goal) <= full {
                move_to.0 = None;
                goal
            } else {
                current + (goal - current).normalize_or_zero() * full
            }
        } else {
            continue;
        };

        tf.translation.x = next.x;
        tf.translation.z = next.y;
        tf.translation.y = walker.grounded_offset;
    }
}

/// On left-click, intersect the cursor ray with the ground plane and set the target.
pub fn click_to_move(
    windows: Query<&Window, With<PrimaryWindow>>,
    buttons: Res<ButtonInput<MouseButton>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut movers: Query<&mut MoveTo, With<Walker>>,
) {
    // only on the exact frame the left button was pressed
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok(window) = windows.single() else { return };
    let Some(cursor_pos) = window.cursor_position() else { return };
    let Ok((camera, cam_transform)) = cameras.single() else { return };
    let Ok(ray) = camera.viewport_to_world(cam_transform, cursor_pos) else { return };

    // ground is the y = 0 plane
    let Some(t) = ray.intersect_plane(Vec3::ZERO, InfinitePlane3d::new(Vec3::Y)) else {
        return;
    };
    let hit = ray.get_point(t);

    for mut mv in movers.iter_mut() {
        mv.0 = Some(hit);
    }
}

/// Footstep hook; audio would subscribe here.
pub fn log_footsteps(mut placed: EventReader<FootprintPlaced>) {
    for ev in placed.read() {
        debug!(
            "Footstep ({:?}) from {:?} at ({:.2}, {:.2})",
            ev.pose.handedness, ev.emitter, ev.pose.position.x, ev.pose.position.z
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::PlayerAction;
    use std::time::Duration;

    #[test]
    fn click_target_is_reached_and_cleared() {
        let mut app = App::new();
        app.init_resource::<ActionState>()
            .insert_resource(Time::<()>::default())
            .add_systems(Update, move_walkers);
        let walker = app
            .world_mut()
            .spawn((
                Transform::from_xyz(0.0, 0.9, 0.0),
                Walker { speed: 4.0, grounded_offset: 0.9 },
                MoveTo(Some(Vec3::new(0.0, 0.0, 1.0))),
            ))
            .id();

        app.world_mut().resource_mut::<Time>().advance_by(Duration::from_millis(100));
        app.update();
        let z = app.world().get::<Transform>(walker).unwrap().translation.z;
        assert!((z - 0.4).abs() < 1e-4);

        app.world_mut().resource_mut::<Time>().advance_by(Duration::from_secs(1));
        app.update();
        let tf = app.world().get::<Transform>(walker).unwrap();
        assert_eq!(tf.translation, Vec3::new(0.0, 0.9, 1.0));
        assert!(app.world().get::<MoveTo>(walker).unwrap().0.is_none());
    }

    #[test]
    fn keys_override_click_target() {
        let mut app = App::new();
        app.init_resource::<ActionState>()
            .insert_resource(Time::<()>::default())
            .add_systems(Update, move_walkers);
        let walker = app
            .world_mut()
            .spawn((
                Transform::from_xyz(0.0, 0.9, 0.0),
                Walker { speed: 2.0, grounded_offset: 0.9 },
                MoveTo(Some(Vec3::new(10.0, 0.0, 10.0))),
            ))
            .id();
        app.world_mut()
            .resource_mut::<ActionState>()
            .set(PlayerAction::MoveForward, true);

        app.world_mut().resource_mut::<Time>().advance_by(Duration::from_millis(500));
        app.update();

        // no camera -> forward is -Z
        let tf = app.world().get::<Transform>(walker).unwrap();
        assert!((tf.translation - Vec3::new(0.0, 0.9, -1.0)).length() < 1e-4);
        assert!(app.world().get::<MoveTo>(walker).unwrap().0.is_none());
    }
}
