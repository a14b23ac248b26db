// src/avatar/systems.rs

use bevy::input::ButtonInput;
use bevy::prelude::*;

use crate::avatar::components::{
    scale_for_height, AnimatorParameters, AvatarKeys, BoxCollider, ColliderFollow, HeightScaler,
    ParameterOnKey, RescaleAvatar, ScaleTop,
};
use crate::setup::MainCamera;

/// Debug hotkey -> rescale everything.
pub fn rescale_on_key(
    keys: Res<ButtonInput<KeyCode>>,
    avatar_keys: Res<AvatarKeys>,
    mut requests: EventWriter<RescaleAvatar>,
) {
    if keys.just_pressed(avatar_keys.rescale) {
        requests.write(RescaleAvatar { avatar: None });
    }
}

/// Measures top/bottom targets and applies a uniform scale.
pub fn rescale_avatars(
    mut requests: EventReader<RescaleAvatar>,
    scalers: Query<(Entity, &HeightScaler)>,
    cameras: Query<Entity, With<MainCamera>>,
    globals: Query<&GlobalTransform>,
    mut transforms: Query<&mut Transform, With<HeightScaler>>,
) {
    for req in requests.read() {
        for (entity, scaler) in &scalers {
            if req.avatar.is_some_and(|target| target != entity) {
                continue;
            }

            // 1) resolve the top target
            let top = match scaler.top {
                ScaleTop::Entity(e) => e,
                ScaleTop::MainCamera => match cameras.single() {
                    Ok(cam) => cam,
                    Err(_) => {
                        warn!("Avatar: {:?} wants the main camera as top target, but none is unique", entity);
                        continue;
                    }
                },
            };

            // 2) sample both heights
            let (Ok(top_tf), Ok(bottom_tf)) = (globals.get(top), globals.get(scaler.bottom)) else {
                warn!("Avatar: {:?} has a missing height target; skipping rescale", entity);
                continue;
            };
            let top_y = top_tf.translation().y;
            let target = scale_for_height(top_y, bottom_tf.translation().y, scaler.multiplier);

            // 3) apply
            let Ok(mut tf) = transforms.get_mut(entity) else { continue };
            tf.scale = Vec3::splat(target);
            info!("Avatar: rescaling {:?} to {} (top at {})", entity, target, top_y);
        }
    }
}

pub fn parameter_on_key(
    keys: Res<ButtonInput<KeyCode>>,
    mut query: Query<(&ParameterOnKey, &mut AnimatorParameters)>,
) {
    for (trigger, mut params) in &mut query {
        if keys.pressed(trigger.key) {
            params.set_int(&trigger.parameter, trigger.value);
        }
    }
}

/// Collider center tracks the camera's local XZ; y stays fixed.
pub fn collider_follow(
    keys: Res<ButtonInput<KeyCode>>,
    cameras: Query<&Transform, Without<ColliderFollow>>,
    mut query: Query<(&ColliderFollow, &mut BoxCollider, &mut Transform)>,
) {
    for (follow, mut collider, mut tf) in &mut query {
        if let Ok(cam) = cameras.get(follow.camera) {
            let local = cam.translation;
            collider.center = Vec3::new(local.x, follow.y, local.z);
        }

        if keys.just_pressed(follow.reset_key) {
            tf.translation = Vec3::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avatar::AvatarPlugin;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(AvatarPlugin);
        app
    }

    fn at(y: f32) -> GlobalTransform {
        GlobalTransform::from_translation(Vec3::new(0.0, y, 0.0))
    }

    fn press(app: &mut App, key: KeyCode) {
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(key);
    }

    #[test]
    fn scale_is_height_times_multiplier() {
        assert!((scale_for_height(1.8, 0.3, 0.666) - 0.999).abs() < 1e-5);
        assert_eq!(scale_for_height(2.0, 0.0, 0.5), 1.0);
    }

    #[test]
    fn rescale_event_uses_explicit_targets() {
        let mut app = app();
        let head = app.world_mut().spawn(at(2.0)).id();
        let feet = app.world_mut().spawn(at(0.5)).id();
        let avatar = app
            .world_mut()
            .spawn((Transform::default(), HeightScaler::new(ScaleTop::Entity(head), feet)))
            .id();

        app.world_mut().send_event(RescaleAvatar { avatar: Some(avatar) });
        app.update();

        let scale = app.world().get::<Transform>(avatar).unwrap().scale;
        assert!((scale - Vec3::splat(1.5 * 0.666)).length() < 1e-5);
    }

    #[test]
    fn hotkey_rescales_against_main_camera() {
        let mut app = app();
        app.world_mut().spawn((MainCamera, at(1.0)));
        let feet = app.world_mut().spawn(at(0.0)).id();
        let avatar = app
            .world_mut()
            .spawn((
                Transform::default(),
                HeightScaler::new(ScaleTop::MainCamera, feet).with_multiplier(2.0),
            ))
            .id();

        press(&mut app, KeyCode::KeyS);
        app.update();

        assert_eq!(app.world().get::<Transform>(avatar).unwrap().scale, Vec3::splat(2.0));
    }

    #[test]
    fn missing_target_leaves_scale_alone() {
        let mut app = app();
        let feet = app.world_mut().spawn(at(0.0)).id();
        let gone = app.world_mut().spawn(at(3.0)).id();
        app.world_mut().despawn(gone);
        let avatar = app
            .world_mut()
            .spawn((Transform::default(), HeightScaler::new(ScaleTop::Entity(gone), feet)))
            .id();

        app.world_mut().send_event(RescaleAvatar::default());
        app.update();

        assert_eq!(app.world().get::<Transform>(avatar).unwrap().scale, Vec3::ONE);
    }

    #[test]
    fn held_key_sets_parameter_and_it_sticks() {
        let mut app = app();
        let plank = app.world_mut().spawn(ParameterOnKey::extend(KeyCode::KeyE)).id();

        app.update();
        assert_eq!(app.world().get::<AnimatorParameters>(plank).unwrap().int("Extend"), 0);

        press(&mut app, KeyCode::KeyE);
        app.update();
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().release(KeyCode::KeyE);
        app.update();
        assert_eq!(app.world().get::<AnimatorParameters>(plank).unwrap().int("Extend"), 1);
    }

    #[test]
    fn collider_tracks_camera_xz_at_fixed_height() {
        let mut app = app();
        let cam = app.world_mut().spawn(Transform::from_xyz(0.4, 1.7, -0.2)).id();
        let rig = app
            .world_mut()
            .spawn((Transform::from_xyz(5.0, 0.0, 5.0), ColliderFollow::new(cam)))
            .id();

        app.update();
        let collider = *app.world().get::<BoxCollider>(rig).unwrap();
        assert_eq!(collider.center, Vec3::new(0.4, 0.1, -0.2));
        assert_eq!(app.world().get::<Transform>(rig).unwrap().translation, Vec3::new(5.0, 0.0, 5.0));

        press(&mut app, KeyCode::KeyR);
        app.update();
        assert_eq!(app.world().get::<Transform>(rig).unwrap().translation, Vec3::ZERO);
    }
}
