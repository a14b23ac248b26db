use bevy::prelude::*;

use crate::footprint::{FootprintPrefab, FootprintPrefabs};
use crate::input::CameraOrbit;

#[derive(Component)]
pub struct MainCamera;

pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // 1) Light
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // 2) Ground
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(200.0, 200.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(194, 178, 128),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::default(),
    ));

    // 3) Camera
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(-2.5, 4.5, 9.0).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
        CameraOrbit {
            focus: Vec3::ZERO,
            radius: 12.0,
            yaw: 0.0,
            pitch: 0.6,
        },
    ));

    // 4) Footprint visuals: flat soles, right one tinted so alternation is visible
    let sole = meshes.add(Cuboid::new(0.18, 0.002, 0.32));
    let left = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(90, 70, 50),
        ..default()
    });
    let right = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(70, 55, 40),
        ..default()
    });
    commands.insert_resource(FootprintPrefabs {
        left: FootprintPrefab { mesh: sole.clone(), material: left },
        right: FootprintPrefab { mesh: sole, material: right },
    });
}
