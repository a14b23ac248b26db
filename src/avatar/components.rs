// src/avatar/components.rs
use bevy::prelude::*;
use std::collections::HashMap;

// ---------- Height-based rescale ----------

/// Where the top of the avatar is measured from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleTop {
    /// Whatever entity carries `MainCamera` (the player's head in VR).
    MainCamera,
    Entity(Entity),
}

/// Rescales the avatar uniformly to `(top.y - bottom.y) * multiplier`.
#[derive(Component, Clone, Debug)]
pub struct HeightScaler {
    pub top: ScaleTop,
    pub bottom: Entity,
    pub multiplier: f32,
}

impl HeightScaler {
    pub const DEFAULT_MULTIPLIER: f32 = 0.666;

    pub fn new(top: ScaleTop, bottom: Entity) -> Self {
        Self { top, bottom, multiplier: Self::DEFAULT_MULTIPLIER }
    }

    pub fn with_multiplier(mut self, multiplier: f32) -> Self {
        self.multiplier = multiplier;
        self
    }
}

/// Uniform scale for a measured height.
#[inline]
pub fn scale_for_height(top_y: f32, bottom_y: f32, multiplier: f32) -> f32 {
    (top_y - bottom_y) * multiplier
}

/// Rescale one avatar (`Some`) or every `HeightScaler` (`None`).
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RescaleAvatar {
    pub avatar: Option<Entity>,
}

/// Debug key that fires `RescaleAvatar { avatar: None }`.
#[derive(Resource, Clone, Copy, Debug)]
pub struct AvatarKeys {
    pub rescale: KeyCode,
}

impl Default for AvatarKeys {
    fn default() -> Self {
        Self { rescale: KeyCode::KeyS }
    }
}

// ---------- Animation parameters ----------

/// Named integer parameters read by the animation graph.
#[derive(Component, Default, Debug)]
pub struct AnimatorParameters {
    ints: HashMap<String, i32>,
}

impl AnimatorParameters {
    pub fn set_int(&mut self, name: &str, value: i32) {
        if let Some(v) = self.ints.get_mut(name) {
            *v = value;
        } else {
            self.ints.insert(name.to_string(), value);
        }
    }

    pub fn int(&self, name: &str) -> i32 {
        *self.ints.get(name).unwrap_or(&0)
    }
}

/// While `key` is held, sets `parameter` to `value`. Never resets it.
#[derive(Component, Clone, Debug)]
#[require(AnimatorParameters)]
pub struct ParameterOnKey {
    pub key: KeyCode,
    pub parameter: String,
    pub value: i32,
}

impl ParameterOnKey {
    /// The plank's "Extend" trigger.
    pub fn extend(key: KeyCode) -> Self {
        Self { key, parameter: "Extend".to_string(), value: 1 }
    }
}

// ---------- Collider follow ----------

/// Axis-aligned box in the entity's local space.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct BoxCollider {
    pub center: Vec3,
    pub size: Vec3,
}

impl Default for BoxCollider {
    fn default() -> Self {
        Self { center: Vec3::ZERO, size: Vec3::ONE }
    }
}

/// Keeps the collider under the (VR) camera at a fixed height.
#[derive(Component, Clone, Copy, Debug)]
#[require(BoxCollider)]
pub struct ColliderFollow {
    pub camera: Entity,
    pub y: f32,
    /// Teleports the entity back to the world origin.
    pub reset_key: KeyCode,
}

impl ColliderFollow {
    pub fn new(camera: Entity) -> Self {
        Self { camera, y: 0.1, reset_key: KeyCode::KeyR }
    }
}
