// src/avatar/mod.rs

pub mod components;
mod plugin;
mod systems;

pub use components::{
    scale_for_height, AnimatorParameters, AvatarKeys, BoxCollider, ColliderFollow, HeightScaler,
    ParameterOnKey, RescaleAvatar, ScaleTop,
};
pub use plugin::AvatarPlugin;
