// src/unit/mod.rs

// these sub‐modules stay private
mod components;
mod systems;
mod plugin;

// re-export what callers actually need:
pub use components::{MoveTo, Walker};
pub use plugin::UnitPlugin;
