//! Procedural footprint trails and small avatar helpers for Bevy characters.

pub mod actions;
pub mod avatar;
pub mod footprint;
pub mod input;
pub mod setup;
pub mod unit;

pub use avatar::AvatarPlugin;
pub use footprint::FootprintPlugin;
pub use unit::UnitPlugin;
