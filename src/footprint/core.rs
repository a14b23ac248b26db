// src/footprint/core.rs
//! Footprint placement policy: distance trigger, left/right alternation and a
//! bounded history of placed markers.
//! Engine-agnostic apart from glam types; marker spawning goes through `MarkerRenderer`.

use std::collections::VecDeque;

use bevy::prelude::*; // Vec3, Quat, Transform

use super::config::{FootprintConfigError, FootprintSettings};

// ---------- Pose & records ----------

/// Which marker variant a footprint uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
    /// Alternation disabled; rendered with the left variant.
    Single,
}

impl Handedness {
    pub fn flipped(self) -> Self {
        match self {
            Handedness::Left => Handedness::Right,
            Handedness::Right => Handedness::Left,
            Handedness::Single => Handedness::Single,
        }
    }
}

/// Where and how a footprint sits in the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FootprintPose {
    /// Ground-projected position (y = configured ground height).
    pub position: Vec3,
    /// Horizontal unit vector the marker faces.
    pub facing: Vec3,
    pub handedness: Handedness,
}

impl FootprintPose {
    /// Yaw that turns +Z onto `facing`, world up preserved.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.facing.x.atan2(self.facing.z))
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.rotation())
    }
}

/// One placed footprint plus the renderer handle of its marker.
#[derive(Debug)]
pub struct FootprintRecord<H> {
    pub pose: FootprintPose,
    pub handle: H,
}

// ---------- Collaborators ----------

/// Spawns/destroys the visual side of a footprint.
/// `destroy` takes the handle by value: a handle can only be destroyed once.
pub trait MarkerRenderer {
    type Handle;

    fn spawn(&mut self, pose: &FootprintPose) -> Self::Handle;
    fn destroy(&mut self, handle: Self::Handle);
    fn set_visible(&mut self, handle: &Self::Handle, visible: bool);
}

/// Synchronous placement callback (footstep sounds etc).
pub type PlacementListener = Box<dyn FnMut(&FootprintPose) + Send + Sync>;

// ---------- Placer ----------

pub struct FootprintPlacer<H> {
    settings: FootprintSettings,
    last_placed: Vec3,
    has_placed: bool,
    last_facing: Option<Vec3>,
    next_handedness: Handedness,
    history: VecDeque<FootprintRecord<H>>,
    listeners: Vec<PlacementListener>,
}

impl<H> FootprintPlacer<H> {
    pub const START_SIDE: Handedness = Handedness::Left;

    pub fn new(settings: FootprintSettings) -> Result<Self, FootprintConfigError> {
        settings.validate()?;
        Ok(Self {
            last_placed: Vec3::ZERO,
            has_placed: false,
            last_facing: None,
            next_handedness: Self::START_SIDE,
            history: VecDeque::new(),
            listeners: Vec::new(),
            settings,
        })
    }

    pub fn settings(&self) -> &FootprintSettings {
        &self.settings
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.settings.enabled = enabled;
    }

    /// Registered listeners run in registration order on every placement.
    pub fn subscribe(&mut self, listener: impl FnMut(&FootprintPose) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Oldest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &FootprintRecord<H>> + '_ {
        self.history.iter()
    }

    pub fn latest(&self) -> Option<&FootprintRecord<H>> {
        self.history.back()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn has_placed(&self) -> bool {
        self.has_placed
    }

    pub fn last_placed_position(&self) -> Vec3 {
        self.last_placed
    }

    /// One placement decision for `tick`. Returns the new pose if a footprint was placed.
    pub fn evaluate<R>(&mut self, current: Vec3, tick: u64, renderer: &mut R) -> Option<FootprintPose>
    where
        R: MarkerRenderer<Handle = H>,
    {
        if !self.settings.enabled || tick % u64::from(self.settings.evaluation_interval) != 0 {
            return None;
        }

        let delta = current - self.last_placed;
        let delta_xz = Vec2::new(delta.x, delta.z);
        if delta_xz.length() < self.settings.min_distance {
            return None;
        }

        let facing = Vec3::new(delta.x, 0.0, delta.z)
            .try_normalize()
            .or(self.last_facing)
            .unwrap_or(Vec3::Z);

        let handedness = if self.settings.alternate_handedness {
            let side = self.next_handedness;
            self.next_handedness = side.flipped();
            side
        } else {
            Handedness::Single
        };

        let pose = FootprintPose {
            position: Vec3::new(current.x, self.settings.ground_height, current.z),
            facing,
            handedness,
        };

        while self.history.len() >= self.settings.max_history {
            self.evict_oldest(renderer);
        }
        let handle = renderer.spawn(&pose);
        self.history.push_back(FootprintRecord { pose, handle });

        self.last_placed = pose.position;
        self.last_facing = Some(facing);
        self.has_placed = true;

        for listener in self.listeners.iter_mut() {
            listener(&pose);
        }
        Some(pose)
    }

    /// Destroys every marker and forgets the last position. Safe to repeat.
    pub fn clear<R>(&mut self, renderer: &mut R)
    where
        R: MarkerRenderer<Handle = H>,
    {
        for record in self.history.drain(..) {
            renderer.destroy(record.handle);
        }
        self.last_placed = Vec3::ZERO;
        self.has_placed = false;
    }

    /// Shows or hides every held marker; history is untouched.
    pub fn set_visibility<R>(&self, visible: bool, renderer: &mut R)
    where
        R: MarkerRenderer<Handle = H>,
    {
        for record in &self.history {
            renderer.set_visible(&record.handle, visible);
        }
    }

    /// Swap settings at runtime. Invalid settings leave the placer untouched.
    pub fn reconfigure<R>(
        &mut self,
        settings: FootprintSettings,
        renderer: &mut R,
    ) -> Result<(), FootprintConfigError>
    where
        R: MarkerRenderer<Handle = H>,
    {
        settings.validate()?;
        if settings.alternate_handedness && !self.settings.alternate_handedness {
            self.next_handedness = Self::START_SIDE;
        }
        self.settings = settings;
        while self.history.len() > self.settings.max_history {
            self.evict_oldest(renderer);
        }
        Ok(())
    }

    fn evict_oldest<R>(&mut self, renderer: &mut R)
    where
        R: MarkerRenderer<Handle = H>,
    {
        if let Some(old) = self.history.pop_front() {
            renderer.destroy(old.handle);
        }
    }
}
