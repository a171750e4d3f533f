use bevy_ecs::prelude::Component;
use glam::Vec2;

/// World-space position (pivot) of a combatant, popup or effect.
///
/// Action slots read and write this to move actors; the renderer reads it.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        MapPosition {
            pos: Vec2::new(x, y),
        }
    }
}

impl From<Vec2> for MapPosition {
    fn from(pos: Vec2) -> Self {
        MapPosition { pos }
    }
}
