use egui::{Color32, Pos2};
use uuid::Uuid;

use crate::smoother::SmoothPath;

/// One observed pointer position while a stroke is being drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f32,
    pub y: f32,
    /// Pressure in `[0, 1]`
    pub pressure: f32,
}

impl Sample {
    pub fn new(x: f32, y: f32, pressure: f32) -> Self {
        Self {
            x,
            y,
            pressure: pressure.clamp(0.0, 1.0),
        }
    }

    pub fn pos(&self) -> Pos2 {
        Pos2::new(self.x, self.y)
    }
}

/// Unique identity of a committed stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrokeId(Uuid);

impl StrokeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StrokeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StrokeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Immutable committed stroke
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: StrokeId,
    path: SmoothPath,
    color: Color32,
}

impl Stroke {
    pub fn new(path: SmoothPath, color: Color32) -> Self {
        Self {
            id: StrokeId::new(),
            path,
            color,
        }
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn path(&self) -> &SmoothPath {
        &self.path
    }

    pub fn color(&self) -> Color32 {
        self.color
    }
}
