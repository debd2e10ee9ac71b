use egui::Color32;

use crate::config::PaintConfig;
use crate::error::StyleError;

/// Current brush color, size and erase mode that new strokes are tagged with
#[derive(Debug, Clone, PartialEq)]
pub struct StyleChannel {
    color: Color32,
    brush_size: f32,
    erasing: bool,

    // Fixed at construction
    default_brush_size: f32,
    eraser_size: f32,
    background: Color32,
}

impl StyleChannel {
    pub fn new(config: &PaintConfig) -> Self {
        Self {
            color: config.default_color.to_color32(),
            brush_size: config.default_brush_size,
            erasing: false,
            default_brush_size: config.default_brush_size,
            eraser_size: config.eraser_size,
            background: config.background.to_color32(),
        }
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    pub fn is_erasing(&self) -> bool {
        self.erasing
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    /// Select a drawing color, leaving erase mode if it was active
    pub fn set_color(&mut self, color: Color32) {
        if self.erasing {
            self.erasing = false;
            self.brush_size = self.default_brush_size;
        }
        self.color = color;
    }

    pub fn set_brush_size(&mut self, size: f32) -> Result<(), StyleError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(StyleError::InvalidBrushSize(size));
        }
        self.brush_size = size;
        Ok(())
    }

    /// Paint with the background color using the wide eraser brush.
    ///
    /// Erasing never removes ink, later strokes simply cover it.
    pub fn enter_erase_mode(&mut self) {
        self.color = self.background;
        self.brush_size = self.eraser_size;
        self.erasing = true;
    }
}

impl Default for StyleChannel {
    fn default() -> Self {
        Self::new(&PaintConfig::default())
    }
}
