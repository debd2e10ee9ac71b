use egui::Color32;

/// User requests emitted by the control panel and keyboard shortcuts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Undo,
    Redo,
    /// Draw with this color from now on, leaving erase mode
    SelectColor(Color32),
    /// Paint with the background color using the eraser width
    SelectEraser,
    SetBrushSize(f32),
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Undo => "Undo",
            Intent::Redo => "Redo",
            Intent::SelectColor(_) => "Select Color",
            Intent::SelectEraser => "Select Eraser",
            Intent::SetBrushSize(_) => "Set Brush Size",
        }
    }
}
