use thiserror::Error;

/// Errors raised while loading or validating the paint configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// Errors raised by the style channel
#[derive(Debug, Error, PartialEq)]
pub enum StyleError {
    /// Brush sizes must be finite and strictly positive
    #[error("Invalid brush size: {0}")]
    InvalidBrushSize(f32),
}

/// Errors that can occur during stroke session state transitions
#[derive(Debug, Error, PartialEq)]
pub enum TransitionError {
    /// Another pointer already owns the capture
    #[error("Pointer {requested} cannot start a stroke while pointer {active} is capturing")]
    PointerBusy { active: u64, requested: u64 },
}

/// Errors that can occur while turning a path into a paintable mesh
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to tessellate stroke path: {0:?}")]
    Tessellation(lyon::tessellation::TessellationError),
}

impl From<lyon::tessellation::TessellationError> for RenderError {
    fn from(error: lyon::tessellation::TessellationError) -> Self {
        RenderError::Tessellation(error)
    }
}
