use std::fs;
use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV_VAR: &str = "FREEHAND_PAINT_CONFIG";

pub type ConfigResult<T> = Result<T, ConfigError>;

/// An opaque RGB color as stored in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn to_color32(self) -> Color32 {
        let [r, g, b] = self.0;
        Color32::from_rgb(r, g, b)
    }
}

/// A named palette entry offered by the control panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    pub name: String,
    pub color: Rgb,
}

impl Swatch {
    fn new(name: &str, color: Rgb) -> Self {
        Self {
            name: name.to_string(),
            color,
        }
    }
}

/// Easing curves applied to stroke radius and tapers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseOutQuad,
    EaseOutCubic,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseOutQuad => t * (2.0 - t),
            Easing::EaseOutCubic => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
        }
    }
}

/// How one end of a stroke is finished
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeEnd {
    /// Round cap when true, flat cap otherwise
    pub cap: bool,
    /// Length over which the stroke narrows; 0 disables tapering
    pub taper: f32,
    pub easing: Easing,
}

impl StrokeEnd {
    pub fn start() -> Self {
        Self {
            cap: true,
            taper: 0.0,
            easing: Easing::EaseOutQuad,
        }
    }

    pub fn end() -> Self {
        Self {
            cap: true,
            taper: 0.0,
            easing: Easing::EaseOutCubic,
        }
    }
}

impl Default for StrokeEnd {
    fn default() -> Self {
        Self::start()
    }
}

/// Shape parameters for the freehand outline generator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeOptions {
    /// How strongly pressure affects the stroke width
    pub thinning: f32,
    /// Minimum spacing between outline points, relative to the size
    pub smoothing: f32,
    /// How strongly new samples are pulled toward the previous point
    pub streamline: f32,
    /// Derive pressure from pointer speed instead of the device
    pub simulate_pressure: bool,
    pub easing: Easing,
    pub start: StrokeEnd,
    pub end: StrokeEnd,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self {
            thinning: 0.5,
            smoothing: 0.5,
            streamline: 0.5,
            simulate_pressure: true,
            easing: Easing::Linear,
            start: StrokeEnd::start(),
            end: StrokeEnd::end(),
        }
    }
}

/// Range offered by the brush size slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Default for SizeRange {
    fn default() -> Self {
        Self {
            min: 2.0,
            max: 20.0,
            step: 2.0,
        }
    }
}

/// Application-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to the defaults below
pub struct PaintConfig {
    /// Canvas background, also the color the eraser paints with
    pub background: Rgb,
    pub palette: Vec<Swatch>,
    pub default_color: Rgb,
    pub default_brush_size: f32,
    pub eraser_size: f32,
    pub brush_size_range: SizeRange,
    pub stroke: StrokeOptions,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            background: Rgb::new(16, 18, 20),
            palette: vec![
                Swatch::new("white", Rgb::new(255, 255, 255)),
                Swatch::new("firebrick", Rgb::new(178, 34, 34)),
                Swatch::new("dodgerblue", Rgb::new(30, 144, 255)),
                Swatch::new("green", Rgb::new(0, 128, 0)),
                Swatch::new("yellow", Rgb::new(255, 255, 0)),
                Swatch::new("hotpink", Rgb::new(255, 105, 180)),
                Swatch::new("darkviolet", Rgb::new(148, 0, 211)),
            ],
            default_color: Rgb::new(255, 255, 255),
            default_brush_size: 8.0,
            eraser_size: 25.0,
            brush_size_range: SizeRange::default(),
            stroke: StrokeOptions::default(),
        }
    }
}

impl PaintConfig {
    /// Parse and validate a config from JSON text
    pub fn from_json(text: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Load the file named by [`CONFIG_ENV_VAR`], or the defaults when unset
    pub fn from_env() -> ConfigResult<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                log::info!("Loading config from {}", path.to_string_lossy());
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let positive = |name: &str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue(format!("{name} must be positive, got {value}")))
            }
        };

        positive("default_brush_size", self.default_brush_size)?;
        positive("eraser_size", self.eraser_size)?;
        positive("brush_size_range.min", self.brush_size_range.min)?;
        positive("brush_size_range.step", self.brush_size_range.step)?;

        if self.brush_size_range.max < self.brush_size_range.min {
            return Err(ConfigError::InvalidValue(format!(
                "brush_size_range is empty: {} > {}",
                self.brush_size_range.min, self.brush_size_range.max
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PaintConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.palette.len(), 7);
        assert_eq!(config.background.to_color32(), Color32::from_rgb(16, 18, 20));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = PaintConfig::from_json(r#"{ "eraser_size": 40.0 }"#).unwrap();
        assert_eq!(config.eraser_size, 40.0);
        assert_eq!(config.default_brush_size, 8.0);
        assert_eq!(config.stroke, StrokeOptions::default());
    }

    #[test]
    fn test_stroke_options_from_json() {
        let config = PaintConfig::from_json(
            r#"{ "stroke": { "thinning": 0.0, "easing": "ease_out_cubic" } }"#,
        )
        .unwrap();
        assert_eq!(config.stroke.thinning, 0.0);
        assert_eq!(config.stroke.easing, Easing::EaseOutCubic);
        assert_eq!(config.stroke.smoothing, 0.5);
    }

    #[test]
    fn test_invalid_sizes_rejected() {
        let result = PaintConfig::from_json(r#"{ "default_brush_size": 0.0 }"#);
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));

        let result = PaintConfig::from_json(
            r#"{ "brush_size_range": { "min": 10.0, "max": 2.0, "step": 1.0 } }"#,
        );
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_malformed_json() {
        let result = PaintConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseOutQuad, Easing::EaseOutCubic] {
            assert!((easing.apply(0.0)).abs() < 1e-6);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
        }
        assert!((Easing::EaseOutQuad.apply(0.5) - 0.75).abs() < 1e-6);
    }
}
