//! Style configuration shared by the renderers.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default body font.
pub const DEFAULT_FONT: &str = "Calibri";

/// Default body font size in points.
pub const DEFAULT_FONT_SIZE: u32 = 12;

/// Largest accepted font size in points.
const MAX_FONT_SIZE: u32 = 400;

/// Visual preferences applied while rendering.
///
/// Built either with the builder methods or from the loose option map a
/// caller attaches to an export request. Unrecognized keys in that map
/// are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Body font family
    pub font: String,

    /// Body font size in points
    pub font_size: u32,

    /// Line spacing multiplier (1.0 = single)
    pub line_spacing: Option<f32>,
}

impl StyleConfig {
    /// Create a style config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the body font.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    /// Set the body font size in points.
    pub fn with_font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the line spacing multiplier.
    pub fn with_line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = Some(spacing);
        self
    }

    /// Build from an option map such as `{"font": "Arial", "font_size": 14}`.
    ///
    /// `null` values fall back to the defaults.
    pub fn from_options(options: &Map<String, Value>) -> Result<Self> {
        let mut style = Self::default();

        match options.get("font") {
            None | Some(Value::Null) => {}
            Some(Value::String(font)) => style.font = font.clone(),
            Some(other) => {
                return Err(Error::InvalidStyle(format!(
                    "font must be a string, got {}",
                    other
                )))
            }
        }

        match options.get("font_size") {
            None | Some(Value::Null) => {}
            Some(value) => style.font_size = whole_number(value, "font_size")?,
        }

        match options.get("line_spacing") {
            None | Some(Value::Null) => {}
            Some(value) => {
                let spacing = value.as_f64().ok_or_else(|| {
                    Error::InvalidStyle(format!("line_spacing must be a number, got {}", value))
                })?;
                style.line_spacing = Some(spacing as f32);
            }
        }

        style.validate()?;
        Ok(style)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.font.trim().is_empty() {
            return Err(Error::InvalidStyle("font must not be empty".into()));
        }
        if self.font_size == 0 || self.font_size > MAX_FONT_SIZE {
            return Err(Error::InvalidStyle(format!(
                "font_size must be between 1 and {}, got {}",
                MAX_FONT_SIZE, self.font_size
            )));
        }
        if let Some(spacing) = self.line_spacing {
            if !spacing.is_finite() || spacing <= 0.0 {
                return Err(Error::InvalidStyle(format!(
                    "line_spacing must be positive, got {}",
                    spacing
                )));
            }
        }
        Ok(())
    }

    /// Font size in half-points, the unit WordprocessingML uses.
    pub fn half_points(&self) -> u32 {
        self.font_size * 2
    }

    /// Line spacing in 240ths of a line, if configured.
    pub fn line_twips(&self) -> Option<u32> {
        self.line_spacing.map(|s| (s * 240.0).round() as u32)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font: DEFAULT_FONT.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            line_spacing: None,
        }
    }
}

fn whole_number(value: &Value, key: &str) -> Result<u32> {
    let invalid = || Error::InvalidStyle(format!("{} must be a whole number, got {}", key, value));

    if let Some(n) = value.as_u64() {
        return u32::try_from(n).map_err(|_| invalid());
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= 0.0 && f <= u32::MAX as f64 => Ok(f as u32),
        _ => Err(invalid()),
    }
}
