//! Tunable viewer settings.
//!
//! Every field defaults to the values in [`crate::consts`]; hosts can override
//! any subset from JSON, e.g. `{"max_scale": 8, "reset_duration_ms": 250}`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DOUBLE_CLICK_FACTOR, MAX_SCALE, MIN_SCALE, PINCH_MULTIPLIER, RESET_DURATION_MS, WHEEL_LINE_RATE,
    WHEEL_PAGE_RATE, WHEEL_PIXEL_RATE, ZOOM_DURATION_MS, ZOOM_STEP,
};
use crate::transform::ScaleBounds;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`{field}` must be finite and greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("`{field}` must be finite and not negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("min_scale ({min}) must not exceed max_scale ({max})")]
    InvertedBounds { min: f64, max: f64 },
    #[error("`{field}` must be greater than 1, got {value}")]
    StepTooSmall { field: &'static str, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Keyboard zoom multiplier; zoom-out uses its reciprocal.
    pub zoom_step: f64,
    pub double_click_factor: f64,
    pub zoom_duration_ms: f64,
    pub reset_duration_ms: f64,
    pub wheel_pixel_rate: f64,
    pub wheel_line_rate: f64,
    pub wheel_page_rate: f64,
    pub pinch_multiplier: f64,
    /// Grid overlay toggle. Carried for hosts; nothing is drawn for it.
    pub grid_visible: bool,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_step: ZOOM_STEP,
            double_click_factor: DOUBLE_CLICK_FACTOR,
            zoom_duration_ms: ZOOM_DURATION_MS,
            reset_duration_ms: RESET_DURATION_MS,
            wheel_pixel_rate: WHEEL_PIXEL_RATE,
            wheel_line_rate: WHEEL_LINE_RATE,
            wheel_page_rate: WHEEL_PAGE_RATE,
            pinch_multiplier: PINCH_MULTIPLIER,
            grid_visible: false,
        }
    }
}

impl ViewportConfig {
    /// Parse a (possibly partial) JSON object and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the scale range and timings are usable.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("min_scale", self.min_scale)?;
        positive("max_scale", self.max_scale)?;
        if self.min_scale > self.max_scale {
            return Err(ConfigError::InvertedBounds { min: self.min_scale, max: self.max_scale });
        }
        step("zoom_step", self.zoom_step)?;
        step("double_click_factor", self.double_click_factor)?;
        non_negative("zoom_duration_ms", self.zoom_duration_ms)?;
        non_negative("reset_duration_ms", self.reset_duration_ms)?;
        non_negative("wheel_pixel_rate", self.wheel_pixel_rate)?;
        non_negative("wheel_line_rate", self.wheel_line_rate)?;
        non_negative("wheel_page_rate", self.wheel_page_rate)?;
        positive("pinch_multiplier", self.pinch_multiplier)?;
        Ok(())
    }

    #[must_use]
    pub fn bounds(&self) -> ScaleBounds {
        ScaleBounds { min: self.min_scale, max: self.max_scale }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 { Ok(()) } else { Err(ConfigError::NotPositive { field, value }) }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 { Ok(()) } else { Err(ConfigError::Negative { field, value }) }
}

fn step(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 1.0 { Ok(()) } else { Err(ConfigError::StepTooSmall { field, value }) }
}
