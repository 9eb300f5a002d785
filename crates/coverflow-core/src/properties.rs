// crates/coverflow-core/src/properties.rs
use std::collections::HashMap;

use tracing::warn;

use crate::{CoverFlowConfig, CoverFlowError, Gravity, LayoutMode, Result, ScaleFalloff};

pub const PROP_VISIBLE_ITEM: &str = "visible_item";
pub const PROP_REFLECTION_HEIGHT: &str = "reflection_height";
pub const PROP_REFLECTION_GAP: &str = "reflection_gap";
pub const PROP_GRAVITY: &str = "gravity";
pub const PROP_LAYOUT_MODE: &str = "layout_mode";
pub const PROP_LOWEST_ALPHA: &str = "lowest_alpha";
pub const PROP_MIN_SCALE: &str = "min_scale";
pub const PROP_SCALE_FALLOFF: &str = "scale_falloff";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionUnit {
    Pixels,
    /// Density-independent pixels, multiplied by the display density.
    Dp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    Int(i32),
    Float(f32),
    Percentage(f32), // 0-100 range, e.g., 30.0 for 30%
    Dimension(f32, DimensionUnit),
}

impl PropertyValue {
    /// Parse a declarative value such as `"5"`, `"0.6"`, `"30%"`, `"10dp"`,
    /// `"12px"` or `"center"`. Anything that is not numeric stays a string.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();

        if let Some(pct) = value.strip_suffix('%') {
            if let Ok(pct) = pct.trim().parse::<f32>() {
                return PropertyValue::Percentage(pct);
            }
        }

        for (suffix, unit) in [("dp", DimensionUnit::Dp), ("dip", DimensionUnit::Dp), ("px", DimensionUnit::Pixels)] {
            if let Some(number) = value.strip_suffix(suffix) {
                if let Ok(number) = number.trim().parse::<f32>() {
                    return PropertyValue::Dimension(number, unit);
                }
            }
        }

        if let Ok(int) = value.parse::<i32>() {
            return PropertyValue::Int(int);
        }

        if let Ok(float) = value.parse::<f32>() {
            return PropertyValue::Float(float);
        }

        PropertyValue::String(value.to_string())
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            PropertyValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            PropertyValue::Int(i) => Some(*i as f32),
            _ => None,
        }
    }

    /// Fraction in 0.0..=1.0 terms. Plain numbers are read as fractions.
    pub fn as_fraction(&self) -> Option<f32> {
        match self {
            PropertyValue::Percentage(p) => Some(p / 100.0),
            PropertyValue::Float(f) => Some(*f),
            PropertyValue::Int(i) => Some(*i as f32),
            _ => None,
        }
    }

    /// Resolve a dimension to pixels. Unitless numbers are pixels.
    pub fn as_pixels(&self, density: f32) -> Option<f32> {
        match self {
            PropertyValue::Dimension(value, DimensionUnit::Pixels) => Some(*value),
            PropertyValue::Dimension(value, DimensionUnit::Dp) => Some(value * density),
            PropertyValue::Float(f) => Some(*f),
            PropertyValue::Int(i) => Some(*i as f32),
            _ => None,
        }
    }
}

impl CoverFlowConfig {
    /// Build a configuration from named declarative properties.
    ///
    /// Missing keys keep their defaults, unknown keys are logged and
    /// skipped, and a present key with an unusable value is an error.
    pub fn from_properties(properties: &HashMap<String, PropertyValue>, density: f32) -> Result<Self> {
        let mut config = CoverFlowConfig::with_density(density);

        // lowest_alpha before visible_item so the derived step sees both.
        if let Some(value) = properties.get(PROP_LOWEST_ALPHA) {
            let alpha = value
                .as_int()
                .and_then(|a| u8::try_from(a).ok())
                .ok_or_else(|| invalid(PROP_LOWEST_ALPHA, value, "expected an integer in 0..=255"))?;
            config.set_lowest_alpha(alpha);
        }

        if let Some(value) = properties.get(PROP_VISIBLE_ITEM) {
            let count = value
                .as_int()
                .and_then(|c| usize::try_from(c).ok())
                .ok_or_else(|| invalid(PROP_VISIBLE_ITEM, value, "expected a positive integer"))?;
            config.set_visible_item_count(count)?;
        }

        if let Some(value) = properties.get(PROP_REFLECTION_HEIGHT) {
            let fraction = value
                .as_fraction()
                .ok_or_else(|| invalid(PROP_REFLECTION_HEIGHT, value, "expected a percentage"))?;
            config.set_reflection_height_fraction(fraction)?;
        }

        if let Some(value) = properties.get(PROP_REFLECTION_GAP) {
            let gap = value
                .as_pixels(density)
                .ok_or_else(|| invalid(PROP_REFLECTION_GAP, value, "expected a dimension"))?;
            config.set_reflection_gap(gap)?;
        }

        if let Some(value) = properties.get(PROP_GRAVITY) {
            let gravity = value
                .as_string()
                .and_then(Gravity::from_name)
                .ok_or_else(|| invalid(PROP_GRAVITY, value, "expected top, bottom or center"))?;
            config.set_gravity(gravity);
        }

        if let Some(value) = properties.get(PROP_LAYOUT_MODE) {
            let mode = value
                .as_string()
                .and_then(LayoutMode::from_name)
                .ok_or_else(|| invalid(PROP_LAYOUT_MODE, value, "expected match_parent or wrap_content"))?;
            config.set_layout_mode(mode);
        }

        if let Some(value) = properties.get(PROP_MIN_SCALE) {
            let scale = value
                .as_fraction()
                .ok_or_else(|| invalid(PROP_MIN_SCALE, value, "expected a number"))?;
            config.set_min_scale(scale)?;
        }

        if let Some(value) = properties.get(PROP_SCALE_FALLOFF) {
            let falloff = match value.as_string() {
                Some("linear") => ScaleFalloff::Linear,
                Some("ease_out") => ScaleFalloff::EaseOut,
                _ => return Err(invalid(PROP_SCALE_FALLOFF, value, "expected linear or ease_out")),
            };
            config.set_scale_falloff(falloff);
        }

        for key in properties.keys() {
            if !KNOWN_PROPERTIES.contains(&key.as_str()) {
                warn!("Ignoring unknown cover flow property '{}'", key);
            }
        }

        Ok(config)
    }
}

const KNOWN_PROPERTIES: &[&str] = &[
    PROP_VISIBLE_ITEM,
    PROP_REFLECTION_HEIGHT,
    PROP_REFLECTION_GAP,
    PROP_GRAVITY,
    PROP_LAYOUT_MODE,
    PROP_LOWEST_ALPHA,
    PROP_MIN_SCALE,
    PROP_SCALE_FALLOFF,
];

fn invalid(key: &str, value: &PropertyValue, reason: &str) -> CoverFlowError {
    CoverFlowError::InvalidProperty {
        key: key.to_string(),
        reason: format!("{} (got {:?})", reason, value),
    }
}
