//! Color ramp shading for single band rasters.
//!
//! A [`SingleBandPseudoColorRenderer`] turns the values of one band into
//! colors through a [`RasterShader`], which delegates to a [`ColorRampShader`].

use crate::error::{Error, Result};
use std::{fmt, str::FromStr};

/// RGBA color with values in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black, used for nodata and unmatched values.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.r, self.g, self.b, self.a)
    }
}

/// Parses `R,G,B,A`.
impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidColor {
            value: s.to_string(),
            reason,
        };

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(invalid(format!("expected 4 components, got {}", parts.len())));
        }

        let mut c = [0u8; 4];
        for (slot, part) in c.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|e| invalid(format!("{}: {}", part, e)))?;
        }
        Ok(Self::new(c[0], c[1], c[2], c[3]))
    }
}

/// How a [`ColorRampShader`] maps values between its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorRampType {
    /// Linear blend between neighbouring items.
    #[default]
    Interpolated,
    /// Color of the first item whose value is greater than or equal to the input.
    Discrete,
    /// Only values equal to an item's value get a color. Values match within
    /// an absolute `f64::EPSILON`, which is plain equality for values above 2.
    Exact,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorRampItem {
    pub value: f64,
    pub color: Rgba,
    pub label: String,
}

impl ColorRampItem {
    pub fn new(value: f64, color: Rgba, label: impl Into<String>) -> Self {
        Self {
            value,
            color,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorRampShader {
    items: Vec<ColorRampItem>,
    ramp_type: ColorRampType,
}

impl ColorRampShader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the items, kept sorted by value.
    pub fn set_color_ramp_item_list(&mut self, mut items: Vec<ColorRampItem>) {
        items.sort_by(|a, b| a.value.total_cmp(&b.value));
        self.items = items;
    }

    pub fn color_ramp_item_list(&self) -> &[ColorRampItem] {
        &self.items
    }

    pub fn set_color_ramp_type(&mut self, ramp_type: ColorRampType) {
        self.ramp_type = ramp_type;
    }

    pub fn color_ramp_type(&self) -> ColorRampType {
        self.ramp_type
    }

    /// Color for `value`, `None` when the value is not covered by the ramp.
    pub fn shade(&self, value: f64) -> Option<Rgba> {
        if value.is_nan() {
            return None;
        }
        match self.ramp_type {
            ColorRampType::Exact => self
                .items
                .iter()
                .find(|item| (item.value - value).abs() <= f64::EPSILON)
                .map(|item| item.color),
            ColorRampType::Discrete => self
                .items
                .iter()
                .find(|item| value <= item.value)
                .map(|item| item.color),
            ColorRampType::Interpolated => self.interpolate(value),
        }
    }

    fn interpolate(&self, value: f64) -> Option<Rgba> {
        let first = self.items.first()?;
        let last = self.items.last()?;
        if value <= first.value {
            return Some(first.color);
        }
        if value >= last.value {
            return Some(last.color);
        }

        let upper = self.items.iter().position(|item| item.value >= value)?;
        let (lo, hi) = (&self.items[upper - 1], &self.items[upper]);
        let t = (value - lo.value) / (hi.value - lo.value);
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Some(Rgba::new(
            lerp(lo.color.r, hi.color.r),
            lerp(lo.color.g, hi.color.g),
            lerp(lo.color.b, hi.color.b),
            lerp(lo.color.a, hi.color.a),
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RasterShader {
    function: ColorRampShader,
}

impl RasterShader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_raster_shader_function(&mut self, function: ColorRampShader) {
        self.function = function;
    }

    pub fn raster_shader_function(&self) -> &ColorRampShader {
        &self.function
    }

    pub fn shade(&self, value: f64) -> Option<Rgba> {
        self.function.shade(value)
    }
}

/// Renders one band of a raster through a [`RasterShader`].
#[derive(Debug, Clone, PartialEq)]
pub struct SingleBandPseudoColorRenderer {
    band: usize,
    shader: RasterShader,
}

impl SingleBandPseudoColorRenderer {
    /// band: 1-based band index
    pub fn new(band: usize, shader: RasterShader) -> Self {
        Self { band, shader }
    }

    pub fn band(&self) -> usize {
        self.band
    }

    pub fn shader(&self) -> &RasterShader {
        &self.shader
    }

    pub fn color(&self, value: f64) -> Option<Rgba> {
        self.shader.shade(value)
    }
}

/// Inclusive range of values, a single value when `min == max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterRange {
    pub min: f64,
    pub max: f64,
}

impl RasterRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}
