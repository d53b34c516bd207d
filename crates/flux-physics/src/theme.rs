//! Color themes
//!
//! Each theme spreads a hue gradient across the particle index range at fixed
//! saturation and lightness.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    /// Neon cyan to pink
    #[default]
    Cyber,
    /// Red to orange
    Sunset,
    /// Forest green to ocean
    Nature,
}

/// Hue range and fixed saturation/lightness of a theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemePalette {
    pub hue_start: f32,
    pub hue_span: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 3] = [ColorTheme::Cyber, ColorTheme::Sunset, ColorTheme::Nature];

    pub fn palette(self) -> ThemePalette {
        match self {
            ColorTheme::Cyber => ThemePalette {
                hue_start: 0.5,
                hue_span: 0.25,
                saturation: 1.0,
                lightness: 0.65,
            },
            ColorTheme::Sunset => ThemePalette {
                hue_start: 0.0,
                hue_span: 0.12,
                saturation: 1.0,
                lightness: 0.6,
            },
            ColorTheme::Nature => ThemePalette {
                hue_start: 0.3,
                hue_span: 0.3,
                saturation: 0.8,
                lightness: 0.55,
            },
        }
    }

    /// RGB color for a position `factor` in [0, 1) along the gradient
    pub fn color(self, factor: f32) -> [f32; 3] {
        let p = self.palette();
        hsl_to_rgb(p.hue_start + factor * p.hue_span, p.saturation, p.lightness)
    }

    /// Color of particle `index` out of `count`
    pub fn particle_color(self, index: usize, count: usize) -> [f32; 3] {
        let factor = if count == 0 {
            0.0
        } else {
            index as f32 / count as f32
        };
        self.color(factor)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorTheme::Cyber => "cyber",
            ColorTheme::Sunset => "sunset",
            ColorTheme::Nature => "nature",
        }
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown theme name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown color theme '{}' (expected cyber, sunset or nature)",
            self.0
        )
    }
}

impl std::error::Error for UnknownTheme {}

impl FromStr for ColorTheme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorTheme::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

/// HSL to RGB, all components in [0, 1]. Hue wraps.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let h = hue.rem_euclid(1.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l];
    }

    let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let q = 2.0 * l - p;

    [
        hue_to_channel(q, p, h + 1.0 / 3.0),
        hue_to_channel(q, p, h),
        hue_to_channel(q, p, h - 1.0 / 3.0),
    ]
}

fn hue_to_channel(q: f32, p: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        q + (p - q) * 6.0 * t
    } else if t < 0.5 {
        p
    } else if t < 2.0 / 3.0 {
        q + (p - q) * 6.0 * (2.0 / 3.0 - t)
    } else {
        q
    }
}
