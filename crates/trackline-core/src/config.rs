use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Colour from hue in degrees, saturation and value in `[0, 1]`.
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = value * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = value - c;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgb(to_u8(r), to_u8(g), to_u8(b))
    }
}

/// Layout and rendering options. None of these touch model data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub track_height: f32,
    pub track_border_size: f32,
    pub track_spacing: f32,
    pub track_label_width: f32,
    pub background_color: Rgba,
    /// Grid line transparency, 0-255.
    pub grid_alpha: u8,
    pub playhead_width: f32,
    pub playhead_height: f32,
    pub scrollbar_width: f32,
    pub scrollbar_height: f32,
    /// Pointer travel in pixels before a press becomes a drag.
    pub drag_threshold: f32,
    /// Distance in pixels within which a point counts as on an edge.
    pub edge_tolerance: f32,
    pub min_scale: f32,
    pub wheel_zoom_divisor: f32,
    pub wheel_scroll_divisor: f32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            track_height: 20.0,
            track_border_size: 2.0,
            track_spacing: 1.0,
            track_label_width: 100.0,
            background_color: Rgba::BLACK,
            grid_alpha: 40,
            playhead_width: 5.0,
            playhead_height: 16.0,
            scrollbar_width: 16.0,
            scrollbar_height: 16.0,
            drag_threshold: 3.0,
            edge_tolerance: 3.0,
            min_scale: 0.01,
            wheel_zoom_divisor: 1200.0,
            wheel_scroll_divisor: 10.0,
        }
    }
}

impl TimelineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
