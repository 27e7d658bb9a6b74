//! Autocorrect status LED.
//!
//! One LED shows the enabled flag: `enabled_hsv` while autocorrect is on,
//! `disabled_hsv` while it is off. Value is scaled by the global matrix
//! brightness so the indicator never outshines the rest of the board.

use keyfix_core::settings::IndicatorSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Host primitive for setting one LED.
pub trait LedSink {
    fn set_color(&mut self, index: u8, rgb: Rgb);
}

/// Integer HSV to RGB with 8-bit hue, as keyboard firmware does it.
pub fn hsv_to_rgb(h: u8, s: u8, v: u8) -> Rgb {
    if s == 0 {
        return Rgb { r: v, g: v, b: v };
    }
    let (h, s, v) = (h as u32, s as u32, v as u32);
    let region = h * 6 / 255;
    let remainder = (h * 2 - region * 85) * 3;

    let p = ((v * (255 - s)) >> 8) as u8;
    let q = ((v * (255 - ((s * remainder) >> 8))) >> 8) as u8;
    let t = ((v * (255 - ((s * (255 - remainder)) >> 8))) >> 8) as u8;
    let v = v as u8;

    let (r, g, b) = match region {
        0 | 6 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb { r, g, b }
}

/// Color of the indicator for the given state and global brightness.
pub fn indicator_color(settings: &IndicatorSettings, enabled: bool, brightness: u8) -> Rgb {
    let [h, s, v] = if enabled {
        settings.enabled_hsv
    } else {
        settings.disabled_hsv
    };
    let v = (v as u16 * brightness as u16 / 255) as u8;
    hsv_to_rgb(h, s, v)
}
