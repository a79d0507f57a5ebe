//! Colours are straight-alpha RGBA in `[0, 1]`, stored as `Vec4`.

use glam::Vec4;

use crate::{Error, Result};

pub const WHITE: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);

pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Vec4 {
    Vec4::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a)
}

/// CSS-style HSL: hue in degrees (any value, wrapped), saturation and
/// lightness in percent, alpha in `[0, 1]`.
pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Vec4 {
    let h = hue.rem_euclid(360.0) / 360.0;
    let s = (saturation / 100.0).clamp(0.0, 1.0);
    let l = (lightness / 100.0).clamp(0.0, 1.0);
    if s == 0.0 {
        return Vec4::new(l, l, l, alpha);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Vec4::new(
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
        alpha,
    )
}

pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Vec4 {
    hsla(hue, saturation, lightness, 1.0)
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Parses `#rrggbb` or `#rrggbbaa`.
pub fn parse_hex(text: &str) -> Result<Vec4> {
    let digits = text
        .strip_prefix('#')
        .ok_or_else(|| Error::Invalid(format!("colour `{text}` must start with '#'")))?;
    if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
        return Err(Error::Invalid(format!("colour `{text}` must be #rrggbb or #rrggbbaa")));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|_| Error::Invalid(format!("colour `{text}` has a non-hex digit")))
    };
    let alpha = if digits.len() == 8 { channel(6)? as f32 / 255.0 } else { 1.0 };
    Ok(rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
}

pub fn with_alpha(color: Vec4, alpha: f32) -> Vec4 {
    Vec4::new(color.x, color.y, color.z, alpha)
}
