//! ARGB8888 color helpers.
//!
//! Colors are `u32` values laid out as `0xAARRGGBB`.

pub const BACKGROUND: u32 = 0xFF000000;
pub const GRID: u32 = 0x77333333;
pub const WIREFRAME: u32 = 0xFFFFFFFF;
pub const LILAC: u32 = 0xFFC8A2C8;
pub const RED: u32 = 0xFFFF0000;
pub const BLUE: u32 = 0xFF0000FF;

#[inline]
pub const fn pack(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Splits a color into `(a, r, g, b)`.
#[inline]
pub const fn unpack(color: u32) -> (u8, u8, u8, u8) {
    (
        (color >> 24) as u8,
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
    )
}

/// Builds an opaque color from texel bytes stored blue, green, red.
#[inline]
pub const fn opaque_from_bgr(b: u8, g: u8, r: u8) -> u32 {
    pack(0xFF, r, g, b)
}

/// Scales the RGB channels by `percent`, rounding to nearest. Alpha is kept.
pub fn scale(color: u32, percent: f32) -> u32 {
    let (a, r, g, b) = unpack(color);
    let channel = |c: u8| (c as f32 * percent + 0.5).clamp(0.0, 255.0) as u8;
    pack(a, channel(r), channel(g), channel(b))
}

/// Blends `src` over `dst` using the alpha of `src`. The result is opaque.
pub fn blend_over(dst: u32, src: u32) -> u32 {
    let (alpha, sr, sg, sb) = unpack(src);
    let (_, dr, dg, db) = unpack(dst);
    let alpha = alpha as f32 / 255.0;
    let mix = |d: u8, s: u8| ((1.0 - alpha) * d as f32 + alpha * s as f32) as u8;
    pack(0xFF, mix(dr, sr), mix(dg, sg), mix(db, sb))
}
