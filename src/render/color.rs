//! 色彩转换
//!
//! 粒子色相由相位推导，饱和度和亮度固定。

use glam::{Vec3, Vec4};

/// 粒子着色的饱和度
pub const PARTICLE_SATURATION: f32 = 1.0;

/// 粒子着色的亮度
pub const PARTICLE_LIGHTNESS: f32 = 0.75;

/// HSL 转 RGB，色相以度为单位，任意实数都会折回 `[0, 360)`
pub fn hsl_to_rgb(hue_degrees: f32, saturation: f32, lightness: f32) -> Vec3 {
    let h = hue_degrees.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = lightness - c * 0.5;

    let (r, g, b) = match h as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}

/// 相位对应的色相（度），未折回
pub fn particle_hue(position: f32) -> f32 {
    position * 4.0 * 360.0
}

/// 相位对应的不透明着色
pub fn particle_tint(position: f32) -> Vec4 {
    hsl_to_rgb(particle_hue(position), PARTICLE_SATURATION, PARTICLE_LIGHTNESS).extend(1.0)
}
