/// `round(x * y / 255)` for 8-bit channel math.
pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Round and clamp a float channel value into `0..=255`.
pub(crate) fn clamp_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// Blend `a` toward `b` by `t` (`t = 0` gives `a`, `t = 1` gives `b`, values beyond extrapolate).
pub(crate) fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    let a = f32::from(a);
    let b = f32::from(b);
    clamp_u8(a + (b - a) * t)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
