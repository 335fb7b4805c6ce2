//! Safe casting utilities for landmark to pixel conversion

/// Clamp and convert f64 to u32 for pixel coordinates, truncating toward zero
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Clamping ensures safe truncation
#[allow(clippy::cast_sign_loss)] // Clamped to a non-negative range
pub fn f64_to_u32_clamp(value: f64, min: u32, max: u32) -> u32 {
    // Ensure min <= max
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    if !value.is_finite() {
        return min;
    }

    let clamped = value.clamp(f64::from(min), f64::from(max));

    // Ensure result is within bounds after conversion
    let result = clamped as u32;
    result.clamp(min, max)
}

/// Convert a normalized coordinate to a pixel index along an axis of `extent` pixels
///
/// Truncates toward zero like an integer cast and clamps to `[0, extent]`.
#[must_use]
pub fn normalized_to_pixel(value: f32, extent: u32) -> u32 {
    f64_to_u32_clamp(f64::from(value) * f64::from(extent), 0, extent)
}
