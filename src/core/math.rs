// Math utilities and helper functions

/// Clamp a value between min and max
///
/// Unlike `f32::clamp` this never panics when `min > max`; `min` wins. A world
/// narrower than the sprite pins the sprite to the left edge instead of aborting.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    let value = if value > max { max } else { value };
    if value < min {
        min
    } else {
        value
    }
}

/// Check if two f32 values are approximately equal
pub fn approx_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Convert a millisecond tick length into seconds
pub fn ms_to_secs(ms: u32) -> f32 {
    ms as f32 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_clamp_inverted_range_prefers_min() {
        assert_eq!(clamp(50.0, 0.0, -16.0), 0.0);
    }

    #[test]
    fn test_approx_equal() {
        assert!(approx_equal(1.0, 1.00001, 0.0001));
        assert!(!approx_equal(1.0, 1.1, 0.01));
    }

    #[test]
    fn test_ms_to_secs() {
        assert_eq!(ms_to_secs(16), 0.016);
        assert_eq!(ms_to_secs(1000), 1.0);
    }
}
