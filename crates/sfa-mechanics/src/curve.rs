//! The experience curve.

/// Highest level the curve is defined for.
///
/// `1.2` has no exact `f64` form, so each threshold is the floor of a
/// rounded product. The floors match hand-computed values for the early
/// levels and stay far inside `u64` up to this cap.
pub const MAX_LEVEL: u32 = 150;

/// XP required to advance from `level` to `level + 1`.
///
/// `floor(100 * 1.2^(level - 1))`. Level 0 is treated as level 1.
pub fn threshold_for(level: u32) -> u64 {
    let exponent = level.max(1) - 1;
    (100.0 * 1.2f64.powf(f64::from(exponent))).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_thresholds() {
        let expected = [100, 120, 144, 172, 207, 248, 298, 358, 429, 515];
        for (i, want) in expected.iter().enumerate() {
            assert_eq!(threshold_for(i as u32 + 1), *want, "level {}", i + 1);
        }
    }

    #[test]
    fn level_zero_is_level_one() {
        assert_eq!(threshold_for(0), threshold_for(1));
    }

    #[test]
    fn strictly_increasing_to_max() {
        for level in 1..MAX_LEVEL {
            assert!(threshold_for(level + 1) > threshold_for(level));
        }
    }
}
