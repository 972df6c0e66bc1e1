//! Safe casting utilities for pixel and screen coordinates

use crate::{Error, Result};

/// Safely convert usize to i32 with overflow checking
///
/// # Errors
///
/// Returns an error if the value exceeds i32::MAX
pub fn usize_to_i32(value: usize) -> Result<i32> {
    value
        .try_into()
        .map_err(|_| Error::InvalidInput(format!("Value {value} too large to fit in i32")))
}

/// Safely convert f64 to i32 with bounds checking
///
/// # Errors
///
/// Returns an error if the value is not finite or outside i32 range
#[allow(clippy::cast_possible_truncation)] // Truncation after bounds check is safe
pub fn f64_to_i32(value: f64) -> Result<i32> {
    if value.is_finite() && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) {
        Ok(value as i32)
    } else {
        Err(Error::InvalidInput(format!(
            "Value {value} cannot be safely converted to i32"
        )))
    }
}

/// Clamp and convert f64 to i16 for X11 screen coordinates
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Clamping ensures safe truncation
pub fn f64_to_i16_clamp(value: f64, min: i16, max: i16) -> i16 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    if !value.is_finite() {
        return min;
    }

    value.clamp(f64::from(min), f64::from(max)) as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_usize_to_i32() {
        assert_eq!(usize_to_i32(21).unwrap(), 21);
        assert!(usize_to_i32(usize::MAX).is_err());
    }

    #[test]
    fn test_f64_to_i32() {
        assert_eq!(f64_to_i32(959.9).unwrap(), 959);
        assert_eq!(f64_to_i32(-0.5).unwrap(), 0);
        assert!(f64_to_i32(f64::NAN).is_err());
        assert!(f64_to_i32(1e12).is_err());
    }

    #[test]
    fn test_f64_to_i16_clamp() {
        assert_eq!(f64_to_i16_clamp(-12.0, 0, 1919), 0);
        assert_eq!(f64_to_i16_clamp(2500.0, 0, 1919), 1919);
        assert_eq!(f64_to_i16_clamp(960.7, 0, 1919), 960);
        assert_eq!(f64_to_i16_clamp(f64::INFINITY, 0, 1919), 0);
        assert_eq!(f64_to_i16_clamp(5.0, 10, 0), 5);
    }

    proptest! {
        #[test]
        fn prop_f64_to_i32_round_trip(value in i32::MIN..=i32::MAX) {
            prop_assert_eq!(f64_to_i32(f64::from(value)).unwrap(), value);
        }

        #[test]
        fn prop_f64_to_i16_clamp_within_bounds(value in any::<f64>(), a in any::<i16>(), b in any::<i16>()) {
            let result = f64_to_i16_clamp(value, a, b);
            prop_assert!(result >= a.min(b));
            prop_assert!(result <= a.max(b));
        }
    }
}
