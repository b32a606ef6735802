//! Scale control range.

/// Smallest scale the control accepts.
pub const SCALE_MIN: f64 = 0.1;

/// Largest scale the control accepts.
pub const SCALE_MAX: f64 = 3.0;

/// Slider granularity.
pub const SCALE_STEP: f64 = 0.01;

/// Scale at session start, before any image is loaded.
pub const DEFAULT_SCALE: f64 = 0.5;

/// Scale applied whenever a new image is loaded or the placement is reset.
pub const LOADED_SCALE: f64 = 1.0;

/// Bring a requested scale into the control's range.
///
/// Values are clamped to `[SCALE_MIN, SCALE_MAX]` and snapped to the nearest
/// `SCALE_STEP`. Returns `None` for NaN, which has no sensible in-range value.
pub fn normalize_scale(value: f64) -> Option<f64> {
    if value.is_nan() {
        return None;
    }
    let clamped = value.clamp(SCALE_MIN, SCALE_MAX);
    // Dividing by the step count keeps two-decimal values exact (1.23, not 1.2300000000000002).
    let steps_per_unit = (1.0 / SCALE_STEP).round();
    Some((clamped * steps_per_unit).round() / steps_per_unit)
}

/// Format a scale as the percentage shown next to the slider, e.g. `"150%"`.
pub fn format_scale_percent(scale: f64) -> String {
    format!("{:.0}%", scale * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_value_kept() {
        assert_eq!(normalize_scale(1.25), Some(1.25));
        assert_eq!(normalize_scale(SCALE_MIN), Some(SCALE_MIN));
        assert_eq!(normalize_scale(SCALE_MAX), Some(SCALE_MAX));
    }

    #[test]
    fn test_out_of_range_clamped() {
        assert_eq!(normalize_scale(0.0), Some(SCALE_MIN));
        assert_eq!(normalize_scale(-4.0), Some(SCALE_MIN));
        assert_eq!(normalize_scale(10.0), Some(SCALE_MAX));
        assert_eq!(normalize_scale(f64::INFINITY), Some(SCALE_MAX));
        assert_eq!(normalize_scale(f64::NEG_INFINITY), Some(SCALE_MIN));
    }

    #[test]
    fn test_snaps_to_step() {
        assert_eq!(normalize_scale(1.234), Some(1.23));
        assert_eq!(normalize_scale(1.236), Some(1.24));
    }

    #[test]
    fn test_nan_rejected() {
        assert_eq!(normalize_scale(f64::NAN), None);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_scale_percent(1.0), "100%");
        assert_eq!(format_scale_percent(0.5), "50%");
        assert_eq!(format_scale_percent(2.345), "235%");
    }
}
