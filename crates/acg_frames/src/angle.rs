//! Angle normalization shared by every projector.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    if (0.0..360.0).contains(&deg) {
        return deg;
    }
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if r >= 360.0 { 0.0 } else { r }
}

/// Normalize a longitude to [-180, 180) degrees.
///
/// `((lon + 180) mod 360) - 180` with a Euclidean remainder, so +180 maps
/// to -180. Values already in range are returned bit-for-bit.
pub fn normalize_lon_180(deg: f64) -> f64 {
    if (-180.0..180.0).contains(&deg) {
        return deg;
    }
    normalize_360(deg + 180.0) - 180.0
}

/// Shortest signed rotation from `from` to `to`, in [-180, 180).
pub fn signed_delta_deg(from: f64, to: f64) -> f64 {
    normalize_lon_180(to - from)
}

/// Circular distance between two longitudes: `min(|a-b|, 360-|a-b|)`.
///
/// Always in [0, 180].
pub fn circular_distance_deg(a: f64, b: f64) -> f64 {
    let d = (a - b).abs().rem_euclid(360.0);
    d.min(360.0 - d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_360_cases() {
        assert_eq!(normalize_360(0.0), 0.0);
        assert_eq!(normalize_360(360.0), 0.0);
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-12);
        assert!((normalize_360(730.0) - 10.0).abs() < 1e-10);
        assert!((normalize_360(-370.0) - 350.0).abs() < 1e-10);
        assert!(normalize_360(-1e-18) < 360.0);
    }

    #[test]
    fn lon_180_half_open() {
        assert_eq!(normalize_lon_180(180.0), -180.0);
        assert_eq!(normalize_lon_180(-180.0), -180.0);
        assert!((normalize_lon_180(190.0) + 170.0).abs() < 1e-12);
        assert!((normalize_lon_180(-190.0) - 170.0).abs() < 1e-12);
        assert!((normalize_lon_180(60.0) - 60.0).abs() < 1e-12);
        assert!((normalize_lon_180(540.0) + 180.0).abs() < 1e-12);
    }

    #[test]
    fn circular_distance_wraps() {
        assert!((circular_distance_deg(10.0, -175.0) - 175.0).abs() < 1e-12);
        assert!((circular_distance_deg(170.0, -175.0) - 15.0).abs() < 1e-12);
        assert!((circular_distance_deg(-175.0, 170.0) - 15.0).abs() < 1e-12);
        assert!((circular_distance_deg(179.0, -179.0) - 2.0).abs() < 1e-12);
        assert!((circular_distance_deg(0.0, 180.0) - 180.0).abs() < 1e-12);
        assert_eq!(circular_distance_deg(42.5, 42.5), 0.0);
        assert!((circular_distance_deg(725.0, 0.0) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn signed_delta_short_way() {
        assert!((signed_delta_deg(170.0, -170.0) - 20.0).abs() < 1e-12);
        assert!((signed_delta_deg(-170.0, 170.0) + 20.0).abs() < 1e-12);
        assert!((signed_delta_deg(10.0, 30.0) - 20.0).abs() < 1e-12);
    }
}
