//! Mean obliquity of the ecliptic at J2000.0.
//!
//! IAU 2006 value ε₀ = 84381.406″.

pub const OBLIQUITY_J2000_DEG: f64 = 84_381.406 / 3600.0;
