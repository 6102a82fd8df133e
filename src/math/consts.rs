//!
//! Numerical constants shared by the projection library
//!
#![allow(dead_code)]

pub const PI: f64 = std::f64::consts::PI;
pub const FRAC_PI_2: f64 = std::f64::consts::FRAC_PI_2;
pub const FRAC_PI_4: f64 = std::f64::consts::FRAC_PI_4;
pub const TWO_PI: f64 = std::f64::consts::TAU;

/// General purpose epsilon used throughout the projection library for
/// pole/parallel-coincidence guards.
pub const EPS_7: f64 = 1.0e-7;
pub const EPS_10: f64 = 1.0e-10;
pub const EPS_12: f64 = 1.0e-12;

/// Arcsecond to radian and ppm-to-multiplier conversions, used when
/// lowering `towgs84` parameters (arcseconds for rotations, ppm for scale).
pub const SEC_TO_RAD: f64 = PI / (180. * 3600.);
pub const PPM: f64 = 1.0e-6;
