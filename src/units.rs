//! A definition of the base units used throughout this crate.
//!
//! Everything is SI: meters, kilograms, seconds, and the units derived from
//! them (m/s, m/s², kg/m³, Pa). Screen or pixel scaling is a presentation
//! concern; hosts convert at their own boundary, never here.
//!
//! Derived quantities, for reference:
//! Kernel weight: 1/m
//! Kernel slope: 1/m²
//! Density: kg/m³
//! Pressure: Pa = kg/(m s²)

/// Standard gravity, m/s². Applied along +y (down) by default.
pub const STANDARD_GRAVITY: f64 = 9.81;
