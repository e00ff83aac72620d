//! # Constants and type definitions for iact-frames
//!
//! This module centralizes the **numerical constants**, **conversion factors**, and **common
//! type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Unit conversions (centimeters/millimeters ↔ meters, 2π for azimuth wrapping)
//! - The substitution magnitude used by the zero-offset policy of
//!   [`direction_from_offset`](crate::projection::direction_from_offset)
//! - Type aliases making the unit of raw `f64` values explicit inside the kernels

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for azimuth wrapping
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Centimeters → meters
pub const CM_TO_M: f64 = 1e-2;

/// Millimeters → meters
pub const MM_TO_M: f64 = 1e-3;

// -------------------------------------------------------------------------------------------------
// Numerical policy
// -------------------------------------------------------------------------------------------------

/// Offset magnitude (radians) substituted for an exactly-zero offset before the
/// inverse projection runs. The element is then overwritten with the reference direction.
pub const ZERO_OFFSET_SUBSTITUTE: f64 = 1e-14;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
