//! # Angular offset projection kernels
//!
//! Pure numeric functions converting between an absolute horizon direction and a small-angle
//! planar offset relative to a reference direction. Everything here works on raw `f64`
//! **radians**; unit handling happens one level up in [`crate::transforms`].
//!
//! ## Convention
//!
//! The horizon unit vector of a direction `(az, alt)` relative to the reference azimuth is
//!
//! ```text
//! x0 = -cos(Δaz)·cos(alt)     y0 = sin(Δaz)·cos(alt)     z0 = sin(alt)
//! ```
//!
//! It is rotated about the y axis by `π/2 - ref_alt`, which brings the reference direction onto
//! the +z axis, then projected on the tangent plane:
//!
//! ```text
//! d = tan(arccos(z1))     α = atan2(y1, x1)     (x, y) = (d·cos α, d·sin α)
//! ```
//!
//! With this convention **+x points toward increasing altitude** and **+y toward increasing
//! azimuth**. `x` and `y` are the tangents of the angular separations, which for the small
//! offsets these frames are meant for equal the separations themselves.
//!
//! ## Preconditions
//!
//! * Offsets are only meaningful well below ~1 rad.
//! * A target antipodal to the reference has no projection: the output is undefined (not an
//!   error). [`separation_cosine`] lets callers detect such targets up front.
//!
//! ## Degenerate offset
//!
//! An exactly-zero offset makes the inverse projection divide by zero. The element's magnitude
//! is replaced by [`ZERO_OFFSET_SUBSTITUTE`], the general formula runs, and the result is
//! overwritten with the reference direction. `direction_from_offset(0, 0, az, alt)` is therefore
//! exactly `(az, alt)`.
//!
//! ## Batches
//!
//! The `*_batch` functions apply the scalar formula element-wise with the reference rotation
//! computed once; results are bit-identical to N scalar calls.

use nalgebra::{Matrix3, Vector3};

use crate::constants::{Radian, DPI, ZERO_OFFSET_SUBSTITUTE};
use crate::frame_errors::FrameError;

/// Rotation about the y axis taking horizon vectors into the frame whose +z axis is the
/// reference direction at altitude `ref_alt`.
///
/// This is the matrix of an active rotation by `π/2 - ref_alt`, written with `sin(ref_alt)`
/// and `cos(ref_alt)` directly. Its transpose is the inverse rotation.
#[inline]
fn altitude_rotation(ref_alt: Radian) -> Matrix3<f64> {
    let (s, c) = ref_alt.sin_cos();
    Matrix3::new(
        s, 0.0, c, //
        0.0, 1.0, 0.0, //
        -c, 0.0, s,
    )
}

#[inline]
fn horizon_vector(az: Radian, alt: Radian, ref_az: Radian) -> Vector3<f64> {
    let (sin_daz, cos_daz) = (az - ref_az).sin_cos();
    let (sin_alt, cos_alt) = alt.sin_cos();
    Vector3::new(-cos_daz * cos_alt, sin_daz * cos_alt, sin_alt)
}

#[inline]
fn project(az: Radian, alt: Radian, ref_az: Radian, rot: &Matrix3<f64>) -> (Radian, Radian) {
    let v = rot * horizon_vector(az, alt, ref_az);

    // rounding can push |z| a hair above 1 for a target on the reference direction
    let disp = v.z.clamp(-1.0, 1.0).acos().tan();
    let alpha = v.y.atan2(v.x);

    (disp * alpha.cos(), disp * alpha.sin())
}

#[inline]
fn unproject(
    x: Radian,
    y: Radian,
    ref_az: Radian,
    ref_alt: Radian,
    rot: &Matrix3<f64>,
) -> (Radian, Radian) {
    let mut offset = (x * x + y * y).sqrt();
    let degenerate = offset == 0.0;
    if degenerate {
        offset = ZERO_OFFSET_SUBSTITUTE;
    }

    let atan_off = offset.atan();
    let scale = atan_off.sin() / offset;
    let v1 = Vector3::new(x * scale, y * scale, atan_off.cos());
    let v0 = rot.transpose() * v1;

    let alt = v0.z.clamp(-1.0, 1.0).asin();
    let az = v0.y.atan2(-v0.x) + ref_az;

    if degenerate {
        return (ref_az, ref_alt);
    }
    (az, alt)
}

/// Offset of a target direction relative to a reference direction.
///
/// Arguments
/// -----------------
/// * `target_az`, `target_alt`: target direction in **radians**.
/// * `ref_az`, `ref_alt`: reference direction (pointing) in **radians**.
///
/// Return
/// ----------
/// * `(x, y)` offset in **radians**, +x toward increasing altitude, +y toward increasing azimuth.
///
/// See also
/// ------------
/// * [`direction_from_offset`] – the inverse.
/// * [`offset_from_direction_batch`] – element-wise version over slices.
pub fn offset_from_direction(
    target_az: Radian,
    target_alt: Radian,
    ref_az: Radian,
    ref_alt: Radian,
) -> (Radian, Radian) {
    project(target_az, target_alt, ref_az, &altitude_rotation(ref_alt))
}

/// Absolute direction of a planar offset relative to a reference direction.
///
/// Arguments
/// -----------------
/// * `x`, `y`: offset in **radians**.
/// * `ref_az`, `ref_alt`: reference direction in **radians**.
///
/// Return
/// ----------
/// * `(az, alt)` in **radians**. The azimuth is `ref_az` plus a value in `(-π, π]` and is not
///   wrapped; see [`normalize_azimuth`].
pub fn direction_from_offset(
    x: Radian,
    y: Radian,
    ref_az: Radian,
    ref_alt: Radian,
) -> (Radian, Radian) {
    unproject(x, y, ref_az, ref_alt, &altitude_rotation(ref_alt))
}

fn check_shape(a: &[f64], b: &[f64]) -> Result<(), FrameError> {
    if a.len() != b.len() {
        return Err(FrameError::ShapeMismatch(a.len(), b.len()));
    }
    Ok(())
}

/// Element-wise [`offset_from_direction`].
///
/// Errors
/// ----------
/// * [`FrameError::ShapeMismatch`] if `target_az` and `target_alt` differ in length.
pub fn offset_from_direction_batch(
    target_az: &[Radian],
    target_alt: &[Radian],
    ref_az: Radian,
    ref_alt: Radian,
) -> Result<(Vec<Radian>, Vec<Radian>), FrameError> {
    check_shape(target_az, target_alt)?;
    let rot = altitude_rotation(ref_alt);

    Ok(target_az
        .iter()
        .zip(target_alt)
        .map(|(az, alt)| project(*az, *alt, ref_az, &rot))
        .unzip())
}

/// Element-wise [`direction_from_offset`], zero-offset policy applied per element.
///
/// Errors
/// ----------
/// * [`FrameError::ShapeMismatch`] if `x` and `y` differ in length.
pub fn direction_from_offset_batch(
    x: &[Radian],
    y: &[Radian],
    ref_az: Radian,
    ref_alt: Radian,
) -> Result<(Vec<Radian>, Vec<Radian>), FrameError> {
    check_shape(x, y)?;
    let rot = altitude_rotation(ref_alt);

    Ok(x.iter()
        .zip(y)
        .map(|(x, y)| unproject(*x, *y, ref_az, ref_alt, &rot))
        .unzip())
}

/// Cosine of the angular separation between a target and a reference direction.
///
/// This is the `z1` component of the rotated target vector: it is `<= 0` exactly when the
/// target lies outside the forward hemisphere of the reference, where the projection breaks.
pub fn separation_cosine(
    target_az: Radian,
    target_alt: Radian,
    ref_az: Radian,
    ref_alt: Radian,
) -> f64 {
    (altitude_rotation(ref_alt) * horizon_vector(target_az, target_alt, ref_az)).z
}

/// Wrap an azimuth into `[0, 2π)`.
pub fn normalize_azimuth(az: Radian) -> Radian {
    let wrapped = az.rem_euclid(DPI);
    // rem_euclid may round a tiny negative input up to exactly 2π
    if wrapped >= DPI {
        0.0
    } else {
        wrapped
    }
}
