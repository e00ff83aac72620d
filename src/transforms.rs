//! # Pairwise frame transforms
//!
//! One operator per directed edge of the frame graph:
//!
//! ```text
//!               Horizon
//!              /       \
//!     Telescope ------- Nominal
//!         |
//!       Camera
//! ```
//!
//! | Edge | Kernel(s) | Reference attribute |
//! |---|---|---|
//! | Horizon ↔ Telescope | [`offset_from_direction`] / [`direction_from_offset`] | telescope pointing |
//! | Horizon ↔ Nominal | same | array reference point |
//! | Telescope ↔ Nominal | inverse projection then projection | both pointings |
//! | Camera ↔ Telescope | 2D rotation and focal-length scaling | camera rotation, focal length |
//!
//! The typed operators (`horizon_to_telescope`, ...) take the representation and the frames
//! they need and return a new representation; they never touch their inputs. Tagging the result
//! with its frame is done by [`Coordinates`](crate::coordinates::Coordinates).
//!
//! Units: every angle is converted to radians and every length to meters before any
//! arithmetic. The output unit follows [`TransformParams`] when it names one, otherwise:
//!
//! * offsets computed from Horizon use the unit of the input azimuth (rather than always
//!   radians, so degree-tagged input stays in degrees),
//! * Horizon directions use the unit of the reference pointing azimuth,
//! * Telescope ↔ Nominal keeps the unit of the input `x`,
//! * Camera → Telescope yields radians, Telescope → Camera the focal length's unit.
//!
//! [`offset_from_direction`]: crate::projection::offset_from_direction
//! [`direction_from_offset`]: crate::projection::direction_from_offset

use nalgebra::{Rotation2, Vector2};
use tracing::trace;

use crate::constants::Radian;
use crate::frame_errors::FrameError;
use crate::frames::{CameraFrame, Frame, FrameKind, NominalFrame, Pointing, TelescopeFrame};
use crate::params::TransformParams;
use crate::projection::{
    direction_from_offset_batch, normalize_azimuth, offset_from_direction_batch,
    separation_cosine,
};
use crate::representation::{
    CartesianRepresentation, PlanarRepresentation, Representation, SphericalRepresentation,
};
use crate::units::{AngleArray, AngleUnit, LengthArray};

// -------------------------------------------------------------------------------------------------
// Shared pieces
// -------------------------------------------------------------------------------------------------

fn check_forward_hemisphere(
    az: &[Radian],
    alt: &[Radian],
    pointing: &Pointing,
    params: &TransformParams,
) -> Result<(), FrameError> {
    if !params.require_forward_hemisphere {
        return Ok(());
    }
    let (ref_az, ref_alt) = (pointing.az_radians(), pointing.alt_radians());

    match az
        .iter()
        .zip(alt)
        .position(|(az, alt)| separation_cosine(*az, *alt, ref_az, ref_alt) <= 0.0)
    {
        Some(index) => Err(FrameError::OutsideForwardHemisphere { index }),
        None => Ok(()),
    }
}

fn check_offsets(x: &[Radian], y: &[Radian], params: &TransformParams) -> Result<(), FrameError> {
    let Some(max) = params.max_offset.map(|m| m.to_radians()) else {
        return Ok(());
    };

    match x.iter().zip(y).position(|(x, y)| x.hypot(*y) > max) {
        Some(index) => Err(FrameError::OffsetOutOfRange {
            index,
            offset: x[index].hypot(y[index]),
            max,
        }),
        None => Ok(()),
    }
}

/// Absolute directions → offsets relative to `pointing`.
fn sky_to_offset(
    data: &SphericalRepresentation,
    pointing: &Pointing,
    params: &TransformParams,
) -> Result<PlanarRepresentation, FrameError> {
    let az = data.az().to_radians();
    let alt = data.alt().to_radians();
    check_forward_hemisphere(&az, &alt, pointing, params)?;

    let (x, y) =
        offset_from_direction_batch(&az, &alt, pointing.az_radians(), pointing.alt_radians())?;
    check_offsets(&x, &y, params)?;

    let unit = params.angle_unit.unwrap_or(data.az().unit);
    PlanarRepresentation::new(
        AngleArray::from_radians(x, unit),
        AngleArray::from_radians(y, unit),
    )
}

/// Offsets relative to `pointing` → absolute directions.
fn offset_to_sky(
    data: &PlanarRepresentation,
    pointing: &Pointing,
    params: &TransformParams,
) -> Result<SphericalRepresentation, FrameError> {
    let x = data.x().to_radians();
    let y = data.y().to_radians();
    check_offsets(&x, &y, params)?;

    let (mut az, alt) =
        direction_from_offset_batch(&x, &y, pointing.az_radians(), pointing.alt_radians())?;
    if params.normalize_azimuth {
        az.iter_mut().for_each(|a| *a = normalize_azimuth(*a));
    }

    let unit = params.angle_unit.unwrap_or(pointing.az().unit);
    SphericalRepresentation::new(
        AngleArray::from_radians(az, unit),
        AngleArray::from_radians(alt, unit),
    )
}

/// Offsets relative to `from` → offsets relative to `to`, through the absolute direction.
fn offset_to_offset(
    data: &PlanarRepresentation,
    from: &Pointing,
    to: &Pointing,
    params: &TransformParams,
) -> Result<PlanarRepresentation, FrameError> {
    let x = data.x().to_radians();
    let y = data.y().to_radians();
    check_offsets(&x, &y, params)?;

    let (az, alt) = direction_from_offset_batch(&x, &y, from.az_radians(), from.alt_radians())?;
    check_forward_hemisphere(&az, &alt, to, params)?;

    let (x, y) = offset_from_direction_batch(&az, &alt, to.az_radians(), to.alt_radians())?;
    check_offsets(&x, &y, params)?;

    let unit = params.angle_unit.unwrap_or(data.x().unit);
    PlanarRepresentation::new(
        AngleArray::from_radians(x, unit),
        AngleArray::from_radians(y, unit),
    )
}

// -------------------------------------------------------------------------------------------------
// Typed operators
// -------------------------------------------------------------------------------------------------

/// Horizon → Telescope: offset of each direction from the destination telescope pointing.
pub fn horizon_to_telescope(
    data: &SphericalRepresentation,
    telescope_frame: &TelescopeFrame,
    params: &TransformParams,
) -> Result<PlanarRepresentation, FrameError> {
    trace!(n = data.len(), "horizon -> telescope");
    sky_to_offset(data, telescope_frame.telescope_pointing(), params)
}

/// Telescope → Horizon: absolute direction of each offset from the source telescope pointing.
pub fn telescope_to_horizon(
    data: &PlanarRepresentation,
    telescope_frame: &TelescopeFrame,
    params: &TransformParams,
) -> Result<SphericalRepresentation, FrameError> {
    trace!(n = data.len(), "telescope -> horizon");
    offset_to_sky(data, telescope_frame.telescope_pointing(), params)
}

/// Horizon → Nominal: offset of each direction from the destination array reference point.
pub fn horizon_to_nominal(
    data: &SphericalRepresentation,
    nominal_frame: &NominalFrame,
    params: &TransformParams,
) -> Result<PlanarRepresentation, FrameError> {
    trace!(n = data.len(), "horizon -> nominal");
    sky_to_offset(data, nominal_frame.reference_point(), params)
}

/// Nominal → Horizon: absolute direction of each offset from the source array reference point.
pub fn nominal_to_horizon(
    data: &PlanarRepresentation,
    nominal_frame: &NominalFrame,
    params: &TransformParams,
) -> Result<SphericalRepresentation, FrameError> {
    trace!(n = data.len(), "nominal -> horizon");
    offset_to_sky(data, nominal_frame.reference_point(), params)
}

/// Telescope → Nominal: unproject with the telescope pointing, reproject on the array
/// reference point. Uses the same kernels as the Horizon edges, so going through Nominal to
/// Horizon lands where Telescope → Horizon does.
pub fn telescope_to_nominal(
    data: &PlanarRepresentation,
    telescope_frame: &TelescopeFrame,
    nominal_frame: &NominalFrame,
    params: &TransformParams,
) -> Result<PlanarRepresentation, FrameError> {
    trace!(n = data.len(), "telescope -> nominal");
    offset_to_offset(
        data,
        telescope_frame.telescope_pointing(),
        nominal_frame.reference_point(),
        params,
    )
}

/// Nominal → Telescope: mirror of [`telescope_to_nominal`].
pub fn nominal_to_telescope(
    data: &PlanarRepresentation,
    nominal_frame: &NominalFrame,
    telescope_frame: &TelescopeFrame,
    params: &TransformParams,
) -> Result<PlanarRepresentation, FrameError> {
    trace!(n = data.len(), "nominal -> telescope");
    offset_to_offset(
        data,
        nominal_frame.reference_point(),
        telescope_frame.telescope_pointing(),
        params,
    )
}

/// Camera → Telescope.
///
/// Each focal-plane position is rotated counter-clockwise by the camera rotation, then divided
/// by the focal length, giving the offset angle in radians (small-angle approximation).
pub fn camera_to_telescope(
    data: &CartesianRepresentation,
    camera_frame: &CameraFrame,
    params: &TransformParams,
) -> Result<PlanarRepresentation, FrameError> {
    trace!(n = data.len(), "camera -> telescope");
    let rot = Rotation2::new(camera_frame.rotation().to_radians());
    let focal = camera_frame.focal_length().to_meters();

    let (x, y): (Vec<Radian>, Vec<Radian>) = data
        .x()
        .to_meters()
        .into_iter()
        .zip(data.y().to_meters())
        .map(|(x, y)| {
            let p = rot * Vector2::new(x, y);
            (p.x / focal, p.y / focal)
        })
        .unzip();
    check_offsets(&x, &y, params)?;

    let unit = params.angle_unit.unwrap_or(AngleUnit::Radian);
    PlanarRepresentation::new(
        AngleArray::from_radians(x, unit),
        AngleArray::from_radians(y, unit),
    )
}

/// Telescope → Camera.
///
/// Reverses the camera rotation, then scales the offset by the focal length. The depth
/// coordinate of the result is zero.
pub fn telescope_to_camera(
    data: &PlanarRepresentation,
    camera_frame: &CameraFrame,
    params: &TransformParams,
) -> Result<CartesianRepresentation, FrameError> {
    trace!(n = data.len(), "telescope -> camera");
    let x = data.x().to_radians();
    let y = data.y().to_radians();
    check_offsets(&x, &y, params)?;

    let rot = Rotation2::new(-camera_frame.rotation().to_radians());
    let focal = camera_frame.focal_length().to_meters();

    let (x, y): (Vec<f64>, Vec<f64>) = x
        .into_iter()
        .zip(y)
        .map(|(x, y)| {
            let p = rot * Vector2::new(x, y);
            (p.x * focal, p.y * focal)
        })
        .unzip();

    let unit = params
        .length_unit
        .unwrap_or(camera_frame.focal_length().unit);
    CartesianRepresentation::planar(
        LengthArray::from_meters(x, unit),
        LengthArray::from_meters(y, unit),
    )
}

/// Re-express `data` in its own frame: output units, azimuth wrapping and the offset bound of
/// `params` apply as they would on any edge, the values are otherwise unchanged.
pub fn relabel(
    data: &Representation,
    params: &TransformParams,
) -> Result<Representation, FrameError> {
    trace!(n = data.len(), "relabel");
    let rep = match data {
        Representation::Spherical(sph) => {
            if !params.normalize_azimuth && params.angle_unit.is_none() {
                return Ok(data.clone());
            }
            let mut az = sph.az().to_radians();
            if params.normalize_azimuth {
                az.iter_mut().for_each(|a| *a = normalize_azimuth(*a));
            }
            let az_unit = params.angle_unit.unwrap_or(sph.az().unit);
            let alt_unit = params.angle_unit.unwrap_or(sph.alt().unit);
            SphericalRepresentation::new(
                AngleArray::from_radians(az, az_unit),
                sph.alt().to_unit(alt_unit),
            )?
            .into()
        }
        Representation::Planar(planar) => {
            check_offsets(&planar.x().to_radians(), &planar.y().to_radians(), params)?;
            match params.angle_unit {
                Some(unit) => {
                    PlanarRepresentation::new(planar.x().to_unit(unit), planar.y().to_unit(unit))?
                        .into()
                }
                None => data.clone(),
            }
        }
        Representation::Cartesian(cart) => match params.length_unit {
            Some(unit) => CartesianRepresentation::new(
                cart.x().to_unit(unit),
                cart.y().to_unit(unit),
                cart.z().to_unit(unit),
            )?
            .into(),
            None => data.clone(),
        },
    };
    Ok(rep)
}

// -------------------------------------------------------------------------------------------------
// Uniform edge operators for the graph registry
// -------------------------------------------------------------------------------------------------

/// Signature shared by every edge of the [`TransformGraph`](crate::graph::TransformGraph).
pub type EdgeFn = fn(
    &Representation,
    &Frame,
    &Frame,
    &TransformParams,
) -> Result<Representation, FrameError>;

fn mismatch(frame: FrameKind, data: &Representation) -> FrameError {
    FrameError::RepresentationMismatch {
        frame,
        found: data.name(),
    }
}

fn wrong_frames(from: &Frame, to: &Frame) -> FrameError {
    FrameError::UnsupportedFramePair {
        from: from.kind(),
        to: to.kind(),
    }
}

pub(crate) fn edge_horizon_to_telescope(
    data: &Representation,
    from: &Frame,
    to: &Frame,
    params: &TransformParams,
) -> Result<Representation, FrameError> {
    let Representation::Spherical(sph) = data else {
        return Err(mismatch(FrameKind::Horizon, data));
    };
    let Frame::Telescope(tel) = to else {
        return Err(wrong_frames(from, to));
    };
    horizon_to_telescope(sph, tel, params).map(Representation::from)
}

pub(crate) fn edge_telescope_to_horizon(
    data: &Representation,
    from: &Frame,
    to: &Frame,
    params: &TransformParams,
) -> Result<Representation, FrameError> {
    let Representation::Planar(planar) = data else {
        return Err(mismatch(FrameKind::Telescope, data));
    };
    let Frame::Telescope(tel) = from else {
        return Err(wrong_frames(from, to));
    };
    telescope_to_horizon(planar, tel, params).map(Representation::from)
}

pub(crate) fn edge_horizon_to_nominal(
    data: &Representation,
    from: &Frame,
    to: &Frame,
    params: &TransformParams,
) -> Result<Representation, FrameError> {
    let Representation::Spherical(sph) = data else {
        return Err(mismatch(FrameKind::Horizon, data));
    };
    let Frame::Nominal(nom) = to else {
        return Err(wrong_frames(from, to));
    };
    horizon_to_nominal(sph, nom, params).map(Representation::from)
}

pub(crate) fn edge_nominal_to_horizon(
    data: &Representation,
    from: &Frame,
    to: &Frame,
    params: &TransformParams,
) -> Result<Representation, FrameError> {
    let Representation::Planar(planar) = data else {
        return Err(mismatch(FrameKind::Nominal, data));
    };
    let Frame::Nominal(nom) = from else {
        return Err(wrong_frames(from, to));
    };
    nominal_to_horizon(planar, nom, params).map(Representation::from)
}

pub(crate) fn edge_telescope_to_nominal(
    data: &Representation,
    from: &Frame,
    to: &Frame,
    params: &TransformParams,
) -> Result<Representation, FrameError> {
    let Representation::Planar(planar) = data else {
        return Err(mismatch(FrameKind::Telescope, data));
    };
    let (Frame::Telescope(tel), Frame::Nominal(nom)) = (from, to) else {
        return Err(wrong_frames(from, to));
    };
    telescope_to_nominal(planar, tel, nom, params).map(Representation::from)
}

pub(crate) fn edge_nominal_to_telescope(
    data: &Representation,
    from: &Frame,
    to: &Frame,
    params: &TransformParams,
) -> Result<Representation, FrameError> {
    let Representation::Planar(planar) = data else {
        return Err(mismatch(FrameKind::Nominal, data));
    };
    let (Frame::Nominal(nom), Frame::Telescope(tel)) = (from, to) else {
        return Err(wrong_frames(from, to));
    };
    nominal_to_telescope(planar, nom, tel, params).map(Representation::from)
}

pub(crate) fn edge_camera_to_telescope(
    data: &Representation,
    from: &Frame,
    to: &Frame,
    params: &TransformParams,
) -> Result<Representation, FrameError> {
    let Representation::Cartesian(cart) = data else {
        return Err(mismatch(FrameKind::Camera, data));
    };
    let Frame::Camera(cam) = from else {
        return Err(wrong_frames(from, to));
    };
    camera_to_telescope(cart, cam, params).map(Representation::from)
}

pub(crate) fn edge_telescope_to_camera(
    data: &Representation,
    from: &Frame,
    to: &Frame,
    params: &TransformParams,
) -> Result<Representation, FrameError> {
    let Representation::Planar(planar) = data else {
        return Err(mismatch(FrameKind::Telescope, data));
    };
    let Frame::Camera(cam) = to else {
        return Err(wrong_frames(from, to));
    };
    telescope_to_camera(planar, cam, params).map(Representation::from)
}
