//! # Frame descriptors
//!
//! The four coordinate frames of pointed-telescope geometry, as immutable value types:
//!
//! | Frame | Representation | Required attributes |
//! |---|---|---|
//! | [`HorizonFrame`] | spherical (az, alt) | none |
//! | [`TelescopeFrame`] | planar angular offset (x, y) | telescope pointing |
//! | [`NominalFrame`] | planar angular offset (x, y) | array reference pointing |
//! | [`CameraFrame`] | physical Cartesian (x, y, z) | focal length (> 0) |
//!
//! Every frame additionally carries an [`ObservationContext`] (observation time and site).
//!
//! Frames with required attributes are built through builders that validate at `build()`:
//! an unset pointing is a [`FrameError::MissingFrameAttribute`] there, not later in a transform.
//!
//! ```rust
//! use iact_frames::frames::{Pointing, TelescopeFrame};
//! use iact_frames::frame_errors::FrameError;
//! use iact_frames::units::Angle;
//!
//! let tel = TelescopeFrame::builder()
//!     .telescope_pointing(Pointing::new(Angle::degrees(180.0), Angle::degrees(70.0)))
//!     .build()?;
//! assert_eq!(tel.telescope_pointing().alt(), Angle::degrees(70.0));
//!
//! let missing = TelescopeFrame::builder().build();
//! assert!(matches!(missing, Err(FrameError::MissingFrameAttribute { .. })));
//! # Ok::<(), FrameError>(())
//! ```

use hifitime::Epoch;

use crate::constants::Radian;
use crate::frame_errors::FrameError;
use crate::location::EarthLocation;
use crate::units::{Angle, Length};

/// Identifier of a frame, without its attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FrameKind {
    Horizon,
    Telescope,
    Nominal,
    Camera,
}

impl FrameKind {
    pub const ALL: [FrameKind; 4] = [
        FrameKind::Horizon,
        FrameKind::Telescope,
        FrameKind::Nominal,
        FrameKind::Camera,
    ];
}

impl std::fmt::Display for FrameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameKind::Horizon => write!(f, "Horizon"),
            FrameKind::Telescope => write!(f, "Telescope"),
            FrameKind::Nominal => write!(f, "Nominal"),
            FrameKind::Camera => write!(f, "Camera"),
        }
    }
}

/// A direction in the horizon system, used as the origin of an offset frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointing {
    az: Angle,
    alt: Angle,
}

impl Pointing {
    pub fn new(az: Angle, alt: Angle) -> Self {
        Pointing { az, alt }
    }

    pub fn az(&self) -> Angle {
        self.az
    }

    pub fn alt(&self) -> Angle {
        self.alt
    }

    pub fn az_radians(&self) -> Radian {
        self.az.to_radians()
    }

    pub fn alt_radians(&self) -> Radian {
        self.alt.to_radians()
    }

    fn validate(&self, frame: FrameKind, attribute: &'static str) -> Result<(), FrameError> {
        if self.az.is_finite() && self.alt.is_finite() {
            Ok(())
        } else {
            Err(FrameError::InvalidFrameAttribute {
                frame,
                attribute,
                reason: format!("non-finite direction (az {}, alt {})", self.az, self.alt),
            })
        }
    }
}

/// Observation time and site shared by all frames.
///
/// Transforms pass the context through unchanged; it only takes part in frame identity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ObservationContext {
    pub obstime: Option<Epoch>,
    pub location: Option<EarthLocation>,
}

impl ObservationContext {
    pub fn new(obstime: Option<Epoch>, location: Option<EarthLocation>) -> Self {
        ObservationContext { obstime, location }
    }

    /// Whether a field is set on both sides with different values. Unset fields never conflict.
    pub fn conflicts_with(&self, other: &ObservationContext) -> bool {
        fn differ<T: PartialEq>(a: Option<T>, b: Option<T>) -> bool {
            matches!((a, b), (Some(x), Some(y)) if x != y)
        }
        differ(self.obstime, other.obstime) || differ(self.location, other.location)
    }

    /// Fill the unset fields of `self` from `other`.
    pub(crate) fn or(self, other: ObservationContext) -> Self {
        ObservationContext {
            obstime: self.obstime.or(other.obstime),
            location: self.location.or(other.location),
        }
    }
}

/// Horizon (Alt/Az) frame: absolute directions on the sky of the observatory.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HorizonFrame {
    context: ObservationContext,
}

impl HorizonFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_obstime(mut self, obstime: Epoch) -> Self {
        self.context.obstime = Some(obstime);
        self
    }

    pub fn with_location(mut self, location: EarthLocation) -> Self {
        self.context.location = Some(location);
        self
    }

    pub(crate) fn from_context(context: ObservationContext) -> Self {
        HorizonFrame { context }
    }

    pub fn context(&self) -> &ObservationContext {
        &self.context
    }
}

/// Telescope frame: small-angle offset relative to the pointing of one telescope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelescopeFrame {
    telescope_pointing: Pointing,
    context: ObservationContext,
}

impl TelescopeFrame {
    /// Shorthand for a frame with only the pointing set.
    pub fn new(telescope_pointing: Pointing) -> Result<Self, FrameError> {
        Self::builder().telescope_pointing(telescope_pointing).build()
    }

    pub fn builder() -> TelescopeFrameBuilder {
        TelescopeFrameBuilder::default()
    }

    pub fn telescope_pointing(&self) -> &Pointing {
        &self.telescope_pointing
    }

    pub fn context(&self) -> &ObservationContext {
        &self.context
    }
}

#[derive(Debug, Clone, Default)]
pub struct TelescopeFrameBuilder {
    telescope_pointing: Option<Pointing>,
    context: ObservationContext,
}

impl TelescopeFrameBuilder {
    pub fn telescope_pointing(mut self, v: Pointing) -> Self {
        self.telescope_pointing = Some(v);
        self
    }
    pub fn obstime(mut self, v: Epoch) -> Self {
        self.context.obstime = Some(v);
        self
    }
    pub fn location(mut self, v: EarthLocation) -> Self {
        self.context.location = Some(v);
        self
    }
    pub fn context(mut self, v: ObservationContext) -> Self {
        self.context = v;
        self
    }

    pub fn build(self) -> Result<TelescopeFrame, FrameError> {
        let telescope_pointing =
            self.telescope_pointing
                .ok_or(FrameError::MissingFrameAttribute {
                    frame: FrameKind::Telescope,
                    attribute: "telescope_pointing",
                })?;
        telescope_pointing.validate(FrameKind::Telescope, "telescope_pointing")?;

        Ok(TelescopeFrame {
            telescope_pointing,
            context: self.context,
        })
    }
}

/// Nominal frame: small-angle offset relative to the array reference pointing.
///
/// Identical to the telescope frame when every telescope shares the array pointing;
/// differs under divergent pointing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NominalFrame {
    reference_point: Pointing,
    context: ObservationContext,
}

impl NominalFrame {
    pub fn new(reference_point: Pointing) -> Result<Self, FrameError> {
        Self::builder().reference_point(reference_point).build()
    }

    pub fn builder() -> NominalFrameBuilder {
        NominalFrameBuilder::default()
    }

    pub fn reference_point(&self) -> &Pointing {
        &self.reference_point
    }

    pub fn context(&self) -> &ObservationContext {
        &self.context
    }
}

#[derive(Debug, Clone, Default)]
pub struct NominalFrameBuilder {
    reference_point: Option<Pointing>,
    context: ObservationContext,
}

impl NominalFrameBuilder {
    pub fn reference_point(mut self, v: Pointing) -> Self {
        self.reference_point = Some(v);
        self
    }
    pub fn obstime(mut self, v: Epoch) -> Self {
        self.context.obstime = Some(v);
        self
    }
    pub fn location(mut self, v: EarthLocation) -> Self {
        self.context.location = Some(v);
        self
    }
    pub fn context(mut self, v: ObservationContext) -> Self {
        self.context = v;
        self
    }

    pub fn build(self) -> Result<NominalFrame, FrameError> {
        let reference_point = self
            .reference_point
            .ok_or(FrameError::MissingFrameAttribute {
                frame: FrameKind::Nominal,
                attribute: "reference_point",
            })?;
        reference_point.validate(FrameKind::Nominal, "reference_point")?;

        Ok(NominalFrame {
            reference_point,
            context: self.context,
        })
    }
}

/// Camera frame: physical position in the focal plane of a telescope.
///
/// The telescope pointing is optional here. Camera ↔ Telescope does not need it, but any
/// conversion that passes through the telescope frame on its way to the sky does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    focal_length: Length,
    rotation: Angle,
    telescope_pointing: Option<Pointing>,
    context: ObservationContext,
}

impl CameraFrame {
    /// Shorthand for an unrotated camera with only the focal length set.
    pub fn new(focal_length: Length) -> Result<Self, FrameError> {
        Self::builder().focal_length(focal_length).build()
    }

    pub fn builder() -> CameraFrameBuilder {
        CameraFrameBuilder::default()
    }

    pub fn focal_length(&self) -> Length {
        self.focal_length
    }

    pub fn rotation(&self) -> Angle {
        self.rotation
    }

    pub fn telescope_pointing(&self) -> Option<&Pointing> {
        self.telescope_pointing.as_ref()
    }

    pub fn context(&self) -> &ObservationContext {
        &self.context
    }
}

#[derive(Debug, Clone, Default)]
pub struct CameraFrameBuilder {
    focal_length: Option<Length>,
    rotation: Option<Angle>,
    telescope_pointing: Option<Pointing>,
    context: ObservationContext,
}

impl CameraFrameBuilder {
    pub fn focal_length(mut self, v: Length) -> Self {
        self.focal_length = Some(v);
        self
    }
    pub fn rotation(mut self, v: Angle) -> Self {
        self.rotation = Some(v);
        self
    }
    pub fn telescope_pointing(mut self, v: Pointing) -> Self {
        self.telescope_pointing = Some(v);
        self
    }
    pub fn obstime(mut self, v: Epoch) -> Self {
        self.context.obstime = Some(v);
        self
    }
    pub fn location(mut self, v: EarthLocation) -> Self {
        self.context.location = Some(v);
        self
    }
    pub fn context(mut self, v: ObservationContext) -> Self {
        self.context = v;
        self
    }

    /// Validate and produce the [`CameraFrame`].
    ///
    /// Validation rules
    /// -----------------
    /// * `focal_length` must be set, finite and strictly positive.
    /// * `rotation` defaults to 0 rad and must be finite.
    /// * `telescope_pointing`, when set, must be finite.
    pub fn build(self) -> Result<CameraFrame, FrameError> {
        let focal_length = self
            .focal_length
            .ok_or(FrameError::MissingFrameAttribute {
                frame: FrameKind::Camera,
                attribute: "focal_length",
            })?;
        // NaN fails the comparison as well
        if !(focal_length.value.is_finite() && focal_length.value > 0.0) {
            return Err(FrameError::InvalidFrameAttribute {
                frame: FrameKind::Camera,
                attribute: "focal_length",
                reason: format!("must be finite and > 0, got {focal_length}"),
            });
        }

        let rotation = self.rotation.unwrap_or(Angle::radians(0.0));
        if !rotation.is_finite() {
            return Err(FrameError::InvalidFrameAttribute {
                frame: FrameKind::Camera,
                attribute: "rotation",
                reason: format!("must be finite, got {rotation}"),
            });
        }

        if let Some(pointing) = &self.telescope_pointing {
            pointing.validate(FrameKind::Camera, "telescope_pointing")?;
        }

        Ok(CameraFrame {
            focal_length,
            rotation,
            telescope_pointing: self.telescope_pointing,
            context: self.context,
        })
    }
}

/// Any of the four frames. The frame set is closed, so dispatch is an exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    Horizon(HorizonFrame),
    Telescope(TelescopeFrame),
    Nominal(NominalFrame),
    Camera(CameraFrame),
}

impl Frame {
    pub fn kind(&self) -> FrameKind {
        match self {
            Frame::Horizon(_) => FrameKind::Horizon,
            Frame::Telescope(_) => FrameKind::Telescope,
            Frame::Nominal(_) => FrameKind::Nominal,
            Frame::Camera(_) => FrameKind::Camera,
        }
    }

    pub fn context(&self) -> &ObservationContext {
        match self {
            Frame::Horizon(f) => f.context(),
            Frame::Telescope(f) => f.context(),
            Frame::Nominal(f) => f.context(),
            Frame::Camera(f) => f.context(),
        }
    }

    pub fn obstime(&self) -> Option<Epoch> {
        self.context().obstime
    }

    pub fn location(&self) -> Option<EarthLocation> {
        self.context().location
    }

    /// Pointing of the telescope this frame is attached to, if it has one.
    pub fn telescope_pointing(&self) -> Option<&Pointing> {
        match self {
            Frame::Telescope(f) => Some(f.telescope_pointing()),
            Frame::Camera(f) => f.telescope_pointing(),
            _ => None,
        }
    }

    /// Array reference pointing, only carried by the nominal frame.
    pub fn reference_point(&self) -> Option<&Pointing> {
        match self {
            Frame::Nominal(f) => Some(f.reference_point()),
            _ => None,
        }
    }
}

impl From<HorizonFrame> for Frame {
    fn from(f: HorizonFrame) -> Self {
        Frame::Horizon(f)
    }
}

impl From<TelescopeFrame> for Frame {
    fn from(f: TelescopeFrame) -> Self {
        Frame::Telescope(f)
    }
}

impl From<NominalFrame> for Frame {
    fn from(f: NominalFrame) -> Self {
        Frame::Nominal(f)
    }
}

impl From<CameraFrame> for Frame {
    fn from(f: CameraFrame) -> Self {
        Frame::Camera(f)
    }
}
