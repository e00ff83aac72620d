//! # Frame-tagged coordinates
//!
//! [`Coordinates`] pairs a representation with the frame it is expressed in. This is the
//! entry point most callers need:
//!
//! ```rust
//! use iact_frames::coordinates::Coordinates;
//! use iact_frames::frames::{HorizonFrame, Pointing, TelescopeFrame};
//! use iact_frames::units::{Angle, AngleArray};
//!
//! let pointing = Pointing::new(Angle::degrees(180.0), Angle::degrees(70.0));
//! let tel = TelescopeFrame::new(pointing)?;
//!
//! let events = Coordinates::horizon(
//!     AngleArray::degrees(vec![180.5, 179.0]),
//!     AngleArray::degrees(vec![70.2, 69.5]),
//!     HorizonFrame::new(),
//! )?;
//! let offsets = events.transform_to(&tel.into())?;
//! assert_eq!(offsets.len(), 2);
//! # Ok::<(), iact_frames::frame_errors::FrameError>(())
//! ```
//!
//! Conversions never mutate `self`; the result owns fresh data and a copy of the destination
//! frame.

use crate::frame_errors::FrameError;
use crate::frames::{CameraFrame, Frame, HorizonFrame, NominalFrame, TelescopeFrame};
use crate::graph::TransformGraph;
use crate::params::TransformParams;
use crate::representation::{
    CartesianRepresentation, PlanarRepresentation, Representation, SphericalRepresentation,
};
use crate::units::{AngleArray, LengthArray};

/// Values together with the frame they are expressed in.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    frame: Frame,
    data: Representation,
}

impl Coordinates {
    /// Tag `data` with `frame`.
    ///
    /// Errors
    /// -----------------
    /// * [`FrameError::RepresentationMismatch`] if `data` is not the representation of `frame`.
    pub fn new(data: impl Into<Representation>, frame: impl Into<Frame>) -> Result<Self, FrameError> {
        let data = data.into();
        let frame = frame.into();
        if !data.fits(frame.kind()) {
            return Err(FrameError::RepresentationMismatch {
                frame: frame.kind(),
                found: data.name(),
            });
        }
        Ok(Coordinates { frame, data })
    }

    pub fn horizon(
        az: AngleArray,
        alt: AngleArray,
        frame: HorizonFrame,
    ) -> Result<Self, FrameError> {
        Self::new(SphericalRepresentation::new(az, alt)?, frame)
    }

    pub fn telescope(
        x: AngleArray,
        y: AngleArray,
        frame: TelescopeFrame,
    ) -> Result<Self, FrameError> {
        Self::new(PlanarRepresentation::new(x, y)?, frame)
    }

    pub fn nominal(x: AngleArray, y: AngleArray, frame: NominalFrame) -> Result<Self, FrameError> {
        Self::new(PlanarRepresentation::new(x, y)?, frame)
    }

    /// Points on the focal plane (`z` = 0).
    pub fn camera(x: LengthArray, y: LengthArray, frame: CameraFrame) -> Result<Self, FrameError> {
        Self::new(CartesianRepresentation::planar(x, y)?, frame)
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn representation(&self) -> &Representation {
        &self.data
    }

    pub fn into_representation(self) -> Representation {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element `index`, in the same frame.
    pub fn get(&self, index: usize) -> Option<Coordinates> {
        self.data.get(index).map(|data| Coordinates {
            frame: self.frame,
            data,
        })
    }

    /// Convert into `dest` with default parameters.
    pub fn transform_to(&self, dest: &Frame) -> Result<Coordinates, FrameError> {
        self.transform_to_with(dest, &TransformParams::default())
    }

    /// Convert into `dest` through the default transform graph.
    ///
    /// See also
    /// ------------
    /// * [`TransformGraph::transform`] – path selection and intermediate frames.
    pub fn transform_to_with(
        &self,
        dest: &Frame,
        params: &TransformParams,
    ) -> Result<Coordinates, FrameError> {
        self.transform_in(TransformGraph::global(), dest, params)
    }

    /// Convert into `dest` through a caller-supplied graph.
    pub fn transform_in(
        &self,
        graph: &TransformGraph,
        dest: &Frame,
        params: &TransformParams,
    ) -> Result<Coordinates, FrameError> {
        let data = graph.transform(&self.data, &self.frame, dest, params)?;
        Ok(Coordinates { frame: *dest, data })
    }
}

/// Convert a bare representation from `source` to `dest` with default parameters.
pub fn convert(
    data: &Representation,
    source: &Frame,
    dest: &Frame,
) -> Result<Representation, FrameError> {
    TransformGraph::global().transform(data, source, dest, &TransformParams::default())
}
