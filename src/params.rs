//! # Transform parameters
//!
//! [`TransformParams`] gathers the knobs of a conversion that are not frame attributes: the
//! unit of the output, whether horizon azimuths are wrapped, and two opt-in validity checks on
//! the small-angle regime. The defaults reproduce the plain behavior of the operators.
//!
//! ```rust
//! use iact_frames::params::TransformParams;
//! use iact_frames::units::{Angle, AngleUnit};
//!
//! let params = TransformParams::builder()
//!     .angle_unit(AngleUnit::Degree)
//!     .normalize_azimuth(true)
//!     .max_offset(Angle::degrees(10.0))
//!     .build()
//!     .unwrap();
//! assert!(params.normalize_azimuth);
//! ```
//!
//! The struct is `serde`-serializable so that a pipeline can keep it in its own configuration
//! files.

use serde::{Deserialize, Serialize};

use crate::frame_errors::FrameError;
use crate::units::{Angle, AngleUnit, LengthUnit};

/// Configuration of a frame conversion.
///
/// Fields
/// -----------------
/// * `angle_unit`: unit of every angle in the output. `None` keeps the operator's own choice
///   (Horizon output follows the reference pointing azimuth, offsets follow the input).
/// * `length_unit`: unit of camera-frame output. `None` uses the focal length's unit.
/// * `normalize_azimuth`: wrap Horizon azimuths into `[0, 2π)`. Off by default: the raw output
///   of the inverse projection is `ref_az + (-π, π]`.
/// * `require_forward_hemisphere`: reject targets more than 90° away from the reference
///   direction instead of producing an undefined offset.
/// * `max_offset`: reject offsets (produced or consumed) whose magnitude exceeds this bound.
///
/// Defaults
/// -----------------
/// * `angle_unit`: `None`
/// * `length_unit`: `None`
/// * `normalize_azimuth`: `false`
/// * `require_forward_hemisphere`: `false`
/// * `max_offset`: `None`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformParams {
    pub angle_unit: Option<AngleUnit>,
    pub length_unit: Option<LengthUnit>,
    pub normalize_azimuth: bool,
    pub require_forward_hemisphere: bool,
    pub max_offset: Option<Angle>,
}

impl TransformParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> TransformParamsBuilder {
        TransformParamsBuilder::new()
    }

    /// Re-run the builder validation, e.g. on a deserialized value.
    pub fn validate(&self) -> Result<(), FrameError> {
        if let Some(max) = &self.max_offset {
            let rad = max.to_radians();
            if !(rad.is_finite() && rad > 0.0) {
                return Err(FrameError::InvalidTransformParameter(format!(
                    "max_offset must be finite and > 0, got {max}"
                )));
            }
        }
        Ok(())
    }
}

/// Builder for [`TransformParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct TransformParamsBuilder {
    params: TransformParams,
}

impl TransformParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: TransformParams::default(),
        }
    }

    pub fn angle_unit(mut self, v: AngleUnit) -> Self {
        self.params.angle_unit = Some(v);
        self
    }
    pub fn length_unit(mut self, v: LengthUnit) -> Self {
        self.params.length_unit = Some(v);
        self
    }
    pub fn normalize_azimuth(mut self, v: bool) -> Self {
        self.params.normalize_azimuth = v;
        self
    }
    pub fn require_forward_hemisphere(mut self, v: bool) -> Self {
        self.params.require_forward_hemisphere = v;
        self
    }
    pub fn max_offset(mut self, v: Angle) -> Self {
        self.params.max_offset = Some(v);
        self
    }

    /// Finalize the builder.
    ///
    /// Errors
    /// -----------------
    /// * [`FrameError::InvalidTransformParameter`] if `max_offset` is set but not finite and
    ///   strictly positive.
    pub fn build(self) -> Result<TransformParams, FrameError> {
        self.params.validate()?;
        Ok(self.params)
    }
}

#[cfg(test)]
mod params_test {
    use super::*;

    #[test]
    fn test_default_params() {
        let p = TransformParams::builder().build().unwrap();
        assert_eq!(p, TransformParams::default());
        assert!(!p.normalize_azimuth);
        assert!(!p.require_forward_hemisphere);
        assert!(p.max_offset.is_none());
    }

    #[test]
    fn test_invalid_max_offset() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let res = TransformParams::builder()
                .max_offset(Angle::radians(bad))
                .build();
            assert!(
                matches!(res, Err(FrameError::InvalidTransformParameter(_))),
                "max_offset {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_builder_sets_fields() {
        let p = TransformParams::builder()
            .angle_unit(AngleUnit::Degree)
            .length_unit(LengthUnit::Millimeter)
            .require_forward_hemisphere(true)
            .max_offset(Angle::degrees(5.0))
            .build()
            .unwrap();
        assert_eq!(p.angle_unit, Some(AngleUnit::Degree));
        assert_eq!(p.length_unit, Some(LengthUnit::Millimeter));
        assert!(p.require_forward_hemisphere);
        assert_eq!(p.max_offset, Some(Angle::degrees(5.0)));
    }
}
