use thiserror::Error;

use crate::frames::FrameKind;

#[derive(Error, Debug, Clone)]
pub enum FrameError {
    #[error("Missing frame attribute `{attribute}` on {frame} frame")]
    MissingFrameAttribute {
        frame: FrameKind,
        attribute: &'static str,
    },

    #[error("Invalid frame attribute `{attribute}` on {frame} frame: {reason}")]
    InvalidFrameAttribute {
        frame: FrameKind,
        attribute: &'static str,
        reason: String,
    },

    #[error("Invalid Earth location: {0}")]
    InvalidLocation(String),

    #[error("No transformation path from {from} frame to {to} frame")]
    UnsupportedFramePair { from: FrameKind, to: FrameKind },

    #[error("{found} representation cannot be tagged with the {frame} frame")]
    RepresentationMismatch {
        frame: FrameKind,
        found: &'static str,
    },

    #[error("Component arrays have different lengths: {0} vs {1}")]
    ShapeMismatch(usize, usize),

    #[error("Invalid transform parameter: {0}")]
    InvalidTransformParameter(String),

    #[error("Target at index {index} lies outside the forward hemisphere of the reference direction")]
    OutsideForwardHemisphere { index: usize },

    #[error("Offset at index {index} is {offset} rad, above the configured bound of {max} rad")]
    OffsetOutOfRange { index: usize, offset: f64, max: f64 },
}

impl From<ordered_float::FloatIsNan> for FrameError {
    fn from(_: ordered_float::FloatIsNan) -> Self {
        FrameError::InvalidLocation("NaN coordinate".into())
    }
}

impl PartialEq for FrameError {
    fn eq(&self, other: &Self) -> bool {
        use FrameError::*;
        match (self, other) {
            (
                MissingFrameAttribute {
                    frame: f1,
                    attribute: a1,
                },
                MissingFrameAttribute {
                    frame: f2,
                    attribute: a2,
                },
            ) => f1 == f2 && a1 == a2,

            // The reason text is informative only: same frame and attribute compare equal
            (
                InvalidFrameAttribute {
                    frame: f1,
                    attribute: a1,
                    ..
                },
                InvalidFrameAttribute {
                    frame: f2,
                    attribute: a2,
                    ..
                },
            ) => f1 == f2 && a1 == a2,

            (UnsupportedFramePair { from: a, to: b }, UnsupportedFramePair { from: c, to: d }) => {
                a == c && b == d
            }
            (
                RepresentationMismatch {
                    frame: f1,
                    found: r1,
                },
                RepresentationMismatch {
                    frame: f2,
                    found: r2,
                },
            ) => f1 == f2 && r1 == r2,
            (InvalidLocation(a), InvalidLocation(b)) => a == b,
            (ShapeMismatch(a, b), ShapeMismatch(c, d)) => a == c && b == d,
            (InvalidTransformParameter(a), InvalidTransformParameter(b)) => a == b,
            (OutsideForwardHemisphere { index: a }, OutsideForwardHemisphere { index: b }) => {
                a == b
            }
            (OffsetOutOfRange { index: a, .. }, OffsetOutOfRange { index: b, .. }) => a == b,

            _ => false,
        }
    }
}
