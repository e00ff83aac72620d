//! # Observatory location
//!
//! [`EarthLocation`] is the geodetic position attached to every frame as context. The frame
//! transforms carry it through untouched (no parallax or refraction is modelled), but it is
//! part of frame identity: two Horizon frames at different sites are different frames.

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Meter};
use crate::frame_errors::FrameError;

/// Geodetic site position on the WGS84 ellipsoid.
///
/// Units
/// -----
/// * `longitude`: degrees, east positive.
/// * `latitude`: degrees, in `[-90, 90]`.
/// * `height`: meters above the ellipsoid.
///
/// All fields are `NotNan`, so a location can be hashed and compared exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EarthLocation {
    longitude: NotNan<f64>,
    latitude: NotNan<f64>,
    height: NotNan<f64>,
}

impl EarthLocation {
    /// Create a location from geodetic coordinates.
    ///
    /// Arguments
    /// -----------------
    /// * `longitude`: geodetic longitude in **degrees** (east positive).
    /// * `latitude`: geodetic latitude in **degrees**.
    /// * `height`: height above the WGS84 ellipsoid in **meters**.
    ///
    /// Errors
    /// ----------
    /// * [`FrameError::InvalidLocation`] if any input is NaN or the latitude is outside `[-90, 90]`.
    pub fn new(longitude: Degree, latitude: Degree, height: Meter) -> Result<Self, FrameError> {
        let latitude = NotNan::new(latitude)?;
        if latitude.abs() > 90.0 {
            return Err(FrameError::InvalidLocation(format!(
                "latitude {latitude} deg outside [-90, 90]"
            )));
        }

        Ok(EarthLocation {
            longitude: NotNan::new(longitude)?,
            latitude,
            height: NotNan::new(height)?,
        })
    }

    pub fn longitude(&self) -> Degree {
        self.longitude.into_inner()
    }

    pub fn latitude(&self) -> Degree {
        self.latitude.into_inner()
    }

    pub fn height(&self) -> Meter {
        self.height.into_inner()
    }
}

impl std::fmt::Display for EarthLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(lon {:.6} deg, lat {:.6} deg, h {:.1} m)",
            self.longitude(),
            self.latitude(),
            self.height()
        )
    }
}
