//! # Coordinate representations
//!
//! Batch-shaped storage for the values of each frame kind. A representation holds N elements,
//! every component carries its own unit tag, and all components have the same length
//! (checked at construction). A scalar is simply a one-element representation.
//!
//! | Representation | Used by | Components |
//! |---|---|---|
//! | [`SphericalRepresentation`] | Horizon | azimuth, altitude (angles) |
//! | [`PlanarRepresentation`] | Telescope, Nominal | x, y (angles) |
//! | [`CartesianRepresentation`] | Camera | x, y, z (lengths) |

use crate::frame_errors::FrameError;
use crate::frames::FrameKind;
use crate::units::{Angle, AngleArray, Length, LengthArray};

fn same_len(a: usize, b: usize) -> Result<(), FrameError> {
    if a != b {
        return Err(FrameError::ShapeMismatch(a, b));
    }
    Ok(())
}

/// Directions on the unit sphere as (azimuth, altitude).
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalRepresentation {
    az: AngleArray,
    alt: AngleArray,
}

impl SphericalRepresentation {
    pub fn new(az: AngleArray, alt: AngleArray) -> Result<Self, FrameError> {
        same_len(az.len(), alt.len())?;
        Ok(SphericalRepresentation { az, alt })
    }

    pub fn scalar(az: Angle, alt: Angle) -> Self {
        SphericalRepresentation {
            az: az.into(),
            alt: alt.into(),
        }
    }

    pub fn az(&self) -> &AngleArray {
        &self.az
    }

    pub fn alt(&self) -> &AngleArray {
        &self.alt
    }

    pub fn len(&self) -> usize {
        self.az.len()
    }

    pub fn is_empty(&self) -> bool {
        self.az.is_empty()
    }
}

/// Small-angle offsets (x, y) on the tangent plane of a reference direction.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarRepresentation {
    x: AngleArray,
    y: AngleArray,
}

impl PlanarRepresentation {
    pub fn new(x: AngleArray, y: AngleArray) -> Result<Self, FrameError> {
        same_len(x.len(), y.len())?;
        Ok(PlanarRepresentation { x, y })
    }

    pub fn scalar(x: Angle, y: Angle) -> Self {
        PlanarRepresentation {
            x: x.into(),
            y: y.into(),
        }
    }

    pub fn x(&self) -> &AngleArray {
        &self.x
    }

    pub fn y(&self) -> &AngleArray {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Physical positions (x, y, z). In the camera frame `z` is the depth along the optical axis,
/// zero for points on the focal plane.
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianRepresentation {
    x: LengthArray,
    y: LengthArray,
    z: LengthArray,
}

impl CartesianRepresentation {
    pub fn new(x: LengthArray, y: LengthArray, z: LengthArray) -> Result<Self, FrameError> {
        same_len(x.len(), y.len())?;
        same_len(x.len(), z.len())?;
        Ok(CartesianRepresentation { x, y, z })
    }

    /// Points on the focal plane: `z` is zero in the unit of `x`.
    pub fn planar(x: LengthArray, y: LengthArray) -> Result<Self, FrameError> {
        let z = LengthArray::zeros(x.len(), x.unit);
        Self::new(x, y, z)
    }

    pub fn scalar(x: Length, y: Length) -> Self {
        CartesianRepresentation {
            x: x.into(),
            y: y.into(),
            z: Length::new(0.0, x.unit).into(),
        }
    }

    pub fn x(&self) -> &LengthArray {
        &self.x
    }

    pub fn y(&self) -> &LengthArray {
        &self.y
    }

    pub fn z(&self) -> &LengthArray {
        &self.z
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Any representation, as carried by [`Coordinates`](crate::coordinates::Coordinates).
#[derive(Debug, Clone, PartialEq)]
pub enum Representation {
    Spherical(SphericalRepresentation),
    Planar(PlanarRepresentation),
    Cartesian(CartesianRepresentation),
}

impl Representation {
    pub fn name(&self) -> &'static str {
        match self {
            Representation::Spherical(_) => "Spherical",
            Representation::Planar(_) => "Planar",
            Representation::Cartesian(_) => "Cartesian",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Representation::Spherical(r) => r.len(),
            Representation::Planar(r) => r.len(),
            Representation::Cartesian(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether values in this representation may be tagged with a frame of `kind`.
    pub fn fits(&self, kind: FrameKind) -> bool {
        matches!(
            (self, kind),
            (Representation::Spherical(_), FrameKind::Horizon)
                | (Representation::Planar(_), FrameKind::Telescope)
                | (Representation::Planar(_), FrameKind::Nominal)
                | (Representation::Cartesian(_), FrameKind::Camera)
        )
    }

    /// Element `index` as a one-element representation.
    pub fn get(&self, index: usize) -> Option<Representation> {
        if index >= self.len() {
            return None;
        }
        let at = |a: &AngleArray| AngleArray::new(vec![a.values[index]], a.unit);
        let lat = |a: &LengthArray| LengthArray::new(vec![a.values[index]], a.unit);

        Some(match self {
            Representation::Spherical(r) => Representation::Spherical(SphericalRepresentation {
                az: at(&r.az),
                alt: at(&r.alt),
            }),
            Representation::Planar(r) => Representation::Planar(PlanarRepresentation {
                x: at(&r.x),
                y: at(&r.y),
            }),
            Representation::Cartesian(r) => {
                Representation::Cartesian(CartesianRepresentation {
                    x: lat(&r.x),
                    y: lat(&r.y),
                    z: lat(&r.z),
                })
            }
        })
    }
}

impl From<SphericalRepresentation> for Representation {
    fn from(r: SphericalRepresentation) -> Self {
        Representation::Spherical(r)
    }
}

impl From<PlanarRepresentation> for Representation {
    fn from(r: PlanarRepresentation) -> Self {
        Representation::Planar(r)
    }
}

impl From<CartesianRepresentation> for Representation {
    fn from(r: CartesianRepresentation) -> Self {
        Representation::Cartesian(r)
    }
}

#[cfg(test)]
mod representation_test {
    use super::*;
    use crate::units::{AngleUnit, LengthUnit};

    #[test]
    fn test_shape_checks() {
        let res = SphericalRepresentation::new(
            AngleArray::degrees(vec![1.0, 2.0]),
            AngleArray::degrees(vec![1.0]),
        );
        assert_eq!(res, Err(FrameError::ShapeMismatch(2, 1)));

        let res = CartesianRepresentation::new(
            LengthArray::meters(vec![0.1]),
            LengthArray::meters(vec![0.1]),
            LengthArray::meters(vec![]),
        );
        assert_eq!(res, Err(FrameError::ShapeMismatch(1, 0)));
    }

    #[test]
    fn test_planar_camera_points() {
        let cart = CartesianRepresentation::planar(
            LengthArray::new(vec![10.0, -5.0], LengthUnit::Millimeter),
            LengthArray::new(vec![0.0, 2.0], LengthUnit::Millimeter),
        )
        .unwrap();
        assert_eq!(cart.z().values, vec![0.0, 0.0]);
        assert_eq!(cart.z().unit, LengthUnit::Millimeter);
    }

    #[test]
    fn test_fits_frame_kind() {
        let sph: Representation =
            SphericalRepresentation::scalar(Angle::degrees(0.0), Angle::degrees(70.0)).into();
        assert!(sph.fits(FrameKind::Horizon));
        assert!(!sph.fits(FrameKind::Telescope));

        let planar: Representation =
            PlanarRepresentation::scalar(Angle::radians(0.0), Angle::radians(0.0)).into();
        assert!(planar.fits(FrameKind::Telescope));
        assert!(planar.fits(FrameKind::Nominal));
        assert!(!planar.fits(FrameKind::Camera));
    }

    #[test]
    fn test_get_element() {
        let rep: Representation = PlanarRepresentation::new(
            AngleArray::new(vec![0.1, 0.2, 0.3], AngleUnit::Degree),
            AngleArray::new(vec![-0.1, -0.2, -0.3], AngleUnit::Degree),
        )
        .unwrap()
        .into();

        let Some(Representation::Planar(p)) = rep.get(1) else {
            panic!("expected a planar element");
        };
        assert_eq!(p.x().values, vec![0.2]);
        assert_eq!(p.y().values, vec![-0.2]);
        assert_eq!(p.x().unit, AngleUnit::Degree);
        assert!(rep.get(3).is_none());
    }
}
