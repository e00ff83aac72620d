#![allow(dead_code)]

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::Rng;

use iact_frames::frames::Pointing;
use iact_frames::representation::{PlanarRepresentation, Representation, SphericalRepresentation};
use iact_frames::units::{Angle, AngleArray};

/// Pointing at (az, alt) in radians.
pub fn pointing(az: f64, alt: f64) -> Pointing {
    Pointing::new(Angle::radians(az), Angle::radians(alt))
}

/// Random pointing well above the horizon and away from the zenith.
pub fn random_pointing(rng: &mut StdRng) -> Pointing {
    pointing(
        rng.random_range(0.0..std::f64::consts::TAU),
        rng.random_range(0.3..1.4),
    )
}

/// `n` random offsets of a few degrees at most, in radians.
pub fn random_offsets(rng: &mut StdRng, n: usize) -> PlanarRepresentation {
    let max = 0.08;
    let (x, y): (Vec<f64>, Vec<f64>) = (0..n)
        .map(|_| (rng.random_range(-max..max), rng.random_range(-max..max)))
        .unzip();
    PlanarRepresentation::new(AngleArray::radians(x), AngleArray::radians(y)).unwrap()
}

pub fn as_spherical(rep: &Representation) -> &SphericalRepresentation {
    match rep {
        Representation::Spherical(s) => s,
        other => panic!("expected a spherical representation, got {}", other.name()),
    }
}

pub fn as_planar(rep: &Representation) -> &PlanarRepresentation {
    match rep {
        Representation::Planar(p) => p,
        other => panic!("expected a planar representation, got {}", other.name()),
    }
}

/// Component-wise comparison, in radians.
pub fn assert_planar_close(actual: &PlanarRepresentation, expected: &PlanarRepresentation, epsilon: f64) {
    assert_eq!(actual.len(), expected.len());
    let (ax, ay) = (actual.x().to_radians(), actual.y().to_radians());
    let (ex, ey) = (expected.x().to_radians(), expected.y().to_radians());
    for i in 0..actual.len() {
        assert_abs_diff_eq!(ax[i], ex[i], epsilon = epsilon);
        assert_abs_diff_eq!(ay[i], ey[i], epsilon = epsilon);
    }
}

/// Component-wise comparison, in radians. Azimuths are compared modulo 2π.
pub fn assert_spherical_close(
    actual: &SphericalRepresentation,
    expected: &SphericalRepresentation,
    epsilon: f64,
) {
    assert_eq!(actual.len(), expected.len());
    let (aa, aalt) = (actual.az().to_radians(), actual.alt().to_radians());
    let (ea, ealt) = (expected.az().to_radians(), expected.alt().to_radians());
    for i in 0..actual.len() {
        let daz = (aa[i] - ea[i] + std::f64::consts::PI).rem_euclid(std::f64::consts::TAU)
            - std::f64::consts::PI;
        assert_abs_diff_eq!(daz, 0.0, epsilon = epsilon);
        assert_abs_diff_eq!(aalt[i], ealt[i], epsilon = epsilon);
    }
}
