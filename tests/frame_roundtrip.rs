use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use iact_frames::frames::{CameraFrame, HorizonFrame, NominalFrame, TelescopeFrame};
use iact_frames::params::TransformParams;
use iact_frames::projection::{direction_from_offset, offset_from_direction};
use iact_frames::representation::{CartesianRepresentation, Representation};
use iact_frames::transforms::{
    camera_to_telescope, horizon_to_nominal, horizon_to_telescope, nominal_to_horizon,
    nominal_to_telescope, telescope_to_camera, telescope_to_horizon, telescope_to_nominal,
};
use iact_frames::units::{Angle, Length, LengthArray};
use iact_frames::{convert, Frame};

mod common;
use common::{
    as_planar, as_spherical, assert_planar_close, assert_spherical_close, pointing,
    random_offsets, random_pointing,
};

const N: usize = 1000;
const EPS: f64 = 1e-9;

#[test]
fn test_horizon_telescope_round_trip() {
    let mut rng = StdRng::seed_from_u64(42);
    let params = TransformParams::default();

    for _ in 0..5 {
        let tel = TelescopeFrame::new(random_pointing(&mut rng)).unwrap();
        let offsets = random_offsets(&mut rng, N);

        let sky = telescope_to_horizon(&offsets, &tel, &params).unwrap();
        let back = horizon_to_telescope(&sky, &tel, &params).unwrap();
        assert_planar_close(&back, &offsets, EPS);

        let again = telescope_to_horizon(&back, &tel, &params).unwrap();
        assert_spherical_close(&again, &sky, EPS);
    }
}

#[test]
fn test_horizon_nominal_round_trip() {
    let mut rng = StdRng::seed_from_u64(7);
    let params = TransformParams::default();

    for _ in 0..5 {
        let nom = NominalFrame::new(random_pointing(&mut rng)).unwrap();
        let offsets = random_offsets(&mut rng, N);

        let sky = nominal_to_horizon(&offsets, &nom, &params).unwrap();
        let back = horizon_to_nominal(&sky, &nom, &params).unwrap();
        assert_planar_close(&back, &offsets, EPS);
    }
}

#[test]
fn test_telescope_nominal_round_trip() {
    let mut rng = StdRng::seed_from_u64(1234);
    let params = TransformParams::default();

    for _ in 0..5 {
        let array = random_pointing(&mut rng);
        let nom = NominalFrame::new(array).unwrap();
        // divergent pointing: a couple of degrees away from the array pointing
        let tel = TelescopeFrame::new(pointing(
            array.az_radians() + rng.random_range(-0.04..0.04),
            array.alt_radians() + rng.random_range(-0.04..0.04),
        ))
        .unwrap();
        let offsets = random_offsets(&mut rng, N);

        let in_nominal = telescope_to_nominal(&offsets, &tel, &nom, &params).unwrap();
        let back = nominal_to_telescope(&in_nominal, &nom, &tel, &params).unwrap();
        assert_planar_close(&back, &offsets, EPS);
    }
}

#[test]
fn test_camera_telescope_round_trip() {
    let mut rng = StdRng::seed_from_u64(99);
    let params = TransformParams::default();

    for _ in 0..5 {
        let cam = CameraFrame::builder()
            .focal_length(Length::meters(rng.random_range(1.0..40.0)))
            .rotation(Angle::radians(rng.random_range(-3.2..3.2)))
            .build()
            .unwrap();
        let (x, y): (Vec<f64>, Vec<f64>) = (0..N)
            .map(|_| (rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
            .unzip();
        let points =
            CartesianRepresentation::planar(LengthArray::meters(x), LengthArray::meters(y))
                .unwrap();

        let offsets = camera_to_telescope(&points, &cam, &params).unwrap();
        let back = telescope_to_camera(&offsets, &cam, &params).unwrap();
        for i in 0..N {
            assert_abs_diff_eq!(back.x().values[i], points.x().values[i], epsilon = EPS);
            assert_abs_diff_eq!(back.y().values[i], points.y().values[i], epsilon = EPS);
        }
    }
}

#[test]
fn test_kernel_round_trip_random_directions() {
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..N {
        let ref_az = rng.random_range(0.0..std::f64::consts::TAU);
        let ref_alt = rng.random_range(0.2..1.5);
        let az = ref_az + rng.random_range(-0.1..0.1);
        let alt = ref_alt + rng.random_range(-0.1..0.1);

        let (x, y) = offset_from_direction(az, alt, ref_az, ref_alt);
        let (az2, alt2) = direction_from_offset(x, y, ref_az, ref_alt);
        assert_abs_diff_eq!(az2, az, epsilon = EPS);
        assert_abs_diff_eq!(alt2, alt, epsilon = EPS);
    }
}

#[test]
fn test_reference_scenario() {
    let tel: Frame = TelescopeFrame::new(pointing(0.0, 1.2)).unwrap().into();
    let hor: Frame = HorizonFrame::new().into();
    let event: Representation = iact_frames::representation::SphericalRepresentation::scalar(
        Angle::radians(0.001),
        Angle::radians(1.201),
    )
    .into();

    let offset = convert(&event, &hor, &tel).unwrap();
    let p = as_planar(&offset);
    let magnitude = p.x().values[0].hypot(p.y().values[0]);
    assert!(magnitude > 0.0009 && magnitude < 0.0012, "{magnitude}");

    let back = convert(&offset, &tel, &hor).unwrap();
    let s = as_spherical(&back);
    assert_abs_diff_eq!(s.az().values[0], 0.001, epsilon = EPS);
    assert_abs_diff_eq!(s.alt().values[0], 1.201, epsilon = EPS);
}
