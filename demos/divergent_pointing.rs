//! Divergent pointing: three telescopes fanned out around the array pointing.
//!
//! A shower image centroid seen by each camera is brought into the common nominal frame and
//! onto the sky. Run with `RUST_LOG=iact_frames=debug` to see the paths taken.

use tracing::info;
use tracing_subscriber::EnvFilter;

use iact_frames::coordinates::Coordinates;
use iact_frames::frames::{CameraFrame, Frame, HorizonFrame, NominalFrame, Pointing};
use iact_frames::params::TransformParams;
use iact_frames::representation::Representation;
use iact_frames::units::{Angle, AngleUnit, Length, LengthArray, LengthUnit};
use iact_frames::FrameError;

fn main() -> Result<(), FrameError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let array = Pointing::new(Angle::degrees(180.0), Angle::degrees(70.0));
    let nominal: Frame = NominalFrame::new(array)?.into();
    let horizon: Frame = HorizonFrame::new().into();
    let params = TransformParams::builder()
        .angle_unit(AngleUnit::Degree)
        .normalize_azimuth(true)
        .max_offset(Angle::degrees(10.0))
        .build()?;

    let divergence = [(-1.5, 0.0), (0.0, 1.0), (1.5, 0.0)];
    for (id, (daz, dalt)) in divergence.into_iter().enumerate() {
        let camera = CameraFrame::builder()
            .focal_length(Length::meters(28.0))
            .rotation(Angle::degrees(0.5 * id as f64))
            .telescope_pointing(Pointing::new(
                Angle::degrees(180.0 + daz),
                Angle::degrees(70.0 + dalt),
            ))
            .build()?;

        let centroid = Coordinates::camera(
            LengthArray::new(vec![120.0], LengthUnit::Millimeter),
            LengthArray::new(vec![-45.0], LengthUnit::Millimeter),
            camera,
        )?;

        let in_nominal = centroid.transform_to_with(&nominal, &params)?;
        let on_sky = centroid.transform_to_with(&horizon, &params)?;

        if let (Representation::Planar(p), Representation::Spherical(s)) =
            (in_nominal.representation(), on_sky.representation())
        {
            info!(
                telescope = id,
                nominal_x = %p.x().values[0],
                nominal_y = %p.y().values[0],
                az = %s.az().values[0],
                alt = %s.alt().values[0],
                "centroid (deg)"
            );
        }
    }
    Ok(())
}
