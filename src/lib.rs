pub mod constants;
pub mod coordinates;
pub mod frame_errors;
pub mod frames;
pub mod graph;
pub mod location;
pub mod params;
pub mod projection;
pub mod representation;
pub mod transforms;
pub mod units;

pub use coordinates::{convert, Coordinates};
pub use frame_errors::FrameError;
pub use frames::{
    CameraFrame, Frame, FrameKind, HorizonFrame, NominalFrame, ObservationContext, Pointing,
    TelescopeFrame,
};
