//! # Transform graph registry
//!
//! Frames are nodes, direct operators are directed edges. A conversion between two frame
//! instances looks up the shortest path of edges between their kinds and applies the operators
//! one after the other, materializing the intermediate frames on the way.
//!
//! The default graph holds the eight built-in edges:
//!
//! ```text
//! Horizon  <-> Telescope
//! Horizon  <-> Nominal
//! Telescope <-> Nominal
//! Camera   <-> Telescope
//! ```
//!
//! so Camera ↔ Horizon and Camera ↔ Nominal compose through the telescope frame. It is built
//! once behind a [`LazyLock`] and never mutated afterwards.
//!
//! Intermediate frames
//! -----------------
//! An intermediate frame takes its attributes from the nearest endpoint that can supply them:
//! the source for the part of the path before Horizon, the destination after it. For example
//! Camera → Horizon goes through a Telescope frame pointed where the camera is pointed; a camera
//! without a pointing therefore fails with [`FrameError::MissingFrameAttribute`].
//!
//! Same-kind conversions
//! -----------------
//! * identical frames: the data is only re-expressed per [`TransformParams`] (output unit,
//!   azimuth wrapping, offset bound),
//! * two Horizon frames: the same relabelling when their contexts agree on every field both
//!   set; [`FrameError::UnsupportedFramePair`] when the time or site differs,
//! * Telescope → Telescope, Nominal → Nominal: through Horizon,
//! * Camera → Camera: through Telescope when both share a pointing, through Horizon otherwise.

use std::collections::{BTreeMap, VecDeque};
use std::sync::LazyLock;

use itertools::Itertools;
use tracing::debug;

use crate::frame_errors::FrameError;
use crate::frames::{Frame, FrameKind, HorizonFrame, NominalFrame, TelescopeFrame};
use crate::params::TransformParams;
use crate::representation::Representation;
use crate::transforms::{self, EdgeFn};

static DEFAULT_GRAPH: LazyLock<TransformGraph> = LazyLock::new(TransformGraph::standard);

/// Built-in operator for a direct edge, if there is one.
pub fn builtin_operator(from: FrameKind, to: FrameKind) -> Option<EdgeFn> {
    use FrameKind::*;

    let op: EdgeFn = match (from, to) {
        (Horizon, Telescope) => transforms::edge_horizon_to_telescope,
        (Telescope, Horizon) => transforms::edge_telescope_to_horizon,
        (Horizon, Nominal) => transforms::edge_horizon_to_nominal,
        (Nominal, Horizon) => transforms::edge_nominal_to_horizon,
        (Telescope, Nominal) => transforms::edge_telescope_to_nominal,
        (Nominal, Telescope) => transforms::edge_nominal_to_telescope,
        (Camera, Telescope) => transforms::edge_camera_to_telescope,
        (Telescope, Camera) => transforms::edge_telescope_to_camera,
        _ => return None,
    };
    Some(op)
}

/// A set of directed edges between frame kinds.
#[derive(Clone, Default)]
pub struct TransformGraph {
    edges: BTreeMap<(FrameKind, FrameKind), EdgeFn>,
}

impl std::fmt::Debug for TransformGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.edges.keys().map(|(from, to)| format!("{from} -> {to}")))
            .finish()
    }
}

impl TransformGraph {
    /// Graph with no edge at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph with the eight built-in edges.
    pub fn standard() -> Self {
        let mut graph = Self::new();
        for (from, to) in FrameKind::ALL.into_iter().cartesian_product(FrameKind::ALL) {
            if let Some(op) = builtin_operator(from, to) {
                graph.register(from, to, op);
            }
        }
        graph
    }

    /// The process-wide default graph.
    pub fn global() -> &'static TransformGraph {
        &DEFAULT_GRAPH
    }

    /// Graph restricted to the given built-in edges.
    ///
    /// Errors
    /// -----------------
    /// * [`FrameError::UnsupportedFramePair`] if a pair has no built-in operator.
    pub fn from_edges<I>(edges: I) -> Result<Self, FrameError>
    where
        I: IntoIterator<Item = (FrameKind, FrameKind)>,
    {
        let mut graph = Self::new();
        for (from, to) in edges {
            let op =
                builtin_operator(from, to).ok_or(FrameError::UnsupportedFramePair { from, to })?;
            graph.register(from, to, op);
        }
        Ok(graph)
    }

    /// Add (or replace) the operator of the edge `from -> to`.
    pub fn register(&mut self, from: FrameKind, to: FrameKind, op: EdgeFn) {
        self.edges.insert((from, to), op);
    }

    pub fn has_edge(&self, from: FrameKind, to: FrameKind) -> bool {
        self.edges.contains_key(&(from, to))
    }

    /// Registered edges, in a stable order.
    pub fn edges(&self) -> impl Iterator<Item = (FrameKind, FrameKind)> + '_ {
        self.edges.keys().copied()
    }

    fn operator(&self, from: FrameKind, to: FrameKind) -> Result<EdgeFn, FrameError> {
        self.edges
            .get(&(from, to))
            .copied()
            .ok_or(FrameError::UnsupportedFramePair { from, to })
    }

    /// Shortest sequence of kinds leading from `from` to `to`, both included.
    ///
    /// Breadth-first over the registered edges; ties are broken by the order of [`FrameKind`].
    /// `path(k, k)` is `Some(vec![k])`.
    pub fn path(&self, from: FrameKind, to: FrameKind) -> Option<Vec<FrameKind>> {
        let mut previous: BTreeMap<FrameKind, FrameKind> = BTreeMap::new();
        let mut queue = VecDeque::from([from]);

        while let Some(node) = queue.pop_front() {
            if node == to {
                let mut path = vec![to];
                let mut cursor = to;
                while let Some(&p) = previous.get(&cursor) {
                    path.push(p);
                    cursor = p;
                }
                path.reverse();
                return Some(path);
            }
            for (_, next) in self.edges.keys().filter(|(f, _)| *f == node) {
                if *next != from && !previous.contains_key(next) {
                    previous.insert(*next, node);
                    queue.push_back(*next);
                }
            }
        }
        None
    }

    fn path_via(&self, from: FrameKind, via: FrameKind, to: FrameKind) -> Option<Vec<FrameKind>> {
        let mut first = self.path(from, via)?;
        let second = self.path(via, to)?;
        first.extend_from_slice(&second[1..]);
        Some(first)
    }

    /// Kinds traversed when converting `source` into `dest`.
    fn route(&self, source: &Frame, dest: &Frame) -> Result<Vec<FrameKind>, FrameError> {
        let (from, to) = (source.kind(), dest.kind());
        let unsupported = FrameError::UnsupportedFramePair { from, to };

        let path = match (source, dest) {
            (Frame::Horizon(_), Frame::Horizon(_)) => None,
            (Frame::Telescope(_), Frame::Telescope(_)) | (Frame::Nominal(_), Frame::Nominal(_)) => {
                self.path_via(from, FrameKind::Horizon, to)
            }
            (Frame::Camera(a), Frame::Camera(b)) => {
                if a.telescope_pointing() == b.telescope_pointing() {
                    self.path_via(from, FrameKind::Telescope, to)
                } else {
                    self.path_via(from, FrameKind::Horizon, to)
                }
            }
            _ => self.path(from, to),
        };
        path.ok_or(unsupported)
    }

    /// Convert `data`, expressed in `source`, into `dest`.
    ///
    /// Arguments
    /// -----------------
    /// * `data`: values in the representation of `source`.
    /// * `source`, `dest`: the frame instances at both ends.
    /// * `params`: output units and opt-in checks, applied on every edge.
    ///
    /// Return
    /// -----------------
    /// * The values in the representation of `dest`, same number of elements.
    ///
    /// Errors
    /// -----------------
    /// * [`FrameError::RepresentationMismatch`] if `data` does not fit `source`.
    /// * [`FrameError::UnsupportedFramePair`] if no path joins the two kinds.
    /// * [`FrameError::MissingFrameAttribute`] if an intermediate frame cannot be derived.
    /// * Any error of the operators along the path.
    pub fn transform(
        &self,
        data: &Representation,
        source: &Frame,
        dest: &Frame,
        params: &TransformParams,
    ) -> Result<Representation, FrameError> {
        if !data.fits(source.kind()) {
            return Err(FrameError::RepresentationMismatch {
                frame: source.kind(),
                found: data.name(),
            });
        }
        if source == dest {
            debug!(frame = %source.kind(), "identical frames, relabel only");
            return transforms::relabel(data, params);
        }
        if let (Frame::Horizon(a), Frame::Horizon(b)) = (source, dest) {
            if a.context().conflicts_with(b.context()) {
                return Err(FrameError::UnsupportedFramePair {
                    from: FrameKind::Horizon,
                    to: FrameKind::Horizon,
                });
            }
            debug!("horizon frames with compatible context, relabel only");
            return transforms::relabel(data, params);
        }

        let path = self.route(source, dest)?;
        debug!(path = %path.iter().join(" -> "), n = data.len(), "frame conversion");

        if let (Frame::Camera(_), Frame::Camera(_), [_, FrameKind::Telescope, _]) =
            (source, dest, path.as_slice())
        {
            // shared pointing, possibly none: the telescope frame is never materialized
            let offset = self.operator(FrameKind::Camera, FrameKind::Telescope)?;
            let back = self.operator(FrameKind::Telescope, FrameKind::Camera)?;
            let planar = offset(data, source, dest, params)?;
            return back(&planar, source, dest, params);
        }

        let horizon_at = path.iter().position(|k| *k == FrameKind::Horizon);
        let last = path.len() - 1;
        let mut frames = Vec::with_capacity(path.len());
        for (i, kind) in path.iter().enumerate() {
            let frame = match i {
                0 => *source,
                i if i == last => *dest,
                i => intermediate_frame(*kind, i, horizon_at, source, dest)?,
            };
            frames.push(frame);
        }

        let mut current = data.clone();
        for (from, to) in frames.iter().tuple_windows() {
            let op = self.operator(from.kind(), to.kind())?;
            current = op(&current, from, to, params)?;
        }
        Ok(current)
    }
}

/// Build the frame of kind `kind` standing at position `index` of a path.
fn intermediate_frame(
    kind: FrameKind,
    index: usize,
    horizon_at: Option<usize>,
    source: &Frame,
    dest: &Frame,
) -> Result<Frame, FrameError> {
    let (near, far) = match horizon_at {
        Some(h) if index < h => (source, dest),
        Some(_) => (dest, source),
        // no Horizon on the path: the endpoint carrying the attribute is the one to ask
        None => {
            let carries = |f: &Frame| match kind {
                FrameKind::Telescope => f.telescope_pointing().is_some(),
                FrameKind::Nominal => f.reference_point().is_some(),
                _ => true,
            };
            if carries(source) || !carries(dest) {
                (source, dest)
            } else {
                (dest, source)
            }
        }
    };
    let context = near.context().or(*far.context());

    let frame: Frame = match kind {
        FrameKind::Horizon => {
            HorizonFrame::from_context(source.context().or(*dest.context())).into()
        }
        FrameKind::Telescope => {
            let pointing = near
                .telescope_pointing()
                .ok_or(FrameError::MissingFrameAttribute {
                    frame: near.kind(),
                    attribute: "telescope_pointing",
                })?;
            TelescopeFrame::builder()
                .telescope_pointing(*pointing)
                .context(context)
                .build()?
                .into()
        }
        FrameKind::Nominal => {
            let reference_point = near
                .reference_point()
                .ok_or(FrameError::MissingFrameAttribute {
                    frame: near.kind(),
                    attribute: "reference_point",
                })?;
            NominalFrame::builder()
                .reference_point(*reference_point)
                .context(context)
                .build()?
                .into()
        }
        // a camera has no attribute to borrow from another frame kind
        FrameKind::Camera => {
            return Err(FrameError::UnsupportedFramePair {
                from: source.kind(),
                to: dest.kind(),
            })
        }
    };
    Ok(frame)
}

#[cfg(test)]
mod graph_test {
    use super::*;
    use crate::frames::{CameraFrame, Pointing};
    use crate::location::EarthLocation;
    use crate::representation::{
        CartesianRepresentation, PlanarRepresentation, SphericalRepresentation,
    };
    use crate::units::{Angle, AngleUnit, Length};
    use FrameKind::*;

    #[test]
    fn test_standard_edges() {
        let graph = TransformGraph::standard();
        assert_eq!(graph.edges().count(), 8);
        assert!(graph.has_edge(Camera, Telescope));
        assert!(!graph.has_edge(Camera, Horizon));
        assert!(!graph.has_edge(Camera, Nominal));
    }

    #[test]
    fn test_shortest_paths() {
        let graph = TransformGraph::global();
        assert_eq!(graph.path(Horizon, Telescope), Some(vec![Horizon, Telescope]));
        assert_eq!(
            graph.path(Camera, Horizon),
            Some(vec![Camera, Telescope, Horizon])
        );
        assert_eq!(
            graph.path(Nominal, Camera),
            Some(vec![Nominal, Telescope, Camera])
        );
        assert_eq!(graph.path(Nominal, Nominal), Some(vec![Nominal]));
    }

    #[test]
    fn test_from_edges_rejects_unknown_pair() {
        assert_eq!(
            TransformGraph::from_edges([(Horizon, Telescope), (Camera, Horizon)]).unwrap_err(),
            FrameError::UnsupportedFramePair {
                from: Camera,
                to: Horizon
            }
        );
    }

    #[test]
    fn test_graph_without_camera_edges() {
        let graph = TransformGraph::from_edges([
            (Horizon, Telescope),
            (Telescope, Horizon),
            (Horizon, Nominal),
            (Nominal, Horizon),
        ])
        .unwrap();
        assert_eq!(graph.path(Camera, Horizon), None);
        assert_eq!(graph.path(Telescope, Nominal), Some(vec![Telescope, Horizon, Nominal]));

        let cam: Frame = CameraFrame::new(Length::meters(28.0)).unwrap().into();
        let hor: Frame = HorizonFrame::new().into();
        let data: Representation =
            CartesianRepresentation::scalar(Length::meters(0.01), Length::meters(0.0)).into();

        assert_eq!(
            graph.transform(&data, &cam, &hor, &TransformParams::default()),
            Err(FrameError::UnsupportedFramePair {
                from: Camera,
                to: Horizon
            })
        );
    }

    #[test]
    fn test_unpointed_cameras() {
        let graph = TransformGraph::global();
        let params = TransformParams::default();
        let a: Frame = CameraFrame::new(Length::meters(28.0)).unwrap().into();
        let b: Frame = CameraFrame::builder()
            .focal_length(Length::meters(14.0))
            .build()
            .unwrap()
            .into();
        let data: Representation =
            CartesianRepresentation::scalar(Length::meters(0.02), Length::meters(-0.04)).into();

        // same (absent) pointing: only the optics change
        let Representation::Cartesian(out) = graph.transform(&data, &a, &b, &params).unwrap()
        else {
            panic!("expected a cartesian result");
        };
        assert!((out.x().values[0] - 0.01).abs() < 1e-15);
        assert!((out.y().values[0] + 0.02).abs() < 1e-15);

        // reaching the sky needs the pointing
        assert_eq!(
            graph.transform(&data, &a, &HorizonFrame::new().into(), &params),
            Err(FrameError::MissingFrameAttribute {
                frame: Camera,
                attribute: "telescope_pointing"
            })
        );
    }

    #[test]
    fn test_intermediate_telescope_on_destination_side() {
        let pointing = Pointing::new(Angle::radians(0.3), Angle::radians(1.0));
        let nom: Frame = NominalFrame::new(pointing).unwrap().into();
        let cam: Frame = CameraFrame::builder()
            .focal_length(Length::meters(28.0))
            .telescope_pointing(pointing)
            .build()
            .unwrap()
            .into();
        let data: Representation =
            PlanarRepresentation::scalar(Angle::radians(0.001), Angle::radians(0.002)).into();

        let Representation::Cartesian(out) = TransformGraph::global()
            .transform(&data, &nom, &cam, &TransformParams::default())
            .unwrap()
        else {
            panic!("expected a cartesian result");
        };
        // same pointing for array and telescope: the offset is only scaled
        assert!((out.x().values[0] - 0.028).abs() < 1e-12);
        assert!((out.y().values[0] - 0.056).abs() < 1e-12);
    }

    #[test]
    fn test_identical_frames_honour_params() {
        let graph = TransformGraph::global();
        let hor: Frame = HorizonFrame::new().into();
        let sky: Representation =
            SphericalRepresentation::scalar(Angle::radians(-0.5), Angle::radians(1.0)).into();
        let params = TransformParams::builder()
            .angle_unit(AngleUnit::Degree)
            .normalize_azimuth(true)
            .build()
            .unwrap();

        let Representation::Spherical(out) = graph.transform(&sky, &hor, &hor, &params).unwrap()
        else {
            panic!("expected a spherical result");
        };
        assert_eq!(out.az().unit, AngleUnit::Degree);
        assert!((out.az().values[0] - (360.0 - 0.5f64.to_degrees())).abs() < 1e-9);

        let tel: Frame = TelescopeFrame::new(Pointing::new(
            Angle::radians(0.0),
            Angle::radians(1.0),
        ))
        .unwrap()
        .into();
        let offset: Representation =
            PlanarRepresentation::scalar(Angle::radians(0.5), Angle::radians(0.0)).into();
        let bounded = TransformParams::builder()
            .max_offset(Angle::radians(0.1))
            .build()
            .unwrap();
        assert!(matches!(
            graph.transform(&offset, &tel, &tel, &bounded),
            Err(FrameError::OffsetOutOfRange { index: 0, .. })
        ));
    }

    #[test]
    fn test_horizon_frames_with_unset_context() {
        let graph = TransformGraph::global();
        let site = EarthLocation::new(-17.892, 28.7615, 2200.0).unwrap();
        let bare: Frame = HorizonFrame::new().into();
        let located: Frame = HorizonFrame::new().with_location(site).into();
        let sky: Representation =
            SphericalRepresentation::scalar(Angle::degrees(120.0), Angle::degrees(60.0)).into();
        let params = TransformParams::default();

        assert_eq!(graph.transform(&sky, &bare, &located, &params).unwrap(), sky);
        assert_eq!(graph.transform(&sky, &located, &bare, &params).unwrap(), sky);

        let elsewhere: Frame = HorizonFrame::new()
            .with_location(EarthLocation::new(16.5, -23.27, 1800.0).unwrap())
            .into();
        assert_eq!(
            graph.transform(&sky, &located, &elsewhere, &params),
            Err(FrameError::UnsupportedFramePair {
                from: Horizon,
                to: Horizon
            })
        );
    }

    #[test]
    fn test_representation_checked_against_source() {
        let tel: Frame = TelescopeFrame::new(Pointing::new(
            Angle::radians(0.0),
            Angle::radians(1.0),
        ))
        .unwrap()
        .into();
        let data: Representation =
            CartesianRepresentation::scalar(Length::meters(0.0), Length::meters(0.0)).into();

        assert_eq!(
            TransformGraph::global().transform(
                &data,
                &tel,
                &HorizonFrame::new().into(),
                &TransformParams::default()
            ),
            Err(FrameError::RepresentationMismatch {
                frame: Telescope,
                found: "Cartesian"
            })
        );
    }
}
