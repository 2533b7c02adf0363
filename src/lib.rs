//! 2D curve geometry kernel underneath a vector editing application.
//!
//! Main features:
//!  - parametric curve variants: line segments, Bezier curves of any
//!    degree, SVG-style elliptical arcs
//!  - affine transforms with composition, inversion and decomposition checks
//!  - axis-value root finding, curve/curve crossings, winding numbers
//!
//! All arithmetic is IEEE double precision with epsilon-based tolerances;
//! every operation is a pure function of its inputs and safe to call from
//! multiple threads.
#![deny(warnings)]

mod arc;
mod curve;
mod geometry;
mod intersect;
mod path;
mod solver;
mod utils;

pub use arc::{EllipArc, Ellipse};
pub use curve::{Bezier, Curve, CurveExtremities, CurveRoots, Line, Segment};
pub use geometry::{
    Axis, BBox, EPSILON, EPSILON_SQRT, Error, PI, Point, Scalar, Transform, scalar_fmt,
};
pub use intersect::{
    CROSSING_TOLERANCE, Crosser, Crossing, CurveId, PathCrossing, crossings_among,
    curve_crossings, curve_crossings_with, curve_self_crossings, path_crossings,
    path_crossings_with, self_crossings, winding,
};
pub use path::{FillRule, Path, PathBuilder, strict_arc};
pub use solver::{MAX_DEPTH, Refine, RootConfig, crossing_count, find_parametric_roots};
use utils::clamp;
