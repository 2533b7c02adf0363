//! Root finding for curves in Bernstein-Bezier form
//!
//! Works on a parametric control polygon where the x component carries the
//! curve parameter and the y component carries the value whose zeros are
//! requested. Subdivision isolates intervals with at most one sign change
//! of the control polygon, then a clamped secant (or chord) step refines.

use crate::{
    Axis, Point, Scalar,
    curve::{CurveRoots, bezier_at, bezier_split_half},
    utils::clamp,
};

/// Refinement used once a root is isolated to a single-crossing interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refine {
    /// Secant iteration with steps confined to [1/8, 7/8] of the bracket
    Secant,
    /// Subdivide until the control polygon is flat, then intersect the chord
    Chord,
}

/// Root solver configuration
///
/// Passed explicitly into every solve call; the solver keeps no process
/// wide state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootConfig {
    pub refine: Refine,
    /// Maximum subdivision depth, past it the midpoint is reported as a
    /// best-effort estimate instead of failing
    pub max_depth: u32,
}

pub const MAX_DEPTH: u32 = 64;

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            refine: Refine::Secant,
            max_depth: MAX_DEPTH,
        }
    }
}

impl RootConfig {
    /// Interval width below which refinement stops
    fn tolerance(&self) -> Scalar {
        (2.0 as Scalar).powi(-(self.max_depth as i32) - 1)
    }
}

/// Sign class of a control value: negative vs non-negative
#[inline]
fn is_negative(v: Scalar) -> bool {
    v < 0.0
}

/// Number of sign changes across consecutive control polygon values
///
/// This is an upper bound on the number of roots of the curve itself,
/// which is what justifies recursive splitting: zero changes proves the
/// absence of roots, one change makes the interval a refinement candidate.
pub fn crossing_count(w: &[Point]) -> usize {
    let mut crossings = 0;
    let mut old_sign = is_negative(w[0].y());
    for point in &w[1..] {
        let sign = is_negative(point.y());
        if sign != old_sign {
            crossings += 1;
        }
        old_sign = sign;
    }
    crossings
}

/// Find all zeros of the parametric control polygon
///
/// Solutions are the x components at the found roots, pushed into `out` in
/// subdivision order (left to right).
pub fn find_parametric_roots(w: &[Point], cfg: &RootConfig, out: &mut CurveRoots) {
    find_roots_rec(w, cfg, 0, out)
}

fn find_roots_rec(w: &[Point], cfg: &RootConfig, depth: u32, out: &mut CurveRoots) {
    let degree = w.len() - 1;
    match crossing_count(w) {
        0 => return,
        1 => {
            // unique candidate in this interval
            if depth >= cfg.max_depth {
                out.push((w[0].x() + w[degree].x()) / 2.0);
                return;
            }
            match cfg.refine {
                Refine::Secant => {
                    secant_refine(w, cfg, out);
                    return;
                }
                Refine::Chord => {
                    if control_poly_flat_enough(w, cfg.tolerance()) {
                        out.push(chord_intercept(w));
                        return;
                    }
                }
            }
        }
        _ => {
            if depth >= cfg.max_depth {
                out.push((w[0].x() + w[degree].x()) / 2.0);
                return;
            }
        }
    }

    // solve recursively after subdividing the control polygon
    let (left, right) = bezier_split_half(w);
    find_roots_rec(&left, cfg, depth + 1, out);
    find_roots_rec(&right, cfg, depth + 1, out);
}

/// Refine a single-crossing interval with a clamped secant iteration
///
/// The step fraction is kept inside [1/8, 7/8] of the current bracket so a
/// near-tangential crossing cannot stall progress; the bracket therefore
/// shrinks by a guaranteed factor each round.
fn secant_refine(w: &[Point], cfg: &RootConfig, out: &mut CurveRoots) {
    let degree = w.len() - 1;
    let mut left_t = 0.0;
    let mut right_t = 1.0;
    let mut left_y = w[0].y();
    let mut right_y = w[degree].y();
    if is_negative(left_y) == is_negative(right_y) {
        // crossing lies strictly inside, the chord carries no information
        out.push(chord_intercept(w));
        return;
    }

    // the clamped step shrinks the bracket by at least 1/8 per round, so
    // this budget drives it to the floating point floor
    let budget = 8 * cfg.max_depth.max(1);
    let tolerance = cfg.tolerance();
    let mut converged = false;
    for _ in 0..budget {
        let dt = clamp(left_y / (left_y - right_y), 0.125, 0.875);
        let t = left_t + dt * (right_t - left_t);
        if t <= left_t || t >= right_t {
            // bracket collapsed to adjacent representable values
            converged = true;
            break;
        }
        let y = bezier_at(w, t).y();
        if is_negative(y) == is_negative(left_y) {
            left_t = t;
            left_y = y;
        } else {
            right_t = t;
            right_y = y;
        }
        if right_t - left_t <= tolerance {
            converged = true;
            break;
        }
    }

    let t = if converged {
        (left_t + right_t) / 2.0
    } else {
        // linear-chord estimate over the final bracket
        left_t + left_y / (left_y - right_y) * (right_t - left_t)
    };
    out.push(bezier_at(w, t).x());
}

/// Check if the control polygon is flat enough to intersect its chord
fn control_poly_flat_enough(w: &[Point], tolerance: Scalar) -> bool {
    let degree = w.len() - 1;
    // implicit equation of the line connecting first and last control points
    let a = w[0].y() - w[degree].y();
    let b = w[degree].x() - w[0].x();
    let c = w[0].x() * w[degree].y() - w[degree].x() * w[0].y();
    let ab_sq = a * a + b * b;
    if a.abs() < crate::EPSILON || ab_sq < crate::EPSILON {
        return false;
    }

    let mut max_above: Scalar = 0.0;
    let mut max_below: Scalar = 0.0;
    for point in &w[1..degree] {
        let d = a * point.x() + b * point.y() + c;
        let dist = d * d / ab_sq;
        if d < 0.0 {
            max_below = max_below.min(-dist);
        } else {
            max_above = max_above.max(dist);
        }
    }

    let intercept_0 = (c + max_above) / -a;
    let intercept_1 = (c + max_below) / -a;
    let error = 0.5 * (intercept_0.max(intercept_1) - intercept_0.min(intercept_1));
    error < tolerance
}

/// Intersect the chord from the first to the last control point with y = 0
fn chord_intercept(w: &[Point]) -> Scalar {
    let degree = w.len() - 1;
    let a = w[degree] - w[0];
    if a.y().abs() < crate::EPSILON {
        return (w[0].x() + w[degree].x()) / 2.0;
    }
    (a.x() * w[0].y() - a.y() * w[0].x()) / -a.y()
}

/// Find all parameters where `ctrl[axis] == v` for a Bezier control polygon
pub(crate) fn bezier_axis_roots(
    ctrl: &[Point],
    v: Scalar,
    axis: Axis,
    cfg: &RootConfig,
) -> CurveRoots {
    let degree = ctrl.len() - 1;
    let mut w = smallvec::SmallVec::<[Point; 8]>::with_capacity(ctrl.len());
    for (i, point) in ctrl.iter().enumerate() {
        w.push(Point::new(
            i as Scalar / degree as Scalar,
            point.coord(axis) - v,
        ));
    }
    let mut out = CurveRoots::new();
    find_parametric_roots(&w, cfg, &mut out);
    out.retain(|t| (0.0..=1.0).contains(t));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_single_root() {
        // symmetric cubic crossing y = 0 exactly at t = 0.5
        let ctrl = [
            Point::new(0.0, -1.0),
            Point::new(1.0, -1.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let cfg = RootConfig::default();
        let roots = bezier_axis_roots(&ctrl, 0.0, Axis::Y, &cfg);
        assert_eq!(roots.len(), 1);
        assert_approx_eq!(roots[0], 0.5, 1e-6);
    }

    #[test]
    fn test_chord_refine() {
        let ctrl = [
            Point::new(0.0, -1.0),
            Point::new(1.0, -1.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let cfg = RootConfig {
            refine: Refine::Chord,
            ..RootConfig::default()
        };
        let roots = bezier_axis_roots(&ctrl, 0.0, Axis::Y, &cfg);
        assert_eq!(roots.len(), 1);
        assert_approx_eq!(roots[0], 0.5, 1e-6);
    }

    #[test]
    fn test_three_roots() {
        // wiggly cubic with three y-axis crossings
        let ctrl = [
            Point::new(0.0, -2.0),
            Point::new(1.0 / 3.0, 6.0),
            Point::new(2.0 / 3.0, -7.0),
            Point::new(1.0, 2.0),
        ];
        let cfg = RootConfig::default();
        let mut roots = bezier_axis_roots(&ctrl, 0.0, Axis::Y, &cfg);
        roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(roots.len(), 3);
        for root in roots {
            let y = bezier_at(&ctrl, root).y();
            assert_approx_eq!(y, 0.0, 1e-6);
        }
    }

    #[test]
    fn test_no_roots() {
        let ctrl = [
            Point::new(0.0, 1.0),
            Point::new(0.5, 2.0),
            Point::new(1.0, 3.0),
        ];
        let cfg = RootConfig::default();
        assert!(bezier_axis_roots(&ctrl, 0.0, Axis::Y, &cfg).is_empty());
    }

    #[test]
    fn test_depth_exhaustion_best_effort() {
        // with no depth budget the solver must still report its midpoint
        // estimate instead of failing or returning nothing
        let w = [
            Point::new(0.0, -1.0),
            Point::new(0.5, 3.0),
            Point::new(1.0, 1.0),
        ];
        let cfg = RootConfig {
            max_depth: 0,
            ..RootConfig::default()
        };
        let mut out = CurveRoots::new();
        find_parametric_roots(&w, &cfg, &mut out);
        assert_eq!(out.len(), 1);
        assert_approx_eq!(out[0], 0.5);
    }

    #[test]
    fn test_crossing_count() {
        let w = [
            Point::new(0.0, -1.0),
            Point::new(0.5, 1.0),
            Point::new(1.0, -1.0),
        ];
        assert_eq!(crossing_count(&w), 2);
        let w = [Point::new(0.0, 1.0), Point::new(1.0, 2.0)];
        assert_eq!(crossing_count(&w), 0);
    }
}
