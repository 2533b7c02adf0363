//! Curve crossings, sweep-line candidate search and winding numbers
//!
//! Two interchangeable strategies sit behind one entry point: a simple
//! recursive bounding-box subdivision and a sweep over monotonic sections
//! with per-variant precise intersection. Sections and sweep events are
//! scratch state scoped to a single query.

use crate::{
    Axis, BBox, Curve, EPSILON, Line, Path, Point, Scalar, Segment, Transform,
};
use std::fmt;

/// Parameters closer than this are considered the same crossing
pub const CROSSING_TOLERANCE: Scalar = 1e-6;

/// Geometric size at which subdivision bottoms out
const SUBDIVIDE_TOLERANCE: Scalar = 1e-7;

/// Backstop for pathological (overlapping) inputs
const MAX_CROSSINGS: usize = 256;

/// A matched pair of parameter values denoting a shared point of two curves
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crossing {
    /// Parameter on the first curve, in [0, 1]
    pub ta: Scalar,
    /// Parameter on the second curve, in [0, 1]
    pub tb: Scalar,
}

impl Crossing {
    pub fn new(ta: Scalar, tb: Scalar) -> Self {
        Self { ta, tb }
    }

    /// The same crossing seen from the other curve
    pub fn swapped(self) -> Self {
        Self {
            ta: self.tb,
            tb: self.ta,
        }
    }
}

/// Identity of a curve inside a set of paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveId {
    pub path: usize,
    pub curve: usize,
}

/// A crossing between two identified curves of one or more paths
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathCrossing {
    pub a: CurveId,
    pub b: CurveId,
    pub at: Crossing,
}

/// Intersection strategy
///
/// A plain value passed into the query, never process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Crosser {
    /// Recursive bounding-box subdivision of both curves
    Subdivide,
    /// Sweep over monotonic sections with precise per-pair intersection
    #[default]
    Sweep,
}

impl fmt::Display for Crosser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crosser::Subdivide => write!(f, "subdivide"),
            Crosser::Sweep => write!(f, "sweep"),
        }
    }
}

// -----------------------------------------------------------------------------
// Sections and sweep
// -----------------------------------------------------------------------------

/// Monotonic fragment of a curve
///
/// Within a section the motion along both axes is monotonic, so its
/// bounding box is exactly the rectangle spanned by its endpoints.
struct Section {
    curve: usize,
    f: Scalar,
    t: Scalar,
    bbox: BBox,
}

impl Section {
    fn new(segment: &Segment, curve: usize, f: Scalar, t: Scalar) -> Self {
        let from = segment.at(f);
        let to = segment.at(t);
        Self {
            curve,
            f,
            t,
            bbox: BBox::new(from, to),
        }
    }

    /// Map a section-local parameter back to the parent curve
    fn to_parent(&self, local: Scalar) -> Scalar {
        crate::clamp(self.f + local * (self.t - self.f), 0.0, 1.0)
    }

    /// Whether two sections of the same curve share a parameter boundary
    fn is_adjacent(&self, other: &Section) -> bool {
        self.curve == other.curve
            && ((self.t - other.f).abs() < CROSSING_TOLERANCE
                || (other.t - self.f).abs() < CROSSING_TOLERANCE)
    }
}

/// The curves of a path, with the implicit closing line materialized
fn curves_of(path: &Path) -> Vec<Segment> {
    let mut curves: Vec<Segment> = path.segments().to_vec();
    if let Some(closing) = path.closing_segment() {
        curves.push(closing.into());
    }
    curves
}

/// Split every curve into monotonic sections at its turning parameters
fn monotonic_sections(curves: &[Segment]) -> Vec<Section> {
    let mut sections = Vec::new();
    for (index, segment) in curves.iter().enumerate() {
        let mut splits: Vec<Scalar> = segment
            .extremities()
            .into_iter()
            .filter(|t| *t > CROSSING_TOLERANCE && *t < 1.0 - CROSSING_TOLERANCE)
            .collect();
        splits.sort_by(|a, b| a.partial_cmp(b).unwrap());
        splits.dedup_by(|a, b| (*a - *b).abs() < CROSSING_TOLERANCE);

        let mut prev = 0.0;
        for split in splits {
            sections.push(Section::new(segment, index, prev, split));
            prev = split;
        }
        sections.push(Section::new(segment, index, prev, 1.0));
    }
    sections
}

#[derive(Clone, Copy)]
struct SweepEvent {
    x: Scalar,
    close: bool,
    /// which of the two section sets the event belongs to
    set: usize,
    index: usize,
}

/// Find candidate overlapping section pairs with a sweep along the x-axis
///
/// Events are ordered by coordinate with open events before close events
/// at equal coordinate, so touching boxes still pair up.
fn sweep_pairs(a: &[Section], b: &[Section]) -> Vec<(usize, usize)> {
    let mut events = Vec::with_capacity(2 * (a.len() + b.len()));
    for (set, sections) in [a, b].into_iter().enumerate() {
        for (index, section) in sections.iter().enumerate() {
            let (x_min, x_max) = section.bbox.range(Axis::X);
            events.push(SweepEvent {
                x: x_min,
                close: false,
                set,
                index,
            });
            events.push(SweepEvent {
                x: x_max,
                close: true,
                set,
                index,
            });
        }
    }
    events.sort_by(|e0, e1| {
        e0.x.partial_cmp(&e1.x)
            .unwrap()
            .then(e0.close.cmp(&e1.close))
    });

    let mut active: [Vec<usize>; 2] = [Vec::new(), Vec::new()];
    let mut pairs = Vec::new();
    for event in events {
        if event.close {
            active[event.set].retain(|index| *index != event.index);
            continue;
        }
        let sections = if event.set == 0 { a } else { b };
        let other_sections = if event.set == 0 { b } else { a };
        let section = &sections[event.index];
        for other in active[1 - event.set].iter() {
            if y_overlap(section, &other_sections[*other]) {
                let pair = if event.set == 0 {
                    (event.index, *other)
                } else {
                    (*other, event.index)
                };
                pairs.push(pair);
            }
        }
        active[event.set].push(event.index);
    }
    pairs
}

/// Same sweep over a single section set, pairing sections among themselves
fn sweep_pairs_self(sections: &[Section]) -> Vec<(usize, usize)> {
    let mut events = Vec::with_capacity(2 * sections.len());
    for (index, section) in sections.iter().enumerate() {
        let (x_min, x_max) = section.bbox.range(Axis::X);
        events.push(SweepEvent {
            x: x_min,
            close: false,
            set: 0,
            index,
        });
        events.push(SweepEvent {
            x: x_max,
            close: true,
            set: 0,
            index,
        });
    }
    events.sort_by(|e0, e1| {
        e0.x.partial_cmp(&e1.x)
            .unwrap()
            .then(e0.close.cmp(&e1.close))
    });

    let mut active: Vec<usize> = Vec::new();
    let mut pairs = Vec::new();
    for event in events {
        if event.close {
            active.retain(|index| *index != event.index);
            continue;
        }
        for other in active.iter() {
            if y_overlap(&sections[event.index], &sections[*other]) {
                pairs.push((event.index.min(*other), event.index.max(*other)));
            }
        }
        active.push(event.index);
    }
    pairs
}

fn y_overlap(s0: &Section, s1: &Section) -> bool {
    let (min0, max0) = s0.bbox.range(Axis::Y);
    let (min1, max1) = s1.bbox.range(Axis::Y);
    min0 <= max1 && min1 <= max0
}

// -----------------------------------------------------------------------------
// Pairwise precise intersection
// -----------------------------------------------------------------------------

/// Intersect two curves precisely, local parameters in [0, 1]
fn intersect_pair(a: &Segment, b: &Segment, out: &mut Vec<Crossing>) {
    match (a, b) {
        (Segment::Line(la), Segment::Line(lb)) => {
            if let Some((ta, tb)) = la.intersect(*lb) {
                if (0.0..=1.0).contains(&ta) && (0.0..=1.0).contains(&tb) {
                    out.push(Crossing::new(ta, tb));
                }
            }
        }
        (Segment::Line(line), curve) => line_curve_crossings(line, curve, false, out),
        (curve, Segment::Line(line)) => line_curve_crossings(line, curve, true, out),
        (a, b) => subdivide_crossings(a, b, out),
    }
}

/// Intersect a line with an arbitrary curve by aligning the line with the
/// x-axis and taking the curve's axis-value roots
fn line_curve_crossings(line: &Line, curve: &Segment, swapped: bool, out: &mut Vec<Crossing>) {
    let length = line.length();
    if length < EPSILON {
        return subdivide_crossings(&Segment::Line(*line), curve, out);
    }
    let tr = Transform::make_horizontal(*line);
    let aligned = curve.transform(tr);
    // errors mean a component is constant: a graze along the line, not a
    // transversal crossing
    let roots = aligned.roots(0.0, Axis::Y).unwrap_or_default();
    for t_curve in roots {
        let t_line = aligned.at(t_curve).x() / length;
        if !(-CROSSING_TOLERANCE..=1.0 + CROSSING_TOLERANCE).contains(&t_line) {
            continue;
        }
        let t_line = crate::clamp(t_line, 0.0, 1.0);
        let crossing = if swapped {
            Crossing::new(t_curve, t_line)
        } else {
            Crossing::new(t_line, t_curve)
        };
        out.push(crossing);
    }
}

/// Recursive bounding-box subdivision carrying parameter intervals
///
/// The worklist splits both curves while their boxes overlap; once both
/// boxes are below tolerance the interval midpoints are reported.
fn subdivide_crossings(a: &Segment, b: &Segment, out: &mut Vec<Crossing>) {
    let mut queue = vec![((a.clone(), 0.0, 1.0), (b.clone(), 0.0, 1.0))];
    while let Some(((sa, a0, a1), (sb, b0, b1))) = queue.pop() {
        if out.len() >= MAX_CROSSINGS {
            tracing::debug!(
                "[subdivide] crossing backstop reached, input likely overlaps itself"
            );
            break;
        }
        let bbox_a = sa.bbox(None);
        let bbox_b = sb.bbox(None);
        if bbox_a.intersect(bbox_b).is_none() {
            continue;
        }
        let a_done = (bbox_a.width() < SUBDIVIDE_TOLERANCE
            && bbox_a.height() < SUBDIVIDE_TOLERANCE)
            || a1 - a0 < CROSSING_TOLERANCE * CROSSING_TOLERANCE;
        let b_done = (bbox_b.width() < SUBDIVIDE_TOLERANCE
            && bbox_b.height() < SUBDIVIDE_TOLERANCE)
            || b1 - b0 < CROSSING_TOLERANCE * CROSSING_TOLERANCE;
        if a_done && b_done {
            out.push(Crossing::new((a0 + a1) / 2.0, (b0 + b1) / 2.0));
            continue;
        }

        let a_mid = (a0 + a1) / 2.0;
        let b_mid = (b0 + b1) / 2.0;
        let (sa0, sa1) = sa.split_at(0.5);
        let (sb0, sb1) = sb.split_at(0.5);
        queue.push(((sa0.clone(), a0, a_mid), (sb0.clone(), b0, b_mid)));
        queue.push(((sa0, a0, a_mid), (sb1.clone(), b_mid, b1)));
        queue.push(((sa1.clone(), a_mid, a1), (sb0, b0, b_mid)));
        queue.push(((sa1, a_mid, a1), (sb1, b_mid, b1)));
    }
}

/// Drop near-identical crossings, keeping the first of each cluster
fn dedup_crossings(crossings: &mut Vec<Crossing>) {
    crossings.sort_by(|c0, c1| {
        c0.ta
            .partial_cmp(&c1.ta)
            .unwrap()
            .then(c0.tb.partial_cmp(&c1.tb).unwrap())
    });
    let mut kept: Vec<Crossing> = Vec::with_capacity(crossings.len());
    for crossing in crossings.drain(..) {
        let duplicate = kept.iter().any(|seen| {
            (seen.ta - crossing.ta).abs() < CROSSING_TOLERANCE
                && (seen.tb - crossing.tb).abs() < CROSSING_TOLERANCE
        });
        if !duplicate {
            kept.push(crossing);
        }
    }
    *crossings = kept;
}

// -----------------------------------------------------------------------------
// Public queries
// -----------------------------------------------------------------------------

/// All crossings between two curves using the default strategy
pub fn curve_crossings(a: &Segment, b: &Segment) -> Vec<Crossing> {
    curve_crossings_with(a, b, Crosser::default())
}

/// All crossings between two curves using an explicit strategy
pub fn curve_crossings_with(a: &Segment, b: &Segment, crosser: Crosser) -> Vec<Crossing> {
    let mut out = Vec::new();
    match crosser {
        Crosser::Subdivide => subdivide_crossings(a, b, &mut out),
        Crosser::Sweep => {
            let curves_a = std::slice::from_ref(a);
            let curves_b = std::slice::from_ref(b);
            let sections_a = monotonic_sections(curves_a);
            let sections_b = monotonic_sections(curves_b);
            for (ia, ib) in sweep_pairs(&sections_a, &sections_b) {
                let sa = &sections_a[ia];
                let sb = &sections_b[ib];
                let ca = a.cut(sa.f, sa.t);
                let cb = b.cut(sb.f, sb.t);
                let mut local = Vec::new();
                intersect_pair(&ca, &cb, &mut local);
                out.extend(local.into_iter().map(|crossing| {
                    Crossing::new(sa.to_parent(crossing.ta), sb.to_parent(crossing.tb))
                }));
            }
        }
    }
    dedup_crossings(&mut out);
    out
}

/// All crossings between the curves of two paths
///
/// Curve ids refer to path 0 (`a`) and path 1 (`b`); the implicit closing
/// line of a closed path takes the index after its last explicit curve.
pub fn path_crossings(a: &Path, b: &Path) -> Vec<PathCrossing> {
    path_crossings_with(a, b, Crosser::default())
}

pub fn path_crossings_with(a: &Path, b: &Path, crosser: Crosser) -> Vec<PathCrossing> {
    let span = tracing::debug_span!("[crossings]", strategy = %crosser);
    let _guard = span.enter();

    let curves_a = curves_of(a);
    let curves_b = curves_of(b);
    let mut out = Vec::new();
    match crosser {
        Crosser::Subdivide => {
            for (ia, ca) in curves_a.iter().enumerate() {
                for (ib, cb) in curves_b.iter().enumerate() {
                    let mut local = Vec::new();
                    subdivide_crossings(ca, cb, &mut local);
                    collect_path_crossings(&mut out, 0, ia, 1, ib, local);
                }
            }
        }
        Crosser::Sweep => {
            let sections_a = monotonic_sections(&curves_a);
            let sections_b = monotonic_sections(&curves_b);
            let pairs = sweep_pairs(&sections_a, &sections_b);
            tracing::debug!(
                "[sweep] sections={}+{} candidates={}",
                sections_a.len(),
                sections_b.len(),
                pairs.len()
            );
            for (ia, ib) in pairs {
                let sa = &sections_a[ia];
                let sb = &sections_b[ib];
                let ca = curves_a[sa.curve].cut(sa.f, sa.t);
                let cb = curves_b[sb.curve].cut(sb.f, sb.t);
                let mut local = Vec::new();
                intersect_pair(&ca, &cb, &mut local);
                let mapped = local
                    .into_iter()
                    .map(|crossing| {
                        Crossing::new(sa.to_parent(crossing.ta), sb.to_parent(crossing.tb))
                    })
                    .collect();
                collect_path_crossings(&mut out, 0, sa.curve, 1, sb.curve, mapped);
            }
        }
    }
    dedup_path_crossings(&mut out);
    out
}

/// Self-crossings of a path
///
/// Adjacent monotonic sections of one curve trivially meet at their shared
/// endpoint, as do consecutive curves of the path; neither is a genuine
/// self-crossing and both are excluded.
pub fn self_crossings(path: &Path) -> Vec<PathCrossing> {
    let span = tracing::debug_span!("[self-crossings]");
    let _guard = span.enter();

    let curves = curves_of(path);
    let sections = monotonic_sections(&curves);
    let mut out = Vec::new();
    for (ia, ib) in sweep_pairs_self(&sections) {
        let sa = &sections[ia];
        let sb = &sections[ib];
        if sa.is_adjacent(sb) {
            continue;
        }
        let ca = curves[sa.curve].cut(sa.f, sa.t);
        let cb = curves[sb.curve].cut(sb.f, sb.t);
        let mut local = Vec::new();
        intersect_pair(&ca, &cb, &mut local);
        let mapped: Vec<Crossing> = local
            .into_iter()
            .map(|crossing| Crossing::new(sa.to_parent(crossing.ta), sb.to_parent(crossing.tb)))
            .filter(|crossing| !is_junction(&curves, sa.curve, sb.curve, crossing, path.closed()))
            .collect();
        collect_path_crossings(&mut out, 0, sa.curve, 0, sb.curve, mapped);
    }
    dedup_path_crossings(&mut out);
    out
}

/// Self-crossings of a single curve
pub fn curve_self_crossings(segment: &Segment) -> Vec<Crossing> {
    let path = Path::new(vec![segment.clone()], false).expect("one segment is never empty");
    self_crossings(&path)
        .into_iter()
        .map(|crossing| crossing.at)
        .collect()
}

/// All crossings among a set of paths, self-crossings included
pub fn crossings_among(paths: &[Path]) -> Vec<PathCrossing> {
    let span = tracing::debug_span!("[crossings-among]", paths = paths.len());
    let _guard = span.enter();

    let mut out = Vec::new();
    for (index, path) in paths.iter().enumerate() {
        for mut crossing in self_crossings(path) {
            crossing.a.path = index;
            crossing.b.path = index;
            out.push(crossing);
        }
        for (other_index, other) in paths.iter().enumerate().skip(index + 1) {
            for mut crossing in path_crossings(path, other) {
                crossing.a.path = index;
                crossing.b.path = other_index;
                out.push(crossing);
            }
        }
    }
    out
}

/// A crossing that is really the shared endpoint of consecutive curves
fn is_junction(
    curves: &[Segment],
    curve_a: usize,
    curve_b: usize,
    crossing: &Crossing,
    closed: bool,
) -> bool {
    if curve_a == curve_b {
        return false;
    }
    let count = curves.len();
    let consecutive = curve_b == curve_a + 1 || (closed && curve_a == 0 && curve_b == count - 1);
    if !consecutive {
        return false;
    }
    let (first, second) = (crossing.ta, crossing.tb);
    if curve_b == curve_a + 1 {
        first > 1.0 - CROSSING_TOLERANCE && second < CROSSING_TOLERANCE
    } else {
        // wrap-around: curve_b ends where curve_a starts
        second > 1.0 - CROSSING_TOLERANCE && first < CROSSING_TOLERANCE
    }
}

fn collect_path_crossings(
    out: &mut Vec<PathCrossing>,
    path_a: usize,
    curve_a: usize,
    path_b: usize,
    curve_b: usize,
    crossings: Vec<Crossing>,
) {
    out.extend(crossings.into_iter().map(|at| PathCrossing {
        a: CurveId {
            path: path_a,
            curve: curve_a,
        },
        b: CurveId {
            path: path_b,
            curve: curve_b,
        },
        at,
    }));
}

fn dedup_path_crossings(crossings: &mut Vec<PathCrossing>) {
    crossings.sort_by(|c0, c1| {
        (c0.a.curve, c0.b.curve)
            .cmp(&(c1.a.curve, c1.b.curve))
            .then(c0.at.ta.partial_cmp(&c1.at.ta).unwrap())
            .then(c0.at.tb.partial_cmp(&c1.at.tb).unwrap())
    });
    let mut kept: Vec<PathCrossing> = Vec::with_capacity(crossings.len());
    for crossing in crossings.drain(..) {
        let duplicate = kept.iter().any(|seen| {
            seen.a == crossing.a
                && seen.b == crossing.b
                && (seen.at.ta - crossing.at.ta).abs() < CROSSING_TOLERANCE
                && (seen.at.tb - crossing.at.tb).abs() < CROSSING_TOLERANCE
        });
        if !duplicate {
            kept.push(crossing);
        }
    }
    *crossings = kept;
}

// -----------------------------------------------------------------------------
// Winding
// -----------------------------------------------------------------------------

/// Winding number of a path around a point
///
/// Signed crossings of the ray from `p` towards positive x are integrated
/// over every curve of the path (closing line included): an upward
/// transversal crossing counts +1, a downward one -1, tangential grazes
/// count nothing. Roots are taken on the half-open [0, 1) so a crossing at
/// a curve junction is attributed to exactly one curve.
pub fn winding(path: &Path, p: Point) -> i32 {
    let mut winding = 0;
    for segment in curves_of(path) {
        let Ok(roots) = segment.roots(p.y(), Axis::Y) else {
            // constant-y curve lies along the ray, no transversal crossing
            continue;
        };
        for t in roots {
            if t >= 1.0 - CROSSING_TOLERANCE {
                continue;
            }
            if segment.at(t).x() <= p.x() + EPSILON {
                continue;
            }
            let dy = segment.velocity(t).y();
            if dy > EPSILON {
                winding += 1;
            } else if dy < -EPSILON {
                winding -= 1;
            }
        }
    }
    winding
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bezier, FillRule, assert_approx_eq};

    fn square(ccw: bool) -> Path {
        let path = Path::builder()
            .move_to((0.0, 0.0))
            .line_to((1.0, 0.0))
            .line_to((1.0, 1.0))
            .line_to((0.0, 1.0))
            .close()
            .build()
            .unwrap();
        if ccw { path } else { path.reverse() }
    }

    #[test]
    fn test_line_crossing() {
        let a: Segment = Line::new((0.0, 0.0), (2.0, 2.0)).into();
        let b: Segment = Line::new((0.0, 2.0), (2.0, 0.0)).into();
        for crosser in [Crosser::Sweep, Crosser::Subdivide] {
            let crossings = curve_crossings_with(&a, &b, crosser);
            assert_eq!(crossings.len(), 1, "strategy {}", crosser);
            assert_approx_eq!(crossings[0].ta, 0.5, 1e-4);
            assert_approx_eq!(crossings[0].tb, 0.5, 1e-4);
        }
    }

    #[test]
    fn test_no_crossing() {
        let a: Segment = Line::new((0.0, 0.0), (1.0, 0.0)).into();
        let b: Segment = Line::new((0.0, 1.0), (1.0, 1.0)).into();
        assert!(curve_crossings(&a, &b).is_empty());
    }

    #[test]
    fn test_line_curve_crossing() {
        let line: Segment = Line::new((0.0, 0.5), (2.0, 0.5)).into();
        let curve: Segment = Bezier::quad((0.0, 0.0), (1.0, 2.0), (2.0, 0.0)).into();
        let mut crossings = curve_crossings(&line, &curve);
        crossings.sort_by(|c0, c1| c0.tb.partial_cmp(&c1.tb).unwrap());
        assert_eq!(crossings.len(), 2);
        for crossing in crossings {
            let on_line = line.at(crossing.ta);
            let on_curve = curve.at(crossing.tb);
            assert!(on_line.is_near(on_curve, 1e-6));
        }
    }

    #[test]
    fn test_curve_curve_crossing() {
        // two cubics crossing in an X shape
        let a: Segment = Bezier::cubic((0.0, 0.0), (1.0, 1.0), (2.0, 1.0), (3.0, 2.0)).into();
        let b: Segment = Bezier::cubic((0.0, 2.0), (1.0, 1.0), (2.0, 1.0), (3.0, 0.0)).into();
        let sweep = curve_crossings_with(&a, &b, Crosser::Sweep);
        let subdivide = curve_crossings_with(&a, &b, Crosser::Subdivide);
        assert_eq!(sweep.len(), 1);
        assert_eq!(subdivide.len(), 1);
        assert_approx_eq!(sweep[0].ta, subdivide[0].ta, 1e-3);
        assert_approx_eq!(sweep[0].tb, subdivide[0].tb, 1e-3);
        let pa = a.at(sweep[0].ta);
        let pb = b.at(sweep[0].tb);
        assert!(pa.is_near(pb, 1e-5));
    }

    #[test]
    fn test_crossing_symmetry() {
        let a: Segment = Bezier::cubic((0.0, 0.0), (1.0, 3.0), (2.0, -2.0), (3.0, 1.0)).into();
        let b: Segment = Line::new((0.0, 0.5), (3.0, 0.5)).into();
        let ab = curve_crossings(&a, &b);
        let ba = curve_crossings(&b, &a);
        assert_eq!(ab.len(), ba.len());
        for crossing in ab {
            let found = ba.iter().any(|other| {
                (other.ta - crossing.tb).abs() < 1e-5 && (other.tb - crossing.ta).abs() < 1e-5
            });
            assert!(found, "missing swapped counterpart of {:?}", crossing);
        }
    }

    #[test]
    fn test_self_crossings_simple_line() {
        let path = Path::new(vec![Line::new((0.0, 0.0), (1.0, 1.0)).into()], false).unwrap();
        assert!(self_crossings(&path).is_empty());
        assert!(curve_self_crossings(&Line::new((0.0, 0.0), (1.0, 1.0)).into()).is_empty());
    }

    #[test]
    fn test_self_crossings_polyline() {
        // third segment crosses the first at (1.2, 1.2)
        let path = Path::builder()
            .move_to((0.0, 0.0))
            .line_to((2.0, 2.0))
            .line_to((3.0, 0.0))
            .line_to((0.0, 2.0))
            .build()
            .unwrap();
        let crossings = self_crossings(&path);
        assert_eq!(crossings.len(), 1);
        let crossing = &crossings[0];
        assert_eq!(crossing.a.curve.min(crossing.b.curve), 0);
        assert_eq!(crossing.a.curve.max(crossing.b.curve), 2);
        let pa = path.segments()[crossing.a.curve].at(crossing.at.ta);
        assert!(pa.is_near(Point::new(1.2, 1.2), 1e-6));
    }

    #[test]
    fn test_self_crossing_cubic() {
        // this cubic crosses itself at x = 0.5: B(t) = B(1 - t) in y, and
        // the x difference 20t^3 - 30t^2 + 12t - 1 has roots near 0.1127
        // and 0.8873 besides the trivial 0.5
        let cubic: Segment = Bezier::cubic((0.0, 0.0), (2.0, 2.0), (-1.0, 2.0), (1.0, 0.0)).into();
        let path = Path::new(vec![cubic.clone()], false).unwrap();
        let crossings = self_crossings(&path);
        assert_eq!(crossings.len(), 1);
        let at = crossings[0].at;
        let (lo, hi) = if at.ta < at.tb {
            (at.ta, at.tb)
        } else {
            (at.tb, at.ta)
        };
        assert_approx_eq!(lo, 0.1127, 1e-3);
        assert_approx_eq!(hi, 0.8873, 1e-3);
        assert!(cubic.at(lo).is_near(cubic.at(hi), 1e-5));
    }

    #[test]
    fn test_path_crossings_squares() {
        let a = square(true);
        let b = square(true).transform(Transform::identity().translate(0.5, 0.5));
        let crossings = path_crossings(&a, &b);
        assert_eq!(crossings.len(), 2);
        for crossing in &crossings {
            let pa = curves_of(&a)[crossing.a.curve].at(crossing.at.ta);
            let pb = curves_of(&b)[crossing.b.curve].at(crossing.at.tb);
            assert!(pa.is_near(pb, 1e-6));
        }
    }

    #[test]
    fn test_winding_square() {
        let ccw = square(true);
        assert_eq!(ccw.winding(Point::new(0.5, 0.5)), 1);
        assert_eq!(ccw.winding(Point::new(2.0, 0.5)), 0);
        assert_eq!(ccw.winding(Point::new(-1.0, 0.5)), 0);

        let cw = square(false);
        assert_eq!(cw.winding(Point::new(0.5, 0.5)), -1);
        assert_eq!(cw.winding(Point::new(2.0, 0.5)), 0);
    }

    #[test]
    fn test_contains() {
        let path = square(true);
        assert!(path.contains(Point::new(0.5, 0.5), FillRule::NonZero));
        assert!(path.contains(Point::new(0.5, 0.5), FillRule::EvenOdd));
        assert!(!path.contains(Point::new(1.5, 0.5), FillRule::NonZero));
        assert!(!path.contains(Point::new(1.5, 0.5), FillRule::EvenOdd));
    }

    #[test]
    fn test_winding_circle() {
        // counter-clockwise unit circle out of two arcs
        let upper =
            crate::EllipArc::from_endpoints((1.0, 0.0), (-1.0, 0.0), 1.0, 1.0, 0.0, false, true, true)
                .unwrap();
        let lower =
            crate::EllipArc::from_endpoints((-1.0, 0.0), (1.0, 0.0), 1.0, 1.0, 0.0, false, true, true)
                .unwrap();
        let path = Path::new(vec![upper.into(), lower.into()], true).unwrap();
        assert_eq!(path.winding(Point::new(0.0, 0.0)), 1);
        assert_eq!(path.winding(Point::new(0.2, 0.3)), 1);
        assert_eq!(path.winding(Point::new(2.0, 0.0)), 0);
        assert_eq!(path.winding(Point::new(0.0, -2.0)), 0);
    }

    #[test]
    fn test_crossings_among() {
        let a = square(true);
        let b = square(true).transform(Transform::identity().translate(0.5, 0.5));
        let c = square(true).transform(Transform::identity().translate(10.0, 10.0));
        let all = crossings_among(&[a, b, c]);
        assert_eq!(all.len(), 2);
        for crossing in &all {
            assert_eq!(crossing.a.path, 0);
            assert_eq!(crossing.b.path, 1);
        }
    }
}
