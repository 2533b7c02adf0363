//! Parametric curve variants and the operations common to all of them

use crate::{
    Axis, BBox, EllipArc, EPSILON, Error, Point, Scalar, Transform,
    solver::{RootConfig, bezier_axis_roots, find_parametric_roots},
    utils::binomial,
};
use smallvec::SmallVec;
use std::fmt;

/// Parameters at which a curve crosses an axis value
pub type CurveRoots = SmallVec<[Scalar; 4]>;
/// Parameters at which a curve turns along either axis
pub type CurveExtremities = SmallVec<[Scalar; 6]>;

/// Set of operations common to all curve variants.
///
/// Structural operations (`cut`, `reverse`, `transform`) return new values,
/// curves are never mutated in place. All of them preserve the endpoint
/// invariant: `start()` and `end()` equal evaluation at parameters 0 and 1.
pub trait Curve: Sized + Into<Segment> {
    /// Apply affine transformation to the curve
    fn transform(&self, tr: Transform) -> Self;

    /// Point at which curve starts
    fn start(&self) -> Point;

    /// Point at which curve ends
    fn end(&self) -> Point;

    /// Evaluate curve at parameter value `t`
    ///
    /// Values outside of (0.0..=1.0) extrapolate the curve: polynomially
    /// for line and Bezier variants, by extending the swept angle for arcs.
    fn at(&self, t: Scalar) -> Point;

    /// Derivative with respect to t, `deriv(t) = [curve'(t)_x, curve'(t)_y]`
    ///
    /// For a curve whose control points all coincide the derivative is a
    /// zero-length curve; callers treat a near-zero derivative as
    /// stationary, not as an error.
    fn deriv(&self) -> Segment;

    /// Split the curve at parameter value `t`
    fn split_at(&self, t: Scalar) -> (Self, Self) {
        (self.cut(0.0, t), self.cut(t, 1.0))
    }

    /// Create subcurve starting at parameter value `a` and ending at value `b`
    ///
    /// The result is re-parameterized to [0, 1]; `cut(0.0, 1.0)` reproduces
    /// the curve exactly and `a > b` yields the reversed piece.
    fn cut(&self, a: Scalar, b: Scalar) -> Self;

    /// Identical curve but directed from end to start, instead of start to end.
    ///
    /// Involution: reversing twice restores the original control and
    /// parameter data exactly.
    fn reverse(&self) -> Self;

    /// Extend provided `init` bounding box with the bounding box of the curve
    fn bbox(&self, init: Option<BBox>) -> BBox;

    /// Find all parameters in [0, 1] where a derivative component vanishes,
    /// `curve'(t)_x = 0 || curve'(t)_y = 0`
    fn extremities(&self) -> CurveExtremities;

    /// Find all parameters in [0, 1] where `curve(t)[axis] == v`
    fn roots(&self, v: Scalar, axis: Axis) -> Result<CurveRoots, Error>;

    /// Parameter within `[from, to]` minimizing the distance to `p`
    ///
    /// Reports `Error::Range` when the interval lies outside [0, 1] and
    /// `Error::InfiniteSolutions` when every parameter is equally near
    /// (e.g. the center of a circular arc).
    fn nearest(&self, p: Point, from: Scalar, to: Scalar) -> Result<Scalar, Error>;
}

/// Order and range-check a nearest-point query interval
pub(crate) fn nearest_range(from: Scalar, to: Scalar) -> Result<(Scalar, Scalar), Error> {
    let (from, to) = if from <= to { (from, to) } else { (to, from) };
    if from < 0.0 || to > 1.0 {
        return Err(Error::Range {
            reason: "nearest-point interval outside of [0, 1]",
        });
    }
    Ok((from, to))
}

// -----------------------------------------------------------------------------
// de Casteljau helpers shared by curve and solver code
// -----------------------------------------------------------------------------

pub(crate) type CtrlBuf = SmallVec<[Point; 8]>;

/// Evaluate a Bezier control polygon at `t`
pub(crate) fn bezier_at(ctrl: &[Point], t: Scalar) -> Point {
    let mut buf: CtrlBuf = SmallVec::from_slice(ctrl);
    let n = ctrl.len() - 1;
    for level in 0..n {
        for i in 0..(n - level) {
            buf[i] = (1.0 - t) * buf[i] + t * buf[i + 1];
        }
    }
    buf[0]
}

/// Split a control polygon in half, returning both sub-polygons
pub(crate) fn bezier_split_half(ctrl: &[Point]) -> (CtrlBuf, CtrlBuf) {
    bezier_split(ctrl, 0.5)
}

/// Split a control polygon at `t`, returning both sub-polygons
pub(crate) fn bezier_split(ctrl: &[Point], t: Scalar) -> (CtrlBuf, CtrlBuf) {
    let n = ctrl.len() - 1;
    let mut buf: CtrlBuf = SmallVec::from_slice(ctrl);
    let mut left: CtrlBuf = SmallVec::with_capacity(n + 1);
    let mut right: CtrlBuf = SmallVec::with_capacity(n + 1);
    left.push(buf[0]);
    right.push(buf[n]);
    for level in 0..n {
        for i in 0..(n - level) {
            buf[i] = (1.0 - t) * buf[i] + t * buf[i + 1];
        }
        left.push(buf[0]);
        right.push(buf[n - level - 1]);
    }
    right.reverse();
    (left, right)
}

/// Blossom of the control polygon: de Casteljau with `a` for the first
/// `a_count` reduction levels and `b` for the rest
fn bezier_blossom(ctrl: &[Point], a: Scalar, b: Scalar, a_count: usize) -> Point {
    let mut buf: CtrlBuf = SmallVec::from_slice(ctrl);
    let n = ctrl.len() - 1;
    for level in 0..n {
        let t = if level < a_count { a } else { b };
        for i in 0..(n - level) {
            buf[i] = (1.0 - t) * buf[i] + t * buf[i + 1];
        }
    }
    buf[0]
}

// -----------------------------------------------------------------------------
// Line
// -----------------------------------------------------------------------------

/// Line segment curve
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line(pub [Point; 2]);

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Line([p0, p1]) = self;
        write!(f, "Line {:?} {:?}", p0, p1)
    }
}

impl Line {
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        Self([p0.into(), p1.into()])
    }

    /// Length of the line
    pub fn length(&self) -> Scalar {
        let Self([p0, p1]) = self;
        p0.dist(*p1)
    }

    /// Start and end points of the line
    pub fn points(&self) -> [Point; 2] {
        self.0
    }

    /// Find intersection of two lines
    ///
    /// Returns pair of `t` parameters for this line and the other line.
    /// Found by solving `self.at(t0) == other.at(t1)`. Actual intersection of
    /// line segments can be found by making sure that `0.0 <= t0 <= 1.0 && 0.0 <= t1 <= 1.0`
    pub fn intersect(&self, other: Line) -> Option<(Scalar, Scalar)> {
        let Line([Point([x1, y1]), Point([x2, y2])]) = *self;
        let Line([Point([x3, y3]), Point([x4, y4])]) = other;
        let det = (x4 - x3) * (y1 - y2) - (x1 - x2) * (y4 - y3);
        if det.abs() < EPSILON {
            return None;
        }
        let t0 = ((y3 - y4) * (x1 - x3) + (x4 - x3) * (y1 - y3)) / det;
        let t1 = ((y1 - y2) * (x1 - x3) + (x2 - x1) * (y1 - y3)) / det;
        Some((t0, t1))
    }

    /// Find intersection point between two line segments
    pub fn intersect_point(&self, other: Line) -> Option<Point> {
        let (t0, t1) = self.intersect(other)?;
        if (0.0..=1.0).contains(&t0) && (0.0..=1.0).contains(&t1) {
            Some(self.at(t0))
        } else {
            None
        }
    }

    /// Direction vector associated with the line segment
    pub fn direction(&self) -> Point {
        self.end() - self.start()
    }

    /// Parameter of the point on the segment nearest to `p`, clamped to [0, 1]
    ///
    /// A zero-length segment yields parameter 0 rather than dividing by zero.
    pub(crate) fn nearest_clamped(&self, p: Point) -> Scalar {
        let Self([p0, p1]) = *self;
        let d = p1 - p0;
        let len_sq = d.dot(d);
        if len_sq < EPSILON {
            return 0.0;
        }
        crate::clamp((p - p0).dot(d) / len_sq, 0.0, 1.0)
    }
}

impl Curve for Line {
    fn transform(&self, tr: Transform) -> Self {
        let Line([p0, p1]) = self;
        Self([tr.apply(*p0), tr.apply(*p1)])
    }

    fn start(&self) -> Point {
        self.0[0]
    }

    fn end(&self) -> Point {
        self.0[1]
    }

    fn at(&self, t: Scalar) -> Point {
        let Self([p0, p1]) = self;
        (1.0 - t) * p0 + t * p1
    }

    fn deriv(&self) -> Segment {
        let deriv = self.end() - self.start();
        Line::new(deriv, deriv).into()
    }

    fn split_at(&self, t: Scalar) -> (Self, Self) {
        let Self([p0, p1]) = self;
        let mid = self.at(t);
        (Self([*p0, mid]), Self([mid, *p1]))
    }

    fn cut(&self, a: Scalar, b: Scalar) -> Self {
        Self([self.at(a), self.at(b)])
    }

    fn reverse(&self) -> Self {
        let Self([p0, p1]) = *self;
        Self([p1, p0])
    }

    fn bbox(&self, init: Option<BBox>) -> BBox {
        let Self([p0, p1]) = *self;
        BBox::new(p0, p1).union_opt(init)
    }

    fn extremities(&self) -> CurveExtremities {
        CurveExtremities::new()
    }

    fn roots(&self, v: Scalar, axis: Axis) -> Result<CurveRoots, Error> {
        let mut result = CurveRoots::new();
        let a0 = self.0[0].coord(axis) - v;
        let a1 = self.0[1].coord(axis) - v;
        if (a0 - a1).abs() > EPSILON {
            let t = a0 / (a0 - a1);
            if (0.0..=1.0).contains(&t) {
                result.push(t);
            }
        }
        Ok(result)
    }

    fn nearest(&self, p: Point, from: Scalar, to: Scalar) -> Result<Scalar, Error> {
        let (from, to) = nearest_range(from, to)?;
        Ok(crate::clamp(self.nearest_clamped(p), from, to))
    }
}

// -----------------------------------------------------------------------------
// Bezier curve of arbitrary degree
// -----------------------------------------------------------------------------

/// Polynomial Bezier curve of degree `points - 1`
///
/// Control points are evaluated with de Casteljau reduction, so every
/// operation works uniformly for any degree; `quad` and `cubic` cover the
/// degrees an editing application actually produces.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bezier {
    ctrl: SmallVec<[Point; 4]>,
}

impl fmt::Debug for Bezier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bezier")?;
        for point in self.ctrl.iter() {
            write!(f, " {:?}", point)?;
        }
        Ok(())
    }
}

impl Bezier {
    /// Construct curve from an ordered sequence of control points
    ///
    /// At least one control point is required; a single point is the
    /// degree-zero constant curve.
    pub fn new<P: Into<Point>>(ctrl: impl IntoIterator<Item = P>) -> Self {
        let ctrl: SmallVec<[Point; 4]> = ctrl.into_iter().map(Into::into).collect();
        debug_assert!(!ctrl.is_empty(), "Bezier requires at least one control point");
        Self { ctrl }
    }

    /// Quadratic curve from three control points
    pub fn quad(p0: impl Into<Point>, p1: impl Into<Point>, p2: impl Into<Point>) -> Self {
        Self::new([p0.into(), p1.into(), p2.into()])
    }

    /// Cubic curve from four control points
    pub fn cubic(
        p0: impl Into<Point>,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> Self {
        Self::new([p0.into(), p1.into(), p2.into(), p3.into()])
    }

    /// Construct curve from a flat `[x0, y0, x1, y1, ..]` coordinate buffer
    pub fn from_scalars(coords: &[Scalar]) -> Result<Self, Error> {
        if coords.is_empty() || coords.len() % 2 != 0 {
            return Err(Error::Range {
                reason: "control point buffer must hold an even, non-zero number of coordinates",
            });
        }
        Ok(Self {
            ctrl: bytemuck::cast_slice::<Scalar, Point>(coords).into(),
        })
    }

    /// Ordered control points of the curve
    pub fn points(&self) -> &[Point] {
        &self.ctrl
    }

    /// Degree of the polynomial
    pub fn degree(&self) -> usize {
        self.ctrl.len() - 1
    }

    /// Whether all control points coincide within the margin of error
    pub fn is_point(&self) -> bool {
        let first = self.ctrl[0];
        self.ctrl.iter().all(|point| point.is_close_to(first))
    }

    fn deriv_ctrl(&self) -> SmallVec<[Point; 4]> {
        let n = self.degree();
        if n == 0 {
            return smallvec::smallvec![Point::new(0.0, 0.0)];
        }
        self.ctrl
            .windows(2)
            .map(|pair| n as Scalar * (pair[1] - pair[0]))
            .collect()
    }
}

impl Curve for Bezier {
    fn transform(&self, tr: Transform) -> Self {
        Self {
            ctrl: self.ctrl.iter().map(|point| tr.apply(*point)).collect(),
        }
    }

    fn start(&self) -> Point {
        self.ctrl[0]
    }

    fn end(&self) -> Point {
        self.ctrl[self.ctrl.len() - 1]
    }

    fn at(&self, t: Scalar) -> Point {
        bezier_at(&self.ctrl, t)
    }

    fn deriv(&self) -> Segment {
        Bezier {
            ctrl: self.deriv_ctrl(),
        }
        .into()
    }

    fn split_at(&self, t: Scalar) -> (Self, Self) {
        let (left, right) = bezier_split(&self.ctrl, t);
        (
            Self {
                ctrl: left.into_iter().collect(),
            },
            Self {
                ctrl: right.into_iter().collect(),
            },
        )
    }

    fn cut(&self, a: Scalar, b: Scalar) -> Self {
        // control point i of the reparameterized curve is the blossom with
        // (n - i) copies of `a` and i copies of `b`; for a = 0, b = 1 this
        // reproduces the control points without any arithmetic drift
        let n = self.degree();
        let ctrl = (0..=n)
            .map(|i| bezier_blossom(&self.ctrl, a, b, n - i))
            .collect();
        Self { ctrl }
    }

    fn reverse(&self) -> Self {
        Self {
            ctrl: self.ctrl.iter().rev().copied().collect(),
        }
    }

    fn bbox(&self, init: Option<BBox>) -> BBox {
        let bbox = BBox::new(self.start(), self.end()).union_opt(init);
        if self.ctrl.iter().all(|point| bbox.contains(*point)) {
            return bbox;
        }
        self.extremities()
            .into_iter()
            .fold(bbox, |bbox, t| bbox.extend(self.at(t)))
    }

    fn extremities(&self) -> CurveExtremities {
        let mut result = CurveExtremities::new();
        let deriv = self.deriv_ctrl();
        if deriv.len() < 2 {
            return result;
        }
        let cfg = RootConfig::default();
        result.extend(bezier_axis_roots(&deriv, 0.0, Axis::X, &cfg));
        result.extend(bezier_axis_roots(&deriv, 0.0, Axis::Y, &cfg));
        result
    }

    fn roots(&self, v: Scalar, axis: Axis) -> Result<CurveRoots, Error> {
        let mut result = CurveRoots::new();
        if self.degree() == 0 {
            if (self.ctrl[0].coord(axis) - v).abs() < EPSILON {
                result.push(0.0);
            }
            return Ok(result);
        }
        Ok(bezier_axis_roots(&self.ctrl, v, axis, &RootConfig::default()))
    }

    fn nearest(&self, p: Point, from: Scalar, to: Scalar) -> Result<Scalar, Error> {
        let (from, to) = nearest_range(from, to)?;
        if self.is_point() {
            return Ok(from);
        }

        // stationary points of the squared distance satisfy
        // (B(t) - p) . B'(t) = 0, a Bernstein polynomial of degree 2n - 1
        let n = self.degree();
        let m = 2 * n - 1;
        let deriv = self.deriv_ctrl();
        let mut w: CtrlBuf = SmallVec::with_capacity(m + 1);
        for k in 0..=m {
            let mut value = 0.0;
            let j_lo = k.saturating_sub(n);
            let j_hi = (n - 1).min(k);
            for j in j_lo..=j_hi {
                let weight = binomial(n - 1, j) * binomial(n, k - j) / binomial(m, k);
                value += weight * deriv[j].dot(self.ctrl[k - j] - p);
            }
            w.push(Point::new(k as Scalar / m as Scalar, value));
        }

        let mut candidates = CurveRoots::new();
        find_parametric_roots(&w, &RootConfig::default(), &mut candidates);

        // the minimum may sit on the interval boundary, not at a stationary point
        let mut best_t = from;
        let mut best_d = p.dist_sq(self.at(from));
        let to_d = p.dist_sq(self.at(to));
        if to_d < best_d {
            best_t = to;
            best_d = to_d;
        }
        for t in candidates {
            if t < from || t > to {
                continue;
            }
            let d = p.dist_sq(self.at(t));
            if d < best_d {
                best_t = t;
                best_d = d;
            }
        }
        Ok(best_t)
    }
}

// -----------------------------------------------------------------------------
// Segment
// -----------------------------------------------------------------------------

/// `Segment` is the closed set of curve variants: `Line`, `Bezier` or `EllipArc`
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Segment {
    Line(Line),
    Bezier(Bezier),
    Arc(EllipArc),
}

impl Segment {
    /// Convert to line if it is a line variant of the segment
    pub fn to_line(&self) -> Option<Line> {
        match self {
            Segment::Line(line) => Some(*line),
            _ => None,
        }
    }

    /// Convert to bezier if it is a bezier variant of the segment
    pub fn to_bezier(&self) -> Option<Bezier> {
        match self {
            Segment::Bezier(bezier) => Some(bezier.clone()),
            _ => None,
        }
    }

    /// Convert to arc if it is an arc variant of the segment
    pub fn to_arc(&self) -> Option<EllipArc> {
        match self {
            Segment::Arc(arc) => Some(*arc),
            _ => None,
        }
    }

    /// True parametric tangent d/dt at `t`
    ///
    /// Unlike `deriv` for arcs (which is angle-parameterized per the arc
    /// contract), this scales by the swept angle so the direction and
    /// magnitude match the curve parameter.
    pub fn velocity(&self, t: Scalar) -> Point {
        match self {
            Segment::Line(line) => line.direction(),
            Segment::Bezier(bezier) => bezier.deriv().at(t),
            Segment::Arc(arc) => arc.velocity(t),
        }
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Line(line) => line.fmt(f),
            Segment::Bezier(bezier) => bezier.fmt(f),
            Segment::Arc(arc) => arc.fmt(f),
        }
    }
}

impl Curve for Segment {
    fn transform(&self, tr: Transform) -> Self {
        match self {
            Segment::Line(line) => line.transform(tr).into(),
            Segment::Bezier(bezier) => bezier.transform(tr).into(),
            Segment::Arc(arc) => arc.transform(tr).into(),
        }
    }

    fn start(&self) -> Point {
        match self {
            Segment::Line(line) => line.start(),
            Segment::Bezier(bezier) => bezier.start(),
            Segment::Arc(arc) => arc.start(),
        }
    }

    fn end(&self) -> Point {
        match self {
            Segment::Line(line) => line.end(),
            Segment::Bezier(bezier) => bezier.end(),
            Segment::Arc(arc) => arc.end(),
        }
    }

    fn at(&self, t: Scalar) -> Point {
        match self {
            Segment::Line(line) => line.at(t),
            Segment::Bezier(bezier) => bezier.at(t),
            Segment::Arc(arc) => arc.at(t),
        }
    }

    fn deriv(&self) -> Segment {
        match self {
            Segment::Line(line) => line.deriv(),
            Segment::Bezier(bezier) => bezier.deriv(),
            Segment::Arc(arc) => arc.deriv(),
        }
    }

    fn split_at(&self, t: Scalar) -> (Self, Self) {
        match self {
            Segment::Line(line) => {
                let (l0, l1) = line.split_at(t);
                (l0.into(), l1.into())
            }
            Segment::Bezier(bezier) => {
                let (b0, b1) = bezier.split_at(t);
                (b0.into(), b1.into())
            }
            Segment::Arc(arc) => {
                let (a0, a1) = arc.split_at(t);
                (a0.into(), a1.into())
            }
        }
    }

    fn cut(&self, a: Scalar, b: Scalar) -> Self {
        match self {
            Segment::Line(line) => line.cut(a, b).into(),
            Segment::Bezier(bezier) => bezier.cut(a, b).into(),
            Segment::Arc(arc) => arc.cut(a, b).into(),
        }
    }

    fn reverse(&self) -> Self {
        match self {
            Segment::Line(line) => line.reverse().into(),
            Segment::Bezier(bezier) => bezier.reverse().into(),
            Segment::Arc(arc) => arc.reverse().into(),
        }
    }

    fn bbox(&self, init: Option<BBox>) -> BBox {
        match self {
            Segment::Line(line) => line.bbox(init),
            Segment::Bezier(bezier) => bezier.bbox(init),
            Segment::Arc(arc) => arc.bbox(init),
        }
    }

    fn extremities(&self) -> CurveExtremities {
        match self {
            Segment::Line(line) => line.extremities(),
            Segment::Bezier(bezier) => bezier.extremities(),
            Segment::Arc(arc) => arc.extremities(),
        }
    }

    fn roots(&self, v: Scalar, axis: Axis) -> Result<CurveRoots, Error> {
        match self {
            Segment::Line(line) => line.roots(v, axis),
            Segment::Bezier(bezier) => bezier.roots(v, axis),
            Segment::Arc(arc) => Curve::roots(arc, v, axis),
        }
    }

    fn nearest(&self, p: Point, from: Scalar, to: Scalar) -> Result<Scalar, Error> {
        match self {
            Segment::Line(line) => line.nearest(p, from, to),
            Segment::Bezier(bezier) => bezier.nearest(p, from, to),
            Segment::Arc(arc) => Curve::nearest(arc, p, from, to),
        }
    }
}

impl From<Line> for Segment {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}

impl From<Bezier> for Segment {
    fn from(bezier: Bezier) -> Self {
        Self::Bezier(bezier)
    }
}

impl From<EllipArc> for Segment {
    fn from(arc: EllipArc) -> Self {
        Self::Arc(arc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_line_roots() {
        let l = Line::new((0.0, -1.0), (2.0, 1.0));
        assert_eq!(l.roots(0.0, Axis::Y).unwrap().as_slice(), &[0.5]);
        assert_eq!(l.roots(1.0, Axis::X).unwrap().as_slice(), &[0.5]);
        // line parallel to the queried value
        let flat = Line::new((0.0, 1.0), (2.0, 1.0));
        assert!(flat.roots(0.0, Axis::Y).unwrap().is_empty());
    }

    #[test]
    fn test_bezier_roots() {
        let q = Bezier::quad((0.0, -2.0), (7.0, 6.0), (6.0, -4.0));
        let roots = q.roots(0.0, Axis::Y).unwrap();
        assert_eq!(roots.len(), 2);
        for t in roots {
            assert_approx_eq!(q.at(t).y(), 0.0, 1e-6);
        }

        let c = Bezier::cubic((0.0, -2.0), (2.0, 4.0), (4.0, -3.0), (9.0, 1.0));
        let roots = c.roots(0.0, Axis::Y).unwrap();
        assert_eq!(roots.len(), 3);
        for t in roots {
            assert_approx_eq!(c.at(t).y(), 0.0, 1e-6);
        }
    }

    #[test]
    fn test_cut_identity() {
        let c = Bezier::cubic((3.0, 7.0), (2.0, 8.0), (0.0, 3.0), (6.0, 5.0));
        // blossoming with the original parameters must reproduce the exact
        // control points, downstream joining relies on it
        assert_eq!(c.cut(0.0, 1.0), c);

        let l = Line::new((1.0, 2.0), (3.0, -4.0));
        assert_eq!(l.cut(0.0, 1.0), l);
    }

    #[test]
    fn test_cut_matches_split() {
        let c = Bezier::cubic((3.0, 7.0), (2.0, 8.0), (0.0, 3.0), (6.0, 5.0));
        let (left, right) = c.split_at(0.5);
        for (a, b) in left.points().iter().zip(c.cut(0.0, 0.5).points()) {
            assert!(a.is_near(*b, 1e-12));
        }
        for (a, b) in right.points().iter().zip(c.cut(0.5, 1.0).points()) {
            assert!(a.is_near(*b, 1e-12));
        }
    }

    #[test]
    fn test_cut_sub_range() {
        let c = Bezier::cubic((0.0, 0.0), (1.0, 3.0), (3.0, -2.0), (4.0, 1.0));
        let piece = c.cut(0.25, 0.75);
        for i in 0..=8 {
            let s = i as Scalar / 8.0;
            let expected = c.at(0.25 + s * 0.5);
            assert!(piece.at(s).is_near(expected, 1e-9));
        }
        // collapsed range produces an all-endpoints-equal curve
        let collapsed = c.cut(0.3, 0.3);
        assert!(collapsed.start().is_near(c.at(0.3), 1e-9));
        assert!(collapsed.end().is_near(c.at(0.3), 1e-9));
    }

    #[test]
    fn test_reverse() {
        let c = Bezier::cubic((0.0, 0.0), (1.0, 3.0), (3.0, -2.0), (4.0, 1.0));
        assert_eq!(c.reverse().reverse(), c);
        for i in 0..=8 {
            let t = i as Scalar / 8.0;
            assert!(c.reverse().at(t).is_near(c.at(1.0 - t), 1e-9));
        }

        let l = Line::new((1.0, 2.0), (3.0, -4.0));
        assert_eq!(l.reverse().reverse(), l);
    }

    #[test]
    fn test_deriv() {
        let c = Bezier::cubic((0.0, 0.0), (1.0, 3.0), (3.0, -2.0), (4.0, 1.0));
        let d = c.deriv();
        // finite difference check
        let h = 1e-7;
        for i in 1..8 {
            let t = i as Scalar / 8.0;
            let fd = (c.at(t + h) - c.at(t - h)) / (2.0 * h);
            assert!(d.at(t).is_near(fd, 1e-5));
        }

        // degenerate curve derivative is stationary, not an error
        let p = Point::new(2.0, 2.0);
        let degenerate = Bezier::cubic(p, p, p, p);
        let d = degenerate.deriv();
        assert!(d.at(0.5).is_near(Point::new(0.0, 0.0), 1e-12));
        assert!(degenerate.extremities().is_empty());
    }

    #[test]
    fn test_extrapolation() {
        let l = Line::new((0.0, 0.0), (1.0, 1.0));
        assert!(l.at(2.0).is_close_to(Point::new(2.0, 2.0)));
        assert!(l.at(-1.0).is_close_to(Point::new(-1.0, -1.0)));

        // polynomial extension outside [0, 1] stays finite and smooth
        let c = Bezier::quad((0.0, 0.0), (1.0, 2.0), (2.0, 0.0));
        let p = c.at(1.5);
        assert!(p.x().is_finite() && p.y().is_finite());
    }

    #[test]
    fn test_bbox() {
        let cubic = Bezier::cubic((106.0, 0.0), (0.0, 100.0), (382.0, 216.0), (324.0, 14.0));
        let bbox = cubic.bbox(None);
        assert_approx_eq!(bbox.x(), 87.308, 0.001);
        assert_approx_eq!(bbox.y(), 0.0, 0.001);
        assert_approx_eq!(bbox.width(), 242.724, 0.001);
        assert_approx_eq!(bbox.height(), 125.140, 0.001);

        let quad = Bezier::quad((30.0, 90.0), (220.0, 200.0), (120.0, 50.0));
        let bbox = quad.bbox(None);
        assert_approx_eq!(bbox.x(), 30.0, 0.001);
        assert_approx_eq!(bbox.y(), 50.0, 0.001);
        assert_approx_eq!(bbox.width(), 124.483, 0.001);
        assert_approx_eq!(bbox.height(), 86.538, 0.001);
    }

    #[test]
    fn test_nearest() {
        let l = Line::new((0.0, 0.0), (4.0, 0.0));
        assert_approx_eq!(l.nearest(Point::new(1.0, 5.0), 0.0, 1.0).unwrap(), 0.25);
        // clamped to the requested interval
        assert_approx_eq!(l.nearest(Point::new(1.0, 5.0), 0.5, 1.0).unwrap(), 0.5);
        assert!(matches!(
            l.nearest(Point::new(1.0, 5.0), 0.5, 1.5),
            Err(Error::Range { .. })
        ));

        // collinear cubic evaluates to (3t, 0) exactly
        let c = Bezier::cubic((0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0));
        assert_approx_eq!(c.nearest(Point::new(1.5, 2.0), 0.0, 1.0).unwrap(), 0.5, 1e-6);

        // symmetric quad, nearest point to the apex is the apex parameter
        let q = Bezier::quad((0.0, 0.0), (1.0, 2.0), (2.0, 0.0));
        assert_approx_eq!(q.nearest(Point::new(1.0, 3.0), 0.0, 1.0).unwrap(), 0.5, 1e-6);

        // zero-length curve answers without dividing by zero
        let p = Point::new(1.0, 1.0);
        let degenerate = Bezier::quad(p, p, p);
        assert_approx_eq!(degenerate.nearest(Point::new(5.0, 5.0), 0.0, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn test_from_scalars() {
        let c = Bezier::from_scalars(&[0.0, 0.0, 1.0, 2.0, 2.0, 0.0]).unwrap();
        assert_eq!(c.degree(), 2);
        assert_eq!(c.points()[1], Point::new(1.0, 2.0));
        assert!(Bezier::from_scalars(&[1.0, 2.0, 3.0]).is_err());
        assert!(Bezier::from_scalars(&[]).is_err());
    }

    #[test]
    fn test_line_intersect() {
        let l0 = Line::new((0.0, 0.0), (2.0, 2.0));
        let l1 = Line::new((0.0, 2.0), (2.0, 0.0));
        let (t0, t1) = l0.intersect(l1).unwrap();
        assert_approx_eq!(t0, 0.5);
        assert_approx_eq!(t1, 0.5);
        assert!(l0.intersect_point(l1).unwrap().is_close_to(Point::new(1.0, 1.0)));

        // parallel lines do not intersect
        let l2 = Line::new((0.0, 1.0), (2.0, 3.0));
        assert!(l0.intersect(l2).is_none());
    }
}
