use crate::{
    BBox, Curve, EllipArc, Error, Line, Point, Scalar, Segment, Transform, intersect::winding,
};
use std::fmt;

/// Rule deciding which winding numbers count as interior
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillRule {
    NonZero,
    EvenOdd,
}

/// Non-empty sequence of curves where the end of each curve coincides with
/// the start of the next one.
///
/// A closed path has an implicit line segment connecting its end back to
/// its start; the crossing and winding machinery accounts for it.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    segments: Vec<Segment>,
    closed: bool,
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in self.segments.iter() {
            writeln!(f, "{:?}", segment)?;
        }
        if self.closed {
            writeln!(f, "Close")
        } else {
            writeln!(f, "End")
        }
    }
}

impl Path {
    pub fn new(segments: Vec<Segment>, closed: bool) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments, closed })
        }
    }

    /// Convenience method to create `PathBuilder`
    pub fn builder() -> PathBuilder {
        PathBuilder::new()
    }

    pub fn closed(&self) -> bool {
        self.closed
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn first(&self) -> &Segment {
        self.segments.first().expect("Path is never empty")
    }

    pub fn last(&self) -> &Segment {
        self.segments.last().expect("Path is never empty")
    }

    pub fn start(&self) -> Point {
        self.first().start()
    }

    pub fn end(&self) -> Point {
        self.last().end()
    }

    /// The implicit closing line, when the path is closed and does not
    /// already join up
    pub(crate) fn closing_segment(&self) -> Option<Line> {
        if self.closed && !self.end().is_close_to(self.start()) {
            Some(Line::new(self.end(), self.start()))
        } else {
            None
        }
    }

    /// Apply transformation to the path, producing a new path
    pub fn transform(&self, tr: Transform) -> Self {
        Self {
            segments: self
                .segments
                .iter()
                .map(|segment| segment.transform(tr))
                .collect(),
            closed: self.closed,
        }
    }

    pub fn reverse(&self) -> Self {
        Self {
            segments: self.segments.iter().rev().map(|s| s.reverse()).collect(),
            closed: self.closed,
        }
    }

    pub fn bbox(&self, init: Option<BBox>) -> BBox {
        self.segments
            .iter()
            .fold(init, |bbox, seg| Some(seg.bbox(bbox)))
            .expect("Path is never empty")
    }

    /// Winding number of the path around `p`
    ///
    /// The path is treated as closed; see `intersect::winding`.
    pub fn winding(&self, p: Point) -> i32 {
        winding(self, p)
    }

    /// Whether `p` lies inside the path under the given fill rule
    pub fn contains(&self, p: Point, fill_rule: FillRule) -> bool {
        let w = self.winding(p);
        match fill_rule {
            FillRule::NonZero => w != 0,
            FillRule::EvenOdd => w % 2 != 0,
        }
    }
}

/// Path builder similar to the builder of an SVG path element
#[derive(Debug, Clone)]
pub struct PathBuilder {
    position: Point,
    segments: Vec<Segment>,
    closed: bool,
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            position: Point::new(0.0, 0.0),
            segments: Vec::new(),
            closed: false,
        }
    }

    /// Build the path; empty builders produce nothing
    pub fn build(self) -> Option<Path> {
        Path::new(self.segments, self.closed)
    }

    /// Move the starting position of the path
    pub fn move_to(mut self, p: impl Into<Point>) -> Self {
        self.position = p.into();
        self
    }

    /// Close the path with an implicit line to its start
    pub fn close(mut self) -> Self {
        self.closed = true;
        self
    }

    /// Add a line segment ending at `p`
    pub fn line_to(mut self, p: impl Into<Point>) -> Self {
        let p = p.into();
        if !self.position.is_close_to(p) {
            let line = Line::new(self.position, p);
            self.position = line.end();
            self.segments.push(line.into());
        }
        self
    }

    /// Add a quadratic bezier ending at `p2` with control point `p1`
    pub fn quad_to(mut self, p1: impl Into<Point>, p2: impl Into<Point>) -> Self {
        let quad = crate::Bezier::quad(self.position, p1.into(), p2.into());
        self.position = quad.end();
        self.segments.push(quad.into());
        self
    }

    /// Add a cubic bezier ending at `p3` with control points `p1` and `p2`
    pub fn cubic_to(
        mut self,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> Self {
        let cubic = crate::Bezier::cubic(self.position, p1.into(), p2.into(), p3.into());
        self.position = cubic.end();
        self.segments.push(cubic.into());
        self
    }

    /// Add an SVG-compliant elliptical arc ending at `p`
    pub fn arc_to(
        mut self,
        radii: impl Into<Point>,
        x_axis_rot: Scalar,
        large: bool,
        sweep: bool,
        p: impl Into<Point>,
    ) -> Self {
        let radii = radii.into();
        let p = p.into();
        let arc = EllipArc::from_endpoints(
            self.position,
            p,
            radii.x(),
            radii.y(),
            x_axis_rot,
            large,
            sweep,
            /* svg_compliant */ true,
        );
        match arc {
            Ok(arc) => {
                self.position = arc.end();
                self.segments.push(arc.into());
                self
            }
            Err(_) => self.line_to(p),
        }
    }

    /// Current position of the builder
    pub fn position(&self) -> Point {
        self.position
    }
}

/// Construct a strict-mode arc and surface construction failures
///
/// Unlike `PathBuilder::arc_to`, infeasible input is an error, not a
/// silently substituted geometry.
pub fn strict_arc(
    from: impl Into<Point>,
    to: impl Into<Point>,
    radii: impl Into<Point>,
    x_axis_rot: Scalar,
    large: bool,
    sweep: bool,
) -> Result<EllipArc, Error> {
    let radii = radii.into();
    EllipArc::from_endpoints(
        from.into(),
        to.into(),
        radii.x(),
        radii.y(),
        x_axis_rot,
        large,
        sweep,
        /* svg_compliant */ false,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let path = Path::builder()
            .move_to((0.0, 0.0))
            .line_to((1.0, 0.0))
            .line_to((1.0, 1.0))
            .line_to((0.0, 1.0))
            .close()
            .build()
            .unwrap();
        assert_eq!(path.segments().len(), 3);
        assert!(path.closed());
        assert!(path.closing_segment().is_some());
        assert_eq!(path.start(), Point::new(0.0, 0.0));
        assert_eq!(path.end(), Point::new(0.0, 1.0));

        // repeated point does not produce a degenerate line
        let path = Path::builder()
            .move_to((0.0, 0.0))
            .line_to((0.0, 0.0))
            .line_to((2.0, 0.0))
            .build()
            .unwrap();
        assert_eq!(path.segments().len(), 1);
    }

    #[test]
    fn test_empty_builder() {
        assert!(PathBuilder::new().build().is_none());
    }

    #[test]
    fn test_reverse_transform() {
        let path = Path::builder()
            .move_to((0.0, 0.0))
            .line_to((2.0, 0.0))
            .quad_to((3.0, 1.0), (2.0, 2.0))
            .build()
            .unwrap();

        let rev = path.reverse();
        assert_eq!(rev.start(), path.end());
        assert_eq!(rev.end(), path.start());

        let moved = path.transform(Transform::identity().translate(1.0, 1.0));
        assert_eq!(moved.start(), Point::new(1.0, 1.0));
    }

    #[test]
    fn test_arc_to_fallback() {
        // zero radii degenerate to the chord but keep the path connected
        let path = Path::builder()
            .move_to((0.0, 0.0))
            .arc_to((0.0, 0.0), 0.0, false, true, (2.0, 0.0))
            .build()
            .unwrap();
        assert_eq!(path.segments().len(), 1);
        assert!(path.end().is_close_to(Point::new(2.0, 0.0)));
    }

    #[test]
    fn test_strict_arc() {
        assert!(strict_arc((0.0, 0.0), (10.0, 0.0), (1.0, 1.0), 0.0, false, true).is_err());
        let arc = strict_arc((1.0, 0.0), (0.0, 1.0), (1.0, 1.0), 0.0, false, true).unwrap();
        assert_eq!(arc.start(), Point::new(1.0, 0.0));
    }
}
