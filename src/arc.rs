//! SVG-style elliptical arcs
//!
//! Arcs are built either from the SVG endpoint parameterization or directly
//! from a center representation. Construction is a pure function returning a
//! validated record; strict (non-SVG) mode reports infeasible input as typed
//! errors while SVG-compliant mode substitutes the nearest feasible geometry
//! per the SVG implementation notes (Appendix F.6).

use crate::{
    Axis, BBox, Curve, CurveExtremities, CurveRoots, Error, Line, PI, Point, Scalar, Segment,
    Transform,
    curve::nearest_range,
    utils::{near, near_zero},
};
use smallvec::SmallVec;
use std::fmt;

/// Tolerance for geometric predicates on arcs (radius collapse, angle match)
const ARC_NEAR: Scalar = 1e-9;

/// Geometric nearness, used where machine epsilon would be too strict
fn arc_near(v0: Scalar, v1: Scalar) -> bool {
    (v0 - v1).abs() < ARC_NEAR
}

const TAU: Scalar = 2.0 * PI;

fn mod_tau(angle: Scalar) -> Scalar {
    angle.rem_euclid(TAU)
}

/// Elliptical arc curve
///
/// Cached endpoints are exact: evaluation at parameters 0 and 1 returns them
/// bit for bit, which downstream path joining relies on.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EllipArc {
    center: Point,
    /// radius along x-axis before the rotation
    rx: Scalar,
    /// radius along y-axis before the rotation
    ry: Scalar,
    /// rotation of the ellipse x-axis
    phi: Scalar,
    /// angular position of the start point, in [0, 2π)
    start_angle: Scalar,
    /// angular position of the end point, in [0, 2π)
    end_angle: Scalar,
    /// true when the arc is traversed in the positive angular direction
    sweep: bool,
    large_arc: bool,
    /// governs how degenerate construction inputs are resolved
    svg_compliant: bool,
    from: Point,
    to: Point,
}

impl fmt::Debug for EllipArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Arc center:{:?} radius:{:?} phi:{:.3?} angles:{:.3?}..{:.3?} sweep:{} large:{}",
            self.center,
            Point([self.rx, self.ry]),
            self.phi,
            self.start_angle,
            self.end_angle,
            self.sweep,
            self.large_arc,
        )
    }
}

impl EllipArc {
    /// Convert arc from SVG endpoint arguments to a parametric curve
    ///
    /// `x_axis_rot` is in radians. With `svg_compliant` set, degenerate
    /// inputs (coinciding endpoints, a zero radius, radii too small for the
    /// endpoint separation) resolve silently per the SVG implementation
    /// notes; otherwise they are reported as `Error::Range`.
    #[allow(clippy::too_many_arguments)]
    pub fn from_endpoints(
        from: impl Into<Point>,
        to: impl Into<Point>,
        rx: Scalar,
        ry: Scalar,
        x_axis_rot: Scalar,
        large_arc: bool,
        sweep: bool,
        svg_compliant: bool,
    ) -> Result<Self, Error> {
        let from = from.into();
        let to = to.into();
        let rx = rx.abs();
        let ry = ry.abs();
        let phi = mod_tau(x_axis_rot);
        let chord = from - to;

        if svg_compliant {
            if from == to {
                return Ok(Self {
                    center: from,
                    rx: 0.0,
                    ry: 0.0,
                    phi: 0.0,
                    start_angle: 0.0,
                    end_angle: 0.0,
                    sweep: false,
                    large_arc: false,
                    svg_compliant,
                    from,
                    to,
                });
            }
            if rx < ARC_NEAR || ry < ARC_NEAR {
                // arc collapses to its chord, traced as a zero-height ellipse
                return Ok(Self {
                    center: 0.5 * (from + to),
                    rx: chord.length() / 2.0,
                    ry: 0.0,
                    phi: mod_tau(chord.y().atan2(chord.x())),
                    start_angle: 0.0,
                    end_angle: PI,
                    sweep: false,
                    large_arc: false,
                    svg_compliant,
                    from,
                    to,
                });
            }
        } else {
            if from.is_near(to, ARC_NEAR) {
                if rx < ARC_NEAR && ry < ARC_NEAR {
                    return Ok(Self {
                        center: from,
                        rx,
                        ry,
                        phi,
                        start_angle: 0.0,
                        end_angle: 0.0,
                        sweep,
                        large_arc,
                        svg_compliant,
                        from,
                        to,
                    });
                }
                return Err(Error::Range {
                    reason: "initial and final point are the same",
                });
            }
            if rx < ARC_NEAR && ry < ARC_NEAR {
                return Err(Error::Range {
                    reason: "no ellipse satisfies the constraints: both radii are zero but the endpoints differ",
                });
            }
            if ry < ARC_NEAR {
                return Self::resolve_strict_flat(
                    from, to, rx, ry, phi, large_arc, sweep, /* flat_axis_rot */ phi,
                    /* start */ 0.0, /* end */ PI, rx,
                );
            }
            if rx < ARC_NEAR {
                // the chord must lie along the rotated y-axis instead
                return Self::resolve_strict_flat(
                    from,
                    to,
                    rx,
                    ry,
                    phi,
                    large_arc,
                    sweep,
                    mod_tau(phi + PI / 2.0),
                    PI / 2.0,
                    3.0 * PI / 2.0,
                    ry,
                );
            }
        }

        // SVG implementation notes F.6.5: center parameterization
        let p = Transform::identity().rotate(-phi).apply(0.5 * chord);
        let mid = 0.5 * (from + to);
        let rxpy = rx * p.y();
        let rypx = ry * p.x();
        let den = rxpy * rxpy + rypx * rypx;
        let rad = (rx * rx) * (ry * ry) / den;

        let (rx, ry, c, center) = if rad > 1.0 {
            let mut sq = (rad - 1.0).sqrt();
            if large_arc == sweep {
                sq = -sq;
            }
            let c = sq * Point::new(rxpy / ry, -rypx / rx);
            let center = Transform::identity().rotate(phi).apply(c) + mid;
            (rx, ry, c, center)
        } else if svg_compliant || arc_near(rad, 1.0) {
            // radii too small for the endpoint separation, scale them up
            let lambda = (1.0 / rad).sqrt();
            (rx * lambda, ry * lambda, Point::new(0.0, 0.0), mid)
        } else {
            return Err(Error::Range {
                reason: "no ellipse satisfies the constraints: radii too small for the endpoints",
            });
        };

        let sp = Point::new((p.x() - c.x()) / rx, (p.y() - c.y()) / ry);
        let ep = Point::new((-p.x() - c.x()) / rx, (-p.y() - c.y()) / ry);
        let x_dir = Point::new(1.0, 0.0);
        let degenerate_angles = Error::Logical {
            reason: "arc endpoint collapsed onto the ellipse center",
        };
        let mut start_angle = x_dir.angle_between(sp).ok_or(degenerate_angles.clone())?;
        let mut sweep_angle = sp.angle_between(ep).ok_or(degenerate_angles)?;
        if !sweep && sweep_angle > 0.0 {
            sweep_angle -= TAU;
        }
        if sweep && sweep_angle < 0.0 {
            sweep_angle += TAU;
        }
        if start_angle < 0.0 {
            start_angle += TAU;
        }
        let end_angle = mod_tau(start_angle + sweep_angle);

        Ok(Self {
            center,
            rx,
            ry,
            phi,
            start_angle,
            end_angle,
            sweep,
            large_arc,
            svg_compliant,
            from,
            to,
        })
    }

    /// Strict-mode resolution when one radius is zero
    ///
    /// The chord must lie exactly on the implied ellipse axis and span the
    /// full diameter, otherwise the configuration is either unsatisfiable
    /// (chord too long) or ambiguous (chord too short).
    #[allow(clippy::too_many_arguments)]
    fn resolve_strict_flat(
        from: Point,
        to: Point,
        rx: Scalar,
        ry: Scalar,
        phi: Scalar,
        large_arc: bool,
        sweep: bool,
        flat_axis_rot: Scalar,
        start: Scalar,
        end: Scalar,
        radius: Scalar,
    ) -> Result<Self, Error> {
        let v = from - to;
        let len_sq = v.dot(v);
        let diam_sq = 4.0 * radius * radius;
        if arc_near(len_sq / diam_sq, 1.0) {
            let angle = mod_tau(v.y().atan2(v.x()));
            let arc = |start_angle, end_angle| Self {
                center: 0.5 * v + to,
                rx,
                ry,
                phi,
                start_angle,
                end_angle,
                sweep,
                large_arc,
                svg_compliant: false,
                from,
                to,
            };
            if arc_near(angle, flat_axis_rot) {
                return Ok(arc(start, end));
            }
            if arc_near(mod_tau(angle - PI), flat_axis_rot) {
                return Ok(arc(end, start));
            }
            return Err(Error::Range {
                reason: "no ellipse satisfies the constraints: chord of a flat arc is not aligned with its axis",
            });
        }
        if len_sq > diam_sq {
            Err(Error::Range {
                reason: "no ellipse satisfies the constraints: endpoint separation exceeds the diameter of a flat arc",
            })
        } else {
            Err(Error::Range {
                reason: "infinitely many ellipses satisfy the constraints: flat arc with a chord shorter than its diameter",
            })
        }
    }

    /// Construct arc directly from its center representation
    ///
    /// Angles are taken modulo 2π, the large-arc flag is derived from the
    /// swept angle and the endpoints are computed and cached.
    #[allow(clippy::too_many_arguments)]
    pub fn from_center(
        center: impl Into<Point>,
        rx: Scalar,
        ry: Scalar,
        x_axis_rot: Scalar,
        start_angle: Scalar,
        end_angle: Scalar,
        sweep: bool,
        svg_compliant: bool,
    ) -> Self {
        let mut arc = Self {
            center: center.into(),
            rx: rx.abs(),
            ry: ry.abs(),
            phi: mod_tau(x_axis_rot),
            start_angle: mod_tau(start_angle),
            end_angle: mod_tau(end_angle),
            sweep,
            large_arc: false,
            svg_compliant,
            from: Point::new(0.0, 0.0),
            to: Point::new(0.0, 0.0),
        };
        arc.large_arc = arc.sweep_angle() > PI;
        arc.from = arc.point_at_angle(arc.start_angle);
        arc.to = arc.point_at_angle(arc.end_angle);
        arc
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Radius along the given axis of the un-rotated ellipse
    pub fn ray(&self, axis: Axis) -> Scalar {
        match axis {
            Axis::X => self.rx,
            Axis::Y => self.ry,
        }
    }

    /// Rotation of the ellipse x-axis, in [0, 2π)
    pub fn rotation(&self) -> Scalar {
        self.phi
    }

    pub fn start_angle(&self) -> Scalar {
        self.start_angle
    }

    pub fn end_angle(&self) -> Scalar {
        self.end_angle
    }

    pub fn sweep(&self) -> bool {
        self.sweep
    }

    pub fn large_arc(&self) -> bool {
        self.large_arc
    }

    pub fn is_svg_compliant(&self) -> bool {
        self.svg_compliant
    }

    /// Magnitude of the swept angle, in [0, 2π)
    pub fn sweep_angle(&self) -> Scalar {
        let d = if self.sweep {
            self.end_angle - self.start_angle
        } else {
            self.start_angle - self.end_angle
        };
        mod_tau(d)
    }

    /// Angular position corresponding to parameter `t`
    ///
    /// Defined for any `t`: values outside [0, 1] extend the sweep.
    pub fn angle_at(&self, t: Scalar) -> Scalar {
        let sa = if self.sweep {
            self.sweep_angle()
        } else {
            -self.sweep_angle()
        };
        mod_tau(self.start_angle + sa * t)
    }

    /// Map an angle in [0, 2π) back to the arc parameter
    ///
    /// The result is in [0, 1] only when the angle lies on the arc.
    pub fn angle_to_param(&self, angle: Scalar) -> Scalar {
        let sweep_angle = self.sweep_angle();
        if sweep_angle < ARC_NEAR {
            return 0.0;
        }
        let d = if self.sweep {
            angle - self.start_angle
        } else {
            self.start_angle - angle
        };
        mod_tau(d) / sweep_angle
    }

    /// Point on the full ellipse at the given angular position
    pub fn point_at_angle(&self, angle: Scalar) -> Point {
        let (sin_p, cos_p) = self.phi.sin_cos();
        let (sin_t, cos_t) = angle.sin_cos();
        Point::new(
            self.rx * cos_p * cos_t - self.ry * sin_p * sin_t + self.center.x(),
            self.rx * sin_p * cos_t + self.ry * cos_p * sin_t + self.center.y(),
        )
    }

    /// Single coordinate of `point_at_angle`
    pub fn value_at_angle(&self, angle: Scalar, axis: Axis) -> Scalar {
        self.point_at_angle(angle).coord(axis)
    }

    /// Whether the angular position lies on the swept range
    pub fn contains_angle(&self, angle: Scalar) -> bool {
        let (start, end) = (self.start_angle, self.end_angle);
        if self.sweep {
            if start < end {
                !(angle < start || angle > end)
            } else {
                !(angle < start && angle > end)
            }
        } else if start > end {
            !(angle > start || angle < end)
        } else {
            !(angle > start && angle < end)
        }
    }

    /// True parametric tangent d/dt
    pub(crate) fn velocity(&self, t: Scalar) -> Point {
        let (sin_p, cos_p) = self.phi.sin_cos();
        let (sin_t, cos_t) = self.angle_at(t).sin_cos();
        let d_angle = Point::new(
            -self.rx * cos_p * sin_t - self.ry * sin_p * cos_t,
            -self.rx * sin_p * sin_t + self.ry * cos_p * cos_t,
        );
        let dadt = if self.sweep {
            self.sweep_angle()
        } else {
            -self.sweep_angle()
        };
        dadt * d_angle
    }

    /// Angle-parameterized derivative of the arc
    ///
    /// The derivative of an ellipse parameterization is the same ellipse
    /// about the origin with the angular domain shifted by 90°.
    pub fn derivative(&self) -> Self {
        let mut result = *self;
        result.center = Point::new(0.0, 0.0);
        result.start_angle = mod_tau(self.start_angle + PI / 2.0);
        result.end_angle = mod_tau(self.end_angle + PI / 2.0);
        result.from = result.point_at_angle(result.start_angle);
        result.to = result.point_at_angle(result.end_angle);
        result
    }

    /// All parameters where the arc crosses value `v` along `axis`
    pub fn roots(&self, v: Scalar, axis: Axis) -> Result<CurveRoots, Error> {
        let mut sol = CurveRoots::new();

        if self.rx < ARC_NEAR && self.ry < ARC_NEAR {
            // a degenerate point either sits on the value or it does not
            if self.center.coord(axis) == v {
                sol.push(0.0);
            }
            return Ok(sol);
        }

        for dim in [Axis::X, Axis::Y] {
            if self.ray(dim) >= ARC_NEAR {
                continue;
            }
            // one ray is zero: the arc is a chord, solved through the
            // inverse trigonometric angle map
            let start_v = self.from.coord(axis);
            let end_v = self.to.coord(axis);
            if start_v == v && end_v == v {
                return Err(Error::InfiniteSolutions);
            }
            if start_v < end_v && (start_v > v || end_v < v) {
                return Ok(sol);
            }
            if start_v > end_v && (end_v > v || start_v < v) {
                return Ok(sol);
            }
            let (sin_p, cos_p) = self.phi.sin_cos();
            let ray_prj = match (axis, dim) {
                (Axis::X, Axis::X) => -self.ry * sin_p,
                (Axis::X, Axis::Y) => self.rx * cos_p,
                (Axis::Y, Axis::X) => self.ry * cos_p,
                (Axis::Y, Axis::Y) => self.rx * sin_p,
            };

            let s = (v - self.center.coord(axis)) / ray_prj;
            if !(-1.0..=1.0).contains(&s) {
                return Err(Error::Logical {
                    reason: "projected axis ratio outside [-1, 1] while solving a flat arc",
                });
            }
            let angle = match dim {
                Axis::X => {
                    // asin maps into [-π/2, π/2]
                    let mut a = s.asin();
                    if self.sweep != arc_near(self.start_angle, PI / 2.0) {
                        if a < 0.0 {
                            a += TAU;
                        }
                    } else {
                        a = PI - a;
                        if a >= TAU {
                            a -= TAU;
                        }
                    }
                    a
                }
                Axis::Y => {
                    // acos maps into [0, π]
                    let mut a = s.acos();
                    if self.sweep != arc_near(self.start_angle, 0.0) {
                        a = TAU - a;
                        if a >= TAU {
                            a -= TAU;
                        }
                    }
                    a
                }
            };
            let t = self.angle_to_param(angle);
            if (0.0..=1.0).contains(&t) {
                sol.push(t);
            }
            return Ok(sol);
        }

        // general case: quadratic in s = tan(angle / 2) from the rational
        // parameterization cos = (1 - s^2)/(1 + s^2), sin = 2s/(1 + s^2)
        let (sin_p, cos_p) = self.phi.sin_cos();
        let (rot_c, rot_s) = match axis {
            Axis::X => (cos_p, -sin_p),
            Axis::Y => (sin_p, cos_p),
        };
        let rx_rot = self.rx * rot_c;
        let c_v = self.center.coord(axis) - v;

        let a = -rx_rot + c_v;
        let b = self.ry * rot_s;
        let c = rx_rot + c_v;

        let mut angles: SmallVec<[Scalar; 2]> = SmallVec::new();
        if near_zero(a) {
            // leading coefficient vanished, s -> infinity is a solution
            angles.push(PI);
            if !near_zero(b) {
                angles.push(mod_tau(2.0 * (-c / (2.0 * b)).atan()));
            }
        } else {
            let delta = b * b - a * c;
            if near_zero(delta) {
                angles.push(mod_tau(2.0 * (-b / a).atan()));
            } else if delta > 0.0 {
                let sq = delta.sqrt();
                angles.push(mod_tau(2.0 * ((-b - sq) / a).atan()));
                angles.push(mod_tau(2.0 * ((-b + sq) / a).atan()));
            }
        }

        for angle in angles {
            let t = self.angle_to_param(angle);
            if (0.0..=1.0).contains(&t) {
                sol.push(t);
            }
        }
        Ok(sol)
    }

    /// All parameters in `[from, to]` nearest to `p`, ties included
    ///
    /// The general case reduces the stationarity condition of the squared
    /// distance to a quartic in tan(angle / 2); the requested range ends
    /// participate in the comparison since the minimum may be a boundary.
    pub fn all_nearest(
        &self,
        p: Point,
        from: Scalar,
        to: Scalar,
    ) -> Result<SmallVec<[Scalar; 4]>, Error> {
        let (from, to) = nearest_range(from, to)?;
        let mut result: SmallVec<[Scalar; 4]> = SmallVec::new();

        if (self.rx < ARC_NEAR && self.ry < ARC_NEAR) || near(from, to) {
            result.push(from);
            return Ok(result);
        }

        if self.rx < ARC_NEAR || self.ry < ARC_NEAR {
            // flat arc: project on the chord, then recover the parameter
            // through the axis-roots machinery
            let seg = Line::new(self.at(from), self.at(to));
            let np = seg.at(seg.nearest_clamped(p));
            let vertical = arc_near(self.phi, PI / 2.0) || arc_near(self.phi, 3.0 * PI / 2.0);
            let sol = if self.ry < ARC_NEAR {
                if vertical {
                    self.roots(np.y(), Axis::Y)?
                } else {
                    self.roots(np.x(), Axis::X)?
                }
            } else if vertical {
                self.roots(np.x(), Axis::X)?
            } else {
                self.roots(np.y(), Axis::Y)?
            };
            result.extend(sol.into_iter().filter(|t| !(*t < from || *t > to)));
            if result.is_empty() {
                // the projection fell outside the queried piece
                let closer = if p.dist_sq(self.at(from)) <= p.dist_sq(self.at(to)) {
                    from
                } else {
                    to
                };
                result.push(closer);
            }
            return Ok(result);
        }

        if near(self.rx, self.ry) && p.is_near(self.center, ARC_NEAR) {
            // every point of a circle is equally near its center
            return Err(Error::InfiniteSolutions);
        }

        // quartic in s = tan(angle / 2) from <E(t) - p | D(E(t), t)> = 0
        let p_c = p - self.center;
        let rx2_ry2 = (self.rx - self.ry) * (self.rx + self.ry);
        let (sin_p, cos_p) = self.phi.sin_cos();
        let expr1 = self.rx * (p_c.x() * cos_p + p_c.y() * sin_p);
        let c4 = self.ry * (p_c.y() * cos_p - p_c.x() * sin_p);
        let c3 = 2.0 * (rx2_ry2 + expr1);
        let c1 = 2.0 * (-rx2_ry2 + expr1);
        let c0 = -c4;

        let mut real: SmallVec<[Scalar; 5]> = SmallVec::new();
        if near_zero(c4) {
            // a general quartic solve is ill-conditioned with a vanishing
            // leading coefficient; seed the boundary solution and back-solve
            real.push(0.0);
            if !near_zero(c3) {
                let sq = -c1 / c3;
                if sq > 0.0 {
                    let s = sq.sqrt();
                    real.push(s);
                    real.push(-s);
                }
            }
        } else {
            real.extend(
                roots::find_roots_quartic(c4, c3, 0.0, c1, c0)
                    .as_ref()
                    .iter()
                    .copied(),
            );
        }

        let mut angles: SmallVec<[Scalar; 5]> = real
            .into_iter()
            .map(|s| mod_tau(2.0 * s.atan()))
            .collect();
        // s -> infinity maps to the angle π, present whenever the quartic
        // degree dropped by one
        if angles.len() % 2 != 0 {
            angles.push(PI);
        }
        if angles.is_empty() {
            angles.push(0.0);
            angles.push(PI);
        }

        // two best candidates over the full ellipse
        let mut best = (Scalar::MAX, 0usize);
        let mut second = (Scalar::MAX, 0usize);
        for (i, angle) in angles.iter().enumerate() {
            let dsq = p.dist_sq(self.point_at_angle(*angle));
            if dsq < best.0 {
                second = best;
                best = (dsq, i);
            } else if dsq < second.0 {
                second = (dsq, i);
            }
        }

        let t = self.angle_to_param(angles[best.1]);
        if !(t < from || t > to) {
            result.push(t);
        }
        let mut second_sol = false;
        if angles.len() == 4 {
            let t = self.angle_to_param(angles[second.1]);
            if !(t < from || t > to) && (result.is_empty() || near(best.0, second.0)) {
                result.push(t);
                second_sol = true;
            }
        }

        // the minimum may sit on the range boundary, not at a stationary point
        let dsq_from = p.dist_sq(self.at(from));
        let dsq_to = p.dist_sq(self.at(to));
        if second_sol {
            let mut min2 = second.0;
            if min2 > dsq_from {
                result.clear();
                result.push(from);
                min2 = dsq_from;
            } else if near(min2, dsq_from) {
                result.push(from);
            }
            if min2 > dsq_to {
                result.clear();
                result.push(to);
            } else if near(min2, dsq_to) {
                result.push(to);
            }
        } else if result.is_empty() {
            if near(dsq_from, dsq_to) {
                result.push(from);
                result.push(to);
            } else if dsq_to > dsq_from {
                result.push(from);
            } else {
                result.push(to);
            }
        }

        Ok(result)
    }
}

impl Curve for EllipArc {
    fn transform(&self, tr: Transform) -> Self {
        if self.rx < ARC_NEAR || self.ry < ARC_NEAR {
            // flat arcs keep their shape class, only the axis moves
            let x_dir = Point::polar(self.phi);
            let y_dir = Point::new(-self.phi.sin(), self.phi.cos());
            let x_img = tr.apply_linear(x_dir);
            let y_img = tr.apply_linear(y_dir);
            let mut out = *self;
            out.center = tr.apply(self.center);
            out.from = tr.apply(self.from);
            out.to = tr.apply(self.to);
            out.rx = self.rx * x_img.length();
            out.ry = self.ry * y_img.length();
            out.phi = if self.rx >= ARC_NEAR {
                mod_tau(x_img.y().atan2(x_img.x()))
            } else {
                mod_tau(y_img.y().atan2(y_img.x()) - PI / 2.0)
            };
            if tr.det() < 0.0 {
                out.sweep = !self.sweep;
            }
            return out;
        }

        // canonical ellipse intermediate: the coefficients of the arc are
        // not mapped directly, the supporting ellipse is
        let ellipse = Ellipse {
            center: self.center,
            rx: self.rx,
            ry: self.ry,
            rot: self.phi,
        };
        let et = ellipse.transformed(tr);
        let from = tr.apply(self.from);
        let to = tr.apply(self.to);
        let inner = tr.apply(self.at(0.5));

        let start_angle = et.angle_of(from);
        let end_angle = et.angle_of(to);
        let inner_angle = et.angle_of(inner);

        // pick the sweep direction whose range covers the mapped midpoint
        let fwd_inner = mod_tau(inner_angle - start_angle);
        let fwd_end = mod_tau(end_angle - start_angle);
        let sweep = fwd_inner <= fwd_end;

        let mut out = Self {
            center: et.center,
            rx: et.rx,
            ry: et.ry,
            phi: et.rot,
            start_angle,
            end_angle,
            sweep,
            large_arc: false,
            svg_compliant: self.svg_compliant,
            from,
            to,
        };
        out.large_arc = out.sweep_angle() > PI;
        out
    }

    fn start(&self) -> Point {
        self.from
    }

    fn end(&self) -> Point {
        self.to
    }

    fn at(&self, t: Scalar) -> Point {
        if t == 0.0 {
            return self.from;
        }
        if t == 1.0 {
            return self.to;
        }
        self.point_at_angle(self.angle_at(t))
    }

    fn deriv(&self) -> Segment {
        self.derivative().into()
    }

    fn cut(&self, a: Scalar, b: Scalar) -> Self {
        let a = crate::clamp(a, 0.0, 1.0);
        let b = crate::clamp(b, 0.0, 1.0);

        if near(a, b) {
            // collapse to an all-endpoints-equal curve at that point
            let point = self.at(a);
            let mut arc = *self;
            arc.center = point;
            arc.from = point;
            arc.to = point;
            arc.rx = 0.0;
            arc.ry = 0.0;
            arc.start_angle = self.start_angle;
            arc.end_angle = self.start_angle;
            return arc;
        }

        let from = self.at(a);
        let to = self.at(b);
        let sa = if self.sweep {
            self.sweep_angle()
        } else {
            -self.sweep_angle()
        };
        let mut arc = *self;
        arc.from = from;
        arc.to = to;
        arc.start_angle = mod_tau(self.start_angle + sa * a);
        arc.end_angle = mod_tau(self.start_angle + sa * b);
        if a > b {
            arc.sweep = !self.sweep;
        }
        if self.large_arc && arc.sweep_angle() < PI {
            arc.large_arc = false;
        }
        arc
    }

    fn reverse(&self) -> Self {
        let mut arc = *self;
        arc.sweep = !self.sweep;
        arc.start_angle = self.end_angle;
        arc.end_angle = self.start_angle;
        arc.from = self.to;
        arc.to = self.from;
        arc
    }

    fn bbox(&self, init: Option<BBox>) -> BBox {
        let mut bbox = BBox::new(self.from, self.to).union_opt(init);
        let (sin_p, cos_p) = self.phi.sin_cos();
        let ext_x = (-self.ry * sin_p).atan2(self.rx * cos_p);
        let ext_y = (self.ry * cos_p).atan2(self.rx * sin_p);
        for extreme in [ext_x, ext_x + PI, ext_y, ext_y + PI] {
            let angle = mod_tau(extreme);
            if self.contains_angle(angle) {
                bbox = bbox.extend(self.point_at_angle(angle));
            }
        }
        bbox
    }

    fn extremities(&self) -> CurveExtremities {
        let mut result = CurveExtremities::new();
        let deriv = self.derivative();
        for axis in [Axis::X, Axis::Y] {
            // a constant component has no isolated turning points
            if let Ok(roots) = deriv.roots(0.0, axis) {
                result.extend(roots);
            }
        }
        result
    }

    fn roots(&self, v: Scalar, axis: Axis) -> Result<CurveRoots, Error> {
        EllipArc::roots(self, v, axis)
    }

    fn nearest(&self, p: Point, from: Scalar, to: Scalar) -> Result<Scalar, Error> {
        let all = self.all_nearest(p, from, to)?;
        all.first().copied().ok_or(Error::Logical {
            reason: "nearest-point search produced no candidate",
        })
    }
}

/// Canonical ellipse, the supporting shape of an arc
///
/// Used as the intermediate representation when transforming arcs: the
/// image of an ellipse under an affine map is again an ellipse, recovered
/// from the mapped unit-circle transform.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ellipse {
    pub center: Point,
    pub rx: Scalar,
    pub ry: Scalar,
    pub rot: Scalar,
}

impl Ellipse {
    /// Image of the ellipse under an affine map
    pub fn transformed(&self, tr: Transform) -> Ellipse {
        // unit circle -> ellipse transform, composed with the map
        let m = tr.matmul(
            Transform::identity()
                .translate(self.center.x(), self.center.y())
                .rotate(self.rot)
                .scale(self.rx, self.ry),
        );
        let [m00, m01, _, m10, m11, _] = m.coefs();

        // eigen split of M * M^T gives the squared radii and the axis angle
        let e00 = m00 * m00 + m01 * m01;
        let e01 = m00 * m10 + m01 * m11;
        let e11 = m10 * m10 + m11 * m11;
        let trace_half = (e00 + e11) / 2.0;
        let diff_half = (e00 - e11) / 2.0;
        let det_part = (diff_half * diff_half + e01 * e01).sqrt();
        let rot = 0.5 * (2.0 * e01).atan2(e00 - e11);

        Ellipse {
            center: tr.apply(self.center),
            rx: (trace_half + det_part).max(0.0).sqrt(),
            ry: (trace_half - det_part).max(0.0).sqrt(),
            rot: mod_tau(rot),
        }
    }

    /// Angular position of a point assumed to lie on the ellipse, in [0, 2π)
    pub fn angle_of(&self, p: Point) -> Scalar {
        if self.rx < ARC_NEAR || self.ry < ARC_NEAR {
            return 0.0;
        }
        let u = Transform::identity()
            .rotate(-self.rot)
            .apply(p - self.center);
        mod_tau((u.y() / self.ry).atan2(u.x() / self.rx))
    }
}
