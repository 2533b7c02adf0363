//! Numeric helpers used across the library
use crate::{EPSILON, Scalar};
use smallvec::SmallVec;

/// Restrict value to a certain interval
#[inline]
pub fn clamp<T>(val: T, min: T, max: T) -> T
where
    T: PartialOrd,
{
    if val < min {
        min
    } else if val > max {
        max
    } else {
        val
    }
}

/// Determine if two scalars are equal within the margin of error (EPSILON)
#[inline]
pub fn near(v0: Scalar, v1: Scalar) -> bool {
    (v0 - v1).abs() < EPSILON
}

/// Determine if a scalar is zero within the margin of error (EPSILON)
#[inline]
pub fn near_zero(v: Scalar) -> bool {
    v.abs() < EPSILON
}

/// Binomial coefficient C(n, k) as a scalar
///
/// Multiplicative form, exact for the small degrees used by curve code.
pub(crate) fn binomial(n: usize, k: usize) -> Scalar {
    let k = k.min(n - k.min(n));
    let mut result = 1.0;
    for i in 0..k {
        result = result * (n - i) as Scalar / (i + 1) as Scalar;
    }
    result
}

/// Solve quadratic equation `a * t ^ 2 + b * t + c = 0` for `t`
#[allow(dead_code)]
pub(crate) fn quadratic_solve(a: Scalar, b: Scalar, c: Scalar) -> SmallVec<[Scalar; 2]> {
    let mut result = SmallVec::new();
    if a.abs() < EPSILON {
        if b.abs() > EPSILON {
            result.push(-c / b);
        }
        return result;
    }
    let disc = b * b - 4.0 * a * c;
    if disc.abs() < EPSILON {
        result.push(-b / (2.0 * a));
    } else if disc > 0.0 {
        let sq = disc.sqrt();
        // More stable solution than generic formula:
        // https://people.csail.mit.edu/bkph/articles/Quadratics.pdf
        if b >= 0.0 {
            let mul = -b - sq;
            result.push(mul / (2.0 * a));
            result.push(2.0 * c / mul);
        } else {
            let mul = -b + sq;
            result.push(2.0 * c / mul);
            result.push(mul / (2.0 * a));
        }
    }
    result
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[macro_export]
    macro_rules! assert_approx_eq {
        ( $v0:expr, $v1: expr ) => {{
            assert!(($v0 - $v1).abs() < $crate::EPSILON, "{} != {}", $v0, $v1);
        }};
        ( $v0:expr, $v1: expr, $e: expr ) => {{
            assert!(($v0 - $v1).abs() < $e, "{} != {}", $v0, $v1);
        }};
    }

    #[test]
    fn test_quadratic_solve() {
        fn solve_check(a: Scalar, b: Scalar, c: Scalar, roots: &[Scalar]) {
            const PREC: Scalar = 0.00001;
            let solutions = quadratic_solve(a, b, c);
            assert_eq!(solutions.len(), roots.len(), "root count mismatch");
            for (root, root_ref) in solutions.iter().zip(roots) {
                let value = a * root * root + b * root + c;
                assert!(value.abs() < PREC, "f(x = {}) = {} != 0", root, value);
                assert_approx_eq!(root, root_ref, PREC);
            }
        }

        solve_check(1.0, -5.0, 6.0, &[2.0, 3.0]);
        solve_check(1.0, -6.0, 9.0, &[3.0]);
        solve_check(1.0, 3.0, 5.0, &[]);
        // linear
        solve_check(0.0, 5.0, 10.0, &[-2.0]);
        // no slope at all
        solve_check(0.0, 0.0, 1.0, &[]);
    }

    #[test]
    fn test_binomial() {
        assert_approx_eq!(binomial(5, 0), 1.0);
        assert_approx_eq!(binomial(5, 2), 10.0);
        assert_approx_eq!(binomial(7, 3), 35.0);
        assert_approx_eq!(binomial(7, 4), 35.0);
    }
}
