//! Triangular membership functions.

use crate::error::InvalidTriangle;

/// Triangular membership function with vertices `a <= b <= c`.
///
/// The degree is 0 outside `[a, c]`, rises linearly to 1 at `b`, and falls
/// back to 0 at `c`. When `a == b` (or `b == c`) that edge becomes a vertical
/// step, so the whole `[a, b]` (or `[b, c]`) interval has degree 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    a: f64,
    b: f64,
    c: f64,
}

impl Triangle {
    /// # Errors
    ///
    /// Returns [`InvalidTriangle`] if any vertex is not finite or the vertices
    /// are out of order.
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self, InvalidTriangle> {
        let finite = a.is_finite() && b.is_finite() && c.is_finite();
        if !finite || a > b || b > c {
            return Err(InvalidTriangle { a, b, c });
        }
        Ok(Self { a, b, c })
    }

    /// # Errors
    ///
    /// Same as [`Triangle::new`].
    pub fn from_points(points: [f64; 3]) -> Result<Self, InvalidTriangle> {
        Self::new(points[0], points[1], points[2])
    }

    #[must_use]
    pub fn points(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }

    /// Degree of membership of `x`, in `[0, 1]`. `NaN` has degree 0.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn degree(&self, x: f64) -> f64 {
        if x.is_nan() || x < self.a || x > self.c {
            return 0.0;
        }
        if x == self.b {
            return 1.0;
        }
        if x < self.b {
            if self.a == self.b {
                1.0
            } else {
                (x - self.a) / (self.b - self.a)
            }
        } else if self.c == self.b {
            1.0
        } else {
            (self.c - x) / (self.c - self.b)
        }
    }
}

impl std::fmt::Display for Triangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "trimf[{}, {}, {}]", self.a, self.b, self.c)
    }
}
