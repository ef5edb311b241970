//! Discretized universes of discourse.

use crate::error::InvalidUniverse;

/// Ordered sample grid covering a variable's valid range.
///
/// Membership of crisp inputs is evaluated exactly, so the grid only matters
/// for consequents, where it sets the precision of defuzzification.
#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    points: Vec<f64>,
}

impl Universe {
    /// Evenly spaced grid from `min` to `max` inclusive.
    ///
    /// When `step` does not divide the range, `max` is appended as a final,
    /// shorter step so the whole range stays covered.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidUniverse`] if the bounds are not finite, `min >= max`,
    /// or `step` is not positive.
    pub fn range(min: f64, max: f64, step: f64) -> Result<Self, InvalidUniverse> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(InvalidUniverse(format!("range [{min}, {max}] is empty")));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(InvalidUniverse(format!("step {step} must be positive")));
        }

        // Tolerance keeps 2.0 / 0.1 from flooring to 19.
        let intervals = ((max - min) / step + 1e-9).floor();
        if intervals > 10_000_000.0 {
            return Err(InvalidUniverse(format!(
                "step {step} over [{min}, {max}] yields too many grid points"
            )));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let intervals = intervals as usize;

        let mut points: Vec<f64> = (0..=intervals)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let offset = i as f64 * step;
                (min + offset).min(max)
            })
            .collect();

        let last = points.last().copied().unwrap_or(min);
        if max - last > step * 1e-9 {
            points.push(max);
        } else if let Some(tail) = points.last_mut() {
            *tail = max;
        }

        Ok(Self { points })
    }

    /// Grid from explicit sample points.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidUniverse`] if `points` is empty, has non-finite
    /// values, or is not strictly increasing.
    pub fn from_points(points: Vec<f64>) -> Result<Self, InvalidUniverse> {
        if points.is_empty() {
            return Err(InvalidUniverse("no sample points".to_string()));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(InvalidUniverse("sample points must be finite".to_string()));
        }
        if points.windows(2).any(|w| w[0] >= w[1]) {
            return Err(InvalidUniverse(
                "sample points must be strictly increasing".to_string(),
            ));
        }
        Ok(Self { points })
    }

    #[must_use]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: construction rejects empty grids.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.points[0]
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.min() && x <= self.max()
    }

    /// Clamp `x` to `[min, max]`. `NaN` passes through unchanged.
    #[must_use]
    pub fn clip(&self, x: f64) -> f64 {
        x.clamp(self.min(), self.max())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn integer_range_is_inclusive() {
        let u = Universe::range(0.0, 10.0, 1.0).unwrap();
        assert_eq!(u.len(), 11);
        assert_eq!(u.min(), 0.0);
        assert_eq!(u.max(), 10.0);
        assert_eq!(u.points()[5], 5.0);
    }

    #[test]
    fn fractional_step_reaches_max_exactly() {
        let u = Universe::range(-1.0, 1.0, 0.1).unwrap();
        assert_eq!(u.len(), 21);
        assert_eq!(u.min(), -1.0);
        assert_eq!(u.max(), 1.0);
    }

    #[test]
    fn uneven_step_appends_max() {
        let u = Universe::range(0.0, 10.0, 3.0).unwrap();
        assert_eq!(u.points(), &[0.0, 3.0, 6.0, 9.0, 10.0]);
    }

    #[test]
    fn rejects_empty_range() {
        assert!(Universe::range(5.0, 5.0, 1.0).is_err());
        assert!(Universe::range(5.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn rejects_bad_step() {
        assert!(Universe::range(0.0, 1.0, 0.0).is_err());
        assert!(Universe::range(0.0, 1.0, -0.5).is_err());
        assert!(Universe::range(0.0, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn from_points_requires_strictly_increasing() {
        assert!(Universe::from_points(vec![0.0, 1.0, 1.0]).is_err());
        assert!(Universe::from_points(vec![]).is_err());
        assert!(Universe::from_points(vec![0.0, 0.5, 2.0]).is_ok());
    }

    #[test]
    fn clip_clamps_to_bounds() {
        let u = Universe::range(1.0, 50.0, 1.0).unwrap();
        assert_eq!(u.clip(0.0), 1.0);
        assert_eq!(u.clip(120.0), 50.0);
        assert_eq!(u.clip(17.5), 17.5);
        assert!(u.clip(f64::NAN).is_nan());
    }

    #[test]
    fn contains_is_inclusive() {
        let u = Universe::range(-1.0, 1.0, 0.5).unwrap();
        assert!(u.contains(-1.0));
        assert!(u.contains(1.0));
        assert!(!u.contains(1.01));
    }
}
