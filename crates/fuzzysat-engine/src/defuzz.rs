//! Defuzzification of sampled output curves.

use fuzzysat_core::Defuzzification;

/// Relative tolerance when collecting grid points on the curve's plateau.
const PLATEAU_EPS: f64 = 1e-12;

/// Collapse `curve`, sampled at `grid`, into one crisp value.
///
/// Returns `None` only when every sample is zero; any positive area,
/// however small, has a defined value. Callers turn that into
/// [`crate::EvaluationError::DefuzzificationUndefined`].
#[must_use]
pub fn defuzzify(grid: &[f64], curve: &[f64], method: Defuzzification) -> Option<f64> {
    debug_assert_eq!(grid.len(), curve.len());
    let total: f64 = curve.iter().sum();
    if total <= 0.0 {
        return None;
    }

    match method {
        Defuzzification::Centroid => centroid(grid, curve, total),
        Defuzzification::Bisector => bisector(grid, curve, total),
        Defuzzification::Mom => {
            let maxima = maxima(grid, curve);
            #[allow(clippy::cast_precision_loss)]
            let n = maxima.len() as f64;
            Some(maxima.iter().sum::<f64>() / n)
        }
        Defuzzification::Som => maxima(grid, curve).first().copied(),
        Defuzzification::Lom => maxima(grid, curve).last().copied(),
    }
}

/// `Σ g·μ(g) / Σ μ(g)`.
fn centroid(grid: &[f64], curve: &[f64], total: f64) -> Option<f64> {
    let moment: f64 = grid.iter().zip(curve).map(|(g, mu)| g * mu).sum();
    Some(moment / total)
}

/// First grid point at which the running sum reaches half the total.
fn bisector(grid: &[f64], curve: &[f64], total: f64) -> Option<f64> {
    let half = total / 2.0;
    let mut running = 0.0;
    for (g, mu) in grid.iter().zip(curve) {
        running += mu;
        if running >= half {
            return Some(*g);
        }
    }
    grid.last().copied()
}

fn maxima(grid: &[f64], curve: &[f64]) -> Vec<f64> {
    let peak = curve.iter().copied().fold(0.0_f64, f64::max);
    grid.iter()
        .zip(curve)
        .filter(|(_, mu)| (peak - **mu).abs() <= PLATEAU_EPS * peak)
        .map(|(g, _)| *g)
        .collect()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn grid() -> Vec<f64> {
        (0..=10).map(f64::from).collect()
    }

    #[test]
    fn centroid_of_symmetric_triangle_is_its_peak() {
        // trimf[3, 5, 7] sampled on 0..=10
        let curve = [0.0, 0.0, 0.0, 0.0, 0.5, 1.0, 0.5, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(
            defuzzify(&grid(), &curve, Defuzzification::Centroid),
            Some(5.0)
        );
    }

    #[test]
    fn centroid_of_right_shoulder() {
        // trimf[6, 10, 10]: (7*.25 + 8*.5 + 9*.75 + 10) / 2.5 = 9
        let curve = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.25, 0.5, 0.75, 1.0];
        let out = defuzzify(&grid(), &curve, Defuzzification::Centroid).unwrap();
        assert!((out - 9.0).abs() < 1e-12, "got {out}");
    }

    #[test]
    fn zero_curve_is_undefined_for_every_method() {
        let curve = [0.0; 11];
        for method in [
            Defuzzification::Centroid,
            Defuzzification::Bisector,
            Defuzzification::Mom,
            Defuzzification::Som,
            Defuzzification::Lom,
        ] {
            assert_eq!(defuzzify(&grid(), &curve, method), None, "{method}");
        }
    }

    #[test]
    fn maximum_methods_on_plateau() {
        // clipped plateau at 0.5 over 3..=6
        let curve = [0.0, 0.0, 0.25, 0.5, 0.5, 0.5, 0.5, 0.25, 0.0, 0.0, 0.0];
        let g = grid();
        assert_eq!(defuzzify(&g, &curve, Defuzzification::Som), Some(3.0));
        assert_eq!(defuzzify(&g, &curve, Defuzzification::Lom), Some(6.0));
        assert_eq!(defuzzify(&g, &curve, Defuzzification::Mom), Some(4.5));
    }

    #[test]
    fn tiny_but_positive_area_is_defined() {
        let curve = [0.0, 0.0, 0.0, 0.0, 1e-13, 1e-13, 1e-13, 0.0, 0.0, 0.0, 0.0];
        let out = defuzzify(&grid(), &curve, Defuzzification::Centroid).unwrap();
        assert!((out - 5.0).abs() < 1e-9, "got {out}");
        assert_eq!(defuzzify(&grid(), &curve, Defuzzification::Mom), Some(5.0));
    }

    #[test]
    fn bisector_splits_area() {
        let curve = [0.0, 0.0, 0.0, 0.0, 0.5, 1.0, 0.5, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(
            defuzzify(&grid(), &curve, Defuzzification::Bisector),
            Some(5.0)
        );
    }
}
