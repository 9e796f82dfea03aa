use nalgebra::{DMatrix, DVector};
use statrs::distribution::{ContinuousCDF, StudentsT};
use std::error::Error;
use std::fmt;

/// Significance threshold for the coefficient tables. Strictly less-than:
/// p == 0.05 is not flagged.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegressionError {
    /// Fewer observations than coefficients; the system is underdetermined
    /// and residual degrees of freedom would be zero or negative.
    InsufficientData {
        observations: usize,
        coefficients: usize,
    },
    /// The normal matrix has no inverse (e.g. perfectly collinear
    /// predictors or a constant predictor column).
    Singular,
}

impl fmt::Display for RegressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionError::InsufficientData {
                observations,
                coefficients,
            } => write!(
                f,
                "insufficient data: {} observations for {} coefficients",
                observations, coefficients
            ),
            RegressionError::Singular => write!(f, "normal matrix is singular"),
        }
    }
}

impl Error for RegressionError {}

/// One fitted coefficient with its inference statistics. Values are kept
/// at full precision here; display rounding happens at the table layer.
#[derive(Debug, Clone)]
pub struct CoefficientStats {
    pub term: String,
    pub coefficient: f64,
    pub std_error: f64,
    pub t_value: f64,
    pub p_value: f64,
    pub significant: bool,
}

#[derive(Debug, Clone)]
pub struct OlsFit {
    pub coefficients: Vec<CoefficientStats>,
    pub observations: usize,
}

/// Ordinary least squares with an explicit intercept, solved via the
/// normal equations. `predictors` is column-major: one inner slice per
/// named term, each the same length as `response`.
///
/// Returns the intercept first, then one entry per predictor in input
/// order, each with coefficient, standard error, t statistic, and
/// two-tailed p-value from a Student's t with n - k degrees of freedom.
pub fn fit_ols(
    terms: &[&str],
    predictors: &[Vec<f64>],
    response: &[f64],
) -> Result<OlsFit, RegressionError> {
    let n = response.len();
    let k = predictors.len() + 1;
    if n <= k {
        return Err(RegressionError::InsufficientData {
            observations: n,
            coefficients: k,
        });
    }

    let mut design = DMatrix::<f64>::zeros(n, k);
    for i in 0..n {
        design[(i, 0)] = 1.0;
        for (j, col) in predictors.iter().enumerate() {
            design[(i, j + 1)] = col[i];
        }
    }
    let y = DVector::<f64>::from_column_slice(response);

    let xtx = design.transpose() * &design;
    let xtx_inv = xtx.try_inverse().ok_or(RegressionError::Singular)?;
    let beta = &xtx_inv * design.transpose() * &y;

    let residuals = &y - &design * &beta;
    let df = (n - k) as f64;
    let sigma2 = residuals.dot(&residuals) / df;

    let t_dist = StudentsT::new(0.0, 1.0, df).map_err(|_| RegressionError::Singular)?;

    let mut coefficients = Vec::with_capacity(k);
    for j in 0..k {
        let term = if j == 0 {
            "Intercept".to_string()
        } else {
            terms[j - 1].to_string()
        };
        let coefficient = beta[j];
        let std_error = (sigma2 * xtx_inv[(j, j)]).sqrt();
        let (t_value, p_value) = if std_error > 0.0 {
            let t = coefficient / std_error;
            (t, 2.0 * (1.0 - t_dist.cdf(t.abs())))
        } else if coefficient == 0.0 {
            (0.0, 1.0)
        } else {
            // Exact fit on this coefficient; the point estimate is as
            // certain as the data allows.
            (f64::INFINITY, 0.0)
        };
        coefficients.push(CoefficientStats {
            term,
            coefficient,
            std_error,
            t_value,
            p_value,
            significant: p_value < SIGNIFICANCE_LEVEL,
        });
    }

    Ok(OlsFit {
        coefficients,
        observations: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn recovers_known_line() {
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![2.1, 3.9, 6.2, 7.8];
        let fit = fit_ols(&["x"], &[x], &y).unwrap();

        assert_eq!(fit.coefficients.len(), 2);
        assert_eq!(fit.coefficients[0].term, "Intercept");
        assert_eq!(fit.coefficients[1].term, "x");

        assert_relative_eq!(fit.coefficients[0].coefficient, 0.15, epsilon = 1e-9);
        assert_relative_eq!(fit.coefficients[1].coefficient, 1.94, epsilon = 1e-9);

        // Hand-computed: RSS = 0.082, df = 2, se(slope) = sqrt(0.041 / 5).
        assert_relative_eq!(
            fit.coefficients[1].std_error,
            (0.041f64 / 5.0).sqrt(),
            epsilon = 1e-9
        );
        assert!(fit.coefficients[1].p_value < 0.01);
        assert!(fit.coefficients[1].significant);
    }

    #[test]
    fn intercept_row_is_always_first() {
        let x1 = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let x2 = vec![2.0, 1.0, 4.0, 3.0, 6.0];
        let y = vec![1.0, 2.0, 2.5, 3.5, 5.0];
        let fit = fit_ols(&["a", "b"], &[x1, x2], &y).unwrap();
        let terms: Vec<&str> = fit.coefficients.iter().map(|c| c.term.as_str()).collect();
        assert_eq!(terms, vec!["Intercept", "a", "b"]);
    }

    #[test]
    fn underdetermined_fit_is_an_error() {
        let x = vec![1.0, 2.0];
        let y = vec![1.0, 2.0];
        match fit_ols(&["x"], &[x], &y) {
            Err(RegressionError::InsufficientData {
                observations,
                coefficients,
            }) => {
                assert_eq!(observations, 2);
                assert_eq!(coefficients, 2);
            }
            other => panic!("expected InsufficientData, got {:?}", other),
        }
    }

    #[test]
    fn collinear_predictors_are_singular() {
        let x1 = vec![1.0, 2.0, 3.0, 4.0];
        let x2 = vec![2.0, 4.0, 6.0, 8.0];
        let y = vec![1.0, 2.0, 3.0, 4.0];
        assert!(matches!(
            fit_ols(&["a", "b"], &[x1, x2], &y),
            Err(RegressionError::Singular)
        ));
    }

    #[test]
    fn boundary_p_value_is_not_significant() {
        let stats = CoefficientStats {
            term: "x".to_string(),
            coefficient: 1.0,
            std_error: 0.5,
            t_value: 2.0,
            p_value: 0.05,
            significant: 0.05 < SIGNIFICANCE_LEVEL,
        };
        assert!(!stats.significant);
    }
}
