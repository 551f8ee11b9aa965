use crate::minimize::MinimizerError;

/// Stopping rules for [`Brent`](crate::minimize::Brent)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Iteration limit
    pub max_iters: usize,
    /// Quit as soon as the best value drops below this
    pub crit_limit: f64,
    /// Relative function-value convergence tolerance
    pub value_tol: f64,
    /// Abscissa convergence tolerance, scaled by `max(|x|, 1)`
    pub x_tol: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            max_iters: 100,
            crit_limit: f64::NEG_INFINITY,
            value_tol: 1e-10,
            x_tol: 1e-7,
        }
    }
}

impl Tolerances {
    /// Creates validated tolerances.
    ///
    /// # Errors
    /// * `InvalidTolerance` if `x_tol` is not positive and finite, or
    ///   `value_tol` is negative or non-finite
    /// * `InvalidParameters` if `crit_limit` is NaN
    pub fn new(
        max_iters: usize,
        crit_limit: f64,
        value_tol: f64,
        x_tol: f64,
    ) -> Result<Self, MinimizerError> {
        let tolerances = Self {
            max_iters,
            crit_limit,
            value_tol,
            x_tol,
        };
        tolerances.validate()?;
        Ok(tolerances)
    }

    pub fn validate(&self) -> Result<(), MinimizerError> {
        if !self.x_tol.is_finite() || self.x_tol <= 0.0 {
            return Err(MinimizerError::InvalidTolerance);
        }
        if !self.value_tol.is_finite() || self.value_tol < 0.0 {
            return Err(MinimizerError::InvalidTolerance);
        }
        if self.crit_limit.is_nan() {
            return Err(MinimizerError::InvalidParameters(
                "crit_limit must not be NaN".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    pub fn with_crit_limit(mut self, crit_limit: f64) -> Self {
        self.crit_limit = crit_limit;
        self
    }

    pub fn with_value_tol(mut self, value_tol: f64) -> Self {
        self.value_tol = value_tol;
        self
    }

    pub fn with_x_tol(mut self, x_tol: f64) -> Self {
        self.x_tol = x_tol;
        self
    }
}
