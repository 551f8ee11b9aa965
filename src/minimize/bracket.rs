use crate::minimize::{
    criterion::{Criterion, Evaluation},
    MinimizerError,
};
use std::fmt;

/// Ordered triple of abscissas presumed to contain a local minimum.
///
/// The objective at `mid` should be no worse than at either end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

/// Result of minimum bracketing
#[derive(Debug, Clone)]
pub struct BracketResult {
    pub bracket: Bracket,
    pub f_low: f64,
    pub f_mid: f64,
    pub f_high: f64,
    pub iters: usize,
    pub fn_evals: usize,
}

impl BracketResult {
    /// Check the bracketing property (f_mid no worse than either end)
    pub fn is_valid(&self) -> bool {
        self.f_mid <= self.f_low && self.f_mid <= self.f_high
    }
}

/// Options for bracket expansion
#[derive(Debug, Clone)]
pub struct BracketOptions {
    pub initial_step: f64,
    pub max_iters: usize,
    /// Maximum parabolic extrapolation, as a multiple of the last step
    pub limit: f64,
}

impl Default for BracketOptions {
    fn default() -> Self {
        Self {
            initial_step: 1.0,
            max_iters: 100,
            limit: 100.0,
        }
    }
}

impl Bracket {
    /// Golden ratio used for downhill expansion
    const GOLDEN_RATIO: f64 = 1.618034;
    const TINY: f64 = 1e-20;
    const OVERFLOW: f64 = 1e100;

    pub fn new(low: f64, mid: f64, high: f64) -> Self {
        debug_assert!(low <= mid && mid <= high, "bracket out of order");
        Bracket { low, mid, high }
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    pub fn midpoint(&self) -> f64 {
        0.5 * (self.low + self.high)
    }

    pub fn contains(&self, x: f64) -> bool {
        self.low <= x && x <= self.high
    }

    /// Bracket a minimum starting from two initial points
    ///
    /// Walks downhill from the worse of `a` and `b`, growing each step by the
    /// golden ratio and trying a parabolic extrapolation (capped at
    /// `options.limit` times the last step) until the function turns up.
    ///
    /// # Errors
    /// * `InvalidInitialPoints` if `a == b` or either is non-finite
    /// * `FunctionEvaluationError` if the criterion returns a non-finite value
    /// * `Aborted` if the criterion requests an abort
    /// * `NumericalOverflow` if the expansion runs off beyond 1e100
    /// * `MaxIterationsExceeded` if no bracket is found within `options.max_iters`
    pub fn search<C>(
        criterion: &mut C,
        mut a: f64,
        mut b: f64,
        options: &BracketOptions,
    ) -> Result<BracketResult, MinimizerError>
    where
        C: Criterion + ?Sized,
    {
        if a == b || !a.is_finite() || !b.is_finite() {
            return Err(MinimizerError::InvalidInitialPoints);
        }

        let mut fn_evals = 0;
        let mut eval = |x: f64| -> Result<f64, MinimizerError> {
            fn_evals += 1;
            match criterion.evaluate(x) {
                Evaluation::Value(v) if v.is_finite() => Ok(v),
                Evaluation::Value(_) => Err(MinimizerError::FunctionEvaluationError),
                Evaluation::Abort => Err(MinimizerError::Aborted),
            }
        };

        let mut fa = eval(a)?;
        let mut fb = eval(b)?;

        // Go downhill from a to b
        if fb > fa {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }

        let mut c = b + Self::GOLDEN_RATIO * (b - a);
        let mut fc = eval(c)?;
        let mut iters = 0;

        while fb > fc {
            if iters >= options.max_iters {
                return Err(MinimizerError::MaxIterationsExceeded);
            }
            iters += 1;

            let r = (b - a) * (fb - fc);
            let q = (b - c) * (fb - fa);
            let diff = q - r;
            let denom = 2.0 * diff.abs().max(Self::TINY).copysign(diff);
            let mut u = b - ((b - c) * q - (b - a) * r) / denom;
            let ulim = b + options.limit * (c - b);
            let mut fu;

            if (b - u) * (u - c) > 0.0 {
                // Parabolic u lies between b and c
                fu = eval(u)?;
                if fu < fc {
                    a = b;
                    fa = fb;
                    b = u;
                    fb = fu;
                    break;
                } else if fu > fb {
                    c = u;
                    fc = fu;
                    break;
                }
                u = c + Self::GOLDEN_RATIO * (c - b);
                fu = eval(u)?;
            } else if (c - u) * (u - ulim) > 0.0 {
                // Between c and its allowed limit
                fu = eval(u)?;
                if fu < fc {
                    b = c;
                    fb = fc;
                    c = u;
                    fc = fu;
                    u = c + Self::GOLDEN_RATIO * (c - b);
                    fu = eval(u)?;
                }
            } else if (u - ulim) * (ulim - c) >= 0.0 {
                u = ulim;
                fu = eval(u)?;
            } else {
                u = c + Self::GOLDEN_RATIO * (c - b);
                fu = eval(u)?;
            }

            if !u.is_finite() || u.abs() > Self::OVERFLOW {
                return Err(MinimizerError::NumericalOverflow);
            }

            a = b;
            b = c;
            c = u;
            fa = fb;
            fb = fc;
            fc = fu;
        }

        if a > c {
            std::mem::swap(&mut a, &mut c);
            std::mem::swap(&mut fa, &mut fc);
        }

        log::debug!(
            "bracket found after {} expansions: ({}, {}, {}) f = ({}, {}, {})",
            iters,
            a,
            b,
            c,
            fa,
            fb,
            fc
        );

        Ok(BracketResult {
            bracket: Bracket::new(a, b, c),
            f_low: fa,
            f_mid: fb,
            f_high: fc,
            iters,
            fn_evals,
        })
    }

    /// Bracket a minimum from a single starting point using `options.initial_step`
    pub fn search_from<C>(
        criterion: &mut C,
        x: f64,
        options: &BracketOptions,
    ) -> Result<BracketResult, MinimizerError>
    where
        C: Criterion + ?Sized,
    {
        if !options.initial_step.is_finite() || options.initial_step == 0.0 {
            return Err(MinimizerError::InvalidParameters(
                "initial_step must be finite and nonzero".to_string(),
            ));
        }
        Self::search(criterion, x, x + options.initial_step, options)
    }
}

impl fmt::Display for Bracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.low, self.mid, self.high)
    }
}
