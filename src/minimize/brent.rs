use crate::minimize::{
    bracket::{Bracket, BracketOptions},
    cancel::{CancellationPoll, Never},
    criterion::{Criterion, Evaluation},
    tolerances::Tolerances,
    MinimizerError,
};
use std::fmt;

/// Why a minimization stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Best value dropped below the criterion floor
    CritLimit,
    /// The cancellation source fired
    Cancelled,
    /// The criterion requested an abort
    CriterionAbort,
    /// The bracket shrank around the best point
    IntervalConverged,
    /// Further refinement would only chase rounding noise
    PrecisionLimit,
    /// Iteration budget exhausted; the result is best effort
    MaxIterations,
}

impl Termination {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Termination::Cancelled | Termination::CriterionAbort)
    }

    pub fn is_converged(&self) -> bool {
        matches!(
            self,
            Termination::CritLimit | Termination::IntervalConverged | Termination::PrecisionLimit
        )
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::CritLimit => write!(f, "criterion limit reached"),
            Termination::Cancelled => write!(f, "cancelled"),
            Termination::CriterionAbort => write!(f, "aborted by criterion"),
            Termination::IntervalConverged => write!(f, "interval converged"),
            Termination::PrecisionLimit => write!(f, "precision limit reached"),
            Termination::MaxIterations => write!(f, "iteration limit reached"),
        }
    }
}

/// Result of Brent's minimization
#[derive(Debug, Clone)]
pub struct BrentResult {
    /// Narrowed bracket; `bracket.mid` is the best abscissa
    pub bracket: Bracket,
    pub xmin: f64,
    pub fmin: f64,
    pub iters: usize,
    pub fn_evals: usize,
    pub termination: Termination,
    /// True when either the cancellation source or the criterion aborted
    pub cancelled: bool,
}

impl BrentResult {
    pub fn converged(&self) -> bool {
        self.termination.is_converged()
    }
}

/// Best three points seen so far, used as the interpolation stencil.
///
/// Not a strict sort by value: entries are ranked by recency and quality,
/// and may briefly share an abscissa.
#[derive(Debug, Clone, Copy)]
struct BestPoints {
    x: [f64; 3],
    y: [f64; 3],
}

impl BestPoints {
    fn new(x: f64, y: f64) -> Self {
        BestPoints {
            x: [x; 3],
            y: [y; 3],
        }
    }

    /// Numerator and denominator of the parabolic step from `x[0]` to the
    /// vertex of the parabola through the three points
    fn parabola(&self) -> (f64, f64) {
        let [x0, x1, x2] = self.x;
        let [y0, y1, y2] = self.y;
        let temp1 = (x0 - x2) * (y0 - y1);
        let temp2 = (x0 - x1) * (y0 - y2);
        let numer = (x0 - x1) * temp2 - (x0 - x2) * temp1;
        let denom = 2.0 * (temp1 - temp2);
        (numer, denom)
    }

    /// New best point; everything shifts down one rank
    fn promote(&mut self, x: f64, y: f64) {
        self.x = [x, self.x[0], self.x[1]];
        self.y = [y, self.y[0], self.y[1]];
    }

    /// A point no better than the current best. The abscissa checks keep the
    /// stencil from collapsing onto duplicate points.
    fn insert(&mut self, x: f64, y: f64) {
        if y <= self.y[1] || self.x[1] == self.x[0] {
            self.x[2] = self.x[1];
            self.y[2] = self.y[1];
            self.x[1] = x;
            self.y[1] = y;
        } else if y <= self.y[2] || self.x[2] == self.x[0] || self.x[2] == self.x[1] {
            self.x[2] = x;
            self.y[2] = y;
        }
    }
}

/// The two most recent trial steps
#[derive(Debug, Clone, Copy, Default)]
struct StepMemory {
    movement: f64,
    trial: f64,
}

impl StepMemory {
    /// Chooses the next trial step from `x[0]` and leaves it in `trial`.
    ///
    /// Parabolic steps must shrink against the step before last and land
    /// strictly inside the bracket; one landing within two step floors of an
    /// end is cut to a single step floor toward the middle.
    fn select(&mut self, best: &BestPoints, xleft: f64, xright: f64, small_step: f64) -> Step {
        let x0 = best.x[0];
        let xmid = 0.5 * (xleft + xright);
        let small_dist = 2.0 * small_step;

        if self.movement.abs() > small_step {
            let (numer, denom) = best.parabola();
            let testdist = self.movement;
            self.movement = self.trial;
            self.trial = if denom.abs() > Brent::TINY_DENOM {
                numer / denom
            } else {
                Brent::HUGE_STEP
            };

            let candidate = x0 + self.trial;
            let shrinking = 2.0 * self.trial.abs() < testdist.abs();
            if shrinking && candidate > xleft && candidate < xright {
                if candidate - xleft < small_dist || xright - candidate < small_dist {
                    self.trial = if x0 < xmid { small_step } else { -small_step };
                }
                return Step::Parabolic;
            }
        }

        self.golden(x0, xmid, xleft, xright);
        Step::Golden
    }

    fn golden(&mut self, x0: f64, xmid: f64, xleft: f64, xright: f64) {
        self.movement = if xmid > x0 { xright - x0 } else { xleft - x0 };
        self.trial = Brent::CGOLD * self.movement;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Parabolic,
    Golden,
}

/// Brent's method for local minimization of a univariate function,
/// given a bracket around the minimum
#[derive(Debug, Clone, Default)]
pub struct Brent {
    tolerances: Tolerances,
}

impl Brent {
    /// 1 - 1/golden ratio
    const CGOLD: f64 = 0.3819660;
    /// Parabola denominators at or below this are unusable
    const TINY_DENOM: f64 = 1e-40;
    /// Stand-in parabolic step that always fails the shrink test
    const HUGE_STEP: f64 = 1e40;

    pub fn new(tolerances: Tolerances) -> Self {
        Brent { tolerances }
    }

    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    /// Refine a bracket around a minimum
    ///
    /// Combines golden-section steps with inverse parabolic interpolation
    /// through the three best points seen. The first step is always golden.
    ///
    /// # Arguments
    /// * `criterion` - The function to minimize
    /// * `cancel` - Polled once per iteration; `true` stops immediately
    /// * `bracket` - `low <= mid <= high` with `f(mid)` no worse than the ends
    /// * `y` - Function value at `bracket.mid`
    ///
    /// The bracket precondition is not checked. Running out of iterations is
    /// not an error: the best point found is returned with
    /// [`Termination::MaxIterations`].
    pub fn minimize<C, P>(
        &self,
        criterion: &mut C,
        cancel: &mut P,
        bracket: Bracket,
        y: f64,
    ) -> BrentResult
    where
        C: Criterion + ?Sized,
        P: CancellationPoll + ?Sized,
    {
        let tol = &self.tolerances;

        let mut best = BestPoints::new(bracket.mid, y);
        let mut xleft = bracket.low;
        let mut xright = bracket.high;

        // Zero movement forces a golden-section first step
        let mut steps = StepMemory::default();
        let mut iter = 0;
        let mut fn_evals = 0;

        let termination = loop {
            if iter >= tol.max_iters {
                break Termination::MaxIterations;
            }

            let [x0, _, _] = best.x;
            let [y0, _, y2] = best.y;

            if y0 < tol.crit_limit {
                break Termination::CritLimit;
            }

            if cancel.poll() {
                break Termination::Cancelled;
            }

            let small_step = x0.abs().max(1.0) * tol.x_tol;
            let small_dist = 2.0 * small_step;
            let xmid = 0.5 * (xleft + xright);

            // Small interval with x0 near its middle
            if (x0 - xmid).abs() <= small_dist - 0.5 * (xright - xleft) {
                break Termination::IntervalConverged;
            }

            if iter >= 4 && (y2 - y0).abs() / (y0.abs() + 1.0) < tol.value_tol {
                break Termination::PrecisionLimit;
            }

            let kind = steps.select(&best, xleft, xright, small_step);

            let this_x = if steps.trial.abs() >= small_step {
                x0 + steps.trial
            } else if steps.trial > 0.0 {
                x0 + small_step
            } else {
                x0 - small_step
            };

            let this_y = match criterion.evaluate(this_x) {
                Evaluation::Value(v) => v,
                Evaluation::Abort => break Termination::CriterionAbort,
            };
            fn_evals += 1;

            log::trace!(
                "brent iter {}: {:?} step to x = {} (f = {}), best x = {} (f = {}), bracket [{}, {}]",
                iter,
                kind,
                this_x,
                this_y,
                x0,
                y0,
                xleft,
                xright
            );

            if this_y <= y0 {
                if this_x < x0 {
                    xright = x0;
                } else {
                    xleft = x0;
                }
                best.promote(this_x, this_y);
            } else {
                if this_x >= x0 {
                    xright = this_x;
                } else {
                    xleft = this_x;
                }
                best.insert(this_x, this_y);
            }

            iter += 1;
        };

        let xmin = best.x[0];
        let fmin = best.y[0];
        log::debug!(
            "brent stopped after {} iterations ({}): x = {}, f = {}",
            iter,
            termination,
            xmin,
            fmin
        );

        BrentResult {
            bracket: Bracket {
                low: xleft,
                mid: xmin,
                high: xright,
            },
            xmin,
            fmin,
            iters: iter,
            fn_evals,
            termination,
            cancelled: termination.is_cancelled(),
        }
    }

    /// Convenience wrapper without a cancellation source
    pub fn refine<C>(&self, criterion: &mut C, bracket: Bracket, y: f64) -> BrentResult
    where
        C: Criterion + ?Sized,
    {
        self.minimize(criterion, &mut Never, bracket, y)
    }

    /// Bracket a minimum starting from `a` and `b`, then refine it
    ///
    /// # Errors
    /// Any error from [`Bracket::search`]
    pub fn minimize_from<C, P>(
        &self,
        criterion: &mut C,
        cancel: &mut P,
        a: f64,
        b: f64,
        options: &BracketOptions,
    ) -> Result<BrentResult, MinimizerError>
    where
        C: Criterion + ?Sized,
        P: CancellationPoll + ?Sized,
    {
        let found = Bracket::search(criterion, a, b, options)?;
        let mut result = self.minimize(criterion, cancel, found.bracket, found.f_mid);
        result.fn_evals += found.fn_evals;
        Ok(result)
    }
}
