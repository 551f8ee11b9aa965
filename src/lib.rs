//! Derivative-free minimization of a scalar function of one variable.
//!
//! The core is [`minimize::Brent`], a hybrid of golden-section search and
//! inverse parabolic interpolation that refines a bracketing triple known to
//! contain a minimum. The objective and an optional cancellation source are
//! injected as capabilities so that statistical estimators can close over
//! their own state and drive the minimizer as an inner loop.
//!
//! ```
//! use brentmin::prelude::*;
//!
//! let mut f = |x: f64| (x - 2.0) * (x - 2.0);
//! let brent = Brent::new(Tolerances::default());
//! let result = brent.refine(&mut f, Bracket::new(-5.0, 0.0, 5.0), 4.0);
//!
//! assert!((result.xmin - 2.0).abs() < 1e-5);
//! assert!(!result.cancelled);
//! ```
pub mod error;
pub mod minimize;
pub mod prelude;
