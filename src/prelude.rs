//! brentmin prelude.
//!
//! This module contains the most used types and traits, which you can import
//! easily as a group.
//!
//! ```
//! use brentmin::prelude::*;
//!
//! ```

#[doc(no_inline)]
pub use crate::error::MinimizerError;

#[doc(no_inline)]
pub use crate::minimize::{
    AbortableFn, Bracket, BracketOptions, BracketResult, Brent, BrentResult, CancellationPoll,
    Criterion, Evaluation, Never, PollFn, Termination, Tolerances,
};
