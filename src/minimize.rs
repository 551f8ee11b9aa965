pub use crate::error::MinimizerError;

pub mod bracket;
pub mod brent;
pub mod cancel;
pub mod criterion;
pub mod tolerances;

pub use self::bracket::{Bracket, BracketOptions, BracketResult};
pub use self::brent::{Brent, BrentResult, Termination};
pub use self::cancel::{CancellationPoll, Never, PollFn};
pub use self::criterion::{AbortableFn, Criterion, Evaluation};
pub use self::tolerances::Tolerances;
