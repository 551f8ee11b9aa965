use std::fmt;

/// Error types for minimizer configuration and bracketing
#[derive(Debug, Clone, PartialEq)]
pub enum MinimizerError {
    Aborted,
    FunctionEvaluationError,
    InvalidInitialPoints,
    InvalidParameters(String),
    InvalidTolerance,
    MaxIterationsExceeded,
    NumericalOverflow,
}

impl fmt::Display for MinimizerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MinimizerError::Aborted => write!(f, "Criterion requested abort"),
            MinimizerError::FunctionEvaluationError => {
                write!(f, "Function evaluation returned invalid value")
            }
            MinimizerError::InvalidInitialPoints => {
                write!(f, "Invalid initial points: ensure a != b and both are finite")
            }
            MinimizerError::InvalidParameters(msg) => {
                write!(f, "Invalid parameters: {}", msg)
            }
            MinimizerError::InvalidTolerance => {
                write!(f, "Tolerance must be positive and finite")
            }
            MinimizerError::MaxIterationsExceeded => write!(f, "Maximum iterations exceeded"),
            MinimizerError::NumericalOverflow => {
                write!(f, "Numerical overflow during bracket expansion")
            }
        }
    }
}

impl std::error::Error for MinimizerError {}
