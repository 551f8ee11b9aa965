/// Outcome of a single criterion evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    /// Objective value at the requested abscissa
    Value(f64),
    /// The criterion asks the caller to stop immediately
    Abort,
}

impl Evaluation {
    pub fn value(&self) -> Option<f64> {
        match self {
            Evaluation::Value(v) => Some(*v),
            Evaluation::Abort => None,
        }
    }

    pub fn is_abort(&self) -> bool {
        matches!(self, Evaluation::Abort)
    }
}

impl From<Option<f64>> for Evaluation {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Evaluation::Value(v),
            None => Evaluation::Abort,
        }
    }
}

/// Scalar objective evaluated one abscissa at a time.
///
/// Implementors may carry mutable state (sample buffers, caches, counters),
/// which is why evaluation takes `&mut self`. A value must be finite unless
/// the implementor signals [`Evaluation::Abort`].
pub trait Criterion {
    fn evaluate(&mut self, x: f64) -> Evaluation;
}

// Plain closures never abort
impl<F> Criterion for F
where
    F: FnMut(f64) -> f64,
{
    fn evaluate(&mut self, x: f64) -> Evaluation {
        Evaluation::Value(self(x))
    }
}

/// Wrapper for closures that may request an abort by returning `None`
#[derive(Clone)]
pub struct AbortableFn<F>(pub F)
where
    F: FnMut(f64) -> Option<f64>;

impl<F> AbortableFn<F>
where
    F: FnMut(f64) -> Option<f64>,
{
    pub fn new(f: F) -> Self {
        AbortableFn(f)
    }
}

impl<F> Criterion for AbortableFn<F>
where
    F: FnMut(f64) -> Option<f64>,
{
    fn evaluate(&mut self, x: f64) -> Evaluation {
        (self.0)(x).into()
    }
}
