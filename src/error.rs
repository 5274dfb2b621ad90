use thiserror::Error;

/// Failures the computation pipeline can actually produce.
///
/// Per-pixel iteration is pure and cannot fail, so everything here is either
/// input validation or a terminal run condition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A zero-area pixel grid was requested. Nothing to render.
    #[error("invalid resolution {width}x{height}, both dimensions must be nonzero")]
    InvalidResolution { width: usize, height: usize },

    /// Complex division by a zero-magnitude divisor.
    #[error("complex division by zero")]
    DivisionByZero,

    /// The run's cancellation token was triggered. Not a hard failure: any
    /// partially accumulated results are discarded and the progress stream is
    /// closed as usual.
    #[error("computation cancelled")]
    Cancelled,
}
