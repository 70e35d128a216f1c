/// Every failure the parade can surface.
///
/// Each variant is raised by the component that first observes the problem;
/// nothing is retried or coerced. The orchestrator wraps the first failure in
/// [`Error::Entry`] and aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a distribution, delay, histogram, or render parameter is out of range.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// The name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// Returned when a mixture's weights and components do not line up, or
    /// when a mixture is nested inside another mixture.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Returned when a histogram is requested over zero samples.
    #[error("histogram requires at least one sample")]
    EmptyInput,

    /// Returned when the output sink cannot be written or flushed.
    #[error("output sink unwritable: {0}")]
    IoFailure(#[from] std::io::Error),

    /// Returned by the orchestrator when a catalog entry fails; carries the
    /// entry title so the user knows where the run stopped.
    #[error("{title}: {source}")]
    Entry {
        /// The numbered title of the failing entry.
        title: String,
        /// The underlying failure.
        source: Box<Error>,
    },
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Strip any [`Error::Entry`] wrappers and return the root failure.
    #[must_use]
    pub fn root(&self) -> &Error {
        match self {
            Error::Entry { source, .. } => source.root(),
            other => other,
        }
    }
}
