use thiserror::Error;

/// Contract violations surfaced by interval constructors and the store.
///
/// Every variant is a synchronous programmer error detected at the call
/// site. The core does no I/O, so there is no transient-failure or retry
/// model behind any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimDataError {
    #[error("interval start {start} is after its end {end}")]
    MalformedInterval { start: String, end: String },

    #[error("interval {interval} overlaps validity that is already stored")]
    OverlappingIntervals { interval: String },

    #[error("no valid data is stored")]
    NoValidData,

    #[error("stored valid data is bounded")]
    BoundedValidData,

    #[error("no entry stored at key {key}")]
    KeyNotFound { key: String },
}
