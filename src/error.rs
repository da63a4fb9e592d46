use thiserror::Error;

/// All errors that the crate can generate. Balancing itself never fails: degenerate layouts
/// are reported through [`BalanceReport`](crate::BalanceReport) instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BalanceError {
    #[error("no element with handle {0} exists in the document")]
    /// An element handle did not resolve within a [`LayoutDocument`](crate::layout::LayoutDocument)
    UnknownElement(usize),

    #[error("element {0} is not a container and cannot hold wrappers")]
    /// A wrapper was inserted under something other than a container
    NotAContainer(usize),

    #[error("ratio attribute `{attribute}` is missing")]
    /// The wrapper carries no ratio attribute to re-read on resize
    MissingRatio { attribute: String },

    #[error("ratio attribute `{attribute}` holds `{value}`, which is not a number")]
    /// The wrapper's ratio attribute could not be parsed
    InvalidRatio { attribute: String, value: String },
}
