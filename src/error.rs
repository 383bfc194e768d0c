use thiserror::Error;

use crate::query::BreakpointValue;

/// Errors raised while turning breakpoint names into queries.
///
/// Both variants describe a misconfigured breakpoint set or a bad call site,
/// so they are returned to the caller as-is and never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BreakpointError {
    #[error("invalid breakpoint: \"{name}\". Available breakpoints: {}", .available.join(", "))]
    UnknownBreakpoint {
        name: String,
        /// Valid names, ascending by width.
        available: Vec<String>,
    },

    #[error("minSize \"{min_size}\" ({min}px) must be smaller than maxSize \"{max_size}\" ({max}px)")]
    InvalidRange {
        min_size: BreakpointValue,
        max_size: BreakpointValue,
        min: f64,
        max: f64,
    },
}

/// Failure to read a range media query string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMediaQueryError {
    #[error("media query is empty")]
    Empty,

    #[error("malformed media feature `{0}`")]
    MalformedFeature(String),

    #[error("unsupported media feature `{0}`, expected min-width or max-width")]
    UnsupportedFeature(String),

    #[error("invalid pixel length `{0}`")]
    InvalidLength(String),

    #[error("`{0}` is specified more than once in a clause")]
    DuplicateFeature(String),
}

pub type Result<T, E = BreakpointError> = std::result::Result<T, E>;
