//! Error types for routing.

use thiserror::Error;

use crate::middleware::HandlerError;

/// Router-specific errors.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A path segment had no matching child during resolution.
    #[error("no route matched: {path} (no child for segment `{segment}`)")]
    RouteNotFound { path: String, segment: String },

    /// The path matched a node that has no action bound.
    #[error("no handler bound for path: {path}")]
    NoHandlerBound { path: String },

    /// The path already has an action and the router rejects duplicates.
    #[error("route already registered: {path}")]
    DuplicateRegistration { path: String },

    /// A node already has a child for this segment.
    #[error("child segment already exists: {segment}")]
    DuplicateSegment { segment: String },

    /// Indexed access past the end of a route list.
    #[error("index {index} out of range for route list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A middleware failed; the remaining chain and the action were skipped.
    #[error("middleware failed on segment `{segment}` while handling {path}")]
    Middleware {
        path: String,
        segment: String,
        #[source]
        source: HandlerError,
    },

    /// The bound action failed.
    #[error("action failed for {path}")]
    Action {
        path: String,
        #[source]
        source: HandlerError,
    },

    /// Router configuration could not be parsed.
    #[error("invalid router configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl RouterError {
    /// Returns true if no route matched the path.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::RouteNotFound { .. })
    }

    /// Returns true for failures raised by middleware or actions.
    #[must_use]
    pub const fn is_handler_failure(&self) -> bool {
        matches!(self, Self::Middleware { .. } | Self::Action { .. })
    }

    /// The HTTP status a transport layer would typically answer with.
    #[must_use]
    pub const fn status_hint(&self) -> u16 {
        match self {
            Self::RouteNotFound { .. } => 404,
            Self::NoHandlerBound { .. } => 405,
            Self::DuplicateRegistration { .. } | Self::DuplicateSegment { .. } => 409,
            Self::IndexOutOfRange { .. }
            | Self::Middleware { .. }
            | Self::Action { .. }
            | Self::Config(_) => 500,
        }
    }
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
