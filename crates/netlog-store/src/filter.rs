//! Status code range filter

use serde::{Deserialize, Serialize};

/// Inclusive range over HTTP status code
///
/// A missing lower bound means `0`, a missing upper bound means `u16::MAX`.
/// A filter with neither bound set has no condition and matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCodeFilter {
    /// Lowest accepted code
    pub min: Option<u16>,
    /// Highest accepted code
    pub max: Option<u16>,
}

impl StatusCodeFilter {
    /// Filter accepting `min..=max`
    #[must_use]
    pub fn range(min: u16, max: u16) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// 1xx
    #[must_use]
    pub fn informational() -> Self {
        Self::range(100, 199)
    }

    /// 2xx
    #[must_use]
    pub fn success() -> Self {
        Self::range(200, 299)
    }

    /// 3xx
    #[must_use]
    pub fn redirection() -> Self {
        Self::range(300, 399)
    }

    /// 4xx
    #[must_use]
    pub fn client_error() -> Self {
        Self::range(400, 499)
    }

    /// 5xx
    #[must_use]
    pub fn server_error() -> Self {
        Self::range(500, 599)
    }

    /// Whether this filter restricts anything
    #[must_use]
    pub fn has_condition(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Effective inclusive bounds
    #[must_use]
    pub fn bounds(&self) -> (u16, u16) {
        (self.min.unwrap_or(0), self.max.unwrap_or(u16::MAX))
    }
}
