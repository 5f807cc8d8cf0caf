use std::io;
use thiserror::Error;

use crate::types::PortRange;

/// The error type for port acquisition.
#[derive(Error, Debug)]
pub enum Error {
    /// Socket creation, bind or address query rejected by the OS
    #[error("{operation} failed: {source}")]
    SystemCall {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// The search space was exhausted before enough ports were found
    #[error("could not find a free port ({found} of {requested} found in {range})")]
    NoFreePort {
        requested: usize,
        found: usize,
        range: PortRange,
    },

    /// Requested port count is outside the accepted bounds
    #[error("count must be 1-{max} (got {count})")]
    InvalidCount { count: usize, max: usize },

    /// Range bounds are out of order or outside 1-65535
    #[error("bad range {lo}:{hi} (use MIN:MAX, 1-65535)")]
    InvalidRange { lo: u32, hi: u32 },

    /// More ports requested than the range holds
    #[error("requested {requested} ports but range only has {available}")]
    RangeTooSmall { requested: usize, available: usize },

    /// Input could not be parsed
    #[error("Invalid {0}: {1}")]
    InvalidFormat(String, String),
}

impl Error {
    /// Create a new system call error
    pub fn system_call(operation: impl Into<String>, source: io::Error) -> Self {
        Self::SystemCall {
            operation: operation.into(),
            source,
        }
    }

    /// Create a new invalid format error
    pub fn invalid_format(what: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidFormat(what.into(), details.into())
    }

    /// True when a range scan ran out of candidates.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::NoFreePort { .. })
    }

    /// True for configuration errors, which are raised before any socket is opened.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(
            self,
            Self::InvalidCount { .. }
                | Self::InvalidRange { .. }
                | Self::RangeTooSmall { .. }
                | Self::InvalidFormat(..)
        )
    }
}

/// A specialized `Result` type for port acquisition.
pub type Result<T> = std::result::Result<T, Error>;
