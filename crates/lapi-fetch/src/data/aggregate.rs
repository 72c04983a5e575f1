use std::fmt;

use crate::error::{Error, ErrorKind};

/// Observable property of a [`crate::StreamingClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientProperty {
    /// The percentage high-water mark changed.
    OperationProgress,
    /// The activity flag flipped.
    OperationInProgress,
}

impl fmt::Display for ClientProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientProperty::OperationProgress => write!(f, "OperationProgress"),
            ClientProperty::OperationInProgress => write!(f, "IsOperationInProgress"),
        }
    }
}

/// Diagnostic record of the last failed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind:    ErrorKind,
    pub message: String,
}

impl From<&Error> for Failure {
    fn from(err: &Error) -> Self {
        Self {
            kind:    err.kind(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {}", self.kind, self.message)
    }
}

/// Long-lived progress a client exposes across operations.
///
/// `percent` is a high-water mark in `[0, 100]`: a lower or equal value is
/// dropped, so it never decreases until [`AggregatedProgress::reset`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedProgress {
    pub percent:    u8,
    pub active:     bool,
    pub last_error: Option<Failure>,
}

impl AggregatedProgress {
    /// Applies `percent` if it exceeds the stored value. Returns whether it changed.
    pub fn raise_percent(&mut self, percent: u8) -> bool {
        let percent = percent.min(100);
        if percent > self.percent {
            self.percent = percent;
            true
        } else {
            false
        }
    }

    /// Returns whether the flag actually changed.
    pub fn set_active(&mut self, active: bool) -> bool {
        if self.active == active {
            return false;
        }
        self.active = active;
        true
    }

    pub fn record_failure(&mut self, err: &Error) { self.last_error = Some(Failure::from(err)); }

    pub fn reset(&mut self) { self.percent = 0; }
}
