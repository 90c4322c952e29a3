//! Stop timeout resolution.

use std::fmt;
use std::time::Duration;

/// How long to wait for a graceful exit before forcing termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopTimeout {
    /// Wait this long, then force. Zero escalates immediately.
    After(Duration),
    /// Wait until the process exits or the wait is externally cancelled.
    /// Never force.
    Never,
}

impl StopTimeout {
    /// Interpret a timeout in whole seconds; negative means [`StopTimeout::Never`].
    pub fn from_secs(seconds: i64) -> Self {
        if seconds < 0 {
            StopTimeout::Never
        } else {
            StopTimeout::After(Duration::from_secs(seconds as u64))
        }
    }

    /// Pick the effective timeout: explicit override, then the process's
    /// configured value, then the engine-wide default.
    pub fn resolve(requested: Option<i64>, configured: Option<i64>, default: i64) -> Self {
        Self::from_secs(requested.or(configured).unwrap_or(default))
    }

    /// The bounded wait duration, if any.
    pub fn duration(&self) -> Option<Duration> {
        match self {
            StopTimeout::After(d) => Some(*d),
            StopTimeout::Never => None,
        }
    }

    pub fn is_never(&self) -> bool {
        matches!(self, StopTimeout::Never)
    }
}

impl fmt::Display for StopTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopTimeout::After(d) => write!(f, "{}s", d.as_secs()),
            StopTimeout::Never => f.write_str("never"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_secs() {
        assert_eq!(StopTimeout::from_secs(-1), StopTimeout::Never);
        assert_eq!(StopTimeout::from_secs(-30), StopTimeout::Never);
        assert_eq!(
            StopTimeout::from_secs(0),
            StopTimeout::After(Duration::ZERO)
        );
        assert_eq!(
            StopTimeout::from_secs(10),
            StopTimeout::After(Duration::from_secs(10))
        );
    }

    #[test]
    fn test_resolve_precedence() {
        // Explicit override wins, even when it asks for no timeout.
        assert_eq!(
            StopTimeout::resolve(Some(-1), Some(30), 10),
            StopTimeout::Never
        );
        assert_eq!(
            StopTimeout::resolve(Some(3), Some(30), 10),
            StopTimeout::After(Duration::from_secs(3))
        );

        // Process configuration next.
        assert_eq!(
            StopTimeout::resolve(None, Some(30), 10),
            StopTimeout::After(Duration::from_secs(30))
        );

        // Engine default last.
        assert_eq!(
            StopTimeout::resolve(None, None, 10),
            StopTimeout::After(Duration::from_secs(10))
        );
    }

    #[test]
    fn test_zero_is_not_never() {
        let timeout = StopTimeout::resolve(Some(0), None, -1);
        assert!(!timeout.is_never());
        assert_eq!(timeout.duration(), Some(Duration::ZERO));
    }

    #[test]
    fn test_display() {
        assert_eq!(StopTimeout::from_secs(5).to_string(), "5s");
        assert_eq!(StopTimeout::Never.to_string(), "never");
    }
}
