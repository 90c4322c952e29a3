//! Stop signal domain model.

use std::fmt;
use std::str::FromStr;

use nix::sys::signal::Signal;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The signal asked of a process first, giving it a chance to shut down cleanly.
///
/// Parses `"SIGTERM"`, `"TERM"`, `"term"` or `"15"`, and displays the
/// canonical `SIGxxx` name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopSignal(Signal);

impl StopSignal {
    /// Polite termination request; the default stop signal.
    pub const TERM: StopSignal = StopSignal(Signal::SIGTERM);

    /// Unmaskable termination, used for escalation.
    pub const KILL: StopSignal = StopSignal(Signal::SIGKILL);

    /// Wrap a raw `nix` signal.
    pub fn new(signal: Signal) -> Self {
        Self(signal)
    }

    /// The underlying `nix` signal.
    pub fn as_nix(&self) -> Signal {
        self.0
    }

    /// Signal number.
    pub fn number(&self) -> i32 {
        self.0 as i32
    }

    /// Canonical name, e.g. `SIGTERM`.
    pub fn name(&self) -> &'static str {
        self.0.as_str()
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::TERM
    }
}

impl fmt::Display for StopSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StopSignal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidSignal(s.to_string()));
        }

        if let Ok(number) = trimmed.parse::<i32>() {
            return Signal::try_from(number)
                .map(Self)
                .map_err(|_| Error::InvalidSignal(s.to_string()));
        }

        let upper = trimmed.to_ascii_uppercase();
        let name = if upper.starts_with("SIG") {
            upper
        } else {
            format!("SIG{}", upper)
        };

        Signal::from_str(&name)
            .map(Self)
            .map_err(|_| Error::InvalidSignal(s.to_string()))
    }
}

impl TryFrom<String> for StopSignal {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StopSignal> for String {
    fn from(signal: StopSignal) -> Self {
        signal.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("SIGTERM".parse::<StopSignal>().unwrap(), StopSignal::TERM);
        assert_eq!("TERM".parse::<StopSignal>().unwrap(), StopSignal::TERM);
        assert_eq!("term".parse::<StopSignal>().unwrap(), StopSignal::TERM);
        assert_eq!(
            "sigint".parse::<StopSignal>().unwrap().as_nix(),
            Signal::SIGINT
        );
    }

    #[test]
    fn test_parse_number() {
        assert_eq!("9".parse::<StopSignal>().unwrap(), StopSignal::KILL);
        assert_eq!("15".parse::<StopSignal>().unwrap().name(), "SIGTERM");
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("SIGNOPE".parse::<StopSignal>().is_err());
        assert!("".parse::<StopSignal>().is_err());
        assert!("999".parse::<StopSignal>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&StopSignal::TERM).unwrap();
        assert_eq!(json, "\"SIGTERM\"");

        let parsed: StopSignal = serde_json::from_str("\"HUP\"").unwrap();
        assert_eq!(parsed.as_nix(), Signal::SIGHUP);

        assert!(serde_json::from_str::<StopSignal>("\"BOGUS\"").is_err());
    }
}
