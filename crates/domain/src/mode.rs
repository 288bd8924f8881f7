//! Mode — a named command broadcast to every device.
//!
//! Each device decides on its own how to react to a mode. Names that a
//! device does not recognise are ignored by that device.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A parsed mode name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mode {
    Sleep,
    Vacation,
    /// Any other name, kept verbatim (after trimming).
    Other(String),
}

impl Mode {
    /// Parse a mode name. Known names match ASCII case-insensitively;
    /// this never fails.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        if name.eq_ignore_ascii_case("sleep") {
            Self::Sleep
        } else if name.eq_ignore_ascii_case("vacation") {
            Self::Vacation
        } else {
            Self::Other(name.to_string())
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sleep => "Sleep",
            Self::Vacation => "Vacation",
            Self::Other(name) => name,
        }
    }

    /// Whether this is one of the built-in modes.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl FromStr for Mode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
