use crate::grammar::CallGrammar;
use crate::strain::Strain;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A legal call. Labels that do not parse as a call are remarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Call {
    Pass,
    Bid { level: u8, strain: Strain },
    Double,
    Redouble,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a call")]
pub struct ParseCallError(pub String);

impl Call {
    /// Canonical token: `P`, `X`, `XX`, or level plus strain letter (`1N`).
    pub fn render(self) -> String {
        match self {
            Call::Pass => "P".to_string(),
            Call::Double => "X".to_string(),
            Call::Redouble => "XX".to_string(),
            Call::Bid { level, strain } => format!("{}{}", level, strain),
        }
    }

    /// Display spelling: `Pass`, `X`, `XX`, or level plus `C`..`S`/`NT`.
    pub fn pretty(self) -> String {
        match self {
            Call::Pass => "Pass".to_string(),
            Call::Double => "X".to_string(),
            Call::Redouble => "XX".to_string(),
            Call::Bid { level, strain } => format!("{}{}", level, strain.pretty()),
        }
    }
}

impl FromStr for Call {
    type Err = ParseCallError;

    /// Parses with the standard grammar. Use [`CallGrammar::parse`] for a
    /// configured one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CallGrammar::standard()
            .parse(s)
            .ok_or_else(|| ParseCallError(s.to_string()))
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
