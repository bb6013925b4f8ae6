//! Machine vocabulary: axis letters, jog direction and program state.

use crate::error::CommandError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical axis order used by the motion controller.
pub const AXIS_ORDER: &str = "xyzabcuvw";

/// A single machine axis identified by its letter.
///
/// Stored lowercase; ordering follows [`AXIS_ORDER`], not the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct AxisLetter(char);

impl AxisLetter {
    pub const X: AxisLetter = AxisLetter('x');
    pub const Y: AxisLetter = AxisLetter('y');
    pub const Z: AxisLetter = AxisLetter('z');

    /// Parse an axis letter, case-insensitively
    pub fn new(letter: char) -> Result<Self, CommandError> {
        let lower = letter.to_ascii_lowercase();
        if AXIS_ORDER.contains(lower) {
            Ok(Self(lower))
        } else {
            Err(CommandError::UnknownAxis { letter })
        }
    }

    /// Parse a one-character string such as `"x"` or `"Z"`
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c),
            _ => Err(CommandError::UnknownAxis {
                letter: text.chars().next().unwrap_or(' '),
            }),
        }
    }

    /// Parse a whole axis list like `"xyz"`, keeping the given order
    pub fn parse_list(text: &str) -> Result<Vec<Self>, CommandError> {
        text.chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(Self::new)
            .collect()
    }

    /// Lowercase letter
    pub fn as_char(self) -> char {
        self.0
    }

    /// Uppercase letter, as shown in menus
    pub fn upper(self) -> char {
        self.0.to_ascii_uppercase()
    }

    /// Position in the canonical axis order
    pub fn index(self) -> usize {
        AXIS_ORDER.find(self.0).unwrap_or(AXIS_ORDER.len())
    }
}

impl TryFrom<char> for AxisLetter {
    type Error = CommandError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AxisLetter> for char {
    fn from(axis: AxisLetter) -> Self {
        axis.0
    }
}

impl PartialOrd for AxisLetter {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AxisLetter {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index().cmp(&other.index())
    }
}

impl fmt::Display for AxisLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sort and deduplicate axes into the canonical machine order
pub fn canonical_axes(axes: impl IntoIterator<Item = AxisLetter>) -> Vec<AxisLetter> {
    let mut axes: Vec<AxisLetter> = axes.into_iter().collect();
    axes.sort();
    axes.dedup();
    axes
}

/// Jog direction forwarded to the motion controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JogSign {
    /// Move toward the negative limit
    Negative,
    /// Stop jogging
    Stop,
    /// Move toward the positive limit
    Positive,
}

impl JogSign {
    /// Signed multiplier: -1, 0 or 1
    pub fn as_i8(self) -> i8 {
        match self {
            JogSign::Negative => -1,
            JogSign::Stop => 0,
            JogSign::Positive => 1,
        }
    }
}

impl fmt::Display for JogSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}

/// Interpreter state of the loaded program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProgramState {
    /// Nothing executing
    #[default]
    Idle,
    /// Program executing
    Running,
    /// Program paused mid-run
    Paused,
}

impl fmt::Display for ProgramState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramState::Idle => write!(f, "Idle"),
            ProgramState::Running => write!(f, "Running"),
            ProgramState::Paused => write!(f, "Paused"),
        }
    }
}
