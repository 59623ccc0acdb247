//! Card position parsing and resolution
//!
//! Users express positions as `top`, `bottom` or an integer slot. Planka stores
//! positions as floats spaced by [`POSITION_GAP`], so a slot is resolved against
//! the positions of the other cards in the target list.

use std::fmt;
use std::str::FromStr;

/// Spacing Planka uses between consecutive positions
pub const POSITION_GAP: f64 = 65536.0;

/// A user-supplied card position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Top,
    Bottom,
    /// Slot index; negative values count from the end, `-1` being the bottom
    Index(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Position must be 'top', 'bottom', or an integer (got '{0}').")]
pub struct PositionError(pub String);

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "top" => Ok(Position::Top),
            "bottom" => Ok(Position::Bottom),
            other => other
                .parse::<i64>()
                .map(Position::Index)
                .map_err(|_| PositionError(value.to_string())),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Top => write!(f, "top"),
            Position::Bottom => write!(f, "bottom"),
            Position::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Parse an optional position literal
///
/// `None` stays `None`; any literal other than `top`, `bottom` (in any case) or
/// an integer is rejected.
pub fn parse_position(value: Option<&str>) -> Result<Option<Position>, PositionError> {
    value.map(str::parse).transpose()
}

/// Turn a position into the numeric value Planka stores
///
/// `siblings` are the positions of the other cards in the target list, sorted
/// ascending.
pub fn resolve_position(position: Position, siblings: &[f64]) -> f64 {
    let len = siblings.len();
    let slot = match position {
        Position::Top => 0,
        Position::Bottom => len,
        Position::Index(index) if index >= 0 => (index as usize).min(len),
        Position::Index(index) => {
            let from_end = index.unsigned_abs().saturating_sub(1) as usize;
            len.saturating_sub(from_end)
        }
    };

    match (slot.checked_sub(1).map(|i| siblings[i]), siblings.get(slot)) {
        (None, None) => POSITION_GAP,
        (None, Some(first)) => first / 2.0,
        (Some(last), None) => last + POSITION_GAP,
        (Some(before), Some(after)) => before + (after - before) / 2.0,
    }
}
