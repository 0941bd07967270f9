//! Holdings source port.

use crate::domain::error::ThrustError;
use crate::domain::holding::Holding;

/// Supplies the current holdings to the calculation core.
///
/// An empty list is a valid answer; an unreadable source is an error.
pub trait HoldingsPort {
    fn load_holdings(&self) -> Result<Vec<Holding>, ThrustError>;

    /// Human-readable description of where holdings come from.
    fn source_name(&self) -> String;
}
