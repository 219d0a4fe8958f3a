//! Domain data structures for bin cycles and computed collection results.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// The two tracked collection categories.
pub enum BinType {
    /// Residual waste, collected in the black bin.
    Black,
    /// Recycling and organic waste, collected together as the green and
    /// brown bin pair.
    GreenBrown,
}

impl BinType {
    /// Human-facing label published in sensor attributes.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            BinType::Black => "Black Bin",
            BinType::GreenBrown => "Green & Brown Bins",
        }
    }
}

impl fmt::Display for BinType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = match self {
            BinType::Black => "black",
            BinType::GreenBrown => "green_brown",
        };
        write!(formatter, "{slug}")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
/// A fortnightly schedule anchored to one reference Thursday.
///
/// The cycle recurs every 14 days in both directions from the anchor, so a
/// cycle is well-defined for dates before the anchor too.
pub struct Cycle {
    /// Category collected on this cycle.
    pub bin_type: BinType,
    /// First collection date, day 0 of the cycle. Always a Thursday.
    pub anchor: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Computed next collection for a single cycle, relative to a given day.
pub struct CollectionResult {
    /// Date of the next collection.
    pub collection_date: NaiveDate,
    /// Whole days until the collection; 0 means today.
    pub days_until: i64,
    /// Whether the collection is today.
    pub is_today: bool,
    /// Whether the collection is tomorrow.
    pub is_tomorrow: bool,
    /// Weekday name of the collection, always "Thursday" for this schedule.
    pub collection_day: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// The sooner of the two cycles' next collections, tagged with its category.
pub struct NextCollection {
    /// Which cycle the winning result came from.
    pub bin_type: BinType,
    /// The winning result.
    pub result: CollectionResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for a sensor entity registered with the host.
pub struct SensorId(pub String);

impl fmt::Display for SensorId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Static metadata describing a sensor entity.
pub struct SensorMeta {
    /// Unique identifier within the integration.
    pub id: SensorId,
    /// Display name shown by the host.
    pub name: String,
    /// Material-design icon hint, e.g. `mdi:delete`.
    pub icon: String,
}
