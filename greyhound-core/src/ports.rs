//! The sensor port trait, published snapshot shape, and shared error type.

use async_trait::async_trait;
use chrono::{NaiveDate, ParseError as ChronoParseError};
use serde::{Deserialize, Serialize};

use crate::model::{CollectionResult, NextCollection, SensorMeta};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while computing or publishing a schedule.
pub enum ScheduleError {
    /// A derived date left the representable calendar range.
    #[error("date out of range: {base} plus {days_ahead} days")]
    DateOutOfRange {
        /// Date the offset was applied to.
        base: NaiveDate,
        /// Offset that could not be applied.
        days_ahead: i64,
    },
    /// The host supplied a date that could not be parsed.
    #[error("invalid date: {0}")]
    Parse(#[from] ChronoParseError),
    /// No sensor is registered under the given identifier.
    #[error("unknown sensor: {0}")]
    UnknownSensor(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Attributes published alongside a sensor's state.
///
/// Field names are load-bearing: host automations key off them exactly as
/// serialized, so renames here are breaking changes.
pub struct SensorAttributes {
    /// Whole days until the collection, 0 meaning today.
    pub days_until_collection: i64,
    /// Collection date, serialized as ISO `YYYY-MM-DD`.
    pub collection_date: NaiveDate,
    /// Weekday name of the collection.
    pub collection_day: String,
    /// Whether the collection is tomorrow.
    pub is_tomorrow: bool,
    /// Whether the collection is today.
    pub is_today: bool,
    /// Which bin is collected; only published by the next-collection sensor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin_type: Option<String>,
}

impl SensorAttributes {
    /// Attributes for a single-cycle sensor.
    #[must_use]
    pub fn from_result(result: &CollectionResult) -> Self {
        Self {
            days_until_collection: result.days_until,
            collection_date: result.collection_date,
            collection_day: result.collection_day.clone(),
            is_tomorrow: result.is_tomorrow,
            is_today: result.is_today,
            bin_type: None,
        }
    }

    /// Attributes for the next-collection sensor, including the bin label.
    #[must_use]
    pub fn from_next(next: &NextCollection) -> Self {
        let mut attributes = Self::from_result(&next.result);
        attributes.bin_type = Some(next.bin_type.label().to_owned());
        attributes
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// State and attributes a sensor publishes to the host on each refresh.
pub struct SensorSnapshot {
    /// Human-readable long-form date, e.g. "Thursday, 01 January 2026".
    pub state: String,
    /// Structured attributes automations key off.
    pub attributes: SensorAttributes,
}

#[async_trait]
/// Trait implemented by each sensor adapter.
///
/// The host drives `refresh` on its own cadence, passing the current
/// host-local calendar date. Implementations are stateless beyond their
/// fixed metadata, so concurrent refreshes are safe.
pub trait SensorPort: Send + Sync {
    /// Static metadata describing this sensor.
    fn meta(&self) -> &SensorMeta;

    /// Recompute this sensor's snapshot for the given day.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] when the supplied day is out of the
    /// representable range; the host keeps the prior snapshot in that case.
    async fn refresh(&self, today: NaiveDate) -> Result<SensorSnapshot, ScheduleError>;
}
