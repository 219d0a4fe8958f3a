//! Sensor adapters exposing the Greyhound collection schedule to a host.
//!
//! Presentation glue only: each adapter asks the calculator for a result and
//! maps it onto the published state string and attribute set.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::trace;

use greyhound_core::{
    model::{BinType, CollectionResult, SensorId, SensorMeta},
    ports::{ScheduleError, SensorAttributes, SensorPort, SensorSnapshot},
    schedule::ScheduleCalculator,
};

/// Sensor tracking a single bin cycle.
pub struct BinSensor {
    calculator: Arc<ScheduleCalculator>,
    bin_type: BinType,
    meta: SensorMeta,
}

impl BinSensor {
    /// Create a sensor for the given bin type.
    #[must_use]
    pub fn new(calculator: Arc<ScheduleCalculator>, bin_type: BinType) -> Self {
        Self {
            calculator,
            bin_type,
            meta: bin_meta(bin_type),
        }
    }
}

#[async_trait]
impl SensorPort for BinSensor {
    fn meta(&self) -> &SensorMeta {
        &self.meta
    }

    async fn refresh(&self, today: NaiveDate) -> Result<SensorSnapshot, ScheduleError> {
        let result = self.calculator.next_occurrence(self.bin_type, today)?;
        trace!(sensor = %self.meta.id, %today, "computed bin sensor snapshot");
        Ok(SensorSnapshot {
            state: format_state(&result),
            attributes: SensorAttributes::from_result(&result),
        })
    }
}

/// Sensor showing the next collection regardless of bin type.
pub struct NextCollectionSensor {
    calculator: Arc<ScheduleCalculator>,
    meta: SensorMeta,
}

impl NextCollectionSensor {
    /// Create the next-collection sensor.
    #[must_use]
    pub fn new(calculator: Arc<ScheduleCalculator>) -> Self {
        Self {
            calculator,
            meta: SensorMeta {
                id: SensorId(String::from("greyhound_bins_next_collection")),
                name: String::from("Greyhound Next Bin Collection"),
                icon: String::from("mdi:calendar-clock"),
            },
        }
    }
}

#[async_trait]
impl SensorPort for NextCollectionSensor {
    fn meta(&self) -> &SensorMeta {
        &self.meta
    }

    async fn refresh(&self, today: NaiveDate) -> Result<SensorSnapshot, ScheduleError> {
        let next = self.calculator.next_overall(today)?;
        trace!(sensor = %self.meta.id, %today, bin = %next.bin_type, "computed next-collection snapshot");
        Ok(SensorSnapshot {
            state: format_state(&next.result),
            attributes: SensorAttributes::from_next(&next),
        })
    }
}

/// Build the full sensor bundle backed by one shared calculator.
///
/// Registration order is the display order: first the two bin sensors,
/// then the combined next-collection sensor.
#[must_use]
pub fn sensors(calculator: Arc<ScheduleCalculator>) -> Vec<Arc<dyn SensorPort>> {
    vec![
        Arc::new(BinSensor::new(Arc::clone(&calculator), BinType::Black)),
        Arc::new(BinSensor::new(Arc::clone(&calculator), BinType::GreenBrown)),
        Arc::new(NextCollectionSensor::new(calculator)),
    ]
}

fn bin_meta(bin_type: BinType) -> SensorMeta {
    let icon = match bin_type {
        BinType::Black => "mdi:delete",
        BinType::GreenBrown => "mdi:recycle",
    };
    SensorMeta {
        id: SensorId(format!("greyhound_bins_{bin_type}")),
        name: format!("Greyhound {} Collection", bin_type.label()),
        icon: icon.to_owned(),
    }
}

/// Long-form state string, e.g. "Thursday, 01 January 2026".
fn format_state(result: &CollectionResult) -> String {
    result.collection_date.format("%A, %d %B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    fn bundle() -> Vec<Arc<dyn SensorPort>> {
        sensors(Arc::new(ScheduleCalculator::new()))
    }

    #[test]
    fn bundle_metadata_matches_the_integration() {
        let metas: Vec<SensorMeta> = bundle().iter().map(|sensor| sensor.meta().clone()).collect();

        let ids: Vec<&str> = metas.iter().map(|meta| meta.id.0.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "greyhound_bins_black",
                "greyhound_bins_green_brown",
                "greyhound_bins_next_collection",
            ]
        );

        let icons: Vec<&str> = metas.iter().map(|meta| meta.icon.as_str()).collect();
        assert_eq!(icons, vec!["mdi:delete", "mdi:recycle", "mdi:calendar-clock"]);

        assert_eq!(metas[0].name, "Greyhound Black Bin Collection");
        assert_eq!(metas[1].name, "Greyhound Green & Brown Bins Collection");
    }

    #[tokio::test]
    async fn black_sensor_on_its_anchor_day() {
        let calculator = Arc::new(ScheduleCalculator::new());
        let sensor = BinSensor::new(calculator, BinType::Black);
        let snapshot = sensor.refresh(date(2026, 1, 1)).await.expect("in range");

        assert_eq!(snapshot.state, "Thursday, 01 January 2026");

        let attributes = serde_json::to_value(&snapshot.attributes).expect("serializable");
        assert_eq!(
            attributes,
            json!({
                "days_until_collection": 0,
                "collection_date": "2026-01-01",
                "collection_day": "Thursday",
                "is_tomorrow": false,
                "is_today": true,
            })
        );
    }

    #[tokio::test]
    async fn bin_sensors_do_not_publish_a_bin_type() {
        let calculator = Arc::new(ScheduleCalculator::new());
        let sensor = BinSensor::new(calculator, BinType::GreenBrown);
        let snapshot = sensor.refresh(date(2026, 1, 7)).await.expect("in range");

        let attributes = serde_json::to_value(&snapshot.attributes).expect("serializable");
        let Value::Object(fields) = attributes else {
            panic!("attributes must serialize to an object");
        };
        assert!(!fields.contains_key("bin_type"));
        assert_eq!(fields.get("is_tomorrow"), Some(&Value::Bool(true)));
        assert_eq!(
            fields.get("collection_date"),
            Some(&Value::String(String::from("2026-01-08")))
        );
    }

    #[tokio::test]
    async fn next_sensor_publishes_the_winning_bin_type() {
        let calculator = Arc::new(ScheduleCalculator::new());
        let sensor = NextCollectionSensor::new(calculator);

        let snapshot = sensor.refresh(date(2026, 1, 7)).await.expect("in range");
        assert_eq!(snapshot.state, "Thursday, 08 January 2026");
        assert_eq!(
            snapshot.attributes.bin_type.as_deref(),
            Some("Green & Brown Bins")
        );

        let snapshot = sensor.refresh(date(2025, 12, 31)).await.expect("in range");
        assert_eq!(snapshot.attributes.bin_type.as_deref(), Some("Black Bin"));
        assert!(snapshot.attributes.is_tomorrow);
    }

    #[tokio::test]
    async fn out_of_range_day_propagates() {
        let calculator = Arc::new(ScheduleCalculator::new());
        let sensor = NextCollectionSensor::new(calculator);
        let outcome = sensor.refresh(NaiveDate::MAX).await;
        assert!(matches!(outcome, Err(ScheduleError::DateOutOfRange { .. })));
    }
}
