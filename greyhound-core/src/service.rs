//! High-level service facade the host talks to.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::model::{SensorId, SensorMeta};
use crate::ports::{ScheduleError, SensorSnapshot};
use crate::registry::SensorRegistry;

/// Public entry point for refreshing sensors.
pub struct GreyhoundService {
    registry: Arc<SensorRegistry>,
}

impl GreyhoundService {
    /// Create a new service bound to the provided registry.
    #[must_use]
    pub fn new(registry: Arc<SensorRegistry>) -> Self {
        Self { registry }
    }

    /// Metadata for all registered sensors, in registration order.
    #[must_use]
    pub fn sensors(&self) -> Vec<SensorMeta> {
        self.registry.metas()
    }

    /// Refresh a single sensor for the given day.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] if the sensor is unknown or the day is
    /// out of the representable range.
    pub async fn refresh(
        &self,
        id: &SensorId,
        today: NaiveDate,
    ) -> Result<SensorSnapshot, ScheduleError> {
        let sensor = self.registry.sensor(id)?;
        let snapshot = sensor.refresh(today).await?;
        debug!(sensor = %id, %today, state = %snapshot.state, "sensor refreshed");
        Ok(snapshot)
    }

    /// Refresh every registered sensor for the given day.
    ///
    /// Failures are returned per sensor rather than aborting the tick, so
    /// the host can keep the prior state of just the affected entity.
    pub async fn refresh_all(
        &self,
        today: NaiveDate,
    ) -> Vec<(SensorMeta, Result<SensorSnapshot, ScheduleError>)> {
        let mut readings = Vec::new();
        for sensor in self.registry.iter() {
            let outcome = sensor.refresh(today).await;
            readings.push((sensor.meta().clone(), outcome));
        }
        readings
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::ports::{SensorAttributes, SensorPort};

    struct EchoSensor {
        meta: SensorMeta,
    }

    #[async_trait]
    impl SensorPort for EchoSensor {
        fn meta(&self) -> &SensorMeta {
            &self.meta
        }

        async fn refresh(&self, today: NaiveDate) -> Result<SensorSnapshot, ScheduleError> {
            Ok(SensorSnapshot {
                state: format!("{} on {today}", self.meta.name),
                attributes: SensorAttributes {
                    days_until_collection: 3,
                    collection_date: today,
                    collection_day: String::from("Thursday"),
                    is_tomorrow: false,
                    is_today: false,
                    bin_type: None,
                },
            })
        }
    }

    fn service() -> GreyhoundService {
        let sensors: Vec<Arc<dyn SensorPort>> = ["alpha", "beta"]
            .into_iter()
            .map(|name| {
                Arc::new(EchoSensor {
                    meta: SensorMeta {
                        id: SensorId(name.to_owned()),
                        name: name.to_owned(),
                        icon: String::from("mdi:delete"),
                    },
                }) as Arc<dyn SensorPort>
            })
            .collect();
        GreyhoundService::new(Arc::new(SensorRegistry::new(sensors)))
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid test date")
    }

    #[tokio::test]
    async fn refreshes_a_known_sensor() {
        let service = service();
        let snapshot = service
            .refresh(&SensorId(String::from("alpha")), day())
            .await
            .expect("known sensor");
        assert_eq!(snapshot.state, "alpha on 2026-01-01");
    }

    #[tokio::test]
    async fn unknown_sensor_is_an_error() {
        let service = service();
        let outcome = service.refresh(&SensorId(String::from("gamma")), day()).await;
        assert!(matches!(outcome, Err(ScheduleError::UnknownSensor(_))));
    }

    #[tokio::test]
    async fn refresh_all_covers_every_sensor_in_order() {
        let service = service();
        let readings = service.refresh_all(day()).await;
        let ids: Vec<String> = readings.into_iter().map(|(meta, _)| meta.id.0).collect();
        assert_eq!(ids, vec!["alpha", "beta"]);
    }
}
