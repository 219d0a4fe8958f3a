//! Registry of all sensor adapters known to the integration.

use std::sync::Arc;

use crate::model::{SensorId, SensorMeta};
use crate::ports::{ScheduleError, SensorPort};

/// Resolves sensors by identifier while preserving registration order.
///
/// Order matters for presentation, so the registry keeps a `Vec` rather than
/// a map; with three sensors, lookup is a linear scan.
pub struct SensorRegistry {
    sensors: Vec<Arc<dyn SensorPort>>,
}

impl SensorRegistry {
    /// Build a registry from the provided sensor list.
    #[must_use]
    pub fn new(sensors: Vec<Arc<dyn SensorPort>>) -> Self {
        Self { sensors }
    }

    /// Metadata for all registered sensors, in registration order.
    #[must_use]
    pub fn metas(&self) -> Vec<SensorMeta> {
        self.sensors
            .iter()
            .map(|sensor| sensor.meta().clone())
            .collect()
    }

    /// Iterator over the registered sensors, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn SensorPort>> {
        self.sensors.iter()
    }

    /// Look up a sensor by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::UnknownSensor`] when no sensor is registered
    /// under `id`.
    pub fn sensor(&self, id: &SensorId) -> Result<&Arc<dyn SensorPort>, ScheduleError> {
        self.sensors
            .iter()
            .find(|sensor| &sensor.meta().id == id)
            .ok_or_else(|| ScheduleError::UnknownSensor(id.0.clone()))
    }
}
