use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate};
use greyhound_core::{
    model::{NextCollection, SensorId, SensorMeta},
    ports::SensorSnapshot,
    schedule::ScheduleCalculator,
    service::GreyhoundService,
};

/// How many upcoming collections the schedule table shows.
pub(crate) const UPCOMING_COUNT: usize = 8;

pub(crate) struct App {
    pub service: Arc<GreyhoundService>,
    pub calculator: Arc<ScheduleCalculator>,

    pub sensors: Vec<SensorMeta>,
    /// Last good snapshot per sensor; kept on refresh failure.
    pub snapshots: HashMap<SensorId, SensorSnapshot>,
    pub upcoming: Vec<NextCollection>,

    pub selected: usize,
    /// The "today" the sensors are refreshed against. Follows the host
    /// clock until the user steps it to preview another day.
    pub preview_date: NaiveDate,
    pub follow_clock: bool,
    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new(service: Arc<GreyhoundService>, calculator: Arc<ScheduleCalculator>) -> Self {
        let sensors = service.sensors();
        Self {
            service,
            calculator,
            sensors,
            snapshots: HashMap::new(),
            upcoming: Vec::new(),
            selected: 0,
            preview_date: Local::now().date_naive(),
            follow_clock: true,
            error_message: None,
        }
    }

    pub(crate) fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub(crate) fn select_next(&mut self) {
        if self.selected + 1 < self.sensors.len() {
            self.selected += 1;
        }
    }

    pub(crate) fn selected_sensor(&self) -> Option<&SensorMeta> {
        self.sensors.get(self.selected)
    }

    /// Step the previewed day; leaving the current day detaches the app
    /// from the host clock until [`Self::reset_to_today`].
    pub(crate) fn step_days(&mut self, days: i64) {
        if let Some(date) = self.preview_date.checked_add_signed(Duration::days(days)) {
            self.preview_date = date;
            self.follow_clock = false;
        }
    }

    pub(crate) fn reset_to_today(&mut self) {
        self.preview_date = Local::now().date_naive();
        self.follow_clock = true;
    }
}
