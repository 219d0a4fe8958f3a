use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Re-run `service.refresh_all(...)` for the current preview date.
    Refresh,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Char, Down, Enter, Left, PageDown, PageUp, Right, Up};

    // Global quit shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q') && key.modifiers.is_empty() {
        return Action::Quit;
    }

    match key.code {
        Up | Char('k') => {
            app.select_previous();
            Action::None
        }
        Down | Char('j') => {
            app.select_next();
            Action::None
        }
        Left | Char('h') => {
            app.step_days(-1);
            Action::Refresh
        }
        Right | Char('l') => {
            app.step_days(1);
            Action::Refresh
        }
        PageUp => {
            app.step_days(-7);
            Action::Refresh
        }
        PageDown => {
            app.step_days(7);
            Action::Refresh
        }
        Char('t') => {
            app.reset_to_today();
            Action::Refresh
        }
        Char('r') | Enter => Action::Refresh,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;
    use crossterm::event::KeyEvent;
    use greyhound_core::{
        registry::SensorRegistry, schedule::ScheduleCalculator, service::GreyhoundService,
    };

    use super::*;

    fn app() -> App {
        let calculator = Arc::new(ScheduleCalculator::new());
        let registry = Arc::new(SensorRegistry::new(greyhound_sensors::sensors(Arc::clone(
            &calculator,
        ))));
        App::new(Arc::new(GreyhoundService::new(registry)), calculator)
    }

    #[test]
    fn quit_keys_quit() {
        let mut app = app();
        let quit = handle_key_event(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE), &mut app);
        assert_eq!(quit, Action::Quit);

        let ctrl_c = handle_key_event(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut app,
        );
        assert_eq!(ctrl_c, Action::Quit);
    }

    #[test]
    fn stepping_the_date_detaches_from_the_clock_and_refreshes() {
        let mut app = app();
        let start = app.preview_date;

        let action = handle_key_event(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE), &mut app);
        assert_eq!(action, Action::Refresh);
        assert_eq!(app.preview_date, start + Duration::days(1));
        assert!(!app.follow_clock);

        let action = handle_key_event(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE), &mut app);
        assert_eq!(action, Action::Refresh);
        assert!(app.follow_clock);
    }

    #[test]
    fn selection_stays_within_the_sensor_list() {
        let mut app = app();
        assert_eq!(app.sensors.len(), 3);

        handle_key_event(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE), &mut app);
        assert_eq!(app.selected, 0);

        for _ in 0..5 {
            handle_key_event(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE), &mut app);
        }
        assert_eq!(app.selected, 2);
    }
}
