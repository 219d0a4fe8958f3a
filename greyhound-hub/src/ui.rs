use greyhound_core::model::{BinType, NextCollection};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};
use serde_json::Value;

use crate::app::App;

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, sensors, upcoming schedule, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(12),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, sensors_area, upcoming_area, status_area] = chunks else {
        return;
    };

    // Title / header
    let header = Paragraph::new("greyhound – biweekly bin collection sensors")
        .block(Block::default().borders(Borders::ALL).title("Greyhound Bins"));
    frame.render_widget(header, *header_area);

    // Sensor list on the left, selected sensor detail on the right
    let sensor_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(42), Constraint::Min(0)])
        .split(*sensors_area);

    let panes = sensor_chunks.as_ref();
    let [list_area, detail_area] = panes else {
        return;
    };

    draw_sensor_list(frame, app, *list_area);
    draw_sensor_detail(frame, app, *detail_area);
    draw_upcoming(frame, app, *upcoming_area);

    // Status bar
    let nav_hint = "↑/↓ sensor · ←/→ day · PgUp/PgDn week · t today · r refresh · q/Ctrl-C quit";
    let clock_hint = if app.follow_clock {
        format!("Today {}", app.preview_date.format("%d.%m.%Y"))
    } else {
        format!("Previewing {}", app.preview_date.format("%d.%m.%Y"))
    };

    let status_text = if let Some(msg) = &app.error_message {
        format!("{msg} · {clock_hint} · {nav_hint}")
    } else {
        format!("{clock_hint} · {nav_hint}")
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.follow_clock {
        Style::default()
    } else {
        Style::default().fg(Color::Yellow)
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_sensor_list(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items = app
        .sensors
        .iter()
        .enumerate()
        .map(|(idx, meta)| {
            let prefix = if idx == app.selected { "> " } else { "  " };
            let state = app
                .snapshots
                .get(&meta.id)
                .map_or("…", |snapshot| snapshot.state.as_str());
            ListItem::new(format!("{prefix}{}\n  {state}", meta.name))
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Sensors (↑/↓)"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.sensors.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_sensor_detail(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(meta) = app.selected_sensor() else {
        return;
    };

    let title = format!("{} ({})", meta.name, meta.icon);

    let Some(snapshot) = app.snapshots.get(&meta.id) else {
        let paragraph = Paragraph::new("No data yet, refresh pending.")
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            snapshot.state.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    // Attributes exactly as a host would receive them.
    if let Ok(Value::Object(fields)) = serde_json::to_value(&snapshot.attributes) {
        for (name, value) in fields {
            lines.push(Line::from(format!("{name}: {value}")));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_upcoming(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let title = format!(
        "Upcoming collections from {}",
        app.preview_date.format("%d.%m.%Y")
    );

    if app.upcoming.is_empty() {
        let paragraph = Paragraph::new("No upcoming collections computed.")
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let rows = app.upcoming.iter().map(|event| {
        let date = event.result.collection_date.format("%d.%m.%Y").to_string();
        let weekday = event.result.collection_day.clone();
        let relative = relative_day_label(event);

        let mut style = Style::default().fg(bin_color(event.bin_type));
        if event.result.is_today {
            style = style.add_modifier(Modifier::BOLD);
        }

        Row::new(vec![
            Cell::from(date),
            Cell::from(weekday),
            Cell::from(relative),
            Cell::from(event.bin_type.label()),
        ])
        .style(style)
    });

    let column_widths = [
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["Date", "Day", "In", "Bin"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);

    frame.render_widget(table, area);
}

fn bin_color(bin_type: BinType) -> Color {
    match bin_type {
        BinType::Black => Color::Gray,
        BinType::GreenBrown => Color::Green,
    }
}

fn relative_day_label(event: &NextCollection) -> String {
    match event.result.days_until {
        0 => "today".to_owned(),
        1 => "tomorrow".to_owned(),
        days => format!("in {days} days"),
    }
}
