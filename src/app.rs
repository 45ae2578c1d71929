use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::io;
use std::time::Duration;

use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame, Terminal,
};

use crate::locale::StringTable;
use crate::refresh::Refresher;
use crate::session::Session;
use crate::theme::ColorPalette;
use crate::units::{speed::KPH_UNIT, temperature::degrees};
use crate::weather::ViewModel;

const TICK: Duration = Duration::from_millis(200);
const HEADER_TEXT: Color = Color::White;

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    session: &mut Session,
    refresher: &Refresher,
) -> io::Result<()> {
    refresher.request(session.begin_refresh());

    loop {
        terminal.draw(|f| ui(f, session))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if session.notice().is_some() && matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    session.dismiss_notice();
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('l') => refresher.request(session.select_next_location()),
                    KeyCode::Char('r') => refresher.request(session.begin_refresh()),
                    KeyCode::Char('g') => session.toggle_locale(),
                    KeyCode::Char('t') => session.toggle_theme(),
                    _ => {}
                }
            }
        }

        refresher.apply_pending(session);
    }
}

fn card(title: &str, palette: &ColorPalette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(palette.border))
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(palette.card))
}

fn display_headline(session: &Session, view: Option<&ViewModel>) -> Paragraph<'static> {
    let strings = session.strings();
    // A forecast is always titled with the district it was fetched for.
    let shown = match view {
        Some(_) => session.forecast_location().unwrap_or(session.location()),
        None => session.location(),
    };
    let (localized, title) = shown.title(session.locale());
    let bold = Style::default()
        .fg(HEADER_TEXT)
        .add_modifier(Modifier::BOLD);

    let mut place = vec![Span::raw(" ⌖ ")];
    if let Some(name) = localized {
        place.push(Span::styled(format!("{name} "), bold));
    }
    place.push(Span::raw(title));
    if session.is_loading() {
        let pending = session.location();
        if pending.id != shown.id {
            place.push(Span::raw(format!("  ({} → {})", strings.loading, pending.display_name)));
        } else {
            place.push(Span::raw(format!("  ({})", strings.loading)));
        }
    }

    let mut lines = vec![Line::from(place), Line::from("")];
    if let Some(view) = view {
        let current = &view.current;
        lines.push(
            Line::from(vec![
                Span::raw(format!("{}  ", current.icon.glyph())),
                Span::styled(degrees(current.temperature_c), bold),
            ])
            .alignment(Alignment::Center),
        );
        lines.push(Line::from(strings.condition(current.category)).alignment(Alignment::Center));
        lines.push(
            Line::from(format!(
                "{}:{} {}:{}",
                strings.high,
                degrees(current.high_c),
                strings.low,
                degrees(current.low_c)
            ))
            .alignment(Alignment::Center),
        );
    }

    Paragraph::new(lines).style(
        Style::default()
            .fg(HEADER_TEXT)
            .bg(session.palette().header[0]),
    )
}

fn display_key_hints(strings: &StringTable, palette: &ColorPalette) -> Paragraph<'static> {
    let hint = |key: &str, label: &str| {
        vec![
            Span::styled(
                format!(" {key} "),
                Style::default()
                    .fg(palette.header[1])
                    .bg(HEADER_TEXT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" {label}  ")),
        ]
    };
    let spans: Vec<Span> = [
        hint("l", strings.key_location),
        hint("g", strings.toggle_language),
        hint("t", strings.key_theme),
        hint("q", strings.key_quit),
    ]
    .into_iter()
    .flatten()
    .collect();

    Paragraph::new(Line::from(spans)).style(Style::default().fg(HEADER_TEXT).bg(palette.header[1]))
}

fn display_details(view: &ViewModel, strings: &StringTable, palette: &ColorPalette) -> Table<'static> {
    let current = &view.current;
    let value = Style::default()
        .fg(palette.text)
        .add_modifier(Modifier::BOLD);
    let label = Style::default().fg(palette.text_secondary);
    let accent = Style::default().fg(palette.primary);

    let rows = vec![
        Row::new(vec![
            Cell::from(Span::styled("💧", accent)),
            Cell::from(Span::styled("≋", accent)),
            Cell::from(Span::styled("🌡", accent)),
        ]),
        Row::new(vec![
            Cell::from(format!("{}%", current.humidity_pct)).style(value),
            Cell::from(format!("{} {KPH_UNIT}", current.wind_kph)).style(value),
            Cell::from(degrees(current.feels_like_c)).style(value),
        ]),
        Row::new(vec![
            Cell::from(strings.humidity).style(label),
            Cell::from(strings.wind_speed).style(label),
            Cell::from(strings.feels_like).style(label),
        ]),
    ];

    Table::new(rows, [Constraint::Ratio(1, 3); 3]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .border_type(BorderType::Rounded)
            .style(Style::default().bg(palette.card)),
    )
}

fn display_hourly(view: &ViewModel, strings: &StringTable, palette: &ColorPalette) -> Table<'static> {
    let times = view
        .hourly
        .iter()
        .map(|h| Cell::from(h.hour_label.clone()).style(Style::default().fg(palette.text_secondary)));
    let icons = view
        .hourly
        .iter()
        .map(|h| Cell::from(h.icon.glyph()).style(Style::default().fg(palette.primary)));
    let temps = view.hourly.iter().map(|h| {
        Cell::from(degrees(h.temperature_c)).style(
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        )
    });

    let widths = vec![Constraint::Ratio(1, view.hourly.len().max(1) as u32); view.hourly.len()];
    Table::new(
        vec![Row::new(times), Row::new(icons), Row::new(temps)],
        widths,
    )
    .block(card(strings.hourly_forecast, palette))
}

fn display_weekly(view: &ViewModel, strings: &StringTable, palette: &ColorPalette) -> Table<'static> {
    let rows: Vec<Row> = view
        .daily
        .iter()
        .map(|day| {
            Row::new(vec![
                Cell::from(day.day_label.clone()).style(
                    Style::default()
                        .fg(palette.text)
                        .add_modifier(Modifier::BOLD),
                ),
                Cell::from(day.icon.glyph()).style(Style::default().fg(palette.primary)),
                Cell::from(format!("💧{}%", day.precipitation_pct))
                    .style(Style::default().fg(palette.primary)),
                Cell::from(degrees(day.high_c)).style(Style::default().fg(palette.text)),
                Cell::from(degrees(day.low_c)).style(Style::default().fg(palette.text_secondary)),
            ])
        })
        .collect();

    Table::new(
        rows,
        [
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Length(5),
            Constraint::Length(5),
        ],
    )
    .block(card(strings.weekly_forecast, palette))
}

fn display_loading(strings: &StringTable, palette: &ColorPalette) -> Paragraph<'static> {
    Paragraph::new(vec![Line::from(""), Line::from(strings.loading)])
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(HEADER_TEXT)
                .bg(palette.header[0])
                .add_modifier(Modifier::BOLD),
        )
}

fn display_notice(title: &str, message: &str, palette: &ColorPalette) -> Paragraph<'static> {
    Paragraph::new(vec![Line::from(""), Line::from(message.to_string())])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(card(title, palette).border_style(Style::default().fg(palette.primary)))
        .style(Style::default().fg(palette.text))
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn ui(f: &mut Frame, session: &Session) {
    let palette = session.palette();
    let strings = session.strings();
    let area = f.area();

    f.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        area,
    );

    match session.view() {
        None => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(3), Constraint::Length(1)])
                .split(area);
            f.render_widget(display_headline(session, None), chunks[0]);
            f.render_widget(display_loading(strings, palette), chunks[1]);
            f.render_widget(display_key_hints(strings, palette), chunks[2]);
        }
        Some(view) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(5),
                    Constraint::Length(1),
                    Constraint::Length(5),
                    Constraint::Length(5),
                    Constraint::Min(view.daily.len() as u16 + 2),
                    Constraint::Length(1),
                ])
                .split(area);

            f.render_widget(display_headline(session, Some(view)), chunks[0]);
            f.render_widget(display_key_hints(strings, palette), chunks[1]);
            f.render_widget(display_details(view, strings, palette), chunks[2]);
            f.render_widget(display_hourly(view, strings, palette), chunks[3]);
            f.render_widget(display_weekly(view, strings, palette), chunks[4]);
            f.render_widget(
                Paragraph::new(strings.footer)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(palette.text_secondary).bg(palette.background)),
                chunks[5],
            );
        }
    }

    if let Some((title, message)) = session.notice() {
        let popup = centered(area, 50, 6);
        f.render_widget(Clear, popup);
        f.render_widget(display_notice(title, message, palette), popup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::location::LocationCycle;
    use crate::openmeteo::{fixtures::week_payload, FetchError};
    use crate::theme::ThemeMode;
    use chrono::{TimeZone, Utc};
    use ratatui::backend::TestBackend;

    fn rendered(session: &Session) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal.draw(|f| ui(f, session)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn loaded_session(locale: Locale) -> Session {
        let cycle = LocationCycle::tokyo();
        let mut session = Session::new(cycle, cycle.first(), locale, ThemeMode::Dark);
        let ticket = session.begin_refresh();
        session.complete_refresh(
            ticket.generation,
            Ok(week_payload([0, 2, 50, 80, 5, 1, 65])),
            Utc.with_ymd_and_hms(2026, 10, 12, 0, 30, 0).unwrap(),
        );
        session
    }

    #[test]
    fn test_centered() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered(area, 50, 6), Rect::new(15, 9, 50, 6));
        assert_eq!(centered(Rect::new(0, 0, 20, 4), 50, 6), Rect::new(0, 0, 20, 4));
    }

    #[test]
    fn test_loading_screen() {
        let cycle = LocationCycle::tokyo();
        let mut session = Session::new(cycle, cycle.first(), Locale::English, ThemeMode::Light);
        session.begin_refresh();
        let screen = rendered(&session);
        assert!(screen.contains("Loading..."));
        assert!(screen.contains("Shibuya, Tokyo"));
    }

    #[test]
    fn test_forecast_screen() {
        let screen = rendered(&loaded_session(Locale::English));
        assert!(screen.contains("Hourly Forecast"));
        assert!(screen.contains("Weekly Forecast"));
        assert!(screen.contains("Today"));
        assert!(screen.contains("Sunday"));
        assert!(screen.contains("9:00"));
        assert!(screen.contains("Tokyo Weather Forecast"));
    }

    #[test]
    fn test_error_notice_over_previous_forecast() {
        let mut session = loaded_session(Locale::English);
        let ticket = session.select_next_location();
        session.complete_refresh(ticket.generation, Err(FetchError::Status(500)), Utc::now());
        let screen = rendered(&session);
        assert!(screen.contains("Error"));
        assert!(screen.contains("Weekly Forecast"));
    }

    #[test]
    fn test_header_names_forecast_district_after_failed_switch() {
        let mut session = loaded_session(Locale::English);
        let ticket = session.select_next_location();
        session.complete_refresh(ticket.generation, Err(FetchError::Status(500)), Utc::now());
        session.dismiss_notice();

        assert_eq!(session.location().id, "shinjuku");
        let screen = rendered(&session);
        assert!(screen.contains("Shibuya, Tokyo"));
        assert!(!screen.contains("Shinjuku"));
    }

    #[test]
    fn test_header_shows_pending_district_while_loading() {
        let mut session = loaded_session(Locale::English);
        session.select_next_location();

        let screen = rendered(&session);
        assert!(screen.contains("Shibuya, Tokyo"));
        assert!(screen.contains("Loading... → Shinjuku"));
    }
}
