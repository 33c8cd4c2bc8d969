use std::io;
use std::time::{Duration, Instant};

use chrono::{Datelike, Local, Timelike};
use clap::ValueEnum;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, BorderType, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table},
    Frame, Terminal,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::WeatherSource;
use crate::condition::{classify, ConditionIcon};
use crate::lookup::WeatherLookup;
use crate::theme::{derive_theme, ThemeDescriptor};
use crate::units::{direction::degree_to_compass, Units};
use crate::weather::{RequestState, WeatherResult, MISSING};

const TICK: Duration = Duration::from_millis(250);

const TITLE: &str = "Weather Checker";

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// How the screen background is painted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    /// One flat color taken from the theme.
    Static,
    /// Theme gradient drifting across the header.
    #[default]
    Gradient,
    /// Terminal default colors.
    None,
}

/// How the current conditions are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WidgetLayout {
    Table,
    #[default]
    Cards,
}

impl WidgetLayout {
    pub fn toggle(self) -> Self {
        match self {
            WidgetLayout::Table => WidgetLayout::Cards,
            WidgetLayout::Cards => WidgetLayout::Table,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presentation {
    pub background: Background,
    pub layout: WidgetLayout,
    pub units: Units,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct App<S> {
    lookup: WeatherLookup<S>,
    input: String,
    presentation: Presentation,
    tick: usize,
    last_city: Option<String>,
}

impl<S: WeatherSource> App<S> {
    pub fn new(lookup: WeatherLookup<S>, presentation: Presentation) -> Self {
        Self {
            lookup,
            input: String::new(),
            presentation,
            tick: 0,
            last_city: None,
        }
    }

    /// Prefill the input with `city` and look it up right away.
    pub fn start_with(&mut self, city: &str) {
        self.input = city.to_string();
        self.lookup.search(&self.input);
    }

    pub fn state(&self) -> &RequestState {
        self.lookup.state()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    /// City of the most recent successful lookup.
    pub fn last_city(&self) -> Option<&str> {
        self.last_city.as_deref()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        match key.code {
            KeyCode::Esc => return Control::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Control::Quit
            }
            KeyCode::Enter => {
                self.lookup.search(&self.input);
            }
            KeyCode::Tab => {
                self.presentation.layout = self.presentation.layout.toggle();
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.input_edited();
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.input.push(c);
                self.input_edited();
            }
            _ => {}
        }
        Control::Continue
    }

    fn input_edited(&mut self) {
        if self.input.trim().is_empty() {
            self.lookup.clear();
        }
    }

    /// Pick up finished lookups.
    pub fn poll(&mut self) {
        if self.lookup.poll() && self.lookup.state().data().is_some() {
            self.last_city = self.lookup.query().map(|q| q.city().to_string());
        }
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}

pub fn run_app<B: Backend, S: WeatherSource>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        app.poll();
        let hour = Local::now().hour();
        terminal.draw(|f| ui(f, &*app, hour))?;

        let timeout = TICK.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key) == Control::Quit {
                    info!("quit requested");
                    return Ok(());
                }
            }
        }

        if last_tick.elapsed() >= TICK {
            last_tick = Instant::now();
            app.on_tick();
        }
    }
}

/// Colors for one frame, from the theme and the background mode.
struct Palette {
    base: Style,
    border: Style,
    title: Style,
    value: Style,
}

impl Palette {
    fn new(background: Background, theme: &ThemeDescriptor) -> Self {
        match background {
            Background::None => Self {
                base: Style::default(),
                border: Style::default().fg(Color::Cyan),
                title: Style::default().fg(Color::Yellow),
                value: Style::default().fg(Color::Green),
            },
            Background::Static | Background::Gradient => {
                // the header carries the drifting stops; the flat mode uses the first one
                let stop = match background {
                    Background::Static => theme.gradient.first(),
                    _ => theme.gradient.last(),
                };
                let bg = stop.copied().unwrap_or(Color::Reset);
                Self {
                    base: Style::default().bg(bg).fg(theme.text_color),
                    border: Style::default().fg(theme.widget_color),
                    title: Style::default()
                        .fg(theme.text_color)
                        .add_modifier(Modifier::BOLD),
                    value: Style::default().fg(theme.widget_color),
                }
            }
        }
    }

    fn block<'a>(&self, title: impl Into<String>) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(format!(" {} ", title.into()), self.title))
            .title_alignment(Alignment::Left)
            .border_style(self.border)
            .border_type(BorderType::Rounded)
    }
}

/// One labeled value on the current conditions panel.
struct Reading {
    icon: &'static str,
    label: &'static str,
    value: String,
    unit: &'static str,
}

fn number(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}"),
        None => MISSING.to_string(),
    }
}

fn readings(data: &WeatherResult, units: Units) -> Vec<Reading> {
    let current = data.current.clone().unwrap_or_default();
    let meta = classify(current.weathercode);

    let wind = match (current.wind_speed_10m, current.wind_direction_10m) {
        (Some(speed), Some(dir)) => format!("{:.1} {}", units.speed(speed), degree_to_compass(dir)),
        (speed, _) => number(speed.map(|s| units.speed(s))),
    };

    vec![
        Reading {
            icon: ConditionIcon::DaySunny.glyph(),
            label: "Temperature",
            value: number(current.temperature_2m.map(|t| units.temperature(t))),
            unit: units.temperature_unit(),
        },
        Reading {
            icon: "≋",
            label: "Wind Speed",
            value: wind,
            unit: units.speed_unit(),
        },
        Reading {
            icon: ConditionIcon::Cloudy.glyph(),
            label: "Cloud Cover",
            value: number(current.cloud_cover),
            unit: "%",
        },
        Reading {
            icon: ConditionIcon::Rain.glyph(),
            label: "Rain",
            value: number(current.rain.map(|r| units.precipitation(r))),
            unit: units.precipitation_unit(),
        },
        Reading {
            icon: "↑",
            label: "Sunrise",
            value: data.sunrise_today().unwrap_or(MISSING).to_string(),
            unit: "",
        },
        Reading {
            icon: "↓",
            label: "Sunset",
            value: data.sunset_today().unwrap_or(MISSING).to_string(),
            unit: "",
        },
        Reading {
            icon: meta.icon.glyph(),
            label: "Condition",
            value: meta.label.to_string(),
            unit: "",
        },
    ]
}

fn display_headline(
    f: &mut Frame,
    area: Rect,
    background: Background,
    theme: &ThemeDescriptor,
    palette: &Palette,
    tick: usize,
) {
    if background != Background::Gradient || theme.gradient.is_empty() {
        let headline = Paragraph::new(Line::from(Span::styled(TITLE, palette.title)))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM).border_style(palette.border));
        f.render_widget(headline, area);
        return;
    }

    // one colored cell per column, stops drifting right as the ticks go by
    let width = usize::from(area.width).max(1);
    let stops = theme.gradient.len();
    let start = width.saturating_sub(TITLE.len()) / 2;
    let title: Vec<char> = TITLE.chars().collect();
    let band: Vec<Span> = (0..width)
        .map(|x| {
            let stop = (x * stops / width + tick) % stops;
            let ch = x
                .checked_sub(start)
                .and_then(|i| title.get(i))
                .copied()
                .unwrap_or(' ');
            Span::styled(
                ch.to_string(),
                Style::default()
                    .bg(theme.gradient[stop])
                    .fg(theme.text_color)
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect();

    let lines = (0..area.height)
        .map(|row| {
            if row == area.height / 2 {
                Line::from(band.clone())
            } else {
                Line::from(
                    band.iter()
                        .map(|s| Span::styled(" ", s.style))
                        .collect::<Vec<_>>(),
                )
            }
        })
        .collect::<Vec<_>>();
    f.render_widget(Paragraph::new(lines), area);
}

fn display_status<'a>(state: &RequestState, palette: &Palette, tick: usize) -> Paragraph<'a> {
    let line = match state {
        RequestState::Idle => Line::from(Span::styled(
            "Enter a city name above to see the weather.",
            palette.base,
        )),
        RequestState::Loading => Line::from(vec![
            Span::styled(SPINNER[tick % SPINNER.len()], palette.value),
            Span::styled(" Searching...", palette.base),
        ]),
        RequestState::Failed(message) => Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        RequestState::Success(_) => Line::from(""),
    };
    Paragraph::new(line).alignment(Alignment::Center)
}

fn display_current_table<'a>(items: Vec<Reading>, palette: &Palette, title: String) -> Table<'a> {
    let rows: Vec<Row> = items
        .into_iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(format!(" {} {}", r.icon, r.label)),
                Cell::from(format!("{} {}", r.value, r.unit).trim_end().to_string())
                    .style(palette.value),
            ])
        })
        .collect();

    Table::new(rows, [Constraint::Length(16), Constraint::Min(12)]).block(palette.block(title))
}

fn display_current_cards(
    f: &mut Frame,
    area: Rect,
    items: Vec<Reading>,
    palette: &Palette,
    title: String,
) {
    const COLUMNS: usize = 4;

    let outer = palette.block(title);
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let rows = items.len().div_ceil(COLUMNS);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(inner);

    for (chunk, row_area) in items.chunks(COLUMNS).zip(row_areas.iter()) {
        let card_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, COLUMNS as u32); COLUMNS])
            .split(*row_area);
        for (reading, card_area) in chunk.iter().zip(card_areas.iter()) {
            let card = Paragraph::new(vec![
                Line::from(Span::styled(
                    format!("{} {}", reading.icon, reading.label),
                    palette.title,
                )),
                Line::from(Span::styled(
                    format!("{} {}", reading.value, reading.unit).trim_end().to_string(),
                    palette.value,
                )),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(palette.border)
                    .border_type(BorderType::Plain),
            );
            f.render_widget(card, *card_area);
        }
    }
}

fn display_hourly<'a>(data: &WeatherResult, units: Units, palette: &Palette) -> Table<'a> {
    let header = Row::new(vec![
        "Time".to_string(),
        format!("Temp ({})", units.temperature_unit()),
        format!("Wind ({})", units.speed_unit()),
    ])
    .style(palette.title);

    let rows: Vec<Row> = data
        .hourly_rows()
        .into_iter()
        .map(|h| {
            Row::new(vec![
                Cell::from(h.time.to_string()),
                Cell::from(number(h.temperature.map(|t| units.temperature(t)))).style(palette.value),
                Cell::from(number(h.wind_speed.map(|w| units.speed(w)))).style(palette.value),
            ])
        })
        .collect();

    Table::new(rows, [Constraint::Length(8), Constraint::Length(11), Constraint::Length(12)])
        .header(header)
        .block(palette.block("Hourly Forecast"))
}

fn display_daily<'a>(data: &WeatherResult, units: Units, palette: &Palette) -> Table<'a> {
    let unit = units.temperature_unit();
    let header = Row::new(vec![
        "Date".to_string(),
        format!("Min ({unit})"),
        format!("Max ({unit})"),
        "Sunrise".to_string(),
        "Sunset".to_string(),
    ])
    .style(palette.title);

    let rows: Vec<Row> = data
        .daily_rows()
        .into_iter()
        .map(|d| {
            Row::new(vec![
                Cell::from(d.date.to_string()),
                Cell::from(number(d.min.map(|t| units.temperature(t)))).style(palette.value),
                Cell::from(number(d.max.map(|t| units.temperature(t)))).style(palette.value),
                Cell::from(d.sunrise.unwrap_or(MISSING).to_string()),
                Cell::from(d.sunset.unwrap_or(MISSING).to_string()),
            ])
        })
        .collect();

    Table::new(
        rows,
        [
            Constraint::Length(11),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(palette.block("Daily Forecast"))
}

fn display_trend(f: &mut Frame, area: Rect, data: &WeatherResult, units: Units, palette: &Palette) {
    let trend = data.trend();
    let convert = |points: &[(f64, f64)]| -> Vec<(f64, f64)> {
        points.iter().map(|&(x, y)| (x, units.temperature(y))).collect()
    };
    let min = convert(&trend.min);
    let max = convert(&trend.max);

    let (lo, hi) = trend
        .bounds()
        .map(|(lo, hi)| (units.temperature(lo), units.temperature(hi)))
        .unwrap_or((0.0, 1.0));
    let x_max = (trend.labels.len().saturating_sub(1) as f64).max(1.0);

    let x_labels: Vec<String> = match trend.labels.as_slice() {
        [] => Vec::new(),
        [only] => vec![only.to_string()],
        [first, .., last] => vec![first.to_string(), last.to_string()],
    };

    let datasets = vec![
        Dataset::default()
            .name("Min")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::LightBlue))
            .data(&min),
        Dataset::default()
            .name("Max")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::LightRed))
            .data(&max),
    ];

    let chart = Chart::new(datasets)
        .block(palette.block(format!("Temperature Trend ({})", units.temperature_unit())))
        .x_axis(
            Axis::default()
                .style(palette.border)
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(palette.border)
                .bounds([lo - 1.0, hi + 1.0])
                .labels(vec![format!("{lo:.0}"), format!("{hi:.0}")]),
        );
    f.render_widget(chart, area);
}

fn display_result(
    f: &mut Frame,
    area: Rect,
    data: &WeatherResult,
    city: &str,
    presentation: Presentation,
    palette: &Palette,
) {
    let units = presentation.units;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let has_trend = !data.trend().is_empty();
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(if has_trend { 50 } else { 100 }),
            Constraint::Min(0),
        ])
        .split(columns[0]);

    if data.current.is_some() {
        let title = format!("Current Weather in {city}");
        let items = readings(data, units);
        match presentation.layout {
            WidgetLayout::Table => {
                f.render_widget(display_current_table(items, palette, title), left[0])
            }
            WidgetLayout::Cards => display_current_cards(f, left[0], items, palette, title),
        }
    }
    if has_trend {
        display_trend(f, left[1], data, units, palette);
    }

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(15), Constraint::Min(0)])
        .split(columns[1]);
    if data.hourly.is_some() {
        f.render_widget(display_hourly(data, units, palette), right[0]);
    }
    if data.daily.is_some() {
        f.render_widget(display_daily(data, units, palette), right[1]);
    }
}

pub fn ui<S: WeatherSource>(f: &mut Frame, app: &App<S>, hour: u32) {
    let state = app.state();
    let data = state.data();
    let theme = derive_theme(
        data.and_then(WeatherResult::temperature).unwrap_or(0.0),
        hour,
        data.is_some(),
        data.and_then(WeatherResult::weather_code),
    );
    let presentation = app.presentation;
    let palette = Palette::new(presentation.background, &theme);

    f.render_widget(Block::default().style(palette.base), f.area());

    let vert_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    display_headline(f, vert_layout[0], presentation.background, &theme, &palette, app.tick);

    let input_area = vert_layout[1];
    let input = Paragraph::new(Span::raw(app.input.as_str())).block(palette.block("City"));
    f.render_widget(input, input_area);
    let cursor_x = input_area.x + 1 + app.input.chars().count() as u16;
    if cursor_x < input_area.right().saturating_sub(1) {
        f.set_cursor_position((cursor_x, input_area.y + 1));
    }

    f.render_widget(display_status(state, &palette, app.tick), vert_layout[2]);

    if let Some(data) = data {
        let city = app.lookup.query().map(|q| q.city()).unwrap_or(MISSING);
        display_result(f, vert_layout[3], data, city, presentation, &palette);
    }

    let footer = Paragraph::new(Span::styled(
        format!("{TITLE} © {}. All rights reserved.", Local::now().year()),
        palette.base.add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center);
    f.render_widget(footer, vert_layout[4]);
}
