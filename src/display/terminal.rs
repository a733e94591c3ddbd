use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};
use std::io::{self, stdout};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::aspect::{AspectPreset, AspectRatio};
use crate::config::Config;
use crate::error::GeometryError;
use crate::form::{Field, FormState, Outcome};
use crate::geometry;
use crate::theme::ColorScheme;

pub fn run(config: Config, save_path: Option<PathBuf>) -> Result<()> {
    let mut app = FormApp::new(&config, save_path);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut FormApp) -> Result<()> {
    info!("Form ready");
    loop {
        terminal.draw(|frame| app.render(frame))?;

        // Each edit is fully recomputed before the next key is read
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key) == Action::Quit {
                break;
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Interactive form: the field buffer being typed plus the form it edits.
pub struct FormApp {
    form: FormState,
    selected: usize,
    buffer: String,
    status: Status,
    color_scheme: ColorScheme,
    unit: String,
    save_path: Option<PathBuf>,
}

impl FormApp {
    pub fn new(config: &Config, save_path: Option<PathBuf>) -> Self {
        let (form, seeded) = super::seed_form(config);
        let status = match seeded {
            Ok(Some(outcome)) => Status::Info(outcome.to_string()),
            Ok(None) => Status::Info(Outcome::InsufficientInput.to_string()),
            Err(e) => Status::Error(e.to_string()),
        };
        Self {
            form,
            selected: 1,
            buffer: String::new(),
            status,
            color_scheme: config.theme.color_scheme,
            unit: config.display.unit.clone(),
            save_path: save_path.or_else(Config::default_path),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn selected_field(&self) -> Field {
        Field::all()[self.selected]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key {
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
            | KeyEvent {
                code: KeyCode::Char('q') | KeyCode::Esc,
                ..
            } => return Action::Quit,
            KeyEvent {
                code: KeyCode::Up | KeyCode::BackTab,
                ..
            } => self.select(self.selected + Field::all().len() - 1),
            KeyEvent {
                code: KeyCode::Down | KeyCode::Tab,
                ..
            } => self.select(self.selected + 1),
            KeyEvent {
                code: KeyCode::Left,
                ..
            } if self.selected_field() == Field::AspectRatio => {
                self.choose_preset(self.preset().prev());
            }
            KeyEvent {
                code: KeyCode::Right,
                ..
            } if self.selected_field() == Field::AspectRatio => {
                self.choose_preset(self.preset().next());
            }
            KeyEvent {
                code: KeyCode::Char(ch),
                ..
            } if (ch.is_ascii_digit() || ch == '.') && self.selected_field() != Field::AspectRatio => {
                self.buffer.push(ch);
            }
            KeyEvent {
                code: KeyCode::Backspace,
                ..
            } => {
                self.buffer.pop();
            }
            KeyEvent {
                code: KeyCode::Enter,
                ..
            } => self.commit(),
            KeyEvent {
                code: KeyCode::Delete,
                ..
            } => {
                let field = self.selected_field();
                if matches!(field, Field::ScreenSize | Field::ViewingDistance) {
                    self.form.clear(field);
                    self.buffer.clear();
                    self.status = Status::Info(format!("{} cleared", field));
                }
            }
            KeyEvent {
                code: KeyCode::Char('w'),
                ..
            } => self.save_defaults(),
            KeyEvent {
                code: KeyCode::Char('c'),
                ..
            } => {
                self.color_scheme = self.color_scheme.next();
            }
            _ => {}
        }
        Action::Continue
    }

    fn select(&mut self, index: usize) {
        self.selected = index % Field::all().len();
        self.buffer.clear();
    }

    /// Preset matching the form's selection; the default when nothing matches.
    fn preset(&self) -> AspectPreset {
        self.form
            .aspect_label()
            .and_then(AspectPreset::from_label)
            .unwrap_or_default()
    }

    fn choose_preset(&mut self, preset: AspectPreset) {
        let result = self.form.select_aspect_ratio(Some(preset.label()));
        self.report(result);
    }

    fn commit(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let value: f64 = match self.buffer.parse() {
            Ok(v) => v,
            Err(_) => {
                self.status = Status::Error(format!("'{}' is not a number", self.buffer));
                return;
            }
        };
        let field = self.selected_field();
        debug!(%field, value, "commit");
        let result = match field {
            Field::ViewingAngle => self.form.edit_viewing_angle(value),
            Field::ScreenSize => self.form.edit_screen_size(value),
            Field::ViewingDistance => self.form.edit_viewing_distance(value),
            Field::AspectRatio => return,
        };
        self.buffer.clear();
        self.report(result);
    }

    fn report(&mut self, result: Result<Outcome, GeometryError>) {
        self.status = match result {
            Ok(outcome) => Status::Info(outcome.to_string()),
            Err(e) => Status::Error(e.to_string()),
        };
    }

    fn save_defaults(&mut self) {
        let Some(path) = self.save_path.clone() else {
            self.status = Status::Error("Could not determine config directory".to_string());
            return;
        };
        self.status = match Config::save_form_defaults(&path, self.form.viewing_angle(), self.preset()) {
            Ok(()) => Status::Info(format!("Saved defaults to {}", path.display())),
            Err(e) => Status::Error(format!("{:#}", e)),
        };
    }

    fn field_value(&self, field: Field) -> String {
        let length = |v: Option<f64>| match v {
            Some(v) => format!("{} {}", v, self.unit),
            None => "-".to_string(),
        };
        match field {
            Field::ViewingAngle => format!("{}°", self.form.viewing_angle()),
            Field::ScreenSize => length(self.form.screen_size()),
            Field::ViewingDistance => length(self.form.viewing_distance()),
            Field::AspectRatio => format!("< {} >", self.preset()),
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let [body, status_area, help_area] = Layout::vertical([
            Constraint::Min(9),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let accent = self.color_scheme.accent();
        let mut lines: Vec<Line> = Field::all()
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let selected = i == self.selected;
                let value = if selected && !self.buffer.is_empty() {
                    format!("{}_", self.buffer)
                } else {
                    self.field_value(*field)
                };
                let marker = if selected { "> " } else { "  " };
                let style = if selected {
                    Style::default().fg(accent).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::styled(format!("{}{:<18}", marker, field.name()), style),
                    Span::raw(value),
                ])
            })
            .collect();

        lines.push(Line::default());
        match self.form.resolution() {
            Some(resolution) => {
                let pixels = match (self.form.screen_size(), self.form.viewing_distance()) {
                    (Some(size), Some(distance)) => AspectRatio::resolve(self.form.aspect_label())
                        .and_then(|r| geometry::resolvable_pixels(size, distance, r))
                        .map(|px| format!("  (~{:.0} px across)", px))
                        .unwrap_or_default(),
                    _ => String::new(),
                };
                lines.push(Line::from(vec![
                    Span::raw(format!("  {:<18}", "Resolution")),
                    Span::styled(
                        resolution.label(),
                        Style::default()
                            .fg(self.color_scheme.resolution_color(resolution))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(pixels, Style::default().fg(Color::DarkGray)),
                ]));
            }
            None => lines.push(Line::from(format!("  {:<18}-", "Resolution"))),
        }

        let form = Paragraph::new(lines).block(Block::bordered().title(" Home theater layout "));
        frame.render_widget(form, body);

        let status = match &self.status {
            Status::Info(msg) => Line::styled(format!(" {}", msg), Style::default().fg(accent)),
            Status::Error(msg) => Line::styled(format!(" {}", msg), Style::default().fg(Color::Red)),
        };
        frame.render_widget(Paragraph::new(status), status_area);

        let help = format!(
            " [↑↓] field | [0-9 ⏎] edit | [←→] aspect | [del] clear | [w]rite defaults | [c]olor: {} | [q]uit ",
            self.color_scheme.name()
        );
        frame.render_widget(
            Paragraph::new(Line::styled(help, Style::default().fg(Color::DarkGray))),
            help_area,
        );
    }
}
