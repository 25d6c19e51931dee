//! Demo host: the three folder fields of a duplicate-review settings screen

use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    crossterm::event::{
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tokio::runtime::Handle;

use pathcomplete::config::Config;
use pathcomplete::render::{self, FIELD_HEIGHT, FieldLayout};
use pathcomplete::{FieldOptions, PairCheck, PathApi, PathCache, PathField};

/// Storage key and label of every field, top to bottom
const FIELDS: [(&str, &str); 3] = [
    ("backupPath", "Backup path"),
    ("sortedPath", "Sorted path"),
    ("recycleBinPath", "Recycle bin path"),
];

const BACKUP: usize = 0;
const SORTED: usize = 1;

/// Upper bound on how long the loop sleeps while requests are out
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct App {
    fields: Vec<PathField>,
    layouts: Vec<FieldLayout>,
    focus: usize,
    pair: PairCheck,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: &Config,
        api: Arc<dyn PathApi>,
        cache: Option<Arc<dyn PathCache>>,
        runtime: Handle,
        now: Instant,
    ) -> Self {
        let fields = FIELDS
            .iter()
            .map(|(key, _)| {
                let options = FieldOptions::from_config(&config.completion).with_storage_key(*key);
                let mut field = PathField::new(options, api.clone(), runtime.clone());
                if let Some(cache) = &cache {
                    field = field.with_cache(cache.clone());
                }
                field.mount(now);
                field
            })
            .collect::<Vec<_>>();

        let pair = PairCheck::new(
            api,
            runtime,
            Duration::from_millis(config.completion.pair_debounce_ms),
        );

        let mut app = Self {
            layouts: vec![FieldLayout::default(); fields.len()],
            fields,
            focus: BACKUP,
            pair,
            should_quit: false,
        };
        app.fields[BACKUP].focus();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Fire due timers and apply whatever came back
    pub fn tick(&mut self, now: Instant) {
        for (field, (key, _)) in self.fields.iter_mut().zip(FIELDS) {
            field.tick(now);
            field.poll_responses(now);
            if let Some(validity) = field.take_validity_change() {
                log::debug!("{} validity: {:?}", key, validity);
            }
        }

        let backup = &self.fields[BACKUP];
        let sorted = &self.fields[SORTED];
        self.pair.update(
            (backup.raw_value(), backup.is_valid()),
            (sorted.raw_value(), sorted.is_valid()),
            now,
        );
        self.pair.tick(now);
        self.pair.poll();
    }

    /// How long the event loop may block waiting for input
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let busy = self.fields.iter().any(PathField::has_in_flight) || self.pair.is_checking();
        self.fields
            .iter()
            .filter_map(|field| field.next_deadline(now))
            .chain(busy.then_some(POLL_INTERVAL))
            .min()
            .unwrap_or(Duration::from_secs(1))
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.fields[self.focus].handle_key(key, now).is_consumed() {
            return;
        }

        let field = &mut self.fields[self.focus];
        let mut value = field.raw_value().to_string();
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                value.push(c);
                field.input(value, now);
            }
            KeyCode::Backspace => {
                if value.pop().is_some() {
                    field.input(value, now);
                }
            }
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Enter => self.set_focus((self.focus + 1) % FIELDS.len()),
            KeyCode::BackTab => self.set_focus((self.focus + FIELDS.len() - 1) % FIELDS.len()),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved => {
                if let Some(index) = self.layouts[self.focus].row_at(column, row) {
                    self.fields[self.focus].hover_row(index);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                // The focused field's dropdown overlays its siblings
                if let Some(index) = self.layouts[self.focus].row_at(column, row) {
                    self.fields[self.focus].click_row(index, now);
                    return;
                }

                let hit = self
                    .layouts
                    .iter()
                    .position(|layout| layout.input.contains((column, row).into()));
                for (i, field) in self.fields.iter_mut().enumerate() {
                    if Some(i) != hit {
                        field.press_outside();
                    }
                }
                if let Some(index) = hit {
                    self.set_focus(index);
                }
            }
            _ => {}
        }
    }

    fn set_focus(&mut self, index: usize) {
        if index == self.focus {
            return;
        }
        self.fields[self.focus].blur();
        self.focus = index;
        self.fields[index].focus();
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let mut constraints = vec![Constraint::Length(2)];
        constraints.extend(FIELDS.iter().map(|_| Constraint::Length(FIELD_HEIGHT + 1)));
        constraints.push(Constraint::Length(2));
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1));
        let areas = Layout::vertical(constraints).split(frame.area());

        frame.render_widget(
            Paragraph::new(" Folder settings").style(Style::default().fg(Color::Cyan)),
            areas[0],
        );

        for (i, (field, (_, label))) in self.fields.iter().zip(FIELDS).enumerate() {
            let area = Rect {
                height: FIELD_HEIGHT,
                ..areas[i + 1]
            };
            self.layouts[i] = render::render_field(frame, area, label, field);
        }

        frame.render_widget(Paragraph::new(self.pair_status()), areas[FIELDS.len() + 1]);
        frame.render_widget(
            Paragraph::new(
                " Tab/Enter: next field · ↑↓: suggestions · →: accept ghost · Esc: close/quit",
            )
            .style(Style::default().fg(Color::DarkGray)),
            areas[FIELDS.len() + 3],
        );

        // Last, so it draws over the fields below it
        render::render_dropdown(frame, &self.fields[self.focus], &mut self.layouts[self.focus]);
    }

    fn pair_status(&self) -> Vec<Line<'static>> {
        if self.pair.is_checking() {
            return vec![Line::from(Span::styled(
                " Checking backup/sorted pair…",
                Style::default().fg(Color::Yellow),
            ))];
        }
        if self.pair.can_save() {
            return vec![Line::from(Span::styled(
                " Ready to save",
                Style::default().fg(Color::Green),
            ))];
        }

        let errors = self
            .pair
            .errors()
            .iter()
            .map(|e| Line::from(Span::styled(format!(" {}", e), Style::default().fg(Color::Red))));
        let warnings = self.pair.warnings().iter().map(|w| {
            Line::from(Span::styled(
                format!(" {}", w),
                Style::default().fg(Color::Yellow),
            ))
        });
        errors.chain(warnings).collect()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        for field in &mut self.fields {
            field.unmount();
        }
    }
}
