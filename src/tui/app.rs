//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the task store, handles
//! key input, renders the interface and switches between the list, the text
//! inputs, the help screen, the purge confirmation and the QR overlay.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame, Terminal,
};
use tracing::debug;

use crate::filter::Filter;
use crate::qr::QrImage;
use crate::store::TaskStore;
use crate::task::{Task, TaskId};
use crate::tui::{
    colors::{ASH, BACKDROP, DARK_RED, FADED_GREEN, NAVY},
    enums::AppState,
    input::InputField,
    utils::{centered_fixed, centered_rect},
};

/// Main application state for the terminal user interface.
pub struct App {
    state: AppState,
    store: TaskStore,
    task_list_state: TableState,
    new_task: InputField,
    edit_field: InputField,
    editing: Option<TaskId>,
    status_message: String,
    qr: QrImage,
}

impl App {
    /// Create an App with an empty store showing `filter`.
    pub fn new(filter: Filter, qr: QrImage) -> Self {
        App {
            state: AppState::TaskList,
            store: TaskStore::with_filter(filter),
            task_list_state: TableState::default(),
            new_task: InputField::new(),
            edit_field: InputField::new(),
            editing: None,
            status_message: String::new(),
            qr,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Give up the UI and keep the tasks.
    pub fn into_store(self) -> TaskStore {
        self.store
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Ids of the tasks on screen, in display order.
    fn visible_ids(&self) -> Vec<TaskId> {
        self.store.visible_tasks().iter().map(|t| t.id).collect()
    }

    /// Id of the highlighted row.
    pub fn selected_id(&self) -> Option<TaskId> {
        let idx = self.task_list_state.selected()?;
        self.store.visible_tasks().get(idx).map(|t| t.id)
    }

    fn selected_task(&self) -> Option<&Task> {
        self.selected_id().and_then(|id| self.store.get(id))
    }

    /// Keep the selection on a valid row after the list changed.
    ///
    /// Selects `prefer` when it is visible, otherwise clamps the current index.
    fn sync_selection(&mut self, prefer: Option<TaskId>) {
        let ids = self.visible_ids();
        if ids.is_empty() {
            self.task_list_state.select(None);
            return;
        }
        if let Some(idx) = prefer.and_then(|id| ids.iter().position(|&v| v == id)) {
            self.task_list_state.select(Some(idx));
            return;
        }
        let idx = self.task_list_state.selected().unwrap_or(0).min(ids.len() - 1);
        self.task_list_state.select(Some(idx));
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    fn select_filter(&mut self, filter: Filter) {
        if filter == self.store.filter() {
            return;
        }
        self.store.set_filter(filter);
        self.task_list_state.select(None);
        self.sync_selection(None);
        debug!(?filter, "filter changed");
        self.set_status_message(format!(
            "Showing {} ({} tasks)",
            filter.label(),
            self.store.visible_tasks().len()
        ));
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.store.visible_tasks().len();
        if len == 0 {
            return;
        }
        let next = match self.task_list_state.selected() {
            Some(i) if down => (i + 1).min(len - 1),
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.task_list_state.select(Some(next));
    }

    fn toggle_checked(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        if task.removed {
            self.set_status_message("Restore the task before checking it off");
            return;
        }
        let (id, checked) = (task.id, !task.checked);
        self.store.set_checked(id, checked);
        self.sync_selection(Some(id));
        self.set_status_message(if checked { "Task completed" } else { "Task reopened" });
    }

    fn toggle_removed(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let (id, removed) = (task.id, !task.removed);
        self.store.set_removed(id, removed);
        self.sync_selection(Some(id));
        self.set_status_message(if removed {
            "Task moved to the trash"
        } else {
            "Task restored"
        });
    }

    fn start_edit(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        if !task.is_editable() {
            self.set_status_message("Only open tasks outside the trash can be edited");
            return;
        }
        let (id, field) = (task.id, InputField::with_value(&task.text));
        self.edit_field = field;
        self.editing = Some(id);
        self.state = AppState::EditTask;
    }

    fn start_add(&mut self) {
        if !self.store.filter().accepts_new_tasks() {
            self.set_status_message(format!(
                "New tasks can't be added in {}",
                self.store.filter().label()
            ));
            return;
        }
        self.state = AppState::AddTask;
    }

    fn request_purge(&mut self) {
        if self.store.filter() != Filter::Removed {
            self.set_status_message("Open the trash (4) to empty it");
        } else if !self.store.has_removed() {
            self.set_status_message("The trash is already empty");
        } else {
            self.state = AppState::ConfirmPurge;
        }
    }

    /// Handle keyboard input when in the task list view.
    ///
    /// Returns true if the application should quit.
    fn handle_task_list_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Char(' ') | KeyCode::Char('c') => self.toggle_checked(),
            KeyCode::Enter | KeyCode::Char('e') => self.start_edit(),
            KeyCode::Delete | KeyCode::Char('d') => self.toggle_removed(),
            KeyCode::Char('a') | KeyCode::Char('i') => self.start_add(),
            KeyCode::Tab | KeyCode::Right => self.select_filter(self.store.filter().next()),
            KeyCode::BackTab | KeyCode::Left => self.select_filter(self.store.filter().prev()),
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                if let Some(filter) = Filter::from_index(idx) {
                    self.select_filter(filter);
                }
            }
            KeyCode::Char('x') => self.request_purge(),
            KeyCode::Char('q') => self.state = AppState::QrCode,
            KeyCode::Char('h') | KeyCode::Char('?') => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    /// Handle keyboard input while the new-task input has focus.
    fn handle_add_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.state = AppState::TaskList,
            KeyCode::Enter => match self.store.add(&self.new_task.value) {
                Some(id) => {
                    self.new_task.take();
                    self.sync_selection(Some(id));
                    self.set_status_message("Task added");
                }
                None => self.set_status_message("Type something first"),
            },
            KeyCode::Char(c) => self.new_task.handle_char(c),
            KeyCode::Backspace => self.new_task.handle_backspace(),
            KeyCode::Delete => self.new_task.handle_delete(),
            KeyCode::Left => self.new_task.move_cursor_left(),
            KeyCode::Right => self.new_task.move_cursor_right(),
            KeyCode::Home => self.new_task.move_cursor_home(),
            KeyCode::End => self.new_task.move_cursor_end(),
            _ => {}
        }
    }

    /// Handle keyboard input while editing a task. Every change is written
    /// to the store immediately.
    fn handle_edit_input(&mut self, key: KeyCode) {
        let Some(id) = self.editing else {
            self.state = AppState::TaskList;
            return;
        };
        let changed = match key {
            KeyCode::Esc | KeyCode::Enter => {
                self.editing = None;
                self.state = AppState::TaskList;
                self.set_status_message("Task updated");
                false
            }
            KeyCode::Char(c) => {
                self.edit_field.handle_char(c);
                true
            }
            KeyCode::Backspace => {
                self.edit_field.handle_backspace();
                true
            }
            KeyCode::Delete => {
                self.edit_field.handle_delete();
                true
            }
            KeyCode::Left => {
                self.edit_field.move_cursor_left();
                false
            }
            KeyCode::Right => {
                self.edit_field.move_cursor_right();
                false
            }
            KeyCode::Home => {
                self.edit_field.move_cursor_home();
                false
            }
            KeyCode::End => {
                self.edit_field.move_cursor_end();
                false
            }
            _ => false,
        };
        if changed {
            self.store.edit(id, &self.edit_field.value);
        }
    }

    /// Handle keyboard input in the purge confirmation dialog.
    fn handle_confirm_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                let purged = self.store.purge_removed();
                self.sync_selection(None);
                self.state = AppState::TaskList;
                self.set_status_message(format!("Permanently deleted {} task(s)", purged));
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.state = AppState::TaskList;
            }
            _ => {}
        }
    }

    fn handle_help_input(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') | KeyCode::Char('?')) {
            self.state = AppState::TaskList;
        }
    }

    /// Dispatch a single key press based on the current state.
    ///
    /// Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            return true;
        }

        self.clear_status_message();
        match self.state {
            AppState::TaskList => return self.handle_task_list_input(key),
            AppState::AddTask => self.handle_add_input(key),
            AppState::EditTask => self.handle_edit_input(key),
            AppState::Help => self.handle_help_input(key),
            AppState::ConfirmPurge => self.handle_confirm_input(key),
            // The overlay closes on any key.
            AppState::QrCode => self.state = AppState::TaskList,
        }
        false
    }

    /// Poll for and handle keyboard events.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key.code, key.modifiers));
                }
            }
        }
        Ok(false)
    }

    /// Render the filter selector with per-view counts.
    fn render_header(&self, f: &mut Frame, area: Rect) {
        let counts = self.store.counts();
        let titles: Vec<Line> = Filter::ALL
            .iter()
            .enumerate()
            .map(|(i, filter)| {
                Line::from(format!("{} {} ({})", i + 1, filter.label(), counts.get(*filter)))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .select(self.store.filter().index())
            .block(Block::default().borders(Borders::ALL).title(Span::styled(
                "TODO",
                Style::default().add_modifier(Modifier::BOLD),
            )))
            .style(Style::default().fg(Color::White))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .divider("|");

        f.render_widget(tabs, area);
    }

    /// Height of the area between the header and the list.
    fn action_area_height(&self) -> u16 {
        if self.state == AppState::EditTask
            || self.store.filter().accepts_new_tasks()
            || self.store.filter() == Filter::Removed
        {
            3
        } else {
            0
        }
    }

    /// Render the new-task input, the edit field or the empty-trash button.
    fn render_action_area(&self, f: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }

        if self.state == AppState::EditTask {
            let input = Paragraph::new(self.edit_field.value.as_str()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title("Edit task - Enter/Esc to finish"),
            );
            f.render_widget(input, area);
            f.set_cursor_position((area.x + 1 + self.edit_field.cursor_column(), area.y + 1));
            return;
        }

        if self.store.filter() == Filter::Removed {
            let enabled = self.store.has_removed();
            let style = if enabled {
                Style::default().fg(Color::White).bg(DARK_RED).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let button = Paragraph::new(Span::styled(" Empty trash (x) ", style))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(button, area);
            return;
        }

        let focused = self.state == AppState::AddTask;
        let border = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let title = if focused {
            "New task - Enter to add, Esc to leave"
        } else {
            "New task - press 'a' to type"
        };
        let input = Paragraph::new(self.new_task.value.as_str())
            .block(Block::default().borders(Borders::ALL).border_style(border).title(title));
        f.render_widget(input, area);
        if focused {
            f.set_cursor_position((area.x + 1 + self.new_task.cursor_column(), area.y + 1));
        }
    }

    /// Render the task table for the current view.
    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let header = Row::new(["", "Task", "Action", "Added"].map(|h| {
            Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))
        }))
        .style(Style::default().bg(NAVY).fg(Color::White))
        .height(1);

        let visible = self.store.visible_tasks();
        let shown = visible.len();
        let rows: Vec<Row> = visible
            .iter()
            .map(|task| {
                let checkbox = if task.checked { "[x]" } else { "[ ]" };
                let style = if Some(task.id) == self.editing {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else if task.removed {
                    Style::default().fg(ASH)
                } else if task.checked {
                    Style::default().fg(FADED_GREEN).add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(Color::White)
                };

                Row::new(vec![
                    Cell::from(checkbox),
                    Cell::from(task.text.clone()),
                    Cell::from(task.action_label()),
                    Cell::from(task.created_at.format("%H:%M").to_string()),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(3), // Checkbox
            Constraint::Min(20),   // Text
            Constraint::Length(7), // Action
            Constraint::Length(5), // Added
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Tasks ({}/{}) - Press 'h' for help",
                shown,
                self.store.len()
            )))
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, area, &mut self.task_list_state);
    }

    /// Render the help screen with keyboard shortcuts.
    fn render_help(&self, f: &mut Frame, area: Rect) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let help_text = vec![
            Line::from(Span::styled("Todo Help", bold)),
            Line::from(""),
            Line::from(Span::styled("Task List:", bold)),
            Line::from("  Up/k, Down/j   Move selection"),
            Line::from("  a/i            Type a new task (All and Current views)"),
            Line::from("  Space/c        Check or uncheck the selected task"),
            Line::from("  e/Enter        Edit the selected task"),
            Line::from("  d/Delete       Move to trash, or restore from trash"),
            Line::from("  Tab/Right      Next view"),
            Line::from("  Shift+Tab/Left Previous view"),
            Line::from("  1-4            All / Completed / Current / Trash"),
            Line::from("  x              Empty the trash (Trash view)"),
            Line::from("  q              Show the QR code"),
            Line::from("  h/?            Show this help"),
            Line::from("  Esc/Ctrl+C     Quit"),
            Line::from(""),
            Line::from(Span::styled("Text input:", bold)),
            Line::from("  Left/Right/Home/End  Move cursor"),
            Line::from("  Enter                Add task / finish editing"),
            Line::from("  Esc                  Back to the list"),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help - Press Esc to return"),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, area);
    }

    /// Render the confirmation dialog for emptying the trash.
    fn render_confirm(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Empty Trash")
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(50, 30, area);
        f.render_widget(Clear, area);

        let count = self.store.counts().removed;
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Permanently delete {} task(s)?", count),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("This action cannot be undone."),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    /// Render the QR code on a dark backdrop.
    fn render_qr(&self, f: &mut Frame, area: Rect) {
        f.render_widget(Clear, area);
        f.render_widget(Block::default().style(Style::default().bg(BACKDROP)), area);

        let url_width = u16::try_from(self.qr.url().chars().count()).unwrap_or(u16::MAX);
        let width = self.qr.width().max(url_width).saturating_add(2);
        let height = self.qr.height().saturating_add(4);
        let popup = centered_fixed(width, height, area);

        let mut lines: Vec<Line> = self.qr.lines().iter().map(|l| Line::from(l.as_str())).collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            self.qr.url(),
            Style::default().fg(Color::Cyan),
        )));

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White).bg(BACKDROP))
            .block(Block::default().borders(Borders::ALL).title("Scan to open - any key to close"));
        f.render_widget(paragraph, popup);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::TaskList => format!(
                    "{}: {} | a add  Space check  e edit  d delete  q QR  h help",
                    self.store.filter().label(),
                    self.store.visible_tasks().len()
                ),
                AppState::AddTask => "Add New Task".to_string(),
                AppState::EditTask => "Edit Task".to_string(),
                AppState::Help => "Help".to_string(),
                AppState::ConfirmPurge => "Confirm Action".to_string(),
                AppState::QrCode => "QR Code".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(NAVY).fg(Color::White))
            .alignment(Alignment::Left);

        f.render_widget(status, area);
    }

    /// Main render function that dispatches to the view renderers.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        if self.state == AppState::Help {
            self.render_help(f, chunks[0]);
        } else {
            let main = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(self.action_area_height()),
                    Constraint::Min(0),
                ])
                .split(chunks[0]);

            self.render_header(f, main[0]);
            self.render_action_area(f, main[1]);
            self.render_task_list(f, main[2]);

            match self.state {
                AppState::ConfirmPurge => self.render_confirm(f, chunks[0]),
                AppState::QrCode => self.render_qr(f, chunks[0]),
                _ => {}
            }
        }

        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}
