use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use tokio::runtime::Runtime;

use taskdeck_board::{
    group_by_status, BoardController, DragSession, SelectionSet, TaskStore,
};
use taskdeck_core::filter::FilterState;
use taskdeck_core::project::{CreateProject, Project};
use taskdeck_core::task::{
    next_status, prev_status, CreateTask, Priority, Status, Task, UpdateTask,
};
use taskdeck_service::{HttpService, TaskService};

use crate::components::task_board::TaskBoard;

/// What the app is currently doing
#[derive(Debug, Clone)]
pub enum Mode {
    /// Normal board navigation
    Normal,
    /// Typing a new task title
    NewTask { input: String },
    /// Viewing task detail
    TaskDetail { task: Task },
    /// Confirm delete of a single task
    ConfirmDelete { task: Task },
    /// Confirm delete of every selected task
    ConfirmBulkDelete { count: usize },
    /// Picking the target lane for a bulk move
    BulkMovePick,
    /// Typing a live search query
    Search { input: String },
    /// Picking a status filter
    StatusFilterPick,
    /// Picking a priority filter
    PriorityFilterPick,
    /// Typing an assignee filter
    AssigneeFilter { input: String },
    /// Project list/switcher
    ProjectList {
        projects: Vec<Project>,
        list_state: ListState,
    },
    /// Typing a new project name
    NewProject { input: String },
}

pub struct App {
    rt: Runtime,
    controller: BoardController<HttpService>,
    project: Project,
    store: TaskStore,
    selection: SelectionSet,
    drag: DragSession,
    filter: FilterState,
    board: TaskBoard,
    mode: Mode,
    status_message: Option<String>,
    counts: Vec<(String, i64)>,
}

impl App {
    pub fn new(rt: Runtime, service: HttpService) -> Result<Self> {
        let projects = rt.block_on(service.list_projects()).unwrap_or_default();
        let project = match projects.into_iter().next() {
            Some(project) => project,
            None => rt.block_on(service.create_project(&CreateProject {
                name: "Default".into(),
                description: "Default project".into(),
            }))?,
        };

        let mut app = Self {
            rt,
            controller: BoardController::new(service),
            project,
            store: TaskStore::default(),
            selection: SelectionSet::new(),
            drag: DragSession::new(),
            filter: FilterState::default(),
            board: TaskBoard::new(vec![]),
            mode: Mode::Normal,
            status_message: None,
            counts: Vec::new(),
        };
        app.refresh_data();
        Ok(app)
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_input_mode(&self) -> bool {
        matches!(
            self.mode,
            Mode::NewTask { .. }
                | Mode::Search { .. }
                | Mode::AssigneeFilter { .. }
                | Mode::NewProject { .. }
        )
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Reload tasks and lane counts from the server, then rebuild the board.
    fn refresh_data(&mut self) {
        let result = self.rt.block_on(self.controller.refresh(
            &mut self.store,
            &mut self.selection,
            self.project.id,
        ));
        if let Err(e) = result {
            self.status_message = Some(format!("Error: {e}"));
        }
        match self
            .rt
            .block_on(self.controller.service().count_tasks_by_status(self.project.id))
        {
            Ok(counts) => self.counts = counts,
            Err(_) => self.counts.clear(),
        }
        self.rebuild_board();
    }

    /// Rebuild columns from the store through the filter pipeline. The
    /// selection is reconciled against the visible subset, so filtering a
    /// selected task out also deselects it.
    fn rebuild_board(&mut self) {
        let cursor = self.board.selected_task().map(|t| t.id);
        let visible = self.filter.apply(self.store.tasks());
        let visible_ids: Vec<i64> = visible.iter().map(|t| t.id).collect();
        self.selection.reconcile(&visible_ids);
        self.board = TaskBoard::new(group_by_status(&visible, Status::BOARD_COLUMNS));
        if let Some(id) = cursor {
            self.board.select_task_by_id(id);
        }
    }

    fn switch_project(&mut self, project: Project) {
        self.project = project;
        self.selection.clear();
        self.drag.end_drag();
        self.filter = FilterState::default();
        self.refresh_data();
        self.mode = Mode::Normal;
    }

    fn move_selected(&mut self, target: Option<Status>) {
        let Some(task) = self.board.selected_task() else {
            return;
        };
        let Some(target) = target else { return };
        let id = task.id;
        let result = self
            .rt
            .block_on(self.controller.move_task(&mut self.store, id, target));
        match result {
            Ok(_) => {
                self.rebuild_board();
                self.board.select_task_by_id(id);
            }
            Err(e) => self.status_message = Some(format!("Error: {e}")),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status_message = None;

        match &self.mode.clone() {
            Mode::Normal => self.handle_normal(key),
            Mode::NewTask { input } => self.handle_new_task(key, input.clone()),
            Mode::TaskDetail { task } => self.handle_task_detail(key, task.clone()),
            Mode::ConfirmDelete { task } => self.handle_confirm_delete(key, task.clone()),
            Mode::ConfirmBulkDelete { .. } => self.handle_confirm_bulk_delete(key),
            Mode::BulkMovePick => self.handle_bulk_move_pick(key),
            Mode::Search { input } => self.handle_search(key, input.clone()),
            Mode::StatusFilterPick => self.handle_status_filter_pick(key),
            Mode::PriorityFilterPick => self.handle_priority_filter_pick(key),
            Mode::AssigneeFilter { input } => self.handle_assignee_filter(key, input.clone()),
            Mode::ProjectList {
                projects,
                list_state,
            } => self.handle_project_list(key, projects.clone(), list_state.clone()),
            Mode::NewProject { input } => self.handle_new_project(key, input.clone()),
        }
    }

    fn handle_normal(&mut self, key: KeyEvent) {
        if self.drag.is_dragging() {
            self.handle_drag(key);
            return;
        }

        match key.code {
            KeyCode::Char('n') => {
                self.mode = Mode::NewTask {
                    input: String::new(),
                };
            }
            KeyCode::Enter => {
                if let Some(task) = self.board.selected_task() {
                    self.mode = Mode::TaskDetail { task: task.clone() };
                }
            }
            // Pick up the task under the cursor
            KeyCode::Char('g') => {
                if let Some(task) = self.board.selected_task().cloned() {
                    let status = task.status;
                    self.drag.begin_drag(task);
                    self.drag.drag_over(status);
                }
            }
            KeyCode::Char(' ') => {
                if let Some(task) = self.board.selected_task() {
                    let id = task.id;
                    self.selection.toggle(id, !self.selection.contains(id));
                }
            }
            KeyCode::Char('b') => {
                if !self.selection.is_empty() {
                    self.mode = Mode::BulkMovePick;
                }
            }
            KeyCode::Char('D') => {
                if !self.selection.is_empty() {
                    self.mode = Mode::ConfirmBulkDelete {
                        count: self.selection.len(),
                    };
                }
            }
            KeyCode::Char('c') => {
                self.selection.clear();
            }
            KeyCode::Char('m') => {
                let target = self.board.selected_task().and_then(|t| next_status(t.status));
                self.move_selected(target);
            }
            KeyCode::Char('M') => {
                let target = self.board.selected_task().and_then(|t| prev_status(t.status));
                self.move_selected(target);
            }
            KeyCode::Char('d') => {
                if let Some(task) = self.board.selected_task() {
                    self.mode = Mode::ConfirmDelete { task: task.clone() };
                }
            }
            KeyCode::Char('/') => {
                self.mode = Mode::Search {
                    input: self.filter.search.clone(),
                };
            }
            KeyCode::Char('s') => {
                self.mode = Mode::StatusFilterPick;
            }
            KeyCode::Char('p') => {
                self.mode = Mode::PriorityFilterPick;
            }
            KeyCode::Char('a') => {
                self.mode = Mode::AssigneeFilter {
                    input: self.filter.assignee.clone().unwrap_or_default(),
                };
            }
            KeyCode::Char('f') => {
                self.filter = FilterState::default();
                self.rebuild_board();
                self.status_message = Some("Filters cleared".into());
            }
            KeyCode::Char('P') => {
                if let Ok(projects) = self.rt.block_on(self.controller.service().list_projects()) {
                    let mut list_state = ListState::default();
                    if !projects.is_empty() {
                        let idx = projects
                            .iter()
                            .position(|p| p.id == self.project.id)
                            .unwrap_or(0);
                        list_state.select(Some(idx));
                    }
                    self.mode = Mode::ProjectList {
                        projects,
                        list_state,
                    };
                }
            }
            KeyCode::Char('r') => {
                self.refresh_data();
                self.status_message = Some("Refreshed".into());
            }
            _ => self.board.handle_key(key),
        }
    }

    /// While a drag is active h/l slide the hover across lanes; moving past
    /// the rightmost lane leaves the board entirely and clears the hover.
    /// Enter drops on the hovered lane, Esc cancels.
    fn handle_drag(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => {
                let lanes = Status::BOARD_COLUMNS;
                match self.drag.hovered() {
                    Some(current) => {
                        if let Some(pos) = lanes.iter().position(|&s| s == current) {
                            if pos > 0 {
                                self.drag.drag_over(lanes[pos - 1]);
                            }
                        }
                    }
                    None => self.drag.drag_over(lanes[lanes.len() - 1]),
                }
            }
            KeyCode::Char('l') | KeyCode::Right => {
                let lanes = Status::BOARD_COLUMNS;
                match self.drag.hovered() {
                    Some(current) => {
                        if let Some(pos) = lanes.iter().position(|&s| s == current) {
                            if pos + 1 < lanes.len() {
                                self.drag.drag_over(lanes[pos + 1]);
                            } else {
                                self.drag.drag_leave(true);
                            }
                        }
                    }
                    None => self.drag.drag_over(lanes[0]),
                }
            }
            KeyCode::Enter => {
                let Some(lane) = self.drag.hovered() else {
                    self.drag.end_drag();
                    return;
                };
                if let Some((task, lane)) = self.drag.drop_on(lane) {
                    let id = task.id;
                    let result = self
                        .rt
                        .block_on(self.controller.move_task(&mut self.store, id, lane));
                    match result {
                        Ok(_) => {
                            self.rebuild_board();
                            self.board.select_task_by_id(id);
                        }
                        Err(e) => self.status_message = Some(format!("Error: {e}")),
                    }
                }
            }
            KeyCode::Esc => self.drag.end_drag(),
            _ => {}
        }
    }

    fn handle_new_task(&mut self, key: KeyEvent, mut input: String) {
        match key.code {
            KeyCode::Enter => {
                let title = input.trim().to_string();
                if !title.is_empty() {
                    let status = self.board.active_status();
                    let result = self.rt.block_on(self.controller.service().create_task(
                        &CreateTask {
                            project_id: self.project.id,
                            title,
                            description: String::new(),
                            status,
                            priority: Priority::Medium,
                            assignee: String::new(),
                            due_date: None,
                        },
                    ));
                    match result {
                        Ok(task) => {
                            self.store.push(task);
                            self.rebuild_board();
                            self.status_message = Some("Task created".into());
                        }
                        Err(e) => self.status_message = Some(format!("Error: {e}")),
                    }
                }
                self.mode = Mode::Normal;
            }
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Backspace => {
                input.pop();
                self.mode = Mode::NewTask { input };
            }
            KeyCode::Char(c) => {
                input.push(c);
                self.mode = Mode::NewTask { input };
            }
            _ => {}
        }
    }

    fn handle_task_detail(&mut self, key: KeyEvent, task: Task) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.mode = Mode::Normal,
            KeyCode::Char('m') => {
                if let Some(next) = next_status(task.status) {
                    let result = self
                        .rt
                        .block_on(self.controller.move_task(&mut self.store, task.id, next));
                    match result {
                        Ok(_) => {
                            self.rebuild_board();
                            if let Some(updated) = self.store.get(task.id) {
                                self.mode = Mode::TaskDetail {
                                    task: updated.clone(),
                                };
                            }
                        }
                        Err(e) => self.status_message = Some(format!("Error: {e}")),
                    }
                }
            }
            KeyCode::Char('p') => {
                // Cycle priority in place
                let next = match task.priority {
                    Priority::High => Priority::Medium,
                    Priority::Medium => Priority::Low,
                    Priority::Low => Priority::High,
                };
                let result = self.rt.block_on(self.controller.service().update_task(
                    task.id,
                    &UpdateTask {
                        priority: Some(next),
                        ..Default::default()
                    },
                ));
                match result {
                    Ok(updated) => {
                        self.store.merge_confirmed(vec![updated.clone()]);
                        self.rebuild_board();
                        self.mode = Mode::TaskDetail { task: updated };
                    }
                    Err(e) => self.status_message = Some(format!("Error: {e}")),
                }
            }
            KeyCode::Char('d') => {
                self.mode = Mode::ConfirmDelete { task };
            }
            _ => {}
        }
    }

    fn handle_confirm_delete(&mut self, key: KeyEvent, task: Task) {
        if key.code == KeyCode::Char('y') {
            let result = self
                .rt
                .block_on(self.controller.service().delete_task(task.id));
            match result {
                Ok(()) => {
                    self.store.remove_confirmed(&[task.id]);
                    self.rebuild_board();
                    self.status_message = Some("Task deleted".into());
                }
                Err(e) => self.status_message = Some(format!("Error: {e}")),
            }
        }
        self.mode = Mode::Normal;
    }

    fn handle_confirm_bulk_delete(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('y') {
            let result = self.rt.block_on(
                self.controller
                    .bulk_delete(&mut self.store, &mut self.selection),
            );
            match result {
                Ok(outcome) => {
                    self.rebuild_board();
                    self.status_message = Some(format!(
                        "Deleted {} of {} task(s)",
                        outcome.deleted, outcome.requested
                    ));
                }
                Err(e) => self.status_message = Some(format!("Error: {e}")),
            }
        }
        self.mode = Mode::Normal;
    }

    fn handle_bulk_move_pick(&mut self, key: KeyEvent) {
        let target = match key.code {
            KeyCode::Char('1') => Some(Status::Todo),
            KeyCode::Char('2') => Some(Status::InProgress),
            KeyCode::Char('3') => Some(Status::Done),
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                return;
            }
            _ => None,
        };
        let Some(target) = target else { return };

        let result = self.rt.block_on(self.controller.bulk_move(
            &mut self.store,
            &mut self.selection,
            target,
        ));
        match result {
            Ok(outcome) => {
                self.rebuild_board();
                self.status_message = Some(if outcome.moved == 0 && outcome.failed == 0 {
                    format!("All selected tasks already in {target}")
                } else if outcome.failed > 0 {
                    format!("Moved {} task(s), {} failed", outcome.moved, outcome.failed)
                } else {
                    format!("Moved {} task(s) to {target}", outcome.moved)
                });
            }
            Err(e) => self.status_message = Some(format!("Error: {e}")),
        }
        self.mode = Mode::Normal;
    }

    /// Live search: every keystroke re-applies the pipeline.
    fn handle_search(&mut self, key: KeyEvent, mut input: String) {
        match key.code {
            KeyCode::Enter => self.mode = Mode::Normal,
            KeyCode::Esc => {
                self.filter.search.clear();
                self.rebuild_board();
                self.mode = Mode::Normal;
            }
            KeyCode::Backspace => {
                input.pop();
                self.filter.search = input.clone();
                self.rebuild_board();
                self.mode = Mode::Search { input };
            }
            KeyCode::Char(c) => {
                input.push(c);
                self.filter.search = input.clone();
                self.rebuild_board();
                self.mode = Mode::Search { input };
            }
            _ => {}
        }
    }

    fn handle_status_filter_pick(&mut self, key: KeyEvent) {
        let chosen = match key.code {
            KeyCode::Char('1') => Some(Some(Status::Todo)),
            KeyCode::Char('2') => Some(Some(Status::InProgress)),
            KeyCode::Char('3') => Some(Some(Status::Done)),
            KeyCode::Char('0') => Some(None),
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                return;
            }
            _ => None,
        };
        if let Some(status) = chosen {
            self.filter.status = status;
            self.rebuild_board();
            self.mode = Mode::Normal;
        }
    }

    fn handle_priority_filter_pick(&mut self, key: KeyEvent) {
        let chosen = match key.code {
            KeyCode::Char('1') => Some(Some(Priority::High)),
            KeyCode::Char('2') => Some(Some(Priority::Medium)),
            KeyCode::Char('3') => Some(Some(Priority::Low)),
            KeyCode::Char('0') => Some(None),
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                return;
            }
            _ => None,
        };
        if let Some(priority) = chosen {
            self.filter.priority = priority;
            self.rebuild_board();
            self.mode = Mode::Normal;
        }
    }

    fn handle_assignee_filter(&mut self, key: KeyEvent, mut input: String) {
        match key.code {
            KeyCode::Enter => {
                let trimmed = input.trim().to_string();
                self.filter.assignee = if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed)
                };
                self.rebuild_board();
                self.mode = Mode::Normal;
            }
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Backspace => {
                input.pop();
                self.mode = Mode::AssigneeFilter { input };
            }
            KeyCode::Char(c) => {
                input.push(c);
                self.mode = Mode::AssigneeFilter { input };
            }
            _ => {}
        }
    }

    fn handle_project_list(
        &mut self,
        key: KeyEvent,
        projects: Vec<Project>,
        mut list_state: ListState,
    ) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.mode = Mode::Normal,
            KeyCode::Char('j') | KeyCode::Down => {
                let current = list_state.selected().unwrap_or(0);
                if current + 1 < projects.len() {
                    list_state.select(Some(current + 1));
                }
                self.mode = Mode::ProjectList {
                    projects,
                    list_state,
                };
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let current = list_state.selected().unwrap_or(0);
                if current > 0 {
                    list_state.select(Some(current - 1));
                }
                self.mode = Mode::ProjectList {
                    projects,
                    list_state,
                };
            }
            KeyCode::Enter => {
                if let Some(idx) = list_state.selected() {
                    if let Some(project) = projects.get(idx) {
                        self.switch_project(project.clone());
                    }
                }
            }
            KeyCode::Char('n') => {
                self.mode = Mode::NewProject {
                    input: String::new(),
                };
            }
            _ => {}
        }
    }

    fn handle_new_project(&mut self, key: KeyEvent, mut input: String) {
        match key.code {
            KeyCode::Enter => {
                let name = input.trim().to_string();
                if !name.is_empty() {
                    let result = self.rt.block_on(self.controller.service().create_project(
                        &CreateProject {
                            name,
                            description: String::new(),
                        },
                    ));
                    match result {
                        Ok(project) => self.switch_project(project),
                        Err(e) => {
                            self.status_message = Some(format!("Error: {e}"));
                            self.mode = Mode::Normal;
                        }
                    }
                } else {
                    self.mode = Mode::Normal;
                }
            }
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Backspace => {
                input.pop();
                self.mode = Mode::NewProject { input };
            }
            KeyCode::Char(c) => {
                input.push(c);
                self.mode = Mode::NewProject { input };
            }
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_title_bar(frame, layout[0]);
        self.board
            .render(frame, layout[1], &self.selection, self.drag.hovered());
        self.render_status_bar(frame, layout[2]);

        // Overlays
        match &self.mode {
            Mode::Normal => {}
            Mode::NewTask { input } => self.render_input_bar(frame, " New task ", input, area),
            Mode::TaskDetail { task } => self.render_task_detail(frame, task, area),
            Mode::ConfirmDelete { task } => self.render_confirm_delete(frame, task, area),
            Mode::ConfirmBulkDelete { count } => {
                self.render_confirm_bulk_delete(frame, *count, area)
            }
            Mode::BulkMovePick => self.render_bulk_move_pick(frame, area),
            Mode::Search { input } => self.render_input_bar(frame, " Search ", input, area),
            Mode::StatusFilterPick => self.render_status_filter_pick(frame, area),
            Mode::PriorityFilterPick => self.render_priority_filter_pick(frame, area),
            Mode::AssigneeFilter { input } => {
                self.render_input_bar(frame, " Assignee filter ", input, area)
            }
            Mode::ProjectList {
                projects,
                list_state,
            } => self.render_project_list(frame, projects, list_state, area),
            Mode::NewProject { input } => {
                self.render_input_bar(frame, " New project ", input, area)
            }
        }
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(" taskdeck ", Style::default().bold().fg(Color::Cyan)),
            Span::raw("| "),
            Span::styled(&self.project.name, Style::default().fg(Color::Yellow)),
        ];
        for (status, count) in &self.counts {
            let label = Status::from_str(status)
                .map(|s| s.display_name())
                .unwrap_or(status.as_str());
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("{label}: {count}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        if !self.filter.is_unfiltered() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                "filtered",
                Style::default().fg(Color::Magenta),
            ));
        }
        if !self.selection.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("{} selected", self.selection.len()),
                Style::default().fg(Color::Green).bold(),
            ));
        }
        if let Some(task) = self.drag.dragged() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("dragging \"{}\"", task.title),
                Style::default().fg(Color::Green),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if let Some(ref msg) = self.status_message {
            let line = Line::from(Span::styled(
                format!(" {msg}"),
                Style::default().fg(Color::Green),
            ));
            frame.render_widget(line, area);
            return;
        }

        let hints = if self.drag.is_dragging() {
            vec![("h/l", "aim lane"), ("Enter", "drop"), ("Esc", "cancel")]
        } else {
            match &self.mode {
                Mode::Normal => vec![
                    ("q", "quit"),
                    ("h/l j/k", "nav"),
                    ("n", "new"),
                    ("Enter", "detail"),
                    ("g", "grab"),
                    ("space", "select"),
                    ("b", "bulk move"),
                    ("D", "bulk del"),
                    ("m/M", "move"),
                    ("/", "search"),
                    ("s/p/a", "filter"),
                    ("f", "clear filters"),
                    ("P", "projects"),
                    ("r", "refresh"),
                ],
                Mode::NewTask { .. } | Mode::NewProject { .. } => {
                    vec![("Enter", "create"), ("Esc", "cancel")]
                }
                Mode::TaskDetail { .. } => vec![
                    ("m", "move"),
                    ("p", "priority"),
                    ("d", "del"),
                    ("Esc", "back"),
                ],
                Mode::ConfirmDelete { .. } | Mode::ConfirmBulkDelete { .. } => {
                    vec![("y", "confirm"), ("any", "cancel")]
                }
                Mode::BulkMovePick => vec![
                    ("1", "to do"),
                    ("2", "in progress"),
                    ("3", "done"),
                    ("Esc", "cancel"),
                ],
                Mode::Search { .. } => vec![("Enter", "keep"), ("Esc", "clear")],
                Mode::StatusFilterPick | Mode::PriorityFilterPick => {
                    vec![("1/2/3", "pick"), ("0", "all"), ("Esc", "cancel")]
                }
                Mode::AssigneeFilter { .. } => {
                    vec![("Enter", "apply"), ("Esc", "cancel")]
                }
                Mode::ProjectList { .. } => vec![
                    ("j/k", "nav"),
                    ("Enter", "switch"),
                    ("n", "new"),
                    ("Esc", "back"),
                ],
            }
        };

        let spans: Vec<Span> = hints
            .into_iter()
            .flat_map(|(key, desc)| {
                vec![
                    Span::styled(format!(" {key}"), Style::default().fg(Color::Yellow).bold()),
                    Span::raw(format!(" {desc} ")),
                ]
            })
            .collect();

        frame.render_widget(Line::from(spans), area);
    }

    fn render_input_bar(&self, frame: &mut Frame, label: &str, input: &str, area: Rect) {
        let input_area = Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(3),
            width: area.width,
            height: 3,
        };
        frame.render_widget(Clear, input_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(label);
        let paragraph = Paragraph::new(input).block(block);
        frame.render_widget(paragraph, input_area);
    }

    fn render_task_detail(&self, frame: &mut Frame, task: &Task, area: Rect) {
        let popup = centered_rect(60, 60, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Task Detail ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Title: ", Style::default().bold()),
                Span::raw(&task.title),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Status: ", Style::default().bold()),
                Span::raw(task.status.display_name()),
            ]),
            Line::from(vec![
                Span::styled("Priority: ", Style::default().bold()),
                Span::styled(task.priority.display_name(), priority_style(task.priority)),
            ]),
        ];

        if !task.assignee.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Assignee: ", Style::default().bold()),
                Span::raw(&task.assignee),
            ]));
        }
        if let Some(due) = task.due_date {
            lines.push(Line::from(vec![
                Span::styled("Due: ", Style::default().bold()),
                Span::raw(due.format("%Y-%m-%d").to_string()),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Description:",
            Style::default().bold(),
        )));
        lines.push(Line::from(if task.description.is_empty() {
            "(none)"
        } else {
            &task.description
        }));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, inner);
    }

    fn render_confirm_delete(&self, frame: &mut Frame, task: &Task, area: Rect) {
        let popup = centered_rect(50, 20, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Confirm Delete ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));

        let text = format!("Delete \"{}\"?\n\n(y)es / (any key) cancel", task.title);
        let paragraph = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false })
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, popup);
    }

    fn render_confirm_bulk_delete(&self, frame: &mut Frame, count: usize, area: Rect) {
        let popup = centered_rect(50, 20, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Confirm Bulk Delete ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));

        let text = format!("Delete {count} selected task(s)?\n\n(y)es / (any key) cancel");
        let paragraph = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false })
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, popup);
    }

    fn render_bulk_move_pick(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(30, 30, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(format!(" Move {} task(s) to ", self.selection.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let lines: Vec<Line> = Status::BOARD_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, status)| {
                Line::from(vec![
                    Span::styled(
                        format!("[{}] ", i + 1),
                        Style::default().fg(Color::Yellow).bold(),
                    ),
                    Span::raw(status.display_name()),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines).block(block);
        frame.render_widget(paragraph, popup);
    }

    fn render_status_filter_pick(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(30, 30, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Filter by Status ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));

        let mut lines: Vec<Line> = Status::BOARD_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, status)| {
                let marker = if self.filter.status == Some(*status) {
                    "> "
                } else {
                    "  "
                };
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(
                        format!("[{}] ", i + 1),
                        Style::default().fg(Color::Yellow).bold(),
                    ),
                    Span::raw(status.display_name()),
                ])
            })
            .collect();
        lines.push(Line::from(vec![
            Span::raw(if self.filter.status.is_none() { "> " } else { "  " }),
            Span::styled("[0] ", Style::default().fg(Color::Yellow).bold()),
            Span::raw("All"),
        ]));

        let paragraph = Paragraph::new(lines).block(block);
        frame.render_widget(paragraph, popup);
    }

    fn render_priority_filter_pick(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(30, 30, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Filter by Priority ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));

        let mut lines: Vec<Line> = Priority::ALL
            .iter()
            .enumerate()
            .map(|(i, priority)| {
                let marker = if self.filter.priority == Some(*priority) {
                    "> "
                } else {
                    "  "
                };
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(
                        format!("[{}] ", i + 1),
                        Style::default().fg(Color::Yellow).bold(),
                    ),
                    Span::styled(priority.display_name(), priority_style(*priority)),
                ])
            })
            .collect();
        lines.push(Line::from(vec![
            Span::raw(if self.filter.priority.is_none() { "> " } else { "  " }),
            Span::styled("[0] ", Style::default().fg(Color::Yellow).bold()),
            Span::raw("All"),
        ]));

        let paragraph = Paragraph::new(lines).block(block);
        frame.render_widget(paragraph, popup);
    }

    fn render_project_list(
        &self,
        frame: &mut Frame,
        projects: &[Project],
        list_state: &ListState,
        area: Rect,
    ) {
        let popup = centered_rect(50, 50, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Projects ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta));

        let items: Vec<ListItem> = projects
            .iter()
            .map(|p| {
                let marker = if p.id == self.project.id { "* " } else { "  " };
                let mut spans = vec![
                    Span::styled(marker, Style::default().fg(Color::Cyan)),
                    Span::styled(&p.name, Style::default().bold()),
                ];
                if !p.description.is_empty() {
                    spans.push(Span::styled(
                        format!(" {}", p.description),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::Magenta).bold())
            .highlight_symbol("> ");

        let mut state = list_state.clone();
        frame.render_stateful_widget(list, popup, &mut state);
    }
}

fn priority_style(p: Priority) -> Style {
    match p {
        Priority::High => Style::default().fg(Color::LightRed),
        Priority::Medium => Style::default().fg(Color::Yellow),
        Priority::Low => Style::default().fg(Color::Blue),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
