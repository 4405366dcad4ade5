//! State machine tests for the TUI App.
//!
//! Each test spawns a test server on a separate thread (to avoid nested tokio
//! runtime panics), builds an App over HttpService, and simulates key events
//! to test mode transitions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskdeck_core::task::{CreateTask, Priority, Status};
use taskdeck_service::{HttpService, TaskService};
use taskdeck_tui::app::{App, Mode};
use tokio::runtime::Runtime;

/// Spawn the test server on a separate thread, return the base URL.
/// The App owns its own tokio Runtime, so the server must live in a
/// separate thread's Runtime to avoid nesting.
fn spawn_server() -> String {
    let (tx, rx) = std::sync::mpsc::sync_channel(1);
    std::thread::spawn(move || {
        let rt = Runtime::new().unwrap();
        rt.block_on(async {
            let server = taskdeck_server::test_helpers::spawn_test_server().await;
            tx.send(server.base_url.clone()).unwrap();
            std::future::pending::<()>().await;
        });
    });
    rx.recv().unwrap()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

fn make_app() -> App {
    let url = spawn_server();
    let rt = Runtime::new().unwrap();
    let svc = HttpService::new(&url);
    App::new(rt, svc).unwrap()
}

/// Create an app with `count` tasks already on the board.
fn make_app_with_tasks(count: usize) -> App {
    let url = spawn_server();
    let rt = Runtime::new().unwrap();
    let svc = HttpService::new(&url);

    rt.block_on(async {
        let projects = svc.list_projects().await.unwrap();
        let project = match projects.into_iter().next() {
            Some(p) => p,
            None => svc
                .create_project(&taskdeck_core::project::CreateProject {
                    name: "Test".into(),
                    description: String::new(),
                })
                .await
                .unwrap(),
        };
        for i in 0..count {
            svc.create_task(&CreateTask {
                project_id: project.id,
                title: format!("Task {i}"),
                description: String::new(),
                status: Status::Todo,
                priority: Priority::Medium,
                assignee: String::new(),
                due_date: None,
            })
            .await
            .unwrap();
        }
    });

    App::new(rt, svc).unwrap()
}

// ---- State transition tests ----

#[test]
fn app_starts_normal() {
    let app = make_app();
    assert!(matches!(app.mode(), Mode::Normal));
}

#[test]
fn n_enters_new_task() {
    let mut app = make_app();
    app.handle_key(char_key('n'));
    assert!(matches!(app.mode(), Mode::NewTask { .. }));
    assert!(app.is_input_mode());
}

#[test]
fn new_task_esc_cancels() {
    let mut app = make_app();
    app.handle_key(char_key('n'));
    app.handle_key(key(KeyCode::Esc));
    assert!(matches!(app.mode(), Mode::Normal));
}

#[test]
fn new_task_typing_and_submit() {
    let mut app = make_app();
    app.handle_key(char_key('n'));
    for c in "Test".chars() {
        app.handle_key(char_key(c));
    }
    app.handle_key(key(KeyCode::Enter));
    assert!(matches!(app.mode(), Mode::Normal));
}

#[test]
fn enter_opens_detail() {
    let mut app = make_app_with_tasks(1);
    app.handle_key(key(KeyCode::Enter));
    assert!(matches!(app.mode(), Mode::TaskDetail { .. }));
}

#[test]
fn detail_esc_returns() {
    let mut app = make_app_with_tasks(1);
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(key(KeyCode::Esc));
    assert!(matches!(app.mode(), Mode::Normal));
}

#[test]
fn space_toggles_selection() {
    let mut app = make_app_with_tasks(2);
    assert_eq!(app.selection_len(), 0);
    app.handle_key(char_key(' '));
    assert_eq!(app.selection_len(), 1);
    app.handle_key(char_key(' '));
    assert_eq!(app.selection_len(), 0);
}

#[test]
fn c_clears_selection() {
    let mut app = make_app_with_tasks(2);
    app.handle_key(char_key(' '));
    app.handle_key(char_key('j'));
    app.handle_key(char_key(' '));
    assert_eq!(app.selection_len(), 2);
    app.handle_key(char_key('c'));
    assert_eq!(app.selection_len(), 0);
}

#[test]
fn b_without_selection_stays_normal() {
    let mut app = make_app_with_tasks(1);
    app.handle_key(char_key('b'));
    assert!(matches!(app.mode(), Mode::Normal));
}

#[test]
fn b_with_selection_enters_bulk_move_pick() {
    let mut app = make_app_with_tasks(1);
    app.handle_key(char_key(' '));
    app.handle_key(char_key('b'));
    assert!(matches!(app.mode(), Mode::BulkMovePick));
}

#[test]
fn bulk_move_clears_selection() {
    let mut app = make_app_with_tasks(2);
    app.handle_key(char_key(' '));
    app.handle_key(char_key('j'));
    app.handle_key(char_key(' '));
    app.handle_key(char_key('b'));
    app.handle_key(char_key('3'));
    assert!(matches!(app.mode(), Mode::Normal));
    assert_eq!(app.selection_len(), 0);
}

#[test]
fn bulk_move_to_same_lane_keeps_selection() {
    let mut app = make_app_with_tasks(2);
    app.handle_key(char_key(' '));
    app.handle_key(char_key('j'));
    app.handle_key(char_key(' '));
    app.handle_key(char_key('b'));
    // Everything is already in To Do: informational no-op.
    app.handle_key(char_key('1'));
    assert!(matches!(app.mode(), Mode::Normal));
    assert_eq!(app.selection_len(), 2);
}

#[test]
fn bulk_move_pick_esc_cancels() {
    let mut app = make_app_with_tasks(1);
    app.handle_key(char_key(' '));
    app.handle_key(char_key('b'));
    app.handle_key(key(KeyCode::Esc));
    assert!(matches!(app.mode(), Mode::Normal));
    assert_eq!(app.selection_len(), 1);
}

#[test]
fn bulk_delete_confirm_and_cancel() {
    let mut app = make_app_with_tasks(2);
    app.handle_key(char_key(' '));
    app.handle_key(char_key('D'));
    assert!(matches!(app.mode(), Mode::ConfirmBulkDelete { count: 1 }));

    // Any key other than y cancels; selection survives.
    app.handle_key(char_key('x'));
    assert!(matches!(app.mode(), Mode::Normal));
    assert_eq!(app.selection_len(), 1);

    app.handle_key(char_key('D'));
    app.handle_key(char_key('y'));
    assert!(matches!(app.mode(), Mode::Normal));
    assert_eq!(app.selection_len(), 0);
}

#[test]
fn g_starts_drag_and_esc_cancels() {
    let mut app = make_app_with_tasks(1);
    assert!(!app.is_dragging());
    app.handle_key(char_key('g'));
    assert!(app.is_dragging());
    app.handle_key(key(KeyCode::Esc));
    assert!(!app.is_dragging());
}

#[test]
fn drag_enter_drops_and_clears() {
    let mut app = make_app_with_tasks(1);
    app.handle_key(char_key('g'));
    app.handle_key(char_key('l'));
    app.handle_key(key(KeyCode::Enter));
    assert!(!app.is_dragging());
    assert!(matches!(app.mode(), Mode::Normal));
}

#[test]
fn drag_past_rightmost_lane_then_drop_cancels() {
    let mut app = make_app_with_tasks(1);
    app.handle_key(char_key('g'));
    // Walk hover off the right edge of the board.
    app.handle_key(char_key('l'));
    app.handle_key(char_key('l'));
    app.handle_key(char_key('l'));
    app.handle_key(key(KeyCode::Enter));
    assert!(!app.is_dragging());
}

#[test]
fn g_without_task_does_not_drag() {
    let mut app = make_app();
    app.handle_key(char_key('g'));
    assert!(!app.is_dragging());
}

#[test]
fn slash_enters_search_mode() {
    let mut app = make_app();
    app.handle_key(char_key('/'));
    assert!(matches!(app.mode(), Mode::Search { .. }));
    assert!(app.is_input_mode());
}

#[test]
fn search_is_applied_live_and_esc_clears() {
    let mut app = make_app_with_tasks(1);
    app.handle_key(char_key('/'));
    app.handle_key(char_key('z'));
    assert_eq!(app.filter().search, "z");
    app.handle_key(key(KeyCode::Esc));
    assert!(app.filter().search.is_empty());
    assert!(matches!(app.mode(), Mode::Normal));
}

#[test]
fn status_filter_pick_sets_and_clears() {
    let mut app = make_app();
    app.handle_key(char_key('s'));
    assert!(matches!(app.mode(), Mode::StatusFilterPick));
    app.handle_key(char_key('2'));
    assert_eq!(app.filter().status, Some(Status::InProgress));

    app.handle_key(char_key('s'));
    app.handle_key(char_key('0'));
    assert_eq!(app.filter().status, None);
}

#[test]
fn priority_filter_pick_sets() {
    let mut app = make_app();
    app.handle_key(char_key('p'));
    assert!(matches!(app.mode(), Mode::PriorityFilterPick));
    app.handle_key(char_key('1'));
    assert_eq!(app.filter().priority, Some(Priority::High));
}

#[test]
fn filtering_out_a_selected_task_deselects_it() {
    let mut app = make_app_with_tasks(1);
    app.handle_key(char_key(' '));
    assert_eq!(app.selection_len(), 1);
    // Tasks are in To Do; a Done filter empties the visible set.
    app.handle_key(char_key('s'));
    app.handle_key(char_key('3'));
    assert_eq!(app.selection_len(), 0);
}

#[test]
fn f_clears_filters() {
    let mut app = make_app();
    app.handle_key(char_key('s'));
    app.handle_key(char_key('1'));
    app.handle_key(char_key('f'));
    assert!(app.filter().is_unfiltered());
}

#[test]
fn assignee_filter_typing_and_apply() {
    let mut app = make_app();
    app.handle_key(char_key('a'));
    assert!(matches!(app.mode(), Mode::AssigneeFilter { .. }));
    for c in "sam".chars() {
        app.handle_key(char_key(c));
    }
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.filter().assignee.as_deref(), Some("sam"));
}

#[test]
fn project_list_and_new_project() {
    let mut app = make_app();
    app.handle_key(char_key('P'));
    assert!(matches!(app.mode(), Mode::ProjectList { .. }));
    app.handle_key(char_key('n'));
    assert!(matches!(app.mode(), Mode::NewProject { .. }));
    app.handle_key(key(KeyCode::Esc));
    assert!(matches!(app.mode(), Mode::Normal));
}
