//! Integration tests for HttpService against a real server.
//!
//! Each test spawns an in-process axum server on 127.0.0.1:0 with a fresh
//! in-memory service, then exercises the HTTP client layer through the full
//! request/response cycle.

use taskdeck_core::project::{CreateProject, UpdateProject};
use taskdeck_core::task::{CreateTask, Priority, Status, TaskFilter, UpdateTask};
use taskdeck_service::{HttpService, ServiceError, TaskService};

async fn spawn_server() -> String {
    let server = taskdeck_server::test_helpers::spawn_test_server().await;
    server.base_url
}

fn create_test_project() -> CreateProject {
    CreateProject {
        name: "Test Project".into(),
        description: "A test project".into(),
    }
}

fn create_test_task(project_id: i64, title: &str, status: Status) -> CreateTask {
    CreateTask {
        project_id,
        title: title.into(),
        description: String::new(),
        status,
        priority: Priority::Medium,
        assignee: String::new(),
        due_date: None,
    }
}

#[tokio::test]
async fn health_check_via_http() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);
    svc.health_check().await.unwrap();
}

#[tokio::test]
async fn project_crud_via_http() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);

    // Create
    let project = svc.create_project(&create_test_project()).await.unwrap();
    assert_eq!(project.name, "Test Project");

    // Get
    let fetched = svc.get_project(project.id).await.unwrap();
    assert_eq!(fetched.id, project.id);

    // List
    let all = svc.list_projects().await.unwrap();
    assert_eq!(all.len(), 1);

    // Update
    let updated = svc
        .update_project(
            project.id,
            &UpdateProject {
                name: Some("Renamed".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Renamed");

    // Delete
    svc.delete_project(project.id).await.unwrap();
    let all = svc.list_projects().await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn task_crud_via_http() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);
    let project = svc.create_project(&create_test_project()).await.unwrap();

    // Create
    let task = svc
        .create_task(&create_test_task(project.id, "My Task", Status::Todo))
        .await
        .unwrap();
    assert_eq!(task.title, "My Task");

    // Get
    let fetched = svc.get_task(task.id).await.unwrap();
    assert_eq!(fetched.id, task.id);

    // List
    let all = svc
        .list_tasks(&TaskFilter {
            project_id: Some(project.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(all.len(), 1);

    // Update
    let updated = svc
        .update_task(
            task.id,
            &UpdateTask {
                title: Some("Updated".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Updated");

    // Count by status
    let counts = svc.count_tasks_by_status(project.id).await.unwrap();
    assert_eq!(counts.len(), Status::ALL.len());

    // Delete
    svc.delete_task(task.id).await.unwrap();
    let all = svc
        .list_tasks(&TaskFilter {
            project_id: Some(project.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn task_list_with_filters_via_http() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);
    let project = svc.create_project(&create_test_project()).await.unwrap();

    svc.create_task(&create_test_task(project.id, "First", Status::Todo))
        .await
        .unwrap();
    svc.create_task(&create_test_task(project.id, "Second", Status::Done))
        .await
        .unwrap();

    let done = svc
        .list_tasks(&TaskFilter {
            project_id: Some(project.id),
            status: Some(Status::Done),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].title, "Second");

    let limited = svc
        .list_tasks(&TaskFilter {
            project_id: Some(project.id),
            limit: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn bulk_update_confirms_known_ids_only() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);
    let project = svc.create_project(&create_test_project()).await.unwrap();

    let a = svc
        .create_task(&create_test_task(project.id, "A", Status::Todo))
        .await
        .unwrap();
    let b = svc
        .create_task(&create_test_task(project.id, "B", Status::Todo))
        .await
        .unwrap();

    // Request includes an id that does not exist; the response carries only
    // the records that were actually updated.
    let confirmed = svc
        .bulk_update_tasks(
            &[a.id, b.id, 9999],
            &UpdateTask {
                status: Some(Status::Done),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(confirmed.len(), 2);
    assert!(confirmed.iter().all(|t| t.status == Status::Done));
}

#[tokio::test]
async fn bulk_delete_confirms_known_ids_only() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);
    let project = svc.create_project(&create_test_project()).await.unwrap();

    let a = svc
        .create_task(&create_test_task(project.id, "A", Status::Todo))
        .await
        .unwrap();
    let b = svc
        .create_task(&create_test_task(project.id, "B", Status::Todo))
        .await
        .unwrap();

    let deleted = svc.bulk_delete_tasks(&[a.id, 9999]).await.unwrap();
    assert_eq!(deleted, vec![a.id]);

    let remaining = svc
        .list_tasks(&TaskFilter {
            project_id: Some(project.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, b.id);
}

#[tokio::test]
async fn missing_task_maps_to_not_found() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);

    let err = svc.get_task(424242).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn blank_title_rejected_before_network() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);
    let project = svc.create_project(&create_test_project()).await.unwrap();

    let err = svc
        .create_task(&create_test_task(project.id, "   ", Status::Todo))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn deleting_project_cascades_to_tasks() {
    let url = spawn_server().await;
    let svc = HttpService::new(&url);
    let project = svc.create_project(&create_test_project()).await.unwrap();
    let task = svc
        .create_task(&create_test_task(project.id, "Orphan", Status::Todo))
        .await
        .unwrap();

    svc.delete_project(project.id).await.unwrap();
    let err = svc.get_task(task.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}
