//! Task API endpoints
//!
//! RESTful API for task CRUD operations. Every handler runs one
//! load-operate-save cycle against the configured storage location,
//! serialized through the state's cycle lock.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tl_core::task::{Task, TaskFilter, TaskStorage};
use tl_core::Error;

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTaskRequest {
    #[serde(default)]
    pub is_complete: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksQuery {
    #[serde(default)]
    pub is_complete: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    core_error(Error::InvalidInput(message.into()))
}

fn core_error(e: Error) -> ApiError {
    let status = match e {
        Error::TaskNotFound(_) => StatusCode::NOT_FOUND,
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /tasks - List tasks, optionally filtered
async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<Vec<Task>>, ApiError> {
    // Validate filter values at the boundary, before the store is touched
    let is_complete = match query.is_complete.as_deref() {
        None | Some("") => None,
        Some("true") => Some(true),
        Some("false") => Some(false),
        Some(_) => {
            return Err(bad_request("isComplete must be 'true' or 'false'"));
        }
    };

    let filter = TaskFilter {
        is_complete,
        content: query.content.filter(|c| !c.is_empty()),
    };

    let _cycle = state.lock_cycle().await;
    let tasks = state.task_store().load().await.map_err(core_error)?;

    Ok(Json(tasks.filter(&filter)))
}

/// POST /tasks - Create a new task
async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let content = match req.content {
        Some(content) if !content.trim().is_empty() => content,
        _ => return Err(bad_request("content is required and cannot be empty")),
    };

    let _cycle = state.lock_cycle().await;
    let mut tasks = state.task_store().load().await.map_err(core_error)?;

    let task = Task::new(content);
    tasks.push(task.clone());

    state.task_store().save(&tasks).await.map_err(core_error)?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /tasks/:id - Replace a task's content
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let content = match req.content {
        Some(content) if !content.trim().is_empty() => content,
        _ => return Err(bad_request("content is required and cannot be empty")),
    };

    let _cycle = state.lock_cycle().await;
    let mut tasks = state.task_store().load().await.map_err(core_error)?;

    let updated = tasks.update_content(id, content).map_err(core_error)?.clone();

    state.task_store().save(&tasks).await.map_err(core_error)?;

    Ok(Json(updated))
}

/// PATCH /tasks/:id - Mark a task complete
async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CompleteTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    match req.is_complete {
        Some(true) => {}
        Some(false) => {
            // Clearing the completion flag is not a supported transition.
            return Err(bad_request("isComplete can only be set to true"));
        }
        None => return Err(bad_request("isComplete is required")),
    }

    let _cycle = state.lock_cycle().await;
    let mut tasks = state.task_store().load().await.map_err(core_error)?;

    let completed = tasks.complete(id).map_err(core_error)?.clone();

    state.task_store().save(&tasks).await.map_err(core_error)?;

    Ok(Json(completed))
}

/// DELETE /tasks/:id - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let _cycle = state.lock_cycle().await;
    let mut tasks = state.task_store().load().await.map_err(core_error)?;

    tasks.remove(id).map_err(core_error)?;

    state.task_store().save(&tasks).await.map_err(core_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            put(update_task).patch(complete_task).delete(delete_task),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use axum::response::Response;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_app() -> (Router, TempDir) {
        let temp = TempDir::new().unwrap();
        let state = AppState::new(temp.path().to_path_buf());
        let app = Router::new().merge(router()).with_state(state);
        (app, temp)
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create(app: &Router, content: &str) -> Value {
        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/tasks", json!({ "content": content })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    #[tokio::test]
    async fn test_list_tasks_empty() {
        let (app, _temp) = test_app();

        let response = app.oneshot(get_request("/tasks")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_create_task_persists() {
        let (app, _temp) = test_app();

        let task = create(&app, "New task from HTTP").await;
        assert_eq!(task["content"], "New task from HTTP");
        assert_eq!(task["isComplete"], false);
        assert_eq!(task["completeDate"], "0001-01-01T00:00:00Z");
        assert!(task["id"].as_str().is_some());

        let response = app.oneshot(get_request("/tasks")).await.unwrap();
        let tasks = body_json(response).await;
        assert_eq!(tasks.as_array().unwrap().len(), 1);
        assert_eq!(tasks[0], task);
    }

    #[tokio::test]
    async fn test_create_task_rejects_blank_content() {
        let (app, _temp) = test_app();

        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/tasks", json!({ "content": "  " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(json_request(Method::POST, "/tasks", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_filter_by_completion_state() {
        let (app, _temp) = test_app();

        let a = create(&app, "A").await;
        create(&app, "B").await;

        let response = app
            .clone()
            .oneshot(json_request(
                Method::PATCH,
                &format!("/tasks/{}", a["id"].as_str().unwrap()),
                json!({ "isComplete": true }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(get_request("/tasks?isComplete=true"))
            .await
            .unwrap();
        let done = body_json(response).await;
        assert_eq!(done.as_array().unwrap().len(), 1);
        assert_eq!(done[0]["content"], "A");

        let response = app
            .oneshot(get_request("/tasks?isComplete=false"))
            .await
            .unwrap();
        let pending = body_json(response).await;
        assert_eq!(pending.as_array().unwrap().len(), 1);
        assert_eq!(pending[0]["content"], "B");
    }

    #[tokio::test]
    async fn test_filter_rejects_bad_completion_value() {
        let (app, _temp) = test_app();

        let response = app
            .oneshot(get_request("/tasks?isComplete=maybe"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid input: isComplete must be 'true' or 'false'");
    }

    #[tokio::test]
    async fn test_filter_by_content_tokens() {
        let (app, _temp) = test_app();

        create(&app, "Buy milk and bread").await;
        create(&app, "Buy milk").await;

        let response = app
            .oneshot(get_request("/tasks?content=milk%20bread"))
            .await
            .unwrap();
        let tasks = body_json(response).await;
        assert_eq!(tasks.as_array().unwrap().len(), 1);
        assert_eq!(tasks[0]["content"], "Buy milk and bread");
    }

    #[tokio::test]
    async fn test_update_task_content() {
        let (app, _temp) = test_app();

        let task = create(&app, "Original").await;
        let id = task["id"].as_str().unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                &format!("/tasks/{}", id),
                json!({ "content": "Updated Task Content" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let updated = body_json(response).await;
        assert_eq!(updated["content"], "Updated Task Content");
        assert_eq!(updated["id"], task["id"]);
        assert_eq!(updated["createDate"], task["createDate"]);

        let response = app.oneshot(get_request("/tasks")).await.unwrap();
        let tasks = body_json(response).await;
        assert_eq!(tasks[0]["content"], "Updated Task Content");
    }

    #[tokio::test]
    async fn test_update_unknown_task_is_404() {
        let (app, _temp) = test_app();
        create(&app, "Existing").await;

        let response = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                &format!("/tasks/{}", Uuid::new_v4()),
                json!({ "content": "Updated" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Collection untouched
        let response = app.oneshot(get_request("/tasks")).await.unwrap();
        let tasks = body_json(response).await;
        assert_eq!(tasks[0]["content"], "Existing");
    }

    #[tokio::test]
    async fn test_complete_task() {
        let (app, _temp) = test_app();

        let task = create(&app, "Finish me").await;
        let id = task["id"].as_str().unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                Method::PATCH,
                &format!("/tasks/{}", id),
                json!({ "isComplete": true }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let completed = body_json(response).await;
        assert_eq!(completed["isComplete"], true);
        assert_ne!(completed["completeDate"], "0001-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn test_complete_rejects_false_and_missing_flag() {
        let (app, _temp) = test_app();

        let task = create(&app, "Task").await;
        let id = task["id"].as_str().unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                Method::PATCH,
                &format!("/tasks/{}", id),
                json!({ "isComplete": false }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(json_request(Method::PATCH, &format!("/tasks/{}", id), json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_complete_unknown_task_is_404() {
        let (app, _temp) = test_app();

        let response = app
            .oneshot(json_request(
                Method::PATCH,
                &format!("/tasks/{}", Uuid::new_v4()),
                json!({ "isComplete": true }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_task() {
        let (app, _temp) = test_app();

        let task = create(&app, "Delete me").await;
        let id = task["id"].as_str().unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri(format!("/tasks/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri(format!("/tasks/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app.oneshot(get_request("/tasks")).await.unwrap();
        assert_eq!(body_json(response).await, json!([]));
    }
}
