//! Task endpoints

use super::client::{ApiRequest, ChatworkClient};
use super::error::{ChatworkError, Resource};
use crate::models::{LimitType, Task, TaskStatus, TaskStatusUpdated, TasksCreated};

/// Fields for `POST /rooms/{room_id}/tasks`
#[derive(Debug, Clone)]
pub struct NewTask<'a> {
    pub body: &'a str,
    pub to_ids: &'a [i64],
    /// Due timestamp (epoch seconds); omitted from the form when `None`
    pub limit: Option<i64>,
    pub limit_type: LimitType,
}

/// `GET /rooms/{room_id}/tasks`
pub async fn list_room_tasks(
    client: &ChatworkClient,
    room_id: i64,
) -> Result<Vec<Task>, ChatworkError> {
    let request = ApiRequest::get(format!("/rooms/{}/tasks", room_id), Resource::Room);
    client.execute_list(request).await
}

/// `GET /rooms/{room_id}/tasks/{task_id}`
pub async fn get_room_task(
    client: &ChatworkClient,
    room_id: i64,
    task_id: i64,
) -> Result<Task, ChatworkError> {
    let request = ApiRequest::get(
        format!("/rooms/{}/tasks/{}", room_id, task_id),
        Resource::Task,
    );
    client.execute(request).await
}

/// `POST /rooms/{room_id}/tasks`
pub async fn create_room_task(
    client: &ChatworkClient,
    room_id: i64,
    task: &NewTask<'_>,
) -> Result<TasksCreated, ChatworkError> {
    let to_ids = task
        .to_ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");

    let mut request = ApiRequest::post(format!("/rooms/{}/tasks", room_id), Resource::Room)
        .form("body", task.body)
        .form("limit_type", task.limit_type.as_str())
        .form("to_ids", to_ids);
    if let Some(limit) = task.limit {
        request = request.form("limit", limit);
    }
    client.execute(request).await
}

/// `PUT /rooms/{room_id}/tasks/{task_id}/status`
pub async fn update_task_status(
    client: &ChatworkClient,
    room_id: i64,
    task_id: i64,
    status: TaskStatus,
) -> Result<TaskStatusUpdated, ChatworkError> {
    // The API takes the new status in a field named `body`.
    let request = ApiRequest::put(
        format!("/rooms/{}/tasks/{}/status", room_id, task_id),
        Resource::Task,
    )
    .form("body", status.as_str());
    client.execute(request).await
}

/// `GET /my/tasks?status=`
pub async fn list_my_tasks(
    client: &ChatworkClient,
    status: TaskStatus,
) -> Result<Vec<Task>, ChatworkError> {
    let request = ApiRequest::get("/my/tasks", Resource::Task).query("status", status.as_str());
    client.execute_list(request).await
}
