//! Tool operations
//!
//! Every operation checks the credential first, then validates its
//! parameters, and only then calls the API. Validation failures never reach
//! the network.

pub mod params;

use chrono::{DateTime, Local};

use crate::api::{self, ChatworkClient, ChatworkError, NewTask};
use crate::archive::{self, ArchiveMode};
use crate::models::{
    LimitType, Message, MessagePosted, Room, Task, TaskStatus, TaskStatusUpdated, TasksCreated,
};
use params::*;

fn require_non_empty(value: &str, what: &str) -> Result<(), ChatworkError> {
    if value.is_empty() {
        return Err(ChatworkError::InvalidArgument(format!("{} is required", what)));
    }
    Ok(())
}

fn parse_status(status: &str) -> Result<TaskStatus, ChatworkError> {
    status.parse().map_err(ChatworkError::InvalidArgument)
}

pub async fn list_rooms(client: &ChatworkClient) -> Result<Vec<Room>, ChatworkError> {
    client.token()?;
    api::list_rooms(client).await
}

/// Fetch room messages and archive them.
///
/// In full mode the caller gets a single confirmation record naming the
/// written file instead of the messages.
pub async fn list_room_messages(
    client: &ChatworkClient,
    params: &ListRoomMessagesParams,
) -> Result<Vec<Message>, ChatworkError> {
    list_room_messages_at(client, params, Local::now()).await
}

pub(crate) async fn list_room_messages_at(
    client: &ChatworkClient,
    params: &ListRoomMessagesParams,
    now: DateTime<Local>,
) -> Result<Vec<Message>, ChatworkError> {
    client.token()?;
    let base = archive::normalize_dest_dir(&params.save_dir_path)?;
    let mode = ArchiveMode::from_force(params.force)?;

    let messages = api::list_messages(client, params.room_id, mode.force()).await?;
    if !mode.should_archive(&messages) {
        tracing::debug!("No new messages in room {}", params.room_id);
        return Ok(messages);
    }

    let file = archive::write_archive(&base, params.room_id, mode, &messages, &now).await?;
    match mode {
        ArchiveMode::Full => Ok(vec![archive::confirmation_message(&file, &now)]),
        ArchiveMode::Diff => Ok(messages),
    }
}

pub async fn get_room_message(
    client: &ChatworkClient,
    params: &GetRoomMessageParams,
) -> Result<Message, ChatworkError> {
    client.token()?;
    let message_id = params.message_id.trim();
    require_non_empty(message_id, "message_id")?;
    if !message_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ChatworkError::InvalidArgument(format!(
            "message_id must be numeric, got {:?}",
            message_id
        )));
    }
    api::get_message(client, params.room_id, message_id).await
}

pub async fn list_room_tasks(
    client: &ChatworkClient,
    params: &RoomParams,
) -> Result<Vec<Task>, ChatworkError> {
    client.token()?;
    api::list_room_tasks(client, params.room_id).await
}

pub async fn get_room_task(
    client: &ChatworkClient,
    params: &GetRoomTaskParams,
) -> Result<Task, ChatworkError> {
    client.token()?;
    api::get_room_task(client, params.room_id, params.task_id).await
}

pub async fn create_room_task(
    client: &ChatworkClient,
    params: &CreateRoomTaskParams,
) -> Result<TasksCreated, ChatworkError> {
    client.token()?;
    let limit_type: LimitType = params
        .limit_type
        .parse()
        .map_err(ChatworkError::InvalidArgument)?;
    require_non_empty(&params.body, "Task body (body)")?;
    if params.to_ids.is_empty() {
        return Err(ChatworkError::InvalidArgument(
            "Task assignees (to_ids) are required".to_string(),
        ));
    }

    let task = NewTask {
        body: &params.body,
        to_ids: &params.to_ids,
        limit: params.limit,
        limit_type,
    };
    api::create_room_task(client, params.room_id, &task).await
}

pub async fn update_room_task_status(
    client: &ChatworkClient,
    params: &UpdateTaskStatusParams,
) -> Result<TaskStatusUpdated, ChatworkError> {
    client.token()?;
    let status = parse_status(&params.status)?;
    api::update_task_status(client, params.room_id, params.task_id, status).await
}

pub async fn list_my_tasks(
    client: &ChatworkClient,
    params: &ListMyTasksParams,
) -> Result<Vec<Task>, ChatworkError> {
    client.token()?;
    let status = parse_status(&params.status)?;
    api::list_my_tasks(client, status).await
}

pub async fn post_room_message(
    client: &ChatworkClient,
    params: &PostRoomMessageParams,
) -> Result<MessagePosted, ChatworkError> {
    client.token()?;
    require_non_empty(&params.body, "Message body (body)")?;
    api::post_message(client, params.room_id, &params.body, params.self_unread).await
}
