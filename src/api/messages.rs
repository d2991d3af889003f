//! Message endpoints

use super::client::{ApiRequest, ChatworkClient};
use super::error::{ChatworkError, Resource};
use crate::models::{Message, MessagePosted};

/// `GET /rooms/{room_id}/messages?force=`
///
/// `force` is passed through unchanged; the server decides what "unread"
/// means for the caller.
pub async fn list_messages(
    client: &ChatworkClient,
    room_id: i64,
    force: u8,
) -> Result<Vec<Message>, ChatworkError> {
    let request = ApiRequest::get(format!("/rooms/{}/messages", room_id), Resource::Room)
        .query("force", force);
    client.execute_list(request).await
}

/// `GET /rooms/{room_id}/messages/{message_id}`
pub async fn get_message(
    client: &ChatworkClient,
    room_id: i64,
    message_id: &str,
) -> Result<Message, ChatworkError> {
    // Encoded so the ID can only ever address one path segment.
    let request = ApiRequest::get(
        format!(
            "/rooms/{}/messages/{}",
            room_id,
            urlencoding::encode(message_id)
        ),
        Resource::Message,
    );
    client.execute(request).await
}

/// `POST /rooms/{room_id}/messages`
pub async fn post_message(
    client: &ChatworkClient,
    room_id: i64,
    body: &str,
    self_unread: bool,
) -> Result<MessagePosted, ChatworkError> {
    let request = ApiRequest::post(format!("/rooms/{}/messages", room_id), Resource::Room)
        .form("body", body)
        .form("self_unread", if self_unread { "1" } else { "0" });
    client.execute(request).await
}
