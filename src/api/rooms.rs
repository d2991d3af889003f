//! Room endpoints

use super::client::{ApiRequest, ChatworkClient};
use super::error::{ChatworkError, Resource};
use crate::models::Room;

/// `GET /rooms`
pub async fn list_rooms(client: &ChatworkClient) -> Result<Vec<Room>, ChatworkError> {
    client
        .execute_list(ApiRequest::get("/rooms", Resource::Room))
        .await
}
