//! Room-related models

use serde::{Deserialize, Serialize};

/// Chat room as returned by `GET /rooms`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub room_id: i64,
    pub name: String,
    /// `my`, `direct` or `group`
    #[serde(rename = "type")]
    pub room_type: String,
    /// Caller's role in the room: `admin`, `member` or `readonly`
    pub role: String,
    pub sticky: bool,
    pub unread_num: i64,
    pub mention_num: i64,
    pub mytask_num: i64,
    pub message_num: i64,
    pub file_num: i64,
    pub task_num: i64,
    pub icon_path: String,
    pub last_update_time: i64,
}

/// Abbreviated room embedded in task records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRoom {
    pub room_id: i64,
    pub name: String,
    pub icon_path: String,
}
