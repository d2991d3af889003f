//! Tool parameter records
//!
//! These are what the host sends; their doc comments become the JSON schema
//! descriptions it sees.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

fn default_limit_type() -> String {
    "date".to_string()
}

fn default_done() -> String {
    "done".to_string()
}

fn default_open() -> String {
    "open".to_string()
}

/// Accepts `true`/`false` as well as the `1`/`0` older hosts send.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Int(0) => Ok(false),
        Flag::Int(1) => Ok(true),
        Flag::Int(other) => Err(serde::de::Error::custom(format!(
            "expected true/false or 1/0, got {}",
            other
        ))),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListRoomMessagesParams {
    /// Chat room ID
    pub room_id: i64,
    /// Directory the transcript is saved under. Run `pwd` first and pass the
    /// printed path unchanged (on Windows: C:\Users\...).
    pub save_dir_path: String,
    /// 0 = only messages not yet fetched (default, keeps traffic low),
    /// 1 = latest history regardless of read position
    #[serde(default)]
    pub force: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetRoomMessageParams {
    /// Chat room ID
    pub room_id: i64,
    /// Message ID
    pub message_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RoomParams {
    /// Chat room ID
    pub room_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetRoomTaskParams {
    /// Chat room ID
    pub room_id: i64,
    /// Task ID
    pub task_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateRoomTaskParams {
    /// Chat room ID
    pub room_id: i64,
    /// Task description
    pub body: String,
    /// Account IDs of the assignees
    pub to_ids: Vec<i64>,
    /// Due date as a UNIX timestamp
    #[serde(default)]
    pub limit: Option<i64>,
    /// "date" (due on a day) or "time" (due at an exact time); default "date"
    #[serde(default = "default_limit_type")]
    pub limit_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateTaskStatusParams {
    /// Chat room ID
    pub room_id: i64,
    /// Task ID
    pub task_id: i64,
    /// New status: "open" or "done"; default "done"
    #[serde(default = "default_done")]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListMyTasksParams {
    /// "open" or "done"; default "open"
    #[serde(default = "default_open")]
    pub status: String,
}

impl Default for ListMyTasksParams {
    fn default() -> Self {
        Self {
            status: default_open(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PostRoomMessageParams {
    /// Chat room ID
    pub room_id: i64,
    /// Message body
    pub body: String,
    /// Leave the posted message unread for yourself (true/false; 1/0 also accepted)
    #[serde(default, deserialize_with = "flag")]
    pub self_unread: bool,
}
