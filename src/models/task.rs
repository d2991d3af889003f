//! Task-related models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Account, TaskRoom};

/// Task completion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Open,
    Done,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TaskStatus::Open),
            "done" => Ok(TaskStatus::Done),
            other => Err(format!(
                "Unknown task status: {:?}. Use \"open\" or \"done\"",
                other
            )),
        }
    }
}

/// How a task's due timestamp is interpreted
///
/// `None` only appears in responses for tasks created without a due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitType {
    Date,
    Time,
    None,
}

impl LimitType {
    pub fn as_str(self) -> &'static str {
        match self {
            LimitType::Date => "date",
            LimitType::Time => "time",
            LimitType::None => "none",
        }
    }
}

impl FromStr for LimitType {
    type Err = String;

    /// Accepts only the values a caller may request.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(LimitType::Date),
            "time" => Ok(LimitType::Time),
            other => Err(format!(
                "Unknown limit type: {:?}. Use \"date\" or \"time\"",
                other
            )),
        }
    }
}

/// Task record
///
/// Room listings embed the assignee as `account`; `/my/tasks` embeds the
/// owning `room` instead, so both are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<TaskRoom>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<Account>,
    pub assigned_by_account: Account,
    pub message_id: String,
    pub body: String,
    /// Epoch seconds, 0 when no due date
    #[serde(default)]
    pub limit_time: i64,
    pub status: TaskStatus,
    pub limit_type: LimitType,
}

/// Acknowledgement for `POST /rooms/{room_id}/tasks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TasksCreated {
    pub task_ids: Vec<i64>,
}

/// Acknowledgement for `PUT /rooms/{room_id}/tasks/{task_id}/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatusUpdated {
    pub task_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!("open".parse::<TaskStatus>(), Ok(TaskStatus::Open));
        assert_eq!("done".parse::<TaskStatus>(), Ok(TaskStatus::Done));
        assert!("Done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_limit_type_rejects_none() {
        assert_eq!("time".parse::<LimitType>(), Ok(LimitType::Time));
        assert!("none".parse::<LimitType>().is_err());
    }

    #[test]
    fn test_deserialize_my_task() {
        let json = r#"{
            "task_id": 3,
            "room": {"room_id": 5, "name": "Group Chat Name", "icon_path": "https://example.com/ico_group.png"},
            "assigned_by_account": {"account_id": 78, "name": "Anna", "avatar_image_url": "https://example.com/def.png"},
            "message_id": "13",
            "body": "buy milk",
            "limit_time": 1384354799,
            "status": "open",
            "limit_type": "date"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.room.as_ref().map(|r| r.room_id), Some(5));
        assert!(task.account.is_none());
        assert_eq!(task.status, TaskStatus::Open);
        assert_eq!(task.limit_type, LimitType::Date);
    }
}
