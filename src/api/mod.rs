//! Chatwork REST API: gateway, error policy and endpoint calls

pub mod client;
pub mod error;
mod messages;
mod rooms;
mod tasks;

pub use client::ChatworkClient;
pub use error::ChatworkError;
pub use messages::{get_message, list_messages, post_message};
pub use rooms::list_rooms;
pub use tasks::{
    create_room_task, get_room_task, list_my_tasks, list_room_tasks, update_task_status, NewTask,
};
