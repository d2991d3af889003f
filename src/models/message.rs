//! Message-related models

use serde::{Deserialize, Serialize};

use super::Account;

/// Chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: String,
    pub account: Account,
    /// Raw body, may carry an `[info]...[/info]` source annotation
    pub body: String,
    /// Epoch seconds
    pub send_time: i64,
    /// Epoch seconds, 0 when never edited
    #[serde(default)]
    pub update_time: i64,
}

/// Acknowledgement for `POST /rooms/{room_id}/messages`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePosted {
    pub message_id: String,
}
