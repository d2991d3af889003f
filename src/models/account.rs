//! Account model shared by messages and tasks

use serde::{Deserialize, Serialize};

/// Chatwork account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: i64,
    pub name: String,
    pub avatar_image_url: String,
}

impl Account {
    /// Author of locally generated records.
    pub fn system() -> Self {
        Self {
            account_id: 0,
            name: "System".to_string(),
            avatar_image_url: String::new(),
        }
    }
}
