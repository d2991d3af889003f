//! Data models for Chatwork entities

mod account;
mod message;
mod room;
mod task;

pub use account::*;
pub use message::*;
pub use room::*;
pub use task::*;
