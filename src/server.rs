//! Chatwork MCP server
//!
//! Registers the tool operations with rmcp and serves them over stdio.

use std::sync::Arc;

use anyhow::{Context, Result};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, ErrorCode, ErrorData, Implementation, ServerCapabilities,
        ServerInfo,
    },
    tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::Serialize;

use crate::api::{ChatworkClient, ChatworkError};
use crate::tools::{self, params::*};

const INSTRUCTIONS: &str = r#"
Chatwork tools

Rooms and messages:
- get_rooms: list the rooms you belong to
- get_room_messages: fetch room messages and save them under save_dir_path
  (run `pwd` first; use force=0 unless asked for the full history)
- get_room_message: fetch one message
- post_room_messages: post a message

Tasks:
- get_room_tasks / get_room_task: list or fetch room tasks
- post_room_tasks: create a task for one or more assignees
- put_room_task_status: mark a task open or done
- get_my_tasks: tasks assigned to you
"#;

impl From<ChatworkError> for ErrorData {
    fn from(err: ChatworkError) -> Self {
        let code = if err.is_invalid_params() {
            ErrorCode::INVALID_PARAMS
        } else {
            ErrorCode::INTERNAL_ERROR
        };
        let mut data = serde_json::json!({ "kind": err.kind() });
        if let Some(status) = err.status() {
            data["status"] = status.into();
        }
        ErrorData::new(code, err.to_string(), Some(data))
    }
}

/// Render an operation result as JSON text content.
fn respond<T: Serialize>(result: Result<T, ChatworkError>) -> Result<CallToolResult, ErrorData> {
    let value = result?;
    let text = serde_json::to_string_pretty(&value)
        .map_err(|e| ErrorData::new(ErrorCode::INTERNAL_ERROR, e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[derive(Clone)]
pub struct ChatworkServer {
    tool_router: ToolRouter<Self>,
    client: Arc<ChatworkClient>,
}

#[tool_router]
impl ChatworkServer {
    pub fn new(client: ChatworkClient) -> Self {
        Self {
            tool_router: Self::tool_router(),
            client: Arc::new(client),
        }
    }

    #[tool(name = "get_rooms", description = "List the Chatwork rooms you belong to.")]
    async fn list_rooms(&self) -> Result<CallToolResult, ErrorData> {
        respond(tools::list_rooms(&self.client).await)
    }

    #[tool(
        name = "get_room_messages",
        description = "Fetch room messages and save them as a transcript under save_dir_path. \
                       force=0 (default) fetches only new messages and returns them; force=1 \
                       saves the latest history and returns the saved file path."
    )]
    async fn list_room_messages(
        &self,
        Parameters(params): Parameters<ListRoomMessagesParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(tools::list_room_messages(&self.client, &params).await)
    }

    #[tool(name = "get_room_message", description = "Fetch a single message from a room.")]
    async fn get_room_message(
        &self,
        Parameters(params): Parameters<GetRoomMessageParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(tools::get_room_message(&self.client, &params).await)
    }

    #[tool(name = "get_room_tasks", description = "List the tasks of a room.")]
    async fn list_room_tasks(
        &self,
        Parameters(params): Parameters<RoomParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(tools::list_room_tasks(&self.client, &params).await)
    }

    #[tool(name = "get_room_task", description = "Fetch a single task from a room.")]
    async fn get_room_task(
        &self,
        Parameters(params): Parameters<GetRoomTaskParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(tools::get_room_task(&self.client, &params).await)
    }

    #[tool(
        name = "post_room_tasks",
        description = "Create a task in a room for one or more assignees."
    )]
    async fn create_room_task(
        &self,
        Parameters(params): Parameters<CreateRoomTaskParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(tools::create_room_task(&self.client, &params).await)
    }

    #[tool(
        name = "put_room_task_status",
        description = "Set a room task's status to \"open\" or \"done\"."
    )]
    async fn update_room_task_status(
        &self,
        Parameters(params): Parameters<UpdateTaskStatusParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(tools::update_room_task_status(&self.client, &params).await)
    }

    #[tool(name = "get_my_tasks", description = "List tasks assigned to you.")]
    async fn list_my_tasks(
        &self,
        Parameters(params): Parameters<ListMyTasksParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(tools::list_my_tasks(&self.client, &params).await)
    }

    #[tool(
        name = "post_room_messages",
        description = "Post a message to a room. self_unread takes true/false (1/0 also accepted)."
    )]
    async fn post_room_message(
        &self,
        Parameters(params): Parameters<PostRoomMessageParams>,
    ) -> Result<CallToolResult, ErrorData> {
        respond(tools::post_room_message(&self.client, &params).await)
    }
}

#[tool_handler]
impl ServerHandler for ChatworkServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "chatwork-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                title: Some("ChatWork MCP Server".to_string()),
                description: None,
                icons: None,
                website_url: None,
            },
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(INSTRUCTIONS.trim().to_string()),
            ..Default::default()
        }
    }
}

/// Serve tools on stdin/stdout until the host disconnects.
pub async fn run(client: ChatworkClient) -> Result<()> {
    tracing::info!("Starting Chatwork MCP server on stdio");
    let service = ChatworkServer::new(client)
        .serve(rmcp::transport::stdio())
        .await
        .context("Failed to start MCP server")?;
    service.waiting().await.context("MCP server stopped")?;
    Ok(())
}
