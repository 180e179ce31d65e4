//! Result and error helpers for MCP tool responses

use repo_signals::SignalError;
use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
use serde::Serialize;

use crate::repo_ref::InvalidRepoRef;

/// Create a successful JSON response from any serializable data
pub fn json_success<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

pub fn internal_error(message: impl Into<String>) -> McpError {
    McpError::internal_error(message.into(), None)
}

pub fn invalid_params(message: impl Into<String>) -> McpError {
    McpError::invalid_params(message.into(), None)
}

/// Map engine errors onto MCP errors
///
/// Unresolvable repositories are the caller's input; everything else is
/// reported as an internal failure.
pub fn signal_to_mcp_error(e: SignalError) -> McpError {
    match e {
        SignalError::Unresolvable(_) => invalid_params(e.to_string()),
        other => internal_error(other.to_string()),
    }
}

impl From<InvalidRepoRef> for McpError {
    fn from(e: InvalidRepoRef) -> Self {
        invalid_params(e.to_string())
    }
}
