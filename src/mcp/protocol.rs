/// JSON-RPC 2.0 message types for the MCP wire format
///
/// Everything the stdio loop reads or writes is defined here: the request
/// envelope, the response envelope with its error variant, and the payload
/// shapes for tool listing, tool calls and the initialize handshake.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Protocol revision reported during the initialize handshake
pub const MCP_VERSION: &str = "2024-11-05";

/// An incoming JSON-RPC request
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    /// Echoed back in the response so the client can match them up
    pub id: Value,
    pub method: String,
    pub params: Option<Value>,
}

/// The error half of a response
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Standard JSON-RPC error codes used by this server
pub mod error_codes {
    /// The request line was not valid JSON
    pub const PARSE_ERROR: i32 = -32700;
    /// The requested method is not one we handle
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// The method exists but its parameters are malformed
    pub const INVALID_PARAMS: i32 = -32602;
}

/// An outgoing JSON-RPC response
///
/// Exactly one of `result` and `error` is present; the absent one is
/// omitted from the serialized form entirely.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: i32, message: String, data: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError { code, message, data }),
        }
    }
}

/// Parameters of a tools/call request
#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    /// Tool arguments as loose JSON; each tool picks out what it needs
    #[serde(default)]
    pub arguments: HashMap<String, Value>,
}

/// One piece of content in a tool result (always text for this server)
#[derive(Debug, Serialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

/// What a tool call returns to the client
///
/// Tool failures are reported in-band with `is_error` rather than as
/// JSON-RPC errors, so the client still gets readable text.
#[derive(Debug, Serialize)]
pub struct ToolCallResult {
    pub content: Vec<ToolContent>,
    pub is_error: bool,
}

impl ToolCallResult {
    pub fn success(text: String) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text,
            }],
            is_error: false,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text: format!("Error: {}", message),
            }],
            is_error: true,
        }
    }
}

/// A tool advertised through tools/list
#[derive(Debug, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON schema describing the tool's arguments
    pub input_schema: Value,
}

/// Payload of a successful initialize response
#[derive(Debug, Serialize)]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {
    pub list_changed: bool,
}

#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_response_omits_error_key() {
        let response = JsonRpcResponse::success(json!(1), json!({"ok": true}));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["result"]["ok"], true);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_error_response_omits_result_key() {
        let response = JsonRpcResponse::error(
            json!(2),
            error_codes::METHOD_NOT_FOUND,
            "no such method".to_string(),
            None,
        );
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["error"]["code"], -32601);
        assert!(value.get("result").is_none());
        // data is also skipped when absent
        assert!(value["error"].get("data").is_none());
    }

    #[test]
    fn test_tool_result_wire_shape() {
        let result = ToolCallResult::error("boom".to_string());
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["is_error"], true);
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(value["content"][0]["text"], "Error: boom");
    }

    #[test]
    fn test_tool_call_params_default_arguments() {
        let params: ToolCallParams =
            serde_json::from_value(json!({"name": "habit_list"})).unwrap();

        assert_eq!(params.name, "habit_list");
        assert!(params.arguments.is_empty());
    }
}
