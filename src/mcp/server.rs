/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin
/// 2. Processes tool calls using the wellness tracker
/// 3. Sends JSON-RPC responses to stdout

use std::collections::HashMap;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::mcp::protocol::*;
use crate::tools;
use crate::{ServerError, TrackerServer};

/// MCP server that handles communication with Claude
pub struct McpServer {
    /// The underlying tracker server
    tracker: TrackerServer,
    /// Whether the server has been initialized
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(tracker: TrackerServer) -> Self {
        Self {
            tracker,
            initialized: false,
        }
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            // Read one line from stdin
            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line) {
                        let response_str = serde_json::to_string(&response)?;

                        // Write response + newline
                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    json!(null),
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        Some(self.handle_request(request))
    }

    /// Handle a JSON-RPC request
    fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "initialized" => {
                self.initialized = true;
                JsonRpcResponse::success(request.id, json!(null))
            }
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request),
            _ => JsonRpcResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        }
    }

    /// Handle MCP initialization request
    fn handle_initialize(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Wellness Tracker MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        JsonRpcResponse::success(request.id, serde_json::to_value(result).unwrap())
    }

    /// Handle tools/list request
    fn handle_tools_list(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tools = vec![
            ToolDefinition {
                name: "habit_create".to_string(),
                description: "Create a new habit to track".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "name": {"type": "string", "description": "Name of the habit"},
                        "description": {"type": "string", "description": "Optional description"},
                        "target_per_week": {"type": "number", "description": "Completions aimed for per week (default 7)"},
                        "color": {"type": "string", "description": "Accent color hint, hex string (optional)"},
                        "icon": {"type": "string", "description": "Icon name hint (optional)"}
                    },
                    "required": ["name"]
                }),
            },
            ToolDefinition {
                name: "habit_log".to_string(),
                description: "Log a habit as completed or skipped for today or a specific date. Re-logging the same date overwrites the earlier state.".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "habit_id": {"type": "string", "description": "ID of the habit to log"},
                        "date": {"type": "string", "description": "Date (YYYY-MM-DD, optional - defaults to today)"},
                        "completed": {"type": "boolean", "description": "Whether the habit was completed (default: true)"},
                        "notes": {"type": "string", "description": "Optional notes about this day"}
                    },
                    "required": ["habit_id"]
                }),
            },
            ToolDefinition {
                name: "habit_list".to_string(),
                description: "List all habits with their weekly targets and completions over the current reporting window".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
            },
            ToolDefinition {
                name: "mood_log".to_string(),
                description: "Record the daily mood/energy/sleep check-in. One entry per day; logging again overwrites it.".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "date": {"type": "string", "description": "Date (YYYY-MM-DD, optional - defaults to today)"},
                        "mood_level": {"type": "number", "description": "Mood rating 1-5"},
                        "energy_level": {"type": "number", "description": "Energy rating 1-5"},
                        "sleep_hours": {"type": "number", "description": "Hours slept the night before"},
                        "notes": {"type": "string", "description": "Optional notes"}
                    },
                    "required": ["mood_level", "energy_level", "sleep_hours"]
                }),
            },
            ToolDefinition {
                name: "focus_log".to_string(),
                description: "Record a finished focus session".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "task_name": {"type": "string", "description": "What you were working on"},
                        "duration_minutes": {"type": "number", "description": "Session length in minutes"},
                        "date": {"type": "string", "description": "Date (YYYY-MM-DD, optional - defaults to today)"},
                        "completed": {"type": "boolean", "description": "Whether the session ran to completion (default: true)"}
                    },
                    "required": ["task_name", "duration_minutes"]
                }),
            },
            ToolDefinition {
                name: "weekly_report".to_string(),
                description: "Get the weekly analytics report: stats, insights, habit streaks and chart data over the last week".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "today": {"type": "string", "description": "Report as of this date instead of today (YYYY-MM-DD, optional)"}
                    },
                    "required": []
                }),
            },
        ];

        JsonRpcResponse::success(request.id, json!({"tools": tools}))
    }

    /// Handle tools/call request
    fn handle_tools_call(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match request.params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        request.id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid parameters: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    request.id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        let result = match tool_params.name.as_str() {
            "habit_create" => self.call_habit_create(tool_params.arguments),
            "habit_log" => self.call_habit_log(tool_params.arguments),
            "habit_list" => self.call_habit_list(),
            "mood_log" => self.call_mood_log(tool_params.arguments),
            "focus_log" => self.call_focus_log(tool_params.arguments),
            "weekly_report" => self.call_weekly_report(tool_params.arguments),
            _ => ToolCallResult::error(format!("Unknown tool: {}", tool_params.name)),
        };

        JsonRpcResponse::success(request.id, serde_json::to_value(result).unwrap())
    }

    // Argument extraction helpers

    fn arg_str(args: &HashMap<String, Value>, key: &str) -> Option<String> {
        args.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
    }

    fn arg_bool(args: &HashMap<String, Value>, key: &str) -> Option<bool> {
        args.get(key).and_then(|v| v.as_bool())
    }

    /// Extract an optional integer argument with a checked narrowing
    ///
    /// A present-but-unrepresentable value (negative, fractional, or too
    /// large for the target type) is an error; it must never wrap around
    /// into something validation would accept.
    fn arg_int<T: TryFrom<u64>>(
        args: &HashMap<String, Value>,
        key: &str,
    ) -> Result<Option<T>, String> {
        match args.get(key) {
            None => Ok(None),
            Some(v) => v
                .as_u64()
                .and_then(|n| T::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| format!("'{}' is out of range for this field", key)),
        }
    }

    /// Call the habit_create tool
    fn call_habit_create(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let target_per_week = match Self::arg_int(&args, "target_per_week") {
            Ok(target) => target,
            Err(message) => return ToolCallResult::error(message),
        };

        let create_params = tools::CreateHabitParams {
            name: Self::arg_str(&args, "name").unwrap_or_default(),
            description: Self::arg_str(&args, "description"),
            target_per_week,
            color: Self::arg_str(&args, "color"),
            icon: Self::arg_str(&args, "icon"),
        };

        match tools::create_habit(self.tracker.storage(), create_params) {
            Ok(response) => {
                let message = if let Some(habit_id) = &response.habit_id {
                    format!("{}\nHabit ID: {}", response.message, habit_id)
                } else {
                    response.message
                };
                ToolCallResult::success(message)
            }
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the habit_log tool
    fn call_habit_log(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let log_params = tools::LogHabitParams {
            habit_id: Self::arg_str(&args, "habit_id").unwrap_or_default(),
            date: Self::arg_str(&args, "date"),
            completed: Self::arg_bool(&args, "completed"),
            notes: Self::arg_str(&args, "notes"),
        };

        match tools::log_habit(self.tracker.storage(), log_params) {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the habit_list tool
    fn call_habit_list(&self) -> ToolCallResult {
        match tools::list_habits(self.tracker.storage()) {
            Ok(response) => {
                if response.habits.is_empty() {
                    ToolCallResult::success(
                        "No habits found. Create your first habit to get started!".to_string(),
                    )
                } else {
                    let lines = response
                        .habits
                        .iter()
                        .map(|h| {
                            format!(
                                "- {} ({}): {}/{} this week",
                                h.name, h.habit_id, h.completed_this_week, h.target_per_week
                            )
                        })
                        .collect::<Vec<_>>()
                        .join("\n");

                    ToolCallResult::success(format!(
                        "{} habit(s):\n{}",
                        response.habits.len(),
                        lines
                    ))
                }
            }
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the mood_log tool
    fn call_mood_log(&self, args: HashMap<String, Value>) -> ToolCallResult {
        // Missing levels fall through as 0 and fail domain validation
        let mood_level = match Self::arg_int::<u8>(&args, "mood_level") {
            Ok(level) => level.unwrap_or(0),
            Err(message) => return ToolCallResult::error(message),
        };
        let energy_level = match Self::arg_int::<u8>(&args, "energy_level") {
            Ok(level) => level.unwrap_or(0),
            Err(message) => return ToolCallResult::error(message),
        };

        let mood_params = tools::LogMoodParams {
            date: Self::arg_str(&args, "date"),
            mood_level,
            energy_level,
            sleep_hours: args
                .get("sleep_hours")
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0),
            notes: Self::arg_str(&args, "notes"),
        };

        match tools::log_mood(self.tracker.storage(), mood_params) {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the focus_log tool
    fn call_focus_log(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let duration_minutes = match Self::arg_int::<u32>(&args, "duration_minutes") {
            Ok(duration) => duration.unwrap_or(0),
            Err(message) => return ToolCallResult::error(message),
        };

        let focus_params = tools::LogFocusParams {
            task_name: Self::arg_str(&args, "task_name").unwrap_or_default(),
            duration_minutes,
            date: Self::arg_str(&args, "date"),
            completed: Self::arg_bool(&args, "completed"),
        };

        match tools::log_focus(self.tracker.storage(), focus_params) {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the weekly_report tool
    fn call_weekly_report(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let report_params = tools::ReportParams {
            today: Self::arg_str(&args, "today"),
        };

        match tools::weekly_report(self.tracker.storage(), report_params) {
            Ok(report) => match serde_json::to_string_pretty(&report) {
                Ok(json) => ToolCallResult::success(json),
                Err(e) => ToolCallResult::error(e.to_string()),
            },
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::NamedTempFile;

    // The NamedTempFile must be kept alive alongside the server; dropping it
    // deletes the database file out from under the open connection.
    async fn server() -> (McpServer, NamedTempFile) {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let tracker = TrackerServer::new(temp_file.path().to_path_buf())
            .await
            .expect("Failed to create server");
        (McpServer::new(tracker), temp_file)
    }

    fn tool_call(name: &str, arguments: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: json!(1),
            method: "tools/call".to_string(),
            params: Some(json!({"name": name, "arguments": arguments})),
        }
    }

    #[tokio::test]
    async fn test_oversized_target_rejected_not_wrapped() {
        let (mut server, _temp_file) = server().await;

        // u32::MAX + 6 must not wrap around to a small accepted target
        let request = tool_call(
            "habit_create",
            json!({"name": "Meditate", "target_per_week": 4_294_967_301u64}),
        );
        let response = server.handle_request(request);

        let result = response.result.expect("expected a tool result");
        assert_eq!(result["is_error"], true);

        let habits = tools::list_habits(server.tracker.storage()).unwrap();
        assert!(habits.habits.is_empty());
    }

    #[tokio::test]
    async fn test_oversized_mood_level_rejected() {
        let (mut server, _temp_file) = server().await;

        // 261 would pass validation as 5 if narrowed with a plain cast
        let request = tool_call(
            "mood_log",
            json!({"mood_level": 261, "energy_level": 3, "sleep_hours": 7.0}),
        );
        let response = server.handle_request(request);

        let result = response.result.expect("expected a tool result");
        assert_eq!(result["is_error"], true);
    }

    #[tokio::test]
    async fn test_negative_duration_rejected() {
        let (mut server, _temp_file) = server().await;

        let request = tool_call(
            "focus_log",
            json!({"task_name": "Deep work", "duration_minutes": -30}),
        );
        let response = server.handle_request(request);

        let result = response.result.expect("expected a tool result");
        assert_eq!(result["is_error"], true);
    }

    #[tokio::test]
    async fn test_in_range_target_accepted() {
        let (mut server, _temp_file) = server().await;

        let request = tool_call(
            "habit_create",
            json!({"name": "Meditate", "target_per_week": 5}),
        );
        let response = server.handle_request(request);

        let result = response.result.expect("expected a tool result");
        assert_eq!(result["is_error"], false);

        let habits = tools::list_habits(server.tracker.storage()).unwrap();
        assert_eq!(habits.habits[0].target_per_week, 5);
    }
}
