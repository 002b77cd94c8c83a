//! roster mcp - MCP (Model Context Protocol) server mode
//!
//! Exposes search, chat, ingest and health as MCP tools over stdio
//! (JSON-RPC 2.0, one message per line).
//!
//! Responses must always be valid JSON without terminal styling, so every
//! tool payload passes through [`sanitize_mcp_output`] before it is sent.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_json};
use crate::error::{Result, RosterError};

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "roster";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Args, Debug)]
pub struct McpArgs {
    #[command(subcommand)]
    pub command: McpCommand,
}

#[derive(Subcommand, Debug)]
pub enum McpCommand {
    /// Start MCP server with stdio transport
    Serve(ServeArgs),
    /// List available MCP tools
    Tools,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Echo traffic to stderr
    #[arg(long)]
    pub debug: bool,
}

// ============================================================================
// Output safety
// ============================================================================

/// Remove ANSI escape sequences (CSI, OSC, and two-byte escapes).
#[must_use]
pub fn strip_ansi(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('[') => {
                // CSI ends at the first byte in 0x40..=0x7E
                for ch in chars.by_ref() {
                    if ('\x40'..='\x7e').contains(&ch) {
                        break;
                    }
                }
            }
            Some(']') => {
                // OSC ends at BEL or ESC \
                while let Some(ch) = chars.next() {
                    if ch == '\x07' {
                        break;
                    }
                    if ch == '\x1b' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    out
}

#[must_use]
pub fn contains_ansi(s: &str) -> bool {
    s.contains('\x1b')
}

#[must_use]
pub fn sanitize_mcp_output(s: &str) -> String {
    if contains_ansi(s) {
        warn!("MCP payload contained ANSI codes; stripping");
        strip_ansi(s)
    } else {
        s.to_string()
    }
}

fn serialize_response(response: &JsonRpcResponse) -> String {
    match serde_json::to_string(response) {
        Ok(json) => sanitize_mcp_output(&json),
        Err(err) => {
            warn!(error = %err, "failed to serialize JSON-RPC response");
            format!(
                r#"{{"jsonrpc":"2.0","error":{{"code":{INTERNAL_ERROR},"message":"Serialization failed"}}}}"#
            )
        }
    }
}

// ============================================================================
// JSON-RPC 2.0
// ============================================================================

#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

impl JsonRpcResponse {
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Option<Value>, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError { code, message }),
        }
    }
}

const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

// ============================================================================
// MCP types
// ============================================================================

#[derive(Debug, Serialize)]
struct Tool {
    name: &'static str,
    description: &'static str,
    #[serde(rename = "inputSchema")]
    input_schema: Value,
}

#[derive(Debug, Serialize)]
struct ToolResult {
    content: Vec<ToolContent>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
struct ToolContent {
    #[serde(rename = "type")]
    content_type: &'static str,
    text: String,
}

impl ToolResult {
    fn text(text: &str) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text",
                text: sanitize_mcp_output(text),
            }],
            is_error: None,
        }
    }

    fn json(value: &Value) -> Result<Self> {
        Ok(Self::text(&serde_json::to_string_pretty(value)?))
    }

    fn error(message: &str) -> Self {
        Self {
            is_error: Some(true),
            ..Self::text(message)
        }
    }
}

fn define_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "employees_search",
            description: "Rank employee profiles against a staffing query",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "q": {"type": "string", "description": "Staffing query"},
                    "k": {"type": "integer", "description": "Number of profiles", "default": 5, "minimum": 0}
                },
                "required": ["q"]
            }),
        },
        Tool {
            name: "chat",
            description: "Recommend the best matches for a staffing query with rationale",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Staffing query"},
                    "k": {"type": "integer", "description": "Candidates to consider", "default": 5, "minimum": 0}
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: "ingest",
            description: "Upsert profiles from a .json or .csv file on the server host",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "path": {"type": "string", "description": "Path to the profile file"}
                },
                "required": ["path"]
            }),
        },
        Tool {
            name: "health",
            description: "Service liveness and provider reachability",
            input_schema: json!({"type": "object", "properties": {}}),
        },
    ]
}

// ============================================================================
// Server
// ============================================================================

pub fn run(ctx: &AppContext, args: &McpArgs) -> Result<()> {
    match &args.command {
        McpCommand::Serve(serve) => run_stdio_server(ctx, serve.debug),
        McpCommand::Tools => run_tools(ctx),
    }
}

fn run_tools(ctx: &AppContext) -> Result<()> {
    let tools = define_tools();
    if ctx.output_format == OutputFormat::Human {
        println!("Available MCP tools:\n");
        for tool in &tools {
            println!("  {} - {}", tool.name, tool.description);
        }
        Ok(())
    } else {
        emit_json(&json!({"tools": tools, "count": tools.len()}))
    }
}

fn run_stdio_server(ctx: &AppContext, debug: bool) -> Result<()> {
    if debug {
        eprintln!("[roster-mcp] {SERVER_NAME} v{SERVER_VERSION}, protocol {PROTOCOL_VERSION}");
    }
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, "stdin read failed; stopping MCP server");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        if debug {
            eprintln!("[roster-mcp] <- {line}");
        }

        let Some(response) = handle_request(ctx, &line) else {
            continue;
        };
        let payload = serialize_response(&response);
        if debug {
            eprintln!("[roster-mcp] -> {payload}");
        }
        if writeln!(stdout, "{payload}").is_err() {
            break;
        }
        let _ = stdout.flush();
    }
    debug!("MCP server shutting down");
    Ok(())
}

/// Handle one request line. `None` for notifications.
fn handle_request(ctx: &AppContext, line: &str) -> Option<JsonRpcResponse> {
    let request: JsonRpcRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(err) => {
            return Some(JsonRpcResponse::error(
                None,
                PARSE_ERROR,
                format!("Parse error: {err}"),
            ));
        }
    };

    if request.jsonrpc != "2.0" {
        return Some(JsonRpcResponse::error(
            request.id,
            INVALID_REQUEST,
            "Invalid JSON-RPC version".to_string(),
        ));
    }

    let id = request.id;
    match request.method.as_str() {
        "initialize" => Some(JsonRpcResponse::success(id, initialize_result())),
        "initialized" | "notifications/initialized" => {
            id.map(|id| JsonRpcResponse::success(Some(id), json!({})))
        }
        "tools/list" => Some(JsonRpcResponse::success(id, json!({"tools": define_tools()}))),
        "tools/call" => Some(handle_tools_call(ctx, id, &request.params)),
        "ping" | "shutdown" => Some(JsonRpcResponse::success(id, json!({}))),
        "resources/list" => Some(JsonRpcResponse::success(id, json!({"resources": []}))),
        _ if id.is_none() => None,
        other => Some(JsonRpcResponse::error(
            id,
            METHOD_NOT_FOUND,
            format!("Method not found: {other}"),
        )),
    }
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {"tools": {"listChanged": false}},
        "serverInfo": {"name": SERVER_NAME, "version": SERVER_VERSION}
    })
}

fn handle_tools_call(ctx: &AppContext, id: Option<Value>, params: &Value) -> JsonRpcResponse {
    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return JsonRpcResponse::error(
            id,
            INVALID_PARAMS,
            "Missing required parameter: name".to_string(),
        );
    };
    let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));
    debug!(tool = name, "MCP tool call");

    let result = match name {
        "employees_search" => tool_search(ctx, &arguments),
        "chat" => tool_chat(ctx, &arguments),
        "ingest" => tool_ingest(ctx, &arguments),
        "health" => tool_health(ctx),
        _ => Err(RosterError::ValidationFailed(format!("Unknown tool: {name}"))),
    };

    let tool_result = result.unwrap_or_else(|err| ToolResult::error(&err.to_string()));
    match serde_json::to_value(tool_result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(err) => JsonRpcResponse::error(id, INTERNAL_ERROR, err.to_string()),
    }
}

// ============================================================================
// Tool handlers
// ============================================================================

fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| RosterError::ValidationFailed(format!("Missing required parameter: {key}")))
}

fn k_arg(ctx: &AppContext, args: &Value) -> usize {
    args.get("k")
        .and_then(Value::as_u64)
        .and_then(|k| usize::try_from(k).ok())
        .unwrap_or(ctx.config.search.default_k)
}

fn expand_tilde(input: &str) -> PathBuf {
    match (input.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(input),
    }
}

fn tool_search(ctx: &AppContext, args: &Value) -> Result<ToolResult> {
    let query = required_str(args, "q")?;
    let ranking = ctx.engine()?.search_scored(query, k_arg(ctx, args));
    ToolResult::json(&json!({
        "query": query,
        "path": ranking.path,
        "results": ranking.profiles(),
    }))
}

fn tool_chat(ctx: &AppContext, args: &Value) -> Result<ToolResult> {
    let query = required_str(args, "query")?;
    let answer = ctx.engine()?.answer(query, k_arg(ctx, args));
    ToolResult::json(&json!({
        "answer": answer.text,
        "candidates": answer.candidates,
        "generated": answer.generated,
    }))
}

fn tool_ingest(ctx: &AppContext, args: &Value) -> Result<ToolResult> {
    let path = expand_tilde(required_str(args, "path")?);
    let outcome = ctx.ingest_file(&path)?;
    ToolResult::json(&serde_json::to_value(outcome)?)
}

fn tool_health(ctx: &AppContext) -> Result<ToolResult> {
    ToolResult::json(&serde_json::to_value(super::health::check(ctx))?)
}
