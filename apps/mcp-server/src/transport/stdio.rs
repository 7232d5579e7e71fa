//! Standard I/O transport for MCP
//!
//! This module implements the stdio transport for the MCP server,
//! allowing communication via standard input/output streams.
//!
//! IMPORTANT: All logging MUST go to stderr. stdout is reserved for
//! JSON-RPC protocol messages only.

use std::collections::HashMap;
use std::io::{BufRead, Write};

use serde_json::{json, Value};

use crate::error::ServerError;
use crate::mcp::protocol::*;
use crate::mcp::{prompts, resources, tools, MutaDocServer};

const PROTOCOL_VERSION: &str = "2024-11-05";

/// Largest body a single frame may declare
const MAX_FRAME_BYTES: usize = 16 * 1024 * 1024;

/// Run the MCP server using stdio transport
pub async fn run_stdio_server(server: MutaDocServer) -> Result<(), ServerError> {
    tracing::info!(timeout_ms = server.timeout_ms(), "Starting stdio transport");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    serve(&server, &mut stdin.lock(), &mut stdout.lock()).await
}

/// Read framed requests until EOF, answering each on `writer`
pub async fn serve<R: BufRead, W: Write>(
    server: &MutaDocServer,
    reader: &mut R,
    writer: &mut W,
) -> Result<(), ServerError> {
    loop {
        let request = match read_message(reader) {
            Ok(Some(req)) => req,
            Ok(None) => {
                tracing::info!("EOF reached, shutting down");
                break;
            }
            Err(ServerError::IoError(e)) => {
                tracing::error!("Input stream failed: {}", e);
                return Err(ServerError::IoError(e));
            }
            Err(e) => {
                tracing::error!("Failed to read message: {}", e);
                let response = JsonRpcResponse::error(None, e.code(), e.to_string());
                if let Err(e) = write_message(writer, &response) {
                    tracing::error!("Failed to write response: {}", e);
                }
                continue;
            }
        };

        tracing::debug!(method = %request.method, "Received request");

        // Notifications get no reply
        let Some(response) = handle_request(server, request).await else {
            continue;
        };

        if let Err(e) = write_message(writer, &response) {
            tracing::error!("Failed to write response: {}", e);
        }
    }

    Ok(())
}

/// Read a JSON-RPC message from the input stream
fn read_message<R: BufRead>(reader: &mut R) -> Result<Option<JsonRpcRequest>, ServerError> {
    // Headers end at the first blank line; only Content-Length matters
    let mut content_length: Option<usize> = None;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 {
            return Ok(None); // EOF
        }

        let header = header.trim();
        if header.is_empty() {
            if content_length.is_some() {
                break;
            }
            continue;
        }

        match header.split_once(':') {
            Some((key, value)) if key.trim().eq_ignore_ascii_case("Content-Length") => {
                let length = value.trim().parse().map_err(|_| {
                    ServerError::ProtocolError(format!("Invalid Content-Length: {}", value.trim()))
                })?;
                content_length = Some(length);
            }
            Some(_) => {}
            None => {
                return Err(ServerError::ProtocolError(format!(
                    "Expected Content-Length header, got: {}",
                    header
                )));
            }
        }
    }

    let length = content_length.unwrap_or_default();
    if length > MAX_FRAME_BYTES {
        return Err(ServerError::ProtocolError(format!(
            "Frame too large: {} bytes (limit {})",
            length, MAX_FRAME_BYTES
        )));
    }

    let mut body = vec![0u8; length];
    reader.read_exact(&mut body)?;

    let request: JsonRpcRequest = serde_json::from_slice(&body)?;
    Ok(Some(request))
}

/// Write a JSON-RPC message to the output stream
fn write_message<W: Write>(writer: &mut W, response: &JsonRpcResponse) -> Result<(), ServerError> {
    let body = serde_json::to_string(response)?;
    let header = format!("Content-Length: {}\r\n\r\n", body.len());

    writer.write_all(header.as_bytes())?;
    writer.write_all(body.as_bytes())?;
    writer.flush()?;

    Ok(())
}

/// Handle a JSON-RPC request. Returns `None` for notifications.
async fn handle_request(
    server: &MutaDocServer,
    request: JsonRpcRequest,
) -> Option<JsonRpcResponse> {
    if request.is_notification() {
        tracing::debug!(method = %request.method, "Notification");
        return None;
    }
    let id = request.id.clone();

    let response = match request.method.as_str() {
        "initialize" => handle_initialize(id, server),
        "initialized" | "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => handle_list_tools(id),
        "tools/call" => handle_call_tool(id, server, request.params).await,
        "resources/list" => handle_list_resources(id, server),
        "resources/read" => handle_read_resource(id, server, request.params),
        "prompts/list" => handle_list_prompts(id),
        "prompts/get" => handle_get_prompt(id, request.params),
        _ => JsonRpcResponse::error(id, -32601, format!("Method not found: {}", request.method)),
    };
    Some(response)
}

fn handle_initialize(id: Option<Value>, server: &MutaDocServer) -> JsonRpcResponse {
    let result = InitializeResult {
        protocol_version: PROTOCOL_VERSION.to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {
                list_changed: Some(false),
            }),
            resources: Some(ResourcesCapability {
                subscribe: Some(false),
                list_changed: Some(false),
            }),
            prompts: Some(PromptsCapability {
                list_changed: Some(false),
            }),
        },
        server_info: ServerInfo {
            name: server.name().to_string(),
            version: server.version().to_string(),
        },
    };

    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, -32603, e.to_string()),
    }
}

fn handle_list_tools(id: Option<Value>) -> JsonRpcResponse {
    let tools = tools::get_tool_definitions();
    JsonRpcResponse::success(id, json!({ "tools": tools }))
}

async fn handle_call_tool(
    id: Option<Value>,
    server: &MutaDocServer,
    params: Value,
) -> JsonRpcResponse {
    let name = params.get("name").and_then(|v| v.as_str()).unwrap_or("");
    let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

    match tools::handle_tool_call(server, name, arguments).await {
        Ok(content) => JsonRpcResponse::success(
            id,
            json!({
                "content": content,
                "isError": false
            }),
        ),
        Err(e) => {
            tracing::warn!(tool = name, error = %e, "Tool call failed");
            JsonRpcResponse::success(
                id,
                json!({
                    "content": [{"type": "text", "text": format!("Error: {}", e)}],
                    "isError": true
                }),
            )
        }
    }
}

fn handle_list_resources(id: Option<Value>, server: &MutaDocServer) -> JsonRpcResponse {
    let resources = resources::get_resource_definitions(server);
    JsonRpcResponse::success(id, json!({ "resources": resources }))
}

fn handle_read_resource(
    id: Option<Value>,
    server: &MutaDocServer,
    params: Value,
) -> JsonRpcResponse {
    let uri = params.get("uri").and_then(|v| v.as_str()).unwrap_or("");

    match resources::read_resource(server, uri) {
        Ok(content) => JsonRpcResponse::success(id, json!({ "contents": [content] })),
        Err(e) => JsonRpcResponse::error(id, e.code(), e.to_string()),
    }
}

fn handle_list_prompts(id: Option<Value>) -> JsonRpcResponse {
    let prompts = prompts::get_prompt_definitions();
    JsonRpcResponse::success(id, json!({ "prompts": prompts }))
}

fn handle_get_prompt(id: Option<Value>, params: Value) -> JsonRpcResponse {
    let name = params.get("name").and_then(|v| v.as_str()).unwrap_or("");

    let arguments: HashMap<String, String> = params
        .get("arguments")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default();

    match prompts::get_prompt(name, arguments) {
        Ok(messages) => JsonRpcResponse::success(id, json!({ "messages": messages })),
        Err(e) => JsonRpcResponse::error(id, e.code(), e.to_string()),
    }
}
