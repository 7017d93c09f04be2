use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::dto::{
    McpRequest, McpResponse, ToolCall, ToolResult, INTERNAL_ERROR, INVALID_PARAMS,
    METHOD_NOT_FOUND,
};
use crate::error::CoinPulseError;
use crate::server::CoinPulseServer;
use crate::tools::{
    get_trending_coins, lookup_pool, search_coins, GetTrendingCoinsInput, LookupPoolInput,
    SearchCoinsInput,
};

pub async fn handle_request(server: &CoinPulseServer, request: McpRequest) -> McpResponse {
    match request.method.as_str() {
        "tools/list" => McpResponse::success(request.id, json!({ "tools": server.get_tools() })),
        "tools/call" => {
            let Some(params) = request.params else {
                return McpResponse::failure(request.id, INVALID_PARAMS, "Missing parameters");
            };
            let Ok(tool_call) = serde_json::from_value::<ToolCall>(params) else {
                return McpResponse::failure(
                    request.id,
                    INVALID_PARAMS,
                    "Invalid tool call parameters",
                );
            };
            match handle_tool_call(server, tool_call).await {
                Ok(result) => McpResponse::success(
                    request.id,
                    json!({
                        "content": [
                            { "type": "text", "text": result.content }
                        ],
                        "isError": result.is_error
                    }),
                ),
                Err(e @ CoinPulseError::ApiError(_)) => {
                    McpResponse::failure(request.id, INVALID_PARAMS, e.to_string())
                }
                Err(e) => McpResponse::failure(
                    request.id,
                    INTERNAL_ERROR,
                    format!("Tool execution failed: {}", e),
                ),
            }
        }
        "initialize" => McpResponse::success(
            request.id,
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": { "tools": {} },
                "serverInfo": { "name": "coinpulse", "version": env!("CARGO_PKG_VERSION") }
            }),
        ),
        "ping" => McpResponse::success(request.id, json!({ "ok": true })),
        _ => McpResponse::failure(
            request.id,
            METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        ),
    }
}

pub(crate) async fn handle_tool_call(
    server: &CoinPulseServer,
    tool_call: ToolCall,
) -> Result<ToolResult, CoinPulseError> {
    tracing::info!("Handling tool call: {}", tool_call.name);
    let client = server.market_data();
    let result = match tool_call.name.as_str() {
        "lookup_pool" => {
            let input: LookupPoolInput = parse_arguments(tool_call.arguments)?;
            serde_json::to_value(lookup_pool(client, input).await?)?
        }
        "search_coins" => {
            let input: SearchCoinsInput = parse_arguments(tool_call.arguments)?;
            serde_json::to_value(search_coins(client, input).await?)?
        }
        "get_trending_coins" => {
            let input: GetTrendingCoinsInput = match tool_call.arguments {
                Value::Null => GetTrendingCoinsInput::default(),
                other => parse_arguments(other)?,
            };
            serde_json::to_value(get_trending_coins(client, input).await?)?
        }
        other => {
            return Err(CoinPulseError::api_error(format!("Unknown tool: {}", other)));
        }
    };

    Ok(ToolResult {
        content: serde_json::to_string_pretty(&result)?,
        is_error: false,
    })
}

fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, CoinPulseError> {
    serde_json::from_value(arguments)
        .map_err(|e| CoinPulseError::api_error(format!("Invalid arguments: {}", e)))
}
