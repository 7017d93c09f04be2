use serde_json::json;

use crate::coingecko::MarketDataClient;
use crate::config::CoinPulseConfig;
use crate::error::Result;
use crate::mcp::{handle_request, McpRequest, McpResponse, Tool};
use crate::tools::MAX_SEARCH_LIMIT;

pub struct CoinPulseServer {
    config: CoinPulseConfig,
    market_data: MarketDataClient,
}

impl CoinPulseServer {
    pub fn new(config: CoinPulseConfig) -> Result<Self> {
        let market_data = MarketDataClient::new(&config)?;
        Ok(Self {
            config,
            market_data,
        })
    }

    pub fn config(&self) -> &CoinPulseConfig {
        &self.config
    }

    pub fn market_data(&self) -> &MarketDataClient {
        &self.market_data
    }

    pub fn get_tools(&self) -> Vec<Tool> {
        vec![
            Tool {
                name: "lookup_pool".to_string(),
                description: "Find the main liquidity pool for a coin, by token contract or by search".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "description": "Coin id or free-text pool search query" },
                        "network": { "type": "string", "description": "Onchain network id, e.g. eth or solana" },
                        "contract_address": { "type": "string", "description": "Token contract address on the network" }
                    }
                }),
            },
            Tool {
                name: "search_coins".to_string(),
                description: "Search coins by name or symbol, with USD price and 24h change".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "query": { "type": "string", "description": "Search text" },
                        "limit": {
                            "type": "integer",
                            "minimum": 1,
                            "maximum": MAX_SEARCH_LIMIT,
                            "description": "Maximum results (default 10)"
                        }
                    },
                    "required": ["query"]
                }),
            },
            Tool {
                name: "get_trending_coins".to_string(),
                description: "Coins currently trending on CoinGecko".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {}
                }),
            },
        ]
    }

    pub async fn handle_request(&self, request: McpRequest) -> McpResponse {
        handle_request(self, request).await
    }
}
