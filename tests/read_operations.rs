mod common;

use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use coinpulse::config::{CoinPulseConfig, ProviderConfig};
use coinpulse::{MarketDataClient, PoolData};
use common::{unreachable_base_url, MockProvider, API_KEY};
use serde_json::json;

fn search_router() -> Router {
    Router::new()
        .route(
            "/search",
            get(|| async {
                Json(json!({
                    "coins": [
                        { "id": "solana", "name": "Solana", "api_symbol": "solana", "symbol": "SOL",
                          "market_cap_rank": 5, "thumb": "sol-thumb.png", "large": "sol-large.png" },
                        { "id": "solana-name-service", "name": "Solana Name Service", "symbol": "SNS",
                          "market_cap_rank": 1900, "thumb": "sns-thumb.png", "large": "sns-large.png" },
                        { "id": "wrapped-solana", "name": "Wrapped SOL", "symbol": "SOL",
                          "market_cap_rank": null, "thumb": "w-thumb.png", "large": "w-large.png" }
                    ],
                    "exchanges": [],
                    "categories": []
                }))
            }),
        )
        .route(
            "/coins/markets",
            get(|| async {
                // Market-cap order, which differs from search order.
                Json(json!([
                    { "id": "solana-name-service", "current_price": 0.02,
                      "price_change_percentage_24h": -4.2 },
                    { "id": "solana", "current_price": 148.31,
                      "price_change_percentage_24h": 2.75 }
                ]))
            }),
        )
}

#[tokio::test]
async fn blank_queries_never_touch_the_network() {
    let provider = MockProvider::start(search_router()).await;
    let client = provider.client();

    assert!(client.search_coins("", 10).await.is_empty());
    assert!(client.search_coins("   ", 10).await.is_empty());
    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn search_keeps_search_order_and_enriches() {
    let provider = MockProvider::start(search_router()).await;
    let coins = provider.client().search_coins("sol", 10).await;

    let ids: Vec<_> = coins.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["solana", "solana-name-service", "wrapped-solana"]);

    assert_eq!(coins[0].symbol, "SOL");
    assert_eq!(coins[0].market_cap_rank, Some(5));
    assert_eq!(coins[0].data.price, Some(148.31));
    assert_eq!(coins[0].data.price_change_percentage_24h, 2.75);
    assert_eq!(coins[1].data.price_change_percentage_24h, -4.2);

    // No market record for this one.
    assert_eq!(coins[2].market_cap_rank, None);
    assert_eq!(coins[2].data.price, None);
    assert_eq!(coins[2].data.price_change_percentage_24h, 0.0);
}

#[tokio::test]
async fn search_respects_limit_and_requests_matching_markets() {
    let provider = MockProvider::start(search_router()).await;
    let coins = provider.client().search_coins("sol", 2).await;
    assert_eq!(coins.len(), 2);
    assert_eq!(coins[0].id, "solana");

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path, "/search");
    assert_eq!(requests[0].query.as_deref(), Some("query=sol"));
    assert_eq!(requests[1].path, "/coins/markets");
    assert_eq!(
        requests[1].query.as_deref(),
        Some(
            "ids=solana%2Csolana-name-service&order=market_cap_desc&page=1&per_page=2\
             &price_change_percentage=24h&sparkline=false&vs_currency=usd"
        )
    );
}

#[tokio::test]
async fn search_without_matches_skips_markets() {
    let provider = MockProvider::start(
        Router::new().route("/search", get(|| async { Json(json!({ "coins": [] })) })),
    )
    .await;

    assert!(provider.client().search_coins("zzzz", 10).await.is_empty());
    assert_eq!(provider.hits("/coins/markets"), 0);
}

#[tokio::test]
async fn search_failures_become_empty_lists() {
    let provider = MockProvider::start(
        Router::new()
            .route(
                "/search",
                get(|| async { Json(json!({ "coins": [{ "id": "bitcoin", "name": "Bitcoin" }] })) }),
            )
            .route(
                "/coins/markets",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "boom" }))) }),
            ),
    )
    .await;
    assert!(provider.client().search_coins("btc", 10).await.is_empty());

    let provider =
        MockProvider::start(Router::new().route("/search", get(|| async { "{ not json" }))).await;
    assert!(provider.client().search_coins("btc", 10).await.is_empty());
}

#[tokio::test]
async fn search_timeout_becomes_empty_list() {
    let provider = MockProvider::start(Router::new().route(
        "/search",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "coins": [] }))
        }),
    ))
    .await;

    assert!(provider.client_with_timeout(1).search_coins("btc", 10).await.is_empty());
}

#[tokio::test]
async fn lookup_by_contract_returns_first_pool() {
    let provider = MockProvider::start(Router::new().route(
        "/onchain/networks/eth/tokens/0xa0b8/pools",
        get(|| async {
            Json(json!({
                "data": [
                    { "id": "eth_0x88e6", "type": "pool",
                      "attributes": { "address": "0x88e6", "name": "USDC / WETH 0.05%" },
                      "relationships": { "network": { "data": { "id": "eth", "type": "network" } } } },
                    { "id": "eth_0x8ad5", "type": "pool",
                      "attributes": { "address": "0x8ad5", "name": "USDC / WETH 0.3%" } }
                ]
            }))
        }),
    ))
    .await;

    let pool = provider
        .client()
        .lookup_pool("usd-coin", Some("eth"), Some("0xa0b8"))
        .await;
    assert_eq!(
        pool,
        PoolData {
            id: "eth_0x88e6".into(),
            address: "0x88e6".into(),
            name: "USDC / WETH 0.05%".into(),
            network: "eth".into(),
        }
    );
    assert_eq!(provider.hits("/onchain/search/pools"), 0);
}

#[tokio::test]
async fn lookup_by_contract_with_no_pools_is_fallback() {
    let provider = MockProvider::start(Router::new().route(
        "/onchain/networks/eth/tokens/0xdead/pools",
        get(|| async { Json(json!({ "data": [] })) }),
    ))
    .await;

    let pool = provider
        .client()
        .lookup_pool("dead", Some("eth"), Some("0xdead"))
        .await;
    assert_eq!(pool, PoolData::fallback());
}

#[tokio::test]
async fn lookup_by_id_uses_pool_search() {
    let provider = MockProvider::start(Router::new().route(
        "/onchain/search/pools",
        get(|| async {
            Json(json!({
                "data": [
                    { "id": "solana_58oQ", "type": "pool",
                      "attributes": { "address": "58oQ", "name": "SOL / USDC" } }
                ]
            }))
        }),
    ))
    .await;

    let pool = provider.client().lookup_pool("solana", None, None).await;
    assert_eq!(pool.address, "58oQ");
    assert_eq!(pool.network, "solana");

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/onchain/search/pools");
    assert_eq!(requests[0].query.as_deref(), Some("query=solana"));

    // Only one of network/contract is not enough for the contract route.
    let _ = provider.client().lookup_pool("solana", Some("solana"), None).await;
    assert_eq!(provider.hits("/onchain/search/pools"), 2);
}

#[tokio::test]
async fn lookup_failures_return_fallback() {
    let provider = MockProvider::start(
        Router::new()
            .route(
                "/onchain/search/pools",
                get(|| async { (StatusCode::TOO_MANY_REQUESTS, Json(json!({ "status": { "error_code": 429 } }))) }),
            )
            .route(
                "/onchain/networks/eth/tokens/0xabc/pools",
                get(|| async { "garbage" }),
            ),
    )
    .await;
    let client = provider.client();

    assert!(client.lookup_pool("bitcoin", None, None).await.is_fallback());
    assert!(client
        .lookup_pool("bitcoin", Some("eth"), Some("0xabc"))
        .await
        .is_fallback());

    let config = CoinPulseConfig::new(ProviderConfig::new(unreachable_base_url().await, API_KEY));
    let offline = MarketDataClient::new(&config).unwrap();
    assert!(offline.lookup_pool("bitcoin", None, None).await.is_fallback());
}

#[tokio::test]
async fn lookup_timeout_returns_fallback() {
    let provider = MockProvider::start(Router::new().route(
        "/onchain/search/pools",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "data": [] }))
        }),
    ))
    .await;

    let pool = provider
        .client_with_timeout(1)
        .lookup_pool("bitcoin", None, None)
        .await;
    assert!(pool.is_fallback());
}

#[tokio::test]
async fn only_empty_network_or_contract_counts_as_absent() {
    let provider = MockProvider::start(
        Router::new()
            .route("/onchain/search/pools", get(|| async { Json(json!({ "data": [] })) }))
            .route(
                "/onchain/networks/:network/tokens/:contract/pools",
                get(|| async { Json(json!({ "data": [] })) }),
            ),
    )
    .await;
    let client = provider.client();

    client.lookup_pool("usd-coin", Some(""), Some("0xa0b8")).await;
    assert_eq!(provider.hits("/onchain/search/pools"), 1);

    client.lookup_pool("usd-coin", Some(" "), Some("0xa0b8")).await;
    assert_eq!(provider.hits("/onchain/search/pools"), 1);
    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[1].path.starts_with("/onchain/networks/"));
}

#[tokio::test]
async fn trending_passes_coins_through() {
    let provider = MockProvider::start(Router::new().route(
        "/search/trending",
        get(|| async {
            Json(json!({
                "coins": [
                    { "item": { "id": "pepe", "name": "Pepe", "symbol": "PEPE", "score": 0,
                                "data": { "price": 0.0000091, "price_change_percentage_24h": { "usd": 12.3 } } } }
                ],
                "nfts": []
            }))
        }),
    ))
    .await;

    let coins = provider.client().get_trending_coins().await;
    assert_eq!(coins.len(), 1);
    assert_eq!(coins[0]["item"]["id"], "pepe");
    assert_eq!(coins[0]["item"]["data"]["price_change_percentage_24h"]["usd"], 12.3);
}

#[tokio::test]
async fn trending_without_coins_field_is_empty() {
    let provider = MockProvider::start(
        Router::new().route("/search/trending", get(|| async { Json(json!({ "nfts": [] })) })),
    )
    .await;

    assert!(provider.client().get_trending_coins().await.is_empty());
}

#[tokio::test]
async fn trending_malformed_body_is_empty() {
    let provider = MockProvider::start(
        Router::new().route("/search/trending", get(|| async { "{ not json" })),
    )
    .await;

    assert!(provider.client().get_trending_coins().await.is_empty());
}

#[tokio::test]
async fn trending_failures_become_empty_lists() {
    let provider = MockProvider::start(Router::new().route(
        "/search/trending",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "oops") }),
    ))
    .await;
    assert!(provider.client().get_trending_coins().await.is_empty());

    let provider = MockProvider::start(Router::new().route(
        "/search/trending",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "coins": [] }))
        }),
    ))
    .await;
    assert!(provider.client_with_timeout(1).get_trending_coins().await.is_empty());
}

#[tokio::test]
async fn trending_is_cached_between_calls() {
    let provider = MockProvider::start(
        Router::new().route("/search/trending", get(|| async { Json(json!({ "coins": [] })) })),
    )
    .await;
    let client = provider.client();

    client.get_trending_coins().await;
    client.get_trending_coins().await;
    assert_eq!(provider.hits("/search/trending"), 1);
}
