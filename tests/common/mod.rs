#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::Router;
use coinpulse::config::{CoinPulseConfig, ProviderConfig};
use coinpulse::MarketDataClient;

pub const API_KEY: &str = "test-api-key";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Option<String>,
    pub api_key: Option<String>,
    pub content_type: Option<String>,
}

/// In-process stand-in for the CoinGecko API that records every request it sees.
pub struct MockProvider {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockProvider {
    pub async fn start(routes: Router) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&requests);
        let app = routes.layer(middleware::from_fn(move |req: Request, next: Next| {
            let recorder = Arc::clone(&recorder);
            async move {
                let recorded = {
                    let header = |name: &str| {
                        req.headers()
                            .get(name)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string)
                    };
                    RecordedRequest {
                        path: req.uri().path().to_string(),
                        query: req.uri().query().map(str::to_string),
                        api_key: header("x-cg-pro-api-key"),
                        content_type: header("content-type"),
                    }
                };
                recorder.lock().unwrap().push(recorded);
                next.run(req).await
            }
        }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }

    pub fn config(&self) -> CoinPulseConfig {
        CoinPulseConfig::new(ProviderConfig::new(self.base_url.clone(), API_KEY))
    }

    pub fn client(&self) -> MarketDataClient {
        MarketDataClient::new(&self.config()).unwrap()
    }

    pub fn client_with_timeout(&self, timeout_secs: u64) -> MarketDataClient {
        let mut config = self.config();
        config.provider.timeout_secs = timeout_secs;
        MarketDataClient::new(&config).unwrap()
    }
}

/// Base URL of a port nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
