use anyhow::{Context, Result};
use coinpulse::http;
use coinpulse::mcp::{
    dto::{McpResponse, PARSE_ERROR},
    handle_request,
};
use coinpulse::{CoinPulseConfig, CoinPulseServer};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env for local dev (if present)
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    // Config comes first: its log level seeds the filter, RUST_LOG still wins
    let config = CoinPulseConfig::load().context("failed to load configuration")?;

    // Logs go to stderr so stdout stays a clean JSON-RPC channel
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if dotenv_loaded {
        tracing::info!("Loaded .env");
    }

    tracing::info!("Starting CoinPulse server");
    tracing::info!(
        "Configuration loaded: transport={}, port={}, provider={}",
        config.server.transport,
        config.server.port,
        config.provider.base_url
    );

    let server = CoinPulseServer::new(config.clone()).context("failed to build market data client")?;

    let tools = server.get_tools();
    tracing::info!("Available tools: {}", tools.len());
    for tool in tools {
        tracing::info!("  - {}: {}", tool.name, tool.description);
    }

    match config.server.transport.to_lowercase().as_str() {
        "http" => {
            tracing::info!(
                "CoinPulse running with HTTP transport on port {}",
                config.server.port
            );
            http::run_http_server(server, config.server.port).await?;
            Ok(())
        }
        _ => {
            tracing::info!("CoinPulse running with stdio transport");

            let stdin = io::stdin();
            let mut stdout = io::stdout();
            let mut reader = BufReader::new(stdin);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => break, // EOF
                    Ok(_) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }

                        tracing::debug!("Received: {}", line);

                        let response = match serde_json::from_str(line) {
                            Ok(request) => handle_request(&server, request).await,
                            Err(e) => {
                                tracing::error!("Failed to parse request: {}", e);
                                let mut response =
                                    McpResponse::failure(None, PARSE_ERROR, "Parse error");
                                if let Some(error) = response.error.as_mut() {
                                    error.data =
                                        Some(serde_json::json!({ "details": e.to_string() }));
                                }
                                response
                            }
                        };

                        let response_json = serde_json::to_string(&response)?;
                        tracing::debug!("Sending: {}", response_json);

                        stdout.write_all(response_json.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;
                    }
                    Err(e) => {
                        tracing::error!("Error reading from stdin: {}", e);
                        break;
                    }
                }
            }

            tracing::info!("CoinPulse shutting down");
            Ok(())
        }
    }
}
