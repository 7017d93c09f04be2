use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoinPulseError>;

pub const PLAN_REQUIRED_ERROR_CODE: i64 = 10011;

pub const PLAN_REQUIRED_MESSAGE: &str = "OHLC data requires a paid CoinGecko API plan. Demo API keys do not have access to this endpoint.";

#[derive(Error, Debug)]
pub enum CoinPulseError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("{}", PLAN_REQUIRED_MESSAGE)]
    PlanRequired,

    #[error("{message}")]
    ProviderError { status: u16, message: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoinPulseError {
    pub fn api_error(msg: impl Into<String>) -> Self {
        CoinPulseError::ApiError(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        CoinPulseError::ConfigError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        CoinPulseError::Internal(msg.into())
    }

    pub fn provider(status: u16, message: impl Into<String>) -> Self {
        CoinPulseError::ProviderError {
            status,
            message: message.into(),
        }
    }
}
