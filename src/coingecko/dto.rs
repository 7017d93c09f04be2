use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolData {
    pub id: String,
    pub address: String,
    pub name: String,
    pub network: String,
}

impl PoolData {
    pub fn fallback() -> Self {
        Self::default()
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCoin {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Option<u32>,
    pub thumb: String,
    pub large: String,
    pub data: SearchCoinData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCoinData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: f64,
}

// Passed through exactly as the provider sends it.
pub type TrendingCoin = Value;

// Provider wire types

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub coins: Vec<SearchHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchHit {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CoinMarket {
    pub id: String,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TrendingResponse {
    #[serde(default)]
    pub coins: Option<Vec<TrendingCoin>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PoolsResponse {
    #[serde(default)]
    pub data: Vec<PoolResource>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PoolResource {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub attributes: PoolAttributes,
    #[serde(default)]
    pub relationships: Option<PoolRelationships>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PoolAttributes {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PoolRelationships {
    #[serde(default)]
    pub network: Option<Relationship>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Relationship {
    #[serde(default)]
    pub data: Option<ResourceRef>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ResourceRef {
    #[serde(default)]
    pub id: String,
}

impl PoolResource {
    pub fn into_pool_data(self, requested_network: Option<&str>) -> PoolData {
        let related_network = self
            .relationships
            .and_then(|r| r.network)
            .and_then(|n| n.data)
            .map(|d| d.id)
            .filter(|id| !id.is_empty());
        let network = related_network
            .or_else(|| {
                requested_network
                    .filter(|n| !n.is_empty())
                    .map(str::to_string)
            })
            .or_else(|| self.id.split_once('_').map(|(prefix, _)| prefix.to_string()))
            .unwrap_or_default();

        PoolData {
            address: self.attributes.address.unwrap_or_default(),
            name: self.attributes.name.unwrap_or_default(),
            network,
            id: self.id,
        }
    }
}
