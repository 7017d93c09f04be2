use super::client::{MarketDataClient, DEFAULT_FRESHNESS};
use super::dto::{PoolData, PoolsResponse};
use super::query::QueryParams;
use crate::error::Result;

impl MarketDataClient {
    /// Never fails: any provider problem yields [`PoolData::fallback`].
    pub async fn lookup_pool(
        &self,
        id: &str,
        network: Option<&str>,
        contract_address: Option<&str>,
    ) -> PoolData {
        let network = network.filter(|n| !n.is_empty());
        let contract_address = contract_address.filter(|c| !c.is_empty());

        let result = match (network, contract_address) {
            (Some(network), Some(contract)) => self.token_pools(network, contract).await,
            _ => self.search_pools(id).await,
        };

        match result {
            Ok(pool) => pool.unwrap_or_else(PoolData::fallback),
            Err(e) => {
                tracing::warn!(id, ?network, ?contract_address, "Pool lookup failed: {}", e);
                PoolData::fallback()
            }
        }
    }

    async fn token_pools(&self, network: &str, contract: &str) -> Result<Option<PoolData>> {
        let endpoint = format!(
            "/onchain/networks/{}/tokens/{}/pools",
            urlencoding::encode(network),
            urlencoding::encode(contract)
        );
        let response: PoolsResponse = self.fetch_resource(&endpoint, None, DEFAULT_FRESHNESS).await?;
        Ok(response
            .data
            .into_iter()
            .next()
            .map(|pool| pool.into_pool_data(Some(network))))
    }

    async fn search_pools(&self, query: &str) -> Result<Option<PoolData>> {
        let params = QueryParams::new().with("query", query);
        let response: PoolsResponse = self
            .fetch_resource("/onchain/search/pools", Some(&params), DEFAULT_FRESHNESS)
            .await?;
        Ok(response
            .data
            .into_iter()
            .next()
            .map(|pool| pool.into_pool_data(None)))
    }
}
