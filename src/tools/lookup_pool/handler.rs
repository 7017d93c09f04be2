use super::dto::{LookupPoolInput, LookupPoolOutput};
use crate::coingecko::MarketDataClient;
use crate::error::{CoinPulseError, Result};

pub async fn lookup_pool(
    client: &MarketDataClient,
    input: LookupPoolInput,
) -> Result<LookupPoolOutput> {
    let has_contract = matches!(
        (&input.network, &input.contract_address),
        (Some(n), Some(c)) if !n.is_empty() && !c.is_empty()
    );
    if input.id.trim().is_empty() && !has_contract {
        return Err(CoinPulseError::api_error(
            "id, or network and contract_address, are required",
        ));
    }

    let pool = client
        .lookup_pool(
            &input.id,
            input.network.as_deref(),
            input.contract_address.as_deref(),
        )
        .await;
    Ok(LookupPoolOutput { pool })
}
