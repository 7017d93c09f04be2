use serde::{Deserialize, Serialize};

use crate::coingecko::PoolData;

#[derive(Debug, Serialize, Deserialize)]
pub struct LookupPoolInput {
    #[serde(default)]
    pub id: String,
    pub network: Option<String>,
    pub contract_address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LookupPoolOutput {
    pub pool: PoolData,
}
