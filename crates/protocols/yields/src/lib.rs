//! yields: informational market data for the deposit view
//!
//! Fetches the public pool list, filters for the lending market the vault
//! deploys into (Aave v3 on Avalanche), and aggregates a TVL-weighted APY.
//! Purely informational: a failure here never gates a transaction, and
//! these floats never touch amount math.

use serde::{Deserialize, Serialize};
use yieldcoin_core::{Error, Result, RpcError};

/// One pool row from the aggregation API (fields we use; the rest of the
/// row is ignored on decode)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolData {
    pub chain: String,
    pub project: String,
    pub symbol: String,
    #[serde(rename = "tvlUsd")]
    pub tvl_usd: f64,
    #[serde(default)]
    pub apy: f64,
    pub pool: String,
}

#[derive(Debug, Deserialize)]
struct PoolsResponse {
    data: Vec<PoolData>,
}

/// Aggregate view over the filtered pools
#[derive(Debug, Clone, Serialize)]
pub struct MarketSummary {
    pub total_tvl: f64,
    /// APY weighted by each pool's share of total TVL
    pub weighted_apy: f64,
    pub pool_count: usize,
    /// The USDC pool, when the market lists one
    pub usdc_pool: Option<PoolData>,
}

const PROJECT: &str = "aave-v3";
const CHAIN: &str = "Avalanche";

/// Filter and aggregate; empty after filtering is an error, not a zero
/// summary.
pub fn summarize(all_pools: Vec<PoolData>) -> Result<MarketSummary> {
    let pools: Vec<PoolData> = all_pools
        .into_iter()
        .filter(|p| p.project == PROJECT && p.chain == CHAIN)
        .collect();
    if pools.is_empty() {
        return Err(Error::Rpc(RpcError::ParseError(format!(
            "no {PROJECT} pools listed on {CHAIN}"
        ))));
    }

    let total_tvl: f64 = pools.iter().map(|p| p.tvl_usd).sum();
    let weighted_apy = if total_tvl > 0.0 {
        pools.iter().map(|p| p.apy * (p.tvl_usd / total_tvl)).sum()
    } else {
        0.0
    };
    let usdc_pool = pools.iter().find(|p| p.symbol == "USDC").cloned();

    Ok(MarketSummary {
        total_tvl,
        weighted_apy,
        pool_count: pools.len(),
        usdc_pool,
    })
}

pub struct YieldsClient {
    endpoint: String,
    http: reqwest::Client,
}

impl YieldsClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            http: reqwest::Client::new(),
        }
    }

    pub async fn market_summary(&self) -> Result<MarketSummary> {
        let response = self.http.get(&self.endpoint).send().await.map_err(|e| {
            Error::Rpc(RpcError::Unreachable {
                url: self.endpoint.clone(),
                message: e.to_string(),
            })
        })?;
        let parsed: PoolsResponse = response
            .json()
            .await
            .map_err(|e| Error::Rpc(RpcError::ParseError(e.to_string())))?;
        tracing::debug!(pools = parsed.data.len(), "fetched pool list");
        summarize(parsed.data)
    }
}

/// "1.23B" / "45.60M" / "789K" style TVL display
pub fn format_tvl(tvl: f64) -> String {
    if tvl >= 1e9 {
        format!("{:.2}B", tvl / 1e9)
    } else if tvl >= 1e6 {
        format!("{:.2}M", tvl / 1e6)
    } else if tvl >= 1e3 {
        format!("{:.0}K", tvl / 1e3)
    } else {
        format!("{tvl:.0}")
    }
}

pub fn format_apy(apy: f64) -> String {
    format!("{apy:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(chain: &str, project: &str, symbol: &str, tvl: f64, apy: f64) -> PoolData {
        PoolData {
            chain: chain.into(),
            project: project.into(),
            symbol: symbol.into(),
            tvl_usd: tvl,
            apy,
            pool: format!("{project}-{symbol}"),
        }
    }

    #[test]
    fn test_weighted_apy() {
        let summary = summarize(vec![
            pool("Avalanche", "aave-v3", "USDC", 300.0, 4.0),
            pool("Avalanche", "aave-v3", "WAVAX", 100.0, 8.0),
            // filtered out
            pool("Ethereum", "aave-v3", "USDC", 1e9, 99.0),
            pool("Avalanche", "compound-v3", "USDC", 1e9, 99.0),
        ])
        .unwrap();
        assert_eq!(summary.pool_count, 2);
        assert_eq!(summary.total_tvl, 400.0);
        // 4 * 0.75 + 8 * 0.25 = 5.0
        assert!((summary.weighted_apy - 5.0).abs() < 1e-9);
        assert_eq!(summary.usdc_pool.as_ref().map(|p| p.symbol.as_str()), Some("USDC"));
    }

    #[test]
    fn test_empty_market_is_an_error() {
        assert!(summarize(vec![pool("Ethereum", "aave-v3", "USDC", 1.0, 1.0)]).is_err());
    }

    #[test]
    fn test_tvl_formatting() {
        assert_eq!(format_tvl(1_230_000_000.0), "1.23B");
        assert_eq!(format_tvl(45_600_000.0), "45.60M");
        assert_eq!(format_tvl(789_000.0), "789K");
        assert_eq!(format_tvl(42.0), "42");
        assert_eq!(format_apy(3.456), "3.46");
    }
}
