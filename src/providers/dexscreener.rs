//! DexScreener API Client
//!
//! Market data source for a single pair plus every sibling pair of the
//! same base token. Free API, no key required.
//!
//! - Pair:   https://api.dexscreener.com/latest/dex/pairs/{chainId}/{pairAddress}
//! - Tokens: https://api.dexscreener.com/token-pairs/v1/{chainId}/{tokenAddress}

use async_trait::async_trait;
use eyre::{eyre, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use super::MarketDataProvider;
use crate::models::types::PairSnapshot;
use crate::utils::constants::{
    DEFAULT_HTTP_TIMEOUT_SECS, DEXSCREENER_PAIRS_URL, DEXSCREENER_TOKEN_PAIRS_URL, USER_AGENT,
};

/// `latest/dex/pairs` wraps its result in `{"pairs": [...]}`
#[derive(Debug, Deserialize)]
pub struct PairsEnvelope {
    #[serde(default)]
    pub pairs: Option<Vec<PairSnapshot>>,
}

/// DexScreener API client
pub struct DexScreenerClient {
    client: reqwest::Client,
    pairs_url: String,
    token_pairs_url: String,
    timeout: Duration,
}

impl Default for DexScreenerClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
    }
}

impl DexScreenerClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            pairs_url: DEXSCREENER_PAIRS_URL.to_string(),
            token_pairs_url: DEXSCREENER_TOKEN_PAIRS_URL.to_string(),
            timeout,
        }
    }

    /// Point both endpoints at another host (local stubs)
    pub fn with_base_urls(mut self, pairs_url: &str, token_pairs_url: &str) -> Self {
        self.pairs_url = pairs_url.trim_end_matches('/').to_string();
        self.token_pairs_url = token_pairs_url.trim_end_matches('/').to_string();
        self
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("DexScreener GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "*/*")
            .header("User-Agent", USER_AGENT)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| eyre!("DexScreener request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(eyre!("DexScreener API error: {}", response.status()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| eyre!("Failed to parse DexScreener response: {}", e))
    }
}

/// First pair of a `latest/dex/pairs` body, if any
pub fn first_pair(envelope: PairsEnvelope) -> Option<PairSnapshot> {
    envelope.pairs.and_then(|pairs| pairs.into_iter().next())
}

#[async_trait]
impl MarketDataProvider for DexScreenerClient {
    async fn fetch_pair(&self, chain: &str, pair_address: &str) -> Result<Option<PairSnapshot>> {
        info!("🔍 DexScreener: Fetching pair {}/{}", chain, pair_address);

        let url = format!("{}/{}/{}", self.pairs_url, chain, pair_address);
        let envelope: PairsEnvelope = self.get_json(&url).await?;
        let pair = first_pair(envelope);

        match &pair {
            Some(p) => info!(
                "📊 DexScreener: {} on {} (liquidity ${:.2})",
                p.base_token.symbol.as_deref().unwrap_or("Unknown"),
                p.dex_id,
                p.liquidity_usd()
            ),
            None => info!("📭 DexScreener: No pair data found for {}", pair_address),
        }

        Ok(pair)
    }

    async fn fetch_sibling_pairs(&self, chain: &str, token_address: &str) -> Result<Vec<PairSnapshot>> {
        info!("🔍 DexScreener: Fetching pairs for token {}", token_address);

        let url = format!("{}/{}/{}", self.token_pairs_url, chain, token_address);
        let pairs: Vec<PairSnapshot> = self.get_json(&url).await?;

        info!("📊 DexScreener: Found {} pairs", pairs.len());
        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_envelope_first_pair() {
        let body = r#"{
            "schemaVersion": "1.0.0",
            "pairs": [
                {"chainId": "solana", "dexId": "raydium", "pairAddress": "abc",
                 "baseToken": {"address": "CatMint", "name": "Cat", "symbol": "CAT"},
                 "quoteToken": {"address": "So111", "name": "Wrapped SOL", "symbol": "SOL"},
                 "priceUsd": "0.0123", "liquidity": {"usd": 5000.5}},
                {"chainId": "solana", "dexId": "orca", "pairAddress": "def"}
            ]
        }"#;
        let envelope: PairsEnvelope = serde_json::from_str(body).unwrap();
        let pair = first_pair(envelope).unwrap();
        assert_eq!(pair.dex_id, "raydium");
        assert_eq!(pair.base_token.address, "CatMint");
        assert_eq!(pair.liquidity_usd(), 5000.5);
    }

    #[test]
    fn test_missing_or_null_pairs() {
        let envelope: PairsEnvelope = serde_json::from_str(r#"{"pairs": null}"#).unwrap();
        assert!(first_pair(envelope).is_none());
        let envelope: PairsEnvelope = serde_json::from_str(r#"{"pairs": []}"#).unwrap();
        assert!(first_pair(envelope).is_none());
        let envelope: PairsEnvelope = serde_json::from_str(r#"{}"#).unwrap();
        assert!(first_pair(envelope).is_none());
    }

    #[test]
    fn test_base_url_override_trims_slash() {
        let client = DexScreenerClient::default().with_base_urls("http://127.0.0.1:9/pairs/", "http://127.0.0.1:9/tp");
        assert_eq!(client.pairs_url, "http://127.0.0.1:9/pairs");
        assert_eq!(client.token_pairs_url, "http://127.0.0.1:9/tp");
    }
}
