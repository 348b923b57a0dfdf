//! Moralis holder lists
//!
//! Solana tokens go through the Solana gateway (`top-holders`), everything
//! else through the EVM `erc20/{token}/owners` endpoint. Both return the
//! list under `result`, each in its own field naming; normalization is left
//! to `core::holders`.

use async_trait::async_trait;
use eyre::{eyre, Result};
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

use super::HolderDataProvider;
use crate::models::errors::AppError;
use crate::utils::constants::{
    moralis_evm_chain, CHAIN_SOLANA, HOLDER_FETCH_LIMIT, MORALIS_EVM_URL, MORALIS_SOLANA_URL,
};

pub struct MoralisClient {
    client: reqwest::Client,
    api_key: String,
    timeout: Duration,
}

impl MoralisClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            timeout,
        }
    }

    /// Endpoint and query for a chain
    pub fn holders_request(token_address: &str, chain: &str) -> (String, Vec<(&'static str, String)>) {
        if chain == CHAIN_SOLANA {
            (
                format!("{}/{}/top-holders", MORALIS_SOLANA_URL, token_address),
                vec![("limit", HOLDER_FETCH_LIMIT.to_string())],
            )
        } else {
            (
                format!("{}/{}/owners", MORALIS_EVM_URL, token_address),
                vec![
                    ("chain", moralis_evm_chain(chain).to_string()),
                    ("order", "DESC".to_string()),
                ],
            )
        }
    }
}

/// Pull the `result` array out of a Moralis body; anything else is empty
pub fn extract_result(body: Value) -> Vec<Value> {
    match body {
        Value::Object(mut map) => match map.remove("result") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

#[async_trait]
impl HolderDataProvider for MoralisClient {
    async fn fetch_holders(&self, token_address: &str, chain: &str) -> Result<Vec<Value>> {
        if self.api_key.is_empty() {
            warn!("⚠️ Moralis: MORALIS_API_KEY not set, skipping holders");
            return Err(AppError::missing_api_key("MORALIS_API_KEY").into());
        }

        info!("👥 Moralis: Fetching holders for {} on {}", token_address, chain);

        let (url, query) = Self::holders_request(token_address, chain);
        let response = self
            .client
            .get(&url)
            .query(&query)
            .header("Accept", "application/json")
            .header("X-API-Key", &self.api_key)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| eyre!("Moralis request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(eyre!("Moralis API error: {}", response.status()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| eyre!("Failed to parse Moralis response: {}", e))?;
        let holders = extract_result(body);

        info!("👥 Moralis: {} holder records", holders.len());
        Ok(holders)
    }
}
