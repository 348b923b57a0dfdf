//! WhoisXML API client
//!
//! `GET WhoisService?apiKey=..&domainName=..&outputFormat=JSON`, reading the
//! `WhoisRecord` object. Registries sometimes leave the top-level dates empty
//! and only fill `registryData`; those gaps are backfilled from it.

use async_trait::async_trait;
use eyre::{eyre, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

use super::WhoisProvider;
use crate::models::errors::AppError;
use crate::models::types::DomainRecord;
use crate::utils::constants::WHOIS_API_URL;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistryData {
    #[serde(default)]
    created_date: String,
    #[serde(default)]
    updated_date: String,
    #[serde(default)]
    expires_date: String,
    #[serde(default)]
    registrar_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWhoisRecord {
    #[serde(flatten)]
    record: DomainRecord,
    #[serde(default)]
    registry_data: Option<RegistryData>,
}

#[derive(Debug, Deserialize)]
struct WhoisEnvelope {
    #[serde(rename = "WhoisRecord")]
    whois_record: Option<RawWhoisRecord>,
    #[serde(rename = "ErrorMessage")]
    error_message: Option<serde_json::Value>,
}

fn backfill(target: &mut String, fallback: String) {
    if target.trim().is_empty() {
        *target = fallback;
    }
}

/// Decode a WhoisService body; `None` when no record came back
pub fn parse_whois_body(body: &str) -> Result<Option<DomainRecord>> {
    let envelope: WhoisEnvelope =
        serde_json::from_str(body).map_err(|e| eyre!("Failed to parse WHOIS response: {}", e))?;

    if let Some(err) = envelope.error_message {
        warn!("⚠️ WHOIS: API returned error {}", err);
        return Ok(None);
    }

    Ok(envelope.whois_record.map(|raw| {
        let mut record = raw.record;
        if let Some(registry) = raw.registry_data {
            backfill(&mut record.created_date, registry.created_date);
            backfill(&mut record.updated_date, registry.updated_date);
            backfill(&mut record.expires_date, registry.expires_date);
            backfill(&mut record.registrar_name, registry.registrar_name);
        }
        record
    }))
}

pub struct WhoisXmlClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl WhoisXmlClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: WHOIS_API_URL.to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl WhoisProvider for WhoisXmlClient {
    async fn fetch_domain_record(&self, domain: &str) -> Result<Option<DomainRecord>> {
        if self.api_key.is_empty() {
            warn!("⚠️ WHOIS: WHOIS_API_KEY not set, skipping {}", domain);
            return Err(AppError::missing_api_key("WHOIS_API_KEY").into());
        }

        info!("🌐 WHOIS: Looking up {}", domain);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("domainName", domain),
                ("outputFormat", "JSON"),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| eyre!("WHOIS request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(eyre!("WHOIS API error: {}", response.status()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| eyre!("Failed to read WHOIS response: {}", e))?;
        parse_whois_body(&body)
    }
}
