//! Providers Module - External Data Sources
//!
//! Market pairs (DexScreener), holder lists (Moralis), WHOIS records
//! (WhoisXML), live TLS issuer probe and the X/Twitter scraper. Every
//! source sits behind a narrow trait so the evaluator can run on mocks.

pub mod dexscreener;
pub mod moralis;
pub mod tls;
pub mod twitter;
pub mod whois;

pub use dexscreener::DexScreenerClient;
pub use moralis::MoralisClient;
pub use tls::NativeTlsProbe;
pub use twitter::WebDriverScraper;
pub use whois::WhoisXmlClient;

use async_trait::async_trait;
use eyre::Result;
use serde_json::Value;

use crate::models::types::{DomainRecord, PairSnapshot, SocialCommunity, SocialProfile};

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// `Ok(None)` when the pair does not exist
    async fn fetch_pair(&self, chain: &str, pair_address: &str) -> Result<Option<PairSnapshot>>;

    /// Every pair trading the token on the chain
    async fn fetch_sibling_pairs(&self, chain: &str, token_address: &str) -> Result<Vec<PairSnapshot>>;
}

#[async_trait]
pub trait HolderDataProvider: Send + Sync {
    /// Raw holder records in the chain's own schema, largest first
    async fn fetch_holders(&self, token_address: &str, chain: &str) -> Result<Vec<Value>>;
}

#[async_trait]
pub trait WhoisProvider: Send + Sync {
    async fn fetch_domain_record(&self, domain: &str) -> Result<Option<DomainRecord>>;
}

#[async_trait]
pub trait TlsProbe: Send + Sync {
    /// Issuer organization of the certificate served on port 443
    async fn probe_issuer(&self, domain: &str) -> Result<String>;
}

#[async_trait]
pub trait SocialScraper: Send + Sync {
    async fn fetch_profile(&self, url: &str) -> Result<SocialProfile>;
    async fn fetch_community(&self, url: &str) -> Result<SocialCommunity>;
}
