//! Token Profile - header, links, per-window metrics and holder distribution
//!
//! Also decides which website and which X/Twitter link the credibility
//! scorers look at.

use serde::{Deserialize, Serialize};

use crate::models::types::{HolderEntry, PairSnapshot, Timeframe};
use crate::utils::constants::HOLDER_FETCH_LIMIT;
use crate::utils::parser::{capitalize, extract_host, format_timestamp, short_address};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeMetrics {
    pub timeframe: crate::models::types::Timeframe,
    pub volume: Option<f64>,
    pub buys: Option<u64>,
    pub sells: Option<u64>,
    pub price_change: Option<f64>,
}

impl TimeframeMetrics {
    /// Window with neither volume nor transaction data
    pub fn is_empty(&self) -> bool {
        self.volume.is_none() && self.buys.is_none() && self.sells.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolderBar {
    pub short_address: String,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenProfile {
    pub name: String,
    pub symbol: String,
    pub token_address: String,
    pub quote_symbol: String,
    pub dex: String,
    pub chain: String,
    pub image_url: Option<String>,
    pub price_usd: Option<String>,
    pub price_native: Option<String>,
    pub fdv: Option<f64>,
    pub market_cap: Option<f64>,
    pub created_at: String,
    pub liquidity_usd: Option<f64>,
    pub liquidity_base: Option<f64>,
    pub liquidity_quote: Option<f64>,
    pub timeframes: Vec<TimeframeMetrics>,
    pub socials: Vec<ProfileLink>,
    pub websites: Vec<ProfileLink>,
    pub twitter_link: Option<String>,
    /// Host of the website scored for domain credibility
    pub website_domain: Option<String>,
    pub dexscreener_url: String,
    pub holder_distribution: Vec<HolderBar>,
}

impl TokenProfile {
    pub fn build(pair: &PairSnapshot, holders: &[HolderEntry]) -> Self {
        let liquidity = pair.liquidity.clone().unwrap_or_default();

        let timeframes = Timeframe::ALL
            .iter()
            .map(|&tf| {
                let txns = pair.txns.get(tf);
                TimeframeMetrics {
                    timeframe: tf,
                    volume: pair.volume.get(tf).copied(),
                    buys: txns.map(|t| t.buys),
                    sells: txns.map(|t| t.sells),
                    price_change: pair.price_change.get(tf).copied(),
                }
            })
            .collect();

        let info = pair.info.clone().unwrap_or_default();
        let socials: Vec<ProfileLink> = info
            .socials
            .iter()
            .map(|s| ProfileLink {
                label: capitalize(&s.kind),
                url: s.url.clone(),
            })
            .collect();
        let twitter_link = info
            .socials
            .iter()
            .filter(|s| s.kind == "twitter")
            .map(|s| s.url.clone())
            .last();

        // A website entry pointing at a social page is not a website
        let websites: Vec<ProfileLink> = info
            .websites
            .iter()
            .filter(|w| !w.url.is_empty() && !info.socials.iter().any(|s| s.url == w.url))
            .map(|w| ProfileLink {
                label: w.label.clone().unwrap_or_else(|| "Website".to_string()),
                url: w.url.clone(),
            })
            .collect();
        let website_domain = websites.last().and_then(|w| extract_host(&w.url));

        let holder_distribution = holders
            .iter()
            .take(HOLDER_FETCH_LIMIT)
            .map(|h| HolderBar {
                short_address: short_address(&h.address),
                percent: h.percent,
            })
            .collect();

        Self {
            name: pair.base_token.name.clone().unwrap_or_default(),
            symbol: pair.base_token.symbol.clone().unwrap_or_default(),
            token_address: pair.base_token.address.clone(),
            quote_symbol: pair.quote_token.symbol.clone().unwrap_or_default(),
            dex: capitalize(&pair.dex_id),
            chain: capitalize(&pair.chain_id),
            image_url: info.image_url.clone(),
            price_usd: pair.price_usd.clone(),
            price_native: pair.price_native.clone(),
            fdv: pair.fdv,
            market_cap: pair.market_cap,
            created_at: format_timestamp(pair.pair_created_at),
            liquidity_usd: liquidity.usd,
            liquidity_base: liquidity.base,
            liquidity_quote: liquidity.quote,
            timeframes,
            socials,
            websites,
            twitter_link,
            website_domain,
            dexscreener_url: pair.url.clone(),
            holder_distribution,
        }
    }
}
