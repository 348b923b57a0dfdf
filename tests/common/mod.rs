//! Hand-written providers for offline evaluator and API tests
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use eyre::{eyre, Result};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use token_radar::{
    AppError, DomainRecord, HolderDataProvider, Liquidity, MarketDataProvider, PairInfo,
    PairSnapshot, PairToken, Registrant, SocialCommunity, SocialLink, SocialProfile,
    SocialScraper, TlsProbe, TokenEvaluator, TweetMetric, TxnCounts, WebsiteLink, WhoisProvider,
    Windowed,
};

pub const PAIR_URL: &str = "https://dexscreener.com/ethereum/0xpair";

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub fn healthy_pair() -> PairSnapshot {
    PairSnapshot {
        chain_id: "ethereum".to_string(),
        dex_id: "uniswap".to_string(),
        url: PAIR_URL.to_string(),
        pair_address: "0xpair".to_string(),
        base_token: PairToken {
            address: "0xtoken".to_string(),
            name: Some("Cat".to_string()),
            symbol: Some("CAT".to_string()),
        },
        quote_token: PairToken {
            address: "0xweth".to_string(),
            name: Some("Wrapped Ether".to_string()),
            symbol: Some("WETH".to_string()),
        },
        price_usd: Some("0.42".to_string()),
        price_change: Windowed {
            h1: Some(5.0),
            h24: Some(10.0),
            ..Default::default()
        },
        liquidity: Some(Liquidity {
            usd: Some(100_000.0),
            ..Default::default()
        }),
        market_cap: Some(1_000_000.0),
        fdv: Some(1_500_000.0),
        volume: Windowed {
            h1: Some(1_000.0),
            h24: Some(10_000.0),
            ..Default::default()
        },
        txns: Windowed {
            h24: Some(TxnCounts { buys: 55, sells: 45 }),
            ..Default::default()
        },
        pair_created_at: Some((now() - Duration::days(10)).timestamp_millis()),
        info: Some(PairInfo {
            image_url: None,
            websites: vec![WebsiteLink {
                label: Some("Website".to_string()),
                url: "https://cat.xyz".to_string(),
            }],
            socials: vec![SocialLink {
                kind: "twitter".to_string(),
                url: "https://x.com/catcoin".to_string(),
            }],
        }),
        ..Default::default()
    }
}

/// 60 EVM holders, top five at 4% each
pub fn evm_holders() -> Vec<Value> {
    (0..60)
        .map(|i| {
            json!({
                "owner_address": format!("0x{:040x}", i),
                "percentage_relative_to_total_supply": if i < 5 { 4.0 } else { 0.5 },
            })
        })
        .collect()
}

pub fn reputable_record() -> DomainRecord {
    DomainRecord {
        created_date: "2019-03-10T08:00:00Z".to_string(),
        updated_date: "2024-03-01T08:00:00Z".to_string(),
        expires_date: "2027-03-10T08:00:00Z".to_string(),
        registrar_name: "MarkMonitor Inc.".to_string(),
        registrant: Registrant {
            organization: "Cat Labs Ltd".to_string(),
            name: "Domain Admin".to_string(),
            country_code: Some("CH".to_string()),
        },
    }
}

pub fn busy_tweet(n: u32) -> TweetMetric {
    TweetMetric {
        comments: format!("{}", 10 + n),
        likes: "1.2K".to_string(),
        retweets: "40".to_string(),
        views: "50K".to_string(),
    }
}

pub fn established_profile() -> SocialProfile {
    SocialProfile {
        username: "@catcoin".to_string(),
        description: "The original cat token.".to_string(),
        joined: "Joined March 2021".to_string(),
        followers: "12.3K".to_string(),
        following: "120".to_string(),
        tweets: (0..3).map(busy_tweet).collect(),
    }
}

// ============================================
// Mocks
// ============================================

pub struct MockMarket {
    pub pair: Result<Option<PairSnapshot>, String>,
    pub siblings: Result<Vec<PairSnapshot>, String>,
}

#[async_trait]
impl MarketDataProvider for MockMarket {
    async fn fetch_pair(&self, _chain: &str, _pair: &str) -> Result<Option<PairSnapshot>> {
        self.pair.clone().map_err(|e| eyre!(e))
    }

    async fn fetch_sibling_pairs(&self, _chain: &str, _token: &str) -> Result<Vec<PairSnapshot>> {
        self.siblings.clone().map_err(|e| eyre!(e))
    }
}

pub enum HolderBehavior {
    List(Vec<Value>),
    Fail(String),
    MissingKey,
}

pub struct MockHolders(pub HolderBehavior);

#[async_trait]
impl HolderDataProvider for MockHolders {
    async fn fetch_holders(&self, _token: &str, _chain: &str) -> Result<Vec<Value>> {
        match &self.0 {
            HolderBehavior::List(list) => Ok(list.clone()),
            HolderBehavior::Fail(msg) => Err(eyre!(msg.clone())),
            HolderBehavior::MissingKey => Err(AppError::missing_api_key("MORALIS_API_KEY").into()),
        }
    }
}

pub struct MockWhois(pub Result<Option<DomainRecord>, String>);

#[async_trait]
impl WhoisProvider for MockWhois {
    async fn fetch_domain_record(&self, _domain: &str) -> Result<Option<DomainRecord>> {
        self.0.clone().map_err(|e| eyre!(e))
    }
}

pub struct MockTls(pub Result<String, String>);

#[async_trait]
impl TlsProbe for MockTls {
    async fn probe_issuer(&self, _domain: &str) -> Result<String> {
        self.0.clone().map_err(|e| eyre!(e))
    }
}

#[derive(Default)]
pub struct MockSocial {
    pub profile: Option<SocialProfile>,
    pub community: Option<SocialCommunity>,
    pub profile_calls: AtomicUsize,
    pub community_calls: AtomicUsize,
}

#[async_trait]
impl SocialScraper for MockSocial {
    async fn fetch_profile(&self, _url: &str) -> Result<SocialProfile> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.profile.clone().ok_or_else(|| eyre!("WebDriver session failed"))
    }

    async fn fetch_community(&self, _url: &str) -> Result<SocialCommunity> {
        self.community_calls.fetch_add(1, Ordering::SeqCst);
        self.community.clone().ok_or_else(|| eyre!("WebDriver session failed"))
    }
}

/// All-healthy providers; tests override one piece at a time
pub struct Fixture {
    pub market: MockMarket,
    pub holders: MockHolders,
    pub whois: MockWhois,
    pub tls: MockTls,
    pub social: Arc<MockSocial>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self {
            market: MockMarket {
                pair: Ok(Some(healthy_pair())),
                siblings: Ok(vec![healthy_pair()]),
            },
            holders: MockHolders(HolderBehavior::List(evm_holders())),
            whois: MockWhois(Ok(Some(reputable_record()))),
            tls: MockTls(Ok("DigiCert Inc".to_string())),
            social: Arc::new(MockSocial {
                profile: Some(established_profile()),
                ..Default::default()
            }),
        }
    }
}

impl Fixture {
    pub fn build(self) -> TokenEvaluator {
        TokenEvaluator::new(
            Arc::new(self.market),
            Arc::new(self.holders),
            Arc::new(self.whois),
            Arc::new(self.tls),
            self.social,
        )
    }
}
