//! Type definitions for Token Radar
//! Entities fetched from the outside world and the score values produced from them

use serde::{Deserialize, Serialize};

use super::errors::ErrorCode;

// ============================================
// Market data (DexScreener)
// ============================================

/// Trading window reported by DexScreener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    M5,
    H1,
    H6,
    H24,
}

impl Timeframe {
    /// Display order, shortest window first
    pub const ALL: [Timeframe; 4] = [Self::M5, Self::H1, Self::H6, Self::H24];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M5 => "m5",
            Self::H1 => "h1",
            Self::H6 => "h6",
            Self::H24 => "h24",
        }
    }
}

/// One value per trading window; DexScreener omits windows freely
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Windowed<T> {
    #[serde(default)]
    pub m5: Option<T>,
    #[serde(default)]
    pub h1: Option<T>,
    #[serde(default)]
    pub h6: Option<T>,
    #[serde(default)]
    pub h24: Option<T>,
}

impl<T> Windowed<T> {
    pub fn get(&self, timeframe: Timeframe) -> Option<&T> {
        match timeframe {
            Timeframe::M5 => self.m5.as_ref(),
            Timeframe::H1 => self.h1.as_ref(),
            Timeframe::H6 => self.h6.as_ref(),
            Timeframe::H24 => self.h24.as_ref(),
        }
    }
}

impl Windowed<f64> {
    /// Value for a window, 0 when missing
    pub fn value(&self, timeframe: Timeframe) -> f64 {
        self.get(timeframe).copied().unwrap_or(0.0)
    }
}

/// Buy/sell transaction counts for one window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxnCounts {
    #[serde(default)]
    pub buys: u64,
    #[serde(default)]
    pub sells: u64,
}

impl TxnCounts {
    pub fn total(&self) -> u64 {
        self.buys + self.sells
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Liquidity {
    #[serde(default)]
    pub usd: Option<f64>,
    #[serde(default)]
    pub base: Option<f64>,
    #[serde(default)]
    pub quote: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairToken {
    #[serde(default)]
    pub address: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebsiteLink {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub url: String,
}

/// Project metadata attached to a pair
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairInfo {
    pub image_url: Option<String>,
    #[serde(default)]
    pub websites: Vec<WebsiteLink>,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
}

/// A trading pair snapshot from DexScreener, fetched once per evaluation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairSnapshot {
    /// Chain ID (e.g., "solana", "ethereum", "bsc")
    #[serde(default)]
    pub chain_id: String,
    /// DEX identifier (e.g., "raydium", "uniswap")
    #[serde(default)]
    pub dex_id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub pair_address: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub base_token: PairToken,
    #[serde(default)]
    pub quote_token: PairToken,
    pub price_native: Option<String>,
    pub price_usd: Option<String>,
    #[serde(default)]
    pub txns: Windowed<TxnCounts>,
    #[serde(default)]
    pub volume: Windowed<f64>,
    #[serde(default)]
    pub price_change: Windowed<f64>,
    pub liquidity: Option<Liquidity>,
    pub fdv: Option<f64>,
    pub market_cap: Option<f64>,
    /// Epoch milliseconds
    pub pair_created_at: Option<i64>,
    pub info: Option<PairInfo>,
}

impl PairSnapshot {
    pub fn liquidity_usd(&self) -> f64 {
        self.liquidity.as_ref().and_then(|l| l.usd).unwrap_or(0.0)
    }

    pub fn market_cap(&self) -> f64 {
        self.market_cap.unwrap_or(0.0)
    }

    pub fn fdv(&self) -> f64 {
        self.fdv.unwrap_or(0.0)
    }

    /// priceUsd arrives as a decimal string
    pub fn price_usd_value(&self) -> f64 {
        self.price_usd
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or(0.0)
    }
}

// ============================================
// Holders
// ============================================

/// Canonical holder record: non-empty address and a supply percentage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolderEntry {
    pub address: String,
    /// Percent of total supply (0-100)
    pub percent: f64,
}

// ============================================
// WHOIS
// ============================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registrant {
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country_code: Option<String>,
}

/// WHOIS record fields used by the domain credibility checks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRecord {
    #[serde(default)]
    pub created_date: String,
    #[serde(default)]
    pub updated_date: String,
    #[serde(default)]
    pub expires_date: String,
    #[serde(default)]
    pub registrar_name: String,
    #[serde(default)]
    pub registrant: Registrant,
}

// ============================================
// Social (X/Twitter)
// ============================================

/// Raw per-tweet counters as scraped ("12.3K", "1,204", "0")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TweetMetric {
    pub comments: String,
    pub likes: String,
    pub retweets: String,
    pub views: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialProfile {
    pub username: String,
    pub description: String,
    /// Free text, e.g. "Joined March 2021"
    pub joined: String,
    pub followers: String,
    pub following: String,
    pub tweets: Vec<TweetMetric>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialCommunity {
    pub name: String,
    pub description: String,
    pub members: String,
    pub tweets: Vec<TweetMetric>,
}

/// Scraped social page, either an account or a community
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SocialData {
    Profile(SocialProfile),
    Community(SocialCommunity),
}

// ============================================
// Scores
// ============================================

/// Final score of one scorer plus the ordered deduction reasons
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u32,
    pub deductions: Vec<String>,
}

impl ScoreResult {
    /// Section that could not be evaluated at all
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            score: 0,
            deductions: vec![reason.into()],
        }
    }
}

/// Running tally used by every scorer: starts at a base and clamps at zero
#[derive(Debug, Clone)]
pub struct ScoreCard {
    base: i32,
    penalty: i32,
    deductions: Vec<String>,
}

impl ScoreCard {
    pub fn new(base: i32) -> Self {
        Self {
            base,
            penalty: 0,
            deductions: Vec::new(),
        }
    }

    pub fn deduct(&mut self, points: i32, reason: impl Into<String>) {
        self.penalty += points;
        self.deductions.push(reason.into());
    }

    pub fn finish(self) -> ScoreResult {
        ScoreResult {
            score: (self.base - self.penalty).max(0) as u32,
            deductions: self.deductions,
        }
    }
}

/// Outcome of one named credibility check; passing checks carry no penalty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub penalty: i32,
}

impl CheckOutcome {
    pub fn pass(name: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.into(),
            penalty: 0,
        }
    }

    pub fn fail(name: &str, message: impl Into<String>, penalty: i32) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.into(),
            penalty,
        }
    }

    /// "<CheckName>: <message>"
    pub fn reason(&self) -> String {
        format!("{}: {}", self.name, self.message)
    }
}

/// Report section that failed upstream without aborting the evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionError {
    pub section: String,
    pub code: String,
    pub message: String,
}

impl SectionError {
    pub fn new(section: &str, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            section: section.to_string(),
            code: code.as_str().to_string(),
            message: message.into(),
        }
    }
}
