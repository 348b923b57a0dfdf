//! Constants Module - Single Source of Truth
//!
//! Endpoints, thresholds, penalties and fixed lookup sets used across the
//! scorers and providers live here. No magic numbers in the other modules.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "TokenRadar";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for HTTP requests
pub const USER_AGENT: &str = "TokenRadar/0.1.0";

// ============================================
// ENDPOINTS
// ============================================

/// DexScreener pair lookup: `{base}/{chain}/{pair}`
pub const DEXSCREENER_PAIRS_URL: &str = "https://api.dexscreener.com/latest/dex/pairs";

/// DexScreener token pairs: `{base}/{chain}/{token}`
pub const DEXSCREENER_TOKEN_PAIRS_URL: &str = "https://api.dexscreener.com/token-pairs/v1";

/// Moralis Solana gateway
pub const MORALIS_SOLANA_URL: &str = "https://solana-gateway.moralis.io/token/mainnet";

/// Moralis EVM API
pub const MORALIS_EVM_URL: &str = "https://deep-index.moralis.io/api/v2.2/erc20";

/// Holder page size requested from Moralis
pub const HOLDER_FETCH_LIMIT: usize = 100;

/// WhoisXML lookup endpoint
pub const WHOIS_API_URL: &str = "https://www.whoisxmlapi.com/whoisserver/WhoisService";

/// Default chromedriver address
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

// ============================================
// TIMEOUTS
// ============================================

/// Default timeout for provider HTTP requests (seconds)
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// TLS probe connect + handshake timeout (seconds)
pub const TLS_PROBE_TIMEOUT_SECS: u64 = 3;

/// TLS port probed for certificate issuer
pub const TLS_PORT: u16 = 443;

/// WebDriver element wait (seconds)
pub const WEBDRIVER_WAIT_SECS: u64 = 10;

// ============================================
// SCRAPER SCROLL POLICY
// ============================================

pub const DEFAULT_SCROLL_COUNT: u32 = 3;
pub const SCROLL_STALL_LIMIT: u32 = 5;
pub const SCROLL_MIN_INCREMENT_PX: i64 = 300;
pub const SCROLL_MAX_INCREMENT_PX: i64 = 500;
/// Extra distance added when the page did not move since the last step
pub const SCROLL_STALL_BONUS_PX: i64 = 100;
pub const SCROLL_MIN_DELAY_MS: u64 = 1_500;
pub const SCROLL_MAX_DELAY_MS: u64 = 3_500;
/// Pause options after clicking the timeline "Retry" button
pub const RETRY_CLICK_PAUSES_MS: [u64; 2] = [1_000, 2_000];

// ============================================
// MARKET HEALTH THRESHOLDS
// ============================================

pub const MARKET_BASE_SCORE: i32 = 100;

pub const PRICE_SPIKE_H1_PCT: f64 = 30.0;
pub const PRICE_SPIKE_H24_PCT: f64 = 50.0;
pub const PRICE_SPIKE_PENALTY: i32 = 10;

pub const MIN_LIQUIDITY_RATIO: f64 = 0.05;
pub const LOW_LIQUIDITY_PENALTY: i32 = 15;

pub const VOLUME_SPIKE_RATIO: f64 = 3.0;
pub const VOLUME_SPIKE_PENALTY: i32 = 10;

pub const WHALE_TOP_N: usize = 5;
pub const WHALE_CONCENTRATION_PCT: f64 = 50.0;
pub const WHALE_PENALTY: i32 = 20;

pub const MIN_HOLDER_COUNT: usize = 50;
pub const HOLDER_COUNT_PENALTY: i32 = 10;

pub const FDV_HIGH_RATIO: f64 = 5.0;
pub const FDV_HIGH_PENALTY: i32 = 10;
pub const FDV_MODERATE_RATIO: f64 = 2.0;
pub const FDV_MODERATE_PENALTY: i32 = 5;

pub const SELL_PRESSURE_PCT: f64 = 70.0;
pub const SELL_PRESSURE_PENALTY: i32 = 15;
pub const BUY_PUMPING_PCT: f64 = 80.0;
pub const BUY_PUMPING_PENALTY: i32 = 10;
pub const BALANCED_MIN_BUY_PCT: f64 = 40.0;
pub const BALANCED_MAX_BUY_PCT: f64 = 60.0;
pub const IMBALANCE_PENALTY: i32 = 5;

pub const NEW_PAIR_DAYS: i64 = 2;
pub const NEW_PAIR_PENALTY: i32 = 10;

// ============================================
// DOMAIN CREDIBILITY
// ============================================

pub const DOMAIN_BASE_SCORE: i32 = 50;

pub const MIN_DOMAIN_AGE_DAYS: i64 = 90;
pub const MAX_UPDATE_GAP_DAYS: i64 = 1;
pub const MIN_EXPIRY_DAYS: i64 = 180;

pub const DATE_CHECK_PENALTY: i32 = 10;
pub const UNPARSABLE_DATE_PENALTY: i32 = 5;
pub const MINOR_CHECK_PENALTY: i32 = 5;

/// Low-cost or anonymity-friendly registrars (case-insensitive substring)
pub const LOW_REPUTATION_REGISTRARS: [&str; 5] =
    ["NameSilo", "Namecheap", "Epik", "Dynadot", "PublicDomainRegistry"];

/// Registrant fields containing these markers indicate privacy protection
pub const WHOIS_PRIVACY_MARKERS: [&str; 2] = ["private", "proxy"];

/// Registrant countries treated as high risk
pub const HIGH_RISK_COUNTRIES: [&str; 6] = ["RU", "CN", "IR", "KP", "VE", "BY"];

/// Free certificate authority marker in the issuer organization
pub const FREE_CA_MARKER: &str = "Let's Encrypt";

// ============================================
// SOCIAL CREDIBILITY
// ============================================

pub const SOCIAL_BASE_SCORE: i32 = 50;
pub const MIN_DESCRIPTION_CHARS: usize = 10;
pub const MIN_TWEETS: usize = 3;
pub const MIN_ORGANIC_TWEETS: usize = 2;

/// A tweet is organic when every metric is strictly above these
pub const ORGANIC_MIN_COMMENTS: u64 = 3;
pub const ORGANIC_MIN_LIKES: u64 = 5;
pub const ORGANIC_MIN_RETWEETS: u64 = 2;

pub const MIN_COMMUNITY_MEMBERS: u64 = 500;
pub const LOW_MEMBERS_PENALTY: i32 = 10;
pub const SPARSE_DESCRIPTION_PENALTY: i32 = 5;
pub const FEW_COMMUNITY_TWEETS_PENALTY: i32 = 15;
pub const LOW_ENGAGEMENT_PENALTY: i32 = 10;

pub const MIN_PROFILE_FOLLOWERS: u64 = 1_000;
pub const LOW_FOLLOWERS_PENALTY: i32 = 5;
pub const FEW_PROFILE_TWEETS_PENALTY: i32 = 10;

pub const JOINED_VERY_RECENT_DAYS: i64 = 60;
pub const JOINED_VERY_RECENT_PENALTY: i32 = 10;
pub const JOINED_RECENT_DAYS: i64 = 180;
pub const JOINED_RECENT_PENALTY: i32 = 5;
pub const UNPARSABLE_JOIN_PENALTY: i32 = 3;

/// URL marker for X/Twitter community pages
pub const COMMUNITY_LINK_MARKER: &str = "/i/communities/";

// ============================================
// CHAINS
// ============================================

/// DexScreener chain id for Solana (the only non-EVM holder schema)
pub const CHAIN_SOLANA: &str = "solana";

/// Map a DexScreener chain id to the Moralis EVM chain parameter
pub fn moralis_evm_chain(chain_id: &str) -> &str {
    match chain_id {
        "ethereum" => "eth",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moralis_chain_mapping() {
        assert_eq!(moralis_evm_chain("ethereum"), "eth");
        assert_eq!(moralis_evm_chain("bsc"), "bsc");
        assert_eq!(moralis_evm_chain("base"), "base");
    }

    #[test]
    fn test_market_penalties_cap_at_base_score() {
        // Worst case: every mutually exclusive group takes its largest branch.
        let worst = PRICE_SPIKE_PENALTY
            + LOW_LIQUIDITY_PENALTY
            + VOLUME_SPIKE_PENALTY
            + WHALE_PENALTY
            + HOLDER_COUNT_PENALTY
            + FDV_HIGH_PENALTY
            + SELL_PRESSURE_PENALTY
            + NEW_PAIR_PENALTY;
        assert_eq!(worst, MARKET_BASE_SCORE);
    }
}
