//! Market Health Scoring
//!
//! Start at 100 and deduct for each market red flag found in a pair snapshot:
//! price spikes, thin liquidity, volume bursts, whale concentration, a small
//! holder base, inflated FDV, lopsided 24h trading and a very young pair.
//!
//! Checks are independent and run in a fixed order, so the deduction list
//! always reads the same way for the same data.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::holders::normalize_holders;
use crate::models::types::{HolderEntry, PairSnapshot, ScoreCard, ScoreResult, Timeframe};
use crate::utils::constants::*;

/// How a buy/sell split reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSignal {
    SellPressure,
    BuyPumping,
    Balanced,
    Imbalanced,
}

impl TradeSignal {
    /// Same precedence for every window: sell pressure, pumping, balance
    pub fn classify(buy_ratio: f64, sell_ratio: f64) -> Self {
        if sell_ratio > SELL_PRESSURE_PCT {
            Self::SellPressure
        } else if buy_ratio > BUY_PUMPING_PCT {
            Self::BuyPumping
        } else if (BALANCED_MIN_BUY_PCT..=BALANCED_MAX_BUY_PCT).contains(&buy_ratio) {
            Self::Balanced
        } else {
            Self::Imbalanced
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SellPressure => "🚨 Sell pressure (>70%)",
            Self::BuyPumping => "⚠️ Suspicious pumping (buy ratio >80%)",
            Self::Balanced => "✅ Healthy trading (40-60% balance)",
            Self::Imbalanced => "⚠️ Unusual imbalance",
        }
    }
}

/// Buy/sell split for one trading window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeBalance {
    pub timeframe: Timeframe,
    pub buys: u64,
    pub sells: u64,
    /// Percent of transactions that were buys
    pub buy_ratio: f64,
    pub sell_ratio: f64,
    pub signal: TradeSignal,
}

/// Same token on another DEX, for side-by-side display only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DexComparison {
    pub dex: String,
    pub labels: String,
    pub url: String,
    pub price_usd: f64,
    pub liquidity_usd: f64,
    pub volume_h24: f64,
}

impl DexComparison {
    pub fn from_pair(pair: &PairSnapshot) -> Self {
        let dex = if pair.dex_id.is_empty() {
            "UNKNOWN".to_string()
        } else {
            pair.dex_id.to_uppercase()
        };
        let labels = if pair.labels.is_empty() {
            "N/A".to_string()
        } else {
            pair.labels.join(", ")
        };

        Self {
            dex,
            labels,
            url: if pair.url.is_empty() { "#".to_string() } else { pair.url.clone() },
            price_usd: pair.price_usd_value(),
            liquidity_usd: pair.liquidity_usd(),
            volume_h24: pair.volume.value(Timeframe::H24),
        }
    }
}

/// Derived values behind the score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketMetrics {
    pub price_change_h1: f64,
    pub price_change_h24: f64,
    pub liquidity_ratio: f64,
    pub volume_spike_ratio: f64,
    pub whale_percent: f64,
    pub holder_count: usize,
    /// `None` when FDV or market cap is unavailable
    pub fdv_ratio: Option<f64>,
    /// Windows with at least one transaction
    pub trade_balances: Vec<TradeBalance>,
    /// Whole days since the pair was created
    pub pair_age_days: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketHealthReport {
    pub result: ScoreResult,
    pub metrics: MarketMetrics,
    pub dex_comparison: Vec<DexComparison>,
}

/// Ratio with 0 substituted for a zero denominator
fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Split a pair's transactions per window; empty windows are skipped
pub fn trade_balances(pair: &PairSnapshot) -> Vec<TradeBalance> {
    Timeframe::ALL
        .iter()
        .filter_map(|&timeframe| {
            let txns = pair.txns.get(timeframe)?;
            let total = txns.total();
            if total == 0 {
                return None;
            }
            let buy_ratio = txns.buys as f64 / total as f64 * 100.0;
            let sell_ratio = txns.sells as f64 / total as f64 * 100.0;
            Some(TradeBalance {
                timeframe,
                buys: txns.buys,
                sells: txns.sells,
                buy_ratio,
                sell_ratio,
                signal: TradeSignal::classify(buy_ratio, sell_ratio),
            })
        })
        .collect()
}

/// Days between pair creation (epoch ms) and `now`
pub fn pair_age_days(created_at_ms: Option<i64>, now: DateTime<Utc>) -> Option<i64> {
    let created = Utc.timestamp_millis_opt(created_at_ms?).single()?;
    Some((now - created).num_days())
}

/// Score a pair snapshot against already-normalized holders
pub fn score_market_health(
    pair: &PairSnapshot,
    holders: &[HolderEntry],
    siblings: &[PairSnapshot],
    now: DateTime<Utc>,
) -> MarketHealthReport {
    let mut card = ScoreCard::new(MARKET_BASE_SCORE);

    // Price movement
    let price_change_h1 = pair.price_change.value(Timeframe::H1);
    let price_change_h24 = pair.price_change.value(Timeframe::H24);
    if price_change_h1.abs() > PRICE_SPIKE_H1_PCT || price_change_h24.abs() > PRICE_SPIKE_H24_PCT {
        card.deduct(PRICE_SPIKE_PENALTY, "Extreme short-term price movement");
    }

    // Liquidity depth
    let market_cap = pair.market_cap();
    let liquidity_ratio = safe_ratio(pair.liquidity_usd(), market_cap);
    if liquidity_ratio < MIN_LIQUIDITY_RATIO {
        card.deduct(LOW_LIQUIDITY_PENALTY, "Low liquidity depth (<5% of market cap)");
    }

    // 1h volume against the 24h hourly average
    let volume_h24 = pair.volume.value(Timeframe::H24);
    let volume_spike_ratio = safe_ratio(pair.volume.value(Timeframe::H1), volume_h24 / 24.0);
    if volume_spike_ratio > VOLUME_SPIKE_RATIO {
        card.deduct(VOLUME_SPIKE_PENALTY, "Unusual 1h volume spike");
    }

    // Holders arrive sorted by percent, largest first
    let whale_percent: f64 = holders.iter().take(WHALE_TOP_N).map(|h| h.percent).sum();
    if whale_percent > WHALE_CONCENTRATION_PCT {
        card.deduct(WHALE_PENALTY, "High whale concentration (>50% in top 5 wallets)");
    }
    if holders.len() < MIN_HOLDER_COUNT {
        card.deduct(HOLDER_COUNT_PENALTY, "Too few holders (<50)");
    }

    // FDV vs market cap, only with both numbers
    let fdv = pair.fdv();
    let fdv_ratio = (fdv != 0.0 && market_cap != 0.0).then(|| fdv / market_cap);
    if let Some(ratio) = fdv_ratio {
        if ratio > FDV_HIGH_RATIO {
            card.deduct(FDV_HIGH_PENALTY, "High FDV-to-MarketCap ratio (>5x)");
        } else if ratio > FDV_MODERATE_RATIO {
            card.deduct(FDV_MODERATE_PENALTY, "Moderate FDV-to-MarketCap ratio (>2x)");
        }
    }

    // Only the 24h window is scored
    let balances = trade_balances(pair);
    if let Some(day) = balances.iter().find(|b| b.timeframe == Timeframe::H24) {
        match day.signal {
            TradeSignal::SellPressure => {
                card.deduct(SELL_PRESSURE_PENALTY, "Sell pressure dominates (Sell ratio >70%)")
            }
            TradeSignal::BuyPumping => {
                card.deduct(BUY_PUMPING_PENALTY, "Suspicious buy dominance (Buy ratio >80%)")
            }
            TradeSignal::Imbalanced => card.deduct(IMBALANCE_PENALTY, "Unbalanced buy/sell ratio"),
            TradeSignal::Balanced => {}
        }
    }

    // Launch age
    let age_days = pair_age_days(pair.pair_created_at, now);
    if let Some(days) = age_days {
        if days < NEW_PAIR_DAYS {
            card.deduct(NEW_PAIR_PENALTY, "Newly launched token (<2 days)");
        }
    }

    MarketHealthReport {
        result: card.finish(),
        metrics: MarketMetrics {
            price_change_h1,
            price_change_h24,
            liquidity_ratio,
            volume_spike_ratio,
            whale_percent,
            holder_count: holders.len(),
            fdv_ratio,
            trade_balances: balances,
            pair_age_days: age_days,
        },
        dex_comparison: siblings.iter().map(DexComparison::from_pair).collect(),
    }
}

/// Normalize raw provider holders for `chain_id`, then score
pub fn evaluate_market_health(
    pair: &PairSnapshot,
    raw_holders: &[Value],
    siblings: &[PairSnapshot],
    chain_id: &str,
    now: DateTime<Utc>,
) -> MarketHealthReport {
    let holders = normalize_holders(raw_holders, chain_id);
    score_market_health(pair, &holders, siblings, now)
}
