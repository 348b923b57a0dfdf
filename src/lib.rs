//! Token Radar Library
//!
//! Heuristic risk scoring for DEX-traded tokens:
//! - Market health from pair price/liquidity/volume/holder/FDV/trade data
//! - Domain credibility from WHOIS records and a live TLS probe
//! - Social credibility from scraped X/Twitter profiles and communities

pub mod api;
pub mod core;
pub mod models;
pub mod providers;
pub mod utils;

pub use crate::core::{
    aggregate, evaluate_domain, evaluate_market_health, evaluate_social, normalize_holders,
    score_market_health, DomainAssessment, EvaluationReport, IntelligenceSummary,
    MarketHealthReport, SocialAssessment, TokenEvaluator, TokenProfile,
};
pub use models::config::AppConfig;
pub use models::errors::{AppError, AppResult, ErrorCode};
pub use models::types::*;
pub use providers::{HolderDataProvider, MarketDataProvider, SocialScraper, TlsProbe, WhoisProvider};
pub use utils::constants::{APP_NAME, APP_VERSION};
