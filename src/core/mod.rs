//! Core Module - Scoring Engine
//!
//! Holder normalization, the three scorers, the aggregator, the token
//! profile view and the evaluator that runs them in order.

pub mod aggregator;
pub mod domain_credibility;
pub mod evaluator;
pub mod holders;
pub mod market_health;
pub mod profile;
pub mod social_credibility;

pub use aggregator::{aggregate, IntelligenceSummary};
pub use domain_credibility::{evaluate_domain, DomainAssessment, TlsObservation};
pub use evaluator::{EvaluationReport, TokenEvaluator};
pub use holders::{normalize_holder_entry, normalize_holders, HolderSchema, NormalizedHolder};
pub use market_health::{
    evaluate_market_health, score_market_health, DexComparison, MarketHealthReport, TradeBalance,
    TradeSignal,
};
pub use profile::TokenProfile;
pub use social_credibility::{evaluate_community, evaluate_profile, evaluate_social, SocialAssessment};
