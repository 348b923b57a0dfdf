//! Token Evaluator - one full evaluation pass for a pair URL
//!
//! Only a bad URL or a missing pair aborts. Every other upstream failure
//! is recorded as a [`SectionError`] and that section degrades to empty
//! data or a zero score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::core::aggregator::{aggregate, IntelligenceSummary};
use crate::core::domain_credibility::{evaluate_domain, DomainAssessment, TlsObservation};
use crate::core::holders::normalize_holders;
use crate::core::market_health::{score_market_health, MarketHealthReport};
use crate::core::profile::TokenProfile;
use crate::core::social_credibility::{evaluate_social, SocialAssessment};
use crate::models::config::AppConfig;
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::models::types::{PairSnapshot, ScoreResult, SectionError, SocialData};
use crate::providers::{
    DexScreenerClient, HolderDataProvider, MarketDataProvider, MoralisClient, NativeTlsProbe,
    SocialScraper, TlsProbe, WebDriverScraper, WhoisProvider, WhoisXmlClient,
};
use crate::utils::parser::{is_community_link, parse_pair_url};

pub const SECTION_SIBLINGS: &str = "sibling_pairs";
pub const SECTION_HOLDERS: &str = "holders";
pub const SECTION_DOMAIN: &str = "domain";
pub const SECTION_TLS: &str = "tls";
pub const SECTION_SOCIAL: &str = "social";

pub const WHOIS_FAILED_REASON: &str = "WHOIS fetch failed";
pub const SOCIAL_FAILED_REASON: &str = "Twitter analysis failed";

/// Everything computed for one pair URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub chain: String,
    pub pair_address: String,
    pub evaluated_at: DateTime<Utc>,
    pub profile: TokenProfile,
    pub market: MarketHealthReport,
    pub domain: Option<DomainAssessment>,
    pub social: Option<SocialAssessment>,
    pub summary: IntelligenceSummary,
    pub section_errors: Vec<SectionError>,
}

/// Classified code carried by a provider error, or `fallback`
fn error_code(err: &eyre::Report, fallback: ErrorCode) -> ErrorCode {
    err.downcast_ref::<AppError>().map(|e| e.code).unwrap_or(fallback)
}

pub struct TokenEvaluator {
    market: Arc<dyn MarketDataProvider>,
    holders: Arc<dyn HolderDataProvider>,
    whois: Arc<dyn WhoisProvider>,
    tls: Arc<dyn TlsProbe>,
    social: Arc<dyn SocialScraper>,
}

impl TokenEvaluator {
    pub fn new(
        market: Arc<dyn MarketDataProvider>,
        holders: Arc<dyn HolderDataProvider>,
        whois: Arc<dyn WhoisProvider>,
        tls: Arc<dyn TlsProbe>,
        social: Arc<dyn SocialScraper>,
    ) -> Self {
        Self {
            market,
            holders,
            whois,
            tls,
            social,
        }
    }

    /// Wire the production providers from configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(DexScreenerClient::new(config.http_timeout)),
            Arc::new(MoralisClient::new(config.moralis_api_key.clone(), config.http_timeout)),
            Arc::new(WhoisXmlClient::new(config.whois_api_key.clone(), config.http_timeout)),
            Arc::new(NativeTlsProbe::default()),
            Arc::new(WebDriverScraper::new(config.webdriver_url.clone(), config.scroll)),
        )
    }

    pub async fn evaluate(&self, url: &str) -> AppResult<EvaluationReport> {
        self.evaluate_at(url, Utc::now()).await
    }

    /// Evaluate against a fixed clock
    pub async fn evaluate_at(&self, url: &str, now: DateTime<Utc>) -> AppResult<EvaluationReport> {
        let start = Instant::now();
        let locator = parse_pair_url(url)?;
        let chain = locator.chain.as_str();
        let mut errors = Vec::new();

        let pair = self.fetch_pair(chain, &locator.pair_address).await?;
        let token_address = pair.base_token.address.clone();

        let siblings = match self.market.fetch_sibling_pairs(chain, &token_address).await {
            Ok(pairs) => pairs,
            Err(e) => {
                warn!("⚠️ Sibling pairs unavailable: {}", e);
                errors.push(SectionError::new(
                    SECTION_SIBLINGS,
                    error_code(&e, ErrorCode::MarketDataError),
                    e.to_string(),
                ));
                Vec::new()
            }
        };

        let raw_holders = match self.holders.fetch_holders(&token_address, chain).await {
            Ok(raws) => raws,
            Err(e) => {
                warn!("⚠️ Holders unavailable: {}", e);
                errors.push(SectionError::new(
                    SECTION_HOLDERS,
                    error_code(&e, ErrorCode::HolderDataError),
                    e.to_string(),
                ));
                Vec::new()
            }
        };
        let holders = normalize_holders(&raw_holders, chain);

        let market = score_market_health(&pair, &holders, &siblings, now);
        let profile = TokenProfile::build(&pair, &holders);

        let (domain, domain_result) = match profile.website_domain.as_deref() {
            Some(host) => self.evaluate_website(host, now, &mut errors).await,
            None => (None, None),
        };

        let (social, social_result) = match profile.twitter_link.as_deref() {
            Some(link) => self.evaluate_twitter(link, now, &mut errors).await,
            None => (None, None),
        };

        let summary = aggregate(domain_result.as_ref(), social_result.as_ref());

        info!(
            "✅ Evaluated {}/{}: market {}/100, intelligence {}/100 ({} section errors, {}ms)",
            chain,
            locator.pair_address,
            market.result.score,
            summary.total,
            errors.len(),
            start.elapsed().as_millis()
        );

        Ok(EvaluationReport {
            chain: locator.chain.clone(),
            pair_address: locator.pair_address.clone(),
            evaluated_at: now,
            profile,
            market,
            domain,
            social,
            summary,
            section_errors: errors,
        })
    }

    async fn fetch_pair(&self, chain: &str, pair_address: &str) -> AppResult<PairSnapshot> {
        match self.market.fetch_pair(chain, pair_address).await {
            Ok(Some(pair)) => Ok(pair),
            Ok(None) => Err(AppError::token_not_found("No pair data found.")),
            Err(e) => Err(AppError::market_data("Failed to fetch pair data").caused_by(e)),
        }
    }

    async fn evaluate_website(
        &self,
        host: &str,
        now: DateTime<Utc>,
        errors: &mut Vec<SectionError>,
    ) -> (Option<DomainAssessment>, Option<ScoreResult>) {
        let record = match self.whois.fetch_domain_record(host).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                errors.push(SectionError::new(SECTION_DOMAIN, ErrorCode::WhoisError, "No WHOIS record"));
                return (None, Some(ScoreResult::failed(WHOIS_FAILED_REASON)));
            }
            Err(e) => {
                warn!("⚠️ WHOIS failed for {}: {}", host, e);
                errors.push(SectionError::new(
                    SECTION_DOMAIN,
                    error_code(&e, ErrorCode::WhoisError),
                    e.to_string(),
                ));
                return (None, Some(ScoreResult::failed(WHOIS_FAILED_REASON)));
            }
        };

        let tls = match self.tls.probe_issuer(host).await {
            Ok(issuer) => TlsObservation::Issuer(issuer),
            Err(e) => {
                warn!("⚠️ TLS probe failed for {}: {}", host, e);
                errors.push(SectionError::new(SECTION_TLS, ErrorCode::TlsProbeFailed, e.to_string()));
                TlsObservation::Failed(e.to_string())
            }
        };

        let assessment = evaluate_domain(&record, host, &tls, now);
        let result = assessment.result.clone();
        (Some(assessment), Some(result))
    }

    async fn evaluate_twitter(
        &self,
        link: &str,
        now: DateTime<Utc>,
        errors: &mut Vec<SectionError>,
    ) -> (Option<SocialAssessment>, Option<ScoreResult>) {
        let scraped = if is_community_link(link) {
            self.social.fetch_community(link).await.map(SocialData::Community)
        } else {
            self.social.fetch_profile(link).await.map(SocialData::Profile)
        };

        match scraped {
            Ok(data) => {
                let assessment = evaluate_social(&data, now);
                let result = assessment.result.clone();
                (Some(assessment), Some(result))
            }
            Err(e) => {
                warn!("⚠️ Twitter analysis failed for {}: {}", link, e);
                errors.push(SectionError::new(
                    SECTION_SOCIAL,
                    error_code(&e, ErrorCode::ScraperError),
                    e.to_string(),
                ));
                (None, Some(ScoreResult::failed(SOCIAL_FAILED_REASON)))
            }
        }
    }
}
