//! Integration tests for Token Radar
//!
//! Drives the public scoring functions the way the evaluator composes them.

mod common;

use chrono::Duration;
use serde_json::json;

use common::{busy_tweet, established_profile, healthy_pair, now, reputable_record};
use token_radar::core::domain_credibility::TlsObservation;
use token_radar::utils::parser::{extract_host, parse_pair_url, try_parse_compact};
use token_radar::{
    aggregate, evaluate_domain, evaluate_market_health, evaluate_social, normalize_holders,
    Liquidity, SocialCommunity, SocialData, TxnCounts, Windowed,
};

#[test]
fn test_pair_url_variants() {
    let locator = parse_pair_url("https://dexscreener.com/solana/AbC123?maker=1").unwrap();
    assert_eq!(locator.chain, "solana");
    assert_eq!(locator.pair_address, "AbC123");

    let locator = parse_pair_url("http://dexscreener.com/base/0xdead/extra").unwrap();
    assert_eq!(locator.chain, "base");
    assert_eq!(locator.pair_address, "0xdead");

    for bad in ["", "dexscreener.com/solana/x", "https://dexscreener.com/solana", "ftp://a/b/c"] {
        let err = parse_pair_url(bad).unwrap_err();
        assert_eq!(err.code_str(), "INPUT_INVALID_URL", "input: {:?}", bad);
    }
}

#[test]
fn test_text_helpers() {
    assert_eq!(extract_host("https://www.Cat.xyz/about"), Some("www.cat.xyz".to_string()));
    assert_eq!(extract_host("cat.xyz"), Some("cat.xyz".to_string()));
    assert_eq!(try_parse_compact("12.3K"), Some(12_300));
    assert_eq!(try_parse_compact("1,234"), Some(1_234));
    assert_eq!(try_parse_compact("N/A"), None);
}

#[test]
fn test_pump_and_dump_pair_scores_zero() {
    let mut pair = healthy_pair();
    pair.chain_id = "solana".to_string();
    pair.price_change = Windowed {
        h1: Some(40.0),
        ..Default::default()
    };
    pair.liquidity = Some(Liquidity {
        usd: Some(10_000.0),
        ..Default::default()
    });
    pair.fdv = Some(10_000_000.0);
    pair.volume = Windowed {
        h1: Some(5_000.0),
        h24: Some(24_000.0),
        ..Default::default()
    };
    pair.txns = Windowed {
        h24: Some(TxnCounts { buys: 20, sells: 80 }),
        ..Default::default()
    };
    pair.pair_created_at = Some(now().timestamp_millis());

    let raw: Vec<_> = (0..5)
        .map(|i| json!({ "ownerAddress": format!("wallet{}", i), "percentageRelativeToTotalSupply": 15.0 }))
        .collect();

    let report = evaluate_market_health(&pair, &raw, &[], "solana", now());
    assert_eq!(report.result.score, 0);
    assert_eq!(report.result.deductions.len(), 8);
    assert_eq!(report.metrics.holder_count, 5);
    assert!((report.metrics.whale_percent - 75.0).abs() < 1e-9);
    assert_eq!(report.metrics.fdv_ratio, Some(10.0));
}

#[test]
fn test_holder_schema_follows_chain() {
    let evm = json!({ "owner_address": "0xabc", "percentage_relative_to_total_supply": 12.5 });
    let sol = json!({ "ownerAddress": "So1", "percentageRelativeToTotalSupply": 3.0 });

    assert_eq!(normalize_holders(&[evm.clone(), sol.clone()], "ethereum").len(), 1);
    let solana = normalize_holders(&[evm, sol], "solana");
    assert_eq!(solana.len(), 1);
    assert_eq!(solana[0].address, "So1");
}

#[test]
fn test_full_intelligence_scoring() {
    let domain = evaluate_domain(
        &reputable_record(),
        "cat.xyz",
        &TlsObservation::Issuer("DigiCert Inc".to_string()),
        now(),
    );
    let social = evaluate_social(&SocialData::Profile(established_profile()), now());

    let summary = aggregate(Some(&domain.result), Some(&social.result));
    assert_eq!(summary.domain_score, 50);
    assert_eq!(summary.social_score, 50);
    assert_eq!(summary.total, 100);
    assert!(summary.deductions.is_empty());
}

#[test]
fn test_young_domain_and_thin_community() {
    let mut record = reputable_record();
    let created = now() - Duration::days(20);
    record.created_date = created.to_rfc3339();
    record.updated_date = created.to_rfc3339();

    let domain = evaluate_domain(
        &record,
        "cat.xyz",
        &TlsObservation::Issuer("Let's Encrypt".to_string()),
        now(),
    );
    // new domain, no update, free SSL
    assert_eq!(domain.result.score, 25);

    let community = SocialCommunity {
        name: "Cat Army".to_string(),
        description: "cats".to_string(),
        members: "120".to_string(),
        tweets: vec![busy_tweet(1), busy_tweet(1)],
    };
    let social = evaluate_social(&SocialData::Community(community), now());
    assert_eq!(social.organic_tweets, 1);

    let summary = aggregate(Some(&domain.result), Some(&social.result));
    assert_eq!(summary.total, domain.result.score + social.result.score);
    assert_eq!(
        summary.deductions.len(),
        domain.result.deductions.len() + social.result.deductions.len()
    );
}
