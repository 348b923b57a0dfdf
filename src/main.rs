//! Token Radar - token risk report for a DexScreener pair URL
//!
//! Usage:
//!   token_radar https://dexscreener.com/solana/<pairAddress>
//!
//! Provider keys come from the environment (see `AppConfig::from_env`).

use eyre::Result;
use std::fmt::Write as _;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use token_radar::core::market_health::MarketHealthReport;
use token_radar::utils::parser::format_timestamp;
use token_radar::{AppConfig, EvaluationReport, TokenEvaluator, APP_NAME, APP_VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let Some(url) = std::env::args().nth(1) else {
        eprintln!("Usage: token_radar <dexscreener pair url>");
        std::process::exit(2);
    };

    println!("📡 {} v{}", APP_NAME, APP_VERSION);

    let evaluator = TokenEvaluator::from_config(&AppConfig::from_env());
    println!("{}", run(&evaluator, &url).await?);
    Ok(())
}

/// Evaluate `url` and render the text report; fatal errors are returned, not printed
async fn run(evaluator: &TokenEvaluator, url: &str) -> Result<String> {
    let report = evaluator.evaluate(url).await?;
    Ok(render_report(&report)?)
}

fn fmt_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string())
}

fn render_market(out: &mut String, market: &MarketHealthReport) -> std::fmt::Result {
    let m = &market.metrics;
    writeln!(out, "\n🧮 Market Health Score: {}/100", market.result.score)?;
    writeln!(out, "   Price change 1h/24h:  {:.2}% / {:.2}%", m.price_change_h1, m.price_change_h24)?;
    writeln!(out, "   Liquidity/MarketCap:  {:.2}%", m.liquidity_ratio * 100.0)?;
    writeln!(out, "   1h volume spike:      {:.2}x", m.volume_spike_ratio)?;
    writeln!(out, "   Top-5 holders:        {:.2}% of {} holders", m.whale_percent, m.holder_count)?;
    writeln!(out, "   FDV/MarketCap:        {}", fmt_opt(m.fdv_ratio.map(|r| format!("{:.2}x", r))))?;
    writeln!(out, "   Pair age:             {} days", fmt_opt(m.pair_age_days))?;

    for balance in &m.trade_balances {
        writeln!(
            out,
            "   [{}] buys {} / sells {} ({:.1}% / {:.1}%) {}",
            balance.timeframe.as_str(),
            balance.buys,
            balance.sells,
            balance.buy_ratio,
            balance.sell_ratio,
            balance.signal.label()
        )?;
    }
    for reason in &market.result.deductions {
        writeln!(out, "   ⚠️ {}", reason)?;
    }

    if !market.dex_comparison.is_empty() {
        writeln!(out, "\n🔄 Across DEXes")?;
        for row in &market.dex_comparison {
            writeln!(
                out,
                "   {:<14} {:<10} ${:<14.6} liq ${:<14.2} vol24h ${:.2}",
                row.dex, row.labels, row.price_usd, row.liquidity_usd, row.volume_h24
            )?;
        }
    }
    Ok(())
}

fn render_report(report: &EvaluationReport) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, report)?;
    Ok(out)
}

fn write_report(out: &mut String, report: &EvaluationReport) -> std::fmt::Result {
    let p = &report.profile;
    writeln!(out, "\n📊 {} ({})", p.name, p.symbol)?;
    writeln!(out, "   DEX: {} | Chain: {}", p.dex, p.chain)?;
    writeln!(out, "   USD Price: ${}", fmt_opt(p.price_usd.as_deref()))?;
    writeln!(out, "   Native Price ({}): {}", p.quote_symbol, fmt_opt(p.price_native.as_deref()))?;
    writeln!(out, "   FDV: ${} | Market Cap: ${}", fmt_opt(p.fdv), fmt_opt(p.market_cap))?;
    writeln!(out, "   Pair Created At: {}", p.created_at)?;
    writeln!(out, "   Liquidity: ${}", fmt_opt(p.liquidity_usd))?;
    for link in p.socials.iter().chain(p.websites.iter()) {
        writeln!(out, "   🔗 {}: {}", link.label, link.url)?;
    }
    writeln!(out, "   🌐 {}", p.dexscreener_url)?;

    render_market(out, &report.market)?;

    writeln!(out, "\n🧠 Website & Twitter Intelligence")?;
    if let Some(domain) = &report.domain {
        writeln!(out, "   🌐 {}", domain.domain)?;
        for check in &domain.checks {
            let icon = if check.passed { "✅" } else { "⚠️" };
            writeln!(out, "   {} {}: {}", icon, check.name, check.message)?;
        }
    }
    if let Some(social) = &report.social {
        writeln!(out, "   🐦 {} ({} tweets, {} organic)", social.display_name, social.tweet_count, social.organic_tweets)?;
        for check in &social.checks {
            let icon = if check.passed { "✅" } else { "⚠️" };
            writeln!(out, "   {} {}: {}", icon, check.name, check.message)?;
        }
    }

    let s = &report.summary;
    writeln!(out, "   Domain Score:  {} / 50", s.domain_score)?;
    writeln!(out, "   Twitter Score: {} / 50", s.social_score)?;
    writeln!(out, "   Total Score:   {} / 100", s.total)?;
    for reason in &s.deductions {
        writeln!(out, "   - {}", reason)?;
    }
    for note in &s.notes {
        writeln!(out, "   ℹ️ {}", note)?;
    }

    if !report.section_errors.is_empty() {
        writeln!(out, "\n⚠️ Sections with errors")?;
        for err in &report.section_errors {
            writeln!(out, "   [{}] {}: {}", err.code, err.section, err.message)?;
        }
    }

    writeln!(
        out,
        "\n⏱ Evaluated at {}",
        format_timestamp(Some(report.evaluated_at.timestamp_millis()))
    )
}
