//! Domain Credibility Scoring
//!
//! Seven named checks over a WHOIS record and a TLS observation. The score
//! starts at 50 and each failing check subtracts its penalty.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::types::{CheckOutcome, DomainRecord, ScoreCard, ScoreResult};
use crate::utils::constants::*;
use crate::utils::parser::parse_whois_date;

pub const CHECK_DOMAIN_AGE: &str = "Domain Age";
pub const CHECK_UPDATE_ACTIVITY: &str = "Update Activity";
pub const CHECK_EXPIRATION: &str = "Expiration Length";
pub const CHECK_REGISTRAR: &str = "Registrar Reputation";
pub const CHECK_PRIVACY: &str = "WHOIS Privacy";
pub const CHECK_SSL: &str = "SSL Certificate";
pub const CHECK_HOSTING: &str = "Hosting Location";

/// Result of the live TLS handshake against the domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum TlsObservation {
    /// Issuer organization (may be empty)
    Issuer(String),
    /// Connect or handshake error text
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainAssessment {
    pub domain: String,
    /// Every check in evaluation order, passing or not
    pub checks: Vec<CheckOutcome>,
    pub result: ScoreResult,
}

/// Whole days, rounded toward negative infinity
fn whole_days(span: Duration) -> i64 {
    span.num_seconds().div_euclid(86_400)
}

pub fn assess_domain_age(created: &str, now: DateTime<Utc>) -> CheckOutcome {
    match parse_whois_date(created) {
        Ok(dt) => {
            let age = whole_days(now - dt);
            if age < MIN_DOMAIN_AGE_DAYS {
                CheckOutcome::fail(
                    CHECK_DOMAIN_AGE,
                    format!("Domain is very new ({} days)", age),
                    DATE_CHECK_PENALTY,
                )
            } else {
                CheckOutcome::pass(CHECK_DOMAIN_AGE, format!("Domain age is {} days", age))
            }
        }
        Err(e) => CheckOutcome::fail(
            CHECK_DOMAIN_AGE,
            format!("Could not parse creation date: {}", e),
            UNPARSABLE_DATE_PENALTY,
        ),
    }
}

pub fn assess_update_gap(created: &str, updated: &str) -> CheckOutcome {
    let parsed = parse_whois_date(created).and_then(|c| parse_whois_date(updated).map(|u| (c, u)));
    match parsed {
        Ok((created, updated)) => {
            let gap = whole_days(updated - created);
            if gap <= MAX_UPDATE_GAP_DAYS {
                CheckOutcome::fail(
                    CHECK_UPDATE_ACTIVITY,
                    "No meaningful update since domain registration",
                    DATE_CHECK_PENALTY,
                )
            } else {
                CheckOutcome::pass(CHECK_UPDATE_ACTIVITY, format!("Domain updated after {} days", gap))
            }
        }
        Err(e) => CheckOutcome::fail(
            CHECK_UPDATE_ACTIVITY,
            format!("Could not parse update data: {}", e),
            UNPARSABLE_DATE_PENALTY,
        ),
    }
}

pub fn assess_expiry(expires: &str, now: DateTime<Utc>) -> CheckOutcome {
    match parse_whois_date(expires) {
        Ok(dt) => {
            let remaining = whole_days(dt - now);
            if remaining < MIN_EXPIRY_DAYS {
                CheckOutcome::fail(
                    CHECK_EXPIRATION,
                    format!("Domain expires soon ({} days left)", remaining),
                    DATE_CHECK_PENALTY,
                )
            } else {
                CheckOutcome::pass(
                    CHECK_EXPIRATION,
                    format!("Domain has {} days until expiration", remaining),
                )
            }
        }
        Err(e) => CheckOutcome::fail(
            CHECK_EXPIRATION,
            format!("Could not parse expiry data: {}", e),
            UNPARSABLE_DATE_PENALTY,
        ),
    }
}

pub fn assess_registrar(name: &str) -> CheckOutcome {
    let lowered = name.to_lowercase();
    if LOW_REPUTATION_REGISTRARS
        .iter()
        .any(|bad| lowered.contains(&bad.to_lowercase()))
    {
        CheckOutcome::fail(
            CHECK_REGISTRAR,
            format!("Registrar '{}' is low-cost or anonymous", name),
            MINOR_CHECK_PENALTY,
        )
    } else {
        CheckOutcome::pass(CHECK_REGISTRAR, format!("Registrar '{}' appears reputable", name))
    }
}

pub fn assess_privacy(record: &DomainRecord) -> CheckOutcome {
    let fields = [
        record.registrant.name.to_lowercase(),
        record.registrant.organization.to_lowercase(),
    ];
    let masked = fields
        .iter()
        .any(|field| WHOIS_PRIVACY_MARKERS.iter().any(|marker| field.contains(marker)));

    if masked {
        CheckOutcome::fail(CHECK_PRIVACY, "WHOIS privacy protection detected", MINOR_CHECK_PENALTY)
    } else {
        CheckOutcome::pass(CHECK_PRIVACY, "WHOIS data is public")
    }
}

pub fn assess_ssl(tls: &TlsObservation) -> CheckOutcome {
    match tls {
        TlsObservation::Issuer(issuer) if issuer.contains(FREE_CA_MARKER) => {
            CheckOutcome::fail(CHECK_SSL, "Free SSL (Let's Encrypt)", MINOR_CHECK_PENALTY)
        }
        TlsObservation::Issuer(issuer) => {
            CheckOutcome::pass(CHECK_SSL, format!("SSL issued by {}", issuer))
        }
        TlsObservation::Failed(error) => CheckOutcome::fail(
            CHECK_SSL,
            format!("SSL check failed: {}", error),
            MINOR_CHECK_PENALTY,
        ),
    }
}

pub fn assess_hosting(country: &str) -> CheckOutcome {
    if HIGH_RISK_COUNTRIES.contains(&country) {
        CheckOutcome::fail(
            CHECK_HOSTING,
            format!("Hosting country {} is high-risk", country),
            MINOR_CHECK_PENALTY,
        )
    } else {
        CheckOutcome::pass(CHECK_HOSTING, format!("Hosting country {} is low-risk", country))
    }
}

/// Run every check in order and fold the penalties into a score
pub fn evaluate_domain(
    record: &DomainRecord,
    domain: &str,
    tls: &TlsObservation,
    now: DateTime<Utc>,
) -> DomainAssessment {
    let mut checks = vec![
        assess_domain_age(&record.created_date, now),
        assess_update_gap(&record.created_date, &record.updated_date),
        assess_expiry(&record.expires_date, now),
        assess_registrar(&record.registrar_name),
        assess_privacy(record),
        assess_ssl(tls),
    ];
    if let Some(country) = record.registrant.country_code.as_deref().filter(|c| !c.is_empty()) {
        checks.push(assess_hosting(country));
    }

    let mut card = ScoreCard::new(DOMAIN_BASE_SCORE);
    for check in checks.iter().filter(|c| !c.passed) {
        card.deduct(check.penalty, check.reason());
    }

    DomainAssessment {
        domain: domain.to_string(),
        checks,
        result: card.finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::Registrant;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn iso(dt: DateTime<Utc>) -> String {
        dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    fn reputable_record() -> DomainRecord {
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

    #[test]
    fn test_all_checks_pass() {
        let tls = TlsObservation::Issuer("DigiCert Inc".to_string());
        let assessment = evaluate_domain(&reputable_record(), "cat.xyz", &tls, now());
        assert_eq!(assessment.result.score, 50);
        assert!(assessment.result.deductions.is_empty());
        assert_eq!(assessment.checks.len(), 7);
        assert!(assessment.checks.iter().all(|c| c.passed));
        assert_eq!(assessment.checks[5].message, "SSL issued by DigiCert Inc");
    }

    #[test]
    fn test_hostile_domain_bottoms_out() {
        let created = now() - Duration::days(5);
        let mut record = DomainRecord {
            created_date: iso(created),
            updated_date: iso(created),
            expires_date: iso(now() + Duration::days(30)),
            registrar_name: "NAMECHEAP INC".to_string(),
            registrant: Registrant {
                organization: "Proxy Protection LLC".to_string(),
                name: String::new(),
                country_code: None,
            },
        };
        let tls = TlsObservation::Issuer("Let's Encrypt".to_string());

        // 10 + 10 + 10 + 5 + 5 + 5 = 45 -> 5 left
        let assessment = evaluate_domain(&record, "scam.xyz", &tls, now());
        assert_eq!(assessment.checks.len(), 6);
        assert_eq!(assessment.result.score, 5);
        assert_eq!(
            assessment.result.deductions,
            vec![
                "Domain Age: Domain is very new (5 days)",
                "Update Activity: No meaningful update since domain registration",
                "Expiration Length: Domain expires soon (30 days left)",
                "Registrar Reputation: Registrar 'NAMECHEAP INC' is low-cost or anonymous",
                "WHOIS Privacy: WHOIS privacy protection detected",
                "SSL Certificate: Free SSL (Let's Encrypt)",
            ]
        );

        record.registrant.country_code = Some("RU".to_string());
        let assessment = evaluate_domain(&record, "scam.xyz", &tls, now());
        assert_eq!(assessment.result.score, 0);
        assert_eq!(
            assessment.result.deductions.last().map(String::as_str),
            Some("Hosting Location: Hosting country RU is high-risk")
        );
    }

    #[test]
    fn test_unparsable_dates_cost_five_each() {
        let record = DomainRecord {
            registrar_name: "MarkMonitor Inc.".to_string(),
            ..Default::default()
        };
        let tls = TlsObservation::Issuer("DigiCert Inc".to_string());
        let assessment = evaluate_domain(&record, "cat.xyz", &tls, now());

        assert_eq!(assessment.result.score, 35);
        assert!(assessment.result.deductions[0].starts_with("Domain Age: Could not parse creation date"));
        assert!(assessment.result.deductions[1].starts_with("Update Activity: Could not parse update data"));
        assert!(assessment.result.deductions[2].starts_with("Expiration Length: Could not parse expiry data"));
        // Empty country code skips the hosting check
        assert_eq!(assessment.checks.len(), 6);
    }

    #[test]
    fn test_privacy_markers_match_either_field() {
        let mut record = reputable_record();
        record.registrant.name = "REDACTED PRIVATE".to_string();
        assert!(!assess_privacy(&record).passed);

        let mut record = reputable_record();
        record.registrant.organization = "Domains By Proxy, LLC".to_string();
        assert!(!assess_privacy(&record).passed);

        assert!(assess_privacy(&reputable_record()).passed);
    }

    #[test]
    fn test_ssl_failure_is_penalized() {
        let outcome = assess_ssl(&TlsObservation::Failed("connection timed out".to_string()));
        assert!(!outcome.passed);
        assert_eq!(outcome.penalty, 5);
        assert_eq!(outcome.reason(), "SSL Certificate: SSL check failed: connection timed out");
    }

    #[test]
    fn test_update_gap_boundary() {
        assert!(!assess_update_gap("2024-01-01T00:00:00Z", "2024-01-02T23:00:00Z").passed);
        let outcome = assess_update_gap("2024-01-01T00:00:00Z", "2024-01-03T00:00:00Z");
        assert!(outcome.passed);
        assert_eq!(outcome.message, "Domain updated after 2 days");
    }

    #[test]
    fn test_expired_domain_counts_negative_days() {
        let outcome = assess_expiry(&iso(now() - Duration::hours(12)), now());
        assert_eq!(outcome.message, "Domain expires soon (-1 days left)");
    }

    #[test]
    fn test_date_thresholds_on_both_sides() {
        let young = |days: i64| format!("Domain Age: Domain is very new ({} days)", days);
        let short = |days: i64| format!("Expiration Length: Domain expires soon ({} days left)", days);
        let tls = TlsObservation::Issuer("DigiCert Inc".to_string());

        let cases: Vec<(&str, DomainRecord, u32, Vec<String>)> = vec![
            (
                "created 90 days ago",
                DomainRecord {
                    created_date: iso(now() - Duration::days(90)),
                    updated_date: iso(now()),
                    ..reputable_record()
                },
                50,
                vec![],
            ),
            (
                "created 89 days ago",
                DomainRecord {
                    created_date: iso(now() - Duration::days(89)),
                    updated_date: iso(now()),
                    ..reputable_record()
                },
                40,
                vec![young(89)],
            ),
            (
                "created 90 days ago less a minute",
                DomainRecord {
                    created_date: iso(now() - Duration::days(90) + Duration::minutes(1)),
                    updated_date: iso(now()),
                    ..reputable_record()
                },
                40,
                vec![young(89)],
            ),
            (
                "expires in 180 days",
                DomainRecord { expires_date: iso(now() + Duration::days(180)), ..reputable_record() },
                50,
                vec![],
            ),
            (
                "expires in 179 days",
                DomainRecord { expires_date: iso(now() + Duration::days(179)), ..reputable_record() },
                40,
                vec![short(179)],
            ),
            (
                "expires a minute short of 180 days",
                DomainRecord {
                    expires_date: iso(now() + Duration::days(180) - Duration::minutes(1)),
                    ..reputable_record()
                },
                40,
                vec![short(179)],
            ),
        ];

        for (label, record, score, reasons) in cases {
            let assessment = evaluate_domain(&record, "cat.xyz", &tls, now());
            assert_eq!(assessment.result.score, score, "{}: {:?}", label, assessment.result.deductions);
            assert_eq!(assessment.result.deductions, reasons, "{}", label);
        }
    }
}
