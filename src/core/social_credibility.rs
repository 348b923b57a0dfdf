//! Social Credibility Scoring
//!
//! Scores a scraped X/Twitter account or community out of 50. Deductions
//! come in a fixed order: audience size, description, join date (accounts
//! only), tweet count, then organic engagement.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::types::{
    CheckOutcome, ScoreCard, ScoreResult, SocialCommunity, SocialData, SocialProfile, TweetMetric,
};
use crate::utils::constants::*;
use crate::utils::parser::{parse_compact_count, parse_joined_date, try_parse_compact};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialKind {
    Profile,
    Community,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialAssessment {
    pub kind: SocialKind,
    /// Account handle or community name
    pub display_name: String,
    pub description: String,
    /// Followers or members; `None` when the text could not be parsed
    pub audience: Option<u64>,
    pub following: Option<String>,
    pub joined: Option<NaiveDate>,
    pub tweet_count: usize,
    pub organic_tweets: usize,
    pub checks: Vec<CheckOutcome>,
    pub result: ScoreResult,
}

/// Comments > 3, likes > 5 and retweets > 2
pub fn is_organic(tweet: &TweetMetric) -> bool {
    parse_compact_count(&tweet.comments) > ORGANIC_MIN_COMMENTS
        && parse_compact_count(&tweet.likes) > ORGANIC_MIN_LIKES
        && parse_compact_count(&tweet.retweets) > ORGANIC_MIN_RETWEETS
}

/// Organic tweets, counting identical scraped rows once
pub fn count_unique_organic(tweets: &[TweetMetric]) -> usize {
    let mut seen = HashSet::new();
    tweets
        .iter()
        .filter(|t| seen.insert(*t))
        .filter(|t| is_organic(t))
        .count()
}

fn fold_checks(checks: &[CheckOutcome]) -> ScoreResult {
    let mut card = ScoreCard::new(SOCIAL_BASE_SCORE);
    for check in checks.iter().filter(|c| !c.passed) {
        card.deduct(check.penalty, check.message.clone());
    }
    card.finish()
}

pub fn evaluate_community(community: &SocialCommunity) -> SocialAssessment {
    let mut checks = Vec::with_capacity(4);

    let members = parse_compact_count(&community.members);
    checks.push(if members < MIN_COMMUNITY_MEMBERS {
        CheckOutcome::fail("Members", "Low member count", LOW_MEMBERS_PENALTY)
    } else {
        CheckOutcome::pass("Members", format!("{} members", members))
    });

    checks.push(if community.description.chars().count() < MIN_DESCRIPTION_CHARS {
        CheckOutcome::fail("Description", "Sparse description", SPARSE_DESCRIPTION_PENALTY)
    } else {
        CheckOutcome::pass("Description", "Informative description")
    });

    let tweet_count = community.tweets.len();
    checks.push(if tweet_count < MIN_TWEETS {
        CheckOutcome::fail("Tweets", "Few or no community tweets", FEW_COMMUNITY_TWEETS_PENALTY)
    } else {
        CheckOutcome::pass("Tweets", format!("{} tweets found", tweet_count))
    });

    let organic = count_unique_organic(&community.tweets);
    checks.push(if organic < MIN_ORGANIC_TWEETS {
        CheckOutcome::fail("Engagement", "Low engagement", LOW_ENGAGEMENT_PENALTY)
    } else {
        CheckOutcome::pass("Engagement", "Organic activity detected")
    });

    let result = fold_checks(&checks);
    SocialAssessment {
        kind: SocialKind::Community,
        display_name: community.name.clone(),
        description: community.description.clone(),
        audience: Some(members),
        following: None,
        joined: None,
        tweet_count,
        organic_tweets: organic,
        checks,
        result,
    }
}

pub fn evaluate_profile(profile: &SocialProfile, today: NaiveDate) -> SocialAssessment {
    let mut checks = Vec::with_capacity(5);

    let followers = try_parse_compact(&profile.followers);
    checks.push(match followers {
        None => CheckOutcome::fail("Followers", "Unable to parse followers", LOW_FOLLOWERS_PENALTY),
        Some(n) if n < MIN_PROFILE_FOLLOWERS => {
            CheckOutcome::fail("Followers", "Low followers", LOW_FOLLOWERS_PENALTY)
        }
        Some(n) => CheckOutcome::pass("Followers", format!("{} followers", n)),
    });

    checks.push(if profile.description.chars().count() < MIN_DESCRIPTION_CHARS {
        CheckOutcome::fail("Bio", "Short/incomplete bio", SPARSE_DESCRIPTION_PENALTY)
    } else {
        CheckOutcome::pass("Bio", "Meaningful profile description")
    });

    let joined = parse_joined_date(&profile.joined);
    checks.push(match joined {
        None => CheckOutcome::fail("Join Date", "Could not parse join date", UNPARSABLE_JOIN_PENALTY),
        Some(date) => {
            let days = (today - date).num_days();
            if days < JOINED_VERY_RECENT_DAYS {
                CheckOutcome::fail(
                    "Join Date",
                    "Profile joined recently (within 2 months)",
                    JOINED_VERY_RECENT_PENALTY,
                )
            } else if days < JOINED_RECENT_DAYS {
                CheckOutcome::fail(
                    "Join Date",
                    "Profile joined recently (within 6 months)",
                    JOINED_RECENT_PENALTY,
                )
            } else {
                CheckOutcome::pass("Join Date", format!("Established account ({})", profile.joined))
            }
        }
    });

    let tweet_count = profile.tweets.len();
    checks.push(if tweet_count < MIN_TWEETS {
        CheckOutcome::fail("Tweets", "Very few tweets", FEW_PROFILE_TWEETS_PENALTY)
    } else {
        CheckOutcome::pass("Tweets", format!("{} recent tweets found", tweet_count))
    });

    // Accounts are not deduplicated; every scraped row counts
    let organic = profile.tweets.iter().filter(|t| is_organic(t)).count();
    checks.push(if organic < MIN_ORGANIC_TWEETS {
        CheckOutcome::fail("Engagement", "Low organic engagement on tweets", LOW_ENGAGEMENT_PENALTY)
    } else {
        CheckOutcome::pass("Engagement", "Tweet interactions appear organic")
    });

    let result = fold_checks(&checks);
    SocialAssessment {
        kind: SocialKind::Profile,
        display_name: profile.username.clone(),
        description: profile.description.clone(),
        audience: followers,
        following: Some(profile.following.clone()),
        joined,
        tweet_count,
        organic_tweets: organic,
        checks,
        result,
    }
}

pub fn evaluate_social(data: &SocialData, now: DateTime<Utc>) -> SocialAssessment {
    match data {
        SocialData::Profile(profile) => evaluate_profile(profile, now.date_naive()),
        SocialData::Community(community) => evaluate_community(community),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tweet(comments: &str, likes: &str, retweets: &str, views: &str) -> TweetMetric {
        TweetMetric {
            comments: comments.to_string(),
            likes: likes.to_string(),
            retweets: retweets.to_string(),
            views: views.to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn established_profile() -> SocialProfile {
        SocialProfile {
            username: "@catcoin".to_string(),
            description: "The original cat token on Solana.".to_string(),
            joined: "Joined March 2021".to_string(),
            followers: "12.3K".to_string(),
            following: "120".to_string(),
            tweets: vec![
                tweet("12", "1.2K", "40", "50K"),
                tweet("8", "300", "15", "9K"),
                tweet("0", "2", "0", "100"),
            ],
        }
    }

    #[test]
    fn test_organic_threshold_is_strict() {
        assert!(is_organic(&tweet("4", "6", "3", "0")));
        assert!(!is_organic(&tweet("3", "6", "3", "0")));
        assert!(!is_organic(&tweet("4", "5", "3", "0")));
        assert!(!is_organic(&tweet("4", "6", "2", "0")));
        assert!(is_organic(&tweet("1.2K", "3K", "1,204", "0")));
    }

    #[test]
    fn test_established_profile_keeps_full_score() {
        let assessment = evaluate_profile(&established_profile(), today());
        assert_eq!(assessment.result.score, 50);
        assert_eq!(assessment.audience, Some(12_300));
        assert_eq!(assessment.organic_tweets, 2);
        assert_eq!(assessment.checks.len(), 5);
    }

    #[test]
    fn test_fresh_profile_deductions_in_order() {
        let profile = SocialProfile {
            username: "@newcat".to_string(),
            description: "gm".to_string(),
            joined: "Joined May 2025".to_string(),
            followers: "N/A".to_string(),
            following: "N/A".to_string(),
            tweets: vec![tweet("9", "9", "9", "9")],
        };
        let assessment = evaluate_profile(&profile, today());
        assert_eq!(
            assessment.result.deductions,
            vec![
                "Unable to parse followers",
                "Short/incomplete bio",
                "Profile joined recently (within 2 months)",
                "Very few tweets",
                "Low organic engagement on tweets",
            ]
        );
        assert_eq!(assessment.result.score, 10);
    }

    #[test]
    fn test_join_date_windows() {
        let mut profile = established_profile();
        profile.joined = "Joined February 2025".to_string();
        let assessment = evaluate_profile(&profile, today());
        assert_eq!(assessment.result.deductions, vec!["Profile joined recently (within 6 months)"]);
        assert_eq!(assessment.result.score, 45);

        profile.joined = "N/A".to_string();
        let assessment = evaluate_profile(&profile, today());
        assert_eq!(assessment.result.deductions, vec!["Could not parse join date"]);
        assert_eq!(assessment.result.score, 47);
    }

    #[test]
    fn test_low_follower_count() {
        let mut profile = established_profile();
        profile.followers = "999".to_string();
        let assessment = evaluate_profile(&profile, today());
        assert_eq!(assessment.result.deductions, vec!["Low followers"]);
    }

    #[test]
    fn test_community_dedups_before_engagement() {
        let busy = tweet("10", "50", "5", "1K");
        let community = SocialCommunity {
            name: "Cat Army".to_string(),
            description: "Official community for cat holders".to_string(),
            members: "2,450".to_string(),
            tweets: vec![busy.clone(), busy.clone(), busy],
        };
        let assessment = evaluate_community(&community);
        // Three rows pass the count check, but only one unique organic tweet
        assert_eq!(assessment.tweet_count, 3);
        assert_eq!(assessment.organic_tweets, 1);
        assert_eq!(assessment.result.deductions, vec!["Low engagement"]);
        assert_eq!(assessment.result.score, 40);
        assert_eq!(assessment.audience, Some(2_450));
    }

    #[test]
    fn test_empty_community_scores_ten() {
        let community = SocialCommunity {
            name: "N/A".to_string(),
            description: String::new(),
            members: "garbage".to_string(),
            tweets: vec![],
        };
        let assessment = evaluate_community(&community);
        assert_eq!(
            assessment.result.deductions,
            vec!["Low member count", "Sparse description", "Few or no community tweets", "Low engagement"]
        );
        assert_eq!(assessment.result.score, 10);
    }

    #[test]
    fn test_dispatch_by_variant() {
        let now = chrono::TimeZone::with_ymd_and_hms(&Utc, 2025, 6, 15, 9, 0, 0).unwrap();
        let data = SocialData::Profile(established_profile());
        assert_eq!(evaluate_social(&data, now).kind, SocialKind::Profile);
    }
}
