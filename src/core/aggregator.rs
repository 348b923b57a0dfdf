//! Website + social intelligence total (0-100)

use serde::{Deserialize, Serialize};

use crate::models::types::ScoreResult;

pub const NO_WEBSITE_NOTE: &str = "No website exists.";
pub const NO_TWITTER_NOTE: &str = "No Twitter profile link provided.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntelligenceSummary {
    pub domain_score: u32,
    pub social_score: u32,
    pub total: u32,
    /// Domain deductions first, then social
    pub deductions: Vec<String>,
    /// Sections that had nothing to evaluate
    pub notes: Vec<String>,
}

/// Sum the two halves. A missing section counts as 0 and leaves a note.
pub fn aggregate(domain: Option<&ScoreResult>, social: Option<&ScoreResult>) -> IntelligenceSummary {
    let mut summary = IntelligenceSummary::default();

    match domain {
        Some(result) => {
            summary.domain_score = result.score;
            summary.deductions.extend(result.deductions.iter().cloned());
        }
        None => summary.notes.push(NO_WEBSITE_NOTE.to_string()),
    }
    match social {
        Some(result) => {
            summary.social_score = result.score;
            summary.deductions.extend(result.deductions.iter().cloned());
        }
        None => summary.notes.push(NO_TWITTER_NOTE.to_string()),
    }

    summary.total = summary.domain_score + summary.social_score;
    summary
}
