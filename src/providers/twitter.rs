//! X/Twitter scraper over WebDriver (chromedriver + headless Chrome)
//!
//! Header fields are read once; tweet counters are collected after every
//! scroll step, duplicates included. Any selector that misses yields "N/A"
//! (header) or "0" (tweet counter) instead of an error.

use async_trait::async_trait;
use eyre::{eyre, Result};
use fantoccini::elements::Element;
use fantoccini::{Client, ClientBuilder, Locator};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::SocialScraper;
use crate::models::types::{SocialCommunity, SocialProfile, TweetMetric};
use crate::utils::constants::WEBDRIVER_WAIT_SECS;
use crate::utils::scroll::{retry_pause, ScrollPolicy, ScrollState};

const NOT_AVAILABLE: &str = "N/A";

mod selectors {
    pub const ARTICLE: &str = "//article";
    pub const TWEET_CELL: &str = "div[data-testid='cellInnerDiv']";
    pub const LIKE: &str = "[data-testid='like']";
    pub const RETWEET: &str = "[data-testid='retweet']";
    pub const REPLY: &str = "[data-testid='reply']";
    pub const VIEWS_LINK: &str = ".//a[contains(@aria-label, 'views')]";
    pub const RETRY_BUTTON: &str = "//button[.//span[text()='Retry']]";

    pub const USERNAME: &str = "//span[starts-with(normalize-space(text()), '@')]";
    pub const USER_DESCRIPTION: &str = "//div[@data-testid='UserDescription']";
    pub const JOIN_DATE: &str =
        "//div[@data-testid='UserProfileHeader_Items']//span[contains(text(), 'Joined')]";
    pub const FOLLOWING: &str = "//a[contains(@href, '/following')]//span[1]";
    pub const FOLLOWERS: &str = "//a[contains(@href, '/followers') or contains(@href, '/verified_followers')]//span[1]";

    pub const COMMUNITY_NAME: &str =
        "//h2[@dir='ltr' and @role='heading' and contains(@class, 'r-qvutc0')]";
    pub const COMMUNITY_DESCRIPTION: &str =
        "//div[@dir='ltr' and contains(@style, '-webkit-line-clamp')]";
    pub const COMMUNITY_FACEPILE: &str = "//button[@data-testid='community-facepile']";
    pub const COMMUNITY_MEMBERS: &str =
        ".//span[.//text()[normalize-space()='Members']]/preceding-sibling::span[1]";
}

/// "1,204 views" -> "1,204"
pub fn views_from_label(label: &str) -> String {
    label
        .split(" views")
        .next()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("0")
        .to_string()
}

/// Headless Chrome capabilities for a new session
pub fn chrome_capabilities() -> Map<String, Value> {
    let mut caps = Map::new();
    caps.insert(
        "goog:chromeOptions".to_string(),
        json!({
            "args": ["--no-sandbox", "--disable-dev-shm-usage", "--disable-gpu", "--headless=new"]
        }),
    );
    caps
}

pub struct WebDriverScraper {
    webdriver_url: String,
    policy: ScrollPolicy,
    wait: Duration,
}

impl WebDriverScraper {
    pub fn new(webdriver_url: impl Into<String>, policy: ScrollPolicy) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            policy,
            wait: Duration::from_secs(WEBDRIVER_WAIT_SECS),
        }
    }

    async fn open(&self, url: &str) -> Result<Client> {
        let client = ClientBuilder::native()
            .capabilities(chrome_capabilities())
            .connect(&self.webdriver_url)
            .await
            .map_err(|e| eyre!("WebDriver session failed: {}", e))?;

        let loaded = async {
            client.goto(url).await.map_err(|e| eyre!("Navigation failed: {}", e))?;
            client
                .wait()
                .at_most(self.wait)
                .for_element(Locator::XPath(selectors::ARTICLE))
                .await
                .map_err(|e| eyre!("Timeline did not load: {}", e))?;
            Ok::<_, eyre::Report>(())
        }
        .await;

        match loaded {
            Ok(()) => Ok(client),
            Err(e) => {
                note_close(client.close().await);
                Err(e)
            }
        }
    }

    /// Scroll the timeline and collect tweet counters after each step
    async fn scrape_timeline(&self, client: &Client) -> Vec<TweetMetric> {
        let mut rng = StdRng::from_entropy();
        let mut state = ScrollState::new(self.policy);
        let mut tweets = Vec::new();

        loop {
            let current = match client.execute("return window.pageYOffset;", vec![]).await {
                Ok(v) => v.as_f64().unwrap_or(0.0) as i64,
                Err(e) => {
                    warn!("⚠️ Scroll error: {}", e);
                    break;
                }
            };
            let Some(step) = state.next_step(current, &mut rng) else {
                break;
            };

            let script = format!("window.scrollTo({{top: {}, behavior: 'smooth'}});", step.target);
            if let Err(e) = client.execute(&script, vec![]).await {
                warn!("⚠️ Scroll error: {}", e);
                break;
            }
            tokio::time::sleep(step.delay).await;

            if let Ok(button) = client.find(Locator::XPath(selectors::RETRY_BUTTON)).await {
                if button.is_displayed().await.unwrap_or(false) && button.click().await.is_ok() {
                    debug!("Clicked timeline Retry");
                    tokio::time::sleep(retry_pause(&mut rng)).await;
                }
            }

            if state.is_stalled_out() {
                break;
            }

            let waited = client
                .wait()
                .at_most(self.wait)
                .for_element(Locator::Css(selectors::TWEET_CELL))
                .await;
            if waited.is_err() {
                continue;
            }
            let cells = match client.find_all(Locator::Css(selectors::TWEET_CELL)).await {
                Ok(cells) => cells,
                Err(_) => continue,
            };
            debug!("[Scroll {}] {} tweet containers", state.steps_taken(), cells.len());

            for cell in cells {
                if let Some(metric) = read_tweet(&cell).await {
                    tweets.push(metric);
                }
            }
        }

        tweets
    }

    async fn profile_from(&self, client: &Client) -> SocialProfile {
        SocialProfile {
            username: text_or_na(client, selectors::USERNAME).await,
            description: text_or_na(client, selectors::USER_DESCRIPTION).await,
            joined: text_or_na(client, selectors::JOIN_DATE).await,
            following: text_or_na(client, selectors::FOLLOWING).await,
            followers: text_or_na(client, selectors::FOLLOWERS).await,
            tweets: self.scrape_timeline(client).await,
        }
    }

    async fn community_from(&self, client: &Client) -> SocialCommunity {
        let members = match client.find(Locator::XPath(selectors::COMMUNITY_FACEPILE)).await {
            Ok(button) => match button.find(Locator::XPath(selectors::COMMUNITY_MEMBERS)).await {
                Ok(span) => span.text().await.map(|t| t.trim().to_string()).ok(),
                Err(_) => None,
            },
            Err(_) => None,
        };

        SocialCommunity {
            name: text_or_na(client, selectors::COMMUNITY_NAME).await,
            description: text_or_na(client, selectors::COMMUNITY_DESCRIPTION).await,
            members: members.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            tweets: self.scrape_timeline(client).await,
        }
    }
}

async fn text_or_na(client: &Client, xpath: &str) -> String {
    match client.find(Locator::XPath(xpath)).await {
        Ok(el) => el
            .text()
            .await
            .map(|t| t.trim().to_string())
            .unwrap_or_else(|_| NOT_AVAILABLE.to_string()),
        Err(_) => NOT_AVAILABLE.to_string(),
    }
}

async fn counter(cell: &Element, css: &str) -> Option<String> {
    let el = cell.find(Locator::Css(css)).await.ok()?;
    let text = el.text().await.ok()?;
    let text = text.trim();
    Some(if text.is_empty() { "0".to_string() } else { text.to_string() })
}

/// Cells without the three action buttons (ads, separators) are skipped
async fn read_tweet(cell: &Element) -> Option<TweetMetric> {
    let likes = counter(cell, selectors::LIKE).await?;
    let retweets = counter(cell, selectors::RETWEET).await?;
    let comments = counter(cell, selectors::REPLY).await?;

    let views = match cell.find(Locator::XPath(selectors::VIEWS_LINK)).await {
        Ok(link) => link
            .attr("aria-label")
            .await
            .ok()
            .flatten()
            .map(|label| views_from_label(&label))
            .unwrap_or_else(|| "0".to_string()),
        Err(_) => "0".to_string(),
    };

    Some(TweetMetric {
        comments,
        likes,
        retweets,
        views,
    })
}

/// Close outcome after a failed page load; the load error is what gets reported
fn note_close<E: std::fmt::Display>(result: std::result::Result<(), E>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            debug!("WebDriver session close failed: {}", e);
            false
        }
    }
}

#[async_trait]
impl SocialScraper for WebDriverScraper {
    async fn fetch_profile(&self, url: &str) -> Result<SocialProfile> {
        info!("🐦 Scraper: Loading profile {}", url);
        let client = self.open(url).await?;
        let profile = self.profile_from(&client).await;
        if let Err(e) = client.close().await {
            warn!("⚠️ WebDriver close failed: {}", e);
        }
        info!("🐦 Scraper: {} with {} tweets", profile.username, profile.tweets.len());
        Ok(profile)
    }

    async fn fetch_community(&self, url: &str) -> Result<SocialCommunity> {
        info!("👥 Scraper: Loading community {}", url);
        let client = self.open(url).await?;
        let community = self.community_from(&client).await;
        if let Err(e) = client.close().await {
            warn!("⚠️ WebDriver close failed: {}", e);
        }
        info!("👥 Scraper: {} with {} tweets", community.name, community.tweets.len());
        Ok(community)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_views_from_label() {
        assert_eq!(views_from_label("1,204 views. View post analytics"), "1,204");
        assert_eq!(views_from_label("12K views"), "12K");
        assert_eq!(views_from_label(" views"), "0");
    }

    #[test]
    fn test_close_failure_is_noted_not_raised() {
        assert!(note_close(Ok::<(), &str>(())));
        assert!(!note_close(Err("session already gone")));
    }

    #[test]
    fn test_headless_chrome_args() {
        let caps = chrome_capabilities();
        let args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(args.iter().any(|a| a == "--headless=new"));
        assert!(args.iter().any(|a| a == "--no-sandbox"));
    }
}
