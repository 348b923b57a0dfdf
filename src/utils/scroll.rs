//! Scroll Policy - bounded, jittered page scrolling for the social scraper
//!
//! The loop stops after `max_scrolls` steps, or earlier once the page has
//! not moved for `stall_limit` consecutive steps.

use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

use crate::utils::constants::{
    DEFAULT_SCROLL_COUNT, RETRY_CLICK_PAUSES_MS, SCROLL_MAX_DELAY_MS, SCROLL_MAX_INCREMENT_PX,
    SCROLL_MIN_DELAY_MS, SCROLL_MIN_INCREMENT_PX, SCROLL_STALL_BONUS_PX, SCROLL_STALL_LIMIT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollPolicy {
    pub max_scrolls: u32,
    pub stall_limit: u32,
    pub min_increment_px: i64,
    pub max_increment_px: i64,
    pub stall_bonus_px: i64,
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        Self {
            max_scrolls: DEFAULT_SCROLL_COUNT,
            stall_limit: SCROLL_STALL_LIMIT,
            min_increment_px: SCROLL_MIN_INCREMENT_PX,
            max_increment_px: SCROLL_MAX_INCREMENT_PX,
            stall_bonus_px: SCROLL_STALL_BONUS_PX,
            min_delay: Duration::from_millis(SCROLL_MIN_DELAY_MS),
            max_delay: Duration::from_millis(SCROLL_MAX_DELAY_MS),
        }
    }
}

/// One scroll instruction: where to scroll and how long to wait afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollStep {
    pub target: i64,
    pub delay: Duration,
    /// Page had not moved since the previous step
    pub stalled: bool,
}

#[derive(Debug, Clone)]
pub struct ScrollState {
    policy: ScrollPolicy,
    steps_taken: u32,
    last_position: i64,
    stalled_steps: u32,
}

impl ScrollState {
    pub fn new(policy: ScrollPolicy) -> Self {
        Self {
            policy,
            steps_taken: 0,
            last_position: 0,
            stalled_steps: 0,
        }
    }

    /// Plan the next scroll from the current page offset.
    /// Returns `None` once the step budget is spent.
    pub fn next_step<R: Rng + ?Sized>(&mut self, current: i64, rng: &mut R) -> Option<ScrollStep> {
        if self.steps_taken >= self.policy.max_scrolls {
            return None;
        }
        self.steps_taken += 1;

        let mut increment =
            rng.gen_range(self.policy.min_increment_px..=self.policy.max_increment_px);
        let stalled = current == self.last_position;
        if stalled {
            increment += self.policy.stall_bonus_px;
            self.stalled_steps += 1;
        } else {
            self.stalled_steps = 0;
        }
        self.last_position = current;

        let min_ms = self.policy.min_delay.as_millis() as u64;
        let max_ms = self.policy.max_delay.as_millis() as u64;
        let delay = Duration::from_millis(rng.gen_range(min_ms..=max_ms.max(min_ms)));

        Some(ScrollStep {
            target: current + increment,
            delay,
            stalled,
        })
    }

    /// Too many consecutive steps without page movement
    pub fn is_stalled_out(&self) -> bool {
        self.stalled_steps >= self.policy.stall_limit
    }

    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }
}

/// Pause after clicking the timeline "Retry" button
pub fn retry_pause<R: Rng + ?Sized>(rng: &mut R) -> Duration {
    let ms = RETRY_CLICK_PAUSES_MS
        .choose(rng)
        .copied()
        .unwrap_or(RETRY_CLICK_PAUSES_MS[0]);
    Duration::from_millis(ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_step_budget_is_bounded() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = ScrollState::new(ScrollPolicy::default());
        let mut position = 0;
        let mut steps = 0;
        while let Some(step) = state.next_step(position, &mut rng) {
            position = step.target;
            steps += 1;
        }
        assert_eq!(steps, 3);
        assert_eq!(state.steps_taken(), 3);
    }

    #[test]
    fn test_increment_and_delay_within_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let policy = ScrollPolicy {
            max_scrolls: 50,
            ..ScrollPolicy::default()
        };
        let mut state = ScrollState::new(policy);
        let mut position = 1_000;
        while let Some(step) = state.next_step(position, &mut rng) {
            let increment = step.target - position;
            let max = policy.max_increment_px + if step.stalled { policy.stall_bonus_px } else { 0 };
            assert!(increment >= policy.min_increment_px && increment <= max);
            assert!(step.delay >= policy.min_delay && step.delay <= policy.max_delay);
            position = step.target;
        }
    }

    #[test]
    fn test_stops_after_consecutive_stalls() {
        let mut rng = StdRng::seed_from_u64(1);
        let policy = ScrollPolicy {
            max_scrolls: 20,
            ..ScrollPolicy::default()
        };
        let mut state = ScrollState::new(policy);

        // Page never moves: every step counts as a stall.
        for i in 1..=5 {
            let step = state.next_step(0, &mut rng).unwrap();
            assert!(step.stalled);
            assert_eq!(state.is_stalled_out(), i == 5);
        }
    }

    #[test]
    fn test_movement_resets_stall_counter() {
        let mut rng = StdRng::seed_from_u64(3);
        let policy = ScrollPolicy {
            max_scrolls: 20,
            ..ScrollPolicy::default()
        };
        let mut state = ScrollState::new(policy);
        for _ in 0..4 {
            state.next_step(0, &mut rng);
        }
        let step = state.next_step(800, &mut rng).unwrap();
        assert!(!step.stalled);
        assert!(!state.is_stalled_out());
    }

    #[test]
    fn test_retry_pause_options() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            let pause = retry_pause(&mut rng);
            assert!(pause == Duration::from_secs(1) || pause == Duration::from_secs(2));
        }
    }
}
