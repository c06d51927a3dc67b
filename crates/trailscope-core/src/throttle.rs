// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Trailscope.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Minimum-interval gate between upstream refreshes

use chrono::{DateTime, Duration, Utc};

/// Gates a reading's refresh so the upstream API is hit at most once per
/// interval, regardless of how often the host polls.
///
/// Each reading owns its own gate; there is no shared timer state. The gate
/// is marked after every attempt, successful or not.
#[derive(Debug, Clone)]
pub struct RefreshGate {
    interval: Duration,
    last_refreshed: Option<DateTime<Utc>>,
}

impl RefreshGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_refreshed: None,
        }
    }

    /// Due when no refresh has happened yet or the interval has elapsed.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.last_refreshed {
            None => true,
            Some(last) => now - last >= self.interval,
        }
    }

    pub fn mark(&mut self, now: DateTime<Utc>) {
        self.last_refreshed = Some(now);
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_before_first_refresh() {
        let gate = RefreshGate::new(Duration::days(1));
        assert!(gate.is_due(Utc::now()));
    }

    #[test]
    fn test_not_due_within_interval() {
        let now = Utc::now();
        let mut gate = RefreshGate::new(Duration::days(1));
        gate.mark(now);

        assert!(!gate.is_due(now + Duration::hours(1)));
        assert!(!gate.is_due(now + Duration::hours(23)));
    }

    #[test]
    fn test_due_after_interval() {
        let now = Utc::now();
        let mut gate = RefreshGate::new(Duration::days(1));
        gate.mark(now);

        // boundary is inclusive
        assert!(gate.is_due(now + Duration::days(1)));
        assert!(gate.is_due(now + Duration::days(2)));
    }

    #[test]
    fn test_mark_moves_the_window() {
        let now = Utc::now();
        let mut gate = RefreshGate::new(Duration::hours(6));
        gate.mark(now);
        gate.mark(now + Duration::hours(6));

        assert!(!gate.is_due(now + Duration::hours(7)));
        assert!(gate.is_due(now + Duration::hours(12)));
        assert_eq!(gate.last_refreshed(), Some(now + Duration::hours(6)));
    }
}
