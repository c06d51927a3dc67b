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

//! Relative time windows used to filter time-stamped tracker data

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A relative time range ending at "now".
///
/// Month and year use fixed 30/365-day approximations rather than calendar
/// arithmetic. This matches the upstream API's expectations and is an
/// accepted simplification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    Day,
    Week,
    Month,
    Year,
}

impl Window {
    pub const ALL: [Self; 4] = [Self::Day, Self::Week, Self::Month, Self::Year];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    pub fn duration(self) -> Duration {
        match self {
            Self::Day => Duration::days(1),
            Self::Week => Duration::weeks(1),
            Self::Month => Duration::days(30),
            Self::Year => Duration::days(365),
        }
    }

    /// Compute the `(start, end)` pair for this window relative to `now`.
    /// `end` is always `now` itself.
    pub fn range(self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (now - self.duration(), now)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_end_is_now() {
        let now = Utc::now();
        for window in Window::ALL {
            let (_, end) = window.range(now);
            assert_eq!(end, now);
        }
    }

    #[test]
    fn test_range_widths_are_fixed() {
        let now = Utc::now();

        let (start, end) = Window::Day.range(now);
        assert_eq!(end - start, Duration::days(1));

        let (start, end) = Window::Week.range(now);
        assert_eq!(end - start, Duration::days(7));

        let (start, end) = Window::Month.range(now);
        assert_eq!(end - start, Duration::days(30));

        let (start, end) = Window::Year.range(now);
        assert_eq!(end - start, Duration::days(365));
    }

    #[test]
    fn test_as_str_roundtrip() {
        for window in Window::ALL {
            let json = serde_json::to_string(&window).unwrap();
            assert_eq!(json, format!("\"{}\"", window.as_str()));
            let back: Window = serde_json::from_str(&json).unwrap();
            assert_eq!(back, window);
        }
    }
}
