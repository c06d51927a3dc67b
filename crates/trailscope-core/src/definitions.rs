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

//! Parametrized reading definitions
//!
//! Every exposed reading is one `ReadingDef` keyed by a `ReadingKind`
//! variant; there is no per-reading type hierarchy.

use trailscope_types::Window;

/// What one reading fetches and how its value is derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadingKind {
    /// One named numeric field from the stats payload
    Stat { field: &'static str },
    /// Count of the yearly-stats list, full list attached as an attribute
    YearlyStats,
    /// Number of defined areas
    AreaCount,
    /// Areas enriched with reverse-geocoded display names
    AreaNames,
    /// Number of points, optionally limited to a window
    PointCount { window: Option<Window> },
    /// Rendered 2D histogram of points within a window
    Heatmap { window: Window },
}

#[derive(Debug, Clone)]
pub struct ReadingDef {
    pub name: &'static str,
    pub kind: ReadingKind,
    pub icon: &'static str,
}

impl ReadingDef {
    pub const fn new(name: &'static str, kind: ReadingKind, icon: &'static str) -> Self {
        Self { name, kind, icon }
    }
}

/// The full default reading set exposed to the host.
pub fn default_readings() -> Vec<ReadingDef> {
    vec![
        ReadingDef::new(
            "Total Distance (Km)",
            ReadingKind::Stat {
                field: "totalDistanceKm",
            },
            "mdi:map-marker-distance",
        ),
        ReadingDef::new(
            "Total Points Tracked",
            ReadingKind::Stat {
                field: "totalPointsTracked",
            },
            "mdi:map-marker-multiple",
        ),
        ReadingDef::new(
            "Total Reverse Geocoded Points",
            ReadingKind::Stat {
                field: "totalReverseGeocodedPoints",
            },
            "mdi:map-search",
        ),
        ReadingDef::new(
            "Total Countries Visited",
            ReadingKind::Stat {
                field: "totalCountriesVisited",
            },
            "mdi:earth",
        ),
        ReadingDef::new(
            "Total Cities Visited",
            ReadingKind::Stat {
                field: "totalCitiesVisited",
            },
            "mdi:city",
        ),
        ReadingDef::new("Area Count", ReadingKind::AreaCount, "mdi:map-marker-radius"),
        ReadingDef::new("Area Names", ReadingKind::AreaNames, "mdi:map-legend"),
        ReadingDef::new(
            "Yearly Stats",
            ReadingKind::YearlyStats,
            "mdi:calendar-multiple",
        ),
        ReadingDef::new(
            "Total Points",
            ReadingKind::PointCount { window: None },
            "mdi:counter",
        ),
        ReadingDef::new(
            "Points Last Day",
            ReadingKind::PointCount {
                window: Some(Window::Day),
            },
            "mdi:history",
        ),
        ReadingDef::new(
            "Points Last Month",
            ReadingKind::PointCount {
                window: Some(Window::Month),
            },
            "mdi:history",
        ),
        ReadingDef::new(
            "Points Last Year",
            ReadingKind::PointCount {
                window: Some(Window::Year),
            },
            "mdi:history",
        ),
        ReadingDef::new(
            "Heatmap Last Day",
            ReadingKind::Heatmap {
                window: Window::Day,
            },
            "mdi:map",
        ),
        ReadingDef::new(
            "Heatmap Last Week",
            ReadingKind::Heatmap {
                window: Window::Week,
            },
            "mdi:map",
        ),
        ReadingDef::new(
            "Heatmap Last Month",
            ReadingKind::Heatmap {
                window: Window::Month,
            },
            "mdi:map",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_reading_set() {
        let readings = default_readings();
        assert_eq!(readings.len(), 15);

        let names: HashSet<&str> = readings.iter().map(|r| r.name).collect();
        assert_eq!(names.len(), readings.len(), "reading names must be unique");
    }

    #[test]
    fn test_heatmap_windows() {
        let windows: Vec<Window> = default_readings()
            .iter()
            .filter_map(|r| match r.kind {
                ReadingKind::Heatmap { window } => Some(window),
                _ => None,
            })
            .collect();

        assert_eq!(windows, vec![Window::Day, Window::Week, Window::Month]);
    }
}
