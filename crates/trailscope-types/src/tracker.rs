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

//! Wire types for the tracker API payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named region defined on the tracker side. Read-only from our
/// perspective: fetched and annotated, never created or mutated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Area {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// An area annotated with the display name resolved from its coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedArea {
    pub id: i64,
    pub name: String,
    pub geocode_name: String,
}

/// A validated coordinate sample extracted from a raw points payload entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl TrackPoint {
    /// Extract a point from a raw payload entry. Returns `None` unless both
    /// `latitude` and `longitude` are present and numeric.
    pub fn from_value(value: &Value) -> Option<Self> {
        let latitude = value.get("latitude")?.as_f64()?;
        let longitude = value.get("longitude")?.as_f64()?;
        Some(Self {
            latitude,
            longitude,
        })
    }
}
