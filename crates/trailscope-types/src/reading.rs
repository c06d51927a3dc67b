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

//! Reading values and the published snapshot format

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Current value of a reading.
///
/// `Unknown` serializes as JSON `null`, matching how the host renders a
/// reading that has no usable data yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReadingValue {
    Unknown,
    Number(f64),
    Count(usize),
    Image(String),
}

impl ReadingValue {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for ReadingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Count(c) => write!(f, "{c}"),
            Self::Image(url) => f.write_str(url),
        }
    }
}

/// Immutable snapshot of one reading, published after every refresh cycle.
///
/// A snapshot is always replaced wholesale: value and attributes come from
/// the same fetch, never mixed across cycles.
#[derive(Debug, Clone, Serialize)]
pub struct ReadingSnapshot {
    pub name: String,
    pub state: ReadingValue,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
    pub icon: String,
    pub last_refreshed: Option<DateTime<Utc>>,
}

impl ReadingSnapshot {
    pub fn unknown(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: ReadingValue::Unknown,
            attributes: Map::new(),
            icon: icon.into(),
            last_refreshed: None,
        }
    }
}
