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

//! Per-reading refresh cycle
//!
//! Every refresh either replaces the reading's value and attributes
//! wholesale from one successful fetch, or resets them to `unknown`. Errors
//! never cross the refresh boundary.

use crate::definitions::{ReadingDef, ReadingKind};
use crate::enrich::enrich_areas;
use crate::heatmap;
use crate::throttle::RefreshGate;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, trace, warn};
use trailscope_client::{GeocodeClient, TrackerClient};
use trailscope_types::{ReadingSnapshot, ReadingValue};

/// Shared handles a refresh needs: both HTTP clients and the directory
/// heatmap images are written to.
#[derive(Debug, Clone)]
pub struct RefreshContext {
    pub tracker: Arc<TrackerClient>,
    pub geocode: Arc<GeocodeClient>,
    pub media_dir: PathBuf,
}

/// One reading: definition, throttle gate and current state.
///
/// Owned exclusively by its poller task; nothing here is shared across
/// readings.
#[derive(Debug)]
pub struct Reading {
    def: ReadingDef,
    gate: RefreshGate,
    value: ReadingValue,
    attributes: Map<String, Value>,
}

struct Outcome {
    value: ReadingValue,
    attributes: Map<String, Value>,
}

impl Outcome {
    fn value(value: ReadingValue) -> Self {
        Self {
            value,
            attributes: Map::new(),
        }
    }
}

impl Reading {
    pub fn new(def: ReadingDef, refresh_interval: chrono::Duration) -> Self {
        Self {
            def,
            gate: RefreshGate::new(refresh_interval),
            value: ReadingValue::Unknown,
            attributes: Map::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.def.name
    }

    pub fn value(&self) -> &ReadingValue {
        &self.value
    }

    pub fn snapshot(&self) -> ReadingSnapshot {
        ReadingSnapshot {
            name: self.def.name.to_string(),
            state: self.value.clone(),
            attributes: self.attributes.clone(),
            icon: self.def.icon.to_string(),
            last_refreshed: self.gate.last_refreshed(),
        }
    }

    /// Refresh only when the throttle gate allows it. Returns whether a
    /// refresh happened.
    pub async fn refresh_if_due(&mut self, ctx: &RefreshContext, now: DateTime<Utc>) -> bool {
        if !self.gate.is_due(now) {
            trace!("⏱️ '{}' not due, keeping current value", self.def.name);
            return false;
        }
        self.refresh(ctx, now).await;
        true
    }

    /// Unconditional refresh. The gate is marked whether the fetch succeeds
    /// or not, so a failing upstream is retried on the next interval, not on
    /// every poll.
    pub async fn refresh(&mut self, ctx: &RefreshContext, now: DateTime<Utc>) {
        debug!("🔄 Refreshing '{}'", self.def.name);
        self.gate.mark(now);

        match compute(&self.def.kind, ctx, now).await {
            Ok(outcome) => {
                self.value = outcome.value;
                self.attributes = outcome.attributes;
            }
            Err(e) => {
                error!("❌ Error refreshing '{}': {e:#}", self.def.name);
                self.value = ReadingValue::Unknown;
                self.attributes = Map::new();
            }
        }
    }
}

async fn compute(
    kind: &ReadingKind,
    ctx: &RefreshContext,
    now: DateTime<Utc>,
) -> anyhow::Result<Outcome> {
    match kind {
        ReadingKind::Stat { field } => {
            let stats = ctx.tracker.stats().await?;
            let value = match stats.get(*field).and_then(Value::as_f64) {
                Some(n) => ReadingValue::Number(n),
                None => {
                    warn!("⚠️ Field '{}' missing from stats payload", field);
                    ReadingValue::Unknown
                }
            };
            Ok(Outcome::value(value))
        }
        ReadingKind::YearlyStats => {
            let stats = ctx.tracker.stats().await?;
            let list = stats
                .get("yearlyStats")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            let mut attributes = Map::new();
            attributes.insert("yearly_stats".to_string(), Value::Array(list.clone()));
            Ok(Outcome {
                value: ReadingValue::Count(list.len()),
                attributes,
            })
        }
        ReadingKind::AreaCount => {
            let areas = ctx.tracker.areas().await?;
            Ok(Outcome::value(ReadingValue::Count(areas.len())))
        }
        ReadingKind::AreaNames => {
            let areas = ctx.tracker.areas().await?;
            let enriched = enrich_areas(&areas, &ctx.geocode).await?;
            let mut attributes = Map::new();
            attributes.insert("areas".to_string(), serde_json::to_value(&enriched)?);
            Ok(Outcome {
                value: ReadingValue::Count(enriched.len()),
                attributes,
            })
        }
        ReadingKind::PointCount { window } => {
            let range = window.map(|w| w.range(now));
            let points = ctx.tracker.points(range).await?;
            Ok(Outcome::value(ReadingValue::Count(points.len())))
        }
        ReadingKind::Heatmap { window } => {
            let points = ctx.tracker.points(Some(window.range(now))).await?;
            let value = match heatmap::render(&points, *window, &ctx.media_dir)? {
                Some(_) => ReadingValue::Image(format!("/local/heatmap_{window}.png")),
                None => ReadingValue::Unknown,
            };
            Ok(Outcome::value(value))
        }
    }
}
