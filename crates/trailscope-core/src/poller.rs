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

//! Background poll loop, one task per reading

use crate::definitions::ReadingDef;
use crate::refresh::{Reading, RefreshContext};
use crate::registry::ReadingRegistry;
use chrono::Utc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Spawn the poll loop for one reading.
///
/// The reading is visible immediately as `unknown`; the first poll tick
/// fetches real data. Each task owns its reading and only the resulting
/// snapshots are shared through the registry.
pub fn spawn_reading_poller(
    def: ReadingDef,
    ctx: RefreshContext,
    registry: ReadingRegistry,
    poll_interval: Duration,
    refresh_interval: chrono::Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut reading = Reading::new(def, refresh_interval);
        registry.publish(reading.snapshot()).await;
        info!("🚀 Poller started for '{}'", reading.name());

        loop {
            if reading.refresh_if_due(&ctx, Utc::now()).await {
                let snapshot = reading.snapshot();
                debug!("📊 '{}' -> {}", snapshot.name, snapshot.state);
                registry.publish(snapshot).await;
            }
            tokio::time::sleep(poll_interval).await;
        }
    })
}
