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

//! Shared registry of published reading snapshots

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use trailscope_types::ReadingSnapshot;

/// Latest published snapshot per reading, shared between the poller tasks
/// (writers) and the web server (reader).
#[derive(Debug, Clone, Default)]
pub struct ReadingRegistry {
    snapshots: Arc<RwLock<HashMap<String, ReadingSnapshot>>>,
}

impl ReadingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn publish(&self, snapshot: ReadingSnapshot) {
        let mut snapshots = self.snapshots.write().await;
        snapshots.insert(snapshot.name.clone(), snapshot);
    }

    pub async fn get(&self, name: &str) -> Option<ReadingSnapshot> {
        self.snapshots.read().await.get(name).cloned()
    }

    /// All snapshots ordered by reading name.
    pub async fn snapshot_all(&self) -> Vec<ReadingSnapshot> {
        let snapshots = self.snapshots.read().await;
        let mut all: Vec<ReadingSnapshot> = snapshots.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trailscope_types::ReadingValue;

    #[tokio::test]
    async fn test_publish_and_get() {
        let registry = ReadingRegistry::new();
        registry
            .publish(ReadingSnapshot::unknown("Area Count", "mdi:map-marker-radius"))
            .await;

        let snapshot = registry.get("Area Count").await.unwrap();
        assert!(snapshot.state.is_unknown());
        assert!(registry.get("No Such Reading").await.is_none());
    }

    #[tokio::test]
    async fn test_publish_replaces_wholesale() {
        let registry = ReadingRegistry::new();
        registry
            .publish(ReadingSnapshot::unknown("Total Points", "mdi:counter"))
            .await;

        let mut updated = ReadingSnapshot::unknown("Total Points", "mdi:counter");
        updated.state = ReadingValue::Count(812);
        registry.publish(updated).await;

        let snapshot = registry.get("Total Points").await.unwrap();
        assert_eq!(snapshot.state, ReadingValue::Count(812));
        assert_eq!(registry.snapshot_all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_all_is_sorted() {
        let registry = ReadingRegistry::new();
        registry
            .publish(ReadingSnapshot::unknown("Yearly Stats", "mdi:calendar-multiple"))
            .await;
        registry
            .publish(ReadingSnapshot::unknown("Area Count", "mdi:map-marker-radius"))
            .await;

        let names: Vec<String> = registry
            .snapshot_all()
            .await
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Area Count", "Yearly Stats"]);
    }
}
