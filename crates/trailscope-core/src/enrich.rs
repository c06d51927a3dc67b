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

//! Reverse-geocoding enrichment of the area list

use trailscope_client::{ClientResult, GeocodeClient};
use trailscope_types::{Area, EnrichedArea};

/// Resolve a display name for every area, strictly sequentially.
///
/// One lookup per area per cycle, no caching across areas that share
/// coordinates. A single failed lookup aborts the whole cycle so the reading
/// never publishes a partially enriched list.
pub async fn enrich_areas(
    areas: &[Area],
    geocode: &GeocodeClient,
) -> ClientResult<Vec<EnrichedArea>> {
    let mut enriched = Vec::with_capacity(areas.len());
    for area in areas {
        let geocode_name = geocode.reverse(area.latitude, area.longitude).await?;
        enriched.push(EnrichedArea {
            id: area.id,
            name: area.name.clone(),
            geocode_name,
        });
    }
    Ok(enriched)
}
