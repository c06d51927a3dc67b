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

//! Reading engine: definitions, refresh cycle, throttle gate, geocode
//! enrichment and the heatmap projection.

pub mod definitions;
pub mod enrich;
pub mod heatmap;
pub mod poller;
pub mod refresh;
pub mod registry;
pub mod throttle;

pub use definitions::{ReadingDef, ReadingKind, default_readings};
pub use poller::spawn_reading_poller;
pub use refresh::{Reading, RefreshContext};
pub use registry::ReadingRegistry;
pub use throttle::RefreshGate;
