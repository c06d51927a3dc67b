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

use crate::error::{ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

const USER_AGENT: &str = "trailscope/0.1";

/// Reverse-geocoding client (Nominatim-compatible `reverse` endpoint).
///
/// Public instances rate-limit aggressively; callers keep the request volume
/// down via the refresh throttle, not here.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    url: String,
    client: Client,
}

impl GeocodeClient {
    pub fn new(url: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Resolve a display name for the given coordinates. Returns "Unknown"
    /// when the service answers without a `display_name` field.
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> ClientResult<String> {
        debug!("🌍 [GEOCODE] Resolving {:.5},{:.5}", latitude, longitude);

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("format", "json".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("❌ [GEOCODE] Status {}: {}", status, message);
            return match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    Err(ClientError::AuthenticationFailed)
                }
                _ => Err(ClientError::Api {
                    status: status.as_u16(),
                    message,
                }),
            };
        }

        let body = response.json::<Value>().await?;
        let name = body
            .get("display_name")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string();

        debug!("🌍 [GEOCODE] {:.5},{:.5} -> {}", latitude, longitude, name);
        Ok(name)
    }
}
