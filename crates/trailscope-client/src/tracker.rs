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
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};
use trailscope_types::{Area, TrackerConfig};

/// Tracker REST API client
///
/// One authenticated GET per call, no retries. A failing call surfaces as a
/// `ClientError` and the caller decides what the reading becomes.
#[derive(Debug, Clone)]
pub struct TrackerClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl TrackerClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        verify_ssl: bool,
    ) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .danger_accept_invalid_certs(!verify_ssl)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {e}")))?;

        let base_url: String = base_url.into();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    pub fn from_config(config: &TrackerConfig) -> ClientResult<Self> {
        Self::new(
            config.api_url.clone(),
            config.api_key.clone(),
            config.verify_ssl,
        )
    }

    /// The stats payload: named numeric fields plus the yearly-stats list.
    /// Kept as raw JSON so readings can extract fields by configured name.
    pub async fn stats(&self) -> ClientResult<Value> {
        self.get_json("/api/v1/stats", &[]).await
    }

    pub async fn areas(&self) -> ClientResult<Vec<Area>> {
        self.get_json("/api/v1/areas", &[]).await
    }

    /// Points, optionally limited to a `[start, end]` range. Entries stay
    /// raw because payloads in the wild carry non-numeric coordinates.
    pub async fn points(
        &self,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> ClientResult<Vec<Value>> {
        let query = match range {
            Some((start, end)) => vec![
                ("start_at", start.to_rfc3339_opts(SecondsFormat::Secs, true)),
                ("end_at", end.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ],
            None => Vec::new(),
        };
        self.get_json("/api/v1/points", &query).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("🔍 [TRACKER] GET {}", path);

        let mut request = self.client.get(&url).bearer_auth(&self.api_key);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                error!("❌ [TRACKER] Authentication failed for {}", path);
                Err(ClientError::AuthenticationFailed)
            }
            _ => {
                let message = response.text().await.unwrap_or_default();
                error!("❌ [TRACKER] Status {} for {}: {}", status, path, message);
                Err(ClientError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn test_stats_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/stats")
            .match_header("authorization", "Bearer test_key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "totalDistanceKm": 1042.7,
                    "totalPointsTracked": 50321,
                    "yearlyStats": [{"year": 2024}, {"year": 2025}]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = TrackerClient::new(server.url(), "test_key", true).unwrap();
        let stats = client.stats().await.unwrap();

        assert_eq!(stats["totalDistanceKm"], json!(1042.7));
        assert_eq!(stats["yearlyStats"].as_array().unwrap().len(), 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_stats_authentication_failed() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/stats")
            .with_status(401)
            .create_async()
            .await;

        let client = TrackerClient::new(server.url(), "bad_key", true).unwrap();
        let result = client.stats().await;

        assert!(matches!(result, Err(ClientError::AuthenticationFailed)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_stats_server_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/stats")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = TrackerClient::new(server.url(), "test_key", true).unwrap();
        let result = client.stats().await;

        assert!(
            matches!(result, Err(ClientError::Api { status: 500, ref message }) if message == "boom")
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_stats_malformed_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/stats")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = TrackerClient::new(server.url(), "test_key", true).unwrap();
        let result = client.stats().await;

        assert!(matches!(result, Err(ClientError::Http(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_areas_parsing() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/areas")
            .with_status(200)
            .with_body(
                json!([
                    {"id": 1, "name": "Home", "latitude": 50.08, "longitude": 14.43},
                    {"id": 2, "name": "Office", "latitude": 50.10, "longitude": 14.50}
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let client = TrackerClient::new(server.url(), "test_key", true).unwrap();
        let areas = client.areas().await.unwrap();

        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].name, "Home");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_points_with_window_query() {
        let mut server = Server::new_async().await;
        let end = Utc::now();
        let start = end - chrono::Duration::days(1);

        let mock = server
            .mock("GET", "/api/v1/points")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded(
                    "start_at".into(),
                    start.to_rfc3339_opts(SecondsFormat::Secs, true),
                ),
                Matcher::UrlEncoded(
                    "end_at".into(),
                    end.to_rfc3339_opts(SecondsFormat::Secs, true),
                ),
            ]))
            .with_status(200)
            .with_body(json!([{"latitude": 1.0, "longitude": 2.0}]).to_string())
            .create_async()
            .await;

        let client = TrackerClient::new(server.url(), "test_key", true).unwrap();
        let points = client.points(Some((start, end))).await.unwrap();

        assert_eq!(points.len(), 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_points_without_window() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/points")
            .match_query(Matcher::Missing)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = TrackerClient::new(server.url(), "test_key", true).unwrap();
        let points = client.points(None).await.unwrap();

        assert!(points.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/stats")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = TrackerClient::new(format!("{}/", server.url()), "test_key", true).unwrap();
        assert!(client.stats().await.is_ok());
        mock.assert_async().await;
    }
}
