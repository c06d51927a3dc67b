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

//! Error types for the HTTP clients

use thiserror::Error;

/// Fetch failure: transport error, non-success status, or a body that does
/// not decode as the expected JSON shape (reqwest reports the latter as a
/// decode error inside `Http`).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("config error: {0}")]
    Config(String),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
