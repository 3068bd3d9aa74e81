//! External identity provider used for social login.
//!
//! The provider exchanges an opaque access token for a verified profile.
//! [`GoogleIdentityProvider`] talks to Google's OpenID Connect userinfo
//! endpoint; tests substitute their own [`IdentityProvider`].

use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use usersvc_config::IdentityConfig;
use usersvc_core::AppError;

/// Verified profile returned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdentityProfile {
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "given_name")]
    pub given_name: String,
    #[serde(default, rename = "family_name")]
    pub family_name: String,
    #[serde(default)]
    pub picture: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Short provider name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Resolves `access_token` to a profile.
    ///
    /// Returns 401 when the provider rejects the token and 502 for any other
    /// provider failure.
    async fn fetch_profile(&self, access_token: &str) -> Result<IdentityProfile, AppError>;
}

pub struct GoogleIdentityProvider {
    client: reqwest::Client,
    userinfo_url: String,
}

impl GoogleIdentityProvider {
    pub fn new(config: &IdentityConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::internal(anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            userinfo_url: config.userinfo_url.clone(),
        })
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<IdentityProfile, AppError> {
        let response = self
            .client
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::bad_gateway(anyhow!("Identity provider unreachable: {}", e)))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(AppError::unauthorized("Unauthorized identity provider token"));
            }
            status if !status.is_success() => {
                return Err(AppError::bad_gateway(anyhow!(
                    "Identity provider returned {}",
                    status
                )));
            }
            _ => {}
        }

        let profile: IdentityProfile = response.json().await.map_err(|e| {
            AppError::bad_gateway(anyhow!("Invalid identity provider response: {}", e))
        })?;

        if profile.email.trim().is_empty() {
            return Err(AppError::bad_gateway(anyhow!(
                "Identity provider returned a profile without email"
            )));
        }

        Ok(profile)
    }
}
