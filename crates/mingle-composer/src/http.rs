// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for a remote text-generation endpoint.
//!
//! Provides [`HttpComposer`] which posts the item's body text to a
//! configured generator URL and expects a JSON `{"comment": "..."}` reply.
//! Transient errors (429, 500, 503) are retried once after a short delay.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use mingle_core::{
    AdapterType, CommentComposer, HealthStatus, MingleError, PlatformAdapter,
};

/// Request payload sent to the generator endpoint.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    text: &'a str,
}

/// Response payload expected from the generator endpoint.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    comment: String,
}

/// HTTP composer backed by a remote generator service.
#[derive(Debug, Clone)]
pub struct HttpComposer {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl HttpComposer {
    /// Creates a composer posting to `base_url` with the given timeout.
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self, MingleError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| MingleError::Composer {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url,
            max_retries: 1,
        })
    }
}

#[async_trait]
impl PlatformAdapter for HttpComposer {
    fn name(&self) -> &str {
        "http-generator"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Composer
    }

    async fn health_check(&self) -> Result<HealthStatus, MingleError> {
        // The generator is best-effort; a failed probe degrades rather
        // than blocks the session, the fallback pool still composes.
        match self.client.get(&self.base_url).send().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => {
                warn!(error = %e, "generator endpoint unreachable");
                Ok(HealthStatus::Degraded(format!(
                    "generator endpoint unreachable: {e}"
                )))
            }
        }
    }

    async fn shutdown(&self) -> Result<(), MingleError> {
        Ok(())
    }
}

#[async_trait]
impl CommentComposer for HttpComposer {
    async fn compose(&self, item_text: &str) -> Result<String, MingleError> {
        let request = GenerateRequest { text: item_text };
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying generator request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&self.base_url)
                .json(&request)
                .send()
                .await
                .map_err(|e| MingleError::Composer {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "generator response received");

            if status.is_success() {
                let body: GenerateResponse =
                    response.json().await.map_err(|e| MingleError::Composer {
                        message: format!("failed to parse generator response: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                if body.comment.trim().is_empty() {
                    return Err(MingleError::Composer {
                        message: "generator returned empty comment".into(),
                        source: None,
                    });
                }
                return Ok(body.comment);
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(MingleError::Composer {
                    message: format!("generator returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(MingleError::Composer {
                message: format!("generator returned {status}: {body}"),
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| MingleError::Composer {
            message: "generator request failed after retries".into(),
            source: None,
        }))
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
