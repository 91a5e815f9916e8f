// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generator-with-fallback composition strategy.

use async_trait::async_trait;
use tracing::warn;

use mingle_core::{
    AdapterType, CommentComposer, HealthStatus, MingleError, PlatformAdapter,
};

use crate::http::HttpComposer;
use crate::pool::TemplatePool;

/// Composer that tries the remote generator first and falls back to the
/// static template pool on ANY generator failure.
///
/// With no generator configured this degenerates to the pool alone.
pub struct FallbackComposer {
    generator: Option<HttpComposer>,
    pool: TemplatePool,
}

impl FallbackComposer {
    pub fn new(generator: Option<HttpComposer>, pool: TemplatePool) -> Self {
        Self { generator, pool }
    }
}

#[async_trait]
impl PlatformAdapter for FallbackComposer {
    fn name(&self) -> &str {
        "composer"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Composer
    }

    async fn health_check(&self) -> Result<HealthStatus, MingleError> {
        // The pool cannot fail, so the composite is at worst degraded.
        match &self.generator {
            Some(generator) => generator.health_check().await,
            None => Ok(HealthStatus::Healthy),
        }
    }

    async fn shutdown(&self) -> Result<(), MingleError> {
        if let Some(generator) = &self.generator {
            generator.shutdown().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl CommentComposer for FallbackComposer {
    async fn compose(&self, item_text: &str) -> Result<String, MingleError> {
        if let Some(generator) = &self.generator {
            match generator.compose(item_text).await {
                Ok(comment) => return Ok(comment),
                Err(e) => {
                    warn!(error = %e, "generator failed, falling back to template pool");
                }
            }
        }
        self.pool.compose(item_text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn pool() -> TemplatePool {
        TemplatePool::new(vec!["fallback comment".into()]).unwrap()
    }

    #[tokio::test]
    async fn no_generator_uses_pool() {
        let composer = FallbackComposer::new(None, pool());
        assert_eq!(composer.compose("text").await.unwrap(), "fallback comment");
    }

    #[tokio::test]
    async fn generator_success_bypasses_pool() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"comment": "generated"})),
            )
            .mount(&server)
            .await;

        let generator = HttpComposer::new(server.uri(), 5).unwrap();
        let composer = FallbackComposer::new(Some(generator), pool());
        assert_eq!(composer.compose("text").await.unwrap(), "generated");
    }

    #[tokio::test]
    async fn generator_failure_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let generator = HttpComposer::new(server.uri(), 5).unwrap();
        let composer = FallbackComposer::new(Some(generator), pool());
        assert_eq!(composer.compose("text").await.unwrap(), "fallback comment");
    }
}
