// SPDX-FileCopyrightText: 2026 Mingle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static template pool composer.

use async_trait::async_trait;
use rand::seq::SliceRandom;

use mingle_core::{
    AdapterType, CommentComposer, HealthStatus, MingleError, PlatformAdapter,
};

/// Composer that picks a comment uniformly at random from a fixed pool.
///
/// Item text is ignored. The pool must be non-empty; config validation
/// enforces this before a comment-enabled session starts.
pub struct TemplatePool {
    templates: Vec<String>,
}

impl TemplatePool {
    pub fn new(templates: Vec<String>) -> Result<Self, MingleError> {
        if templates.is_empty() {
            return Err(MingleError::Config(
                "template pool requires at least one template".into(),
            ));
        }
        Ok(Self { templates })
    }

    /// Pick one template. Separate from the trait so the fallback composer
    /// can reach it without an async hop.
    pub fn pick(&self) -> &str {
        let mut rng = rand::thread_rng();
        // Non-empty by construction.
        self.templates
            .choose(&mut rng)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

#[async_trait]
impl PlatformAdapter for TemplatePool {
    fn name(&self) -> &str {
        "template-pool"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Composer
    }

    async fn health_check(&self) -> Result<HealthStatus, MingleError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), MingleError> {
        Ok(())
    }
}

#[async_trait]
impl CommentComposer for TemplatePool {
    async fn compose(&self, _item_text: &str) -> Result<String, MingleError> {
        Ok(self.pick().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pool_is_rejected() {
        assert!(TemplatePool::new(vec![]).is_err());
    }

    #[tokio::test]
    async fn single_template_always_picked() {
        let pool = TemplatePool::new(vec!["nice shot!".into()]).unwrap();
        for _ in 0..10 {
            assert_eq!(pool.compose("anything").await.unwrap(), "nice shot!");
        }
    }

    #[tokio::test]
    async fn picks_come_from_the_pool() {
        let templates = vec!["one".to_string(), "two".to_string(), "three".to_string()];
        let pool = TemplatePool::new(templates.clone()).unwrap();
        for _ in 0..50 {
            let picked = pool.compose("").await.unwrap();
            assert!(templates.contains(&picked));
        }
    }
}
