//! Generator capability and the category-to-generator registry.

use crate::category::{CRYPTO, FINANCE, FUNNY, SOCIAL, SOCIOLOGY};
use crate::generators::{CryptoGenerator, FinanceGenerator, HumorGenerator, SocialGenerator};
use rand::RngCore;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};
use tweetloom_error::DataLoadError;

/// Produces post text for one content category.
///
/// Implementations hold an immutable data pool validated at construction, so
/// `generate` is a pure random draw that cannot fail.
pub trait Generator: Send + Sync + std::fmt::Debug {
    /// Category tag this generator was built for.
    fn category(&self) -> &str;

    /// Compose a fresh piece of text.
    fn generate(&self, rng: &mut dyn RngCore) -> String;
}

/// Mapping from category tag to generator.
///
/// Several tags may share one generator instance (`sociology` reuses the
/// `social` generator).
#[derive(Debug, Clone, Default)]
pub struct GeneratorRegistry {
    generators: BTreeMap<String, Arc<dyn Generator>>,
}

impl GeneratorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every built-in generator from the pool files in `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError`] if any pool file is missing, malformed or
    /// has an empty list.
    #[instrument(skip_all, fields(data_dir = %data_dir.as_ref().display()))]
    pub fn from_data_dir(data_dir: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let dir = data_dir.as_ref();
        let social: Arc<dyn Generator> = Arc::new(SocialGenerator::from_data_dir(dir)?);

        let mut registry = Self::new();
        registry.register(CRYPTO, Arc::new(CryptoGenerator::from_data_dir(dir)?));
        registry.register(FUNNY, Arc::new(HumorGenerator::from_data_dir(dir)?));
        registry.register(FINANCE, Arc::new(FinanceGenerator::from_data_dir(dir)?));
        registry.register(SOCIAL, Arc::clone(&social));
        registry.register(SOCIOLOGY, social);

        info!(categories = registry.len(), "Content generators loaded");
        Ok(registry)
    }

    /// Register (or replace) the generator for a category.
    pub fn register(&mut self, category: impl Into<String>, generator: Arc<dyn Generator>) {
        self.generators.insert(category.into(), generator);
    }

    /// Generator registered for `category`.
    pub fn get(&self, category: &str) -> Option<&Arc<dyn Generator>> {
        self.generators.get(category)
    }

    /// Whether `category` has a generator.
    pub fn contains(&self, category: &str) -> bool {
        self.generators.contains_key(category)
    }

    /// Registered category tags in name order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.generators.keys().map(String::as_str)
    }

    /// Number of registered tags.
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Whether no tags are registered.
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}
