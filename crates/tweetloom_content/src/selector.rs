//! Weighted category selection and tweet generation.

use crate::generator::{Generator, GeneratorRegistry};
use crate::trim::trim_tweet;
use derive_getters::Getters;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tweetloom_error::ConfigError;

/// Relative weights for content categories.
///
/// Weights are non-negative and finite, at least one is positive, and they
/// need not sum to one. Entries keep their insertion order, which is the
/// accumulation order used by [`CategoryWeights::select`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct CategoryWeights {
    entries: Vec<(String, f64)>,
}

impl CategoryWeights {
    /// Build weights from `(category, weight)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any weight is negative or not finite, if
    /// no weight is positive, or if the weights overflow when summed.
    ///
    /// # Examples
    ///
    /// ```
    /// use tweetloom_content::CategoryWeights;
    ///
    /// let weights = CategoryWeights::new([("crypto", 0.25), ("funny", 0.75)]).unwrap();
    /// assert_eq!(weights.total(), 1.0);
    /// assert!(CategoryWeights::new([("crypto", 0.0)]).is_err());
    /// ```
    pub fn new<S, I>(weights: I) -> Result<Self, ConfigError>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, f64)>,
    {
        let entries: Vec<(String, f64)> = weights
            .into_iter()
            .map(|(category, weight)| (category.into(), weight))
            .collect();

        if let Some((category, weight)) = entries
            .iter()
            .find(|(_, weight)| !weight.is_finite() || *weight < 0.0)
        {
            return Err(ConfigError::new(format!(
                "Category '{}' has invalid weight {}; weights must be finite and non-negative",
                category, weight
            )));
        }
        if !entries.iter().any(|(_, weight)| *weight > 0.0) {
            return Err(ConfigError::new(
                "At least one content category needs a positive weight",
            ));
        }
        let total: f64 = entries.iter().map(|(_, weight)| weight).sum();
        if !total.is_finite() {
            return Err(ConfigError::new(format!(
                "Category weights sum to {}; the total must be finite",
                total
            )));
        }

        Ok(Self { entries })
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, weight)| weight).sum()
    }

    /// Weight of one category, if present.
    pub fn weight(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, weight)| *weight)
    }

    /// `(category, weight)` pairs in accumulation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, weight)| (name.as_str(), *weight))
    }

    /// Pick a category with probability proportional to its weight.
    ///
    /// Draws uniformly over `[0, total)` and walks the positive-weight
    /// categories, returning the first whose cumulative weight reaches the
    /// draw. If rounding leaves no match, the last positive category wins.
    pub fn select(&self, rng: &mut dyn RngCore) -> &str {
        let draw = rng.gen_range(0.0..self.total());
        let mut cumulative = 0.0;
        let mut last = "";

        for (category, weight) in self.iter().filter(|(_, weight)| *weight > 0.0) {
            cumulative += weight;
            last = category;
            if cumulative >= draw {
                return category;
            }
        }
        last
    }
}

impl TryFrom<BTreeMap<String, f64>> for CategoryWeights {
    type Error = ConfigError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::new(map)
    }
}

impl From<CategoryWeights> for BTreeMap<String, f64> {
    fn from(weights: CategoryWeights) -> Self {
        weights.entries.into_iter().collect()
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            entries: vec![
                ("crypto".to_string(), 0.25),
                ("funny".to_string(), 0.20),
                ("finance".to_string(), 0.20),
                ("social".to_string(), 0.20),
                ("sociology".to_string(), 0.15),
            ],
        }
    }
}

/// Weighted random category choice. See [`CategoryWeights::select`].
pub fn select_category<'a>(weights: &'a CategoryWeights, rng: &mut dyn RngCore) -> &'a str {
    weights.select(rng)
}

/// Text produced by the selector and the category whose generator made it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_more::Display)]
#[display("{}", text)]
pub struct GeneratedTweet {
    category: String,
    text: String,
}

impl GeneratedTweet {
    /// Create a generated tweet.
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            text: text.into(),
        }
    }

    /// Split into `(category, text)`.
    pub fn into_parts(self) -> (String, String) {
        (self.category, self.text)
    }
}

/// Selects a category, delegates to its generator and trims the result.
#[derive(Debug, Clone)]
pub struct ContentSelector {
    weights: CategoryWeights,
    registry: GeneratorRegistry,
    default_category: String,
    default_generator: Arc<dyn Generator>,
    max_length: usize,
}

impl ContentSelector {
    /// Create a selector.
    ///
    /// Weighted categories without a generator are allowed and fall back to
    /// `default_category` at generation time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `default_category` has no generator.
    pub fn new(
        weights: CategoryWeights,
        registry: GeneratorRegistry,
        default_category: impl Into<String>,
        max_length: usize,
    ) -> Result<Self, ConfigError> {
        let default_category = default_category.into();
        let default_generator = registry.get(&default_category).cloned().ok_or_else(|| {
            ConfigError::new(format!(
                "Default category '{}' has no content generator",
                default_category
            ))
        })?;

        for (category, _) in weights.iter() {
            if !registry.contains(category) {
                warn!(
                    category,
                    fallback = %default_category,
                    "Weighted category has no generator"
                );
            }
        }

        Ok(Self {
            weights,
            registry,
            default_category,
            default_generator,
            max_length,
        })
    }

    /// Category weights in use.
    pub fn weights(&self) -> &CategoryWeights {
        &self.weights
    }

    /// Registered generators.
    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    /// Length budget applied to every tweet.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Generate one tweet. Never fails.
    pub fn generate_tweet(&self, rng: &mut dyn RngCore) -> GeneratedTweet {
        let selected = self.weights.select(rng);

        let (category, generator) = match self.registry.get(selected) {
            Some(generator) => (selected, generator),
            None => {
                debug!(selected, fallback = %self.default_category, "Falling back to default generator");
                (self.default_category.as_str(), &self.default_generator)
            }
        };

        info!(category, "Generating tweet");
        let raw = generator.generate(rng);
        GeneratedTweet::new(category, self.trim(&raw))
    }

    /// Trim text to this selector's length budget.
    pub fn trim(&self, text: &str) -> String {
        trim_tweet(text, self.max_length)
    }
}
