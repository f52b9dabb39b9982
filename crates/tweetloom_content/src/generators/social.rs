use super::pick;
use crate::category::SOCIAL;
use crate::generator::Generator;
use crate::pool::SocialPool;
use rand::{Rng, RngCore};
use std::path::Path;
use tweetloom_error::DataLoadError;

const TOPIC_SHARE: f64 = 0.3;
const INSIGHT_SHARE: f64 = 0.3;

const DEFAULT_STARTERS: &[&str] = &[
    "What's the most positive change you've seen in social media lately?",
    "How has technology changed the way we form communities?",
    "What's one social norm you wish would change?",
    "How do you balance online and offline social interactions?",
    "What role should social media play in society?",
    "How can we build better online communities?",
];

/// Topic plus question (30%), insight (30%) or discussion starter (40%).
#[derive(Debug, Clone)]
pub struct SocialGenerator {
    pool: SocialPool,
    starters: Vec<String>,
}

impl SocialGenerator {
    /// Wrap a validated pool.
    pub fn new(pool: SocialPool) -> Result<Self, DataLoadError> {
        pool.validate()?;
        let starters = match pool.discussion_starters() {
            Some(starters) => starters.clone(),
            None => DEFAULT_STARTERS.iter().map(|s| s.to_string()).collect(),
        };
        Ok(Self { pool, starters })
    }

    /// Load the pool from `social_topics.json` in `data_dir`.
    pub fn from_data_dir(data_dir: &Path) -> Result<Self, DataLoadError> {
        Self::new(SocialPool::load(data_dir)?)
    }
}

impl Generator for SocialGenerator {
    fn category(&self) -> &str {
        SOCIAL
    }

    fn generate(&self, rng: &mut dyn RngCore) -> String {
        let draw: f64 = rng.r#gen();

        if draw < TOPIC_SHARE {
            let topic = pick(rng, self.pool.topics());
            let question = pick(rng, self.pool.questions());
            format!("{topic}\n\n{question}\n\n#SocialMedia #Society #Discussion")
        } else if draw < TOPIC_SHARE + INSIGHT_SHARE {
            let insight = pick(rng, self.pool.insights());
            format!("\u{1F9E0} Social Insight: {insight}\n\n#Sociology #HumanBehavior #Psychology")
        } else {
            let starter = pick(rng, &self.starters);
            format!("\u{1F4AD} Discussion: {starter}\n\n#SocialDiscussion #Community #Thoughts")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pool() -> SocialPool {
        SocialPool::new(
            vec!["Remote work is reshaping cities.".to_string()],
            vec!["Where do you work best?".to_string()],
            vec!["People mirror the body language of those they trust.".to_string()],
        )
    }

    #[test]
    fn test_default_starters_used_when_absent() {
        let generator = SocialGenerator::new(pool()).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        let starters: Vec<String> = (0..200)
            .map(|_| generator.generate(&mut rng))
            .filter(|t| t.starts_with("\u{1F4AD} Discussion:"))
            .collect();
        assert!(!starters.is_empty());
        assert!(
            starters
                .iter()
                .all(|t| DEFAULT_STARTERS.iter().any(|s| t.contains(s)))
        );
    }

    #[test]
    fn test_custom_starters_replace_defaults() {
        let pool = pool().with_discussion_starters(vec!["What makes a neighbourhood?".into()]);
        let generator = SocialGenerator::new(pool).unwrap();
        let mut rng = StdRng::seed_from_u64(12);

        for _ in 0..100 {
            let text = generator.generate(&mut rng);
            if text.contains("Discussion:") {
                assert!(text.contains("What makes a neighbourhood?"));
            }
        }
    }

    #[test]
    fn test_empty_starters_rejected() {
        let pool = pool().with_discussion_starters(vec![]);
        assert!(SocialGenerator::new(pool).is_err());
    }
}
