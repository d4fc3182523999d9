use crate::catalog::Catalog;
use crate::error::PromptError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Bounds of the artificial "thinking" pause before a prompt is produced.
/// The pause is drawn uniformly from `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayWindow {
    pub min: Duration,
    pub max: Duration,
}

impl DelayWindow {
    pub const NONE: DelayWindow = DelayWindow {
        min: Duration::ZERO,
        max: Duration::ZERO,
    };

    pub fn from_millis(min: u64, max: u64) -> Self {
        Self {
            min: Duration::from_millis(min),
            max: Duration::from_millis(max.max(min)),
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        rng.random_range(self.min..self.max)
    }
}

impl Default for DelayWindow {
    fn default() -> Self {
        Self::from_millis(1500, 2500)
    }
}

/// A generated prompt together with the category it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub topic: String,
    pub category: String,
    pub prompt: String,
}

/// Turns topics into prompts, pausing for a random delay first.
pub struct Generator<R = StdRng> {
    catalog: Arc<Catalog>,
    rng: R,
    delay: DelayWindow,
}

impl Generator<StdRng> {
    /// Generator seeded from the OS, or from `seed` when given.
    pub fn with_seed(catalog: Arc<Catalog>, delay: DelayWindow, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(catalog, rng, delay)
    }
}

impl<R: Rng> Generator<R> {
    pub fn new(catalog: Arc<Catalog>, rng: R, delay: DelayWindow) -> Self {
        Self { catalog, rng, delay }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn delay(&self) -> DelayWindow {
        self.delay
    }

    /// Trims `topic`, rejects it if empty, waits out the delay, then fills a
    /// template. The wait cannot be cancelled from inside.
    #[instrument(skip(self))]
    pub async fn generate(&mut self, topic: &str) -> Result<Generation, PromptError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(PromptError::validation("Please enter a topic first!"));
        }

        let pause = self.delay.sample(&mut self.rng);
        debug!(pause_ms = pause.as_millis() as u64, "Simulating generation latency");
        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }

        let category = self.catalog.match_category(topic).name().to_string();
        let prompt = self.catalog.select_template(topic, &mut self.rng);
        Ok(Generation {
            topic: topic.to_string(),
            category,
            prompt,
        })
    }
}
