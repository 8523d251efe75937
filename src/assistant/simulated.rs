//! Simulated response provider
//!
//! Stands in for a real completion service: classifies the prompt, waits a
//! beat the way a network call would, then picks a canned reply. This is
//! the default provider for demos and offline builds.

use super::classifier::classify;
use super::replies;
use super::{ProviderError, ResponseProvider};
use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use std::time::Duration;

/// Simulated thinking delay bounds (milliseconds)
const THINKING_DELAY_MS: Range<u64> = 1000..3000;

/// Demo transcripts for driving voice flows without a speech recognizer
pub const DEMO_TRANSCRIPTS: &[&str] = &[
    "Hello, how are you today?",
    "Can you help me practice English?",
    "What's the weather like?",
    "I want to improve my pronunciation.",
    "Tell me about yourself.",
];

/// Canned-table response provider with seedable randomness
pub struct SimulatedProvider {
    rng: Mutex<StdRng>,
    delay: Option<Range<u64>>,
}

impl SimulatedProvider {
    /// Create a provider with entropy-seeded randomness and the demo delay
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            delay: Some(THINKING_DELAY_MS),
        }
    }

    /// Create a provider with a fixed seed, for reproducible picks
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            delay: Some(THINKING_DELAY_MS),
        }
    }

    /// Disable the simulated thinking delay
    pub fn without_delay(mut self) -> Self {
        self.delay = None;
        self
    }

    /// Pick one of the built-in demo transcripts
    pub fn demo_transcript(&self) -> &'static str {
        let mut rng = self.rng.lock();
        DEMO_TRANSCRIPTS[rng.gen_range(0..DEMO_TRANSCRIPTS.len())]
    }

    // Lock is released before the caller awaits the sleep
    fn thinking_delay(&self) -> Option<Duration> {
        let range = self.delay.clone()?;
        let ms = self.rng.lock().gen_range(range);
        Some(Duration::from_millis(ms))
    }
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResponseProvider for SimulatedProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        if let Some(delay) = self.thinking_delay() {
            tokio::time::sleep(delay).await;
        }
        let category = classify(prompt);
        let reply = replies::pick(category, &mut *self.rng.lock());
        Ok(reply.to_string())
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::ResponseCategory;

    #[tokio::test]
    async fn test_reply_comes_from_matched_table() {
        let provider = SimulatedProvider::with_seed(1).without_delay();
        let reply = provider.generate("hello there").await.unwrap();
        assert!(replies::candidates(ResponseCategory::Greeting).contains(&reply.as_str()));
    }

    #[tokio::test]
    async fn test_unmatched_prompt_uses_default_table() {
        let provider = SimulatedProvider::with_seed(1).without_delay();
        let reply = provider.generate("quantum entanglement").await.unwrap();
        assert!(replies::candidates(ResponseCategory::Default).contains(&reply.as_str()));
    }

    #[tokio::test]
    async fn test_same_seed_same_sequence() {
        let a = SimulatedProvider::with_seed(99).without_delay();
        let b = SimulatedProvider::with_seed(99).without_delay();
        for _ in 0..5 {
            assert_eq!(
                a.generate("tell me something").await.unwrap(),
                b.generate("tell me something").await.unwrap()
            );
        }
    }

    #[test]
    fn test_demo_transcript_is_builtin() {
        let provider = SimulatedProvider::with_seed(3);
        for _ in 0..10 {
            assert!(DEMO_TRANSCRIPTS.contains(&provider.demo_transcript()));
        }
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(SimulatedProvider::new().name(), "simulated");
    }
}
