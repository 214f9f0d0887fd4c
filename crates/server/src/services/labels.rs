//! Label synthesis for multi-word queries.
//!
//! Single-token queries are used as-is. Multi-word queries are handed to the
//! text generator, which is asked for one short brandable phrase; the reply
//! is tidied and sanitized into a domain label. Failures never escape: the
//! compacted query is used instead, and whatever label results is memoized
//! so the same query does not hit the generator again within the TTL.

use std::sync::Arc;
use std::time::Duration;

use domain_search_core::{Query, TimedMemo, domain_label_from_title, tidy_generated_title};
use tracing::instrument;

use crate::providers::TextGenerator;

/// Output budget for a generated label.
const MAX_OUTPUT_TOKENS: u32 = 20;

/// Instructions sent ahead of the user's words.
const LABEL_PROMPT: &str = "\
You turn a short description into a domain name idea.
Reply with a single short, brandable, lowercase phrase of at most 30 characters.
Do not use quotes or special characters and do not include a TLD such as .com.
Merge, shorten, or reorder the input words into something that reads like a domain.
If the input is vague, invent something catchy that fits it.
Reply with the phrase only.";

/// Derives search labels, memoizing generated ones by raw query.
#[derive(Clone)]
pub struct LabelSynthesizer {
    generator: Arc<dyn TextGenerator>,
    cache: TimedMemo<String, String>,
}

impl LabelSynthesizer {
    /// Create a synthesizer whose generated labels live for `ttl`.
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, ttl: Duration) -> Self {
        Self {
            generator,
            cache: TimedMemo::new(ttl),
        }
    }

    /// Derive the label for a query.
    ///
    /// `original` is the query as received; it is both the single-token test
    /// and the cache key.
    pub async fn derive(&self, original: &str, query: &Query) -> String {
        self.derive_with_fallback(original, query, None).await
    }

    /// Derive the label, using `fallback` when generation yields nothing.
    ///
    /// Without an explicit fallback the whitespace-stripped query is used.
    #[instrument(skip(self, query, fallback))]
    pub async fn derive_with_fallback(
        &self,
        original: &str,
        query: &Query,
        fallback: Option<&str>,
    ) -> String {
        if !is_multi_token(original) {
            return query.normalized().to_owned();
        }

        let fallback = domain_label_from_title(fallback.unwrap_or(&query.compact()));

        self.cache
            .get_or_insert_with(original.to_owned(), self.generate(query, fallback))
            .await
    }

    async fn generate(&self, query: &Query, fallback: String) -> String {
        let prompt = format!("{LABEL_PROMPT}\n\nInput: {}", query.normalized());

        match self.generator.generate(&prompt, MAX_OUTPUT_TOKENS).await {
            Ok(text) => {
                let label = domain_label_from_title(&tidy_generated_title(&text));
                if label.is_empty() {
                    tracing::warn!(
                        generated = %text,
                        fallback = %fallback,
                        "Generated label was empty after sanitizing, using fallback"
                    );
                    fallback
                } else {
                    tracing::debug!(label = %label, "Generated label");
                    label
                }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    fallback = %fallback,
                    "Label generation failed, using fallback"
                );
                fallback
            }
        }
    }
}

fn is_multi_token(original: &str) -> bool {
    original.trim().chars().any(char::is_whitespace)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::fakes::FakeGenerator;

    fn synthesizer(generator: &Arc<FakeGenerator>) -> LabelSynthesizer {
        LabelSynthesizer::new(generator.clone(), Duration::from_secs(600))
    }

    #[tokio::test]
    async fn test_single_word_skips_generation() {
        let generator = Arc::new(FakeGenerator::replying("ignored"));
        let labels = synthesizer(&generator);

        for raw in ["cats", "  Cats ", ".io", "my-startup", "café!"] {
            let query = Query::parse(raw).unwrap();
            assert_eq!(labels.derive(raw, &query).await, query.normalized());
        }

        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_generated_label_is_sanitized() {
        let generator = Arc::new(FakeGenerator::replying("My Cool Idea!!"));
        let labels = synthesizer(&generator);

        let query = Query::parse("my cool idea").unwrap();
        assert_eq!(labels.derive("my cool idea", &query).await, "mycoolidea");
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_prompt_carries_query() {
        let generator = Arc::new(FakeGenerator::replying("petpals"));
        let labels = synthesizer(&generator);

        let query = Query::parse("Pets And Friends").unwrap();
        labels.derive("Pets And Friends", &query).await;

        let prompt = generator.last_prompt().unwrap();
        assert!(prompt.starts_with(LABEL_PROMPT));
        assert!(prompt.ends_with("Input: pets and friends"));
    }

    #[tokio::test]
    async fn test_repeated_query_generates_once() {
        let generator = Arc::new(FakeGenerator::replying("\"snackstack\""));
        let labels = synthesizer(&generator);

        let query = Query::parse("snack stack").unwrap();
        assert_eq!(labels.derive("snack stack", &query).await, "snackstack");
        assert_eq!(labels.derive("snack stack", &query).await, "snackstack");
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_cache_is_keyed_by_raw_query() {
        let generator = Arc::new(FakeGenerator::replying("snackstack"));
        let labels = synthesizer(&generator);

        let query = Query::parse("snack stack").unwrap();
        labels.derive("snack stack", &query).await;
        labels.derive("Snack Stack", &query).await;
        assert_eq!(generator.calls(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_identical_queries_generate_once() {
        let generator = Arc::new(FakeGenerator::replying("snackstack").with_delay_ms(50));
        let labels = synthesizer(&generator);

        let query = Query::parse("snack stack").unwrap();
        let (a, b) = tokio::join!(
            labels.derive("snack stack", &query),
            labels.derive("snack stack", &query)
        );
        assert_eq!(a, b);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_generation_failure_falls_back_and_is_cached() {
        let generator = Arc::new(FakeGenerator::failing());
        let labels = synthesizer(&generator);

        let query = Query::parse("my cool idea").unwrap();
        assert_eq!(labels.derive("my cool idea", &query).await, "mycoolidea");
        assert_eq!(labels.derive("my cool idea", &query).await, "mycoolidea");
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_generation_falls_back_and_is_cached() {
        let generator = Arc::new(FakeGenerator::replying("!!! ???"));
        let labels = synthesizer(&generator);

        let query = Query::parse("sunny  side up").unwrap();
        assert_eq!(labels.derive("sunny  side up", &query).await, "sunnysideup");
        assert_eq!(labels.derive("sunny  side up", &query).await, "sunnysideup");
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_fallback_is_sanitized() {
        let generator = Arc::new(FakeGenerator::failing());
        let labels = synthesizer(&generator);

        let query = Query::parse("rock & roll!").unwrap();
        assert_eq!(labels.derive("rock & roll!", &query).await, "rockroll");
    }

    #[tokio::test]
    async fn test_supplied_fallback() {
        let generator = Arc::new(FakeGenerator::failing());
        let labels = synthesizer(&generator);

        let query = Query::parse("rock and roll").unwrap();
        let label = labels
            .derive_with_fallback("rock and roll", &query, Some("Rock-N-Roll"))
            .await;
        assert_eq!(label, "rock-n-roll");
    }

    #[tokio::test]
    async fn test_long_generation_is_truncated() {
        let generator = Arc::new(FakeGenerator::replying(
            "the most incredibly long brand name anyone ever imagined",
        ));
        let labels = synthesizer(&generator);

        let query = Query::parse("long brand").unwrap();
        let label = labels.derive("long brand", &query).await;
        assert!(label.len() <= 30);
        assert_eq!(label, "themostincrediblylongbran");
    }

    #[tokio::test]
    async fn test_expired_label_is_regenerated() {
        let generator = Arc::new(FakeGenerator::replying("snackstack"));
        let labels = LabelSynthesizer::new(generator.clone(), Duration::from_millis(50));

        let query = Query::parse("snack stack").unwrap();
        labels.derive("snack stack", &query).await;
        tokio::time::sleep(Duration::from_millis(150)).await;
        labels.derive("snack stack", &query).await;

        assert_eq!(generator.calls(), 2);
    }
}
