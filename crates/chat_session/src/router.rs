//! Reply source routing: remote model or deterministic local fallback.

use std::ops::RangeInclusive;
use std::time::Duration;

use chat_core::{build_prompt, find_fallback_reply};
use gemini_client::{ModelClient, Result as ModelResult};
use rand::Rng;
use tokio_util::sync::CancellationToken;

/// Bounds of the artificial fallback delay, in milliseconds.
const FALLBACK_DELAY_MS: RangeInclusive<u64> = 500..=1000;

/// Which source produced a routed reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplySource {
    Remote,
    Fallback,
}

/// Resolve the reply for `user_text`.
///
/// With a credential the remote model is called exactly once and its text
/// returned verbatim; failures propagate to the caller, which substitutes
/// the apology. Without a credential, a canned reply is selected by keyword
/// match after a randomized delay; the delay ends early when `cancel`
/// fires.
pub async fn route(
    model: &dyn ModelClient,
    credential: Option<&str>,
    book_context: Option<&str>,
    user_text: &str,
    cancel: &CancellationToken,
) -> ModelResult<(String, ReplySource)> {
    match credential {
        Some(api_key) => {
            let prompt = build_prompt(book_context, user_text);
            let text = model.generate(api_key, &prompt).await?;
            Ok((text, ReplySource::Remote))
        }
        None => {
            let delay = Duration::from_millis(rand::thread_rng().gen_range(FALLBACK_DELAY_MS));
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(delay) => {}
            }

            Ok((find_fallback_reply(user_text).to_string(), ReplySource::Fallback))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chat_core::XIAOLIN_SYSTEM_PROMPT;
    use gemini_client::ModelError;
    use std::sync::Mutex;

    struct RecordingModel {
        prompts: Mutex<Vec<String>>,
        reply: ModelResult<String>,
    }

    impl RecordingModel {
        fn succeeding(reply: &str) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                reply: Ok(reply.to_string()),
            }
        }

        fn failing() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                reply: Err(ModelError::Api("quota exhausted".to_string())),
            }
        }
    }

    #[async_trait]
    impl ModelClient for RecordingModel {
        async fn generate(&self, _api_key: &str, prompt: &str) -> ModelResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(_) => Err(ModelError::Api("quota exhausted".to_string())),
            }
        }
    }

    #[tokio::test]
    async fn credential_routes_to_the_remote_model() {
        let model = RecordingModel::succeeding("remote reply");
        let cancel = CancellationToken::new();

        let (text, source) = route(&model, Some("key"), Some("book text"), "问题", &cancel)
            .await
            .unwrap();

        assert_eq!(text, "remote reply");
        assert_eq!(source, ReplySource::Remote);

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(XIAOLIN_SYSTEM_PROMPT));
        assert!(prompts[0].contains("book text"));
        assert!(prompts[0].contains("问题"));
    }

    #[tokio::test]
    async fn remote_failure_propagates_without_retry() {
        let model = RecordingModel::failing();
        let cancel = CancellationToken::new();

        let result = route(&model, Some("key"), None, "问题", &cancel).await;

        assert!(result.is_err());
        assert_eq!(model.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn no_credential_routes_to_the_fallback() {
        let model = RecordingModel::succeeding("unused");
        let cancel = CancellationToken::new();

        let (text, source) = route(&model, None, None, "什么是富老板思维？", &cancel)
            .await
            .unwrap();

        assert_eq!(text, find_fallback_reply("什么是富老板思维？"));
        assert_eq!(source, ReplySource::Fallback);
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn fallback_delay_stays_within_bounds() {
        let model = RecordingModel::succeeding("unused");
        let cancel = CancellationToken::new();
        let started = tokio::time::Instant::now();

        route(&model, None, None, "hello", &cancel).await.unwrap();

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(500));
        assert!(elapsed <= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_token_skips_the_fallback_delay() {
        let model = RecordingModel::succeeding("unused");
        let cancel = CancellationToken::new();
        cancel.cancel();
        let started = tokio::time::Instant::now();

        let (text, _) = route(&model, None, None, "hello", &cancel).await.unwrap();

        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(text, find_fallback_reply("hello"));
    }
}
