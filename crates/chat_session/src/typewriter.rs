//! Incremental reveal of a completed reply, one character at a time.

use std::time::Duration;

use async_stream::stream;
use futures::Stream;

/// Default pause between revealed characters.
pub const DEFAULT_STEP: Duration = Duration::from_millis(12);

/// Paces the disclosure of a finished reply.
///
/// `reveal` yields strictly growing character-boundary prefixes of the
/// text, ending with the full text; the end of the stream is the single
/// completion signal. Dropping the stream stops the pacing immediately, so
/// the consumer's cancellation handling is the only teardown needed.
#[derive(Clone, Copy, Debug)]
pub struct Typewriter {
    step: Duration,
}

impl Typewriter {
    pub fn new(step: Duration) -> Self {
        Self { step }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn reveal(&self, text: String) -> impl Stream<Item = String> {
        let step = self.step;

        stream! {
            let ends: Vec<usize> = text
                .char_indices()
                .map(|(index, ch)| index + ch.len_utf8())
                .collect();

            for end in ends {
                tokio::time::sleep(step).await;
                yield text[..end].to_string();
            }
        }
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(DEFAULT_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test(start_paused = true)]
    async fn prefixes_grow_one_character_at_a_time() {
        let typewriter = Typewriter::default();
        let steps: Vec<String> = typewriter.reveal("富老板".to_string()).collect().await;

        assert_eq!(steps, vec!["富", "富老", "富老板"]);
    }

    #[tokio::test(start_paused = true)]
    async fn final_step_equals_the_full_text_exactly_once() {
        let typewriter = Typewriter::default();
        let text = "One more thing... 思维";
        let steps: Vec<String> = typewriter.reveal(text.to_string()).collect().await;

        assert_eq!(steps.len(), text.chars().count());
        assert_eq!(steps.last().map(String::as_str), Some(text));
        assert_eq!(steps.iter().filter(|s| s.as_str() == text).count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn lengths_are_monotonically_increasing() {
        let typewriter = Typewriter::default();
        let steps: Vec<String> = typewriter.reveal("hello 世界".to_string()).collect().await;

        for pair in steps.windows(2) {
            assert!(pair[1].chars().count() > pair[0].chars().count());
            assert!(pair[1].starts_with(pair[0].as_str()));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn empty_text_reveals_nothing() {
        let typewriter = Typewriter::default();
        let steps: Vec<String> = typewriter.reveal(String::new()).collect().await;

        assert!(steps.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cadence_paces_one_character_per_step() {
        let typewriter = Typewriter::new(Duration::from_millis(12));
        let started = tokio::time::Instant::now();

        let steps: Vec<String> = typewriter.reveal("abc".to_string()).collect().await;

        assert_eq!(steps.len(), 3);
        assert_eq!(started.elapsed(), Duration::from_millis(36));
    }
}
