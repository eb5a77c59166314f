use std::time::Duration;

use crate::storyboard::{Scene, Storyboard, StoryboardError, StoryboardGenerator, StoryboardOutput};

/// Canned two-panel storyboard, independent of the input text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MockStoryboard {
    latency: Duration,
}

impl MockStoryboard {
    /// Mock that sleeps for `latency` before answering.
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// The canned storyboard.
    pub fn storyboard() -> Storyboard {
        Storyboard {
            scenes: vec![
                Scene {
                    id: 1,
                    description: "A dark alleyway, rain pouring.".to_owned(),
                    dialogue: "Wait, who's there?".to_owned(),
                },
                Scene {
                    id: 2,
                    description: "Close up on the protagonist's eyes.".to_owned(),
                    dialogue: "(Inner monologue) I knew this day would come.".to_owned(),
                },
            ],
        }
    }
}

impl StoryboardGenerator for MockStoryboard {
    fn generate(&self, _text: &str, structured: bool) -> Result<StoryboardOutput, StoryboardError> {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        let board = Self::storyboard();
        if structured {
            return Ok(StoryboardOutput::Structured(board));
        }
        Ok(StoryboardOutput::Raw(serde_json::to_string(&board)?))
    }
}

/// Tries `primary` and answers from `fallback` when it fails.
#[derive(Debug)]
pub struct Fallback<G, F = MockStoryboard> {
    primary: G,
    fallback: F,
}

impl<G, F> Fallback<G, F> {
    /// Wrap `primary`.
    pub fn new(primary: G, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<G: StoryboardGenerator, F: StoryboardGenerator> StoryboardGenerator for Fallback<G, F> {
    #[tracing::instrument(skip_all, fields(structured = structured))]
    fn generate(&self, text: &str, structured: bool) -> Result<StoryboardOutput, StoryboardError> {
        match self.primary.generate(text, structured) {
            Ok(out) => Ok(out),
            Err(err) => {
                tracing::warn!(error = %err, "storyboard generation failed; using fallback");
                self.fallback.generate(text, structured)
            }
        }
    }
}
