use std::sync::{Arc, Mutex};

use brief_pulse::SpeechSynthesizer;

/// Produces `[unit text]` as the "audio" bytes for each unit, so stitched
/// output can be checked for content and order.
#[derive(Clone, Default)]
pub struct MockSynthesizer {
    pub calls: Arc<Mutex<Vec<String>>>,
    /// Fail the first unit containing this substring.
    pub fail_on: Option<String>,
}

impl MockSynthesizer {
    pub fn failing_on(substring: &str) -> Self {
        Self {
            fail_on: Some(substring.to_string()),
            ..Default::default()
        }
    }
}

impl SpeechSynthesizer for MockSynthesizer {
    const VOICE_NAME: &'static str = "mock-voice";

    type Error = anyhow::Error;

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, Self::Error> {
        self.calls.lock().unwrap().push(text.to_string());
        if let Some(ref needle) = self.fail_on {
            if text.contains(needle) {
                return Err(anyhow::anyhow!("speech service returned 500"));
            }
        }
        Ok(format!("[{text}]").into_bytes())
    }
}
