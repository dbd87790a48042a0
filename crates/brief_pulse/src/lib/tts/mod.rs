use std::fmt::Debug;
use std::future::Future;

pub mod google;
pub mod script;

/// Turns one unit of script text into encoded MP3 audio.
pub trait SpeechSynthesizer {
    const VOICE_NAME: &'static str;

    type Error: Debug;

    fn synthesize(&self, text: &str) -> impl Future<Output = Result<Vec<u8>, Self::Error>>;
}

impl<T: SpeechSynthesizer + Send + Sync> SpeechSynthesizer for &T {
    const VOICE_NAME: &'static str = T::VOICE_NAME;

    type Error = T::Error;

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, Self::Error> {
        (**self).synthesize(text).await
    }
}
