use std::path::PathBuf;

use brief_store::ObjectStore;

use crate::{BriefingProcessor, FeedSource, SpeechSynthesizer, Summarizer};

pub struct BriefingProcessorBuilder<O = (), F = (), S = (), A = ()> {
    workdir: PathBuf,
    store: O,
    feed_source: F,
    summarizer: S,
    synthesizer: A,
    feed_urls: Vec<String>,
}

impl BriefingProcessorBuilder {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            store: (),
            feed_source: (),
            summarizer: (),
            synthesizer: (),
            feed_urls: Vec::new(),
        }
    }
}

impl<O, F, S, A> BriefingProcessorBuilder<O, F, S, A> {
    pub fn store<O2: ObjectStore + Send + Sync + 'static>(
        self,
        store: O2,
    ) -> BriefingProcessorBuilder<O2, F, S, A> {
        BriefingProcessorBuilder {
            workdir: self.workdir,
            store,
            feed_source: self.feed_source,
            summarizer: self.summarizer,
            synthesizer: self.synthesizer,
            feed_urls: self.feed_urls,
        }
    }

    pub fn feed_source<F2: FeedSource + Send + Sync + 'static>(
        self,
        feed_source: F2,
    ) -> BriefingProcessorBuilder<O, F2, S, A> {
        BriefingProcessorBuilder {
            workdir: self.workdir,
            store: self.store,
            feed_source,
            summarizer: self.summarizer,
            synthesizer: self.synthesizer,
            feed_urls: self.feed_urls,
        }
    }

    pub fn summarizer<S2: Summarizer + Send + Sync + 'static>(
        self,
        summarizer: S2,
    ) -> BriefingProcessorBuilder<O, F, S2, A> {
        BriefingProcessorBuilder {
            workdir: self.workdir,
            store: self.store,
            feed_source: self.feed_source,
            summarizer,
            synthesizer: self.synthesizer,
            feed_urls: self.feed_urls,
        }
    }

    pub fn synthesizer<A2: SpeechSynthesizer + Send + Sync + 'static>(
        self,
        synthesizer: A2,
    ) -> BriefingProcessorBuilder<O, F, S, A2> {
        BriefingProcessorBuilder {
            workdir: self.workdir,
            store: self.store,
            feed_source: self.feed_source,
            summarizer: self.summarizer,
            synthesizer,
            feed_urls: self.feed_urls,
        }
    }

    pub fn feed_urls(mut self, feed_urls: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.feed_urls = feed_urls.into_iter().map(Into::into).collect();
        self
    }
}

impl<O, F, S, A> BriefingProcessorBuilder<O, F, S, A>
where
    O: ObjectStore + Send + Sync + 'static,
    F: FeedSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: SpeechSynthesizer + Send + Sync + 'static,
{
    pub fn build(self) -> BriefingProcessor<O, F, S, A> {
        BriefingProcessor {
            workdir: self.workdir,
            store: self.store,
            feed_source: self.feed_source,
            summarizer: self.summarizer,
            synthesizer: self.synthesizer,
            feed_urls: self.feed_urls,
        }
    }
}
