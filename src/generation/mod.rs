//! Text generation port.
//!
//! Section content and template suggestions come from an external language
//! model. This module defines the seam the rest of the crate talks to:
//! [`TextGenerator`] has a one-shot mode and a streaming mode, where a
//! stream is a finite, non-restartable sequence of text fragments.
//!
//! Network clients live outside this crate; hosts implement
//! [`TextGenerator`] for them. [`build_generator`] only knows the offline
//! `static` provider, which is enough for local runs and tests.
//!
//! # Example
//!
//! ```
//! use docexport::generation::{build_generator, collect_stream, GeneratorConfig};
//!
//! fn main() -> docexport::Result<()> {
//!     let config = GeneratorConfig::static_response("Hello world");
//!     let generator = build_generator(&config)?;
//!
//!     let mut shown = String::new();
//!     let text = collect_stream(
//!         generator.stream("say hello")?,
//!         |fragment| shown.push_str(fragment),
//!         |_full| Ok(()),
//!     )?;
//!     assert_eq!(text, "Hello world");
//!     Ok(())
//! }
//! ```

mod prompts;
mod templates;

pub use prompts::{DocumentKind, PromptBuilder, PromptKind, SAFETY_GUIDELINES};
pub use templates::{extract_json_array, OutlineEntry, TemplateService};

use crossbeam_channel::{Receiver, Sender};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the built-in offline provider.
pub const STATIC_PROVIDER: &str = "static";

/// Default fragment length, in characters, for the static provider.
const DEFAULT_FRAGMENT_CHARS: usize = 16;

/// A finite stream of text fragments in arrival order.
///
/// Backed by a channel receiver; iteration ends when the producer side is
/// dropped. A fragment may instead be an error, after which the stream
/// should be abandoned.
#[derive(Debug)]
pub struct FragmentStream {
    rx: Receiver<Result<String>>,
}

impl FragmentStream {
    /// Create a connected producer/stream pair.
    pub fn channel() -> (FragmentSender, Self) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (FragmentSender { tx }, Self { rx })
    }

    /// A stream that yields the given fragments and ends.
    pub fn from_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (tx, stream) = Self::channel();
        for fragment in fragments {
            // the receiver is held by `stream`, so sending cannot fail here
            let _ = tx.send(fragment);
        }
        stream
    }
}

impl Iterator for FragmentStream {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rx.recv().ok()
    }
}

/// Producer half of a [`FragmentStream`].
#[derive(Debug, Clone)]
pub struct FragmentSender {
    tx: Sender<Result<String>>,
}

impl FragmentSender {
    /// Push a fragment. Returns `false` once the consumer has gone away.
    pub fn send(&self, fragment: impl Into<String>) -> bool {
        self.tx.send(Ok(fragment.into())).is_ok()
    }

    /// Push a provider failure. Returns `false` once the consumer has gone away.
    pub fn fail(&self, error: Error) -> bool {
        self.tx.send(Err(error)).is_ok()
    }
}

/// A language model that turns a prompt into text.
pub trait TextGenerator: Send + Sync {
    /// Provider name, for logs.
    fn name(&self) -> &str;

    /// Generate the complete response at once.
    fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate the response as a fragment stream.
    ///
    /// The default implementation produces the whole response as a single
    /// fragment.
    fn stream(&self, prompt: &str) -> Result<FragmentStream> {
        Ok(FragmentStream::from_fragments([self.generate(prompt)?]))
    }
}

/// Forward each fragment as it arrives, then finalize once with the full text.
///
/// `finalize` runs exactly once, after the producer has finished, and only
/// if every fragment arrived without error. A failed fragment stops
/// consumption and is returned without finalizing.
pub fn collect_stream<F, G>(stream: FragmentStream, mut on_fragment: F, finalize: G) -> Result<String>
where
    F: FnMut(&str),
    G: FnOnce(&str) -> Result<()>,
{
    let mut full = String::new();
    let mut count = 0usize;
    for fragment in stream {
        let fragment = fragment?;
        on_fragment(&fragment);
        full.push_str(&fragment);
        count += 1;
    }
    debug!("stream finished: {} fragments, {} bytes", count, full.len());

    finalize(&full)?;
    Ok(full)
}

/// Generator selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Provider name
    pub provider: String,

    /// Model identifier passed through to the provider
    #[serde(default)]
    pub model: Option<String>,

    /// Canned response for the static provider
    #[serde(default)]
    pub response: Option<String>,

    /// Fragment length for the static provider's stream
    #[serde(default = "default_fragment_chars")]
    pub fragment_chars: usize,
}

fn default_fragment_chars() -> usize {
    DEFAULT_FRAGMENT_CHARS
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            provider: STATIC_PROVIDER.to_string(),
            model: None,
            response: None,
            fragment_chars: DEFAULT_FRAGMENT_CHARS,
        }
    }
}

impl GeneratorConfig {
    /// Config for a named provider.
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Static provider that always answers with `response`.
    pub fn static_response(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
            ..Default::default()
        }
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the fragment length used when streaming.
    pub fn with_fragment_chars(mut self, chars: usize) -> Self {
        self.fragment_chars = chars;
        self
    }
}

/// Build the generator named by `config.provider` (case-insensitive).
pub fn build_generator(config: &GeneratorConfig) -> Result<Box<dyn TextGenerator>> {
    match config.provider.trim().to_ascii_lowercase().as_str() {
        STATIC_PROVIDER => {
            debug!("using static generator");
            Ok(Box::new(StaticGenerator {
                response: config.response.clone().unwrap_or_default(),
                fragment_chars: config.fragment_chars.max(1),
            }))
        }
        _ => Err(Error::UnsupportedProvider(config.provider.clone())),
    }
}

/// Offline generator that ignores the prompt and returns a fixed response.
#[derive(Debug, Clone)]
pub struct StaticGenerator {
    response: String,
    fragment_chars: usize,
}

impl StaticGenerator {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            fragment_chars: DEFAULT_FRAGMENT_CHARS,
        }
    }
}

impl TextGenerator for StaticGenerator {
    fn name(&self) -> &str {
        STATIC_PROVIDER
    }

    fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.response.clone())
    }

    fn stream(&self, _prompt: &str) -> Result<FragmentStream> {
        let chars: Vec<char> = self.response.chars().collect();
        let fragments = chars
            .chunks(self.fragment_chars)
            .map(|chunk| chunk.iter().collect::<String>());
        Ok(FragmentStream::from_fragments(fragments))
    }
}
