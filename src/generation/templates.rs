//! Outline and slide-title suggestions.
//!
//! The generator is asked for a JSON array. Responses often wrap the
//! array in prose or code fences, so the first `[` through the last `]`
//! is extracted and parsed. When no usable array comes back, a
//! deterministic default is returned; generator errors still propagate.

use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::export::ExportFormat;

use super::{FragmentStream, PromptBuilder, TextGenerator};

/// One suggested section of a document outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Extract the outermost JSON array from free text.
pub fn extract_json_array(text: &str) -> Option<Vec<Value>> {
    let re = Regex::new(r"(?s)\[.*\]").ok()?;
    let candidate = re.find(text)?.as_str();
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Array(items)) => Some(items),
        _ => None,
    }
}

/// Template and content generation over a [`TextGenerator`].
pub struct TemplateService<'a> {
    generator: &'a dyn TextGenerator,
    prompts: PromptBuilder,
}

impl<'a> TemplateService<'a> {
    pub fn new(generator: &'a dyn TextGenerator) -> Self {
        Self {
            generator,
            prompts: PromptBuilder::new(),
        }
    }

    /// Use a custom prompt builder.
    pub fn with_prompts(mut self, prompts: PromptBuilder) -> Self {
        self.prompts = prompts;
        self
    }

    /// Suggest `num_sections` outline entries for a document.
    ///
    /// Entries without a title are dropped. Falls back to
    /// `Section {i}` / `Content for section {i}` when the response is
    /// unusable.
    pub fn suggest_outline(
        &self,
        topic: &str,
        format: ExportFormat,
        num_sections: usize,
    ) -> Result<Vec<OutlineEntry>> {
        let prompt = self.prompts.outline(topic, format, num_sections);
        let entries = self
            .ask_for_array(&prompt)?
            .map(|items| {
                items
                    .into_iter()
                    .filter_map(|item| outline_entry(&item))
                    .take(num_sections)
                    .collect::<Vec<_>>()
            })
            .filter(|entries| !entries.is_empty());

        Ok(match entries {
            Some(entries) => entries,
            None => {
                warn!("outline suggestion unusable, using default outline");
                default_outline(num_sections)
            }
        })
    }

    /// Suggest `num_slides` slide titles, truncated to that count.
    ///
    /// Falls back to `Slide {i}: {topic}` when the response is unusable.
    pub fn suggest_slide_titles(&self, topic: &str, num_slides: usize) -> Result<Vec<String>> {
        let prompt = self.prompts.slide_titles(topic, num_slides);
        let titles = self
            .ask_for_array(&prompt)?
            .map(|items| {
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                        _ => None,
                    })
                    .take(num_slides)
                    .collect::<Vec<_>>()
            })
            .filter(|titles| !titles.is_empty());

        Ok(match titles {
            Some(titles) => titles,
            None => {
                warn!("slide title suggestion unusable, using default titles");
                default_slide_titles(topic, num_slides)
            }
        })
    }

    /// Generate one section's body text.
    pub fn generate_content(
        &self,
        topic: &str,
        section_title: &str,
        format: ExportFormat,
        context: Option<&str>,
    ) -> Result<String> {
        let prompt = self.prompts.content(topic, section_title, format, context);
        self.generator.generate(&prompt)
    }

    /// Stream one section's body text.
    pub fn stream_content(
        &self,
        topic: &str,
        section_title: &str,
        format: ExportFormat,
        context: Option<&str>,
    ) -> Result<FragmentStream> {
        let prompt = self.prompts.content(topic, section_title, format, context);
        self.generator.stream(&prompt)
    }

    /// Regenerate content from user feedback, streamed.
    pub fn refine(&self, original: &str, feedback: &str) -> Result<FragmentStream> {
        let prompt = self.prompts.refinement(original, feedback);
        self.generator.stream(&prompt)
    }

    fn ask_for_array(&self, prompt: &str) -> Result<Option<Vec<Value>>> {
        let text = self.generator.generate(prompt)?;
        let items = extract_json_array(&text);
        if items.is_none() {
            debug!("{}: no JSON array in {} byte response", self.generator.name(), text.len());
        }
        Ok(items)
    }
}

fn outline_entry(item: &Value) -> Option<OutlineEntry> {
    match item {
        Value::String(title) if !title.trim().is_empty() => Some(OutlineEntry {
            title: title.trim().to_string(),
            description: String::new(),
        }),
        Value::Object(_) => serde_json::from_value::<OutlineEntry>(item.clone())
            .ok()
            .filter(|entry| !entry.title.trim().is_empty()),
        _ => None,
    }
}

fn default_outline(num_sections: usize) -> Vec<OutlineEntry> {
    (1..=num_sections)
        .map(|i| OutlineEntry {
            title: format!("Section {}", i),
            description: format!("Content for section {}", i),
        })
        .collect()
}

fn default_slide_titles(topic: &str, num_slides: usize) -> Vec<String> {
    (1..=num_slides).map(|i| format!("Slide {}: {}", i, topic)).collect()
}
