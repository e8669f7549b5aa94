//! Prompt construction for generation requests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::export::ExportFormat;

/// Guidelines appended to every prompt.
pub const SAFETY_GUIDELINES: &str = "Guidelines:\n\
- Write in a professional, neutral tone.\n\
- Do not invent statistics, quotations, or sources.\n\
- Do not include personal data about real individuals.\n\
- Refuse harmful, hateful, or illegal content.";

const OUTLINE_TEMPLATE: &str = "Create an outline for a {doc_type} about \"{topic}\" with exactly {count} sections.\n\
Respond with a JSON array only, where each element is an object with \"title\" and \"description\" fields.";

const SLIDE_TITLES_TEMPLATE: &str = "Suggest {count} slide titles for a presentation about \"{topic}\".\n\
Respond with a JSON array of strings only.";

const CONTENT_TEMPLATE: &str = "Write the \"{section_title}\" section of a {doc_type} about \"{topic}\".\n\
Use short paragraphs. Start bullet points with \"- \" and indent sub-points by two spaces.\n\
{context}";

const REFINEMENT_TEMPLATE: &str = "Revise the following content according to the feedback.\n\n\
Content:\n{original}\n\nFeedback:\n{feedback}\n\n\
Return only the revised content.";

/// The prompts the service issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    /// Section outline suggestion for a document
    Outline,
    /// Slide title suggestion for a deck
    SlideTitles,
    /// Body text for one section
    Content,
    /// Rewrite of existing content from user feedback
    Refinement,
}

impl PromptKind {
    fn default_template(self) -> &'static str {
        match self {
            PromptKind::Outline => OUTLINE_TEMPLATE,
            PromptKind::SlideTitles => SLIDE_TITLES_TEMPLATE,
            PromptKind::Content => CONTENT_TEMPLATE,
            PromptKind::Refinement => REFINEMENT_TEMPLATE,
        }
    }
}

/// What a generated document is called in prompts.
pub trait DocumentKind {
    fn document_noun(&self) -> &'static str;
}

impl DocumentKind for ExportFormat {
    fn document_noun(&self) -> &'static str {
        match self {
            ExportFormat::Docx => "document",
            ExportFormat::Pptx => "presentation",
        }
    }
}

/// Builds prompts from templates, with optional per-kind overrides.
///
/// Templates use `{name}` placeholders: `{topic}`, `{count}`,
/// `{doc_type}`, `{section_title}`, `{context}`, `{original}`,
/// `{feedback}`. Unknown placeholders are left as-is.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    overrides: HashMap<PromptKind, String>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the template used for `kind`.
    pub fn with_override(mut self, kind: PromptKind, template: impl Into<String>) -> Self {
        self.overrides.insert(kind, template.into());
        self
    }

    pub fn outline(&self, topic: &str, format: ExportFormat, num_sections: usize) -> String {
        self.render(
            PromptKind::Outline,
            &[
                ("topic", topic),
                ("doc_type", format.document_noun()),
                ("count", &num_sections.to_string()),
            ],
        )
    }

    pub fn slide_titles(&self, topic: &str, num_slides: usize) -> String {
        self.render(
            PromptKind::SlideTitles,
            &[("topic", topic), ("count", &num_slides.to_string())],
        )
    }

    /// Prompt for one section's body; `context` is prior content to stay consistent with.
    pub fn content(
        &self,
        topic: &str,
        section_title: &str,
        format: ExportFormat,
        context: Option<&str>,
    ) -> String {
        let context = match context.map(str::trim).filter(|c| !c.is_empty()) {
            Some(c) => format!("Context from earlier sections:\n{}\n", c),
            None => String::new(),
        };
        self.render(
            PromptKind::Content,
            &[
                ("topic", topic),
                ("section_title", section_title),
                ("doc_type", format.document_noun()),
                ("context", &context),
            ],
        )
    }

    pub fn refinement(&self, original: &str, feedback: &str) -> String {
        self.render(
            PromptKind::Refinement,
            &[("original", original), ("feedback", feedback)],
        )
    }

    fn render(&self, kind: PromptKind, vars: &[(&str, &str)]) -> String {
        let template = self
            .overrides
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_template());

        let mut prompt = template.to_string();
        for (name, value) in vars {
            prompt = prompt.replace(&format!("{{{}}}", name), value);
        }

        let mut out = prompt.trim_end().to_string();
        out.push_str("\n\n");
        out.push_str(SAFETY_GUIDELINES);
        out
    }
}
