use super::error::ScriptServiceError;
use super::model::{ScriptSet, SectionName};
use crate::domain::language::Language;
use crate::domain::narration::chunk_text;
use crate::infrastructure::repositories::LlmRepository;
use std::collections::HashMap;
use std::sync::Arc;

/// Translation prompts carry one sentence group at a time; this bound
/// keeps each request well inside every provider's context window.
const MAX_TRANSLATION_CHUNK: usize = 4000;

/// Paper metadata supplied by the extraction collaborator
#[derive(Debug, Clone)]
pub struct PaperMetadata {
    pub title: String,
    pub authors: String,
    pub date: String,
}

impl Default for PaperMetadata {
    fn default() -> Self {
        Self {
            title: "Research Paper".to_string(),
            authors: "Author".to_string(),
            date: "2024".to_string(),
        }
    }
}

/// Turns extracted paper text into the narration script: one LLM pass for
/// the five fixed sections, a templated title introduction, cleanup for
/// synthesis, and optional translation into the target language.
pub struct ScriptService {
    llm: Arc<dyn LlmRepository>,
}

impl ScriptService {
    pub fn new(llm: Arc<dyn LlmRepository>) -> Self {
        Self { llm }
    }

    /// Produce the complete narration script for a paper.
    pub async fn generate(
        &self,
        paper_text: &str,
        metadata: &PaperMetadata,
        language: Language,
    ) -> Result<ScriptSet, ScriptServiceError> {
        let trimmed = paper_text.trim();
        if trimmed.is_empty() {
            return Err(ScriptServiceError::Invalid(
                "paper text cannot be empty".to_string(),
            ));
        }

        tracing::info!(
            paper_length = trimmed.len(),
            language = %language,
            "Generating narration script"
        );

        let full_script = self
            .llm
            .generate(&script_prompt(trimmed))
            .await
            .map_err(ScriptServiceError::Provider)?;

        let mut sections = split_into_sections(&full_script);
        for text in sections.values_mut() {
            *text = clean_for_narration(text);
        }
        let mut title_introduction = clean_for_narration(&title_introduction(
            &metadata.title,
            &metadata.authors,
            &metadata.date,
        ));

        if language != Language::English {
            title_introduction = self.translate(&title_introduction, language).await?;
            for text in sections.values_mut() {
                *text = self.translate(text, language).await?;
            }
        }

        Ok(ScriptSet {
            title_introduction,
            sections,
        })
    }

    /// Translate narration text into the target language, keeping
    /// technical terms in English. Long texts are translated sentence
    /// group by sentence group and rejoined.
    pub async fn translate(
        &self,
        text: &str,
        language: Language,
    ) -> Result<String, ScriptServiceError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let chunks = chunk_text(text, Language::English, MAX_TRANSLATION_CHUNK);
        let mut translated = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let output = self
                .llm
                .generate(&translation_prompt(chunk, language))
                .await
                .map_err(ScriptServiceError::Provider)?;
            translated.push(output.trim().to_string());
        }

        Ok(translated.join(" "))
    }
}

fn script_prompt(paper_text: &str) -> String {
    format!(
        r#"Create a script for a 3-5 minute educational video based on this research paper.
STRUCTURE:
Create scripts for exactly these 5 sections:
**Introduction**
**Methodology**
**Results**
**Discussion**
**Conclusion**
Important rules:
1. Each section MUST start with its exact heading as shown above
2. Keep content clear and focused - about 2-3 paragraphs per section
3. Focus on explaining the research in simple terms
4. Avoid technical jargon where possible
5. Make it engaging for a general audience
6. DO NOT include any video/animation directions or [Narrator:] tags
7. Make sure that you do not use contracted words, for example: we'll, we're.
Research Paper Content:
{}

Please generate the complete presentation script with clear section headers:"#,
        paper_text
    )
}

fn translation_prompt(text: &str, language: Language) -> String {
    format!(
        r#"Translate the following text to {}.
Rules:
1. Keep technical terms, proper nouns, and difficult words in English.
2. The translation should be natural and conversational.
3. Output ONLY the translated text, no explanations.

Text to translate:
{}"#,
        language.name(),
        text
    )
}

/// Route the LLM output into the five fixed sections by scanning for
/// heading-marked lines. Sections the model skipped get a placeholder so
/// downstream consumers always see the full set.
pub fn split_into_sections(full_script: &str) -> HashMap<SectionName, String> {
    let mut sections: HashMap<SectionName, String> = SectionName::ORDER
        .iter()
        .map(|s| (*s, String::new()))
        .collect();

    let mut current: Option<SectionName> = None;
    for line in full_script.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let lowered = line.to_lowercase();
        let looks_like_heading = line.starts_with('#')
            || line.starts_with("**")
            || line.contains(':')
            || !line.chars().any(|c| c.is_lowercase());
        let heading = SectionName::ORDER
            .iter()
            .copied()
            .find(|s| looks_like_heading && lowered.contains(s.slug()));

        match heading {
            Some(section) => current = Some(section),
            None => {
                if let Some(section) = current {
                    let entry = sections.entry(section).or_default();
                    entry.push_str(line);
                    entry.push(' ');
                }
            }
        }
    }

    for (name, text) in sections.iter_mut() {
        *text = text.trim().to_string();
        if text.is_empty() {
            *text = format!("Content for {} needs to be added.", name.as_str());
        }
    }

    sections
}

/// Fixed narration template opening every video. Multi-author lists are
/// collapsed to "<first author> et al.".
pub fn title_introduction(title: &str, authors: &str, date: &str) -> String {
    let spoken_authors = if authors.contains(',') {
        let first = authors.split(',').next().unwrap_or(authors).trim();
        format!("{} et al.", first)
    } else {
        authors.trim().to_string()
    };

    format!(
        "Welcome to this presentation on \"{}\". \
         This research was conducted by {} and published in {}. \
         Today, we'll explore the key findings and contributions of this important work. \
         Let's begin by understanding the problem this research addresses.",
        title.trim(),
        spoken_authors,
        date.trim()
    )
}

/// Strip markdown markers and characters the synthesizers stumble on,
/// then collapse whitespace.
pub fn clean_for_narration(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let bold = regex::Regex::new(r"\*\*([^*]+)\*\*").unwrap();
    let text = bold.replace_all(text, "$1");
    let italic = regex::Regex::new(r"\*([^*]+)\*").unwrap();
    let text = italic.replace_all(&text, "$1");
    let headings = regex::Regex::new(r"#+\s*").unwrap();
    let text = headings.replace_all(&text, "");
    let unsafe_chars = regex::Regex::new(r#"[^\w\s.,!?;:\-()"']"#).unwrap();
    let text = unsafe_chars.replace_all(&text, " ");
    let whitespace = regex::Regex::new(r"\s+").unwrap();
    whitespace.replace_all(&text, " ").trim().to_string()
}
