/*!
 * Prompt templates for the generative provider.
 */

use crate::language_utils::Language;

/// Prompt template with `{name}` placeholders.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// Short English explanation of a translated phrase.
    pub const EXPLANATION: &'static str = "Explain the meaning and give brief context for the phrase: '{phrase}'. \
The answer must be in ENGLISH and be as short and to the point as possible.";

    /// Synonyms asked for directly in the target language.
    pub const DIRECT_SYNONYMS: &'static str = "Provide 5-7 synonyms or alternative phrases for the word '{word}' \
in the language with code '{language_code}' ({language_name}) and list them in a simple, unnumbered format. \
Do not add extra explanations, only the list.";

    /// Synonyms asked for in English, to be machine-translated afterwards.
    pub const ENGLISH_SYNONYMS: &'static str = "Provide 5-7 synonyms for the word '{word}' and list them. \
The response must be a simple, clean, unnumbered list in ENGLISH.";

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Render the template, replacing each `{name}` with its value.
    pub fn render(&self, variables: &[(&str, &str)]) -> String {
        variables.iter().fold(self.template.clone(), |rendered, (name, value)| {
            rendered.replace(&format!("{{{}}}", name), value)
        })
    }
}

/// Prompt asking for an English explanation of `phrase`
pub fn explanation_prompt(phrase: &str) -> String {
    PromptTemplate::new(PromptTemplate::EXPLANATION).render(&[("phrase", phrase)])
}

/// Prompt asking for synonyms of `word` directly in `language`
pub fn direct_synonyms_prompt(word: &str, language: Language) -> String {
    PromptTemplate::new(PromptTemplate::DIRECT_SYNONYMS).render(&[
        ("word", word),
        ("language_code", language.code()),
        ("language_name", language.english_name()),
    ])
}

/// Prompt asking for English synonyms of `word`
pub fn english_synonyms_prompt(word: &str) -> String {
    PromptTemplate::new(PromptTemplate::ENGLISH_SYNONYMS).render(&[("word", word)])
}
