/*!
 * Prompt engineering for explanations and synonym lookups.
 *
 * All prompts are written in the pivot language (English) so answer quality
 * does not depend on the user's target language.
 */

pub mod templates;

// Re-export main types
pub use templates::{PromptTemplate, direct_synonyms_prompt, english_synonyms_prompt, explanation_prompt};
