/*!
 * Message pipeline: translate, explain, localize the explanation.
 *
 * Also hosts the synonym lookup, which rebuilds everything it needs from the
 * action token and never touches session state.
 */

use log::{debug, warn};
use std::fmt;
use std::sync::Arc;

use crate::action_token::SynonymToken;
use crate::language_utils::{Language, SourceLanguage};
use crate::messages;
use crate::session::SessionStore;
use crate::translation::core::Translator;
use crate::translation::explain::{Explainer, Explanation, ExplanationFailure};
use crate::translation::prompts::{direct_synonyms_prompt, english_synonyms_prompt, explanation_prompt};

/// Shortest synonym answer considered usable, in characters
const MIN_SYNONYMS_CHARS: usize = 5;

/// Stages a message goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    Translated,
    Explained,
    Localized,
    Replied,
    Failed,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "RECEIVED",
            Self::Translated => "TRANSLATED",
            Self::Explained => "EXPLAINED(en)",
            Self::Localized => "EXPLAINED(localized)",
            Self::Replied => "REPLIED",
            Self::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

/// Reply composed for a successfully translated message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationReply {
    /// Language the message was translated into
    pub target: Language,
    /// Translated text
    pub translation: String,
    /// Explanation in the target language, or a warning
    pub explanation: String,
    /// Token for the synonyms button, when a word could be derived
    pub synonym_token: Option<SynonymToken>,
}

/// Outcome of processing one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Translation succeeded; the reply may still carry soft failures
    Replied(TranslationReply),
    /// Primary translation failed; the text is the only thing to send
    Failed(String),
}

/// Orchestrates sessions, translator and explainer
#[derive(Clone)]
pub struct MessagePipeline {
    sessions: Arc<dyn SessionStore>,
    translator: Arc<dyn Translator>,
    explainer: Arc<dyn Explainer>,
}

impl MessagePipeline {
    /// Create a new pipeline
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        translator: Arc<dyn Translator>,
        explainer: Arc<dyn Explainer>,
    ) -> Self {
        Self { sessions, translator, explainer }
    }

    /// Session store the pipeline reads target languages from
    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    /// Translate a user's message and explain the result
    pub async fn process_message(&self, user_id: i64, text: &str) -> PipelineOutcome {
        let target = self.sessions.get(user_id);
        debug!("[{}] user {} -> {}", PipelineStage::Received, user_id, target);

        let translation = match self.translator.translate(text, SourceLanguage::Auto, target).await {
            Ok(translation) => translation,
            Err(e) => {
                warn!("[{}] translation for user {} failed: {}", PipelineStage::Failed, user_id, e);
                return PipelineOutcome::Failed(messages::translation_failed(&e));
            }
        };
        debug!("[{}] {} chars", PipelineStage::Translated, translation.chars().count());

        let explanation_en = self.explainer.explain(&explanation_prompt(&translation)).await;
        debug!("[{}] answered: {}", PipelineStage::Explained, explanation_en.answer().is_some());

        let explanation = self.localize_explanation(explanation_en, target).await;
        debug!("[{}] ready for user {}", PipelineStage::Localized, user_id);

        let synonym_token = SynonymToken::from_translation(target, &translation);

        PipelineOutcome::Replied(TranslationReply {
            target,
            translation,
            explanation,
            synonym_token,
        })
    }

    /// Bring an English explanation into the target language
    ///
    /// Failures to translate are soft: the warning replaces the explanation
    /// and the reply is still sent.
    async fn localize_explanation(&self, explanation: Explanation, target: Language) -> String {
        match explanation {
            Explanation::Answer(text) if target != Language::PIVOT => {
                match self.translator.translate(&text, Language::PIVOT.into(), target).await {
                    Ok(localized) => localized,
                    Err(e) => {
                        warn!("Explanation translation to {} failed: {}", target, e);
                        messages::explanation_translation_failed(&e)
                    }
                }
            }
            other => other.render(),
        }
    }

    /// Find synonyms for the word carried by an action token
    pub async fn lookup_synonyms(&self, token: &SynonymToken) -> String {
        let language = token.language();
        let word = token.word();

        if !language.needs_pivot() {
            let answer = self.explainer.explain(&direct_synonyms_prompt(word, language)).await;
            return match usable_synonyms(answer, word) {
                Ok(list) => list,
                Err(message) => message,
            };
        }

        let answer = self.explainer.explain(&english_synonyms_prompt(word)).await;
        let english_list = match usable_synonyms(answer, word) {
            Ok(list) => list,
            Err(message) => return message,
        };

        match self.translator.translate(&english_list, Language::PIVOT.into(), language).await {
            Ok(localized) => localized,
            Err(e) => {
                warn!("Synonym list translation to {} failed: {}", language, e);
                messages::synonyms_translation_failed(language, &english_list)
            }
        }
    }
}

/// Accept a synonym answer or turn it into the message to show instead
fn usable_synonyms(answer: Explanation, word: &str) -> Result<String, String> {
    match answer {
        Explanation::Answer(list) if list.chars().count() >= MIN_SYNONYMS_CHARS => Ok(list),
        Explanation::Answer(_) | Explanation::Unavailable(ExplanationFailure::Empty) => {
            Err(messages::synonyms_not_found(word))
        }
        failure => Err(failure.render()),
    }
}
