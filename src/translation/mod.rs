/*!
 * Translation and explanation services.
 *
 * This module is split into several submodules:
 *
 * - `core`: The `Translator` seam and the machine translation service
 * - `explain`: The `Explainer` seam and the generative explanation service
 * - `prompts`: Prompt templates sent to the generative provider
 * - `pipeline`: Per-message orchestration and synonym lookup
 */

// Re-export main types for easier usage
pub use self::core::{TranslationService, Translator};
pub use self::explain::{Explainer, Explanation, ExplanationFailure, ExplanationService, GenerationSettings};
pub use self::pipeline::{MessagePipeline, PipelineOutcome, PipelineStage, TranslationReply};

// Re-export prompt types
pub use self::prompts::PromptTemplate;

// Submodules
pub mod core;
pub mod explain;
pub mod pipeline;
pub mod prompts;
