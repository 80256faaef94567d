use schemars::JsonSchema;
use serde::Deserialize;

/// Shape of one question as the model is instructed to emit it.
///
/// Only used to describe the expected payload and to type-check an entry
/// once its keys and options were validated; see `services::question_mapper`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestionDto {
    /// Short identifier unique within the quiz, e.g. "q1"
    pub id: String,
    /// The question text
    pub question: String,
    /// Exactly four answer options
    pub options: Vec<String>,
    /// Must repeat one of the options verbatim
    pub correct_answer: String,
    /// One or two sentences on why the correct answer is right
    pub explanation: String,
}

/// Keys every generated entry must carry.
pub const REQUIRED_QUESTION_KEYS: [&str; 5] =
    ["id", "question", "options", "correctAnswer", "explanation"];
