use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::errors::GenerationError;
use crate::models::domain::QuizQuestion;
use crate::models::dto::quiz_dto::{GeneratedQuestionDto, REQUIRED_QUESTION_KEYS};

/// Validates a sanitized model payload and maps it into questions for `quiz_id`.
///
/// Any invalid entry rejects the whole batch. A batch whose size differs
/// from `requested_count` is accepted as produced.
pub fn map_questions(
    payload: &str,
    requested_count: i32,
    quiz_id: &str,
) -> Result<Vec<QuizQuestion>, GenerationError> {
    let entries: Vec<Value> = serde_json::from_str(payload)
        .map_err(|e| GenerationError::MalformedModelOutput(e.to_string()))?;

    if entries.is_empty() {
        return Err(GenerationError::EmptyGenerationResult);
    }

    if entries.len() != requested_count as usize {
        log::warn!(
            "Model produced {} questions for quiz {}, {} were requested",
            entries.len(),
            quiz_id,
            requested_count
        );
    }

    let mut seen_ids = HashSet::new();
    let mut questions = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let question = map_entry(index, entry, quiz_id)?;
        if !seen_ids.insert(question.id.clone()) {
            return Err(GenerationError::DuplicateQuestionId(question.id));
        }
        questions.push(question);
    }

    Ok(questions)
}

fn map_entry(index: usize, entry: Value, quiz_id: &str) -> Result<QuizQuestion, GenerationError> {
    let object = entry
        .as_object()
        .ok_or_else(|| incomplete(index, "entry is not a JSON object"))?;

    check_required_keys(index, object)?;
    let options = check_options(index, &object["options"])?;

    let generated: GeneratedQuestionDto =
        serde_json::from_value(entry).map_err(|e| incomplete(index, &e.to_string()))?;

    if generated.id.trim().is_empty() {
        return Err(incomplete(index, "id is blank"));
    }
    if generated.question.trim().is_empty() {
        return Err(incomplete(index, "question is blank"));
    }

    if !options.contains(&generated.correct_answer) {
        return Err(GenerationError::CorrectAnswerNotInOptions {
            question_id: generated.id,
        });
    }

    Ok(QuizQuestion {
        id: generated.id,
        quiz_id: quiz_id.to_string(),
        text: generated.question,
        options,
        correct_answer: generated.correct_answer,
        explanation: generated.explanation,
        user_answer: None,
    })
}

fn check_required_keys(index: usize, object: &Map<String, Value>) -> Result<(), GenerationError> {
    match REQUIRED_QUESTION_KEYS
        .iter()
        .find(|key| !object.contains_key(**key))
    {
        Some(missing) => Err(incomplete(index, &format!("missing key '{}'", missing))),
        None => Ok(()),
    }
}

fn check_options(index: usize, options: &Value) -> Result<[String; 4], GenerationError> {
    let options: Vec<String> = serde_json::from_value(options.clone())
        .map_err(|_| GenerationError::InvalidOptionsShape { index })?;

    <[String; 4]>::try_from(options).map_err(|_| GenerationError::InvalidOptionsShape { index })
}

fn incomplete(index: usize, reason: &str) -> GenerationError {
    GenerationError::IncompleteQuestion {
        index,
        reason: reason.to_string(),
    }
}
