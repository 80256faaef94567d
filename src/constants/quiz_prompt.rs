use once_cell::sync::Lazy;

use crate::models::domain::Difficulty;
use crate::models::dto::quiz_dto::GeneratedQuestionDto;

static QUESTION_ARRAY_SCHEMA: Lazy<String> = Lazy::new(|| {
    serde_json::to_string_pretty(&schemars::schema_for!(Vec<GeneratedQuestionDto>))
        .unwrap_or_else(|_| "[]".to_string())
});

pub const QUIZ_GENERATION_PROMPT: &str = "You are an assessment author creating a multiple-choice quiz from a study summary. Every question must be answerable from the summary alone.

## QUIZ REQUIREMENTS

1. Write exactly {question_count} questions.
2. Each question has exactly 4 answer options.
3. Exactly one option is correct; the other three are plausible but wrong.
4. correctAnswer repeats the text of the correct option verbatim.
5. explanation briefly states why the correct answer is right, citing the summary.
6. Give each question a unique id: \"q1\", \"q2\", and so on.

## DIFFICULTY: {difficulty}

Questions must test {cognitive_demand}.

## OUTPUT FORMAT

Reply with ONLY a JSON array. No prose, no markdown, no code fences, no extra keys.
Each element has the keys id, question, options, correctAnswer and explanation, and the array conforms to this JSON schema:

{schema}

Example element:
{\"id\": \"q1\", \"question\": \"...\", \"options\": [\"...\", \"...\", \"...\", \"...\"], \"correctAnswer\": \"...\", \"explanation\": \"...\"}

## SUMMARY

{summary}";

/// Renders the generation prompt for one quiz.
pub fn build_quiz_prompt(summary: &str, difficulty: Difficulty, question_count: i32) -> String {
    QUIZ_GENERATION_PROMPT
        .replace("{question_count}", &question_count.to_string())
        .replace("{difficulty}", &difficulty.as_str().to_uppercase())
        .replace("{cognitive_demand}", difficulty.cognitive_demand())
        .replace("{schema}", &QUESTION_ARRAY_SCHEMA)
        // last, so placeholder-like text inside the summary is left alone
        .replace("{summary}", summary)
}
