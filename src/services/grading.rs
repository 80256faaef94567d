use crate::models::domain::QuizQuestion;
use crate::models::dto::response::QuestionResult;

/// Outcome of grading every question of a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeReport {
    pub results: Vec<QuestionResult>,
    pub correct_answers: i32,
}

/// Whether a submitted answer matches the stored correct answer.
///
/// Both sides are trimmed and compared case-insensitively; a missing answer
/// is never correct.
pub fn is_correct(user_answer: Option<&str>, correct_answer: &str) -> bool {
    match user_answer {
        Some(answer) => normalize(answer) == normalize(correct_answer),
        None => false,
    }
}

fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// Grades questions against the `user_answer` already stored on each of them.
pub fn grade_questions(questions: &[QuizQuestion]) -> GradeReport {
    let results: Vec<QuestionResult> = questions
        .iter()
        .map(|question| QuestionResult {
            question_id: question.id.clone(),
            text: question.text.clone(),
            user_answer: question.user_answer.clone(),
            correct_answer: question.correct_answer.clone(),
            is_correct: is_correct(question.user_answer.as_deref(), &question.correct_answer),
            explanation: question.explanation.clone(),
        })
        .collect();

    let correct_answers = results.iter().filter(|r| r.is_correct).count() as i32;

    GradeReport {
        results,
        correct_answers,
    }
}
