use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Quiz, QuizQuestion};
use crate::services::grading::GradeReport;

/// Question as shown before submission. Carries no answer data.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuestionView {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
}

impl From<&QuizQuestion> for QuestionView {
    fn from(question: &QuizQuestion) -> Self {
        QuestionView {
            id: question.id.clone(),
            text: question.text.clone(),
            options: question.options_vec(),
        }
    }
}

/// Pre-submission view of a quiz.
#[derive(Debug, Clone, Serialize)]
pub struct QuizView {
    pub id: String,
    pub summary_id: String,
    pub difficulty: String,
    pub question_count: i32,
    pub is_submitted: bool,
    pub created_at: DateTime<Utc>,
    pub questions: Vec<QuestionView>,
}

impl From<&Quiz> for QuizView {
    fn from(quiz: &Quiz) -> Self {
        QuizView {
            id: quiz.id.clone(),
            summary_id: quiz.summary_id.clone(),
            difficulty: quiz.difficulty.as_str().to_string(),
            question_count: quiz.question_count,
            is_submitted: false,
            created_at: quiz.created_at,
            questions: quiz.questions.iter().map(QuestionView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuestionResult {
    pub question_id: String,
    pub text: String,
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: String,
}

/// Post-submission view of a quiz, answers and explanations revealed.
#[derive(Debug, Clone, Serialize)]
pub struct GradedQuizView {
    pub id: String,
    pub summary_id: String,
    pub difficulty: String,
    pub question_count: i32,
    pub is_submitted: bool,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub created_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
    pub results: Vec<QuestionResult>,
}

impl GradedQuizView {
    pub fn new(quiz: &Quiz, report: GradeReport, submitted_at: DateTime<Utc>) -> Self {
        GradedQuizView {
            id: quiz.id.clone(),
            summary_id: quiz.summary_id.clone(),
            difficulty: quiz.difficulty.as_str().to_string(),
            question_count: quiz.question_count,
            is_submitted: true,
            total_questions: report.results.len() as i32,
            correct_answers: report.correct_answers,
            created_at: quiz.created_at,
            submitted_at,
            results: report.results,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum QuizDetailView {
    Pending(QuizView),
    Graded(GradedQuizView),
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizListItem {
    pub id: String,
    pub summary_id: String,
    pub filename: String,
    pub difficulty: String,
    pub question_count: i32,
    pub is_submitted: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answers: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl QuizListItem {
    pub fn from_quiz(quiz: &Quiz, filename: String) -> Self {
        use crate::models::domain::SubmissionState;

        let (correct_answers, submitted_at) = match &quiz.submission {
            SubmissionState::Pending => (None, None),
            SubmissionState::Graded {
                correct_answers,
                submitted_at,
            } => (Some(*correct_answers), Some(*submitted_at)),
        };

        QuizListItem {
            id: quiz.id.clone(),
            summary_id: quiz.summary_id.clone(),
            filename,
            difficulty: quiz.difficulty.as_str().to_string(),
            question_count: quiz.question_count,
            is_submitted: quiz.is_submitted(),
            created_at: quiz.created_at,
            correct_answers,
            submitted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizPage {
    pub items: Vec<QuizListItem>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}
