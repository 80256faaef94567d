use std::{collections::HashMap, sync::Arc, time::Duration};

use chrono::Utc;

use crate::{
    constants::quiz_prompt::build_quiz_prompt,
    errors::{AppError, AppResult, GenerationError},
    models::{
        domain::{quiz::validate_question_count, Difficulty, Quiz, QuizQuestion, SubmissionState},
        dto::{
            request::SubmittedAnswer,
            response::{GradedQuizView, QuizDetailView, QuizListItem, QuizPage, QuizView},
        },
    },
    repositories::{QuizRepository, SummaryDocumentRepository},
    services::{
        grading::grade_questions, model_service::ModelGateway,
        question_mapper::map_questions, response_sanitizer::extract_json_array,
    },
};

/// Owns the quiz lifecycle: generation, one-time submission and reads.
///
/// The caller's user id is passed into every operation and scopes every
/// lookup.
pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
    summaries: Arc<dyn SummaryDocumentRepository>,
    model: Arc<dyn ModelGateway>,
    model_timeout: Duration,
    page_size: i64,
}

impl QuizService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        summaries: Arc<dyn SummaryDocumentRepository>,
        model: Arc<dyn ModelGateway>,
        model_timeout: Duration,
        page_size: i64,
    ) -> Self {
        Self {
            quizzes,
            summaries,
            model,
            model_timeout,
            page_size: page_size.max(1),
        }
    }

    pub async fn generate_quiz(
        &self,
        user_id: &str,
        summary_id: &str,
        difficulty: &str,
        question_count: i32,
    ) -> AppResult<QuizView> {
        let question_count = validate_question_count(question_count)?;

        let summary = self
            .summaries
            .find_by_id_and_owner(summary_id, user_id)
            .await?
            .ok_or(AppError::AccessDenied)?;

        let difficulty: Difficulty = difficulty.parse()?;

        let mut quiz = self
            .quizzes
            .create(Quiz::new(user_id, &summary.id, difficulty, question_count))
            .await?;
        log::info!(
            "Created quiz {} for user {} from summary {}",
            quiz.id,
            user_id,
            summary.id
        );

        let prompt = build_quiz_prompt(&summary.content, difficulty, question_count);

        let questions = match self.generate_questions(&prompt, question_count, &quiz.id).await {
            Ok(questions) => questions,
            Err(err) => {
                log::warn!("Generation failed for quiz {}: {}", quiz.id, err);
                self.discard_quiz(&quiz).await;
                return Err(AppError::GenerationFailed(err));
            }
        };

        match self.quizzes.attach_questions(&quiz.id, &questions).await {
            Ok(true) => {}
            Ok(false) => {
                self.discard_quiz(&quiz).await;
                return Err(AppError::InternalError(format!(
                    "Quiz {} could not take its generated questions",
                    quiz.id
                )));
            }
            Err(err) => {
                self.discard_quiz(&quiz).await;
                return Err(err);
            }
        }

        log::info!("Stored {} questions for quiz {}", questions.len(), quiz.id);
        quiz.questions = questions;
        Ok(QuizView::from(&quiz))
    }

    /// Model call, sanitizing and validation. Nothing is persisted here.
    async fn generate_questions(
        &self,
        prompt: &str,
        question_count: i32,
        quiz_id: &str,
    ) -> Result<Vec<QuizQuestion>, GenerationError> {
        let started = std::time::Instant::now();
        log::info!("Requesting {} questions for quiz {}", question_count, quiz_id);

        let raw = tokio::time::timeout(self.model_timeout, self.model.complete(prompt))
            .await
            .map_err(|_| GenerationError::ModelTimeout(self.model_timeout.as_secs()))??;

        log::info!(
            "Model answered for quiz {} in {} ms",
            quiz_id,
            started.elapsed().as_millis()
        );

        let payload = extract_json_array(&raw)?;
        map_questions(payload, question_count, quiz_id)
    }

    async fn discard_quiz(&self, quiz: &Quiz) {
        match self.quizzes.delete(&quiz.id, &quiz.user_id).await {
            Ok(_) => log::info!("Rolled back quiz {}", quiz.id),
            Err(err) => log::error!("Failed to roll back quiz {}: {}", quiz.id, err),
        }
    }

    pub async fn submit_quiz(
        &self,
        user_id: &str,
        quiz_id: &str,
        answers: Vec<SubmittedAnswer>,
    ) -> AppResult<GradedQuizView> {
        let mut quiz = self
            .quizzes
            .find_by_id_and_owner(quiz_id, user_id)
            .await?
            .ok_or_else(|| AppError::QuizNotFound(quiz_id.to_string()))?;

        if quiz.is_submitted() {
            return Err(AppError::AlreadySubmitted(quiz.id));
        }

        // Later entries for the same question overwrite earlier ones
        let answers: HashMap<String, Option<String>> = answers
            .into_iter()
            .map(|a| (a.question_id, a.answer))
            .collect();

        for question in quiz.questions.iter_mut() {
            question.user_answer = answers.get(&question.id).cloned().flatten();
        }

        let report = grade_questions(&quiz.questions);
        let submitted_at = Utc::now();
        let submission = SubmissionState::Graded {
            correct_answers: report.correct_answers,
            submitted_at,
        };

        let recorded = self
            .quizzes
            .record_submission(&quiz.id, user_id, &quiz.questions, &submission)
            .await?;

        if !recorded {
            log::info!("Quiz {} was submitted concurrently, rejecting", quiz.id);
            return Err(AppError::AlreadySubmitted(quiz.id));
        }

        log::info!(
            "Quiz {} submitted: {}/{} correct",
            quiz.id,
            report.correct_answers,
            quiz.questions.len()
        );

        quiz.submission = submission;
        Ok(GradedQuizView::new(&quiz, report, submitted_at))
    }

    pub async fn get_quiz_detail(&self, user_id: &str, quiz_id: &str) -> AppResult<QuizDetailView> {
        let quiz = self
            .quizzes
            .find_by_id_and_owner(quiz_id, user_id)
            .await?
            .ok_or_else(|| AppError::QuizNotFound(quiz_id.to_string()))?;

        match quiz.submission {
            SubmissionState::Pending => Ok(QuizDetailView::Pending(QuizView::from(&quiz))),
            SubmissionState::Graded {
                correct_answers,
                submitted_at,
            } => {
                let report = grade_questions(&quiz.questions);
                if report.correct_answers != correct_answers {
                    log::warn!(
                        "Quiz {} regraded to {} correct, {} stored",
                        quiz.id,
                        report.correct_answers,
                        correct_answers
                    );
                }
                Ok(QuizDetailView::Graded(GradedQuizView::new(
                    &quiz,
                    report,
                    submitted_at,
                )))
            }
        }
    }

    pub async fn list_quizzes(
        &self,
        user_id: &str,
        summary_id: Option<&str>,
        page: i64,
    ) -> AppResult<QuizPage> {
        if let Some(summary_id) = summary_id {
            self.summaries
                .find_by_id_and_owner(summary_id, user_id)
                .await?
                .ok_or(AppError::AccessDenied)?;
        }

        let page = page.max(0);
        let offset = page.checked_mul(self.page_size).ok_or_else(|| {
            AppError::ValidationError(format!("page {} is out of range", page))
        })?;

        let (quizzes, total) = self
            .quizzes
            .list_by_owner(user_id, summary_id, offset, self.page_size)
            .await?;

        let mut summary_ids: Vec<String> = quizzes.iter().map(|q| q.summary_id.clone()).collect();
        summary_ids.sort();
        summary_ids.dedup();

        let filenames: HashMap<String, String> = self
            .summaries
            .find_by_ids_and_owner(&summary_ids, user_id)
            .await?
            .into_iter()
            .map(|s| (s.id, s.filename))
            .collect();

        let items = quizzes
            .iter()
            .map(|quiz| {
                let filename = filenames.get(&quiz.summary_id).cloned().unwrap_or_default();
                QuizListItem::from_quiz(quiz, filename)
            })
            .collect();

        Ok(QuizPage {
            items,
            page,
            page_size: self.page_size,
            total,
        })
    }
}
