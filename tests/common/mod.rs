#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use mockall::mock;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use summary_quiz_server::{
    errors::{AppResult, GenerationError},
    models::domain::{Quiz, QuizQuestion, SubmissionState, SummaryDocument},
    repositories::{QuizRepository, SummaryDocumentRepository},
    services::{model_service::ModelGateway, quiz_service::QuizService},
};

pub const PAGE_SIZE: i64 = 10;

mock! {
    pub Gateway {}

    #[async_trait]
    impl ModelGateway for Gateway {
        async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
    }
}

/// Gateway that never answers within a short timeout.
pub struct SlowGateway {
    pub delay: Duration,
}

#[async_trait]
impl ModelGateway for SlowGateway {
    async fn complete(&self, _prompt: &str) -> Result<String, GenerationError> {
        tokio::time::sleep(self.delay).await;
        Ok("[]".to_string())
    }
}

#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: RwLock<HashMap<String, Quiz>>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.quizzes.read().await.len()
    }

    pub async fn get(&self, id: &str) -> Option<Quiz> {
        self.quizzes.read().await.get(id).cloned()
    }

    pub async fn insert(&self, quiz: Quiz) {
        self.quizzes.write().await.insert(quiz.id.clone(), quiz);
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.quizzes
            .write()
            .await
            .insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn find_by_id_and_owner(&self, id: &str, user_id: &str) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.get(id).filter(|q| q.user_id == user_id).cloned())
    }

    async fn attach_questions(&self, quiz_id: &str, questions: &[QuizQuestion]) -> AppResult<bool> {
        let mut quizzes = self.quizzes.write().await;
        match quizzes.get_mut(quiz_id) {
            Some(quiz) if quiz.questions.is_empty() => {
                quiz.questions = questions.to_vec();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn record_submission(
        &self,
        quiz_id: &str,
        user_id: &str,
        questions: &[QuizQuestion],
        submission: &SubmissionState,
    ) -> AppResult<bool> {
        let mut quizzes = self.quizzes.write().await;
        match quizzes.get_mut(quiz_id) {
            Some(quiz) if quiz.user_id == user_id && !quiz.is_submitted() => {
                quiz.questions = questions.to_vec();
                quiz.submission = submission.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_by_owner(
        &self,
        user_id: &str,
        summary_id: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Quiz>, i64)> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<Quiz> = quizzes
            .values()
            .filter(|q| q.user_id == user_id)
            .filter(|q| summary_id.map_or(true, |s| q.summary_id == s))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = items.len() as i64;
        let page = items
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(|mut quiz| {
                quiz.questions.clear();
                quiz
            })
            .collect();

        Ok((page, total))
    }

    async fn delete(&self, quiz_id: &str, user_id: &str) -> AppResult<bool> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.get(quiz_id).is_some_and(|q| q.user_id == user_id) {
            quizzes.remove(quiz_id);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[derive(Default)]
pub struct InMemorySummaryDocumentRepository {
    documents: RwLock<HashMap<String, SummaryDocument>>,
}

impl InMemorySummaryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SummaryDocumentRepository for InMemorySummaryDocumentRepository {
    async fn find_by_id_and_owner(
        &self,
        id: &str,
        user_id: &str,
    ) -> AppResult<Option<SummaryDocument>> {
        let documents = self.documents.read().await;
        Ok(documents.get(id).filter(|d| d.user_id == user_id).cloned())
    }

    async fn find_by_ids_and_owner(
        &self,
        ids: &[String],
        user_id: &str,
    ) -> AppResult<Vec<SummaryDocument>> {
        let documents = self.documents.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| documents.get(id))
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, document: SummaryDocument) -> AppResult<SummaryDocument> {
        self.documents
            .write()
            .await
            .insert(document.id.clone(), document.clone());
        Ok(document)
    }
}

pub struct TestContext {
    pub service: Arc<QuizService>,
    pub quizzes: Arc<InMemoryQuizRepository>,
    pub summaries: Arc<InMemorySummaryDocumentRepository>,
}

pub fn context_with_gateway(model: Arc<dyn ModelGateway>, timeout: Duration) -> TestContext {
    let quizzes = Arc::new(InMemoryQuizRepository::new());
    let summaries = Arc::new(InMemorySummaryDocumentRepository::new());
    let service = Arc::new(QuizService::new(
        quizzes.clone(),
        summaries.clone(),
        model,
        timeout,
        PAGE_SIZE,
    ));

    TestContext {
        service,
        quizzes,
        summaries,
    }
}

pub fn context(model: MockGateway) -> TestContext {
    context_with_gateway(Arc::new(model), Duration::from_secs(5))
}

pub async fn seed_summary(ctx: &TestContext, user_id: &str, filename: &str) -> SummaryDocument {
    let summary = SummaryDocument::new_summary_document(
        user_id,
        filename,
        "Mitochondria produce ATP through cellular respiration.",
    );
    ctx.summaries
        .create(summary)
        .await
        .expect("seeding summary should succeed")
}

/// One generated question as the model would phrase it.
pub fn generated_question(id: &str, correct: &str) -> Value {
    json!({
        "id": id,
        "question": format!("What does statement {} describe?", id),
        "options": ["A", "B", "C", "D"],
        "correctAnswer": correct,
        "explanation": format!("The summary states {} directly.", correct)
    })
}

/// A model response with `correct_answers.len()` questions q1..qN.
pub fn model_response(correct_answers: &[&str]) -> String {
    let entries: Vec<Value> = correct_answers
        .iter()
        .enumerate()
        .map(|(i, correct)| generated_question(&format!("q{}", i + 1), correct))
        .collect();
    serde_json::to_string_pretty(&entries).expect("response serializes")
}

pub fn fenced(response: &str) -> String {
    format!("```json\n{}\n```", response)
}

/// Gateway that answers every call with `response`, expecting exactly `times` calls.
pub fn gateway_returning(response: String, times: usize) -> MockGateway {
    let mut gateway = MockGateway::new();
    gateway
        .expect_complete()
        .times(times)
        .returning(move |_| Ok(response.clone()));
    gateway
}
