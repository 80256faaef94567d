use std::{sync::Arc, time::Duration};

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoQuizRepository, MongoSummaryDocumentRepository},
    services::{model_service::OpenAiModelGateway, quiz_service::QuizService},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub db: Database,
}

impl AppState {
    pub async fn new(config: &Config) -> AppResult<Self> {
        let db = Database::connect(config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let summary_repository = Arc::new(MongoSummaryDocumentRepository::new(&db));
        summary_repository.ensure_indexes().await?;

        let model_gateway = Arc::new(OpenAiModelGateway::new(config));

        let quiz_service = Arc::new(QuizService::new(
            quiz_repository,
            summary_repository,
            model_gateway,
            Duration::from_secs(config.model_timeout_secs),
            config.quiz_page_size,
        ));

        Ok(Self::with_service(quiz_service, db))
    }

    /// State around an already built service, e.g. one backed by other repositories.
    pub fn with_service(quiz_service: Arc<QuizService>, db: Database) -> Self {
        Self { quiz_service, db }
    }
}
