use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{Quiz, QuizQuestion, SubmissionState},
};

/// Storage of quizzes together with the questions they own.
///
/// Every lookup is scoped to the owning user; there is no path to a
/// question other than through its quiz.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    /// Loads a quiz with its questions, or `None` if it is missing or owned by someone else.
    async fn find_by_id_and_owner(&self, id: &str, user_id: &str) -> AppResult<Option<Quiz>>;
    /// Stores the generated questions of a quiz that has none yet.
    /// Returns false if the quiz is gone or already has questions.
    async fn attach_questions(&self, quiz_id: &str, questions: &[QuizQuestion]) -> AppResult<bool>;
    /// Moves a pending quiz to its graded state, storing the answered questions.
    /// Returns false, leaving the quiz untouched, if it is not pending anymore.
    async fn record_submission(
        &self,
        quiz_id: &str,
        user_id: &str,
        questions: &[QuizQuestion],
        submission: &SubmissionState,
    ) -> AppResult<bool>;
    /// Quiz headers (questions not loaded), newest first.
    async fn list_by_owner(
        &self,
        user_id: &str,
        summary_id: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Quiz>, i64)>;
    /// Deletes a quiz and, with it, its questions.
    async fn delete(&self, quiz_id: &str, user_id: &str) -> AppResult<bool>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quizzes");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let owner_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("user_created_at".to_string())
                    .build(),
            )
            .build();

        let owner_summary_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "summary_id": 1, "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("user_summary_created_at".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(owner_index).await?;
        self.collection.create_index(owner_summary_index).await?;

        log::info!("Successfully created indexes for quizzes collection");
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn find_by_id_and_owner(&self, id: &str, user_id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self
            .collection
            .find_one(doc! { "id": id, "user_id": user_id })
            .await?;
        Ok(quiz)
    }

    async fn attach_questions(&self, quiz_id: &str, questions: &[QuizQuestion]) -> AppResult<bool> {
        let questions = to_bson(questions)?;
        let result = self
            .collection
            .update_one(
                doc! { "id": quiz_id, "questions": { "$size": 0 } },
                doc! { "$set": { "questions": questions } },
            )
            .await?;
        Ok(result.matched_count == 1)
    }

    async fn record_submission(
        &self,
        quiz_id: &str,
        user_id: &str,
        questions: &[QuizQuestion],
        submission: &SubmissionState,
    ) -> AppResult<bool> {
        let submission = to_bson(submission)?;
        let questions = to_bson(questions)?;

        // The status filter makes this a compare-and-swap: only one writer can match.
        let result = self
            .collection
            .update_one(
                doc! {
                    "id": quiz_id,
                    "user_id": user_id,
                    "submission.status": "pending"
                },
                doc! {
                    "$set": {
                        "submission": submission,
                        "questions": questions
                    }
                },
            )
            .await?;
        Ok(result.matched_count == 1)
    }

    async fn list_by_owner(
        &self,
        user_id: &str,
        summary_id: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Quiz>, i64)> {
        let mut filter = doc! { "user_id": user_id };

        if let Some(sid) = summary_id {
            filter.insert("summary_id", sid);
        }

        let total = self.collection.count_documents(filter.clone()).await?;

        let quizzes = self
            .collection
            .find(filter)
            .projection(doc! { "questions": 0 })
            .sort(doc! { "created_at": -1 })
            .skip(offset.max(0) as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((quizzes, total as i64))
    }

    async fn delete(&self, quiz_id: &str, user_id: &str) -> AppResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "id": quiz_id, "user_id": user_id })
            .await?;
        Ok(result.deleted_count == 1)
    }
}
