use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::SummaryDocument};

#[async_trait]
pub trait SummaryDocumentRepository: Send + Sync {
    async fn find_by_id_and_owner(
        &self,
        id: &str,
        user_id: &str,
    ) -> AppResult<Option<SummaryDocument>>;
    async fn find_by_ids_and_owner(
        &self,
        ids: &[String],
        user_id: &str,
    ) -> AppResult<Vec<SummaryDocument>>;
    async fn create(&self, document: SummaryDocument) -> AppResult<SummaryDocument>;
}

pub struct MongoSummaryDocumentRepository {
    collection: Collection<SummaryDocument>,
}

impl MongoSummaryDocumentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("summary_documents");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for summary_documents collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let user_id_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder().name("user_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_id_index).await?;

        log::info!("Successfully created indexes for summary_documents collection");
        Ok(())
    }
}

#[async_trait]
impl SummaryDocumentRepository for MongoSummaryDocumentRepository {
    async fn find_by_id_and_owner(
        &self,
        id: &str,
        user_id: &str,
    ) -> AppResult<Option<SummaryDocument>> {
        let document = self
            .collection
            .find_one(doc! { "id": id, "user_id": user_id })
            .await?;
        Ok(document)
    }

    async fn find_by_ids_and_owner(
        &self,
        ids: &[String],
        user_id: &str,
    ) -> AppResult<Vec<SummaryDocument>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let documents = self
            .collection
            .find(doc! { "id": { "$in": ids.to_vec() }, "user_id": user_id })
            .await?
            .try_collect()
            .await?;
        Ok(documents)
    }

    async fn create(&self, document: SummaryDocument) -> AppResult<SummaryDocument> {
        self.collection.insert_one(&document).await?;
        Ok(document)
    }
}
