use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// AI-generated summary of an uploaded document, owned by one user.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SummaryDocument {
    pub id: String,
    pub user_id: String,
    pub filename: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SummaryDocument {
    pub fn new_summary_document(user_id: &str, filename: &str, content: &str) -> Self {
        SummaryDocument {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            filename: filename.to_string(),
            content: content.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}
