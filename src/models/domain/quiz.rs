use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::domain::quiz_question::QuizQuestion;

/// Question counts a quiz may be generated with.
pub const ALLOWED_QUESTION_COUNTS: [i32; 3] = [5, 10, 15];

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub user_id: String,
    pub summary_id: String,
    pub difficulty: Difficulty,
    pub question_count: i32, // requested, not necessarily produced
    pub submission: SubmissionState,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
    #[serde(with = "sortable_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// RFC 3339 with a fixed nine fractional digits, so stored timestamps
/// order lexicographically the same way they order in time.
pub mod sortable_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Nanos, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Write-once submission state of a quiz.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmissionState {
    #[default]
    Pending,
    Graded {
        correct_answers: i32,
        submitted_at: DateTime<Utc>,
    },
}

impl Quiz {
    pub fn new(
        user_id: &str,
        summary_id: &str,
        difficulty: Difficulty,
        question_count: i32,
    ) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            summary_id: summary_id.to_string(),
            difficulty,
            question_count,
            submission: SubmissionState::Pending,
            questions: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.submission, SubmissionState::Graded { .. })
    }
}

pub fn validate_question_count(question_count: i32) -> Result<i32, AppError> {
    if ALLOWED_QUESTION_COUNTS.contains(&question_count) {
        Ok(question_count)
    } else {
        Err(AppError::InvalidQuestionCount(question_count))
    }
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Kind of thinking questions of this difficulty should demand.
    pub fn cognitive_demand(&self) -> &'static str {
        match self {
            Difficulty::Easy => {
                "direct recall of facts, terms and definitions stated in the summary"
            }
            Difficulty::Medium => {
                "applied understanding: using the summary's concepts in a concrete situation"
            }
            Difficulty::Hard => {
                "analysis and critical thinking: comparing ideas, drawing inferences and evaluating claims"
            }
        }
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(AppError::InvalidDifficulty(value.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
