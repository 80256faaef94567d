use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Access token payload. `sub` is the id every quiz operation is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

impl Claims {
    pub fn new(user_id: &str, ttl: Duration) -> Self {
        let issued_at = Utc::now();

        Self {
            sub: user_id.to_string(),
            iat: issued_at.timestamp() as usize,
            exp: (issued_at + ttl).timestamp() as usize,
        }
    }
}
