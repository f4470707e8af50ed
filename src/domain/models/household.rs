use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A shared inventory space. The icon emoji lives in the `description`
/// column, a naming quirk inherited from the original schema.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Household {
    pub id: String,
    pub name: String,
    #[serde(rename = "icon")]
    pub description: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Household {
    pub fn new(name: String, icon: Option<String>, created_by: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description: icon,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}
