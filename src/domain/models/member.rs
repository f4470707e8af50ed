use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    Admin,
    Member,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Owner => "owner",
            MemberRole::Admin => "admin",
            MemberRole::Member => "member",
        }
    }
}

impl From<&str> for MemberRole {
    fn from(s: &str) -> Self {
        match s {
            "owner" => MemberRole::Owner,
            "admin" => MemberRole::Admin,
            _ => MemberRole::Member,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct HouseholdMember {
    pub id: String,
    pub household_id: String,
    pub user_id: String,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

impl HouseholdMember {
    pub fn new(household_id: String, user_id: String, role: MemberRole) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            household_id,
            user_id,
            role: role.as_str().to_string(),
            joined_at: Utc::now(),
        }
    }

    pub fn role(&self) -> MemberRole {
        MemberRole::from(self.role.as_str())
    }
}
