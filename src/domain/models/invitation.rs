use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sqlx::FromRow;

use crate::domain::models::member::MemberRole;

pub const CODE_LEN: usize = 6;
const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A short-lived membership grant. Expiry is derived from `expires_at`,
/// never stored as an explicit state; acceptance is terminal.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct HouseholdInvitation {
    pub id: String,
    pub household_id: String,
    pub invited_by: String,
    pub role: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl HouseholdInvitation {
    pub fn new(household_id: String, invited_by: String, role: MemberRole, ttl_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            household_id,
            invited_by,
            role: role.as_str().to_string(),
            code: generate_code(),
            expires_at: now + Duration::minutes(ttl_minutes),
            accepted_at: None,
            created_at: now,
        }
    }

    pub fn role(&self) -> MemberRole {
        MemberRole::from(self.role.as_str())
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Seconds the inviter's countdown should display.
    pub fn seconds_remaining(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}

pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LEN)
        .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
        .collect()
}
