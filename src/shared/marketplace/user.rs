//! User and authentication payloads.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public profile of a user, as returned by `/auth/me` and the auth endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    /// Points balance available for redemptions
    pub points: i64,
    #[serde(default, with = "super::timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

impl UserProfile {
    /// Whether the balance covers a redemption at `price` points
    pub fn can_afford(&self, price: i64) -> bool {
        self.points >= price
    }
}

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Authentication response from server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}
