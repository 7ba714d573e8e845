use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Customer,
    Pro,
}

impl UserType {
    pub fn to_str(&self) -> &str {
        match self {
            UserType::Customer => "customer",
            UserType::Pro => "pro",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub user_type: UserType,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub zip_code: Option<String>,

    // Pro-only fields
    pub skills: Option<Vec<String>>,
    pub hourly_rate_cents: Option<i64>,
    pub years_experience: Option<i32>,
    pub portfolio_images: Option<Vec<String>>,
    pub resume_url: Option<String>,

    pub created_at: Option<DateTime<Utc>>, // Database has DEFAULT NOW(), can be NULL
    pub updated_at: Option<DateTime<Utc>>, // Database has DEFAULT NOW(), can be NULL
}
