use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    jobmodel::ReportReason,
    usermodel::{User, UserType},
};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,

    #[validate(
        length(min = 1, message = "Confirm Password is required"),
        must_match(other = "password", message = "passwords do not match")
    )]
    #[serde(rename = "passwordConfirm")]
    pub password_confirm: String,

    pub user_type: UserType,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(length(min = 1, message = "Email is required"), email(message = "Email is invalid"))]
    pub email: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 2000, message = "Bio must be at most 2000 characters"))]
    pub bio: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Location must be between 1 and 255 characters"))]
    pub location: Option<String>,

    #[validate(length(min = 3, max = 10, message = "Zip code must be between 3 and 10 characters"))]
    pub zip_code: Option<String>,

    // Pro-only fields; rejected with 400 for customer accounts
    pub skills: Option<Vec<String>>,

    #[validate(range(min = 0, message = "Hourly rate must be positive"))]
    pub hourly_rate_cents: Option<i64>,

    #[validate(range(min = 0, max = 70, message = "Experience must be between 0 and 70 years"))]
    pub years_experience: Option<i32>,

    pub portfolio_images: Option<Vec<String>>,

    #[validate(url(message = "Invalid resume URL"))]
    pub resume_url: Option<String>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateReportDto {
    pub reason: ReportReason,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub user_type: UserType,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub zip_code: Option<String>,
    pub skills: Option<Vec<String>>,
    pub hourly_rate_cents: Option<i64>,
    pub years_experience: Option<i32>,
    pub portfolio_images: Option<Vec<String>>,
    pub resume_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            user_type: user.user_type,
            bio: user.bio.clone(),
            location: user.location.clone(),
            zip_code: user.zip_code.clone(),
            skills: user.skills.clone(),
            hourly_rate_cents: user.hourly_rate_cents,
            years_experience: user.years_experience,
            portfolio_images: user.portfolio_images.clone(),
            resume_url: user.resume_url.clone(),
            created_at: user.created_at,
        }
    }
}

/// Public view of a profile; email is withheld and review aggregates are
/// attached.
#[derive(Debug, Serialize, Deserialize)]
pub struct PublicProfileDto {
    pub id: Uuid,
    pub name: String,
    pub user_type: UserType,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
    pub hourly_rate_cents: Option<i64>,
    pub years_experience: Option<i32>,
    pub portfolio_images: Option<Vec<String>>,
    pub average_rating: Option<f64>,
    pub review_count: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub status: String,
    pub data: UserData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoginResponseDto {
    pub status: String,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_dto() -> RegisterUserDto {
        RegisterUserDto {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret-password".to_string(),
            password_confirm: "secret-password".to_string(),
            user_type: UserType::Customer,
        }
    }

    #[test]
    fn test_register_dto_validates() {
        assert!(register_dto().validate().is_ok());
    }

    #[test]
    fn test_register_dto_password_mismatch_rejected() {
        let mut dto = register_dto();
        dto.password_confirm = "something-else".to_string();
        assert!(dto.validate().is_err());
    }
}
