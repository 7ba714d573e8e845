use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::{dtos::userdtos::UpdateProfileDto, models::usermodel::{User, UserType}};

const USER_COLUMNS: &str = r#"
    id, name, email, password, user_type, bio, location, zip_code,
    skills, hourly_rate_cents, years_experience, portfolio_images, resume_url,
    created_at, updated_at
"#;

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn save_user<T: Into<String> + Send>(
        &self,
        name: T,
        email: T,
        password: T,
        user_type: UserType,
    ) -> Result<User, sqlx::Error>;

    async fn update_profile(
        &self,
        user_id: Uuid,
        update: UpdateProfileDto,
    ) -> Result<User, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE ($1::uuid IS NULL OR id = $1) AND ($2::text IS NULL OR email = $2)"
        );

        sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    async fn save_user<T: Into<String> + Send>(
        &self,
        name: T,
        email: T,
        password: T,
        user_type: UserType,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO users (name, email, password, user_type)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, User>(&query)
            .bind(name.into())
            .bind(email.into())
            .bind(password.into())
            .bind(user_type)
            .fetch_one(&self.pool)
            .await
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        update: UpdateProfileDto,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                bio = COALESCE($3, bio),
                location = COALESCE($4, location),
                zip_code = COALESCE($5, zip_code),
                skills = COALESCE($6, skills),
                hourly_rate_cents = COALESCE($7, hourly_rate_cents),
                years_experience = COALESCE($8, years_experience),
                portfolio_images = COALESCE($9, portfolio_images),
                resume_url = COALESCE($10, resume_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .bind(update.name)
            .bind(update.bio)
            .bind(update.location)
            .bind(update.zip_code)
            .bind(update.skills)
            .bind(update.hourly_rate_cents)
            .bind(update.years_experience)
            .bind(update.portfolio_images)
            .bind(update.resume_url)
            .fetch_one(&self.pool)
            .await
    }
}
