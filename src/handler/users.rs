use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{reviewdb::ReviewExt, userdb::UserExt},
    dtos::{
        jobdtos::ApiResponse,
        userdtos::{CreateReportDto, FilterUserDto, PublicProfileDto, UpdateProfileDto},
    },
    error::HttpError,
    middleware::JWTAuthMiddleware,
    models::usermodel::UserType,
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route("/me", get(get_me))
        .route("/me", put(update_me))
        .route("/:user_id", get(get_public_profile))
        .route("/:user_id/report", post(report_user))
        .route("/:user_id/reviews", get(get_user_reviews))
}

pub async fn get_me(
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let filtered_user = FilterUserDto::filter_user(&auth.user);

    Ok(Json(ApiResponse::success(
        "User profile retrieved successfully",
        filtered_user,
    )))
}

pub async fn update_me(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let has_pro_fields = body.skills.is_some()
        || body.hourly_rate_cents.is_some()
        || body.years_experience.is_some()
        || body.portfolio_images.is_some()
        || body.resume_url.is_some();

    if has_pro_fields && auth.user.user_type != UserType::Pro {
        return Err(HttpError::bad_request(
            "Pro fields can only be set on a pro account",
        ));
    }

    let updated_user = app_state
        .db_client
        .update_profile(auth.user.id, body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Profile updated successfully",
        FilterUserDto::filter_user(&updated_user),
    )))
}

pub async fn get_public_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .db_client
        .get_user(Some(user_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    let summary = app_state
        .db_client
        .get_rating_summary(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let profile = PublicProfileDto {
        id: user.id,
        name: user.name,
        user_type: user.user_type,
        bio: user.bio,
        location: user.location,
        skills: user.skills,
        hourly_rate_cents: user.hourly_rate_cents,
        years_experience: user.years_experience,
        portfolio_images: user.portfolio_images,
        average_rating: summary.average_rating,
        review_count: summary.review_count,
    };

    Ok(Json(ApiResponse::success(
        "Profile retrieved successfully",
        profile,
    )))
}

pub async fn report_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<CreateReportDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if user_id == auth.user.id {
        return Err(HttpError::bad_request("You cannot report yourself"));
    }

    let reported = app_state
        .db_client
        .get_user(Some(user_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    let report = app_state
        .db_client
        .create_report(auth.user.id, reported.id, body.reason, body.description)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(
        "User {} reported user {} for {:?}",
        auth.user.id,
        reported.id,
        report.reason
    );

    Ok(Json(ApiResponse::success(
        "Report submitted successfully",
        report,
    )))
}

pub async fn get_user_reviews(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .db_client
        .get_reviews_for_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Reviews retrieved successfully",
        reviews,
    )))
}
