use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::jobdb::JobExt,
    dtos::jobdtos::*,
    error::HttpError,
    middleware::JWTAuthMiddleware,
    models::{jobmodel::JobCategory, usermodel::UserType},
    AppState,
};

pub fn jobs_handler() -> Router {
    Router::new()
        .route("/", post(create_job))
        .route("/", get(search_jobs))
        .route("/mine", get(get_my_jobs))
        .route("/:job_id", get(get_job_details))
        .route("/:job_id/cancel", put(cancel_job))
        .route("/:job_id/approve", put(approve_delivery))
        .route("/:job_id/revision", put(request_revision))
        .route("/:job_id/reviews", post(create_review))
        .route("/:job_id/payment", get(get_job_payment))
}

pub async fn create_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Json(body): Json<CreateJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if auth.user.user_type != UserType::Customer {
        return Err(HttpError::bad_request(
            "Only customer accounts can post jobs",
        ));
    }

    let job = app_state
        .db_client
        .create_job(
            auth.user.id,
            body.title,
            body.description,
            body.category,
            body.budget,
            body.location,
            body.zip_code,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!("Job {} posted by customer {}", job.id, auth.user.id);

    Ok(Json(ApiResponse::success("Job created successfully", job)))
}

pub async fn search_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<SearchJobsDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    // An unknown label is rejected up front instead of silently matching nothing.
    let category = match query.category.as_deref() {
        Some(label) => Some(
            JobCategory::from_label(label)
                .ok_or_else(|| HttpError::bad_request(format!("Unknown category '{}'", label)))?,
        ),
        None => None,
    };

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(20);
    let offset = page_offset(page, limit);

    let jobs = app_state
        .db_client
        .search_jobs(
            query.q.as_deref(),
            category,
            query.zip.as_deref(),
            limit as i64,
            offset,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total = app_state
        .db_client
        .count_jobs(query.q.as_deref(), category, query.zip.as_deref())
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(PaginatedResponse::new(jobs, total, page, limit)))
}

pub async fn get_my_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let jobs = app_state
        .db_client
        .get_jobs_by_customer(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Jobs retrieved successfully",
        jobs,
    )))
}

pub async fn get_job_details(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .db_client
        .get_job_by_id(job_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    Ok(Json(ApiResponse::success(
        "Job retrieved successfully",
        job,
    )))
}

pub async fn cancel_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .commission_service
        .cancel_job(job_id, auth.user.id)
        .await?;

    Ok(Json(ApiResponse::success("Job cancelled", job)))
}

pub async fn approve_delivery(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let result = app_state
        .commission_service
        .approve_delivery(job_id, auth.user.id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Delivery approved and payment released",
        result,
    )))
}

pub async fn request_revision(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .commission_service
        .request_revision(job_id, auth.user.id)
        .await?;

    Ok(Json(ApiResponse::success("Revision requested", job)))
}

pub async fn create_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<CreateReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let review = app_state
        .commission_service
        .create_review(job_id, &auth.user, body)
        .await?;

    Ok(Json(ApiResponse::success(
        "Review submitted successfully",
        review,
    )))
}

pub async fn get_job_payment(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let payment = app_state
        .commission_service
        .get_payment_for_participant(job_id, auth.user.id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Payment retrieved successfully",
        PaymentDto::from_payment(&payment),
    )))
}
