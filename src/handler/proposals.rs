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
    db::{jobdb::JobExt, proposaldb::ProposalExt},
    dtos::jobdtos::*,
    error::HttpError,
    middleware::JWTAuthMiddleware,
    AppState,
};

/// Routes mounted under /api/jobs for per-job proposal access.
pub fn job_proposals_handler() -> Router {
    Router::new()
        .route("/:job_id/proposals", post(submit_proposal))
        .route("/:job_id/proposals", get(get_job_proposals))
}

/// Routes mounted under /api/proposals.
pub fn proposals_handler() -> Router {
    Router::new()
        .route("/mine", get(get_my_proposals))
        .route("/:proposal_id/accept", put(accept_proposal))
        .route("/:proposal_id/reject", put(reject_proposal))
        .route("/:proposal_id/delivery", post(submit_delivery))
}

pub async fn submit_proposal(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(job_id): Path<Uuid>,
    Json(body): Json<CreateProposalDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let proposal = app_state
        .commission_service
        .submit_proposal(job_id, &auth.user, body)
        .await?;

    Ok(Json(ApiResponse::success(
        "Proposal submitted successfully",
        proposal,
    )))
}

pub async fn get_job_proposals(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .db_client
        .get_job_by_id(job_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    if job.customer_id != auth.user.id {
        return Err(HttpError::forbidden(
            "Only the job owner can view its proposals",
        ));
    }

    let proposals = app_state
        .db_client
        .get_proposals_for_job(job_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Proposals retrieved successfully",
        proposals,
    )))
}

pub async fn get_my_proposals(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let proposals = app_state
        .db_client
        .get_proposals_by_pro(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Proposals retrieved successfully",
        proposals,
    )))
}

pub async fn accept_proposal(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(proposal_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let result = app_state
        .commission_service
        .accept_proposal(proposal_id, auth.user.id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Proposal accepted and payment held in escrow",
        result,
    )))
}

pub async fn reject_proposal(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(proposal_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let proposal = app_state
        .commission_service
        .reject_proposal(proposal_id, auth.user.id)
        .await?;

    Ok(Json(ApiResponse::success("Proposal rejected", proposal)))
}

pub async fn submit_delivery(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
    Path(proposal_id): Path<Uuid>,
    Json(body): Json<SubmitDeliveryDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let result = app_state
        .commission_service
        .submit_delivery(proposal_id, auth.user.id, body)
        .await?;

    Ok(Json(ApiResponse::success(
        "Delivery submitted successfully",
        result,
    )))
}
