use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    error::HttpError,
    models::jobmodel::{JobStatus, ProposalStatus},
};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Job {0} not found")]
    JobNotFound(Uuid),

    #[error("Proposal {0} not found")]
    ProposalNotFound(Uuid),

    #[error("No payment record exists for job {0}")]
    PaymentNotFound(Uuid),

    #[error("Job {0} cannot move from {1:?} to {2:?}")]
    InvalidJobTransition(Uuid, JobStatus, JobStatus),

    #[error("Proposal {0} is in status {1:?} and cannot be acted on")]
    InvalidProposalStatus(Uuid, ProposalStatus),

    #[error("User {0} is not authorized to perform this action on job {1}")]
    UnauthorizedJobAccess(Uuid, Uuid),

    #[error("Cannot record payment: {0}")]
    BudgetUnparseable(String),

    #[error("A review for this job already exists from this reviewer")]
    DuplicateReview,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        let status = error.status_code();
        HttpError::new(error.to_string(), status)
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::JobNotFound(_)
            | ServiceError::ProposalNotFound(_)
            | ServiceError::PaymentNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::InvalidJobTransition(_, _, _)
            | ServiceError::InvalidProposalStatus(_, _)
            | ServiceError::BudgetUnparseable(_)
            | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::UnauthorizedJobAccess(_, _) => StatusCode::FORBIDDEN,

            ServiceError::DuplicateReview => StatusCode::CONFLICT,

            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proposal_status_error_names_current_status() {
        let id = Uuid::new_v4();
        let err = ServiceError::InvalidProposalStatus(id, ProposalStatus::Rejected);

        assert_eq!(
            err.to_string(),
            format!("Proposal {} is in status Rejected and cannot be acted on", id)
        );
    }
}
