use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::{
        db::DBClient, jobdb::JobExt, paymentdb::PaymentExt, proposaldb::ProposalExt,
        reviewdb::ReviewExt,
    },
    dtos::jobdtos::*,
    models::{
        jobmodel::{Job, JobStatus, Proposal, ProposalStatus, Review},
        usermodel::{User, UserType},
    },
    service::{
        error::ServiceError, notification_service::NotificationService,
        payment_service::PaymentService,
    },
};

/// Owns the commission lifecycle. Every status write goes through here, is
/// checked against `JobStatus::can_transition_to`, and multi-row updates run
/// in a single database transaction.
#[derive(Debug, Clone)]
pub struct CommissionService {
    db_client: Arc<DBClient>,
    payment_service: Arc<PaymentService>,
    notification_service: Arc<NotificationService>,
}

/// Map a guarded status update that matched no row to the transition error.
/// The UPDATE carries the expected current status in its WHERE clause, so
/// `None` means another write moved the job first.
fn ensure_transitioned(
    updated: Option<Job>,
    job_id: Uuid,
    observed: JobStatus,
    to: JobStatus,
) -> Result<Job, ServiceError> {
    updated.ok_or(ServiceError::InvalidJobTransition(job_id, observed, to))
}

impl CommissionService {
    pub fn new(
        db_client: Arc<DBClient>,
        payment_service: Arc<PaymentService>,
        notification_service: Arc<NotificationService>,
    ) -> Self {
        Self {
            db_client,
            payment_service,
            notification_service,
        }
    }

    pub async fn submit_proposal(
        &self,
        job_id: Uuid,
        pro: &User,
        body: CreateProposalDto,
    ) -> Result<Proposal, ServiceError> {
        if pro.user_type != UserType::Pro {
            return Err(ServiceError::Validation(
                "Only pro accounts can submit proposals".to_string(),
            ));
        }

        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        if job.status != JobStatus::Open {
            return Err(ServiceError::InvalidJobTransition(
                job_id,
                job.status,
                JobStatus::Open,
            ));
        }

        if job.customer_id == pro.id {
            return Err(ServiceError::Validation(
                "You cannot submit a proposal on your own job".to_string(),
            ));
        }

        if self
            .db_client
            .get_pending_proposal(job_id, pro.id)
            .await?
            .is_some()
        {
            return Err(ServiceError::Validation(
                "You already have a pending proposal on this job".to_string(),
            ));
        }

        let proposal = self
            .db_client
            .create_proposal(job_id, pro.id, body.cover_letter, body.budget, body.timeline)
            .await?;

        self.notification_service
            .notify_proposal_received(job.customer_id, &job, &proposal)
            .await;

        Ok(proposal)
    }

    /// Accept a pending proposal: job open -> in_progress, proposal ->
    /// accepted, sibling pending proposals -> rejected, and the escrow
    /// payment row written — all in one transaction.
    pub async fn accept_proposal(
        &self,
        proposal_id: Uuid,
        customer_id: Uuid,
    ) -> Result<AcceptProposalResult, ServiceError> {
        let proposal = self
            .db_client
            .get_proposal_by_id(proposal_id)
            .await?
            .ok_or(ServiceError::ProposalNotFound(proposal_id))?;

        let job = self
            .db_client
            .get_job_by_id(proposal.job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(proposal.job_id))?;

        if job.customer_id != customer_id {
            return Err(ServiceError::UnauthorizedJobAccess(customer_id, job.id));
        }

        if proposal.status != ProposalStatus::Pending {
            return Err(ServiceError::InvalidProposalStatus(
                proposal_id,
                proposal.status,
            ));
        }

        if !job.status.can_transition_to(JobStatus::InProgress) {
            return Err(ServiceError::InvalidJobTransition(
                job.id,
                job.status,
                JobStatus::InProgress,
            ));
        }

        // Siblings are collected up front so their owners can be notified
        // after the commit.
        let siblings: Vec<Proposal> = self
            .db_client
            .get_proposals_for_job(job.id)
            .await?
            .into_iter()
            .filter(|p| p.id != proposal.id && p.status == ProposalStatus::Pending)
            .collect();

        let mut tx = self.db_client.pool.begin().await?;

        let updated_job = ensure_transitioned(
            self.db_client
                .update_job_status_tx(&mut tx, job.id, JobStatus::Open, JobStatus::InProgress)
                .await?,
            job.id,
            job.status,
            JobStatus::InProgress,
        )?;

        let accepted = self
            .db_client
            .update_proposal_status_tx(&mut tx, proposal.id, ProposalStatus::Accepted)
            .await?;

        let rejected_sibling_count = self
            .db_client
            .reject_pending_siblings_tx(&mut tx, job.id, Some(proposal.id))
            .await?;

        let payment = self
            .payment_service
            .record_escrow_tx(&mut tx, &updated_job, &accepted)
            .await?;

        tx.commit().await?;

        self.notification_service
            .notify_proposal_accepted(accepted.pro_id, &updated_job)
            .await;

        for sibling in &siblings {
            self.notification_service
                .notify_proposal_rejected(sibling.pro_id, &updated_job)
                .await;
        }

        Ok(AcceptProposalResult {
            job: updated_job,
            proposal: accepted,
            payment,
            rejected_sibling_count,
        })
    }

    /// Reject a pending proposal. The parent job's status is never touched.
    pub async fn reject_proposal(
        &self,
        proposal_id: Uuid,
        customer_id: Uuid,
    ) -> Result<Proposal, ServiceError> {
        let proposal = self
            .db_client
            .get_proposal_by_id(proposal_id)
            .await?
            .ok_or(ServiceError::ProposalNotFound(proposal_id))?;

        let job = self
            .db_client
            .get_job_by_id(proposal.job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(proposal.job_id))?;

        if job.customer_id != customer_id {
            return Err(ServiceError::UnauthorizedJobAccess(customer_id, job.id));
        }

        if proposal.status != ProposalStatus::Pending {
            return Err(ServiceError::InvalidProposalStatus(
                proposal_id,
                proposal.status,
            ));
        }

        let rejected = self
            .db_client
            .update_proposal_status(proposal.id, ProposalStatus::Rejected)
            .await?;

        self.notification_service
            .notify_proposal_rejected(rejected.pro_id, &job)
            .await;

        Ok(rejected)
    }

    /// The assigned pro submits the finished work: job in_progress ->
    /// delivered, notes and date recorded on both the job and the proposal.
    pub async fn submit_delivery(
        &self,
        proposal_id: Uuid,
        pro_id: Uuid,
        body: SubmitDeliveryDto,
    ) -> Result<DeliveryResult, ServiceError> {
        let proposal = self
            .db_client
            .get_proposal_by_id(proposal_id)
            .await?
            .ok_or(ServiceError::ProposalNotFound(proposal_id))?;

        if proposal.pro_id != pro_id {
            return Err(ServiceError::UnauthorizedJobAccess(pro_id, proposal.job_id));
        }

        if proposal.status != ProposalStatus::Accepted {
            return Err(ServiceError::InvalidProposalStatus(
                proposal_id,
                proposal.status,
            ));
        }

        let job = self
            .db_client
            .get_job_by_id(proposal.job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(proposal.job_id))?;

        if !job.status.can_transition_to(JobStatus::Delivered) {
            return Err(ServiceError::InvalidJobTransition(
                job.id,
                job.status,
                JobStatus::Delivered,
            ));
        }

        let delivered_at = Utc::now();
        let mut tx = self.db_client.pool.begin().await?;

        let updated_job = ensure_transitioned(
            self.db_client
                .record_delivery_tx(&mut tx, job.id, &body.delivery_notes, delivered_at)
                .await?,
            job.id,
            job.status,
            JobStatus::Delivered,
        )?;

        let updated_proposal = self
            .db_client
            .record_proposal_delivery_tx(&mut tx, proposal.id, &body.delivery_notes, delivered_at)
            .await?;

        tx.commit().await?;

        self.notification_service
            .notify_delivery_submitted(updated_job.customer_id, &updated_job)
            .await;

        Ok(DeliveryResult {
            job: updated_job,
            proposal: updated_proposal,
        })
    }

    /// Owner approves the delivery: job delivered -> completed and the held
    /// payment is released, in one transaction.
    pub async fn approve_delivery(
        &self,
        job_id: Uuid,
        customer_id: Uuid,
    ) -> Result<ApprovalResult, ServiceError> {
        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        if job.customer_id != customer_id {
            return Err(ServiceError::UnauthorizedJobAccess(customer_id, job_id));
        }

        if !job.status.can_transition_to(JobStatus::Completed) {
            return Err(ServiceError::InvalidJobTransition(
                job_id,
                job.status,
                JobStatus::Completed,
            ));
        }

        let mut tx = self.db_client.pool.begin().await?;

        let completed_job = ensure_transitioned(
            self.db_client
                .update_job_status_tx(&mut tx, job_id, JobStatus::Delivered, JobStatus::Completed)
                .await?,
            job_id,
            job.status,
            JobStatus::Completed,
        )?;

        let payment = self.payment_service.release_for_job_tx(&mut tx, job_id).await?;

        tx.commit().await?;

        self.notification_service
            .notify_job_approved(payment.pro_id, &completed_job, &payment)
            .await;

        Ok(ApprovalResult {
            job: completed_job,
            payment,
        })
    }

    /// Owner sends the delivery back for changes: job delivered ->
    /// in_progress. The payment stays held.
    pub async fn request_revision(
        &self,
        job_id: Uuid,
        customer_id: Uuid,
    ) -> Result<Job, ServiceError> {
        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        if job.customer_id != customer_id {
            return Err(ServiceError::UnauthorizedJobAccess(customer_id, job_id));
        }

        if job.status != JobStatus::Delivered
            || !job.status.can_transition_to(JobStatus::InProgress)
        {
            return Err(ServiceError::InvalidJobTransition(
                job_id,
                job.status,
                JobStatus::InProgress,
            ));
        }

        let updated_job = ensure_transitioned(
            self.db_client
                .update_job_status(job_id, JobStatus::Delivered, JobStatus::InProgress)
                .await?,
            job_id,
            job.status,
            JobStatus::InProgress,
        )?;

        let accepted = self
            .db_client
            .get_accepted_proposal_for_job(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        self.notification_service
            .notify_revision_requested(accepted.pro_id, &updated_job)
            .await;

        Ok(updated_job)
    }

    /// Owner cancels an open job. Pending proposals are rejected alongside.
    pub async fn cancel_job(&self, job_id: Uuid, customer_id: Uuid) -> Result<Job, ServiceError> {
        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        if job.customer_id != customer_id {
            return Err(ServiceError::UnauthorizedJobAccess(customer_id, job_id));
        }

        if !job.status.can_transition_to(JobStatus::Cancelled) {
            return Err(ServiceError::InvalidJobTransition(
                job_id,
                job.status,
                JobStatus::Cancelled,
            ));
        }

        let pending: Vec<Proposal> = self
            .db_client
            .get_proposals_for_job(job_id)
            .await?
            .into_iter()
            .filter(|p| p.status == ProposalStatus::Pending)
            .collect();

        let mut tx = self.db_client.pool.begin().await?;

        let cancelled_job = ensure_transitioned(
            self.db_client
                .update_job_status_tx(&mut tx, job_id, JobStatus::Open, JobStatus::Cancelled)
                .await?,
            job_id,
            job.status,
            JobStatus::Cancelled,
        )?;

        self.db_client
            .reject_pending_siblings_tx(&mut tx, job_id, None)
            .await?;

        tx.commit().await?;

        for proposal in &pending {
            self.notification_service
                .notify_job_cancelled(proposal.pro_id, &cancelled_job)
                .await;
        }

        Ok(cancelled_job)
    }

    /// Either party reviews the other after completion; once per reviewer
    /// per job.
    pub async fn create_review(
        &self,
        job_id: Uuid,
        reviewer: &User,
        body: CreateReviewDto,
    ) -> Result<Review, ServiceError> {
        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        if job.status != JobStatus::Completed {
            return Err(ServiceError::InvalidJobTransition(
                job_id,
                job.status,
                JobStatus::Completed,
            ));
        }

        let accepted = self
            .db_client
            .get_accepted_proposal_for_job(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        let reviewee_id = if reviewer.id == job.customer_id {
            accepted.pro_id
        } else if reviewer.id == accepted.pro_id {
            job.customer_id
        } else {
            return Err(ServiceError::UnauthorizedJobAccess(reviewer.id, job_id));
        };

        if self
            .db_client
            .get_review_by_job_and_reviewer(job_id, reviewer.id)
            .await?
            .is_some()
        {
            return Err(ServiceError::DuplicateReview);
        }

        let review = self
            .db_client
            .create_review(
                job_id,
                accepted.id,
                reviewer.id,
                reviewee_id,
                body.rating,
                body.text,
            )
            .await
            .map_err(|e| match e {
                // The unique (job_id, reviewer_id) index closes the
                // lookup-then-insert race.
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    ServiceError::DuplicateReview
                }
                other => ServiceError::Database(other),
            })?;

        Ok(review)
    }

    /// Payment lookup gated to the job's participants.
    pub async fn get_payment_for_participant(
        &self,
        job_id: Uuid,
        user_id: Uuid,
    ) -> Result<crate::models::jobmodel::Payment, ServiceError> {
        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        let payment = self
            .db_client
            .get_payment_by_job_id(job_id)
            .await?
            .ok_or(ServiceError::PaymentNotFound(job_id))?;

        if user_id != job.customer_id && user_id != payment.pro_id {
            return Err(ServiceError::UnauthorizedJobAccess(user_id, job_id));
        }

        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::jobmodel::JobCategory;

    fn sample_job(status: JobStatus) -> Job {
        Job {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            title: "Fix the fence".to_string(),
            description: "The back fence needs two new posts".to_string(),
            category: JobCategory::Handyman,
            budget: "$350".to_string(),
            location: "Austin, TX".to_string(),
            zip_code: "78701".to_string(),
            status,
            delivery_notes: None,
            delivered_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_lost_status_race_maps_to_transition_error() {
        // A guarded UPDATE that matched no row means a concurrent write
        // moved the job first; the caller must get a transition error, not
        // a silently overwritten status.
        let job = sample_job(JobStatus::Delivered);
        let err = ensure_transitioned(None, job.id, job.status, JobStatus::InProgress).unwrap_err();

        match err {
            ServiceError::InvalidJobTransition(id, from, to) => {
                assert_eq!(id, job.id);
                assert_eq!(from, JobStatus::Delivered);
                assert_eq!(to, JobStatus::InProgress);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_guarded_update_passes_through_matched_row() {
        let job = sample_job(JobStatus::Completed);
        let id = job.id;

        let out = ensure_transitioned(Some(job), id, JobStatus::Delivered, JobStatus::Completed)
            .unwrap();
        assert_eq!(out.status, JobStatus::Completed);
    }
}
