use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{db::DBClient, notificationdb::NotificationExt},
    models::jobmodel::{Job, Payment, Proposal},
};

#[derive(Debug, Clone)]
pub struct NotificationService {
    db_client: Arc<DBClient>,
}

impl NotificationService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn notify_proposal_received(
        &self,
        customer_id: Uuid,
        job: &Job,
        proposal: &Proposal,
    ) {
        tracing::info!(
            "New proposal {} on job {} from pro {}",
            proposal.id,
            job.id,
            proposal.pro_id
        );

        self.store(
            customer_id,
            "proposal_received",
            Some(job.id),
            Some(serde_json::json!({
                "proposal_id": proposal.id,
                "pro_id": proposal.pro_id,
                "budget": proposal.budget,
                "timeline": proposal.timeline,
            })),
            format!("New proposal on your job: {}", job.title),
        )
        .await
    }

    pub async fn notify_proposal_accepted(
        &self,
        pro_id: Uuid,
        job: &Job,
    ) {
        tracing::info!("Proposal accepted on job {} for pro {}", job.id, pro_id);

        self.store(
            pro_id,
            "proposal_accepted",
            Some(job.id),
            Some(serde_json::json!({ "job_title": job.title })),
            format!("Your proposal was accepted: {}", job.title),
        )
        .await
    }

    pub async fn notify_proposal_rejected(
        &self,
        pro_id: Uuid,
        job: &Job,
    ) {
        self.store(
            pro_id,
            "proposal_rejected",
            Some(job.id),
            Some(serde_json::json!({ "job_title": job.title })),
            format!("Your proposal was not selected: {}", job.title),
        )
        .await
    }

    pub async fn notify_delivery_submitted(
        &self,
        customer_id: Uuid,
        job: &Job,
    ) {
        tracing::info!("Delivery submitted on job {}", job.id);

        self.store(
            customer_id,
            "delivery_submitted",
            Some(job.id),
            Some(serde_json::json!({ "job_title": job.title })),
            format!("Work delivered on your job: {}", job.title),
        )
        .await
    }

    pub async fn notify_job_approved(
        &self,
        pro_id: Uuid,
        job: &Job,
        payment: &Payment,
    ) {
        tracing::info!(
            "Job {} approved, payment {} released to pro {}",
            job.id,
            payment.id,
            pro_id
        );

        self.store(
            pro_id,
            "job_approved",
            Some(job.id),
            Some(serde_json::json!({
                "job_title": job.title,
                "payout_cents": payment.pro_payout_cents,
            })),
            format!("Delivery approved and payment released: {}", job.title),
        )
        .await
    }

    pub async fn notify_revision_requested(
        &self,
        pro_id: Uuid,
        job: &Job,
    ) {
        self.store(
            pro_id,
            "revision_requested",
            Some(job.id),
            Some(serde_json::json!({ "job_title": job.title })),
            format!("The customer requested changes on: {}", job.title),
        )
        .await
    }

    pub async fn notify_job_cancelled(
        &self,
        pro_id: Uuid,
        job: &Job,
    ) {
        self.store(
            pro_id,
            "job_cancelled",
            Some(job.id),
            Some(serde_json::json!({ "job_title": job.title })),
            format!("A job you bid on was cancelled: {}", job.title),
        )
        .await
    }

    // Notifications are advisory. A failed insert is logged and never
    // fails the lifecycle operation that triggered it.
    async fn store(
        &self,
        user_id: Uuid,
        kind: &str,
        job_id: Option<Uuid>,
        payload: Option<serde_json::Value>,
        message: String,
    ) {
        if let Err(e) = self
            .db_client
            .create_notification(user_id, kind.to_string(), job_id, payload, message)
            .await
        {
            tracing::warn!("Failed to record {} notification for user {}: {}", kind, user_id, e);
        }
    }
}
