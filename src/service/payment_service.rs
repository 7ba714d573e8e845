use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{db::DBClient, paymentdb::PaymentExt},
    models::jobmodel::{Job, Payment, PaymentStatus, Proposal},
    service::error::ServiceError,
    utils::budget::{parse_budget_cents, split_platform_fee},
};

/// Escrow-record simulation. No funds are moved; a payment row is written in
/// `held` status when a proposal is accepted and flipped to `released` when
/// the customer approves the delivery.
#[derive(Debug, Clone)]
pub struct PaymentService {
    db_client: Arc<DBClient>,
}

impl PaymentService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Insert the held payment row for an accepted proposal, inside the
    /// caller's acceptance transaction. The amount comes from the accepted
    /// proposal's free-text budget; an unparseable budget fails the whole
    /// acceptance rather than writing a zero-amount row.
    pub async fn record_escrow_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job: &Job,
        proposal: &Proposal,
    ) -> Result<Payment, ServiceError> {
        let amount_cents =
            parse_budget_cents(&proposal.budget).map_err(ServiceError::BudgetUnparseable)?;
        let (platform_fee_cents, pro_payout_cents) = split_platform_fee(amount_cents);

        let payment = self
            .db_client
            .create_payment_tx(
                tx,
                job.id,
                proposal.id,
                job.customer_id,
                proposal.pro_id,
                amount_cents,
                platform_fee_cents,
                pro_payout_cents,
            )
            .await?;

        tracing::info!(
            "Escrow recorded for job {}: amount {} cents, fee {} cents",
            job.id,
            amount_cents,
            platform_fee_cents
        );

        Ok(payment)
    }

    /// Flip the job's held payment to released, inside the caller's approval
    /// transaction.
    pub async fn release_for_job_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
    ) -> Result<Payment, ServiceError> {
        let payment = self
            .db_client
            .get_payment_by_job_id(job_id)
            .await?
            .ok_or(ServiceError::PaymentNotFound(job_id))?;

        if payment.status != PaymentStatus::Held {
            return Err(ServiceError::Validation(format!(
                "Payment for job {} has already been released",
                job_id
            )));
        }

        let released = self.db_client.release_payment_tx(tx, payment.id).await?;

        tracing::info!(
            "Payment {} released for job {}: payout {} cents",
            released.id,
            job_id,
            released.pro_payout_cents
        );

        Ok(released)
    }
}
