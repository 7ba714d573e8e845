use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::jobmodel::Payment;

const PAYMENT_COLUMNS: &str = r#"
    id, job_id, proposal_id, customer_id, pro_id,
    amount_cents, platform_fee_cents, pro_payout_cents,
    status, paid_at, released_at
"#;

#[async_trait]
pub trait PaymentExt {
    #[allow(clippy::too_many_arguments)]
    async fn create_payment_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
        proposal_id: Uuid,
        customer_id: Uuid,
        pro_id: Uuid,
        amount_cents: i64,
        platform_fee_cents: i64,
        pro_payout_cents: i64,
    ) -> Result<Payment, sqlx::Error>;

    async fn get_payment_by_job_id(&self, job_id: Uuid) -> Result<Option<Payment>, sqlx::Error>;

    async fn release_payment_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        payment_id: Uuid,
    ) -> Result<Payment, sqlx::Error>;
}

#[async_trait]
impl PaymentExt for DBClient {
    async fn create_payment_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
        proposal_id: Uuid,
        customer_id: Uuid,
        pro_id: Uuid,
        amount_cents: i64,
        platform_fee_cents: i64,
        pro_payout_cents: i64,
    ) -> Result<Payment, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO payments
            (job_id, proposal_id, customer_id, pro_id, amount_cents, platform_fee_cents, pro_payout_cents, status, paid_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'held', NOW())
            RETURNING {PAYMENT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Payment>(&query)
            .bind(job_id)
            .bind(proposal_id)
            .bind(customer_id)
            .bind(pro_id)
            .bind(amount_cents)
            .bind(platform_fee_cents)
            .bind(pro_payout_cents)
            .fetch_one(&mut **tx)
            .await
    }

    async fn get_payment_by_job_id(&self, job_id: Uuid) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {PAYMENT_COLUMNS} FROM payments WHERE job_id = $1");

        sqlx::query_as::<_, Payment>(&query)
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn release_payment_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        payment_id: Uuid,
    ) -> Result<Payment, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE payments
            SET status = 'released', released_at = NOW()
            WHERE id = $1 AND status = 'held'
            RETURNING {PAYMENT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Payment>(&query)
            .bind(payment_id)
            .fetch_one(&mut **tx)
            .await
    }
}
