use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::jobmodel::{Proposal, ProposalStatus};

const PROPOSAL_COLUMNS: &str = r#"
    id, job_id, pro_id, cover_letter, budget, timeline, status,
    delivery_notes, delivery_date, created_at, updated_at
"#;

#[async_trait]
pub trait ProposalExt {
    async fn create_proposal(
        &self,
        job_id: Uuid,
        pro_id: Uuid,
        cover_letter: String,
        budget: String,
        timeline: String,
    ) -> Result<Proposal, sqlx::Error>;

    async fn get_proposal_by_id(&self, proposal_id: Uuid) -> Result<Option<Proposal>, sqlx::Error>;

    async fn get_proposals_for_job(&self, job_id: Uuid) -> Result<Vec<Proposal>, sqlx::Error>;

    async fn get_proposals_by_pro(&self, pro_id: Uuid) -> Result<Vec<Proposal>, sqlx::Error>;

    async fn get_pending_proposal(
        &self,
        job_id: Uuid,
        pro_id: Uuid,
    ) -> Result<Option<Proposal>, sqlx::Error>;

    async fn get_accepted_proposal_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Option<Proposal>, sqlx::Error>;

    async fn update_proposal_status(
        &self,
        proposal_id: Uuid,
        status: ProposalStatus,
    ) -> Result<Proposal, sqlx::Error>;

    async fn update_proposal_status_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        proposal_id: Uuid,
        status: ProposalStatus,
    ) -> Result<Proposal, sqlx::Error>;

    /// Reject every still-pending proposal on a job except the given one.
    /// Returns the number of rows rejected.
    async fn reject_pending_siblings_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
        except_proposal_id: Option<Uuid>,
    ) -> Result<u64, sqlx::Error>;

    async fn record_proposal_delivery_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        proposal_id: Uuid,
        delivery_notes: &str,
        delivery_date: DateTime<Utc>,
    ) -> Result<Proposal, sqlx::Error>;
}

#[async_trait]
impl ProposalExt for DBClient {
    async fn create_proposal(
        &self,
        job_id: Uuid,
        pro_id: Uuid,
        cover_letter: String,
        budget: String,
        timeline: String,
    ) -> Result<Proposal, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO proposals (job_id, pro_id, cover_letter, budget, timeline)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PROPOSAL_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Proposal>(&query)
            .bind(job_id)
            .bind(pro_id)
            .bind(cover_letter)
            .bind(budget)
            .bind(timeline)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_proposal_by_id(&self, proposal_id: Uuid) -> Result<Option<Proposal>, sqlx::Error> {
        let query = format!("SELECT {PROPOSAL_COLUMNS} FROM proposals WHERE id = $1");

        sqlx::query_as::<_, Proposal>(&query)
            .bind(proposal_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_proposals_for_job(&self, job_id: Uuid) -> Result<Vec<Proposal>, sqlx::Error> {
        let query = format!(
            "SELECT {PROPOSAL_COLUMNS} FROM proposals WHERE job_id = $1 ORDER BY created_at DESC"
        );

        sqlx::query_as::<_, Proposal>(&query)
            .bind(job_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_proposals_by_pro(&self, pro_id: Uuid) -> Result<Vec<Proposal>, sqlx::Error> {
        let query = format!(
            "SELECT {PROPOSAL_COLUMNS} FROM proposals WHERE pro_id = $1 ORDER BY created_at DESC"
        );

        sqlx::query_as::<_, Proposal>(&query)
            .bind(pro_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_pending_proposal(
        &self,
        job_id: Uuid,
        pro_id: Uuid,
    ) -> Result<Option<Proposal>, sqlx::Error> {
        let query = format!(
            "SELECT {PROPOSAL_COLUMNS} FROM proposals WHERE job_id = $1 AND pro_id = $2 AND status = 'pending'"
        );

        sqlx::query_as::<_, Proposal>(&query)
            .bind(job_id)
            .bind(pro_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_accepted_proposal_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Option<Proposal>, sqlx::Error> {
        let query = format!(
            "SELECT {PROPOSAL_COLUMNS} FROM proposals WHERE job_id = $1 AND status = 'accepted'"
        );

        sqlx::query_as::<_, Proposal>(&query)
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update_proposal_status(
        &self,
        proposal_id: Uuid,
        status: ProposalStatus,
    ) -> Result<Proposal, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE proposals
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {PROPOSAL_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Proposal>(&query)
            .bind(proposal_id)
            .bind(status)
            .fetch_one(&self.pool)
            .await
    }

    async fn update_proposal_status_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        proposal_id: Uuid,
        status: ProposalStatus,
    ) -> Result<Proposal, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE proposals
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {PROPOSAL_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Proposal>(&query)
            .bind(proposal_id)
            .bind(status)
            .fetch_one(&mut **tx)
            .await
    }

    async fn reject_pending_siblings_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
        except_proposal_id: Option<Uuid>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE proposals
            SET status = 'rejected', updated_at = NOW()
            WHERE job_id = $1 AND status = 'pending' AND ($2::uuid IS NULL OR id != $2)
            "#,
        )
        .bind(job_id)
        .bind(except_proposal_id)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected())
    }

    async fn record_proposal_delivery_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        proposal_id: Uuid,
        delivery_notes: &str,
        delivery_date: DateTime<Utc>,
    ) -> Result<Proposal, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE proposals
            SET delivery_notes = $2, delivery_date = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {PROPOSAL_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Proposal>(&query)
            .bind(proposal_id)
            .bind(delivery_notes)
            .bind(delivery_date)
            .fetch_one(&mut **tx)
            .await
    }
}
