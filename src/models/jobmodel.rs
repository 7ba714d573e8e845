use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "job_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobCategory {
    Cleaning,
    Handyman,
    Moving,
    Gardening,
    Painting,
    Plumbing,
    Electrical,
    Carpentry,
    Tutoring,
    PetCare,
    Photography,
    PersonalTraining,
    EventHelp,
    Other,
}

impl JobCategory {
    pub fn to_str(&self) -> &str {
        match self {
            JobCategory::Cleaning => "cleaning",
            JobCategory::Handyman => "handyman",
            JobCategory::Moving => "moving",
            JobCategory::Gardening => "gardening",
            JobCategory::Painting => "painting",
            JobCategory::Plumbing => "plumbing",
            JobCategory::Electrical => "electrical",
            JobCategory::Carpentry => "carpentry",
            JobCategory::Tutoring => "tutoring",
            JobCategory::PetCare => "pet_care",
            JobCategory::Photography => "photography",
            JobCategory::PersonalTraining => "personal_training",
            JobCategory::EventHelp => "event_help",
            JobCategory::Other => "other",
        }
    }

    pub fn all() -> &'static [JobCategory] {
        &[
            JobCategory::Cleaning,
            JobCategory::Handyman,
            JobCategory::Moving,
            JobCategory::Gardening,
            JobCategory::Painting,
            JobCategory::Plumbing,
            JobCategory::Electrical,
            JobCategory::Carpentry,
            JobCategory::Tutoring,
            JobCategory::PetCare,
            JobCategory::Photography,
            JobCategory::PersonalTraining,
            JobCategory::EventHelp,
            JobCategory::Other,
        ]
    }

    /// Resolve a user-supplied category label. Matching is case-insensitive
    /// exact match after trimming whitespace; "Pet Care" and "pet_care" both
    /// resolve to PetCare.
    pub fn from_label(label: &str) -> Option<JobCategory> {
        let normalized = label.trim().to_lowercase().replace([' ', '-'], "_");
        JobCategory::all()
            .iter()
            .copied()
            .find(|c| c.to_str() == normalized)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "job_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Open,
    InProgress,
    Delivered,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub fn to_str(&self) -> &str {
        match self {
            JobStatus::Open => "open",
            JobStatus::InProgress => "in_progress",
            JobStatus::Delivered => "delivered",
            JobStatus::Completed => "completed",
            JobStatus::Cancelled => "cancelled",
        }
    }

    /// The commission lifecycle transition table. Every mutating operation
    /// checks this before writing; anything not listed here is rejected.
    pub fn can_transition_to(&self, to: JobStatus) -> bool {
        matches!(
            (self, to),
            (JobStatus::Open, JobStatus::InProgress)
                | (JobStatus::Open, JobStatus::Cancelled)
                | (JobStatus::InProgress, JobStatus::Delivered)
                | (JobStatus::Delivered, JobStatus::Completed)
                | (JobStatus::Delivered, JobStatus::InProgress)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Cancelled)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "proposal_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ProposalStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ProposalStatus::Pending => "pending",
            ProposalStatus::Accepted => "accepted",
            ProposalStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Held,
    Released,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "report_reason", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportReason {
    Spam,
    Scam,
    Inappropriate,
    NoShow,
    PaymentIssue,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: JobCategory,
    pub budget: String,
    pub location: String,
    pub zip_code: String,
    pub status: JobStatus,
    pub delivery_notes: Option<String>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>, // Database has DEFAULT NOW(), can be NULL
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Proposal {
    pub id: Uuid,
    pub job_id: Uuid,
    pub pro_id: Uuid,
    pub cover_letter: String,
    pub budget: String,
    pub timeline: String,
    pub status: ProposalStatus,
    pub delivery_notes: Option<String>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub job_id: Uuid,
    pub proposal_id: Uuid,
    pub customer_id: Uuid,
    pub pro_id: Uuid,
    pub amount_cents: i64,
    pub platform_fee_cents: i64,
    pub pro_payout_cents: i64,
    pub status: PaymentStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub released_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: Uuid,
    pub job_id: Uuid,
    pub proposal_id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewee_id: Uuid,
    pub rating: i32,
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Report {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub reported_user_id: Uuid,
    pub reason: ReportReason,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub job_id: Option<Uuid>,
    pub payload: Option<serde_json::Value>,
    pub message: String,
    pub read: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_happy_path() {
        assert!(JobStatus::Open.can_transition_to(JobStatus::InProgress));
        assert!(JobStatus::InProgress.can_transition_to(JobStatus::Delivered));
        assert!(JobStatus::Delivered.can_transition_to(JobStatus::Completed));
    }

    #[test]
    fn test_revision_reverts_to_in_progress() {
        assert!(JobStatus::Delivered.can_transition_to(JobStatus::InProgress));
    }

    #[test]
    fn test_no_skipping_or_reversing() {
        assert!(!JobStatus::Open.can_transition_to(JobStatus::Delivered));
        assert!(!JobStatus::Open.can_transition_to(JobStatus::Completed));
        assert!(!JobStatus::InProgress.can_transition_to(JobStatus::Completed));
        assert!(!JobStatus::InProgress.can_transition_to(JobStatus::Open));
        assert!(!JobStatus::Delivered.can_transition_to(JobStatus::Open));
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for to in [
            JobStatus::Open,
            JobStatus::InProgress,
            JobStatus::Delivered,
            JobStatus::Completed,
            JobStatus::Cancelled,
        ] {
            assert!(!JobStatus::Completed.can_transition_to(to));
            assert!(!JobStatus::Cancelled.can_transition_to(to));
        }
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_cancel_only_from_open() {
        assert!(JobStatus::Open.can_transition_to(JobStatus::Cancelled));
        assert!(!JobStatus::InProgress.can_transition_to(JobStatus::Cancelled));
        assert!(!JobStatus::Delivered.can_transition_to(JobStatus::Cancelled));
    }

    #[test]
    fn test_category_label_matching() {
        assert_eq!(JobCategory::from_label("cleaning"), Some(JobCategory::Cleaning));
        assert_eq!(JobCategory::from_label("  Cleaning  "), Some(JobCategory::Cleaning));
        assert_eq!(JobCategory::from_label("Pet Care"), Some(JobCategory::PetCare));
        assert_eq!(JobCategory::from_label("PET_CARE"), Some(JobCategory::PetCare));
        assert_eq!(JobCategory::from_label("personal-training"), Some(JobCategory::PersonalTraining));
        assert_eq!(JobCategory::from_label("lawncare"), None);
        assert_eq!(JobCategory::from_label(""), None);
    }
}
