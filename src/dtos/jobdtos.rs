use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::jobmodel::*;

// Job DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateJobDto {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,

    #[validate(length(min = 20, max = 5000, message = "Description must be between 20 and 5000 characters"))]
    pub description: String,

    pub category: JobCategory,

    #[validate(length(min = 1, max = 100, message = "Budget is required"))]
    pub budget: String,

    #[validate(length(min = 1, max = 255, message = "Location is required"))]
    pub location: String,

    #[validate(length(min = 3, max = 10, message = "Zip code must be between 3 and 10 characters"))]
    pub zip_code: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SearchJobsDto {
    /// Free-text search over title and description.
    pub q: Option<String>,

    /// Category label; matched case-insensitively after trimming.
    pub category: Option<String>,

    pub zip: Option<String>,

    #[validate(range(min = 1))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 50))]
    pub limit: Option<u32>,
}

// Proposal DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateProposalDto {
    #[validate(length(min = 20, max = 5000, message = "Cover letter must be between 20 and 5000 characters"))]
    pub cover_letter: String,

    #[validate(length(min = 1, max = 100, message = "Budget is required"))]
    pub budget: String,

    #[validate(length(min = 1, max = 100, message = "Timeline is required"))]
    pub timeline: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SubmitDeliveryDto {
    #[validate(length(min = 10, max = 5000, message = "Delivery notes must be between 10 and 5000 characters"))]
    pub delivery_notes: String,
}

// Review DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateReviewDto {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(min = 1, max = 2000, message = "Review text must be between 1 and 2000 characters"))]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AcceptProposalResult {
    pub job: Job,
    pub proposal: Proposal,
    pub payment: Payment,
    pub rejected_sibling_count: u64,
}

#[derive(Debug, Serialize)]
pub struct DeliveryResult {
    pub job: Job,
    pub proposal: Proposal,
}

#[derive(Debug, Serialize)]
pub struct ApprovalResult {
    pub job: Job,
    pub payment: Payment,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentDto {
    pub id: Uuid,
    pub job_id: Uuid,
    pub proposal_id: Uuid,
    pub amount: String,
    pub platform_fee: String,
    pub pro_payout: String,
    pub status: PaymentStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub released_at: Option<DateTime<Utc>>,
}

impl PaymentDto {
    pub fn from_payment(payment: &Payment) -> Self {
        use crate::utils::budget::format_cents;

        PaymentDto {
            id: payment.id,
            job_id: payment.job_id,
            proposal_id: payment.proposal_id,
            amount: format_cents(payment.amount_cents),
            platform_fee: format_cents(payment.platform_fee_cents),
            pro_payout: format_cents(payment.pro_payout_cents),
            status: payment.status,
            paid_at: payment.paid_at,
            released_at: payment.released_at,
        }
    }
}

// Response wrappers
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data: Some(data),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub status: String,
    pub data: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// Row offset for a 1-based page. Widened to i64 before multiplying so a
/// huge page number cannot overflow u32.
pub fn page_offset(page: u32, limit: u32) -> i64 {
    (page as i64 - 1) * limit as i64
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: i64, page: u32, limit: u32) -> Self {
        let total_pages = ((total as f64) / (limit as f64)).ceil() as u32;
        Self {
            status: "success".to_string(),
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(1, 20), 0);
        assert_eq!(page_offset(3, 20), 40);
    }

    #[test]
    fn test_page_offset_huge_page_does_not_overflow() {
        assert_eq!(
            page_offset(u32::MAX, 50),
            (u32::MAX as i64 - 1) * 50
        );
    }
}
