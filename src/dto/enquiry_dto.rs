use crate::model::enquiry::{Enquiry, EnquiryStatus, ServiceCategory};
use serde::{Deserialize, Serialize};

use validator::Validate;

// --- Validated DTOs for request validation ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitEnquiryRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 10, max = 20))]
    pub phone: String,

    pub service: ServiceCategory,

    #[validate(length(min = 10, max = 2000))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateEnquiryStatusRequest {
    pub status: EnquiryStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddEnquiryCommentRequest {
    #[validate(length(min = 2, max = 2000))]
    pub comment: String,
}

/// Query string of the admin listing. Unset fields fall back to page 1 of
/// the active partition with no status filter.
#[derive(Debug, Clone, Deserialize)]
pub struct EnquiryListQuery {
    pub page: Option<u32>,
    pub status: Option<EnquiryStatus>,
    pub archived: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnquiryListResponse {
    pub enquiries: Vec<Enquiry>,
    pub total_count: u64,
    pub has_more: bool,
    pub page: u32,
}
