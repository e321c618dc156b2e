use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Service categories offered by the company. Shared by the contact and
/// testimonial forms so both submit the same closed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Sales,
    Service,
    Rental,
    Installation,
    Repair,
    Amc,
}

impl ServiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Sales => "sales",
            ServiceCategory::Service => "service",
            ServiceCategory::Rental => "rental",
            ServiceCategory::Installation => "installation",
            ServiceCategory::Repair => "repair",
            ServiceCategory::Amc => "amc",
        }
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle of an enquiry as admin staff work it. Stored as the snake_case
/// string form, so an unrecognized status in the database is a
/// deserialization error rather than a silent fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnquiryStatus {
    New,
    Pending,
    InProgress,
    Contacted,
    Scheduled,
    Completed,
    Cancelled,
    Resolved,
}

impl EnquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnquiryStatus::New => "new",
            EnquiryStatus::Pending => "pending",
            EnquiryStatus::InProgress => "in_progress",
            EnquiryStatus::Contacted => "contacted",
            EnquiryStatus::Scheduled => "scheduled",
            EnquiryStatus::Completed => "completed",
            EnquiryStatus::Cancelled => "cancelled",
            EnquiryStatus::Resolved => "resolved",
        }
    }

    pub const ALL: [EnquiryStatus; 8] = [
        EnquiryStatus::New,
        EnquiryStatus::Pending,
        EnquiryStatus::InProgress,
        EnquiryStatus::Contacted,
        EnquiryStatus::Scheduled,
        EnquiryStatus::Completed,
        EnquiryStatus::Cancelled,
        EnquiryStatus::Resolved,
    ];
}

impl std::fmt::Display for EnquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A customer service request submitted through the public contact form and
/// worked by admin staff. Never hard-deleted; archiving is the soft-delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enquiry {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: ServiceCategory,
    pub message: String,
    pub status: EnquiryStatus,
    pub archived: bool,
    pub admin_comment: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
