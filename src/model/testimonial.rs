use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::model::enquiry::ServiceCategory;

/// Moderation state of a testimonial. Only approved testimonials are shown
/// publicly; rejected doubles as the archived view in the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestimonialStatus {
    Pending,
    Approved,
    Rejected,
}

impl TestimonialStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestimonialStatus::Pending => "pending",
            TestimonialStatus::Approved => "approved",
            TestimonialStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for TestimonialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A customer review submitted through the public form, held for moderation
/// before public display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub location: String,
    pub service: ServiceCategory,
    pub rating: u8,
    pub message: String,
    pub status: TestimonialStatus,
    pub source: String,
    pub archived: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
