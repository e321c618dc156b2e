use crate::model::enquiry::ServiceCategory;
use crate::model::testimonial::{Testimonial, TestimonialStatus};
use serde::{Deserialize, Serialize};

use validator::Validate;

// --- Validated DTOs for request validation ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitTestimonialRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(length(min = 2, max = 100))]
    pub location: String,

    pub service: ServiceCategory,

    #[validate(range(min = 1, max = 5))]
    pub rating: u8,

    #[validate(length(min = 10, max = 1000))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetTestimonialStatusRequest {
    pub status: TestimonialStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestimonialListQuery {
    pub archived: Option<bool>,
}

/// Active moderation view: the pending queue plus what is already live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveTestimonialsResponse {
    pub pending: Vec<Testimonial>,
    pub approved: Vec<Testimonial>,
}

/// Archived moderation view: rejected rows only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivedTestimonialsResponse {
    pub rejected: Vec<Testimonial>,
}
