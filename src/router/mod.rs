pub mod activity_router;
pub mod auth_router;
pub mod blog_router;
pub mod enquiry_router;
pub mod lead_router;
pub mod testimonial_router;
