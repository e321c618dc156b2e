pub mod activity_logger;
pub mod auth_service;
pub mod blog_service;
pub mod enquiry_service;
pub mod lead_service;
pub mod review_cache;
pub mod testimonial_service;
