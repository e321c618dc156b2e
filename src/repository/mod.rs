pub mod db;
pub mod repository_error;

pub mod activity_log_repo;
pub mod admin_user_repo;
pub mod blog_repo;
pub mod enquiry_repo;
pub mod lead_repo;
pub mod testimonial_repo;
