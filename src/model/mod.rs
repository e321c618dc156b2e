pub mod activity_log;
pub mod admin_user;
pub mod blog_post;
pub mod enquiry;
pub mod lead;
pub mod testimonial;
