pub mod activity_dto;
pub mod blog_dto;
pub mod enquiry_dto;
pub mod lead_dto;
pub mod testimonial_dto;
