use crate::model::blog_post::BlogPostStatus;
use serde::{Deserialize, Serialize};

use validator::Validate;

// --- Validated DTOs for request validation ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBlogPostRequest {
    #[validate(length(min = 2, max = 200))]
    pub title: String,

    #[validate(length(min = 2, max = 500))]
    pub excerpt: String,

    #[validate(length(min = 10))]
    pub content: String,

    #[validate(length(min = 2, max = 100))]
    pub category: String,

    #[serde(default)]
    pub keywords: Vec<String>,

    pub publish_date: Option<String>,

    pub read_time: Option<String>,

    #[validate(url)]
    pub image_url: Option<String>,

    pub status: Option<BlogPostStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateBlogPostRequest {
    #[validate(length(min = 2, max = 200))]
    pub title: Option<String>,

    #[validate(length(min = 2, max = 500))]
    pub excerpt: Option<String>,

    #[validate(length(min = 10))]
    pub content: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub category: Option<String>,

    pub keywords: Option<Vec<String>>,

    pub publish_date: Option<String>,

    pub read_time: Option<String>,

    #[validate(url)]
    pub image_url: Option<String>,

    pub status: Option<BlogPostStatus>,
}
