use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use serde_json::json;
use tracing::{info, instrument};

use crate::model::activity_log::{ActivityType, EntityType};
use crate::model::blog_post::{BlogPost, BlogPostStatus};
use crate::repository::blog_repo::BlogPostRepository;
use crate::service::activity_logger::{ActivityEntry, ActivityLogger, ActorContext};
use crate::util::error::ServiceError;
use crate::util::time::today_ymd;

/// Average reading speed used for the estimated read time.
const WORDS_PER_MINUTE: usize = 200;

/// Lowercases the title and joins whitespace-separated runs with hyphens.
/// Slugs are not unique; two posts titled the same share a slug and the
/// newest published one wins on lookup.
pub fn derive_slug(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Word count divided by reading speed, rounded up, never below one minute.
pub fn estimate_read_time(content: &str) -> String {
    let words = content.split_whitespace().count();
    let minutes = (words + WORDS_PER_MINUTE - 1) / WORDS_PER_MINUTE;
    format!("{} min read", minutes.max(1))
}

/// Blog post fields from the admin editor, already validated at the handler.
#[derive(Debug, Clone)]
pub struct NewBlogPost {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub keywords: Vec<String>,
    pub publish_date: Option<String>,
    pub read_time: Option<String>,
    pub image_url: Option<String>,
    pub status: Option<BlogPostStatus>,
}

/// Partial update; None leaves the stored field unchanged.
#[derive(Debug, Clone, Default)]
pub struct BlogPostChanges {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub publish_date: Option<String>,
    pub read_time: Option<String>,
    pub image_url: Option<String>,
    pub status: Option<BlogPostStatus>,
}

#[async_trait]
pub trait BlogService: Send + Sync {
    async fn create(&self, post: NewBlogPost, actor: &ActorContext) -> Result<BlogPost, ServiceError>;
    async fn update(
        &self,
        id: ObjectId,
        changes: BlogPostChanges,
        actor: &ActorContext,
    ) -> Result<BlogPost, ServiceError>;
    async fn delete(&self, id: ObjectId, actor: &ActorContext) -> Result<(), ServiceError>;
    /// Flips draft to published or published back to draft.
    async fn toggle_status(&self, id: ObjectId, actor: &ActorContext) -> Result<BlogPost, ServiceError>;
    async fn get(&self, id: ObjectId) -> Result<BlogPost, ServiceError>;
    /// Every post regardless of status, for the admin listing.
    async fn list_all(&self) -> Result<Vec<BlogPost>, ServiceError>;
    /// Published posts only, for the public site.
    async fn list_published(&self) -> Result<Vec<BlogPost>, ServiceError>;
    /// Published post lookup by slug; the newest match wins.
    async fn get_published_by_slug(&self, slug: &str) -> Result<BlogPost, ServiceError>;
}

pub struct BlogServiceImpl {
    pub blog_repo: Arc<dyn BlogPostRepository>,
    pub activity_logger: Arc<ActivityLogger>,
}

impl BlogServiceImpl {
    pub fn new(blog_repo: Arc<dyn BlogPostRepository>, activity_logger: Arc<ActivityLogger>) -> Self {
        BlogServiceImpl {
            blog_repo,
            activity_logger,
        }
    }
}

#[async_trait]
impl BlogService for BlogServiceImpl {
    #[instrument(skip(self, post, actor), fields(title = %post.title))]
    async fn create(&self, post: NewBlogPost, actor: &ActorContext) -> Result<BlogPost, ServiceError> {
        info!("Creating blog post");
        let slug = derive_slug(&post.title);
        let read_time = post
            .read_time
            .unwrap_or_else(|| estimate_read_time(&post.content));
        let status = post.status.unwrap_or(BlogPostStatus::Draft);

        let record = BlogPost {
            id: None,
            title: post.title,
            slug: slug.clone(),
            excerpt: post.excerpt,
            content: post.content,
            category: post.category,
            keywords: post.keywords,
            publish_date: post.publish_date.unwrap_or_else(today_ymd),
            read_time,
            image_url: post.image_url,
            status,
            created_at: None,
            updated_at: None,
        };
        let created = self.blog_repo.create(record).await.map_err(ServiceError::from)?;

        self.activity_logger.record(
            actor,
            ActivityEntry {
                activity_type: ActivityType::ContentModification,
                entity_type: EntityType::BlogPost,
                entity_id: created.id.map(|id| id.to_hex()),
                details: Some(json!({ "action": "create" })),
                previous_values: None,
                new_values: Some(json!({
                    "title": created.title,
                    "slug": created.slug,
                    "status": created.status.as_str(),
                })),
            },
        );
        info!("Blog post created successfully");
        Ok(created)
    }

    #[instrument(skip(self, changes, actor), fields(id = %id))]
    async fn update(
        &self,
        id: ObjectId,
        changes: BlogPostChanges,
        actor: &ActorContext,
    ) -> Result<BlogPost, ServiceError> {
        info!("Updating blog post");
        let mut post = self.blog_repo.get_by_id(id).await.map_err(ServiceError::from)?;
        let previous = json!({
            "title": post.title,
            "slug": post.slug,
            "status": post.status.as_str(),
        });

        if let Some(title) = changes.title {
            // The slug always tracks the title.
            post.slug = derive_slug(&title);
            post.title = title;
        }
        if let Some(excerpt) = changes.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(content) = changes.content {
            post.content = content;
        }
        if let Some(category) = changes.category {
            post.category = category;
        }
        if let Some(keywords) = changes.keywords {
            post.keywords = keywords;
        }
        if let Some(publish_date) = changes.publish_date {
            post.publish_date = publish_date;
        }
        if let Some(read_time) = changes.read_time {
            post.read_time = read_time;
        }
        if let Some(image_url) = changes.image_url {
            post.image_url = Some(image_url);
        }
        if let Some(status) = changes.status {
            post.status = status;
        }

        let updated = self.blog_repo.update(id, post).await.map_err(ServiceError::from)?;

        self.activity_logger.record(
            actor,
            ActivityEntry {
                activity_type: ActivityType::ContentModification,
                entity_type: EntityType::BlogPost,
                entity_id: Some(id.to_hex()),
                details: Some(json!({ "action": "update" })),
                previous_values: Some(previous),
                new_values: Some(json!({
                    "title": updated.title,
                    "slug": updated.slug,
                    "status": updated.status.as_str(),
                })),
            },
        );
        info!("Blog post updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self, actor), fields(id = %id))]
    async fn delete(&self, id: ObjectId, actor: &ActorContext) -> Result<(), ServiceError> {
        info!("Deleting blog post");
        let post = self.blog_repo.get_by_id(id).await.map_err(ServiceError::from)?;
        self.blog_repo.delete(id).await.map_err(ServiceError::from)?;

        self.activity_logger.record(
            actor,
            ActivityEntry {
                activity_type: ActivityType::ContentModification,
                entity_type: EntityType::BlogPost,
                entity_id: Some(id.to_hex()),
                details: Some(json!({ "action": "delete" })),
                previous_values: Some(json!({
                    "title": post.title,
                    "slug": post.slug,
                    "status": post.status.as_str(),
                })),
                new_values: None,
            },
        );
        info!("Blog post deleted successfully");
        Ok(())
    }

    #[instrument(skip(self, actor), fields(id = %id))]
    async fn toggle_status(&self, id: ObjectId, actor: &ActorContext) -> Result<BlogPost, ServiceError> {
        info!("Toggling blog post status");
        let post = self.blog_repo.get_by_id(id).await.map_err(ServiceError::from)?;
        let previous_status = post.status;
        let next_status = previous_status.toggled();

        let updated = self
            .blog_repo
            .update_status(id, next_status)
            .await
            .map_err(ServiceError::from)?;

        self.activity_logger.record(
            actor,
            ActivityEntry {
                activity_type: ActivityType::ContentModification,
                entity_type: EntityType::BlogPost,
                entity_id: Some(id.to_hex()),
                details: Some(json!({ "action": "status_toggle" })),
                previous_values: Some(json!({ "status": previous_status.as_str() })),
                new_values: Some(json!({ "status": next_status.as_str() })),
            },
        );
        info!("Blog post status toggled successfully");
        Ok(updated)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get(&self, id: ObjectId) -> Result<BlogPost, ServiceError> {
        self.blog_repo.get_by_id(id).await.map_err(ServiceError::from)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<BlogPost>, ServiceError> {
        self.blog_repo.list().await.map_err(ServiceError::from)
    }

    #[instrument(skip(self))]
    async fn list_published(&self) -> Result<Vec<BlogPost>, ServiceError> {
        self.blog_repo
            .list_by_status(BlogPostStatus::Published)
            .await
            .map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(slug = %slug))]
    async fn get_published_by_slug(&self, slug: &str) -> Result<BlogPost, ServiceError> {
        let found = self
            .blog_repo
            .find_by_slug(slug, BlogPostStatus::Published)
            .await
            .map_err(ServiceError::from)?;
        found.ok_or_else(|| ServiceError::NotFound(format!("No published post with slug '{}'", slug)))
    }
}
