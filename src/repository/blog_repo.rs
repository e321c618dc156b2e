use crate::model::blog_post::{BlogPost, BlogPostStatus};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::util::time::now_rfc3339;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use mongodb::options::{FindOneOptions, FindOptions};
use mongodb::Database;
use tracing::{error, info};

const COLLECTION: &str = "blog_posts";

#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    async fn create(&self, post: BlogPost) -> RepositoryResult<BlogPost>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<BlogPost>;
    async fn update(&self, id: ObjectId, post: BlogPost) -> RepositoryResult<BlogPost>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    /// Every post, newest first. The back office shows drafts and published
    /// posts in one listing.
    async fn list(&self) -> RepositoryResult<Vec<BlogPost>>;
    async fn list_by_status(&self, status: BlogPostStatus) -> RepositoryResult<Vec<BlogPost>>;
    /// Slugs are not unique; the newest matching post wins.
    async fn find_by_slug(
        &self,
        slug: &str,
        status: BlogPostStatus,
    ) -> RepositoryResult<Option<BlogPost>>;
    async fn update_status(&self, id: ObjectId, status: BlogPostStatus)
        -> RepositoryResult<BlogPost>;
}

pub struct MongoBlogPostRepository {
    collection: mongodb::Collection<BlogPost>,
}

impl MongoBlogPostRepository {
    pub fn new(db: &Database) -> Self {
        MongoBlogPostRepository {
            collection: db.collection::<BlogPost>(COLLECTION),
        }
    }

    async fn collect_sorted(
        &self,
        filter: bson::Document,
    ) -> RepositoryResult<Vec<BlogPost>> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1, "_id": -1 })
            .build();
        let mut cursor = self
            .collection
            .find(filter, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list blog posts: {}", e)))?;
        let mut posts = Vec::new();
        while let Some(post) = cursor.next().await {
            match post {
                Ok(p) => posts.push(p),
                Err(e) => {
                    error!("Failed to deserialize blog post: {}", e);
                    return Err(RepositoryError::serialization(format!(
                        "Failed to deserialize blog post: {}",
                        e
                    )));
                }
            }
        }
        Ok(posts)
    }
}

#[async_trait]
impl BlogPostRepository for MongoBlogPostRepository {
    #[tracing::instrument(skip(self, post), fields(title = %post.title))]
    async fn create(&self, post: BlogPost) -> RepositoryResult<BlogPost> {
        info!("Creating new blog post");
        let mut new_post = post;
        new_post.id = Some(ObjectId::new());
        let now = now_rfc3339();
        new_post.created_at = Some(now.clone());
        new_post.updated_at = Some(now);

        let result = self.collection.insert_one(new_post.clone(), None).await;
        match result {
            Ok(_) => {
                info!("Blog post created successfully");
                Ok(new_post)
            }
            Err(e) => {
                error!("Failed to create blog post: {}", e);
                Err(RepositoryError::database(format!("Failed to create blog post: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<BlogPost> {
        let filter = doc! { "_id": id };
        let result = self.collection.find_one(filter, None).await;
        match result {
            Ok(Some(post)) => Ok(post),
            Ok(None) => {
                error!("Blog post not found for ID: {}", id);
                Err(RepositoryError::not_found(format!("Blog post not found for ID: {}", id)))
            }
            Err(e) => {
                error!("Failed to fetch blog post by ID: {}", e);
                Err(RepositoryError::database(format!("Failed to fetch blog post by ID: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self, post), fields(id = %id))]
    async fn update(&self, id: ObjectId, post: BlogPost) -> RepositoryResult<BlogPost> {
        info!("Updating blog post");
        let filter = doc! { "_id": id };
        let mut update_doc = bson::to_document(&post)
            .map_err(|e| RepositoryError::serialization(format!("Failed to serialize blog post: {}", e)))?;
        update_doc.remove("_id");
        update_doc.insert("updated_at", now_rfc3339());
        let update = doc! { "$set": update_doc };
        let result = self.collection.update_one(filter, update, None).await;
        match result {
            Ok(update_result) if update_result.matched_count > 0 => {
                info!("Blog post updated successfully");
                self.get_by_id(id).await
            }
            Ok(_) => {
                error!("No blog post found to update for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "No blog post found to update for ID: {}",
                    id
                )))
            }
            Err(e) => {
                error!("Failed to update blog post: {}", e);
                Err(RepositoryError::database(format!("Failed to update blog post: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        info!("Deleting blog post");
        let filter = doc! { "_id": id };
        let result = self.collection.delete_one(filter, None).await;
        match result {
            Ok(delete_result) if delete_result.deleted_count > 0 => {
                info!("Blog post deleted successfully");
                Ok(())
            }
            Ok(_) => {
                error!("No blog post found to delete for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "No blog post found to delete for ID: {}",
                    id
                )))
            }
            Err(e) => {
                error!("Failed to delete blog post: {}", e);
                Err(RepositoryError::database(format!("Failed to delete blog post: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<BlogPost>> {
        info!("Listing all blog posts");
        self.collect_sorted(doc! {}).await
    }

    #[tracing::instrument(skip(self), fields(status = %status))]
    async fn list_by_status(&self, status: BlogPostStatus) -> RepositoryResult<Vec<BlogPost>> {
        info!("Listing blog posts by status");
        self.collect_sorted(doc! { "status": status.as_str() }).await
    }

    #[tracing::instrument(skip(self), fields(slug = %slug, status = %status))]
    async fn find_by_slug(
        &self,
        slug: &str,
        status: BlogPostStatus,
    ) -> RepositoryResult<Option<BlogPost>> {
        let filter = doc! { "slug": slug, "status": status.as_str() };
        let options = FindOneOptions::builder()
            .sort(doc! { "created_at": -1, "_id": -1 })
            .build();
        let result = self.collection.find_one(filter, options).await;
        match result {
            Ok(post) => Ok(post),
            Err(e) => {
                error!("Failed to fetch blog post by slug: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to fetch blog post by slug: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id, status = %status))]
    async fn update_status(
        &self,
        id: ObjectId,
        status: BlogPostStatus,
    ) -> RepositoryResult<BlogPost> {
        info!("Updating blog post status");
        let filter = doc! { "_id": id };
        let update = doc! { "$set": { "status": status.as_str(), "updated_at": now_rfc3339() } };
        let result = self.collection.update_one(filter, update, None).await;
        match result {
            Ok(update_result) if update_result.matched_count > 0 => {
                info!("Blog post status updated successfully");
                self.get_by_id(id).await
            }
            Ok(_) => {
                error!("No blog post found to update status for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "No blog post found to update status for ID: {}",
                    id
                )))
            }
            Err(e) => {
                error!("Failed to update blog post status: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to update blog post status: {}",
                    e
                )))
            }
        }
    }
}
