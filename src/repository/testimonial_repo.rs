use crate::model::testimonial::{Testimonial, TestimonialStatus};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::util::time::now_rfc3339;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use mongodb::options::FindOptions;
use mongodb::Database;
use tracing::{error, info};

const COLLECTION: &str = "testimonials";

#[async_trait]
pub trait TestimonialRepository: Send + Sync {
    async fn create(&self, testimonial: Testimonial) -> RepositoryResult<Testimonial>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Testimonial>;
    /// All rows whose status is one of `statuses`, newest first.
    async fn list_by_statuses(
        &self,
        statuses: &[TestimonialStatus],
    ) -> RepositoryResult<Vec<Testimonial>>;
    async fn update_status(
        &self,
        id: ObjectId,
        status: TestimonialStatus,
    ) -> RepositoryResult<Testimonial>;
}

pub struct MongoTestimonialRepository {
    collection: mongodb::Collection<Testimonial>,
}

impl MongoTestimonialRepository {
    pub fn new(db: &Database) -> Self {
        MongoTestimonialRepository {
            collection: db.collection::<Testimonial>(COLLECTION),
        }
    }
}

#[async_trait]
impl TestimonialRepository for MongoTestimonialRepository {
    #[tracing::instrument(skip(self, testimonial), fields(name = %testimonial.name))]
    async fn create(&self, testimonial: Testimonial) -> RepositoryResult<Testimonial> {
        info!("Creating new testimonial");
        let mut new_testimonial = testimonial;
        new_testimonial.id = Some(ObjectId::new());
        let now = now_rfc3339();
        new_testimonial.created_at = Some(now.clone());
        new_testimonial.updated_at = Some(now);

        let result = self.collection.insert_one(new_testimonial.clone(), None).await;
        match result {
            Ok(_) => {
                info!("Testimonial created successfully");
                Ok(new_testimonial)
            }
            Err(e) => {
                error!("Failed to create testimonial: {}", e);
                Err(RepositoryError::database(format!("Failed to create testimonial: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Testimonial> {
        let filter = doc! { "_id": id };
        let result = self.collection.find_one(filter, None).await;
        match result {
            Ok(Some(testimonial)) => Ok(testimonial),
            Ok(None) => {
                error!("Testimonial not found for ID: {}", id);
                Err(RepositoryError::not_found(format!("Testimonial not found for ID: {}", id)))
            }
            Err(e) => {
                error!("Failed to fetch testimonial by ID: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to fetch testimonial by ID: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(statuses = ?statuses))]
    async fn list_by_statuses(
        &self,
        statuses: &[TestimonialStatus],
    ) -> RepositoryResult<Vec<Testimonial>> {
        info!("Listing testimonials by status");
        let wanted: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
        let filter = doc! { "status": { "$in": wanted } };
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1, "_id": -1 })
            .build();
        let cursor = self.collection.find(filter, options).await;
        match cursor {
            Ok(mut cursor) => {
                let mut testimonials = Vec::new();
                while let Some(testimonial) = cursor.next().await {
                    match testimonial {
                        Ok(t) => testimonials.push(t),
                        Err(e) => {
                            error!("Failed to deserialize testimonial: {}", e);
                            return Err(RepositoryError::serialization(format!(
                                "Failed to deserialize testimonial: {}",
                                e
                            )));
                        }
                    }
                }
                info!("Fetched {} testimonials", testimonials.len());
                Ok(testimonials)
            }
            Err(e) => {
                error!("Failed to list testimonials: {}", e);
                Err(RepositoryError::database(format!("Failed to list testimonials: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id, status = %status))]
    async fn update_status(
        &self,
        id: ObjectId,
        status: TestimonialStatus,
    ) -> RepositoryResult<Testimonial> {
        info!("Updating testimonial status");
        let filter = doc! { "_id": id };
        let update = doc! { "$set": { "status": status.as_str(), "updated_at": now_rfc3339() } };
        let result = self.collection.update_one(filter, update, None).await;
        match result {
            Ok(update_result) if update_result.matched_count > 0 => {
                info!("Testimonial status updated successfully");
                self.get_by_id(id).await
            }
            Ok(_) => {
                error!("No testimonial found to update for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "No testimonial found to update for ID: {}",
                    id
                )))
            }
            Err(e) => {
                error!("Failed to update testimonial status: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to update testimonial status: {}",
                    e
                )))
            }
        }
    }
}
