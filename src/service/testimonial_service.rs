use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{info, instrument};

use crate::model::enquiry::ServiceCategory;
use crate::model::testimonial::{Testimonial, TestimonialStatus};
use crate::repository::testimonial_repo::TestimonialRepository;
use crate::service::review_cache::{CachedPage, ReviewCache};
use crate::util::error::ServiceError;

/// Submissions from the public form are tagged with this source.
const WEBSITE_SOURCE: &str = "website";

/// Moderation view of the testimonial collection. The active view splits
/// rows into the two moderation buckets; the archived view is the rejected
/// rows only.
#[derive(Debug, Clone)]
pub enum TestimonialListing {
    Active {
        pending: Vec<Testimonial>,
        approved: Vec<Testimonial>,
    },
    Archived {
        rejected: Vec<Testimonial>,
    },
}

/// Testimonial form fields, already validated at the handler.
#[derive(Debug, Clone)]
pub struct NewTestimonial {
    pub name: String,
    pub location: String,
    pub service: ServiceCategory,
    pub rating: u8,
    pub message: String,
}

#[async_trait]
pub trait TestimonialService: Send + Sync {
    /// Public form insert. New rows start pending and invisible to visitors.
    async fn submit(&self, form: NewTestimonial) -> Result<Testimonial, ServiceError>;
    /// Approved testimonials only, for the public site.
    async fn list_approved(&self) -> Result<Vec<Testimonial>, ServiceError>;
    /// Moderation listing: active (pending + approved) or archived (rejected).
    async fn list(&self, archived: bool) -> Result<TestimonialListing, ServiceError>;
    async fn set_status(&self, id: ObjectId, status: TestimonialStatus) -> Result<Testimonial, ServiceError>;
    /// Moves a rejected testimonial back into the pending queue.
    async fn restore(&self, id: ObjectId) -> Result<Testimonial, ServiceError>;
}

pub struct TestimonialServiceImpl {
    pub testimonial_repo: Arc<dyn TestimonialRepository>,
    cache: ReviewCache<bool, Testimonial>,
}

impl TestimonialServiceImpl {
    pub fn new(testimonial_repo: Arc<dyn TestimonialRepository>) -> Self {
        TestimonialServiceImpl {
            testimonial_repo,
            cache: ReviewCache::new(),
        }
    }

    fn bucket(archived: bool, rows: Vec<Testimonial>) -> TestimonialListing {
        if archived {
            return TestimonialListing::Archived { rejected: rows };
        }
        let mut pending = Vec::new();
        let mut approved = Vec::new();
        for row in rows {
            match row.status {
                TestimonialStatus::Pending => pending.push(row),
                TestimonialStatus::Approved => approved.push(row),
                TestimonialStatus::Rejected => {}
            }
        }
        TestimonialListing::Active { pending, approved }
    }
}

#[async_trait]
impl TestimonialService for TestimonialServiceImpl {
    #[instrument(skip(self, form), fields(name = %form.name))]
    async fn submit(&self, form: NewTestimonial) -> Result<Testimonial, ServiceError> {
        info!("Submitting testimonial");
        let testimonial = Testimonial {
            id: None,
            name: form.name,
            location: form.location,
            service: form.service,
            rating: form.rating,
            message: form.message,
            status: TestimonialStatus::Pending,
            source: WEBSITE_SOURCE.to_string(),
            archived: false,
            created_at: None,
            updated_at: None,
        };
        let created = self
            .testimonial_repo
            .create(testimonial)
            .await
            .map_err(ServiceError::from)?;
        // New pending rows show up in the active moderation view.
        self.cache.invalidate_where(|archived| !archived).await;
        info!("Testimonial submitted successfully");
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn list_approved(&self) -> Result<Vec<Testimonial>, ServiceError> {
        self.testimonial_repo
            .list_by_statuses(&[TestimonialStatus::Approved])
            .await
            .map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(archived = archived))]
    async fn list(&self, archived: bool) -> Result<TestimonialListing, ServiceError> {
        if let Some(cached) = self.cache.get(&archived).await {
            info!("Serving testimonial listing from cache");
            return Ok(Self::bucket(archived, cached.rows));
        }

        let wanted: &[TestimonialStatus] = if archived {
            &[TestimonialStatus::Rejected]
        } else {
            &[TestimonialStatus::Pending, TestimonialStatus::Approved]
        };
        let rows = self
            .testimonial_repo
            .list_by_statuses(wanted)
            .await
            .map_err(ServiceError::from)?;

        let total_count = rows.len() as u64;
        self.cache
            .put(
                archived,
                CachedPage {
                    rows: rows.clone(),
                    total_count,
                    has_more: false,
                },
            )
            .await;
        Ok(Self::bucket(archived, rows))
    }

    #[instrument(skip(self), fields(id = %id, status = %status))]
    async fn set_status(&self, id: ObjectId, status: TestimonialStatus) -> Result<Testimonial, ServiceError> {
        info!("Setting testimonial status");
        let updated = self
            .testimonial_repo
            .update_status(id, status)
            .await
            .map_err(ServiceError::from)?;
        // A status flip can move the row between the active and archived
        // views, so both cached listings are dropped.
        self.cache.invalidate_where(|_| true).await;
        info!("Testimonial status updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn restore(&self, id: ObjectId) -> Result<Testimonial, ServiceError> {
        info!("Restoring testimonial to pending");
        self.set_status(id, TestimonialStatus::Pending).await
    }
}
