use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::Duration;
use serde_json::json;
use tracing::{error, info, instrument};

use crate::model::activity_log::{ActivityType, EntityType};
use crate::model::enquiry::{Enquiry, EnquiryStatus, ServiceCategory};
use crate::repository::enquiry_repo::EnquiryRepository;
use crate::service::activity_logger::{ActivityEntry, ActivityLogger, ActorContext};
use crate::service::review_cache::{CachedPage, ReviewCache};
use crate::util::error::ServiceError;
use crate::util::time::rfc3339_ago;

/// Fixed page size of the admin enquiry listing.
pub const PAGE_SIZE: u32 = 12;

/// A same email+phone submission inside this window is a duplicate.
const DUPLICATE_WINDOW_HOURS: i64 = 1;
/// More than this many prior submissions per email in 24 hours trips the
/// rate limit.
const RATE_LIMIT_MAX_PER_DAY: u64 = 3;

/// Identifies one cached enquiry listing page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnquiryListKey {
    pub archived: bool,
    pub status: Option<EnquiryStatus>,
    pub page: u32,
}

/// Contact form fields, already validated at the handler.
#[derive(Debug, Clone)]
pub struct NewEnquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: ServiceCategory,
    pub message: String,
}

#[async_trait]
pub trait EnquiryService: Send + Sync {
    /// Public contact form insert, guarded by the duplicate and rate-limit
    /// checks. Guard rejections are Conflict errors and persist nothing.
    async fn submit(&self, form: NewEnquiry) -> Result<Enquiry, ServiceError>;
    async fn list(
        &self,
        archived: bool,
        status: Option<EnquiryStatus>,
        page: u32,
    ) -> Result<CachedPage<Enquiry>, ServiceError>;
    async fn get(&self, id: ObjectId) -> Result<Enquiry, ServiceError>;
    async fn change_status(
        &self,
        id: ObjectId,
        new_status: EnquiryStatus,
        actor: &ActorContext,
    ) -> Result<Enquiry, ServiceError>;
    async fn archive(&self, id: ObjectId, actor: &ActorContext) -> Result<Enquiry, ServiceError>;
    async fn unarchive(&self, id: ObjectId, actor: &ActorContext) -> Result<Enquiry, ServiceError>;
    async fn add_comment(&self, id: ObjectId, comment: String) -> Result<Enquiry, ServiceError>;
}

pub struct EnquiryServiceImpl {
    pub enquiry_repo: Arc<dyn EnquiryRepository>,
    pub activity_logger: Arc<ActivityLogger>,
    cache: ReviewCache<EnquiryListKey, Enquiry>,
}

impl EnquiryServiceImpl {
    pub fn new(enquiry_repo: Arc<dyn EnquiryRepository>, activity_logger: Arc<ActivityLogger>) -> Self {
        EnquiryServiceImpl {
            enquiry_repo,
            activity_logger,
            cache: ReviewCache::new(),
        }
    }

    /// Archive and unarchive force a fixed status and move the row between
    /// partitions, so both partitions' cached pages are dropped on success.
    async fn set_archive_state(
        &self,
        id: ObjectId,
        archived: bool,
        forced_status: EnquiryStatus,
        actor: &ActorContext,
    ) -> Result<Enquiry, ServiceError> {
        let current = self.enquiry_repo.get_by_id(id).await.map_err(ServiceError::from)?;

        let mut mutation = self
            .cache
            .begin_mutation(
                |row: &Enquiry| row.id == Some(id),
                |row| {
                    row.archived = archived;
                    row.status = forced_status;
                },
            )
            .await;

        match self.enquiry_repo.set_archived(id, archived, forced_status).await {
            Ok(updated) => {
                self.cache.confirm(&mut mutation, |_| true).await;
                self.activity_logger.record(
                    actor,
                    ActivityEntry {
                        activity_type: ActivityType::EnquiryStatusChange,
                        entity_type: EntityType::Enquiry,
                        entity_id: Some(id.to_hex()),
                        details: Some(json!({
                            "action": if archived { "archive" } else { "unarchive" },
                        })),
                        previous_values: Some(json!({
                            "status": current.status.as_str(),
                            "archived": current.archived,
                        })),
                        new_values: Some(json!({
                            "status": forced_status.as_str(),
                            "archived": archived,
                        })),
                    },
                );
                Ok(updated)
            }
            Err(e) => {
                error!("Archive write failed, rolling back optimistic update: {e}");
                self.cache.rollback(&mut mutation).await;
                Err(ServiceError::from(e))
            }
        }
    }
}

#[async_trait]
impl EnquiryService for EnquiryServiceImpl {
    #[instrument(skip(self, form), fields(email = %form.email))]
    async fn submit(&self, form: NewEnquiry) -> Result<Enquiry, ServiceError> {
        info!("Submitting contact enquiry");

        // Guards are read-then-insert; two racing submissions can both pass.
        let hour_ago = rfc3339_ago(Duration::hours(DUPLICATE_WINDOW_HOURS));
        let duplicates = self
            .enquiry_repo
            .count_recent_by_email_and_phone(&form.email, &form.phone, &hour_ago)
            .await
            .map_err(ServiceError::from)?;
        if duplicates > 0 {
            info!("Duplicate enquiry rejected");
            return Err(ServiceError::Conflict(
                "An enquiry with these contact details was already submitted in the last hour. Please wait before trying again.".to_string(),
            ));
        }

        let day_ago = rfc3339_ago(Duration::hours(24));
        let recent = self
            .enquiry_repo
            .count_recent_by_email(&form.email, &day_ago)
            .await
            .map_err(ServiceError::from)?;
        if recent > RATE_LIMIT_MAX_PER_DAY {
            info!("Rate-limited enquiry rejected");
            return Err(ServiceError::Conflict(
                "Too many enquiries from this email address in the last 24 hours. Please try again later.".to_string(),
            ));
        }

        let enquiry = Enquiry {
            id: None,
            name: form.name,
            email: form.email,
            phone: form.phone,
            service: form.service,
            message: form.message,
            status: EnquiryStatus::Pending,
            archived: false,
            admin_comment: None,
            created_at: None,
            updated_at: None,
        };
        let created = self.enquiry_repo.create(enquiry).await.map_err(ServiceError::from)?;

        // The new row belongs to the active partition; its cached pages are
        // stale now.
        self.cache.invalidate_where(|key| !key.archived).await;
        info!("Enquiry submitted successfully");
        Ok(created)
    }

    #[instrument(skip(self), fields(archived = archived, status = ?status, page = page))]
    async fn list(
        &self,
        archived: bool,
        status: Option<EnquiryStatus>,
        page: u32,
    ) -> Result<CachedPage<Enquiry>, ServiceError> {
        let page = page.max(1);
        let key = EnquiryListKey { archived, status, page };
        if let Some(cached) = self.cache.get(&key).await {
            info!("Serving enquiry listing from cache");
            return Ok(cached);
        }

        // A repository error propagates here and leaves the cache untouched,
        // so the dashboard keeps showing the last good listing.
        let skip = u64::from(page - 1) * u64::from(PAGE_SIZE);
        let rows = self
            .enquiry_repo
            .list_page(archived, status, skip, i64::from(PAGE_SIZE))
            .await
            .map_err(ServiceError::from)?;
        let total_count = self
            .enquiry_repo
            .count(archived, status)
            .await
            .map_err(ServiceError::from)?;
        let has_more = skip + (rows.len() as u64) < total_count;

        let listing = CachedPage { rows, total_count, has_more };
        self.cache.put(key, listing.clone()).await;
        Ok(listing)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get(&self, id: ObjectId) -> Result<Enquiry, ServiceError> {
        self.enquiry_repo.get_by_id(id).await.map_err(ServiceError::from)
    }

    #[instrument(skip(self, actor), fields(id = %id, new_status = %new_status))]
    async fn change_status(
        &self,
        id: ObjectId,
        new_status: EnquiryStatus,
        actor: &ActorContext,
    ) -> Result<Enquiry, ServiceError> {
        info!("Changing enquiry status");
        let current = self.enquiry_repo.get_by_id(id).await.map_err(ServiceError::from)?;
        let previous_status = current.status;

        let mut mutation = self
            .cache
            .begin_mutation(|row: &Enquiry| row.id == Some(id), |row| row.status = new_status)
            .await;

        match self.enquiry_repo.update_status(id, new_status).await {
            Ok(updated) => {
                let partition = updated.archived;
                self.cache.confirm(&mut mutation, |key| key.archived == partition).await;
                self.activity_logger.record(
                    actor,
                    ActivityEntry {
                        activity_type: ActivityType::EnquiryStatusChange,
                        entity_type: EntityType::Enquiry,
                        entity_id: Some(id.to_hex()),
                        details: Some(json!({ "action": "status_change" })),
                        previous_values: Some(json!({ "status": previous_status.as_str() })),
                        new_values: Some(json!({ "status": new_status.as_str() })),
                    },
                );
                info!("Enquiry status changed successfully");
                Ok(updated)
            }
            Err(e) => {
                error!("Status write failed, rolling back optimistic update: {e}");
                self.cache.rollback(&mut mutation).await;
                Err(ServiceError::from(e))
            }
        }
    }

    #[instrument(skip(self, actor), fields(id = %id))]
    async fn archive(&self, id: ObjectId, actor: &ActorContext) -> Result<Enquiry, ServiceError> {
        info!("Archiving enquiry");
        self.set_archive_state(id, true, EnquiryStatus::Cancelled, actor).await
    }

    #[instrument(skip(self, actor), fields(id = %id))]
    async fn unarchive(&self, id: ObjectId, actor: &ActorContext) -> Result<Enquiry, ServiceError> {
        info!("Unarchiving enquiry");
        self.set_archive_state(id, false, EnquiryStatus::New, actor).await
    }

    #[instrument(skip(self, comment), fields(id = %id))]
    async fn add_comment(&self, id: ObjectId, comment: String) -> Result<Enquiry, ServiceError> {
        info!("Updating enquiry admin comment");
        let updated = self
            .enquiry_repo
            .update_comment(id, &comment)
            .await
            .map_err(ServiceError::from)?;
        // Cached rows carry the comment, so every cached page is stale.
        self.cache.invalidate_where(|_| true).await;
        Ok(updated)
    }
}
