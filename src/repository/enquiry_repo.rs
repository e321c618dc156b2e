use crate::model::enquiry::{Enquiry, EnquiryStatus};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::util::time::now_rfc3339;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::StreamExt;
use mongodb::options::FindOptions;
use mongodb::Database;
use tracing::{error, info};

const COLLECTION: &str = "enquiries";

#[async_trait]
pub trait EnquiryRepository: Send + Sync {
    async fn create(&self, enquiry: Enquiry) -> RepositoryResult<Enquiry>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Enquiry>;
    /// One page of the archived or active partition, optionally narrowed by
    /// status, newest first with id as the tie-break.
    async fn list_page(
        &self,
        archived: bool,
        status: Option<EnquiryStatus>,
        skip: u64,
        limit: i64,
    ) -> RepositoryResult<Vec<Enquiry>>;
    async fn count(&self, archived: bool, status: Option<EnquiryStatus>) -> RepositoryResult<u64>;
    async fn update_status(&self, id: ObjectId, status: EnquiryStatus) -> RepositoryResult<Enquiry>;
    /// Sets the archived flag together with the forced status. Matching an
    /// already-identical row is not an error, so re-archiving is a no-op.
    async fn set_archived(
        &self,
        id: ObjectId,
        archived: bool,
        status: EnquiryStatus,
    ) -> RepositoryResult<Enquiry>;
    async fn update_comment(&self, id: ObjectId, comment: &str) -> RepositoryResult<Enquiry>;
    /// Rows with this email+phone pair created strictly after `since`.
    async fn count_recent_by_email_and_phone(
        &self,
        email: &str,
        phone: &str,
        since: &str,
    ) -> RepositoryResult<u64>;
    /// Rows with this email created strictly after `since`.
    async fn count_recent_by_email(&self, email: &str, since: &str) -> RepositoryResult<u64>;
}

pub struct MongoEnquiryRepository {
    collection: mongodb::Collection<Enquiry>,
}

impl MongoEnquiryRepository {
    pub fn new(db: &Database) -> Self {
        MongoEnquiryRepository {
            collection: db.collection::<Enquiry>(COLLECTION),
        }
    }

    fn partition_filter(archived: bool, status: Option<EnquiryStatus>) -> Document {
        let mut filter = doc! { "archived": archived };
        if let Some(status) = status {
            filter.insert("status", status.as_str());
        }
        filter
    }

    async fn fetch_after_update(&self, id: ObjectId) -> RepositoryResult<Enquiry> {
        self.get_by_id(id).await
    }
}

#[async_trait]
impl EnquiryRepository for MongoEnquiryRepository {
    #[tracing::instrument(skip(self, enquiry), fields(email = %enquiry.email))]
    async fn create(&self, enquiry: Enquiry) -> RepositoryResult<Enquiry> {
        info!("Creating new enquiry");
        let mut new_enquiry = enquiry;
        new_enquiry.id = Some(ObjectId::new());
        let now = now_rfc3339();
        new_enquiry.created_at = Some(now.clone());
        new_enquiry.updated_at = Some(now);

        let result = self.collection.insert_one(new_enquiry.clone(), None).await;
        match result {
            Ok(_) => {
                info!("Enquiry created successfully");
                Ok(new_enquiry)
            }
            Err(e) => {
                error!("Failed to create enquiry: {}", e);
                Err(RepositoryError::database(format!("Failed to create enquiry: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Enquiry> {
        let filter = doc! { "_id": id };
        let result = self.collection.find_one(filter, None).await;
        match result {
            Ok(Some(enquiry)) => Ok(enquiry),
            Ok(None) => {
                error!("Enquiry not found for ID: {}", id);
                Err(RepositoryError::not_found(format!("Enquiry not found for ID: {}", id)))
            }
            Err(e) => {
                error!("Failed to fetch enquiry by ID: {}", e);
                Err(RepositoryError::database(format!("Failed to fetch enquiry by ID: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(archived = archived, status = ?status, skip = skip, limit = limit))]
    async fn list_page(
        &self,
        archived: bool,
        status: Option<EnquiryStatus>,
        skip: u64,
        limit: i64,
    ) -> RepositoryResult<Vec<Enquiry>> {
        info!("Listing enquiry page");
        let filter = Self::partition_filter(archived, status);
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1, "_id": -1 })
            .skip(skip)
            .limit(limit)
            .build();
        let cursor = self.collection.find(filter, options).await;
        match cursor {
            Ok(mut cursor) => {
                let mut enquiries = Vec::new();
                while let Some(enquiry) = cursor.next().await {
                    match enquiry {
                        Ok(e) => enquiries.push(e),
                        Err(e) => {
                            error!("Failed to deserialize enquiry: {}", e);
                            return Err(RepositoryError::serialization(format!(
                                "Failed to deserialize enquiry: {}",
                                e
                            )));
                        }
                    }
                }
                info!("Fetched {} enquiries", enquiries.len());
                Ok(enquiries)
            }
            Err(e) => {
                error!("Failed to list enquiries: {}", e);
                Err(RepositoryError::database(format!("Failed to list enquiries: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(archived = archived, status = ?status))]
    async fn count(&self, archived: bool, status: Option<EnquiryStatus>) -> RepositoryResult<u64> {
        let filter = Self::partition_filter(archived, status);
        let count = self.collection.count_documents(filter, None).await;
        match count {
            Ok(count) => Ok(count),
            Err(e) => {
                error!("Failed to count enquiries: {}", e);
                Err(RepositoryError::database(format!("Failed to count enquiries: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id, status = %status))]
    async fn update_status(&self, id: ObjectId, status: EnquiryStatus) -> RepositoryResult<Enquiry> {
        info!("Updating enquiry status");
        let filter = doc! { "_id": id };
        let update = doc! { "$set": { "status": status.as_str(), "updated_at": now_rfc3339() } };
        let result = self.collection.update_one(filter, update, None).await;
        match result {
            Ok(update_result) if update_result.matched_count > 0 => {
                info!("Enquiry status updated successfully");
                self.fetch_after_update(id).await
            }
            Ok(_) => {
                error!("No enquiry found to update status for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "No enquiry found to update status for ID: {}",
                    id
                )))
            }
            Err(e) => {
                error!("Failed to update enquiry status: {}", e);
                Err(RepositoryError::database(format!("Failed to update enquiry status: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id, archived = archived, status = %status))]
    async fn set_archived(
        &self,
        id: ObjectId,
        archived: bool,
        status: EnquiryStatus,
    ) -> RepositoryResult<Enquiry> {
        info!("Setting enquiry archived flag");
        let filter = doc! { "_id": id };
        let update = doc! { "$set": {
            "archived": archived,
            "status": status.as_str(),
            "updated_at": now_rfc3339(),
        } };
        let result = self.collection.update_one(filter, update, None).await;
        match result {
            Ok(update_result) if update_result.matched_count > 0 => {
                info!("Enquiry archived flag set successfully");
                self.fetch_after_update(id).await
            }
            Ok(_) => {
                error!("No enquiry found to archive for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "No enquiry found to archive for ID: {}",
                    id
                )))
            }
            Err(e) => {
                error!("Failed to set enquiry archived flag: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to set enquiry archived flag: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self, comment), fields(id = %id))]
    async fn update_comment(&self, id: ObjectId, comment: &str) -> RepositoryResult<Enquiry> {
        info!("Updating enquiry admin comment");
        let filter = doc! { "_id": id };
        let update = doc! { "$set": { "admin_comment": comment, "updated_at": now_rfc3339() } };
        let result = self.collection.update_one(filter, update, None).await;
        match result {
            Ok(update_result) if update_result.matched_count > 0 => {
                info!("Enquiry comment updated successfully");
                self.fetch_after_update(id).await
            }
            Ok(_) => {
                error!("No enquiry found to comment for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "No enquiry found to comment for ID: {}",
                    id
                )))
            }
            Err(e) => {
                error!("Failed to update enquiry comment: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to update enquiry comment: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self, email, phone), fields(since = %since))]
    async fn count_recent_by_email_and_phone(
        &self,
        email: &str,
        phone: &str,
        since: &str,
    ) -> RepositoryResult<u64> {
        // Timestamps are fixed-width RFC3339 UTC strings, so $gt compares
        // chronologically.
        let filter = doc! { "email": email, "phone": phone, "created_at": { "$gt": since } };
        let count = self.collection.count_documents(filter, None).await;
        match count {
            Ok(count) => Ok(count),
            Err(e) => {
                error!("Failed to count recent enquiries by email and phone: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to count recent enquiries: {}",
                    e
                )))
            }
        }
    }

    #[tracing::instrument(skip(self, email), fields(since = %since))]
    async fn count_recent_by_email(&self, email: &str, since: &str) -> RepositoryResult<u64> {
        let filter = doc! { "email": email, "created_at": { "$gt": since } };
        let count = self.collection.count_documents(filter, None).await;
        match count {
            Ok(count) => Ok(count),
            Err(e) => {
                error!("Failed to count recent enquiries by email: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to count recent enquiries: {}",
                    e
                )))
            }
        }
    }
}
