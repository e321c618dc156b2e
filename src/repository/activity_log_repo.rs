use crate::model::activity_log::{ActivityLog, ActivityType, EntityType};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::util::time::now_rfc3339;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::StreamExt;
use mongodb::options::FindOptions;
use mongodb::Database;
use tracing::{error, info};

const COLLECTION: &str = "admin_activity_logs";

/// The audit trail is append-only; the trait exposes no update or delete.
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    async fn append(&self, log: ActivityLog) -> RepositoryResult<ActivityLog>;
    async fn list_page(
        &self,
        activity_type: Option<ActivityType>,
        entity_type: Option<EntityType>,
        skip: u64,
        limit: i64,
    ) -> RepositoryResult<Vec<ActivityLog>>;
    async fn count(
        &self,
        activity_type: Option<ActivityType>,
        entity_type: Option<EntityType>,
    ) -> RepositoryResult<u64>;
}

pub struct MongoActivityLogRepository {
    collection: mongodb::Collection<ActivityLog>,
}

impl MongoActivityLogRepository {
    pub fn new(db: &Database) -> Self {
        MongoActivityLogRepository {
            collection: db.collection::<ActivityLog>(COLLECTION),
        }
    }

    fn filter_for(
        activity_type: Option<ActivityType>,
        entity_type: Option<EntityType>,
    ) -> Document {
        let mut filter = doc! {};
        if let Some(activity_type) = activity_type {
            filter.insert("activity_type", activity_type.as_str());
        }
        if let Some(entity_type) = entity_type {
            filter.insert("entity_type", entity_type.as_str());
        }
        filter
    }
}

#[async_trait]
impl ActivityLogRepository for MongoActivityLogRepository {
    #[tracing::instrument(skip(self, log), fields(activity_type = %log.activity_type, entity_type = %log.entity_type))]
    async fn append(&self, log: ActivityLog) -> RepositoryResult<ActivityLog> {
        let mut new_log = log;
        new_log.id = Some(ObjectId::new());
        new_log.created_at = Some(now_rfc3339());

        let result = self.collection.insert_one(new_log.clone(), None).await;
        match result {
            Ok(_) => Ok(new_log),
            Err(e) => {
                error!("Failed to append activity log: {}", e);
                Err(RepositoryError::database(format!("Failed to append activity log: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(activity_type = ?activity_type, entity_type = ?entity_type, skip = skip, limit = limit))]
    async fn list_page(
        &self,
        activity_type: Option<ActivityType>,
        entity_type: Option<EntityType>,
        skip: u64,
        limit: i64,
    ) -> RepositoryResult<Vec<ActivityLog>> {
        info!("Listing activity log page");
        let filter = Self::filter_for(activity_type, entity_type);
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1, "_id": -1 })
            .skip(skip)
            .limit(limit)
            .build();
        let cursor = self.collection.find(filter, options).await;
        match cursor {
            Ok(mut cursor) => {
                let mut logs = Vec::new();
                while let Some(log) = cursor.next().await {
                    match log {
                        Ok(l) => logs.push(l),
                        Err(e) => {
                            error!("Failed to deserialize activity log: {}", e);
                            return Err(RepositoryError::serialization(format!(
                                "Failed to deserialize activity log: {}",
                                e
                            )));
                        }
                    }
                }
                info!("Fetched {} activity logs", logs.len());
                Ok(logs)
            }
            Err(e) => {
                error!("Failed to list activity logs: {}", e);
                Err(RepositoryError::database(format!("Failed to list activity logs: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(activity_type = ?activity_type, entity_type = ?entity_type))]
    async fn count(
        &self,
        activity_type: Option<ActivityType>,
        entity_type: Option<EntityType>,
    ) -> RepositoryResult<u64> {
        let filter = Self::filter_for(activity_type, entity_type);
        let count = self.collection.count_documents(filter, None).await;
        match count {
            Ok(count) => Ok(count),
            Err(e) => {
                error!("Failed to count activity logs: {}", e);
                Err(RepositoryError::database(format!("Failed to count activity logs: {}", e)))
            }
        }
    }
}
