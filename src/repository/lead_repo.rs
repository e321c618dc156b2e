use crate::model::lead::JustDialLead;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::util::time::now_rfc3339;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use mongodb::options::FindOptions;
use mongodb::Database;
use tracing::{error, info};

const COLLECTION: &str = "justdial_leads";

#[async_trait]
pub trait LeadRepository: Send + Sync {
    async fn create(&self, lead: JustDialLead) -> RepositoryResult<JustDialLead>;
    async fn list_page(&self, skip: u64, limit: i64) -> RepositoryResult<Vec<JustDialLead>>;
    async fn count(&self) -> RepositoryResult<u64>;
    async fn mark_processed(&self, id: ObjectId) -> RepositoryResult<JustDialLead>;
}

pub struct MongoLeadRepository {
    collection: mongodb::Collection<JustDialLead>,
}

impl MongoLeadRepository {
    pub fn new(db: &Database) -> Self {
        MongoLeadRepository {
            collection: db.collection::<JustDialLead>(COLLECTION),
        }
    }

    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<JustDialLead> {
        let filter = doc! { "_id": id };
        let result = self.collection.find_one(filter, None).await;
        match result {
            Ok(Some(lead)) => Ok(lead),
            Ok(None) => Err(RepositoryError::not_found(format!("Lead not found for ID: {}", id))),
            Err(e) => {
                error!("Failed to fetch lead by ID: {}", e);
                Err(RepositoryError::database(format!("Failed to fetch lead by ID: {}", e)))
            }
        }
    }
}

#[async_trait]
impl LeadRepository for MongoLeadRepository {
    #[tracing::instrument(skip(self, lead), fields(leadid = %lead.leadid))]
    async fn create(&self, lead: JustDialLead) -> RepositoryResult<JustDialLead> {
        info!("Inserting JustDial lead");
        let mut new_lead = lead;
        new_lead.id = Some(ObjectId::new());
        new_lead.created_at = Some(now_rfc3339());

        let result = self.collection.insert_one(new_lead.clone(), None).await;
        match result {
            Ok(_) => {
                info!("Lead inserted successfully");
                Ok(new_lead)
            }
            Err(e) => {
                error!("Failed to insert lead: {}", e);
                Err(RepositoryError::database(format!("Failed to insert lead: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(skip = skip, limit = limit))]
    async fn list_page(&self, skip: u64, limit: i64) -> RepositoryResult<Vec<JustDialLead>> {
        info!("Listing lead page");
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1, "_id": -1 })
            .skip(skip)
            .limit(limit)
            .build();
        let cursor = self.collection.find(doc! {}, options).await;
        match cursor {
            Ok(mut cursor) => {
                let mut leads = Vec::new();
                while let Some(lead) = cursor.next().await {
                    match lead {
                        Ok(l) => leads.push(l),
                        Err(e) => {
                            error!("Failed to deserialize lead: {}", e);
                            return Err(RepositoryError::serialization(format!(
                                "Failed to deserialize lead: {}",
                                e
                            )));
                        }
                    }
                }
                info!("Fetched {} leads", leads.len());
                Ok(leads)
            }
            Err(e) => {
                error!("Failed to list leads: {}", e);
                Err(RepositoryError::database(format!("Failed to list leads: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self) -> RepositoryResult<u64> {
        let count = self.collection.count_documents(None, None).await;
        match count {
            Ok(count) => Ok(count),
            Err(e) => {
                error!("Failed to count leads: {}", e);
                Err(RepositoryError::database(format!("Failed to count leads: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn mark_processed(&self, id: ObjectId) -> RepositoryResult<JustDialLead> {
        info!("Marking lead processed");
        let filter = doc! { "_id": id };
        let update = doc! { "$set": { "processed": true } };
        let result = self.collection.update_one(filter, update, None).await;
        match result {
            Ok(update_result) if update_result.matched_count > 0 => {
                info!("Lead marked processed");
                self.get_by_id(id).await
            }
            Ok(_) => {
                error!("No lead found to mark processed for ID: {}", id);
                Err(RepositoryError::not_found(format!(
                    "No lead found to mark processed for ID: {}",
                    id
                )))
            }
            Err(e) => {
                error!("Failed to mark lead processed: {}", e);
                Err(RepositoryError::database(format!("Failed to mark lead processed: {}", e)))
            }
        }
    }
}
