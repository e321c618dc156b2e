use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{info, instrument};

use crate::model::lead::JustDialLead;
use crate::repository::lead_repo::LeadRepository;
use crate::util::error::ServiceError;

#[async_trait]
pub trait LeadService: Send + Sync {
    /// Stores one webhook delivery. Rejects the call when `leadid` is
    /// missing or empty; every other parameter is optional.
    async fn intake(&self, params: HashMap<String, String>) -> Result<JustDialLead, ServiceError>;
    async fn list(&self, page: u32, limit: u32) -> Result<(Vec<JustDialLead>, u64), ServiceError>;
    async fn mark_processed(&self, id: ObjectId) -> Result<JustDialLead, ServiceError>;
}

pub struct LeadServiceImpl {
    pub lead_repo: Arc<dyn LeadRepository>,
}

impl LeadServiceImpl {
    pub fn new(lead_repo: Arc<dyn LeadRepository>) -> Self {
        LeadServiceImpl { lead_repo }
    }
}

fn opt(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params.get(key).cloned()
}

fn opt_i32(params: &HashMap<String, String>, key: &str) -> Option<i32> {
    params.get(key).and_then(|value| value.parse().ok())
}

#[async_trait]
impl LeadService for LeadServiceImpl {
    #[instrument(skip(self, params))]
    async fn intake(&self, params: HashMap<String, String>) -> Result<JustDialLead, ServiceError> {
        let leadid = match params.get("leadid") {
            Some(id) if !id.is_empty() => id.clone(),
            _ => {
                info!("Webhook delivery rejected, leadid missing");
                return Err(ServiceError::InvalidInput(
                    "Missing required parameter: leadid".to_string(),
                ));
            }
        };
        info!(leadid = %leadid, "Storing JustDial lead");

        let lead = JustDialLead {
            id: None,
            leadid,
            leadtype: opt(&params, "leadtype"),
            prefix: opt(&params, "prefix"),
            name: opt(&params, "name"),
            mobile: opt(&params, "mobile"),
            phone: opt(&params, "phone"),
            email: opt(&params, "email"),
            date: opt(&params, "date"),
            category: opt(&params, "category"),
            city: opt(&params, "city"),
            area: opt(&params, "area"),
            brancharea: opt(&params, "brancharea"),
            dncmobile: opt_i32(&params, "dncmobile"),
            dncphone: opt_i32(&params, "dncphone"),
            company: opt(&params, "company"),
            pincode: opt(&params, "pincode"),
            time: opt(&params, "time"),
            branchpin: opt(&params, "branchpin"),
            parentid: opt(&params, "parentid"),
            processed: false,
            created_at: None,
        };
        let stored = self.lead_repo.create(lead).await.map_err(ServiceError::from)?;
        info!("JustDial lead stored successfully");
        Ok(stored)
    }

    #[instrument(skip(self), fields(page = page, limit = limit))]
    async fn list(&self, page: u32, limit: u32) -> Result<(Vec<JustDialLead>, u64), ServiceError> {
        let page = page.max(1);
        let limit = limit.max(1);
        let skip = u64::from(page - 1) * u64::from(limit);
        let rows = self
            .lead_repo
            .list_page(skip, i64::from(limit))
            .await
            .map_err(ServiceError::from)?;
        let total = self.lead_repo.count().await.map_err(ServiceError::from)?;
        Ok((rows, total))
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn mark_processed(&self, id: ObjectId) -> Result<JustDialLead, ServiceError> {
        info!("Marking lead processed");
        self.lead_repo.mark_processed(id).await.map_err(ServiceError::from)
    }
}
