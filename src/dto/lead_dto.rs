use crate::model::lead::JustDialLead;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct LeadListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadListResponse {
    pub leads: Vec<JustDialLead>,
    pub total_count: u64,
    pub page: u32,
    pub limit: u32,
}
