use crate::model::activity_log::{ActivityLog, ActivityType, EntityType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ActivityLogQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub activity_type: Option<ActivityType>,
    pub entity_type: Option<EntityType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLogListResponse {
    pub logs: Vec<ActivityLog>,
    pub total_count: u64,
    pub page: u32,
    pub limit: u32,
}
