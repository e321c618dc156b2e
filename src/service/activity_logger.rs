use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::model::activity_log::{ActivityLog, ActivityType, EntityType};
use crate::repository::activity_log_repo::ActivityLogRepository;
use crate::util::error::ServiceError;

/// Who performed an admin action and from where. Handlers build this from
/// the authenticated claims plus the request metadata extension.
#[derive(Debug, Clone)]
pub struct ActorContext {
    pub admin_id: String,
    pub admin_email: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// One audit-trail entry before the repository stamps id and timestamp.
#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub activity_type: ActivityType,
    pub entity_type: EntityType,
    pub entity_id: Option<String>,
    pub details: Option<Value>,
    pub previous_values: Option<Value>,
    pub new_values: Option<Value>,
}

/// Best-effort audit-trail writer.
///
/// `record` dispatches the append on a spawned task and returns without
/// awaiting it. Every failure is caught and traced on that task, never
/// surfaced: recording an action must not block, delay, or fail the action
/// it records.
pub struct ActivityLogger {
    repo: Arc<dyn ActivityLogRepository>,
}

impl ActivityLogger {
    pub fn new(repo: Arc<dyn ActivityLogRepository>) -> Self {
        ActivityLogger { repo }
    }

    #[instrument(skip(self, actor, entry), fields(activity_type = %entry.activity_type, entity_type = %entry.entity_type))]
    pub fn record(&self, actor: &ActorContext, entry: ActivityEntry) {
        debug!("Dispatching activity log append");
        let repo = Arc::clone(&self.repo);
        let log = ActivityLog {
            id: None,
            admin_id: actor.admin_id.clone(),
            admin_email: actor.admin_email.clone(),
            activity_type: entry.activity_type,
            entity_type: entry.entity_type,
            entity_id: entry.entity_id,
            details: entry.details,
            previous_values: entry.previous_values,
            new_values: entry.new_values,
            ip_address: actor.ip_address.clone(),
            user_agent: actor.user_agent.clone(),
            created_at: None,
        };
        tokio::spawn(async move {
            if let Err(e) = repo.append(log).await {
                warn!("Activity log write failed, entry discarded: {}", e);
            }
        });
    }

    /// Admin read path: one page of the trail, newest first, optionally
    /// narrowed by action and entity type.
    #[instrument(skip(self), fields(activity_type = ?activity_type, entity_type = ?entity_type, page = page, limit = limit))]
    pub async fn list(
        &self,
        activity_type: Option<ActivityType>,
        entity_type: Option<EntityType>,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<ActivityLog>, u64), ServiceError> {
        let skip = u64::from(page.saturating_sub(1)) * u64::from(limit);
        let rows = self
            .repo
            .list_page(activity_type, entity_type, skip, i64::from(limit))
            .await
            .map_err(ServiceError::from)?;
        let total = self
            .repo
            .count(activity_type, entity_type)
            .await
            .map_err(ServiceError::from)?;
        Ok((rows, total))
    }
}
