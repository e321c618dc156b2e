use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Administrative actions that produce an audit-trail row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Login,
    Logout,
    TestimonialApproval,
    TestimonialRejection,
    EnquiryStatusChange,
    ContentModification,
    SettingsChange,
    UserManagement,
    DataAccess,
    BulkOperation,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Login => "login",
            ActivityType::Logout => "logout",
            ActivityType::TestimonialApproval => "testimonial_approval",
            ActivityType::TestimonialRejection => "testimonial_rejection",
            ActivityType::EnquiryStatusChange => "enquiry_status_change",
            ActivityType::ContentModification => "content_modification",
            ActivityType::SettingsChange => "settings_change",
            ActivityType::UserManagement => "user_management",
            ActivityType::DataAccess => "data_access",
            ActivityType::BulkOperation => "bulk_operation",
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of record an administrative action touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Testimonial,
    Enquiry,
    BlogPost,
    Settings,
    User,
    System,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Testimonial => "testimonial",
            EntityType::Enquiry => "enquiry",
            EntityType::BlogPost => "blog_post",
            EntityType::Settings => "settings",
            EntityType::User => "user",
            EntityType::System => "system",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One append-only audit-trail row. Rows are inserted as a side effect of
/// admin mutations and never updated or deleted by the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub admin_id: String,
    pub admin_email: String,
    pub activity_type: ActivityType,
    pub entity_type: EntityType,
    pub entity_id: Option<String>,
    pub details: Option<serde_json::Value>,
    pub previous_values: Option<serde_json::Value>,
    pub new_values: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_type_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ActivityType::EnquiryStatusChange).unwrap(),
            "\"enquiry_status_change\""
        );
        assert_eq!(
            serde_json::to_string(&ActivityType::TestimonialRejection).unwrap(),
            "\"testimonial_rejection\""
        );
        assert!(serde_json::from_str::<ActivityType>("\"password_reset\"").is_err());
    }

    #[test]
    fn test_entity_type_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&EntityType::BlogPost).unwrap(), "\"blog_post\"");
        let back: EntityType = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(back, EntityType::System);
    }
}
