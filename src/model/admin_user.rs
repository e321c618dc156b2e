use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A back-office account. The first admin is bootstrapped from environment
/// configuration at startup; there is no public registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String, // "admin" for every bootstrapped account
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
