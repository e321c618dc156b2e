use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A sales lead delivered by the JustDial webhook. Field names mirror the
/// third party's query parameters. Created solely by the webhook and only
/// ever mutated by the admin "mark processed" action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JustDialLead {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub leadid: String,
    pub leadtype: Option<String>,
    pub prefix: Option<String>,
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub area: Option<String>,
    pub brancharea: Option<String>,
    pub dncmobile: Option<i32>,
    pub dncphone: Option<i32>,
    pub company: Option<String>,
    pub pincode: Option<String>,
    pub time: Option<String>,
    pub branchpin: Option<String>,
    pub parentid: Option<String>,
    pub processed: bool,
    pub created_at: Option<String>,
}
