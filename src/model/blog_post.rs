use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Publication state of a blog post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlogPostStatus {
    Draft,
    Published,
}

impl BlogPostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlogPostStatus::Draft => "draft",
            BlogPostStatus::Published => "published",
        }
    }

    /// The other state; `toggle_status` flips between the two.
    pub fn toggled(&self) -> BlogPostStatus {
        match self {
            BlogPostStatus::Draft => BlogPostStatus::Published,
            BlogPostStatus::Published => BlogPostStatus::Draft,
        }
    }
}

impl std::fmt::Display for BlogPostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An article on the marketing site. The slug is derived from the title on
/// every create and title-bearing update and is not guaranteed unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub keywords: Vec<String>,
    pub publish_date: String,
    pub read_time: String,
    pub image_url: Option<String>,
    pub status: BlogPostStatus,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_toggles_both_ways() {
        assert_eq!(BlogPostStatus::Draft.toggled(), BlogPostStatus::Published);
        assert_eq!(BlogPostStatus::Published.toggled(), BlogPostStatus::Draft);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&BlogPostStatus::Draft).unwrap(), "\"draft\"");
        assert_eq!(
            serde_json::from_str::<BlogPostStatus>("\"published\"").unwrap(),
            BlogPostStatus::Published
        );
    }
}
