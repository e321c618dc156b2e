use crate::model::admin_user::AdminUser;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::util::time::now_rfc3339;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use mongodb::Database;

const COLLECTION: &str = "admin_users";

#[async_trait]
pub trait AdminUserRepository: Send + Sync {
    async fn insert(&self, user: AdminUser) -> RepositoryResult<AdminUser>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<AdminUser>>;
}

pub struct MongoAdminUserRepository {
    collection: mongodb::Collection<AdminUser>,
}

impl MongoAdminUserRepository {
    pub fn new(db: &Database) -> Self {
        MongoAdminUserRepository {
            collection: db.collection::<AdminUser>(COLLECTION),
        }
    }
}

#[async_trait]
impl AdminUserRepository for MongoAdminUserRepository {
    async fn insert(&self, mut user: AdminUser) -> RepositoryResult<AdminUser> {
        user.id = Some(ObjectId::new());
        let now = now_rfc3339();
        user.created_at = Some(now.clone());
        user.updated_at = Some(now);
        let result = self.collection.insert_one(user.clone(), None).await;
        match result {
            Ok(_) => Ok(user),
            Err(e) => Err(RepositoryError::database(format!("Failed to insert admin user: {}", e))),
        }
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<AdminUser>> {
        let filter = doc! { "email": email };
        let user = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find admin user by email: {}", e)))?;
        Ok(user)
    }
}
