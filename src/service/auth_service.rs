use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, instrument};

use crate::model::activity_log::{ActivityType, EntityType};
use crate::model::admin_user::AdminUser;
use crate::repository::admin_user_repo::AdminUserRepository;
use crate::service::activity_logger::{ActivityEntry, ActivityLogger, ActorContext};
use crate::util::error::ServiceError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

#[derive(Debug, Clone, serde::Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

/// Admin account with the password hash stripped.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AdminProfile {
    pub id: Option<ObjectId>,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<AdminUser> for AdminProfile {
    fn from(user: AdminUser) -> Self {
        AdminProfile {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct AdminAuthResponse {
    pub user: AdminProfile,
    pub tokens: AuthTokens,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an admin account. Only the startup bootstrap calls this;
    /// there is no public registration route.
    async fn register(&self, user: AdminUser, password: String) -> Result<AdminProfile, ServiceError>;
    async fn login(
        &self,
        email: String,
        password: String,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<AdminAuthResponse, ServiceError>;
    /// Token invalidation happens client side; the server only records the
    /// logout in the activity trail.
    async fn logout(&self, actor: &ActorContext) -> Result<(), ServiceError>;
    async fn refresh_token(&self, refresh_token: String) -> Result<AuthTokens, ServiceError>;
}

pub struct AuthServiceImpl {
    pub user_repo: Arc<dyn AdminUserRepository>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    pub activity_logger: Arc<ActivityLogger>,
}

impl AuthServiceImpl {
    pub fn new(
        user_repo: Arc<dyn AdminUserRepository>,
        jwt_utils: Arc<JwtTokenUtilsImpl>,
        activity_logger: Arc<ActivityLogger>,
    ) -> Self {
        AuthServiceImpl {
            user_repo,
            jwt_utils,
            activity_logger,
        }
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    #[instrument(skip(self, user, password), fields(username = %user.username, email = %user.email))]
    async fn register(&self, mut user: AdminUser, password: String) -> Result<AdminProfile, ServiceError> {
        info!("Registering admin account");
        let hash = PasswordUtilsImpl::hash_password(&password)
            .map_err(|e| ServiceError::InvalidInput(format!("Password hash error: {}", e)))?;
        user.password_hash = hash;
        let inserted = self.user_repo.insert(user).await;
        match &inserted {
            Ok(_) => info!("Admin account inserted successfully"),
            Err(e) => error!("Failed to insert admin account: {e}"),
        }
        Ok(AdminProfile::from(inserted?))
    }

    #[instrument(skip(self, password, ip_address, user_agent), fields(email = %email))]
    async fn login(
        &self,
        email: String,
        password: String,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<AdminAuthResponse, ServiceError> {
        info!("Admin login attempt");
        let user_opt = self.user_repo.find_by_email(&email).await;
        match &user_opt {
            Ok(Some(_)) => info!("Admin found for login"),
            Ok(None) => error!("Admin not found for login"),
            Err(e) => error!("Failed to fetch admin for login: {e}"),
        }
        let user = user_opt?.ok_or(ServiceError::NotFound("Admin not found".to_string()))?;

        let valid = PasswordUtilsImpl::verify_password(&password, &user.password_hash)
            .map_err(|e| ServiceError::InvalidInput(format!("Password verify error: {}", e)))?;
        if !valid {
            error!("Invalid credentials for admin: {}", email);
            return Err(ServiceError::InvalidInput("Invalid credentials".to_string()));
        }

        let user_id = user.id.as_ref().map(|id| id.to_hex()).unwrap_or_default();
        let tokens = self
            .jwt_utils
            .generate_token_pair(&user_id, &user.email, &user.role)
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))?;

        self.activity_logger.record(
            &ActorContext {
                admin_id: user_id.clone(),
                admin_email: user.email.clone(),
                ip_address,
                user_agent,
            },
            ActivityEntry {
                activity_type: ActivityType::Login,
                entity_type: EntityType::User,
                entity_id: Some(user_id),
                details: None,
                previous_values: None,
                new_values: None,
            },
        );

        info!("Admin logged in successfully");
        Ok(AdminAuthResponse {
            user: AdminProfile::from(user),
            tokens: AuthTokens {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
                expires_in: tokens.expires_in,
                token_type: tokens.token_type,
            },
        })
    }

    #[instrument(skip(self, actor), fields(email = %actor.admin_email))]
    async fn logout(&self, actor: &ActorContext) -> Result<(), ServiceError> {
        info!("Admin logout");
        self.activity_logger.record(
            actor,
            ActivityEntry {
                activity_type: ActivityType::Logout,
                entity_type: EntityType::User,
                entity_id: Some(actor.admin_id.clone()),
                details: None,
                previous_values: None,
                new_values: None,
            },
        );
        Ok(())
    }

    #[instrument(skip(self, refresh_token))]
    async fn refresh_token(&self, refresh_token: String) -> Result<AuthTokens, ServiceError> {
        info!("Refreshing token");
        let claims = self
            .jwt_utils
            .validate_refresh_token(&refresh_token)
            .map_err(|e| ServiceError::InvalidInput(format!("Invalid refresh token: {}", e)))?;
        let tokens = self
            .jwt_utils
            .generate_token_pair(&claims.sub, &claims.email, &claims.role)
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))?;
        info!("Token refreshed successfully");
        Ok(AuthTokens {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
            token_type: tokens.token_type,
        })
    }
}
