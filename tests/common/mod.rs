//! Shared fixtures for the handler tests: in-memory repositories behind the
//! same traits the Mongo implementations fill, plus JWT helpers for hitting
//! admin routes. The fakes mirror the Mongo sort order (created_at desc,
//! then id desc) so pagination assertions hold.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bson::oid::ObjectId;

use coolbreeze_backend::config::JwtConfig;
use coolbreeze_backend::middlewares::admin_middleware::AdminAuthState;
use coolbreeze_backend::model::activity_log::{ActivityLog, ActivityType, EntityType};
use coolbreeze_backend::model::admin_user::AdminUser;
use coolbreeze_backend::model::blog_post::{BlogPost, BlogPostStatus};
use coolbreeze_backend::model::enquiry::{Enquiry, EnquiryStatus, ServiceCategory};
use coolbreeze_backend::model::lead::JustDialLead;
use coolbreeze_backend::model::testimonial::{Testimonial, TestimonialStatus};
use coolbreeze_backend::repository::activity_log_repo::ActivityLogRepository;
use coolbreeze_backend::repository::admin_user_repo::AdminUserRepository;
use coolbreeze_backend::repository::blog_repo::BlogPostRepository;
use coolbreeze_backend::repository::enquiry_repo::EnquiryRepository;
use coolbreeze_backend::repository::lead_repo::LeadRepository;
use coolbreeze_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use coolbreeze_backend::repository::testimonial_repo::TestimonialRepository;
use coolbreeze_backend::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};
use coolbreeze_backend::util::time::now_rfc3339;

// Newest first, matching the Mongo repositories' sort. Hex compare on the id
// breaks created_at ties the same way _id desc does.
fn newest_first<T>(rows: &mut [T], created_at: impl Fn(&T) -> Option<String>, id: impl Fn(&T) -> Option<ObjectId>) {
    rows.sort_by(|a, b| {
        created_at(b)
            .cmp(&created_at(a))
            .then_with(|| id(b).map(|i| i.to_hex()).cmp(&id(a).map(|i| i.to_hex())))
    });
}

// ---------------------------------------------------------------------------
// Enquiries

#[derive(Default)]
pub struct InMemoryEnquiryRepository {
    pub rows: Mutex<Vec<Enquiry>>,
    pub fail_update_status: AtomicBool,
}

impl InMemoryEnquiryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, id: ObjectId) -> Option<Enquiry> {
        self.rows.lock().unwrap().iter().find(|r| r.id == Some(id)).cloned()
    }
}

#[async_trait]
impl EnquiryRepository for InMemoryEnquiryRepository {
    async fn create(&self, enquiry: Enquiry) -> RepositoryResult<Enquiry> {
        let mut new_enquiry = enquiry;
        new_enquiry.id = Some(ObjectId::new());
        let now = now_rfc3339();
        new_enquiry.created_at = Some(now.clone());
        new_enquiry.updated_at = Some(now);
        self.rows.lock().unwrap().push(new_enquiry.clone());
        Ok(new_enquiry)
    }

    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Enquiry> {
        self.find(id)
            .ok_or_else(|| RepositoryError::not_found(format!("Enquiry not found for ID: {}", id)))
    }

    async fn list_page(
        &self,
        archived: bool,
        status: Option<EnquiryStatus>,
        skip: u64,
        limit: i64,
    ) -> RepositoryResult<Vec<Enquiry>> {
        let mut rows: Vec<Enquiry> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.archived == archived && status.map(|s| r.status == s).unwrap_or(true))
            .cloned()
            .collect();
        newest_first(&mut rows, |r| r.created_at.clone(), |r| r.id);
        Ok(rows.into_iter().skip(skip as usize).take(limit as usize).collect())
    }

    async fn count(&self, archived: bool, status: Option<EnquiryStatus>) -> RepositoryResult<u64> {
        let count = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.archived == archived && status.map(|s| r.status == s).unwrap_or(true))
            .count();
        Ok(count as u64)
    }

    async fn update_status(&self, id: ObjectId, status: EnquiryStatus) -> RepositoryResult<Enquiry> {
        if self.fail_update_status.load(Ordering::SeqCst) {
            return Err(RepositoryError::database("simulated write failure"));
        }
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No enquiry found to update status for ID: {}", id)))?;
        row.status = status;
        row.updated_at = Some(now_rfc3339());
        Ok(row.clone())
    }

    async fn set_archived(
        &self,
        id: ObjectId,
        archived: bool,
        status: EnquiryStatus,
    ) -> RepositoryResult<Enquiry> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No enquiry found to archive for ID: {}", id)))?;
        row.archived = archived;
        row.status = status;
        row.updated_at = Some(now_rfc3339());
        Ok(row.clone())
    }

    async fn update_comment(&self, id: ObjectId, comment: &str) -> RepositoryResult<Enquiry> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No enquiry found to comment for ID: {}", id)))?;
        row.admin_comment = Some(comment.to_string());
        row.updated_at = Some(now_rfc3339());
        Ok(row.clone())
    }

    async fn count_recent_by_email_and_phone(
        &self,
        email: &str,
        phone: &str,
        since: &str,
    ) -> RepositoryResult<u64> {
        let count = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| {
                r.email == email
                    && r.phone == phone
                    && r.created_at.as_deref().map(|c| c > since).unwrap_or(false)
            })
            .count();
        Ok(count as u64)
    }

    async fn count_recent_by_email(&self, email: &str, since: &str) -> RepositoryResult<u64> {
        let count = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.email == email && r.created_at.as_deref().map(|c| c > since).unwrap_or(false))
            .count();
        Ok(count as u64)
    }
}

pub fn sample_enquiry(email: &str, phone: &str) -> Enquiry {
    Enquiry {
        id: None,
        name: "Ravi Kumar".to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        service: ServiceCategory::Repair,
        message: "The AC in the bedroom stopped cooling last week.".to_string(),
        status: EnquiryStatus::Pending,
        archived: false,
        admin_comment: None,
        created_at: None,
        updated_at: None,
    }
}

// ---------------------------------------------------------------------------
// Testimonials

#[derive(Default)]
pub struct InMemoryTestimonialRepository {
    pub rows: Mutex<Vec<Testimonial>>,
}

impl InMemoryTestimonialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, id: ObjectId) -> Option<Testimonial> {
        self.rows.lock().unwrap().iter().find(|r| r.id == Some(id)).cloned()
    }
}

#[async_trait]
impl TestimonialRepository for InMemoryTestimonialRepository {
    async fn create(&self, testimonial: Testimonial) -> RepositoryResult<Testimonial> {
        let mut new_testimonial = testimonial;
        new_testimonial.id = Some(ObjectId::new());
        let now = now_rfc3339();
        new_testimonial.created_at = Some(now.clone());
        new_testimonial.updated_at = Some(now);
        self.rows.lock().unwrap().push(new_testimonial.clone());
        Ok(new_testimonial)
    }

    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Testimonial> {
        self.find(id)
            .ok_or_else(|| RepositoryError::not_found(format!("Testimonial not found for ID: {}", id)))
    }

    async fn list_by_statuses(
        &self,
        statuses: &[TestimonialStatus],
    ) -> RepositoryResult<Vec<Testimonial>> {
        let mut rows: Vec<Testimonial> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| statuses.contains(&r.status))
            .cloned()
            .collect();
        newest_first(&mut rows, |r| r.created_at.clone(), |r| r.id);
        Ok(rows)
    }

    async fn update_status(
        &self,
        id: ObjectId,
        status: TestimonialStatus,
    ) -> RepositoryResult<Testimonial> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No testimonial found to update for ID: {}", id)))?;
        row.status = status;
        row.updated_at = Some(now_rfc3339());
        Ok(row.clone())
    }
}

pub fn sample_testimonial(name: &str, status: TestimonialStatus) -> Testimonial {
    Testimonial {
        id: None,
        name: name.to_string(),
        location: "Anna Nagar".to_string(),
        service: ServiceCategory::Service,
        rating: 5,
        message: "Prompt service, the technician was thorough.".to_string(),
        status,
        source: "website".to_string(),
        archived: false,
        created_at: None,
        updated_at: None,
    }
}

// ---------------------------------------------------------------------------
// Blog posts

#[derive(Default)]
pub struct InMemoryBlogPostRepository {
    pub rows: Mutex<Vec<BlogPost>>,
}

impl InMemoryBlogPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, id: ObjectId) -> Option<BlogPost> {
        self.rows.lock().unwrap().iter().find(|r| r.id == Some(id)).cloned()
    }
}

#[async_trait]
impl BlogPostRepository for InMemoryBlogPostRepository {
    async fn create(&self, post: BlogPost) -> RepositoryResult<BlogPost> {
        let mut new_post = post;
        new_post.id = Some(ObjectId::new());
        let now = now_rfc3339();
        new_post.created_at = Some(now.clone());
        new_post.updated_at = Some(now);
        self.rows.lock().unwrap().push(new_post.clone());
        Ok(new_post)
    }

    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<BlogPost> {
        self.find(id)
            .ok_or_else(|| RepositoryError::not_found(format!("Blog post not found for ID: {}", id)))
    }

    async fn update(&self, id: ObjectId, post: BlogPost) -> RepositoryResult<BlogPost> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No blog post found to update for ID: {}", id)))?;
        let created_at = row.created_at.clone();
        *row = post;
        row.id = Some(id);
        row.created_at = created_at;
        row.updated_at = Some(now_rfc3339());
        Ok(row.clone())
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != Some(id));
        if rows.len() == before {
            return Err(RepositoryError::not_found(format!(
                "No blog post found to delete for ID: {}",
                id
            )));
        }
        Ok(())
    }

    async fn list(&self) -> RepositoryResult<Vec<BlogPost>> {
        let mut rows: Vec<BlogPost> = self.rows.lock().unwrap().clone();
        newest_first(&mut rows, |r| r.created_at.clone(), |r| r.id);
        Ok(rows)
    }

    async fn list_by_status(&self, status: BlogPostStatus) -> RepositoryResult<Vec<BlogPost>> {
        let mut rows: Vec<BlogPost> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.status == status)
            .cloned()
            .collect();
        newest_first(&mut rows, |r| r.created_at.clone(), |r| r.id);
        Ok(rows)
    }

    async fn find_by_slug(
        &self,
        slug: &str,
        status: BlogPostStatus,
    ) -> RepositoryResult<Option<BlogPost>> {
        let mut rows: Vec<BlogPost> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.slug == slug && r.status == status)
            .cloned()
            .collect();
        newest_first(&mut rows, |r| r.created_at.clone(), |r| r.id);
        Ok(rows.into_iter().next())
    }

    async fn update_status(&self, id: ObjectId, status: BlogPostStatus) -> RepositoryResult<BlogPost> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == Some(id))
            .ok_or_else(|| {
                RepositoryError::not_found(format!("No blog post found to update status for ID: {}", id))
            })?;
        row.status = status;
        row.updated_at = Some(now_rfc3339());
        Ok(row.clone())
    }
}

// ---------------------------------------------------------------------------
// JustDial leads

#[derive(Default)]
pub struct InMemoryLeadRepository {
    pub rows: Mutex<Vec<JustDialLead>>,
    pub fail_insert: AtomicBool,
}

impl InMemoryLeadRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeadRepository for InMemoryLeadRepository {
    async fn create(&self, lead: JustDialLead) -> RepositoryResult<JustDialLead> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(RepositoryError::database("simulated lead insert outage"));
        }
        let mut new_lead = lead;
        new_lead.id = Some(ObjectId::new());
        new_lead.created_at = Some(now_rfc3339());
        self.rows.lock().unwrap().push(new_lead.clone());
        Ok(new_lead)
    }

    async fn list_page(&self, skip: u64, limit: i64) -> RepositoryResult<Vec<JustDialLead>> {
        let mut rows: Vec<JustDialLead> = self.rows.lock().unwrap().clone();
        newest_first(&mut rows, |r| r.created_at.clone(), |r| r.id);
        Ok(rows.into_iter().skip(skip as usize).take(limit as usize).collect())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }

    async fn mark_processed(&self, id: ObjectId) -> RepositoryResult<JustDialLead> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == Some(id))
            .ok_or_else(|| {
                RepositoryError::not_found(format!("No lead found to mark processed for ID: {}", id))
            })?;
        row.processed = true;
        Ok(row.clone())
    }
}

// ---------------------------------------------------------------------------
// Admin accounts

#[derive(Default)]
pub struct InMemoryAdminUserRepository {
    pub rows: Mutex<Vec<AdminUser>>,
}

impl InMemoryAdminUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdminUserRepository for InMemoryAdminUserRepository {
    async fn insert(&self, mut user: AdminUser) -> RepositoryResult<AdminUser> {
        user.id = Some(ObjectId::new());
        let now = now_rfc3339();
        user.created_at = Some(now.clone());
        user.updated_at = Some(now);
        self.rows.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<AdminUser>> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }
}

// ---------------------------------------------------------------------------
// Activity trail

#[derive(Default)]
pub struct InMemoryActivityLogRepository {
    pub rows: Mutex<Vec<ActivityLog>>,
    pub fail_append: AtomicBool,
}

impl InMemoryActivityLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<ActivityLog> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl ActivityLogRepository for InMemoryActivityLogRepository {
    async fn append(&self, log: ActivityLog) -> RepositoryResult<ActivityLog> {
        if self.fail_append.load(Ordering::SeqCst) {
            return Err(RepositoryError::database("simulated audit outage"));
        }
        let mut new_log = log;
        new_log.id = Some(ObjectId::new());
        new_log.created_at = Some(now_rfc3339());
        self.rows.lock().unwrap().push(new_log.clone());
        Ok(new_log)
    }

    async fn list_page(
        &self,
        activity_type: Option<ActivityType>,
        entity_type: Option<EntityType>,
        skip: u64,
        limit: i64,
    ) -> RepositoryResult<Vec<ActivityLog>> {
        let mut rows: Vec<ActivityLog> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| {
                activity_type.map(|t| r.activity_type == t).unwrap_or(true)
                    && entity_type.map(|t| r.entity_type == t).unwrap_or(true)
            })
            .cloned()
            .collect();
        newest_first(&mut rows, |r| r.created_at.clone(), |r| r.id);
        Ok(rows.into_iter().skip(skip as usize).take(limit as usize).collect())
    }

    async fn count(
        &self,
        activity_type: Option<ActivityType>,
        entity_type: Option<EntityType>,
    ) -> RepositoryResult<u64> {
        let count = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| {
                activity_type.map(|t| r.activity_type == t).unwrap_or(true)
                    && entity_type.map(|t| r.entity_type == t).unwrap_or(true)
            })
            .count();
        Ok(count as u64)
    }
}

// ---------------------------------------------------------------------------
// Auth helpers

pub fn test_jwt_utils() -> Arc<JwtTokenUtilsImpl> {
    Arc::new(JwtTokenUtilsImpl::new(JwtConfig::default()))
}

pub fn test_admin_auth_state(jwt_utils: &Arc<JwtTokenUtilsImpl>) -> Arc<AdminAuthState> {
    Arc::new(AdminAuthState {
        jwt_utils: Arc::clone(jwt_utils),
    })
}

pub fn admin_bearer_token(jwt_utils: &JwtTokenUtilsImpl) -> String {
    let token = jwt_utils
        .generate_access_token(&ObjectId::new().to_hex(), "admin@coolbreeze.example", "admin")
        .expect("token generation should not fail");
    format!("Bearer {}", token)
}

pub fn bearer_token_with_role(jwt_utils: &JwtTokenUtilsImpl, role: &str) -> String {
    let token = jwt_utils
        .generate_access_token(&ObjectId::new().to_hex(), "someone@coolbreeze.example", role)
        .expect("token generation should not fail");
    format!("Bearer {}", token)
}

/// The audit append rides a spawned task; give it a beat to land before
/// asserting on the trail.
pub async fn settle_audit() {
    tokio::time::sleep(std::time::Duration::from_millis(25)).await;
}
