
use axum::{middleware, Router, routing::get};
use std::net::SocketAddr;
use tracing::info;
use crate::config::app_conf::AppConfig;
use crate::config::admin_user_conf::AdminUserConfig;
use crate::model::admin_user::AdminUser;
use crate::service::activity_logger::ActivityLogger;
use crate::service::auth_service::{AuthService, AuthServiceImpl};
use crate::service::blog_service::BlogServiceImpl;
use crate::service::enquiry_service::EnquiryServiceImpl;
use crate::service::lead_service::LeadServiceImpl;
use crate::service::testimonial_service::TestimonialServiceImpl;
use std::sync::Arc;


pub struct App {
    config: AppConfig,
    router: Router,
    pub auth_service: Arc<AuthServiceImpl>,
    pub enquiry_service: Arc<EnquiryServiceImpl>,
    pub testimonial_service: Arc<TestimonialServiceImpl>,
    pub blog_service: Arc<BlogServiceImpl>,
    pub lead_service: Arc<LeadServiceImpl>,
    pub activity_logger: Arc<ActivityLogger>,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();

        use crate::config::jwt_conf::JwtConfig;
        use crate::config::mongo_conf::MongoConfig;
        use crate::repository::activity_log_repo::{ActivityLogRepository, MongoActivityLogRepository};
        use crate::repository::admin_user_repo::{AdminUserRepository, MongoAdminUserRepository};
        use crate::repository::blog_repo::{BlogPostRepository, MongoBlogPostRepository};
        use crate::repository::db;
        use crate::repository::enquiry_repo::{EnquiryRepository, MongoEnquiryRepository};
        use crate::repository::lead_repo::{LeadRepository, MongoLeadRepository};
        use crate::repository::testimonial_repo::{MongoTestimonialRepository, TestimonialRepository};
        use crate::util::jwt::JwtTokenUtilsImpl;

        let jwt_config = JwtConfig::from_env().expect("JWT config error");
        let mongo_config = MongoConfig::from_env().expect("Mongo config error");

        // One client for the whole process; every repository borrows the
        // same database handle.
        let db = db::connect(&mongo_config).await.expect("MongoDB connection error");

        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));

        let activity_repo =
            Arc::new(MongoActivityLogRepository::new(&db)) as Arc<dyn ActivityLogRepository>;
        let activity_logger = Arc::new(ActivityLogger::new(activity_repo));

        let user_repo = Arc::new(MongoAdminUserRepository::new(&db)) as Arc<dyn AdminUserRepository>;
        let auth_service = Arc::new(AuthServiceImpl::new(
            user_repo,
            jwt_utils.clone(),
            activity_logger.clone(),
        ));

        let enquiry_repo = Arc::new(MongoEnquiryRepository::new(&db)) as Arc<dyn EnquiryRepository>;
        let enquiry_service = Arc::new(EnquiryServiceImpl::new(enquiry_repo, activity_logger.clone()));

        let testimonial_repo =
            Arc::new(MongoTestimonialRepository::new(&db)) as Arc<dyn TestimonialRepository>;
        let testimonial_service = Arc::new(TestimonialServiceImpl::new(testimonial_repo));

        let blog_repo = Arc::new(MongoBlogPostRepository::new(&db)) as Arc<dyn BlogPostRepository>;
        let blog_service = Arc::new(BlogServiceImpl::new(blog_repo, activity_logger.clone()));

        let lead_repo = Arc::new(MongoLeadRepository::new(&db)) as Arc<dyn LeadRepository>;
        let lead_service = Arc::new(LeadServiceImpl::new(lead_repo));

        // --- AdminAuthState setup ---
        use crate::middlewares::admin_middleware::AdminAuthState;
        let admin_auth_state = Arc::new(AdminAuthState {
            jwt_utils: jwt_utils.clone(),
        });

        let mut app = App {
            config,
            router: Router::new(),
            auth_service,
            enquiry_service,
            testimonial_service,
            blog_service,
            lead_service,
            activity_logger,
        };
        app.router = app.create_router_with_admin(admin_auth_state);
        app.create_first_admin_user().await;
        app
    }


    fn create_router_with_admin(&self, admin_auth_state: Arc<crate::middlewares::admin_middleware::AdminAuthState>) -> Router {
        use crate::middlewares::request_log::log_request;
        use crate::middlewares::request_meta::capture_request_meta;
        use crate::router::activity_router::activity_router;
        use crate::router::auth_router::auth_router;
        use crate::router::blog_router::blog_router;
        use crate::router::enquiry_router::enquiry_router;
        use crate::router::lead_router::lead_router;
        use crate::router::testimonial_router::testimonial_router;
        Router::new()
            .merge(enquiry_router(self.enquiry_service.clone(), admin_auth_state.clone()))
            .merge(testimonial_router(self.testimonial_service.clone(), admin_auth_state.clone()))
            .merge(blog_router(self.blog_service.clone(), admin_auth_state.clone()))
            .merge(lead_router(self.lead_service.clone(), admin_auth_state.clone()))
            .merge(auth_router(self.auth_service.clone(), admin_auth_state.clone()))
            .merge(activity_router(self.activity_logger.clone(), admin_auth_state))
            .route("/health", get(|| async { "OK" }))
            .layer(middleware::from_fn(log_request))
            .layer(middleware::from_fn(capture_request_meta))
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(self.config.host.parse().expect("Invalid host"), self.config.port);
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await.expect("Failed to bind address");
        axum::serve(
            listener,
            self.router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Failed to start server");
    }

    async fn create_first_admin_user(&self) {
        use tracing::{info, warn, error};
        // Load admin config
        let admin_conf = match AdminUserConfig::from_env() {
            Ok(c) => c,
            Err(e) => {
                warn!("Admin user config not loaded: {e}");
                return;
            }
        };

        // Check if admin user already exists by email
        use crate::repository::admin_user_repo::AdminUserRepository;
        let user_repo = self.auth_service.user_repo.clone();
        match user_repo.find_by_email(&admin_conf.email).await {
            Ok(Some(_)) => {
                info!("Admin user already exists, skipping creation.");
                return;
            },
            Ok(None) => { /* continue to create */ },
            Err(e) => {
                error!("Failed to check for existing admin user: {e}");
                return;
            }
        }

        let user = AdminUser {
            id: None,
            username: admin_conf.username.clone(),
            first_name: admin_conf.first_name.clone(),
            last_name: admin_conf.last_name.clone(),
            email: admin_conf.email.clone(),
            password_hash: String::new(), // Will be set by register
            role: "admin".to_string(),
            created_at: None,
            updated_at: None,
        };
        match self.auth_service.register(user, admin_conf.password.clone()).await {
            Ok(_) => info!("First admin user created."),
            Err(e) => error!("Failed to create admin user: {e}"),
        }
    }
}
