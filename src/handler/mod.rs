pub mod activity_handler;
pub mod auth_handler;
pub mod blog_handler;
pub mod enquiry_handler;
pub mod lead_handler;
pub mod testimonial_handler;

use crate::middlewares::request_meta::RequestMeta;
use crate::service::activity_logger::ActorContext;
use crate::util::jwt::Claims;

/// Builds the audit actor from the authenticated claims plus whatever
/// request metadata the middleware stack captured.
pub(crate) fn actor_context(claims: &Claims, meta: Option<&RequestMeta>) -> ActorContext {
    ActorContext {
        admin_id: claims.sub.clone(),
        admin_email: claims.email.clone(),
        ip_address: meta.and_then(|m| m.ip_address.clone()),
        user_agent: meta.and_then(|m| m.user_agent.clone()),
    }
}
