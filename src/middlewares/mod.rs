pub mod admin_middleware;
pub mod request_log;
pub mod request_meta;
