/// Server services
pub mod auth;
pub mod validation;

pub use auth::AuthService;
