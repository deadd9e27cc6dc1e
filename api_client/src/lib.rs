pub mod api_error;
pub mod client_manager;
pub mod customer_api;
pub mod models;
pub mod quote_api;

/// Base URL of the production backend, used when no override is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://quote-backend-production-c1be.up.railway.app";
