pub mod api_error;
pub mod mathlens_health;
